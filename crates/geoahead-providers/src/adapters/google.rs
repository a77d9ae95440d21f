use serde_json::Value;

use super::array_field;
use crate::{
    ConfigError, LocationSuggestion, Provider, ProviderAdapter, ProviderConfig, ProviderRequest,
    QueryOptions, QueryParams,
    normalize::{DEFAULT_KIND, FieldTable},
};

/// Google Places Autocomplete. Predictions carry no coordinates.
///
/// Items shaped like the Places API (New) `suggestions[].placePrediction`
/// are understood as well as the classic `predictions[]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Google;

const FIELDS: FieldTable<'static> = FieldTable {
    provider: Provider::Google,
    place_id: &["/place_id", "/placeId", "/placePrediction/placeId"],
    display_name: &[
        "/description",
        "/text/text",
        "/placePrediction/text/text",
        "/structured_formatting/main_text",
        "/structuredFormat/mainText/text",
        "/placePrediction/structuredFormat/mainText/text",
        "/queryPrediction/text/text",
    ],
    address: &[],
    lat: &[],
    lon: &[],
    kind: &["/types/0", "/placePrediction/types/0"],
    kind_default: DEFAULT_KIND,
    importance: &[],
    importance_scale: 1.0,
};

impl ProviderAdapter for Google {
    fn provider(&self) -> Provider {
        Provider::Google
    }

    fn default_base_url(&self) -> &'static str {
        "https://maps.googleapis.com/maps/api/place/autocomplete/json"
    }

    fn build_request(
        &self,
        query: &str,
        config: &ProviderConfig,
        options: &QueryOptions,
    ) -> Result<ProviderRequest, ConfigError> {
        let api_key = self.provider().require_api_key(config)?;

        let mut params = QueryParams::new();
        params.set("input", query).set("key", api_key).extend(options);

        let url = params.attach_to(config.base_url_or(self.default_base_url()));
        Ok(ProviderRequest::get(self.provider(), url))
    }

    fn unwrap_envelope(&self, body: Value) -> Vec<Value> {
        array_field(body, &["predictions", "suggestions"])
    }

    fn normalize(&self, raw: Value) -> LocationSuggestion {
        FIELDS.apply(raw)
    }
}
