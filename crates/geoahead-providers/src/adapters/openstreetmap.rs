use serde_json::Value;

use super::{DEFAULT_LIMIT, bare_array};
use crate::{
    ConfigError, LocationSuggestion, Provider, ProviderAdapter, ProviderConfig, ProviderRequest,
    QueryOptions, QueryParams,
    normalize::{DEFAULT_KIND, FieldTable},
};

/// Nominatim search. Keyless; answers with a bare array.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenStreetMap;

const FIELDS: FieldTable<'static> = FieldTable {
    provider: Provider::OpenStreetMap,
    place_id: &["/place_id", "/osm_id"],
    display_name: &["/display_name", "/name"],
    address: &[
        "/address/road",
        "/address/city",
        "/address/state",
        "/address/country",
    ],
    lat: &["/lat"],
    lon: &["/lon"],
    kind: &["/type", "/class", "/addresstype"],
    kind_default: DEFAULT_KIND,
    importance: &["/importance"],
    importance_scale: 1.0,
};

impl ProviderAdapter for OpenStreetMap {
    fn provider(&self) -> Provider {
        Provider::OpenStreetMap
    }

    fn default_base_url(&self) -> &'static str {
        "https://nominatim.openstreetmap.org/search"
    }

    fn build_request(
        &self,
        query: &str,
        config: &ProviderConfig,
        options: &QueryOptions,
    ) -> Result<ProviderRequest, ConfigError> {
        let format = options
            .get_text("format")
            .unwrap_or_else(|| "jsonv2".to_string());

        let mut params = QueryParams::new();
        params
            .set("q", query)
            .set("format", "json")
            .set("limit", DEFAULT_LIMIT)
            .extend(options)
            .set("format", format)
            .set("addressdetails", 1);

        let url = params.attach_to(config.base_url_or(self.default_base_url()));
        Ok(ProviderRequest::get(self.provider(), url))
    }

    fn unwrap_envelope(&self, body: Value) -> Vec<Value> {
        bare_array(body)
    }

    fn normalize(&self, raw: Value) -> LocationSuggestion {
        FIELDS.apply(raw)
    }
}
