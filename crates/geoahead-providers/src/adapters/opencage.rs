use serde_json::Value;

use super::{DEFAULT_LIMIT, array_field};
use crate::{
    ConfigError, LocationSuggestion, Provider, ProviderAdapter, ProviderConfig, ProviderRequest,
    QueryOptions, QueryParams, normalize::FieldTable,
};

/// OpenCage forward geocoding. Results carry no identifier of their own;
/// the annotation geohash is used when present.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenCage;

const FIELDS: FieldTable<'static> = FieldTable {
    provider: Provider::OpenCage,
    place_id: &["/annotations/geohash"],
    display_name: &["/formatted", "/name"],
    address: &[],
    lat: &["/geometry/lat"],
    lon: &["/geometry/lng"],
    kind: &["/components/_type"],
    kind_default: "location",
    // confidence runs 1..10
    importance: &["/confidence"],
    importance_scale: 10.0,
};

impl ProviderAdapter for OpenCage {
    fn provider(&self) -> Provider {
        Provider::OpenCage
    }

    fn default_base_url(&self) -> &'static str {
        "https://api.opencagedata.com/geocode/v1/json"
    }

    fn build_request(
        &self,
        query: &str,
        config: &ProviderConfig,
        options: &QueryOptions,
    ) -> Result<ProviderRequest, ConfigError> {
        let api_key = self.provider().require_api_key(config)?;

        let mut params = QueryParams::new();
        params
            .set("q", query)
            .set("key", api_key)
            .set("limit", DEFAULT_LIMIT)
            .set("language", "en")
            .extend(options);

        let url = params.attach_to(config.base_url_or(self.default_base_url()));
        Ok(ProviderRequest::get(self.provider(), url))
    }

    fn unwrap_envelope(&self, body: Value) -> Vec<Value> {
        array_field(body, &["results"])
    }

    fn normalize(&self, raw: Value) -> LocationSuggestion {
        FIELDS.apply(raw)
    }
}
