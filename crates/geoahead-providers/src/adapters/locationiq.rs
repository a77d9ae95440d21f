use serde_json::Value;

use super::{DEFAULT_LIMIT, bare_array};
use crate::{
    ConfigError, LocationSuggestion, Provider, ProviderAdapter, ProviderConfig, ProviderRequest,
    QueryOptions, QueryParams,
    normalize::{DEFAULT_KIND, FieldTable},
};

/// LocationIQ search, Nominatim compatible output.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationIq;

const FIELDS: FieldTable<'static> = FieldTable {
    provider: Provider::LocationIq,
    place_id: &["/place_id", "/osm_id"],
    display_name: &["/display_name"],
    address: &["/display_place", "/display_address"],
    lat: &["/lat"],
    lon: &["/lon"],
    kind: &["/type", "/class"],
    kind_default: DEFAULT_KIND,
    importance: &["/importance"],
    importance_scale: 1.0,
};

impl ProviderAdapter for LocationIq {
    fn provider(&self) -> Provider {
        Provider::LocationIq
    }

    fn default_base_url(&self) -> &'static str {
        "https://us1.locationiq.com/v1/search.php"
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
            .set("format", "json")
            .set("limit", DEFAULT_LIMIT)
            .extend(options)
            .set("key", api_key);

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

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_key_is_not_overridable() {
        let options = QueryOptions::new()
            .with("key", "from-options")
            .with("countrycodes", "US,CA");
        let request = LocationIq
            .build_request("Empire", &ProviderConfig::new().with_api_key("real"), &options)
            .unwrap();
        assert_eq!(
            request.url,
            "https://us1.locationiq.com/v1/search.php?q=Empire&format=json&limit=10&countrycodes=US%2CCA&key=real"
        );
    }

    #[test]
    fn test_normalize() {
        let s = LocationIq.normalize(json!({
            "place_id": "322169966452",
            "osm_id": "25503669",
            "lat": "40.7484284",
            "lon": "-73.9856546",
            "class": "tourism",
            "type": "attraction",
            "display_name": "Empire State Building, 350, 5th Avenue, New York"
        }));
        assert_eq!(s.place_id, "322169966452");
        assert_eq!(s.display_name, "Empire State Building, 350, 5th Avenue, New York");
        assert_eq!(s.kind, "attraction");
        assert_eq!(s.lat, "40.7484284");
        assert_eq!(s.importance, 0.5);
    }

    #[test]
    fn test_normalize_composed_label() {
        let s = LocationIq.normalize(json!({
            "osm_id": "7",
            "display_place": "Table Mountain",
            "display_address": "Cape Town, South Africa",
            "class": "natural"
        }));
        assert_eq!(s.place_id, "7");
        assert_eq!(s.display_name, "Table Mountain, Cape Town, South Africa");
        assert_eq!(s.kind, "natural");
    }
}
