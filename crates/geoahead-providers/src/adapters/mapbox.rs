use serde_json::Value;

use super::{DEFAULT_LIMIT, array_field, path_segment};
use crate::{
    ConfigError, LocationSuggestion, Provider, ProviderAdapter, ProviderConfig, ProviderRequest,
    QueryOptions, QueryParams,
    normalize::{DEFAULT_KIND, FieldTable},
};

/// Mapbox forward geocoding. The query travels in the path.
///
/// Search Box `suggest` responses (`suggestions`, `mapbox_id`, `full_address`)
/// normalize too, for callers pointing `base_url` at that API.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mapbox;

const FIELDS: FieldTable<'static> = FieldTable {
    provider: Provider::Mapbox,
    place_id: &["/id", "/mapbox_id"],
    display_name: &["/place_name", "/full_address", "/text"],
    address: &["/name", "/place_formatted"],
    lat: &[
        "/center/1",
        "/geometry/coordinates/1",
        "/coordinates/latitude",
    ],
    lon: &[
        "/center/0",
        "/geometry/coordinates/0",
        "/coordinates/longitude",
    ],
    kind: &["/place_type/0", "/feature_type"],
    kind_default: DEFAULT_KIND,
    importance: &["/relevance"],
    importance_scale: 1.0,
};

impl ProviderAdapter for Mapbox {
    fn provider(&self) -> Provider {
        Provider::Mapbox
    }

    fn default_base_url(&self) -> &'static str {
        "https://api.mapbox.com/geocoding/v5/mapbox.places"
    }

    fn build_request(
        &self,
        query: &str,
        config: &ProviderConfig,
        options: &QueryOptions,
    ) -> Result<ProviderRequest, ConfigError> {
        let api_key = self.provider().require_api_key(config)?;

        let mut params = QueryParams::new();
        params.extend(options).set("access_token", api_key);
        if options.get_text("limit").is_none() {
            params.set("limit", DEFAULT_LIMIT);
        }

        let base = config
            .base_url_or(self.default_base_url())
            .trim_end_matches('/');
        let url = params.attach_to(&format!("{base}/{}.json", path_segment(query)));
        Ok(ProviderRequest::get(self.provider(), url))
    }

    fn unwrap_envelope(&self, body: Value) -> Vec<Value> {
        array_field(body, &["features", "suggestions"])
    }

    fn normalize(&self, raw: Value) -> LocationSuggestion {
        FIELDS.apply(raw)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn config() -> ProviderConfig {
        ProviderConfig::new().with_api_key("pk.test")
    }

    #[test]
    fn test_query_in_path() {
        let request = Mapbox
            .build_request("Los Angeles", &config(), &QueryOptions::new())
            .unwrap();
        assert_eq!(
            request.url,
            "https://api.mapbox.com/geocoding/v5/mapbox.places/Los%20Angeles.json?access_token=pk.test&limit=10"
        );
    }

    #[test]
    fn test_options_keep_caller_limit() {
        let options = QueryOptions::new()
            .with("limit", 5)
            .with("country", "US,CA")
            .with("proximity", "ip");
        let request = Mapbox.build_request("Austin", &config(), &options).unwrap();
        assert_eq!(request.query_param("limit").as_deref(), Some("5"));
        assert_eq!(request.query_param("country").as_deref(), Some("US,CA"));
        assert_eq!(request.query_param("proximity").as_deref(), Some("ip"));
        assert_eq!(request.query_param("access_token").as_deref(), Some("pk.test"));
    }

    #[test]
    fn test_normalize_geocoding_feature() {
        let s = Mapbox.normalize(json!({
            "id": "place.123",
            "place_type": ["place"],
            "relevance": 0.96,
            "text": "Austin",
            "place_name": "Austin, Texas, United States",
            "center": [-97.7437, 30.2711]
        }));
        assert_eq!(s.place_id, "place.123");
        assert_eq!(s.display_name, "Austin, Texas, United States");
        assert_eq!(s.lat, "30.2711");
        assert_eq!(s.lon, "-97.7437");
        assert_eq!(s.kind, "place");
        assert_eq!(s.importance, 0.96);
    }

    #[test]
    fn test_normalize_search_box_suggestion() {
        let s = Mapbox.normalize(json!({
            "name": "Paris",
            "mapbox_id": "dXJuOm1ieHBsYzpBUT",
            "feature_type": "place",
            "place_formatted": "Île-de-France, France"
        }));
        assert_eq!(s.place_id, "dXJuOm1ieHBsYzpBUT");
        assert_eq!(s.display_name, "Paris, Île-de-France, France");
        assert_eq!(s.kind, "place");
        assert_eq!(s.lat, "0");
    }

    #[test]
    fn test_envelope() {
        let body = json!({"type": "FeatureCollection", "features": [{"id": "a"}, {"id": "b"}]});
        assert_eq!(Mapbox.unwrap_envelope(body).len(), 2);
        let body = json!({"suggestions": [{"mapbox_id": "x"}]});
        assert_eq!(Mapbox.unwrap_envelope(body).len(), 1);
    }
}
