use serde_json::Value;

use super::{DEFAULT_LIMIT, array_field, path_segment};
use crate::{
    ConfigError, LocationSuggestion, Provider, ProviderAdapter, ProviderConfig, ProviderRequest,
    QueryOptions, QueryParams,
    normalize::{DEFAULT_KIND, FieldTable},
};

/// Options that shape the URL path instead of the query string.
const PATH_OPTIONS: [&str; 2] = ["ext", "versionNumber"];

/// TomTom search in typeahead mode. Scores are roughly 0..3 and are scaled into `[0, 1]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomTom;

const FIELDS: FieldTable<'static> = FieldTable {
    provider: Provider::TomTom,
    place_id: &["/id"],
    display_name: &[
        "/poi/name",
        "/address/freeformAddress",
        "/address/streetName",
    ],
    address: &[],
    lat: &["/position/lat"],
    lon: &["/position/lon"],
    kind: &["/type", "/poi/categories/0", "/entityType"],
    kind_default: DEFAULT_KIND,
    importance: &["/score"],
    importance_scale: 3.0,
};

impl ProviderAdapter for TomTom {
    fn provider(&self) -> Provider {
        Provider::TomTom
    }

    fn default_base_url(&self) -> &'static str {
        "https://api.tomtom.com/search/2/search"
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
            .set("key", api_key)
            .set("typeahead", true)
            .set("limit", DEFAULT_LIMIT)
            .extend_except(options, &PATH_OPTIONS);

        let ext = options.get_text("ext").unwrap_or_else(|| "json".to_string());
        let base = match config.base_url.as_deref().filter(|url| !url.is_empty()) {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => match options.get_text("versionNumber") {
                Some(version) => format!("https://api.tomtom.com/search/{version}/search"),
                None => self.default_base_url().to_string(),
            },
        };
        let url = params.attach_to(&format!("{base}/{}.{ext}", path_segment(query)));
        Ok(ProviderRequest::get(self.provider(), url))
    }

    fn unwrap_envelope(&self, body: Value) -> Vec<Value> {
        array_field(body, &["results"])
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
        ProviderConfig::new().with_api_key("tt")
    }

    #[test]
    fn test_default_request() {
        let request = TomTom
            .build_request("pizza hut", &config(), &QueryOptions::new())
            .unwrap();
        assert_eq!(
            request.url,
            "https://api.tomtom.com/search/2/search/pizza%20hut.json?key=tt&typeahead=true&limit=10"
        );
    }

    #[test]
    fn test_path_options_shape_url() {
        let options = QueryOptions::new()
            .with("ext", "jsonp")
            .with("versionNumber", 3)
            .with("countrySet", "NL");
        let request = TomTom.build_request("Ams", &config(), &options).unwrap();
        assert!(
            request
                .url
                .starts_with("https://api.tomtom.com/search/3/search/Ams.jsonp?")
        );
        assert_eq!(request.query_param("countrySet").as_deref(), Some("NL"));
        assert_eq!(request.query_param("ext"), None);
        assert_eq!(request.query_param("versionNumber"), None);
    }

    #[test]
    fn test_normalize_poi() {
        let s = TomTom.normalize(json!({
            "type": "POI",
            "id": "g6JpZK",
            "score": 2.1,
            "poi": {"name": "Pizza Hut", "categories": ["pizza", "restaurant"]},
            "address": {"freeformAddress": "Damrak 1, Amsterdam"},
            "position": {"lat": 52.37, "lon": 4.89}
        }));
        assert_eq!(s.place_id, "g6JpZK");
        assert_eq!(s.display_name, "Pizza Hut");
        assert_eq!(s.kind, "POI");
        assert!((s.importance - 0.7).abs() < 1e-9);
        assert_eq!(s.lat, "52.37");
        assert_eq!(s.lon, "4.89");
    }

    #[test]
    fn test_normalize_address_only() {
        let s = TomTom.normalize(json!({
            "entityType": "Municipality",
            "address": {"freeformAddress": "Amsterdam, Noord-Holland"}
        }));
        assert_eq!(s.display_name, "Amsterdam, Noord-Holland");
        assert_eq!(s.kind, "Municipality");
        assert_eq!(s.importance, 0.5);
    }
}
