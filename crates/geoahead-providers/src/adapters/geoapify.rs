use serde_json::Value;

use super::{DEFAULT_LIMIT, array_field};
use crate::{
    ConfigError, LocationSuggestion, Provider, ProviderAdapter, ProviderConfig, ProviderRequest,
    QueryOptions, QueryParams,
    normalize::{DEFAULT_KIND, FieldTable},
};

/// Geoapify address autocomplete.
///
/// The default `geojson` format nests fields under `properties`; the `json`
/// format returns flat `results`. Both are read.
#[derive(Debug, Clone, Copy, Default)]
pub struct Geoapify;

const FIELDS: FieldTable<'static> = FieldTable {
    provider: Provider::Geoapify,
    place_id: &["/properties/place_id", "/place_id"],
    display_name: &[
        "/properties/formatted",
        "/formatted",
        "/properties/name",
        "/name",
    ],
    address: &[
        "/properties/address_line1",
        "/properties/address_line2",
        "/address_line1",
        "/address_line2",
    ],
    lat: &["/properties/lat", "/lat", "/geometry/coordinates/1"],
    lon: &["/properties/lon", "/lon", "/geometry/coordinates/0"],
    kind: &["/properties/result_type", "/result_type"],
    kind_default: DEFAULT_KIND,
    importance: &["/properties/rank/importance", "/rank/importance"],
    importance_scale: 1.0,
};

impl ProviderAdapter for Geoapify {
    fn provider(&self) -> Provider {
        Provider::Geoapify
    }

    fn default_base_url(&self) -> &'static str {
        "https://api.geoapify.com/v1/geocode/autocomplete"
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
            .set("text", query)
            .set("apiKey", api_key)
            .set("limit", DEFAULT_LIMIT)
            .extend(options);

        let url = params.attach_to(config.base_url_or(self.default_base_url()));
        Ok(ProviderRequest::get(self.provider(), url))
    }

    fn unwrap_envelope(&self, body: Value) -> Vec<Value> {
        array_field(body, &["features", "results"])
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
    fn test_request_params() {
        let options = QueryOptions::new()
            .with("type", "city")
            .with("filter", "countrycode:de");
        let request = Geoapify
            .build_request("Mun", &ProviderConfig::new().with_api_key("geo-key"), &options)
            .unwrap();
        assert_eq!(
            request.url,
            "https://api.geoapify.com/v1/geocode/autocomplete?text=Mun&apiKey=geo-key&limit=10&filter=countrycode%3Ade&type=city"
        );
    }

    #[test]
    fn test_normalize_geojson_feature() {
        let s = Geoapify.normalize(json!({
            "type": "Feature",
            "properties": {
                "place_id": "51a8e3",
                "formatted": "Munich, Bavaria, Germany",
                "lat": 48.1371079,
                "lon": 11.5753822,
                "result_type": "city",
                "rank": {"importance": 0.79, "confidence": 1}
            },
            "geometry": {"type": "Point", "coordinates": [11.5753822, 48.1371079]}
        }));
        assert_eq!(s.place_id, "51a8e3");
        assert_eq!(s.display_name, "Munich, Bavaria, Germany");
        assert_eq!(s.lat, "48.1371079");
        assert_eq!(s.lon, "11.5753822");
        assert_eq!(s.kind, "city");
        assert_eq!(s.importance, 0.79);
    }

    #[test]
    fn test_normalize_geometry_and_address_lines() {
        let s = Geoapify.normalize(json!({
            "properties": {"address_line1": "Marienplatz 1", "address_line2": "80331 Munich"},
            "geometry": {"coordinates": [11.57, 48.13]}
        }));
        assert_eq!(s.display_name, "Marienplatz 1, 80331 Munich");
        assert_eq!(s.lat, "48.13");
        assert_eq!(s.lon, "11.57");
    }

    #[test]
    fn test_normalize_flat_json_result() {
        let s = Geoapify.normalize(json!({"place_id": "p1", "formatted": "Bonn", "lat": 50.7, "lon": 7.1}));
        assert_eq!(s.place_id, "p1");
        assert_eq!(s.display_name, "Bonn");
        assert_eq!(s.lat, "50.7");
    }
}
