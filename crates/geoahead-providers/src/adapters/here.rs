use serde_json::Value;

use super::{DEFAULT_LIMIT, array_field};
use crate::{
    ConfigError, LocationSuggestion, Provider, ProviderAdapter, ProviderConfig, ProviderRequest,
    QueryOptions, QueryParams,
    normalize::{DEFAULT_KIND, FieldTable},
};

/// HERE autocomplete. List options (`types`, `show`, `lang`) are sent comma joined.
#[derive(Debug, Clone, Copy, Default)]
pub struct Here;

const FIELDS: FieldTable<'static> = FieldTable {
    provider: Provider::Here,
    place_id: &["/id"],
    display_name: &["/title", "/address/label"],
    address: &["/address/street", "/address/city", "/address/countryName"],
    lat: &["/position/lat"],
    lon: &["/position/lng"],
    kind: &["/resultType"],
    kind_default: DEFAULT_KIND,
    importance: &[],
    importance_scale: 1.0,
};

impl ProviderAdapter for Here {
    fn provider(&self) -> Provider {
        Provider::Here
    }

    fn default_base_url(&self) -> &'static str {
        "https://autocomplete.search.hereapi.com/v1/autocomplete"
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
            .set("apiKey", api_key)
            .set("limit", DEFAULT_LIMIT)
            .extend(options);

        let url = params.attach_to(config.base_url_or(self.default_base_url()));
        Ok(ProviderRequest::get(self.provider(), url))
    }

    fn unwrap_envelope(&self, body: Value) -> Vec<Value> {
        array_field(body, &["items"])
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
    fn test_list_options_are_joined() {
        let options = QueryOptions::new()
            .with("types", json!(["city", "postalCode"]))
            .with("lang", json!(["en-GB"]))
            .with("show", json!([]))
            .with("limit", 5);
        let request = Here
            .build_request("Eastb", &ProviderConfig::new().with_api_key("here-key"), &options)
            .unwrap();
        assert_eq!(request.query_param("types").as_deref(), Some("city,postalCode"));
        assert_eq!(request.query_param("lang").as_deref(), Some("en-GB"));
        assert_eq!(request.query_param("show"), None);
        assert_eq!(request.query_param("limit").as_deref(), Some("5"));
        assert_eq!(request.query_param("apiKey").as_deref(), Some("here-key"));
    }

    #[test]
    fn test_normalize() {
        let s = Here.normalize(json!({
            "title": "Garden Road, Eastbourne, BN20 8HF, United Kingdom",
            "id": "here:af:streetsection:abc",
            "resultType": "street",
            "address": {"label": "Garden Road, Eastbourne"}
        }));
        assert_eq!(s.place_id, "here:af:streetsection:abc");
        assert_eq!(s.display_name, "Garden Road, Eastbourne, BN20 8HF, United Kingdom");
        assert_eq!(s.kind, "street");
        assert_eq!((s.lat.as_str(), s.lon.as_str()), ("0", "0"));
    }

    #[test]
    fn test_normalize_label_and_position() {
        let s = Here.normalize(json!({
            "id": "x",
            "address": {"label": "Eastbourne, England"},
            "position": {"lat": 50.76, "lng": 0.28}
        }));
        assert_eq!(s.display_name, "Eastbourne, England");
        assert_eq!(s.lat, "50.76");
        assert_eq!(s.lon, "0.28");
    }
}
