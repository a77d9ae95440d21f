//! One adapter per provider. Each owns its endpoint, parameter table,
//! envelope field and normalizer field table.

use serde_json::Value;

mod geoapify;
mod google;
mod here;
mod locationiq;
mod mapbox;
mod opencage;
mod openstreetmap;
mod tomtom;

pub use geoapify::Geoapify;
pub use google::Google;
pub use here::Here;
pub use locationiq::LocationIq;
pub use mapbox::Mapbox;
pub use opencage::OpenCage;
pub use openstreetmap::OpenStreetMap;
pub use tomtom::TomTom;

/// Result count requested when the caller sets no `limit`.
pub const DEFAULT_LIMIT: u32 = 10;

fn bare_array(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        _ => Vec::new(),
    }
}

/// Items under the first of `fields` that holds an array.
fn array_field(body: Value, fields: &[&str]) -> Vec<Value> {
    let Value::Object(mut map) = body else {
        return Vec::new();
    };
    fields
        .iter()
        .find_map(|field| match map.remove(*field) {
            Some(Value::Array(items)) => Some(items),
            _ => None,
        })
        .unwrap_or_default()
}

/// Path segment carrying the query text, percent-encoded.
fn path_segment(query: &str) -> String {
    urlencoding::encode(query).into_owned()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{Provider, UNKNOWN_LOCATION};

    #[test]
    fn test_array_field_fallback_order() {
        let body = json!({"features": null, "suggestions": [1, 2]});
        assert_eq!(array_field(body, &["features", "suggestions"]).len(), 2);
        assert!(array_field(json!([1]), &["features"]).is_empty());
    }

    #[test]
    fn test_every_normalizer_is_total() {
        for provider in Provider::ALL {
            for raw in [json!({}), Value::Null, json!([]), json!("text")] {
                let s = provider.adapter().normalize(raw.clone());
                assert!(!s.place_id.is_empty(), "{provider}: empty place_id");
                assert_eq!(s.display_name, UNKNOWN_LOCATION, "{provider}");
                assert!((0.0..=1.0).contains(&s.importance), "{provider}");
                assert_eq!(s.raw, Some(raw), "{provider}");
            }
        }
    }

    #[test]
    fn test_every_envelope_tolerates_garbage() {
        for provider in Provider::ALL {
            for body in [Value::Null, json!({}), json!("oops"), json!({"results": 5})] {
                assert!(
                    provider.adapter().unwrap_envelope(body).is_empty(),
                    "{provider}"
                );
            }
        }
    }

    #[test]
    fn test_keyed_providers_reject_missing_key() {
        use crate::{ConfigError, ProviderConfig, QueryOptions};

        for provider in Provider::ALL.into_iter().filter(|p| p.requires_api_key()) {
            let err = provider
                .adapter()
                .build_request("Paris", &ProviderConfig::default(), &QueryOptions::new())
                .unwrap_err();
            assert_eq!(err, ConfigError::MissingApiKey { provider });
        }
    }
}
