//! Shared data model: the canonical suggestion every provider normalizes into,
//! plus the configuration and free-form options handed to request builders.

use std::{env, fmt};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Label used when a provider item carries no usable name.
pub const UNKNOWN_LOCATION: &str = "Unknown location";

/// Unified location record produced by every provider normalizer.
///
/// Coordinates are kept as strings, exactly as the suggestion list hands them
/// to callers. `importance` is provider-local and must not be compared across
/// providers.
///
/// # Examples
///
/// ```rust
/// use geoahead_providers::LocationSuggestion;
///
/// let suggestion = LocationSuggestion::new("1", "New York, NY, United States");
/// assert_eq!(suggestion.primary_label(), "New York");
/// assert_eq!(suggestion.secondary_label(), "NY, United States");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSuggestion {
    /// Provider identifier, or a content-hash fallback when the provider has none
    pub place_id: String,
    /// Full human readable label
    pub display_name: String,
    /// Latitude in decimal degrees, as text
    pub lat: String,
    /// Longitude in decimal degrees, as text
    pub lon: String,
    /// Provider specific result category (city, street, poi, ...)
    #[serde(rename = "type")]
    pub kind: String,
    /// Relevance in `[0, 1]`, only meaningful within one provider
    pub importance: f64,
    /// The original provider item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,
}

impl LocationSuggestion {
    /// Create a suggestion with neutral defaults for everything but id and label.
    pub fn new(place_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            place_id: place_id.into(),
            display_name: display_name.into(),
            lat: "0".to_string(),
            lon: "0".to_string(),
            kind: "unknown".to_string(),
            importance: 0.5,
            raw: None,
        }
    }

    pub fn with_coordinates(mut self, lat: impl Into<String>, lon: impl Into<String>) -> Self {
        self.lat = lat.into();
        self.lon = lon.into();
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_importance(mut self, importance: f64) -> Self {
        self.importance = importance.clamp(0.0, 1.0);
        self
    }

    pub fn with_raw(mut self, raw: Value) -> Self {
        self.raw = Some(raw);
        self
    }

    /// Text before the first `,` of the display name.
    pub fn primary_label(&self) -> &str {
        self.display_name
            .split(',')
            .next()
            .unwrap_or_default()
            .trim()
    }

    /// Everything after the first `,` of the display name, trimmed.
    pub fn secondary_label(&self) -> &str {
        self.display_name
            .split_once(',')
            .map_or("", |(_, rest)| rest.trim())
    }
}

/// Endpoint and credential overrides for a provider.
///
/// The `Debug` output never contains the API key.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

impl ProviderConfig {
    pub const API_KEY_ENV: &'static str = "GEOAHEAD_API_KEY";
    pub const BASE_URL_ENV: &'static str = "GEOAHEAD_BASE_URL";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Read `GEOAHEAD_API_KEY` and `GEOAHEAD_BASE_URL`; unset or empty variables are ignored.
    pub fn from_env() -> Self {
        let read = |name: &str| env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            api_key: read(Self::API_KEY_ENV),
            base_url: read(Self::BASE_URL_ENV),
        }
    }

    /// The API key, treating an empty string the same as an absent one.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.is_empty())
    }

    pub(crate) fn base_url_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.base_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(default)
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Provider specific named parameters merged into the outgoing request.
///
/// Values are JSON values so that strings, numbers, booleans and the list
/// parameters some providers take (`types`, `lang`, ...) share one bag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryOptions(Map<String, Value>);

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String or number option rendered as text, ignoring empty values.
    pub fn get_text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl From<Map<String, Value>> for QueryOptions {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for QueryOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_labels_split_on_first_comma() {
        let s = LocationSuggestion::new("1", "London, England, United Kingdom");
        assert_eq!(s.primary_label(), "London");
        assert_eq!(s.secondary_label(), "England, United Kingdom");

        let single = LocationSuggestion::new("2", "Atlantis");
        assert_eq!(single.primary_label(), "Atlantis");
        assert_eq!(single.secondary_label(), "");
    }

    #[test]
    fn test_suggestion_serializes_type_field() {
        let s = LocationSuggestion::new("42", "Paris").with_kind("city");
        let value = serde_json::to_value(&s).unwrap();
        assert_eq!(value["type"], "city");
        assert!(value.get("raw").is_none());
    }

    #[test]
    fn test_importance_is_clamped() {
        assert_eq!(LocationSuggestion::new("1", "x").with_importance(3.2).importance, 1.0);
        assert_eq!(LocationSuggestion::new("1", "x").with_importance(-1.0).importance, 0.0);
    }

    #[test]
    fn test_empty_api_key_counts_as_missing() {
        let config = ProviderConfig::new().with_api_key("");
        assert_eq!(config.api_key(), None);
        assert_eq!(ProviderConfig::new().with_api_key("k").api_key(), Some("k"));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ProviderConfig::new().with_api_key("sk-secret");
        let printed = format!("{config:?}");
        assert!(!printed.contains("sk-secret"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_base_url_override() {
        let config = ProviderConfig::new().with_base_url("http://localhost:9000/search");
        assert_eq!(
            config.base_url_or("https://example.com"),
            "http://localhost:9000/search"
        );
        assert_eq!(
            ProviderConfig::new().base_url_or("https://example.com"),
            "https://example.com"
        );
    }

    #[test]
    fn test_query_options_text_access() {
        let options = QueryOptions::new()
            .with("limit", 5)
            .with("format", "json")
            .with("empty", "")
            .with("types", json!(["city"]));
        assert_eq!(options.get_text("limit").as_deref(), Some("5"));
        assert_eq!(options.get_text("format").as_deref(), Some("json"));
        assert_eq!(options.get_text("empty"), None);
        assert_eq!(options.get_text("types"), None);
        assert_eq!(options.len(), 4);
    }
}
