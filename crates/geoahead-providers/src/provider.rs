use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    ConfigError, LocationSuggestion, ProviderConfig, ProviderRequest, QueryOptions, adapters,
};

/// The supported geocoding backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Nominatim, the only provider usable without an API key
    #[default]
    OpenStreetMap,
    Mapbox,
    Google,
    Geoapify,
    LocationIq,
    Here,
    TomTom,
    OpenCage,
}

impl Provider {
    pub const ALL: [Self; 8] = [
        Self::OpenStreetMap,
        Self::Mapbox,
        Self::Google,
        Self::Geoapify,
        Self::LocationIq,
        Self::Here,
        Self::TomTom,
        Self::OpenCage,
    ];

    /// Stable identifier, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenStreetMap => "openstreetmap",
            Self::Mapbox => "mapbox",
            Self::Google => "google",
            Self::Geoapify => "geoapify",
            Self::LocationIq => "locationiq",
            Self::Here => "here",
            Self::TomTom => "tomtom",
            Self::OpenCage => "opencage",
        }
    }

    /// Human readable name, used in error messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::OpenStreetMap => "OpenStreetMap",
            Self::Mapbox => "Mapbox",
            Self::Google => "Google",
            Self::Geoapify => "Geoapify",
            Self::LocationIq => "LocationIQ",
            Self::Here => "HERE",
            Self::TomTom => "TomTom",
            Self::OpenCage => "OpenCage",
        }
    }

    pub fn requires_api_key(self) -> bool {
        !matches!(self, Self::OpenStreetMap)
    }

    /// The adapter implementing this provider's request and response handling.
    pub fn adapter(self) -> &'static dyn ProviderAdapter {
        match self {
            Self::OpenStreetMap => &adapters::OpenStreetMap,
            Self::Mapbox => &adapters::Mapbox,
            Self::Google => &adapters::Google,
            Self::Geoapify => &adapters::Geoapify,
            Self::LocationIq => &adapters::LocationIq,
            Self::Here => &adapters::Here,
            Self::TomTom => &adapters::TomTom,
            Self::OpenCage => &adapters::OpenCage,
        }
    }

    /// The configured API key, or [`ConfigError::MissingApiKey`].
    pub fn require_api_key(self, config: &ProviderConfig) -> Result<&str, ConfigError> {
        config
            .api_key()
            .ok_or(ConfigError::MissingApiKey { provider: self })
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConfigError::UnknownProvider(s.to_string()))
    }
}

/// Request construction, envelope unwrapping and normalization for one provider.
pub trait ProviderAdapter: Send + Sync {
    fn provider(&self) -> Provider;

    /// Default endpoint used when [`ProviderConfig::base_url`] is not set.
    fn default_base_url(&self) -> &'static str;

    /// Build the request for `query`. Fails before any I/O when a required key is missing.
    fn build_request(
        &self,
        query: &str,
        config: &ProviderConfig,
        options: &QueryOptions,
    ) -> Result<ProviderRequest, ConfigError>;

    /// Extract the raw item list from a parsed body. Unknown shapes yield no items.
    fn unwrap_envelope(&self, body: Value) -> Vec<Value>;

    /// Map one raw item to the canonical shape. Total: never fails.
    fn normalize(&self, raw: Value) -> LocationSuggestion;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers_roundtrip() {
        for provider in Provider::ALL {
            assert_eq!(provider.as_str().parse::<Provider>(), Ok(provider));
            assert_eq!(provider.adapter().provider(), provider);
        }
        assert_eq!("LocationIQ".parse::<Provider>(), Ok(Provider::LocationIq));
    }

    #[test]
    fn test_unknown_identifier() {
        assert_eq!(
            "bing".parse::<Provider>(),
            Err(ConfigError::UnknownProvider("bing".to_string()))
        );
    }

    #[test]
    fn test_only_openstreetmap_is_keyless() {
        let keyless: Vec<_> = Provider::ALL
            .into_iter()
            .filter(|p| !p.requires_api_key())
            .collect();
        assert_eq!(keyless, vec![Provider::OpenStreetMap]);
        assert_eq!(Provider::default(), Provider::OpenStreetMap);
    }

    #[test]
    fn test_serde_uses_identifiers() {
        assert_eq!(
            serde_json::to_value(Provider::LocationIq).unwrap(),
            serde_json::json!("locationiq")
        );
        assert_eq!(
            serde_json::from_value::<Provider>(serde_json::json!("tomtom")).unwrap(),
            Provider::TomTom
        );
    }
}
