use thiserror::Error;

use crate::Provider;

pub type Result<T> = std::result::Result<T, ProviderError>;

/// Problems with the provider configuration, detected before any request is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{} requires an API key in ProviderConfig::api_key", .provider.label())]
    MissingApiKey { provider: Provider },
    #[error("Unsupported provider: {0}")]
    UnknownProvider(String),
}

/// Failures of the HTTP round trip itself.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error! status: {status}")]
    Status { provider: Provider, status: u16 },
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Could not decode provider response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// The HTTP status carried by the error, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            Self::Decode(_) => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl ProviderError {
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_message_names_provider() {
        let err = ConfigError::MissingApiKey {
            provider: Provider::Here,
        };
        assert_eq!(
            err.to_string(),
            "HERE requires an API key in ProviderConfig::api_key"
        );
    }

    #[test]
    fn test_status_error_message() {
        let err = FetchError::Status {
            provider: Provider::Mapbox,
            status: 503,
        };
        assert_eq!(err.to_string(), "HTTP error! status: 503");
        assert_eq!(err.status(), Some(503));

        let wrapped: ProviderError = err.into();
        assert!(wrapped.is_fetch());
        assert_eq!(wrapped.to_string(), "HTTP error! status: 503");
    }
}
