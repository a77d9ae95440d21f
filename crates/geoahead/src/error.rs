use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeoaheadError {
    #[error(transparent)]
    Provider(#[from] geoahead_providers::ProviderError),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Init Logging error: {0}")]
    InitLoggingError(#[from] tracing_subscriber::filter::ParseError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<geoahead_providers::ConfigError> for GeoaheadError {
    fn from(err: geoahead_providers::ConfigError) -> Self {
        Self::Provider(err.into())
    }
}

impl From<geoahead_providers::FetchError> for GeoaheadError {
    fn from(err: geoahead_providers::FetchError) -> Self {
        Self::Provider(err.into())
    }
}

pub type Result<T> = std::result::Result<T, GeoaheadError>;
