//! Geoahead - Type-ahead Location Search
//!
//! Geoahead turns partial user text into location suggestions. It queries one
//! of eight geocoding backends (or your own async function), normalizes every
//! answer into a single [`LocationSuggestion`] shape and drives the suggestion
//! list of a search box: debouncing, stale-response suppression, recent
//! searches and an imperative control surface.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use geoahead::{AutocompleteConfig, AutocompleteController, providers::Provider};
//!
//! # async fn run() -> geoahead::Result<()> {
//! let config = AutocompleteConfig::builder()
//!     .provider(Provider::OpenStreetMap)
//!     .debounce_ms(250)
//!     .build();
//!
//! let controller = AutocompleteController::builder(config)
//!     .on_location_select(|s| println!("{} ({}, {})", s.display_name, s.lat, s.lon))
//!     .on_error(|err| eprintln!("search failed: {err}"))
//!     .mount()?;
//!
//! // Only the last keystroke inside the debounce window reaches the provider
//! controller.handle_input_change("Ber");
//! controller.handle_input_change("Berlin");
//! tokio::time::sleep(Duration::from_secs(1)).await;
//!
//! if let Some(first) = controller.snapshot().suggestions.first() {
//!     controller.select_suggestion(first);
//! }
//! println!("query is now {}", controller.query());
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Eight providers**: OpenStreetMap (no key), Mapbox, Google, Geoapify,
//!   LocationIQ, HERE, TomTom and OpenCage, plus custom fetch functions
//! - **One result shape**: every provider item normalizes into a
//!   [`LocationSuggestion`], with fallbacks for missing fields
//! - **Race free**: a slow response for an older query never replaces newer results
//! - **Recent searches**: bounded, deduplicated, most recent first
//!
//! The `serde` feature derives `Serialize` for the configuration and the
//! controller snapshot.
use once_cell::sync::OnceCell;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

mod config;
mod controller;
pub mod error;
pub mod recent;
mod source;

pub use config::{
    AutocompleteConfig, AutocompleteConfigBuilder, DEFAULT_DEBOUNCE, DEFAULT_PLACEHOLDER,
};
pub use controller::{
    AutocompleteController, AutocompleteHandle, ControllerBuilder, ControllerState, DisplayMode,
    InputControl, MAX_QUERY_CHARS, Outcome, Phase,
};
pub use error::{GeoaheadError, Result};
pub use geoahead_providers as providers;
pub use geoahead_providers::{LocationSuggestion, Provider, ProviderConfig, QueryOptions};
pub use recent::RecentSearches;
pub use source::SuggestionSource;

static LOGGER_INIT: OnceCell<()> = OnceCell::new();

/// Initialize logging for the Geoahead library.
///
/// Installs a `tracing` subscriber with the given minimum level; `RUST_LOG`
/// overrides it when set. HTTP client internals are kept at `warn`. Calling
/// it again is a no-op.
///
/// # Examples
///
/// ```rust
/// use geoahead::init_logging;
/// use tracing::Level;
///
/// init_logging(Level::INFO)?;
/// # Ok::<(), geoahead::GeoaheadError>(())
/// ```
pub fn init_logging(level: impl Into<LevelFilter>) -> Result<&'static ()> {
    LOGGER_INIT.get_or_try_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level.into().to_string()))?
            .add_directive("hyper_util=warn".parse()?)
            .add_directive("reqwest=warn".parse()?);

        tracing_subscriber::fmt::fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .try_init()
            .map_err(|err| anyhow::anyhow!(err))?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_is_idempotent() {
        assert!(init_logging(tracing::Level::WARN).is_ok());
        assert!(init_logging(tracing::Level::DEBUG).is_ok());
    }

    #[test]
    fn test_providers_reexport() {
        let provider: providers::Provider = "tomtom".parse().unwrap();
        assert_eq!(provider, Provider::TomTom);
        assert!(provider.requires_api_key());
    }
}
