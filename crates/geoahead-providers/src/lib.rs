//! Geocoding provider adapters for geoahead.
//!
//! This crate turns a partial query into a provider request, executes it and
//! normalizes whatever the provider returns into a single
//! [`LocationSuggestion`] shape.
//!
//! ```rust
//! use geoahead_providers::{Provider, ProviderConfig, QueryOptions};
//!
//! let adapter = Provider::Mapbox.adapter();
//! let request = adapter.build_request(
//!     "Berlin",
//!     &ProviderConfig::new().with_api_key("pk.test"),
//!     &QueryOptions::new().with("language", "de"),
//! )?;
//! assert!(request.url.contains("/Berlin.json?"));
//! # Ok::<(), geoahead_providers::ConfigError>(())
//! ```
//!
//! # Providers
//!
//! | identifier      | API key | envelope                 |
//! |-----------------|---------|--------------------------|
//! | `openstreetmap` | no      | bare array               |
//! | `mapbox`        | yes     | `features`               |
//! | `google`        | yes     | `predictions`            |
//! | `geoapify`      | yes     | `features`               |
//! | `locationiq`    | yes     | bare array               |
//! | `here`          | yes     | `items`                  |
//! | `tomtom`        | yes     | `results`                |
//! | `opencage`      | yes     | `results`                |

pub mod adapters;
mod error;
mod fetcher;
mod model;
pub mod normalize;
mod provider;
mod request;

pub use error::{ConfigError, FetchError, ProviderError, Result};
pub use fetcher::{ProviderFetcher, create_fetcher};
pub use model::{LocationSuggestion, ProviderConfig, QueryOptions, UNKNOWN_LOCATION};
pub use provider::{Provider, ProviderAdapter};
pub use request::{HttpMethod, ProviderRequest, QueryParams, RawResponse, execute};
