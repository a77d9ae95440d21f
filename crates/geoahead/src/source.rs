use std::{fmt, future::Future, sync::Arc};

use futures::{FutureExt, future::BoxFuture};
use geoahead_providers::{LocationSuggestion, Provider, ProviderFetcher, create_fetcher};
use tracing::{Instrument, debug_span};

use crate::{config::AutocompleteConfig, error::Result};

type CustomFetch =
    dyn Fn(String) -> BoxFuture<'static, anyhow::Result<Vec<LocationSuggestion>>> + Send + Sync;

/// Where suggestions come from: a built in provider, or a caller supplied
/// async function that bypasses the provider registry entirely.
#[derive(Clone)]
pub enum SuggestionSource {
    Provider(Arc<ProviderFetcher>),
    Custom(Arc<CustomFetch>),
}

impl SuggestionSource {
    /// Wrap an async function. Its results are used as-is, without validation.
    ///
    /// ```rust
    /// use geoahead::{SuggestionSource, providers::LocationSuggestion};
    ///
    /// let source = SuggestionSource::custom(|query: String| async move {
    ///     Ok(vec![LocationSuggestion::new("home", format!("{query}, Home Town"))])
    /// });
    /// assert!(source.is_custom());
    /// ```
    pub fn custom<F, Fut>(fetch: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Vec<LocationSuggestion>>> + Send + 'static,
    {
        Self::Custom(Arc::new(move |query| fetch(query).boxed()))
    }

    pub fn provider(fetcher: ProviderFetcher) -> Self {
        Self::Provider(Arc::new(fetcher))
    }

    /// The custom function when one is configured, otherwise the provider fetcher.
    pub fn from_config(config: &AutocompleteConfig) -> Self {
        match &config.fetch_suggestions {
            Some(source) => source.clone(),
            None => Self::provider(create_fetcher(
                config.provider,
                config.provider_config.clone(),
                config.query_options.clone(),
            )),
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }

    /// The backing provider, `None` for custom functions.
    pub fn provider_kind(&self) -> Option<Provider> {
        match self {
            Self::Provider(fetcher) => Some(fetcher.provider()),
            Self::Custom(_) => None,
        }
    }

    /// Start fetching suggestions for `query`. The returned future owns
    /// everything it needs and can outlive the source.
    pub fn fetch(&self, query: String) -> BoxFuture<'static, Result<Vec<LocationSuggestion>>> {
        let span = debug_span!("Suggestion fetch", query = %query, custom = self.is_custom());
        match self {
            Self::Provider(fetcher) => {
                let fetcher = Arc::clone(fetcher);
                async move { Ok(fetcher.fetch(&query).await?) }
                    .instrument(span)
                    .boxed()
            }
            Self::Custom(fetch) => {
                let pending = fetch(query);
                async move { Ok(pending.await?) }.instrument(span).boxed()
            }
        }
    }
}

impl fmt::Debug for SuggestionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Provider(fetcher) => f.debug_tuple("Provider").field(fetcher).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use geoahead_providers::{ProviderConfig, QueryOptions};

    use super::*;
    use crate::error::GeoaheadError;

    #[tokio::test]
    async fn test_custom_source_passes_query_through() {
        let source = SuggestionSource::custom(|query: String| async move {
            Ok(vec![LocationSuggestion::new("1", format!("{query}, Somewhere"))])
        });
        let results = source.fetch("Springfield".to_string()).await.unwrap();
        assert_eq!(results[0].display_name, "Springfield, Somewhere");
        assert_eq!(source.provider_kind(), None);
    }

    #[tokio::test]
    async fn test_fetch_runs_inside_its_span() {
        let _guard = tracing::subscriber::set_default(tracing_subscriber::registry());
        let source = SuggestionSource::custom(|_query| async {
            let name = tracing::Span::current().metadata().map(|m| m.name());
            Ok(vec![LocationSuggestion::new("1", name.unwrap_or_default())])
        });

        let pending = source.fetch("Springfield".to_string());
        let results = pending.await.unwrap();
        assert_eq!(results[0].display_name, "Suggestion fetch");
    }

    #[tokio::test]
    async fn test_custom_errors_become_other() {
        let source =
            SuggestionSource::custom(|_query| async { Err(anyhow::anyhow!("backend offline")) });
        let err = source.fetch("x".to_string()).await.unwrap_err();
        assert!(matches!(err, GeoaheadError::Other(_)));
        assert_eq!(err.to_string(), "backend offline");
    }

    #[tokio::test]
    async fn test_provider_source_reports_missing_key() {
        let source = SuggestionSource::provider(create_fetcher(
            Provider::OpenCage,
            ProviderConfig::new(),
            QueryOptions::new(),
        ));
        let err = source.fetch("Cologne".to_string()).await.unwrap_err();
        assert!(matches!(err, GeoaheadError::Provider(ref e) if e.is_config()));
        assert_eq!(source.provider_kind(), Some(Provider::OpenCage));
        assert!(format!("{source:?}").starts_with("Provider("));
    }
}
