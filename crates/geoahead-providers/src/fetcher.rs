use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::{
    LocationSuggestion, Provider, ProviderConfig, ProviderRequest, QueryOptions, RawResponse,
    error::Result, request::execute,
};

/// Fetches and normalizes suggestions from one configured provider.
///
/// # Examples
///
/// ```rust,no_run
/// use geoahead_providers::{Provider, ProviderConfig, QueryOptions, create_fetcher};
///
/// # async fn run() -> Result<(), geoahead_providers::ProviderError> {
/// let fetcher = create_fetcher(
///     Provider::OpenStreetMap,
///     ProviderConfig::default(),
///     QueryOptions::new().with("limit", 5),
/// );
/// for suggestion in fetcher.fetch("Berlin").await? {
///     println!("{} ({}, {})", suggestion.display_name, suggestion.lat, suggestion.lon);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ProviderFetcher {
    client: Client,
    provider: Provider,
    config: ProviderConfig,
    options: QueryOptions,
}

/// Build the fetch function for `provider`. Configuration problems surface on fetch.
pub fn create_fetcher(
    provider: Provider,
    config: ProviderConfig,
    options: QueryOptions,
) -> ProviderFetcher {
    ProviderFetcher::new(provider, config, options)
}

impl ProviderFetcher {
    pub fn new(provider: Provider, config: ProviderConfig, options: QueryOptions) -> Self {
        Self {
            client: Client::new(),
            provider,
            config,
            options,
        }
    }

    /// Use a caller supplied HTTP client (proxies, timeouts, connection pools).
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    /// The request that `fetch(query)` would send.
    pub fn build_request(&self, query: &str) -> Result<ProviderRequest> {
        Ok(self
            .provider
            .adapter()
            .build_request(query, &self.config, &self.options)?)
    }

    /// Build and send the request, returning the raw status and body.
    pub async fn execute(&self, query: &str) -> Result<RawResponse> {
        let request = self.build_request(query)?;
        Ok(execute(&self.client, &request).await?)
    }

    /// Suggestions for `query`. Blank queries resolve to nothing without any I/O.
    #[instrument(name = "Fetch suggestions", skip(self), fields(provider = %self.provider), level = "debug")]
    pub async fn fetch(&self, query: &str) -> Result<Vec<LocationSuggestion>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let response = self.execute(query).await.inspect_err(|err| {
            warn!(provider = %self.provider, error = %err, "Error fetching suggestions");
        })?;

        let adapter = self.provider.adapter();
        let suggestions: Vec<_> = adapter
            .unwrap_envelope(response.body)
            .into_iter()
            .map(|item| adapter.normalize(item))
            .collect();
        debug!(count = suggestions.len(), "Normalized provider results");
        Ok(suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProviderError;

    #[tokio::test]
    async fn test_blank_query_short_circuits() {
        // Unroutable base URL: any request would fail.
        let fetcher = create_fetcher(
            Provider::OpenStreetMap,
            ProviderConfig::new().with_base_url("http://127.0.0.1:9/search"),
            QueryOptions::new(),
        );
        assert!(fetcher.fetch("").await.unwrap().is_empty());
        assert!(fetcher.fetch("   \t").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_key_is_config_error() {
        let fetcher = create_fetcher(Provider::Google, ProviderConfig::new(), QueryOptions::new());
        let err = fetcher.fetch("Paris").await.unwrap_err();
        assert!(matches!(err, ProviderError::Config(_)));
    }

    #[test]
    fn test_build_request_uses_stored_options() {
        let fetcher = create_fetcher(
            Provider::Here,
            ProviderConfig::new().with_api_key("k"),
            QueryOptions::new().with("lang", "de"),
        );
        let request = fetcher.build_request("Berlin").unwrap();
        assert_eq!(request.query_param("lang").as_deref(), Some("de"));
        assert_eq!(fetcher.provider(), Provider::Here);
    }
}
