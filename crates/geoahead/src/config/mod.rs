use std::time::Duration;

use geoahead_providers::{Provider, ProviderConfig, QueryOptions};

use crate::{
    error::GeoaheadError,
    recent::{self, DEFAULT_MAX_RECENT_SEARCHES},
    source::SuggestionSource,
};

pub const DEFAULT_PLACEHOLDER: &str = "Search for a location...";
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Configuration surface of an autocomplete component.
///
/// Presentation concerns (styles, themes) are left to the host; `attribution`
/// is carried as plain text for the host to render below the suggestion list.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AutocompleteConfig {
    pub placeholder: String,
    pub provider: Provider,
    pub provider_config: ProviderConfig,
    pub query_options: QueryOptions,
    /// Replaces the provider built fetch function entirely when set
    #[cfg_attr(feature = "serde", serde(skip))]
    pub fetch_suggestions: Option<SuggestionSource>,
    pub debounce: Duration,
    pub max_recent_searches: usize,
    pub recent_searches: Vec<String>,
    pub show_recent_searches: bool,
    pub attribution: Option<String>,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            provider: Provider::default(),
            provider_config: ProviderConfig::default(),
            query_options: QueryOptions::default(),
            fetch_suggestions: None,
            debounce: DEFAULT_DEBOUNCE,
            max_recent_searches: DEFAULT_MAX_RECENT_SEARCHES,
            recent_searches: Vec::new(),
            show_recent_searches: true,
            attribution: None,
        }
    }
}

impl AutocompleteConfig {
    pub fn builder() -> AutocompleteConfigBuilder {
        AutocompleteConfigBuilder::new()
    }

    /// The fetch function this configuration resolves to.
    pub fn source(&self) -> SuggestionSource {
        SuggestionSource::from_config(self)
    }
}

/// Builder for creating autocomplete configurations with ergonomic defaults
#[derive(Debug, Clone, Default)]
pub struct AutocompleteConfigBuilder {
    config: AutocompleteConfig,
}

impl AutocompleteConfigBuilder {
    /// Create a new builder with the component defaults (OpenStreetMap, 300 ms debounce)
    pub fn new() -> Self {
        Self {
            config: AutocompleteConfig::default(),
        }
    }

    /// Create a builder for fast local backends: short debounce window
    pub fn responsive() -> Self {
        let mut builder = Self::new();
        builder.config.debounce = Duration::from_millis(150);
        builder
    }

    /// Create a builder for metered or rate limited backends: long debounce window
    pub fn patient() -> Self {
        let mut builder = Self::new();
        builder.config.debounce = Duration::from_millis(600);
        builder
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.config.placeholder = placeholder.into();
        self
    }

    /// Select the geocoding backend
    pub fn provider(mut self, provider: Provider) -> Self {
        self.config.provider = provider;
        self
    }

    /// Set the API key and endpoint override for the provider
    pub fn provider_config(mut self, provider_config: ProviderConfig) -> Self {
        self.config.provider_config = provider_config;
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.provider_config.api_key = Some(api_key.into());
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.provider_config.base_url = Some(base_url.into());
        self
    }

    /// Provider specific parameters merged into every request
    pub fn query_options(mut self, query_options: QueryOptions) -> Self {
        self.config.query_options = query_options;
        self
    }

    /// Use a caller supplied fetch function instead of the provider
    pub fn fetch_suggestions(mut self, source: SuggestionSource) -> Self {
        self.config.fetch_suggestions = Some(source);
        self
    }

    /// Set the delay between the last keystroke and the request
    pub fn debounce(mut self, debounce: Duration) -> Self {
        self.config.debounce = debounce;
        self
    }

    pub fn debounce_ms(self, millis: u64) -> Self {
        self.debounce(Duration::from_millis(millis))
    }

    pub fn max_recent_searches(mut self, max: usize) -> Self {
        self.config.max_recent_searches = max;
        self
    }

    /// Initial recent searches, most recent first
    pub fn recent_searches<I, S>(mut self, recent: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.recent_searches = recent.into_iter().map(Into::into).collect();
        self
    }

    pub fn show_recent_searches(mut self, enabled: bool) -> Self {
        self.config.show_recent_searches = enabled;
        self
    }

    pub fn attribution(mut self, attribution: impl Into<String>) -> Self {
        self.config.attribution = Some(attribution.into());
        self
    }

    /// Build the final configuration. The initial recent list is deduplicated
    /// and truncated to `max_recent_searches`.
    pub fn build(mut self) -> AutocompleteConfig {
        self.config.recent_searches = recent::normalize(
            std::mem::take(&mut self.config.recent_searches),
            self.config.max_recent_searches,
        );
        self.config
    }

    /// Like [`build`](Self::build), rejecting settings that can never work.
    pub fn try_build(self) -> Result<AutocompleteConfig, GeoaheadError> {
        if self.config.show_recent_searches && self.config.max_recent_searches == 0 {
            return Err(GeoaheadError::ConfigError(
                "max_recent_searches must be at least 1 when recent searches are shown".to_string(),
            ));
        }
        Ok(self.build())
    }
}
