use geoahead_providers::LocationSuggestion;

/// Everything a host needs to render the component.
///
/// `error` and a non-empty `suggestions` list never coexist, and `is_loading`
/// is only true while a dispatched request is unresolved.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ControllerState {
    pub query: String,
    pub suggestions: Vec<LocationSuggestion>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub show_suggestions: bool,
    /// Most recent first
    pub recent: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Outcome {
    Success,
    Error,
}

/// Where the controller is in the keystroke to suggestions cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Phase {
    /// No timer armed and no request in flight
    #[default]
    Idle,
    /// Debounce timer armed, previous suggestions still shown
    Pending,
    /// Request in flight
    Fetching,
    Settled(Outcome),
}

/// Which panel the host should show under the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DisplayMode {
    Hidden,
    RecentSearches,
    Suggestions,
}

impl ControllerState {
    pub(super) fn new(query: String, recent: Vec<String>) -> Self {
        Self {
            query,
            recent,
            ..Self::default()
        }
    }

    /// Recent searches replace the suggestion list while the query is empty.
    pub fn display_mode(&self, show_recent_searches: bool) -> DisplayMode {
        if !self.show_suggestions {
            DisplayMode::Hidden
        } else if self.query.is_empty() && show_recent_searches && !self.recent.is_empty() {
            DisplayMode::RecentSearches
        } else {
            DisplayMode::Suggestions
        }
    }

    pub(super) fn reset_results(&mut self) {
        self.suggestions.clear();
        self.error = None;
        self.is_loading = false;
    }
}
