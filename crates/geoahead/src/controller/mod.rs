//! The debounced query controller.
//!
//! Keystrokes arm a debounce timer; when it fires the controller dispatches
//! exactly one fetch, tagged with a request epoch. Results are applied only
//! while their epoch is still the newest, so a slow answer for an earlier
//! query never overwrites a later one. All shared state sits behind one lock
//! and callbacks always run with the lock released.

mod handle;
mod state;

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use geoahead_providers::LocationSuggestion;
use tokio::{runtime::Handle, task::JoinHandle};
use tracing::{debug, warn};

pub use handle::AutocompleteHandle;
pub use state::{ControllerState, DisplayMode, Outcome, Phase};

use crate::{
    config::AutocompleteConfig,
    error::{GeoaheadError, Result},
    recent,
    source::SuggestionSource,
};

/// Longest accepted query, in characters.
pub const MAX_QUERY_CHARS: usize = 100;

/// The host's text input, driven by `focus`/`blur` and by selection and clear.
pub trait InputControl: Send + Sync {
    fn focus(&self);
    fn blur(&self);
}

type SelectCallback = Arc<dyn Fn(&LocationSuggestion) + Send + Sync>;
type QueryCallback = Arc<dyn Fn(&str) + Send + Sync>;
type RecentCallback = Arc<dyn Fn(&[String]) + Send + Sync>;
type ErrorCallback = Arc<dyn Fn(&GeoaheadError) + Send + Sync>;

#[derive(Clone, Default)]
struct Callbacks {
    on_location_select: Option<SelectCallback>,
    on_query_change: Option<QueryCallback>,
    on_recent_searches_change: Option<RecentCallback>,
    on_error: Option<ErrorCallback>,
}

fn exceeds_limit(text: &str) -> bool {
    text.chars().count() > MAX_QUERY_CHARS
}

/// Collects callbacks and the input control before mounting a controller.
pub struct ControllerBuilder {
    config: AutocompleteConfig,
    callbacks: Callbacks,
    input: Option<Arc<dyn InputControl>>,
}

impl ControllerBuilder {
    fn new(config: AutocompleteConfig) -> Self {
        Self {
            config,
            callbacks: Callbacks::default(),
            input: None,
        }
    }

    /// Called with the full suggestion, `raw` included, when one is picked
    pub fn on_location_select(
        mut self,
        callback: impl Fn(&LocationSuggestion) + Send + Sync + 'static,
    ) -> Self {
        self.callbacks.on_location_select = Some(Arc::new(callback));
        self
    }

    /// Called whenever the visible query text changes
    pub fn on_query_change(mut self, callback: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.callbacks.on_query_change = Some(Arc::new(callback));
        self
    }

    /// Called with the whole list after every recent-search update, for persistence
    pub fn on_recent_searches_change(
        mut self,
        callback: impl Fn(&[String]) + Send + Sync + 'static,
    ) -> Self {
        self.callbacks.on_recent_searches_change = Some(Arc::new(callback));
        self
    }

    /// Called when a fetch fails. Failures are never retried.
    pub fn on_error(mut self, callback: impl Fn(&GeoaheadError) + Send + Sync + 'static) -> Self {
        self.callbacks.on_error = Some(Arc::new(callback));
        self
    }

    pub fn input(mut self, input: Arc<dyn InputControl>) -> Self {
        self.input = Some(input);
        self
    }

    /// Create the controller. Must be called from within a Tokio runtime,
    /// which then runs the debounce timers and fetches.
    pub fn mount(self) -> Result<AutocompleteController> {
        let runtime = Handle::try_current().map_err(|err| GeoaheadError::Other(err.into()))?;
        let config = self.config;

        let recent = recent::normalize(
            config.recent_searches.iter().cloned(),
            config.max_recent_searches,
        );
        let inner = Arc::new(Inner {
            source: config.source(),
            debounce: config.debounce,
            max_recent_searches: config.max_recent_searches,
            show_recent_searches: config.show_recent_searches,
            callbacks: self.callbacks,
            input: self.input,
            runtime,
            shared: Mutex::new(Shared {
                state: ControllerState::new(String::new(), recent),
                ..Shared::default()
            }),
        });
        debug!(source = ?inner.source, debounce = ?config.debounce, "Mounted autocomplete controller");

        Ok(AutocompleteController {
            inner,
            placeholder: config.placeholder,
            attribution: config.attribution,
        })
    }
}

/// Stateful type-ahead search over one suggestion source.
///
/// # Examples
///
/// ```rust,no_run
/// use geoahead::{AutocompleteConfig, AutocompleteController};
///
/// # async fn run() -> geoahead::Result<()> {
/// let controller = AutocompleteController::builder(AutocompleteConfig::default())
///     .on_location_select(|s| println!("picked {} at {},{}", s.display_name, s.lat, s.lon))
///     .mount()?;
///
/// controller.handle_input_change("Berl");
/// tokio::time::sleep(std::time::Duration::from_millis(800)).await;
/// for suggestion in controller.snapshot().suggestions {
///     println!("{}", suggestion.primary_label());
/// }
/// # Ok(())
/// # }
/// ```
pub struct AutocompleteController {
    inner: Arc<Inner>,
    placeholder: String,
    attribution: Option<String>,
}

impl AutocompleteController {
    pub fn builder(config: AutocompleteConfig) -> ControllerBuilder {
        ControllerBuilder::new(config)
    }

    /// Mount without callbacks or input control.
    pub fn mount(config: AutocompleteConfig) -> Result<Self> {
        Self::builder(config).mount()
    }

    /// Text-change event from the input. Returns `false` when the text is
    /// rejected by the length guard, in which case nothing changes.
    pub fn handle_input_change(&self, text: &str) -> bool {
        self.inner.apply_query(text, true)
    }

    /// Focus event from the input: show the panel.
    pub fn handle_focus(&self) {
        self.inner.lock().state.show_suggestions = true;
    }

    pub fn select_suggestion(&self, suggestion: &LocationSuggestion) {
        self.inner.select_suggestion(suggestion);
    }

    /// Pick an entry from the recent-search view. Blank or over-long entries are rejected.
    pub fn select_recent(&self, entry: &str) -> bool {
        self.inner.select_recent(entry)
    }

    pub fn clear(&self) {
        self.inner.clear();
    }

    pub fn focus(&self) {
        self.inner.focus_input();
    }

    pub fn blur(&self) {
        self.inner.blur_input();
    }

    pub fn query(&self) -> String {
        self.inner.lock().state.query.clone()
    }

    /// Programmatic query update, following the same debounce path as typing.
    pub fn set_query(&self, text: &str) -> bool {
        self.inner.apply_query(text, false)
    }

    pub fn snapshot(&self) -> ControllerState {
        self.inner.lock().state.clone()
    }

    pub fn phase(&self) -> Phase {
        self.inner.lock().phase
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.inner
            .lock()
            .state
            .display_mode(self.inner.show_recent_searches)
    }

    pub fn recent_searches(&self) -> Vec<String> {
        self.inner.lock().state.recent.clone()
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn attribution(&self) -> Option<&str> {
        self.attribution.as_deref()
    }

    /// A weak imperative handle; it stops doing anything once the controller is gone.
    pub fn handle(&self) -> AutocompleteHandle {
        AutocompleteHandle::new(Arc::downgrade(&self.inner))
    }

    /// Abandon the pending timer and any in-flight fetch. Later events are ignored.
    pub fn unmount(&self) {
        self.inner.unmount();
    }

    pub fn is_mounted(&self) -> bool {
        !self.inner.lock().unmounted
    }
}

impl Drop for AutocompleteController {
    fn drop(&mut self) {
        self.inner.unmount();
    }
}

struct Inner {
    source: SuggestionSource,
    debounce: Duration,
    max_recent_searches: usize,
    show_recent_searches: bool,
    callbacks: Callbacks,
    input: Option<Arc<dyn InputControl>>,
    runtime: Handle,
    shared: Mutex<Shared>,
}

#[derive(Default)]
struct Shared {
    state: ControllerState,
    phase: Phase,
    /// Bumped on every dispatch and every invalidation
    epoch: u64,
    /// Identifies the currently armed timer
    timer_seq: u64,
    timer: Option<JoinHandle<()>>,
    unmounted: bool,
}

impl Shared {
    fn cancel_timer(&mut self) {
        self.timer_seq += 1;
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    /// Make every in-flight fetch stale.
    fn invalidate(&mut self) {
        self.epoch += 1;
        self.state.is_loading = false;
    }
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn apply_query(self: &Arc<Self>, text: &str, show_panel: bool) -> bool {
        if exceeds_limit(text) {
            debug!(chars = text.chars().count(), "Rejected over-long query");
            return false;
        }
        {
            let mut shared = self.lock();
            if shared.unmounted {
                return false;
            }
            shared.state.query = text.to_string();
            if show_panel {
                shared.state.show_suggestions = true;
            }
            self.schedule(&mut shared, text);
        }
        self.emit_query_change(text);
        true
    }

    /// Cancel the armed timer and arm a new one for `query`, or go idle on blank input.
    fn schedule(self: &Arc<Self>, shared: &mut Shared, query: &str) {
        shared.cancel_timer();
        if query.trim().is_empty() {
            shared.invalidate();
            shared.state.reset_results();
            shared.phase = Phase::Idle;
            return;
        }

        let seq = shared.timer_seq;
        let weak = Arc::downgrade(self);
        let debounce = self.debounce;
        let query = query.to_string();
        shared.timer = Some(self.runtime.spawn(async move {
            tokio::time::sleep(debounce).await;
            if let Some(inner) = weak.upgrade() {
                inner.dispatch(seq, query);
            }
        }));
        shared.phase = Phase::Pending;
    }

    fn dispatch(self: Arc<Self>, seq: u64, query: String) {
        let epoch = {
            let mut shared = self.lock();
            if shared.unmounted || shared.timer_seq != seq {
                return;
            }
            shared.timer = None;
            shared.epoch += 1;
            shared.state.suggestions.clear();
            shared.state.error = None;
            shared.state.is_loading = true;
            shared.phase = Phase::Fetching;
            shared.epoch
        };
        debug!(epoch, query = %query, "Dispatching fetch");

        let pending = self.source.fetch(query);
        let weak = Arc::downgrade(&self);
        self.runtime.spawn(async move {
            let result = pending.await;
            if let Some(inner) = weak.upgrade() {
                inner.settle(epoch, result);
            }
        });
    }

    fn settle(&self, epoch: u64, result: Result<Vec<LocationSuggestion>>) {
        let failure = {
            let mut shared = self.lock();
            if shared.unmounted || shared.epoch != epoch {
                debug!(epoch, current = shared.epoch, "Discarding stale response");
                return;
            }

            shared.state.is_loading = false;
            let (outcome, failure) = match result {
                Ok(suggestions) => {
                    debug!(epoch, count = suggestions.len(), "Applying suggestions");
                    shared.state.suggestions = suggestions;
                    shared.state.error = None;
                    (Outcome::Success, None)
                }
                Err(err) => {
                    warn!(epoch, error = %err, "Suggestion fetch failed");
                    shared.state.suggestions.clear();
                    shared.state.error = Some(err.to_string());
                    (Outcome::Error, Some(err))
                }
            };
            // a newer keystroke may already have armed a timer
            if shared.phase == Phase::Fetching {
                shared.phase = Phase::Settled(outcome);
            }
            failure
        };

        if let (Some(err), Some(on_error)) = (failure, &self.callbacks.on_error) {
            on_error(&err);
        }
    }

    fn select_suggestion(self: &Arc<Self>, suggestion: &LocationSuggestion) {
        let label = suggestion.primary_label().to_string();
        let recent = {
            let mut shared = self.lock();
            if shared.unmounted {
                return;
            }
            shared.invalidate();
            shared.state.query = label.clone();
            shared.state.show_suggestions = false;
            let recent = self.remember(&mut shared, &label);
            // the new query text goes through the debounce like any other edit
            self.schedule(&mut shared, &label);
            recent
        };

        if let Some(list) = recent {
            self.emit_recent_change(&list);
        }
        if let Some(on_select) = &self.callbacks.on_location_select {
            on_select(suggestion);
        }
        self.emit_query_change(&label);
        self.blur_input();
    }

    fn select_recent(self: &Arc<Self>, entry: &str) -> bool {
        if entry.trim().is_empty() || exceeds_limit(entry) {
            return false;
        }
        let recent = {
            let mut shared = self.lock();
            if shared.unmounted {
                return false;
            }
            shared.state.query = entry.to_string();
            shared.state.show_suggestions = false;
            let recent = self.remember(&mut shared, entry);
            self.schedule(&mut shared, entry);
            recent
        };

        if let Some(list) = recent {
            self.emit_recent_change(&list);
        }
        self.emit_query_change(entry);
        self.blur_input();
        true
    }

    fn clear(&self) {
        {
            let mut shared = self.lock();
            if shared.unmounted {
                return;
            }
            shared.cancel_timer();
            shared.invalidate();
            shared.state.query.clear();
            shared.state.reset_results();
            shared.state.show_suggestions = false;
            shared.phase = Phase::Idle;
        }
        self.emit_query_change("");
        self.focus_input();
    }

    fn unmount(&self) {
        let mut shared = self.lock();
        if shared.unmounted {
            return;
        }
        shared.unmounted = true;
        shared.cancel_timer();
        shared.invalidate();
        shared.phase = Phase::Idle;
        debug!("Unmounted autocomplete controller");
    }

    /// Record `label` in the recent list, returning the new list for notification.
    fn remember(&self, shared: &mut Shared, label: &str) -> Option<Vec<String>> {
        if !self.show_recent_searches || label.is_empty() {
            return None;
        }
        shared.state.recent =
            recent::record(&shared.state.recent, label, self.max_recent_searches);
        Some(shared.state.recent.clone())
    }

    fn emit_query_change(&self, query: &str) {
        if let Some(on_query_change) = &self.callbacks.on_query_change {
            on_query_change(query);
        }
    }

    fn emit_recent_change(&self, recent: &[String]) {
        if let Some(on_change) = &self.callbacks.on_recent_searches_change {
            on_change(recent);
        }
    }

    fn focus_input(&self) {
        if let Some(input) = &self.input {
            input.focus();
        }
    }

    fn blur_input(&self) {
        if let Some(input) = &self.input {
            input.blur();
        }
    }
}
