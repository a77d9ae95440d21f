use std::sync::Weak;

use super::Inner;

/// Imperative control surface bound to a mounted controller.
///
/// Holds only a weak reference: once the controller is dropped every call is
/// a no-op and [`get_query`](Self::get_query) returns an empty string.
#[derive(Clone)]
pub struct AutocompleteHandle {
    inner: Weak<Inner>,
}

impl AutocompleteHandle {
    pub(super) fn new(inner: Weak<Inner>) -> Self {
        Self { inner }
    }

    /// Same as the clear button: empty query, results and panel, then refocus.
    pub fn clear(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.clear();
        }
    }

    pub fn focus(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.focus_input();
        }
    }

    pub fn blur(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.blur_input();
        }
    }

    pub fn get_query(&self) -> String {
        self.inner
            .upgrade()
            .map(|inner| inner.lock().state.query.clone())
            .unwrap_or_default()
    }

    /// Apply the length guard, set the query and notify, then debounce as if typed.
    pub fn set_query(&self, text: &str) -> bool {
        self.inner
            .upgrade()
            .is_some_and(|inner| inner.apply_query(text, false))
    }

    pub fn is_attached(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

impl std::fmt::Debug for AutocompleteHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutocompleteHandle")
            .field("attached", &self.is_attached())
            .finish()
    }
}
