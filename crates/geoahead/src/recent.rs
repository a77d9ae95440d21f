//! Bounded, most-recent-first memory of past selections.

/// Default bound on the number of remembered searches.
pub const DEFAULT_MAX_RECENT_SEARCHES: usize = 5;

/// Insert `label` at the front of `list`, dropping any exact duplicate first,
/// then keep at most `max` entries.
pub fn record(list: &[String], label: &str, max: usize) -> Vec<String> {
    std::iter::once(label.to_string())
        .chain(list.iter().filter(|entry| *entry != label).cloned())
        .take(max)
        .collect()
}

/// Dedupe (first occurrence wins) and truncate a caller supplied list.
pub fn normalize(list: impl IntoIterator<Item = String>, max: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for entry in list {
        if out.len() == max {
            break;
        }
        if !out.contains(&entry) {
            out.push(entry);
        }
    }
    out
}

/// The in-session list of recent searches. Persistence belongs to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentSearches {
    entries: Vec<String>,
    max: usize,
}

impl Default for RecentSearches {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RECENT_SEARCHES)
    }
}

impl RecentSearches {
    pub fn new(max: usize) -> Self {
        Self {
            entries: Vec::new(),
            max,
        }
    }

    pub fn with_entries(entries: impl IntoIterator<Item = String>, max: usize) -> Self {
        Self {
            entries: normalize(entries, max),
            max,
        }
    }

    /// Move `label` to the front. Returns the resulting list.
    pub fn record(&mut self, label: &str) -> &[String] {
        self.entries = record(&self.entries, label, self.max);
        &self.entries
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
