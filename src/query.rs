// Search query normalization and matching

use crate::entry::Entry;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Search text entered by the user
///
/// The raw text is kept for display. Matching uses the normalized form, which
/// is computed once when the query is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    raw: String,
    normalized: String,
}

impl Query {
    pub fn new(text: &str) -> Self {
        Self {
            raw: text.to_string(),
            normalized: normalize(text),
        }
    }

    /// The text exactly as it was entered
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// An empty query disables filtering. Whitespace-only text still filters.
    pub fn is_active(&self) -> bool {
        !self.raw.is_empty()
    }

    /// Check whether `text` is shown under this query
    pub fn matches(&self, text: &str) -> bool {
        if !self.is_active() {
            return true;
        }
        normalize(text).contains(&self.normalized)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Two or more consecutive whitespace characters
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("Invalid whitespace run pattern"));

/// Lowercase `text` and collapse every run of two or more whitespace
/// characters into a single space
///
/// A lone whitespace character is kept as it is. Lowercasing covers the whole
/// string at once so context-dependent mappings (final sigma) apply.
pub fn normalize(text: &str) -> String {
    WHITESPACE_RUN.replace_all(&text.to_lowercase(), " ").into_owned()
}

/// Positions in `entries` of the entries visible under `query`, in list order
///
/// This is the single definition of the visible list: with no active query
/// every position is returned.
pub fn visible_positions(entries: &[Entry], query: &Query) -> Vec<usize> {
    if !query.is_active() {
        return (0..entries.len()).collect();
    }

    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| query.matches(entry.as_str()))
        .map(|(i, _)| i)
        .collect()
}
