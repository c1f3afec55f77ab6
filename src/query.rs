//! The query engine: a linear, case-insensitive substring scan over the section snapshot.
//!
//! Matches keep document order and are cut off at a small limit. Each match carries one snippet
//! taken around the first occurrence of the query. The scan reruns against a fresh snapshot for
//! every query.

use crate::config::Config;
use crate::section::Section;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq)]
/// User input prepared for matching.
pub struct Query {
    raw: String,
    normalized: String,
}

impl Query {
    #[must_use]
    /// Trim the input and derive its lowercase form.
    pub fn new(input: &str) -> Self {
        let raw = input.trim().to_string();
        let normalized = raw.to_lowercase();
        Self { raw, normalized }
    }

    #[must_use]
    /// Trimmed input as typed, used for highlighting.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    /// Trimmed, lowercased input, used for matching.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    #[must_use]
    /// Whether the query is long enough to be run at all.
    pub fn is_searchable(&self, min_len: usize) -> bool {
        self.normalized.chars().count() >= min_len
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// One matching section with a preview of the match.
pub struct SearchResult {
    /// Id of the matching section.
    pub section_id: String,
    /// Cleaned section title.
    pub title: String,
    /// Trimmed excerpt around the first match.
    pub snippet: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Bounds applied to every search.
pub struct SearchLimits {
    /// Shortest query that is run.
    pub min_query_len: usize,
    /// Most results returned.
    pub max_results: usize,
    /// Characters of context either side of a match.
    pub snippet_radius: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            min_query_len: 2,
            max_results: 5,
            snippet_radius: 50,
        }
    }
}

impl From<&Config> for SearchLimits {
    fn from(config: &Config) -> Self {
        Self {
            min_query_len: config.min_query_len,
            max_results: config.max_results,
            snippet_radius: config.snippet_radius,
        }
    }
}

#[must_use]
/// Sections containing `query`, in document order, at most `limits.max_results` of them.
///
/// Queries shorter than `limits.min_query_len` return nothing.
pub fn search(query: &Query, sections: &[Section], limits: &SearchLimits) -> Vec<SearchResult> {
    if !query.is_searchable(limits.min_query_len) {
        return Vec::new();
    }
    sections
        .iter()
        .filter(|section| section.body_text.to_lowercase().contains(query.normalized()))
        .take(limits.max_results)
        .map(|section| SearchResult {
            section_id: section.id.clone(),
            title: section.title.clone(),
            snippet: extract_snippet(&section.body_text, query.raw(), limits.snippet_radius),
        })
        .collect()
}

#[must_use]
/// Excerpt of `text` spanning `radius` characters either side of the first match of `query`.
///
/// The window is clamped to the text and trimmed. No match yields an empty snippet.
pub fn extract_snippet(text: &str, query: &str, radius: usize) -> String {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return String::new();
    }

    let chars: Vec<char> = text.chars().collect();
    // Matches `search`, which lowercases whole strings. Context-sensitive mappings such as
    // final sigma still yield one char per char, so the per-char expansion counts line up.
    let lowered = text.to_lowercase();
    let origin: Vec<usize> = chars
        .iter()
        .enumerate()
        .flat_map(|(i, c)| std::iter::repeat_n(i, c.to_lowercase().count()))
        .collect();

    let Some(byte_index) = lowered.find(&needle) else {
        return String::new();
    };
    let index = origin[lowered[..byte_index].chars().count()];
    let start = index.saturating_sub(radius);
    let end = (index + query.chars().count() + radius).min(chars.len());

    chars[start..end].iter().collect::<String>().trim().to_string()
}

#[cfg(test)]
#[path = "tests/query.rs"]
mod tests;
