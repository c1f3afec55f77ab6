//! The result renderer: turns search results into the entries shown under the search box.
//!
//! Every case-insensitive occurrence of the query inside a snippet becomes a highlighted
//! fragment. The query is escaped before it is compiled, so input such as `a.b(` matches
//! literally instead of being read as a pattern.

use crate::query::SearchResult;
use regex::{Regex, RegexBuilder};

/// Text shown when a query matched nothing.
pub const NO_RESULTS: &str = "No results found";

#[derive(Clone, Debug, PartialEq, Eq)]
/// A run of snippet text, highlighted when it matches the query.
pub struct Fragment {
    /// Text of the run.
    pub text: String,
    /// Whether the run is a query match.
    pub highlighted: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// One selectable entry in the result list.
pub struct ResultEntry {
    /// Section to navigate to when the entry is activated.
    pub section_id: String,
    /// Section title.
    pub title: String,
    /// Snippet split into plain and highlighted fragments.
    pub snippet: Vec<Fragment>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// What the result panel currently shows.
pub enum ResultList {
    /// Panel hidden: no query yet, query too short, or dismissed.
    #[default]
    Hidden,
    /// A single non-interactive placeholder.
    NoResults,
    /// Selectable entries in document order.
    Entries(Vec<ResultEntry>),
}

impl ResultList {
    #[must_use]
    /// Whether the panel is displayed.
    pub const fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }

    #[must_use]
    /// Selectable entries; empty for the hidden and placeholder states.
    pub fn entries(&self) -> &[ResultEntry] {
        match self {
            Self::Entries(entries) => entries,
            Self::Hidden | Self::NoResults => &[],
        }
    }
}

#[must_use]
/// Build the displayed list for `results` found with `query`.
pub fn render(results: &[SearchResult], query: &str) -> ResultList {
    if results.is_empty() {
        return ResultList::NoResults;
    }
    let pattern = match_pattern(query);
    ResultList::Entries(
        results
            .iter()
            .map(|result| ResultEntry {
                section_id: result.section_id.clone(),
                title: result.title.clone(),
                snippet: split_matches(&collapse_whitespace(&result.snippet), pattern.as_ref()),
            })
            .collect(),
    )
}

#[must_use]
/// Split `text` into fragments, highlighting every case-insensitive occurrence of `query`.
pub fn highlight(text: &str, query: &str) -> Vec<Fragment> {
    split_matches(text, match_pattern(query).as_ref())
}

fn match_pattern(query: &str) -> Option<Regex> {
    let query = collapse_whitespace(query);
    if query.is_empty() {
        return None;
    }
    RegexBuilder::new(&regex::escape(&query))
        .case_insensitive(true)
        .build()
        .inspect_err(|e| tracing::warn!(error = %e, "could not compile highlight pattern"))
        .ok()
}

fn split_matches(text: &str, pattern: Option<&Regex>) -> Vec<Fragment> {
    let Some(pattern) = pattern else {
        return vec![plain(text)];
    };
    let mut fragments = Vec::new();
    let mut last = 0;
    for m in pattern.find_iter(text) {
        if m.start() > last {
            fragments.push(plain(&text[last..m.start()]));
        }
        fragments.push(Fragment {
            text: m.as_str().to_string(),
            highlighted: true,
        });
        last = m.end();
    }
    if last < text.len() || fragments.is_empty() {
        fragments.push(plain(&text[last..]));
    }
    fragments
}

fn plain(text: &str) -> Fragment {
    Fragment {
        text: text.to_string(),
        highlighted: false,
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "tests/results.rs"]
mod tests;
