//! Section snapshot and the content indexer that produces it.
//!
//! A section is the searchable view of one labeled container: its id, a cleaned title fit for a
//! navigation list, and its full text. The index is rebuilt from the surface on every call, so it
//! always reflects what is currently rendered (including table rows that have been re-sorted).

use crate::surface::Surface;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s*").expect("valid numbering pattern"));
static AMPERSAND_SPACING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&\s+").expect("valid ampersand pattern"));

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Immutable, searchable snapshot of one labeled section.
pub struct Section {
    /// Stable identifier, unique per page.
    pub id: String,
    /// Human-readable title, falling back to the id.
    pub title: String,
    /// Full rendered text of the section.
    pub body_text: String,
}

#[must_use]
/// Strip a leading `N. ` numeral and normalise spacing after `&`.
pub fn clean_title(title: &str) -> String {
    let unnumbered = LEADING_NUMBER.replace(title, "");
    AMPERSAND_SPACING
        .replace_all(&unnumbered, "& ")
        .trim()
        .to_string()
}

/// Scan every labeled section of `surface` in document order.
pub fn index<S: Surface + ?Sized>(surface: &S) -> Vec<Section> {
    surface
        .sections()
        .into_iter()
        .map(|node| {
            let title = node
                .heading
                .as_deref()
                .map(clean_title)
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| node.id.clone());
            Section {
                id: node.id,
                title,
                body_text: node.text,
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/section.rs"]
mod tests;
