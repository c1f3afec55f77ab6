//! lectern: a terminal reader for static markdown documentation pages.
//!
//! The page is parsed with tree-sitter into blocks and sections, laid out as terminal rows, and
//! wrapped with the conveniences of a documentation site: full-text search over sections, a
//! generated navigation sidebar with scroll-spy, smooth in-page navigation, sortable tables,
//! copyable code blocks and a reading-progress bar.
#![allow(clippy::multiple_crate_versions)]

pub mod app_state;
pub mod code;
pub mod config;
pub mod debounce;
pub mod document;
pub mod error;
pub mod formats;
pub mod navigation;
pub mod page;
pub mod progress;
pub mod query;
pub mod results;
pub mod search;
pub mod section;
pub mod sidebar;
pub mod surface;
pub mod tables;
pub mod ui;

pub use error::{Error, Result};

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
