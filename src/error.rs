//! Errors raised while loading a page and driving the terminal.
//!
//! Interaction-level failures (missing navigation targets, clipboard hiccups, empty titles)
//! never reach this type: they degrade to a no-op or a fallback at the call site. What is left
//! are the startup failures that stop lectern before a page can be shown.

use std::io;
use thiserror::Error;

/// Failure modes that abort loading or rendering a documentation page.
#[derive(Debug, Error)]
pub enum Error {
    /// The markdown source could not be read from disk.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path that was requested.
        path: String,
        /// Underlying filesystem error.
        #[source]
        source: io::Error,
    },
    /// The tree-sitter grammar is incompatible with the linked runtime.
    #[error("markdown grammar rejected: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    /// A block capture query failed to compile.
    #[error("invalid block query: {0}")]
    Query(#[from] tree_sitter::QueryError),
    /// The parser gave up without producing a syntax tree.
    #[error("no syntax tree produced for {0}")]
    Parse(String),
    /// The system clipboard refused a write.
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
}

/// Shorthand for results carrying a lectern [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
