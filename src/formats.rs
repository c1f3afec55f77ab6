//! Format trait and implementations for different document types.
//!
//! This module defines the `Format` trait which abstracts over the markup a page is written in
//! by providing the tree-sitter grammar and the capture query that picks out renderable blocks.
//! Capture names are shared across formats so the document builder stays format-agnostic.

pub mod markdown;

/// Capture name for headings.
pub const HEADING: &str = "heading";
/// Capture name for prose paragraphs.
pub const PARAGRAPH: &str = "paragraph";
/// Capture name for tables.
pub const TABLE: &str = "table";
/// Capture name for code blocks.
pub const CODE: &str = "code";
/// Capture name for horizontal rules.
pub const RULE: &str = "rule";

/// Grammar and block query for one markup language.
pub trait Format {
    /// Tree-sitter grammar used to parse the page.
    fn language(&self) -> tree_sitter::Language;
    /// Query capturing every renderable block with one of the shared capture names.
    fn block_query(&self) -> &str;
}
