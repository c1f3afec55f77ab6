//! Markdown format implementation using tree-sitter-md.
//!
//! This module provides the tree-sitter query for parsing markdown documents into the block
//! sequence lectern lays out: ATX headings, paragraphs, GFM pipe tables, code blocks and rules.

use crate::formats::Format;

/// Tree-sitter queries for markdown block structure.
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn block_query(&self) -> &'static str {
        r"
        (atx_heading) @heading
        (paragraph) @paragraph
        (pipe_table) @table
        (fenced_code_block) @code
        (indented_code_block) @code
        (thematic_break) @rule
        "
    }
}
