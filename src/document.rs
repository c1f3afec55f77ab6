//! The page model: an ordered list of blocks with labeled sections laid over it.
//!
//! A markdown file is parsed once with tree-sitter. The block query of the [`Format`] yields
//! headings, paragraphs, tables, code blocks and rules, which we sort back into source order.
//! Every heading at the configured section level opens a labeled section that runs until the
//! next such heading. Content before the first one is the page preamble and belongs to no
//! section, the same way an introduction outside any labeled container is skipped.

use crate::error::{Error, Result};
use crate::formats::{self, Format};
use crate::tables::Table;
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser, Query, QueryCursor};

static EXPLICIT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\{#([A-Za-z0-9_.:-]+)\}\s*$").expect("valid id pattern"));
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!?\[([^\]]*)\]\([^)]*\)").expect("valid link pattern"));
static EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*|__|`").expect("valid emphasis pattern"));

#[derive(Clone, Debug, PartialEq, Eq)]
/// A fenced or indented code block.
pub struct CodeBlock {
    /// Info-string language, if one was given.
    pub language: Option<String>,
    /// Code text without fences and without the trailing newline.
    pub text: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Container a paragraph was found in.
pub enum ParagraphKind {
    /// Top-level prose.
    Plain,
    /// Body of a list item.
    ListItem,
    /// Body of a block quote.
    Quote,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A renderable unit of the page in source order.
pub enum Block {
    /// ATX heading.
    Heading {
        /// Heading level, 1 through 6.
        level: usize,
        /// Heading text with inline markup and any `{#id}` suffix removed.
        text: String,
        /// Identifier from a trailing `{#id}`, if the heading carried one.
        explicit_id: Option<String>,
    },
    /// Prose with soft line breaks folded into spaces.
    Paragraph {
        /// Flattened inline text.
        text: String,
        /// Where the paragraph sits.
        kind: ParagraphKind,
    },
    /// Pipe table.
    Table(Table),
    /// Code block.
    Code(CodeBlock),
    /// Thematic break.
    Rule,
}

impl Block {
    #[must_use]
    /// Rendered text content of the block, as a reader would select and copy it.
    pub fn text_content(&self) -> String {
        match self {
            Self::Heading { text, .. } | Self::Paragraph { text, .. } => text.clone(),
            Self::Table(table) => std::iter::once(table.headers.join(" "))
                .chain(table.rows.iter().map(|row| row.join(" ")))
                .collect::<Vec<_>>()
                .join("\n"),
            Self::Code(code) => code.text.clone(),
            Self::Rule => String::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A labeled section: a section-level heading and every block up to the next one.
pub struct SectionSpan {
    /// Stable identifier, unique within the page.
    pub id: String,
    /// Heading text, `None` when the heading is empty.
    pub heading: Option<String>,
    /// Index of the opening heading block.
    pub start_block: usize,
    /// One past the last block belonging to the section.
    pub end_block: usize,
}

#[derive(Clone, Debug, Default)]
/// A parsed documentation page.
pub struct Document {
    /// Text of the first level-1 heading, used as the page title.
    pub title: Option<String>,
    /// Blocks in source order.
    pub blocks: Vec<Block>,
    /// Labeled sections in document order.
    pub sections: Vec<SectionSpan>,
}

impl Document {
    /// Read and parse the page at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the parser cannot be set up.
    pub fn load(path: &Path, format: &impl Format, section_level: usize) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.display().to_string(),
            source,
        })?;
        let document = Self::parse(&source, format, section_level)
            .map_err(|e| match e {
                Error::Parse(_) => Error::Parse(path.display().to_string()),
                other => other,
            })?;
        tracing::info!(
            path = %path.display(),
            blocks = document.blocks.len(),
            sections = document.sections.len(),
            "loaded page"
        );
        Ok(document)
    }

    /// Parse markdown `source` into blocks and labeled sections.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar or block query is rejected by tree-sitter.
    pub fn parse(source: &str, format: &impl Format, section_level: usize) -> Result<Self> {
        let language = format.language();
        let mut parser = Parser::new();
        parser.set_language(&language)?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| Error::Parse("<source>".to_string()))?;

        let query = Query::new(&language, format.block_query())?;
        let names = query.capture_names();
        let bytes = source.as_bytes();

        let mut found: Vec<(usize, Block)> = Vec::new();
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, tree.root_node(), bytes);
        while let Some(m) = matches.next() {
            for capture in m.captures {
                let node = capture.node;
                let block = match names[capture.index as usize] {
                    formats::HEADING => heading_block(node, bytes),
                    formats::PARAGRAPH => Some(paragraph_block(node, bytes)),
                    formats::TABLE => Some(Block::Table(table_block(node, bytes))),
                    formats::CODE => Some(Block::Code(code_block(node, bytes))),
                    formats::RULE => Some(Block::Rule),
                    _ => None,
                };
                if let Some(block) = block {
                    found.push((node.start_byte(), block));
                }
            }
        }
        found.sort_by_key(|(start, _)| *start);
        found.dedup_by_key(|(start, _)| *start);

        let mut document = Self {
            title: None,
            blocks: found.into_iter().map(|(_, block)| block).collect(),
            sections: Vec::new(),
        };
        document.collect_sections(section_level);
        Ok(document)
    }

    /// Assign ids and spans to every section-level heading.
    fn collect_sections(&mut self, section_level: usize) {
        let mut seen = HashSet::new();

        for (index, block) in self.blocks.iter().enumerate() {
            let Block::Heading {
                level,
                text,
                explicit_id,
            } = block
            else {
                continue;
            };
            if *level == 1 && self.title.is_none() && !text.is_empty() {
                self.title = Some(text.clone());
            }
            if *level != section_level {
                continue;
            }
            let ordinal = self.sections.len() + 1;
            let base = explicit_id
                .clone()
                .or_else(|| Some(slugify(text)).filter(|s| !s.is_empty()))
                .unwrap_or_else(|| format!("section-{ordinal}"));
            let id = unique_id(&base, &mut seen);
            self.sections.push(SectionSpan {
                id,
                heading: Some(text.clone()).filter(|t| !t.is_empty()),
                start_block: index,
                end_block: self.blocks.len(),
            });
        }

        let starts: Vec<usize> = self.sections.iter().map(|s| s.start_block).collect();
        for (section, next_start) in self.sections.iter_mut().zip(starts.iter().skip(1)) {
            section.end_block = *next_start;
        }
    }

    #[must_use]
    /// Full text content of a section: its heading followed by every block it contains.
    pub fn section_text(&self, span: &SectionSpan) -> String {
        self.blocks[span.start_block..span.end_block]
            .iter()
            .map(Block::text_content)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[must_use]
    /// Look up a section by id.
    pub fn section(&self, id: &str) -> Option<&SectionSpan> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Mutable access to the table at block `index`, if that block is a table.
    pub fn table_mut(&mut self, index: usize) -> Option<&mut Table> {
        match self.blocks.get_mut(index) {
            Some(Block::Table(table)) => Some(table),
            _ => None,
        }
    }

    #[must_use]
    /// The code block at block `index`, if that block is code.
    pub fn code(&self, index: usize) -> Option<&CodeBlock> {
        match self.blocks.get(index) {
            Some(Block::Code(code)) => Some(code),
            _ => None,
        }
    }

    /// Block indices of every code block.
    pub fn code_blocks(&self) -> impl Iterator<Item = usize> + '_ {
        self.blocks
            .iter()
            .enumerate()
            .filter_map(|(i, b)| matches!(b, Block::Code(_)).then_some(i))
    }
}

fn node_text<'a>(node: Node<'_>, bytes: &'a [u8]) -> &'a str {
    node.utf8_text(bytes).unwrap_or_default()
}

fn heading_block(node: Node<'_>, bytes: &[u8]) -> Option<Block> {
    let mut cursor = node.walk();
    let level = node.children(&mut cursor).find_map(|child| {
        child
            .kind()
            .strip_prefix("atx_h")
            .and_then(|rest| rest.strip_suffix("_marker"))
            .and_then(|n| n.parse::<usize>().ok())
    })?;
    let raw = node
        .child_by_field_name("heading_content")
        .map_or("", |content| node_text(content, bytes));
    let explicit_id = EXPLICIT_ID
        .captures(raw)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string());
    let text = inline_text(&EXPLICIT_ID.replace(raw, ""));
    Some(Block::Heading {
        level,
        text,
        explicit_id,
    })
}

fn paragraph_block(node: Node<'_>, bytes: &[u8]) -> Block {
    let kind = match node.parent().map(|p| p.kind()) {
        Some("list_item") => ParagraphKind::ListItem,
        Some("block_quote") => ParagraphKind::Quote,
        _ => ParagraphKind::Plain,
    };
    let raw = node_text(node, bytes)
        .lines()
        .map(|line| line.trim_start_matches('>').trim())
        .collect::<Vec<_>>()
        .join(" ");
    Block::Paragraph {
        text: inline_text(&raw),
        kind,
    }
}

fn table_cells(row: Node<'_>, bytes: &[u8]) -> Vec<String> {
    let mut cursor = row.walk();
    row.named_children(&mut cursor)
        .filter(|cell| cell.kind() == "pipe_table_cell")
        .map(|cell| inline_text(node_text(cell, bytes)))
        .collect()
}

fn table_block(node: Node<'_>, bytes: &[u8]) -> Table {
    let mut table = Table::default();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "pipe_table_header" => table.headers = table_cells(child, bytes),
            "pipe_table_row" => table.rows.push(table_cells(child, bytes)),
            _ => {}
        }
    }
    table
}

fn code_block(node: Node<'_>, bytes: &[u8]) -> CodeBlock {
    if node.kind() == "indented_code_block" {
        let text = node_text(node, bytes)
            .lines()
            .map(|line| line.strip_prefix("    ").unwrap_or(line.trim_start()))
            .collect::<Vec<_>>()
            .join("\n");
        return CodeBlock {
            language: None,
            text: text.trim_end().to_string(),
        };
    }

    let mut language = None;
    let mut text = String::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "info_string" => {
                language = node_text(child, bytes)
                    .split_whitespace()
                    .next()
                    .map(str::to_string);
            }
            "code_fence_content" => text = node_text(child, bytes).to_string(),
            _ => {}
        }
    }
    CodeBlock {
        language,
        text: text.trim_end_matches(['\n', '\r']).to_string(),
    }
}

/// Flatten inline markdown to the text a reader sees.
fn inline_text(raw: &str) -> String {
    let linked = LINK.replace_all(raw, "$1");
    let plain = EMPHASIS.replace_all(&linked, "");
    plain.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[must_use]
/// Lowercase, hyphen-separated anchor for a heading.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if (c.is_whitespace() || c == '-' || c == '_') && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

fn unique_id(base: &str, seen: &mut HashSet<String>) -> String {
    let mut id = base.to_string();
    let mut n = 1;
    while !seen.insert(id.clone()) {
        id = format!("{base}-{n}");
        n += 1;
    }
    id
}

#[cfg(test)]
#[path = "tests/document.rs"]
mod tests;
