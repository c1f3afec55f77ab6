//! Test doubles shared by the unit tests.

use crate::code::Clipboard;
use crate::document::{Block, CodeBlock, Document, ParagraphKind, SectionSpan};
use crate::error::{Error, Result};
use crate::surface::{ScrollBehavior, SectionBounds, SectionNode, Surface, Viewport};
use crate::tables::Table;
use std::cell::Cell;

/// A page whose sections and geometry are given up front.
#[derive(Debug, Default)]
pub struct FakeSurface {
    pub nodes: Vec<SectionNode>,
    pub bounds: Vec<SectionBounds>,
    pub viewport: Viewport,
    pub scrolls: Vec<(i64, ScrollBehavior)>,
    pub reads: Cell<usize>,
}

impl FakeSurface {
    /// One section per `(id, heading, text)`, stacked 100 units tall each.
    pub fn with_sections(sections: &[(&str, Option<&str>, &str)]) -> Self {
        let nodes = sections
            .iter()
            .map(|(id, heading, text)| SectionNode {
                id: (*id).to_string(),
                heading: heading.map(str::to_string),
                text: (*text).to_string(),
            })
            .collect();
        let bounds = (0_i64..)
            .zip(sections)
            .map(|(i, (id, _, _))| SectionBounds {
                id: (*id).to_string(),
                top: i * 100,
                height: 100,
            })
            .collect::<Vec<_>>();
        let document_height = bounds.last().map_or(0, SectionBounds::bottom);
        Self {
            nodes,
            bounds,
            viewport: Viewport {
                scroll_top: 0,
                height: 200,
                document_height,
            },
            ..Self::default()
        }
    }

    pub fn scrolled_to(mut self, scroll_top: i64) -> Self {
        self.viewport.scroll_top = scroll_top;
        self
    }
}

impl Surface for FakeSurface {
    fn sections(&self) -> Vec<SectionNode> {
        self.reads.set(self.reads.get() + 1);
        self.nodes.clone()
    }

    fn section_bounds(&self) -> Vec<SectionBounds> {
        self.bounds.clone()
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn scroll_to(&mut self, top: i64, behavior: ScrollBehavior) {
        self.scrolls.push((top, behavior));
        self.viewport.scroll_top = top.clamp(0, self.viewport.max_scroll());
    }
}

/// A clipboard that records writes and can be told to refuse them.
#[derive(Debug, Default)]
pub struct FakeClipboard {
    pub fail: bool,
    pub written: Vec<String>,
}

impl FakeClipboard {
    pub fn failing() -> Self {
        Self {
            fail: true,
            written: Vec::new(),
        }
    }
}

impl Clipboard for FakeClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if self.fail {
            return Err(Error::Clipboard("permission denied".to_string()));
        }
        self.written.push(text.to_string());
        Ok(())
    }
}

/// A small page covering every block kind.
pub const SAMPLE_PAGE: &str = "# Project Docs

Welcome to the project.

## 1. Getting Started

Install the tool with cargo.

```bash
cargo install project
```

## Tables &   Data

| Name | Released |
| --- | --- |
| Beta | 2024-03-15 |
| Alpha | 2023-01-10 |
| Gamma | 2024-12-01 |

## API Reference {#api}

Call the search function to search.

---

## FAQ

> Why a terminal?

- Because it is there.
";

fn heading(level: usize, text: &str) -> Block {
    Block::Heading {
        level,
        text: text.to_string(),
        explicit_id: None,
    }
}

fn paragraph(text: &str, kind: ParagraphKind) -> Block {
    Block::Paragraph {
        text: text.to_string(),
        kind,
    }
}

fn span(id: &str, heading: &str, start_block: usize, end_block: usize) -> SectionSpan {
    SectionSpan {
        id: id.to_string(),
        heading: Some(heading.to_string()),
        start_block,
        end_block,
    }
}

/// [`SAMPLE_PAGE`] as the parser is expected to see it, built without tree-sitter.
///
/// Laid out at 80 columns the page is 36 rows: the sections open at rows 5, 13, 22 and 29,
/// the code header sits on row 10 and the table header on row 16.
pub fn sample_document() -> Document {
    Document {
        title: Some("Project Docs".to_string()),
        blocks: vec![
            heading(1, "Project Docs"),
            paragraph("Welcome to the project.", ParagraphKind::Plain),
            heading(2, "1. Getting Started"),
            paragraph("Install the tool with cargo.", ParagraphKind::Plain),
            Block::Code(CodeBlock {
                language: Some("bash".to_string()),
                text: "cargo install project".to_string(),
            }),
            heading(2, "Tables & Data"),
            Block::Table(Table {
                headers: vec!["Name".to_string(), "Released".to_string()],
                rows: vec![
                    vec!["Beta".to_string(), "2024-03-15".to_string()],
                    vec!["Alpha".to_string(), "2023-01-10".to_string()],
                    vec!["Gamma".to_string(), "2024-12-01".to_string()],
                ],
            }),
            Block::Heading {
                level: 2,
                text: "API Reference".to_string(),
                explicit_id: Some("api".to_string()),
            },
            paragraph("Call the search function to search.", ParagraphKind::Plain),
            Block::Rule,
            heading(2, "FAQ"),
            paragraph("Why a terminal?", ParagraphKind::Quote),
            paragraph("Because it is there.", ParagraphKind::ListItem),
        ],
        sections: vec![
            span("1-getting-started", "1. Getting Started", 2, 5),
            span("tables-data", "Tables & Data", 5, 7),
            span("api", "API Reference", 7, 10),
            span("faq", "FAQ", 10, 13),
        ],
    }
}
