//! The terminal rendition of a page: laid-out rows, section geometry and the scroll position.
//!
//! Layout turns blocks into styled rows for the current content width. Geometry is reported in
//! page units, `row_height` units per row, so the navigation header gap and the scroll-spy band
//! are independent of how tall a terminal row happens to be. Clickable parts of a row (copy
//! buttons, sortable headers) are recorded as hotspots for the shell to hit-test.

use crate::code::{Clipboard, CodeHighlighter, CopyButtons};
use crate::config::Config;
use crate::document::{Block, CodeBlock, Document, ParagraphKind};
use crate::surface::{ScrollBehavior, SectionBounds, SectionNode, Surface, Viewport};
use crate::tables::Table;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use std::time::Instant;

const COLUMN_GAP: &str = " │ ";
const SORT_MARK: &str = " ↕";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Something a click on the page content can trigger.
pub enum PageAction {
    /// Copy the code block at this block index.
    Copy(usize),
    /// Sort the table at `block` by `column`.
    Sort {
        /// Block index of the table.
        block: usize,
        /// Column to sort by.
        column: usize,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A clickable span within a row.
pub struct Hotspot {
    /// Column offset from the left of the content area.
    pub x: u16,
    /// Width in columns.
    pub width: u16,
    /// What a click does.
    pub action: PageAction,
}

#[derive(Clone, Debug, Default)]
/// One laid-out terminal row.
pub struct Row {
    /// Styled content.
    pub line: Line<'static>,
    /// Clickable spans in the row.
    pub hotspots: Vec<Hotspot>,
}

impl Row {
    fn text(line: impl Into<Line<'static>>) -> Self {
        Self {
            line: line.into(),
            hotspots: Vec::new(),
        }
    }
}

/// A laid-out page with its viewport, implementing [`Surface`] for the terminal.
pub struct TerminalPage {
    document: Document,
    highlighter: CodeHighlighter,
    copy_buttons: CopyButtons,
    row_height: i64,
    width: u16,
    view_rows: u16,
    compact: bool,
    rows: Vec<Row>,
    block_rows: Vec<usize>,
    section_rows: Vec<(usize, usize)>,
    scroll: i64,
    target: Option<i64>,
}

impl TerminalPage {
    #[must_use]
    /// Page for `document`, not yet laid out.
    pub fn new(document: Document, config: &Config) -> Self {
        let copy_buttons = CopyButtons::new(document.code_blocks(), config.copy_feedback());
        Self {
            document,
            highlighter: CodeHighlighter::new(&config.theme),
            copy_buttons,
            row_height: config.row_height.max(1),
            width: 0,
            view_rows: 0,
            compact: false,
            rows: Vec::new(),
            block_rows: Vec::new(),
            section_rows: Vec::new(),
            scroll: 0,
            target: None,
        }
    }

    #[must_use]
    /// The underlying document.
    pub const fn document(&self) -> &Document {
        &self.document
    }

    #[must_use]
    /// Copy button states.
    pub const fn copy_buttons(&self) -> &CopyButtons {
        &self.copy_buttons
    }

    #[must_use]
    /// Height of one row in page units.
    pub const fn row_height(&self) -> i64 {
        self.row_height
    }

    /// Size the content area, laying the page out again when anything changed.
    pub fn set_viewport(&mut self, width: u16, height: u16, compact: bool) {
        if width == self.width && height == self.view_rows && compact == self.compact {
            return;
        }
        self.width = width;
        self.view_rows = height;
        self.compact = compact;
        self.relayout();
    }

    #[must_use]
    /// Every laid-out row.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    /// Index of the first visible row.
    pub const fn scroll_row(&self) -> usize {
        (self.scroll / self.row_height) as usize
    }

    #[must_use]
    /// Rows currently in the viewport.
    pub fn visible_rows(&self) -> &[Row] {
        let start = self.scroll_row().min(self.rows.len());
        let end = (start + usize::from(self.view_rows)).min(self.rows.len());
        &self.rows[start..end]
    }

    /// Scroll by `rows` immediately, cancelling any animation.
    pub fn scroll_by_rows(&mut self, rows: i64) {
        let top = self.scroll + rows * self.row_height;
        self.scroll_to(top, ScrollBehavior::Instant);
    }

    /// Jump to the top of the page.
    pub fn scroll_home(&mut self) {
        self.scroll_to(0, ScrollBehavior::Instant);
    }

    /// Jump to the bottom of the page.
    pub fn scroll_end(&mut self) {
        let bottom = self.viewport().max_scroll();
        self.scroll_to(bottom, ScrollBehavior::Instant);
    }

    #[must_use]
    /// Whether a smooth scroll is in progress.
    pub const fn is_animating(&self) -> bool {
        self.target.is_some()
    }

    /// Advance a smooth scroll by one frame. Returns whether the position moved.
    pub fn step_animation(&mut self) -> bool {
        let Some(target) = self.target else {
            return false;
        };
        let remaining = target - self.scroll;
        if remaining.abs() <= self.row_height {
            self.scroll = target;
            self.target = None;
        } else {
            let step = (remaining / 3).abs().max(self.row_height);
            self.scroll += step * remaining.signum();
        }
        true
    }

    /// Sort the table at `block` by `column`.
    pub fn sort(&mut self, block: usize, column: usize) -> bool {
        let Some(table) = self.document.table_mut(block) else {
            return false;
        };
        if !table.is_sortable_column(column) {
            return false;
        }
        table.sort_by_column(column);
        self.relayout();
        true
    }

    /// Copy the code block at `block` to `clipboard`.
    pub fn copy(&mut self, block: usize, clipboard: &mut dyn Clipboard, now: Instant) -> bool {
        let Some(CodeBlock { text, .. }) = self.document.code(block) else {
            return false;
        };
        let copied = self.copy_buttons.copy(block, text, clipboard, now);
        if copied {
            self.relayout();
        }
        copied
    }

    #[must_use]
    /// Block index of the first code block with a row in the viewport.
    pub fn first_visible_code(&self) -> Option<usize> {
        let first = self.scroll_row();
        let last = first + usize::from(self.view_rows);
        self.document.code_blocks().find(|&block| {
            let start = self.block_rows.get(block).copied().unwrap_or(usize::MAX);
            let end = self
                .block_rows
                .get(block + 1)
                .copied()
                .unwrap_or(self.rows.len());
            start < last && end > first
        })
    }

    /// Run timers owned by the page. Returns whether anything visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.copy_buttons.tick(now) {
            self.relayout();
            return true;
        }
        false
    }

    #[must_use]
    /// Earliest pending page timer.
    pub fn deadline(&self) -> Option<Instant> {
        self.copy_buttons.deadline()
    }

    fn relayout(&mut self) {
        let width = usize::from(self.width.max(1));
        let mut rows = Vec::new();
        let mut block_rows = Vec::with_capacity(self.document.blocks.len());

        for (index, block) in self.document.blocks.iter().enumerate() {
            block_rows.push(rows.len());
            match block {
                Block::Heading { level, text, .. } => layout_heading(&mut rows, *level, text, width),
                Block::Paragraph { text, kind } => layout_paragraph(&mut rows, text, *kind, width),
                Block::Table(table) => {
                    if self.compact || !layout_grid(&mut rows, index, table, width) {
                        layout_stacked(&mut rows, index, table, width);
                    }
                }
                Block::Code(code) => {
                    let label = self.copy_buttons.state(index).label();
                    layout_code(&mut rows, index, code, label, &self.highlighter, width);
                }
                Block::Rule => rows.push(Row::text(Span::styled(
                    "─".repeat(width),
                    Style::default().fg(Color::DarkGray),
                ))),
            }
            rows.push(Row::default());
        }

        self.section_rows = self
            .document
            .sections
            .iter()
            .map(|span| {
                let start = block_rows.get(span.start_block).copied().unwrap_or(rows.len());
                let end = block_rows.get(span.end_block).copied().unwrap_or(rows.len());
                (start, end)
            })
            .collect();
        self.rows = rows;
        self.block_rows = block_rows;

        let max = self.viewport().max_scroll();
        self.scroll = self.scroll.clamp(0, max);
        if let Some(target) = self.target.as_mut() {
            *target = (*target).clamp(0, max);
        }
    }

    fn units(&self, rows: usize) -> i64 {
        i64::try_from(rows).unwrap_or(i64::MAX / self.row_height) * self.row_height
    }
}

impl Surface for TerminalPage {
    fn sections(&self) -> Vec<SectionNode> {
        self.document
            .sections
            .iter()
            .map(|span| SectionNode {
                id: span.id.clone(),
                heading: span.heading.clone(),
                text: self.document.section_text(span),
            })
            .collect()
    }

    fn section_bounds(&self) -> Vec<SectionBounds> {
        self.document
            .sections
            .iter()
            .zip(&self.section_rows)
            .map(|(span, &(start, end))| SectionBounds {
                id: span.id.clone(),
                top: self.units(start),
                height: self.units(end - start),
            })
            .collect()
    }

    fn viewport(&self) -> Viewport {
        Viewport {
            scroll_top: self.scroll,
            height: self.units(usize::from(self.view_rows)),
            document_height: self.units(self.rows.len()),
        }
    }

    fn scroll_to(&mut self, top: i64, behavior: ScrollBehavior) {
        let target = top.clamp(0, self.viewport().max_scroll());
        match behavior {
            ScrollBehavior::Smooth if target != self.scroll => self.target = Some(target),
            ScrollBehavior::Smooth | ScrollBehavior::Instant => {
                self.scroll = target;
                self.target = None;
            }
        }
    }
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

fn char_width(text: &str) -> usize {
    text.chars().count()
}

/// Greedy word wrap to `width` columns; words longer than a line are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut used = 0;

    for word in text.split_whitespace() {
        let len = char_width(word);
        if used > 0 && used + 1 + len > width {
            lines.push(std::mem::take(&mut current));
            used = 0;
        }
        if used > 0 {
            current.push(' ');
            used += 1;
        }
        for c in word.chars() {
            if used == width {
                lines.push(std::mem::take(&mut current));
                used = 0;
            }
            current.push(c);
            used += 1;
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn layout_heading(rows: &mut Vec<Row>, level: usize, text: &str, width: usize) {
    let style = match level {
        1 => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        2 => Style::default()
            .fg(Color::LightBlue)
            .add_modifier(Modifier::BOLD),
        _ => Style::default().add_modifier(Modifier::BOLD),
    };
    let lines = wrap(text, width);
    let underline = lines.iter().map(|l| char_width(l)).max().unwrap_or(0);
    rows.extend(lines.into_iter().map(|l| Row::text(Span::styled(l, style))));
    if level <= 2 {
        let rule = if level == 1 { "═" } else { "─" };
        rows.push(Row::text(Span::styled(
            rule.repeat(underline.min(width)),
            Style::default().fg(Color::DarkGray),
        )));
    }
}

fn layout_paragraph(rows: &mut Vec<Row>, text: &str, kind: ParagraphKind, width: usize) {
    let (first, rest, style) = match kind {
        ParagraphKind::Plain => ("", "", Style::default()),
        ParagraphKind::ListItem => ("• ", "  ", Style::default()),
        ParagraphKind::Quote => (
            "│ ",
            "│ ",
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
        ),
    };
    let lines = wrap(text, width.saturating_sub(char_width(first)));
    rows.extend(lines.into_iter().enumerate().map(|(i, line)| {
        let prefix = if i == 0 { first } else { rest };
        Row::text(Line::from(vec![
            Span::styled(prefix, Style::default().fg(Color::DarkGray)),
            Span::styled(line, style),
        ]))
    }));
}

/// Lay a table out as a grid. Returns `false` when it does not fit in `width`.
fn layout_grid(rows: &mut Vec<Row>, block: usize, table: &Table, width: usize) -> bool {
    let columns = table.column_count();
    if columns == 0 {
        return true;
    }
    let sortable = table.sortable_columns();
    let headers: Vec<String> = (0..columns)
        .map(|c| {
            let header = table.headers.get(c).map_or("", |h| h.trim());
            if sortable.contains(&c) {
                format!("{header}{SORT_MARK}")
            } else {
                header.to_string()
            }
        })
        .collect();
    let widths: Vec<usize> = (0..columns)
        .map(|c| {
            table
                .rows
                .iter()
                .filter_map(|row| row.get(c))
                .map(|cell| char_width(cell))
                .chain(std::iter::once(char_width(&headers[c])))
                .max()
                .unwrap_or(0)
        })
        .collect();
    let total = widths.iter().sum::<usize>() + char_width(COLUMN_GAP) * (columns - 1);
    if total > width {
        return false;
    }

    let header_style = Style::default().add_modifier(Modifier::BOLD);
    let mut header = Row::default();
    let mut x = 0;
    for (c, text) in headers.iter().enumerate() {
        if c > 0 {
            header.line.push_span(Span::raw(COLUMN_GAP));
            x += char_width(COLUMN_GAP);
        }
        header
            .line
            .push_span(Span::styled(format!("{text:<w$}", w = widths[c]), header_style));
        if sortable.contains(&c) {
            header.hotspots.push(Hotspot {
                x: to_u16(x),
                width: to_u16(widths[c]),
                action: PageAction::Sort { block, column: c },
            });
        }
        x += widths[c];
    }
    rows.push(header);

    let separator = widths
        .iter()
        .map(|w| "─".repeat(*w))
        .collect::<Vec<_>>()
        .join("─┼─");
    rows.push(Row::text(Span::styled(
        separator,
        Style::default().fg(Color::DarkGray),
    )));

    for row in &table.rows {
        let cells = (0..columns)
            .map(|c| format!("{:<w$}", row.get(c).map_or("", String::as_str), w = widths[c]))
            .collect::<Vec<_>>()
            .join(COLUMN_GAP);
        rows.push(Row::text(cells));
    }
    true
}

/// Lay a table out one record at a time, each cell prefixed with its column label.
fn layout_stacked(rows: &mut Vec<Row>, block: usize, table: &Table, width: usize) {
    let sortable = table.sortable_columns();
    if !sortable.is_empty() {
        let mut chips = Row::text(Span::styled("Sort: ", Style::default().fg(Color::DarkGray)));
        let mut x = char_width("Sort: ");
        for column in sortable {
            let label = format!("[{}{SORT_MARK}]", table.label(column).unwrap_or("?"));
            let len = char_width(&label);
            chips.hotspots.push(Hotspot {
                x: to_u16(x),
                width: to_u16(len),
                action: PageAction::Sort { block, column },
            });
            chips.line.push_span(Span::styled(
                label,
                Style::default().add_modifier(Modifier::BOLD),
            ));
            chips.line.push_span(Span::raw(" "));
            x += len + 1;
        }
        rows.push(chips);
    }

    let label_style = Style::default().add_modifier(Modifier::BOLD);
    for (r, record) in table.rows.iter().enumerate() {
        if r > 0 {
            rows.push(Row::text(Span::styled(
                "┄".repeat(width.min(24)),
                Style::default().fg(Color::DarkGray),
            )));
        }
        for (c, cell) in record.iter().enumerate() {
            match table.label(c) {
                Some(label) => {
                    let prefix = format!("{label}: ");
                    let indent = char_width(&prefix);
                    let lines = wrap(cell, width.saturating_sub(indent));
                    for (i, line) in lines.into_iter().enumerate() {
                        let lead = if i == 0 {
                            Span::styled(prefix.clone(), label_style)
                        } else {
                            Span::raw(" ".repeat(indent))
                        };
                        rows.push(Row::text(Line::from(vec![lead, Span::raw(line)])));
                    }
                }
                None => rows.extend(wrap(cell, width).into_iter().map(Row::text)),
            }
        }
    }
}

fn layout_code(
    rows: &mut Vec<Row>,
    block: usize,
    code: &CodeBlock,
    label: &'static str,
    highlighter: &CodeHighlighter,
    width: usize,
) {
    let dim = Style::default().fg(Color::DarkGray);
    let language = code.language.as_deref().unwrap_or("text");
    let lead = format!("── {language} ");
    let fill = width.saturating_sub(char_width(&lead) + char_width(label) + 1);
    let mut header = Row::text(Line::from(vec![
        Span::styled(lead.clone(), dim),
        Span::styled("─".repeat(fill), dim),
        Span::raw(" "),
        Span::styled(label, Style::default().fg(Color::Yellow)),
    ]));
    header.hotspots.push(Hotspot {
        x: to_u16(char_width(&lead) + fill + 1),
        width: to_u16(char_width(label)),
        action: PageAction::Copy(block),
    });
    rows.push(header);

    for line in highlighter.highlight(&code.text, code.language.as_deref()) {
        let mut spans = vec![Span::styled("│ ", dim)];
        spans.extend(line.spans);
        rows.push(Row::text(Line::from(spans)));
    }
}

#[cfg(test)]
#[path = "tests/page.rs"]
mod tests;
