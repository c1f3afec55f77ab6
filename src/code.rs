//! Code block enhancements: copy-to-clipboard buttons and syntax highlighting.
//!
//! A successful copy flips the block's button to a confirmation for a short while before it
//! reverts. A failed copy is logged and the button simply stays as it was; there is no retry.

use crate::debounce::Debouncer;
use crate::error::{Error, Result};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

/// Label of an idle copy button.
pub const COPY_LABEL: &str = "[ Copy ]";
/// Label of a copy button confirming a copy.
pub const COPIED_LABEL: &str = "[ Copied! ]";

/// Destination for copied code.
pub trait Clipboard {
    /// Replace the clipboard contents with `text`.
    ///
    /// # Errors
    ///
    /// Returns an error if the clipboard cannot be reached or refuses the write.
    fn write_text(&mut self, text: &str) -> Result<()>;
}

#[derive(Default)]
/// The system clipboard, opened on first use.
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if self.inner.is_none() {
            let opened = arboard::Clipboard::new().map_err(|e| Error::Clipboard(e.to_string()))?;
            self.inner = Some(opened);
        }
        let Some(clipboard) = self.inner.as_mut() else {
            return Err(Error::Clipboard("clipboard not opened".to_string()));
        };
        clipboard
            .set_text(text.to_owned())
            .map_err(|e| Error::Clipboard(e.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Display state of one copy button.
pub enum CopyState {
    /// Ready to copy.
    Idle,
    /// Showing the copy confirmation.
    Copied,
}

impl CopyState {
    #[must_use]
    /// Button text for this state.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => COPY_LABEL,
            Self::Copied => COPIED_LABEL,
        }
    }
}

#[derive(Debug)]
/// Copy buttons for every code block on the page, keyed by block index.
pub struct CopyButtons {
    reverts: BTreeMap<usize, Debouncer<()>>,
}

impl CopyButtons {
    #[must_use]
    /// One idle button per block in `blocks`, each confirming for `feedback`.
    pub fn new(blocks: impl IntoIterator<Item = usize>, feedback: Duration) -> Self {
        Self {
            reverts: blocks
                .into_iter()
                .map(|block| (block, Debouncer::new(feedback)))
                .collect(),
        }
    }

    #[must_use]
    /// Current state of the button on `block`.
    pub fn state(&self, block: usize) -> CopyState {
        match self.reverts.get(&block) {
            Some(revert) if revert.is_pending() => CopyState::Copied,
            _ => CopyState::Idle,
        }
    }

    /// Copy `text` for the button on `block`.
    ///
    /// Returns whether the clipboard accepted the text.
    pub fn copy(
        &mut self,
        block: usize,
        text: &str,
        clipboard: &mut dyn Clipboard,
        now: Instant,
    ) -> bool {
        let Some(revert) = self.reverts.get_mut(&block) else {
            return false;
        };
        match clipboard.write_text(text) {
            Ok(()) => {
                tracing::debug!(block, bytes = text.len(), "copied code block");
                revert.schedule(now, ());
                true
            }
            Err(e) => {
                tracing::error!(block, error = %e, "failed to copy code");
                false
            }
        }
    }

    /// Revert every confirmation whose time is up. Returns whether any button changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for revert in self.reverts.values_mut() {
            changed |= revert.fire_due(now).is_some();
        }
        changed
    }

    #[must_use]
    /// Earliest pending revert.
    pub fn deadline(&self) -> Option<Instant> {
        self.reverts.values().filter_map(Debouncer::deadline).min()
    }
}

/// Syntax highlighter for code blocks.
pub struct CodeHighlighter {
    syntaxes: SyntaxSet,
    theme: Theme,
}

impl CodeHighlighter {
    #[must_use]
    /// Highlighter using the bundled syntaxes and the theme named `theme`.
    ///
    /// Unknown theme names fall back to the default theme.
    pub fn new(theme: &str) -> Self {
        let mut themes = ThemeSet::load_defaults().themes;
        let theme = themes.remove(theme).unwrap_or_else(|| {
            tracing::warn!(theme, "unknown highlight theme, using default");
            Theme::default()
        });
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            theme,
        }
    }

    #[must_use]
    /// Styled lines for `code`, highlighted as `language` when it is recognised.
    pub fn highlight(&self, code: &str, language: Option<&str>) -> Vec<Line<'static>> {
        let syntax = language
            .and_then(|token| self.syntaxes.find_syntax_by_token(token))
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text());
        let mut highlighter = HighlightLines::new(syntax, &self.theme);

        LinesWithEndings::from(code)
            .map(|line| match highlighter.highlight_line(line, &self.syntaxes) {
                Ok(regions) => Line::from(
                    regions
                        .into_iter()
                        .map(|(style, text)| {
                            let text = text.trim_end_matches(['\n', '\r']).to_string();
                            Span::styled(text, convert_style(style))
                        })
                        .collect::<Vec<_>>(),
                ),
                Err(e) => {
                    tracing::debug!(error = %e, "highlighting failed, showing plain line");
                    Line::raw(line.trim_end_matches(['\n', '\r']).to_string())
                }
            })
            .collect()
    }
}

fn convert_style(style: syntect::highlighting::Style) -> Style {
    let fg = style.foreground;
    let mut converted = Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b));
    if style.font_style.contains(FontStyle::BOLD) {
        converted = converted.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        converted = converted.add_modifier(Modifier::ITALIC);
    }
    converted
}

#[cfg(test)]
#[path = "tests/code.rs"]
mod tests;
