//! The single owner of session state, bridging terminal events and the page.
//!
//! A TUI needs a single source of truth that can be interrogated and mutated as the reader
//! scrolls, searches and clicks. Every timer lives here as a single-slot field: the search and
//! resize debouncers, copy confirmations inside the page, and the smooth-scroll animation. The
//! event loop asks [`AppState::next_deadline`] how long it may sleep and calls
//! [`AppState::tick`] when it wakes.

use crate::code::Clipboard;
use crate::config::Config;
use crate::debounce::Debouncer;
use crate::document::Document;
use crate::navigation::{Navigator, ScrollSpy};
use crate::page::{PageAction, TerminalPage};
use crate::query::SearchLimits;
use crate::search::SearchController;
use crate::section;
use crate::sidebar::Sidebar;
use crate::surface::Surface;
use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};
use std::time::{Duration, Instant};

/// Frame interval while a smooth scroll is animating.
pub const FRAME: Duration = Duration::from_millis(16);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Which widget receives typed keys.
pub enum Focus {
    /// Keys scroll and navigate the page.
    Content,
    /// Keys edit the search box.
    Search,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// What a screen region does when clicked.
pub enum HitTarget {
    /// The sidebar panel as a whole.
    Sidebar,
    /// The control that opens and closes the sidebar overlay.
    SidebarToggle,
    /// The search input box.
    SearchInput,
    /// The result panel as a whole.
    ResultPanel,
    /// One search result entry.
    SearchResult(usize),
    /// One navigation entry.
    NavEntry(usize),
    /// A hotspot in the page content.
    Page(PageAction),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// A clickable screen region recorded while drawing.
pub struct HitRegion {
    /// Screen area.
    pub area: Rect,
    /// Click behaviour.
    pub target: HitTarget,
}

/// Session state for one open page.
pub struct AppState {
    /// Reader preferences.
    pub config: Config,
    /// Laid-out page and viewport.
    pub page: TerminalPage,
    /// Generated navigation.
    pub sidebar: Sidebar,
    /// Search box state.
    pub search: SearchController,
    /// Scroll target computation.
    pub navigator: Navigator,
    /// Active section tracking.
    pub spy: ScrollSpy,
    /// Keyboard focus.
    pub focus: Focus,
    /// Terminal width in columns.
    pub width: u16,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
    /// Set once the reader asks to quit.
    pub should_quit: bool,
    /// Click targets from the last frame, topmost last.
    pub hits: Vec<HitRegion>,
    resize: Debouncer<u16>,
    clipboard: Box<dyn Clipboard>,
}

impl AppState {
    #[must_use]
    /// Build session state for `document` shown on a terminal `width` columns wide.
    pub fn new(
        document: Document,
        config: Config,
        clipboard: Box<dyn Clipboard>,
        width: u16,
    ) -> Self {
        let page = TerminalPage::new(document, &config);
        let sidebar = Sidebar::generate(&section::index(&page), config.narrow_width);
        let search = SearchController::new(config.search_delay(), SearchLimits::from(&config));
        let navigator = Navigator::new(config.header_offset);
        let spy = ScrollSpy::new(config.spy_band_top, config.spy_band_bottom);
        let resize = Debouncer::new(config.resize_delay());

        Self {
            config,
            page,
            sidebar,
            search,
            navigator,
            spy,
            focus: Focus::Content,
            width,
            message: None,
            should_quit: false,
            hits: Vec::new(),
            resize,
            clipboard,
        }
    }

    #[must_use]
    /// Whether the compact layout applies at the current width.
    pub const fn is_narrow(&self) -> bool {
        self.config.is_narrow(self.width)
    }

    /// Refresh scroll-spy after the page has been laid out or scrolled.
    pub fn after_layout(&mut self) {
        let bounds = self.page.section_bounds();
        let viewport = self.page.viewport();
        self.spy.observe(&bounds, &viewport);
    }

    #[must_use]
    /// Earliest moment the event loop must wake up.
    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        let animation = self.page.is_animating().then(|| now + FRAME);
        [
            self.search.deadline(),
            self.resize.deadline(),
            self.page.deadline(),
            animation,
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Run every timer that is due by `now`.
    pub fn tick(&mut self, now: Instant) {
        self.search.poll(&self.page, now);
        if let Some(width) = self.resize.fire_due(now) {
            self.sidebar.settle_width(width);
        }
        self.page.tick(now);
        if self.page.step_animation() {
            self.after_layout();
        }
    }

    /// The terminal was resized.
    pub fn handle_resize(&mut self, width: u16, now: Instant) {
        self.width = width;
        self.resize.schedule(now, width);
    }

    /// Route a key press.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        match self.focus {
            Focus::Search => self.handle_search_key(key, now),
            Focus::Content => self.handle_content_key(key, now),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Char(c) => self.search.push_char(c, now),
            KeyCode::Backspace => self.search.pop_char(now),
            KeyCode::Down => self.search.select_next(),
            KeyCode::Up => self.search.select_prev(),
            KeyCode::Enter => {
                if self
                    .search
                    .activate_selected(&self.navigator, &mut self.page)
                {
                    self.focus = Focus::Content;
                    self.close_overlay_after_navigation();
                }
            }
            KeyCode::Esc | KeyCode::Tab => {
                self.search.dismiss();
                self.focus = Focus::Content;
            }
            _ => {}
        }
    }

    fn handle_content_key(&mut self, key: KeyEvent, now: Instant) {
        let page_rows = i64::try_from(self.page.visible_rows().len()).map_or(1, |n| n.max(2) - 1);
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('/') => {
                if self.is_narrow() {
                    self.sidebar.open();
                }
                self.focus = Focus::Search;
            }
            KeyCode::Tab => {
                self.sidebar.toggle(self.width);
            }
            KeyCode::Esc => {
                self.sidebar.escape();
                self.search.dismiss();
            }
            KeyCode::Char('j') | KeyCode::Down => self.scroll_rows(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_rows(-1),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_rows(page_rows),
            KeyCode::PageUp => self.scroll_rows(-page_rows),
            KeyCode::Home | KeyCode::Char('g') => {
                self.page.scroll_home();
                self.after_layout();
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.page.scroll_end();
                self.after_layout();
            }
            KeyCode::Char(']') => self.jump_section(1),
            KeyCode::Char('[') => self.jump_section(-1),
            KeyCode::Char('y') => self.copy_visible_code(now),
            _ => {}
        }
    }

    fn scroll_rows(&mut self, rows: i64) {
        self.page.scroll_by_rows(rows);
        self.after_layout();
    }

    /// Navigate to the section `delta` entries away from the active one.
    pub fn jump_section(&mut self, delta: isize) {
        let count = self.sidebar.entries().len();
        if count == 0 {
            return;
        }
        let target = match self.spy.active().and_then(|id| self.sidebar.position(id)) {
            Some(current) => current.saturating_add_signed(delta).min(count - 1),
            None if delta >= 0 => 0,
            None => return,
        };
        let id = self.sidebar.entries()[target].id.clone();
        self.navigator.scroll_to(&mut self.page, &id);
    }

    /// Copy the first code block in view.
    pub fn copy_visible_code(&mut self, now: Instant) {
        match self.page.first_visible_code() {
            Some(block) => self.copy_block(block, now),
            None => self.message = Some("No code block in view".to_string()),
        }
    }

    fn copy_block(&mut self, block: usize, now: Instant) {
        if self.page.copy(block, self.clipboard.as_mut(), now) {
            self.message = None;
        } else {
            self.message = Some("Copy failed".to_string());
        }
    }

    fn close_overlay_after_navigation(&mut self) {
        if self.is_narrow() {
            self.sidebar.close();
        }
    }

    #[must_use]
    /// Topmost click target under `(column, row)`.
    pub fn hit_at(&self, column: u16, row: u16) -> Option<HitTarget> {
        let position = Position::new(column, row);
        self.hits
            .iter()
            .rev()
            .find(|hit| hit.area.contains(position))
            .map(|hit| hit.target)
    }

    fn hit_any(&self, column: u16, row: u16, accept: impl Fn(HitTarget) -> bool) -> bool {
        let position = Position::new(column, row);
        self.hits
            .iter()
            .any(|hit| hit.area.contains(position) && accept(hit.target))
    }

    /// Route a mouse event.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll_rows(3),
            MouseEventKind::ScrollUp => self.scroll_rows(-3),
            MouseEventKind::Down(MouseButton::Left) => self.click(mouse.column, mouse.row, now),
            _ => {}
        }
    }

    /// Handle a left click at `(column, row)`.
    pub fn click(&mut self, column: u16, row: u16, now: Instant) {
        let in_sidebar = self.hit_any(column, row, |t| {
            matches!(t, HitTarget::Sidebar | HitTarget::SidebarToggle)
        });
        if !in_sidebar {
            self.sidebar.outside_click(self.width);
        }
        let in_search = self.hit_any(column, row, |t| {
            matches!(
                t,
                HitTarget::SearchInput | HitTarget::ResultPanel | HitTarget::SearchResult(_)
            )
        });
        if !in_search {
            self.search.dismiss();
            self.focus = Focus::Content;
        }

        match self.hit_at(column, row) {
            Some(HitTarget::SidebarToggle) => {
                self.sidebar.toggle(self.width);
            }
            Some(HitTarget::SearchInput) => self.focus = Focus::Search,
            Some(HitTarget::SearchResult(index)) => {
                if self.search.activate(index, &self.navigator, &mut self.page) {
                    self.focus = Focus::Content;
                    self.close_overlay_after_navigation();
                }
            }
            Some(HitTarget::NavEntry(index)) => {
                self.sidebar
                    .activate(index, self.width, &self.navigator, &mut self.page);
            }
            Some(HitTarget::Page(PageAction::Copy(block))) => self.copy_block(block, now),
            Some(HitTarget::Page(PageAction::Sort { block, column })) => {
                if self.page.sort(block, column) {
                    self.after_layout();
                }
            }
            Some(HitTarget::Sidebar | HitTarget::ResultPanel) | None => {}
        }
    }
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
