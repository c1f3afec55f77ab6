//! The UI renders the application state into something visible and clickable.
//!
//! A frame is a reading-progress bar, the body, and a one-line help bar. The body puts the
//! sidebar (search box, results, navigation) beside the page on wide terminals and over it on
//! narrow ones. Every clickable region drawn is recorded in [`AppState::hits`] so the next
//! mouse event can be resolved against what the reader actually saw.

use crate::app_state::{AppState, Focus, HitRegion, HitTarget};
use crate::progress;
use crate::results::{ResultList, NO_RESULTS};
use crate::surface::Surface;
use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph},
    Frame,
};

const SIDEBAR_WIDTH: u16 = 34;
const TOGGLE_LABEL: &str = "[≡ Contents]";
const SEARCH_PLACEHOLDER: &str = "Search documentation...";

/// Renders one frame and records its click targets.
pub fn draw(f: &mut Frame, app: &mut AppState) {
    app.hits.clear();
    let [progress_area, body, help_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(f.area());

    if app.is_narrow() {
        draw_page(f, app, body);
        if app.sidebar.is_visible() {
            let overlay = Rect {
                width: SIDEBAR_WIDTH.min(body.width),
                ..body
            };
            f.render_widget(Clear, overlay);
            draw_sidebar(f, app, overlay);
        }
    } else {
        let [side, content] =
            Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
                .areas(body);
        draw_page(f, app, content);
        draw_sidebar(f, app, side);
    }

    draw_progress(f, app, progress_area);
    draw_help(f, app, help_area);
}

fn record(app: &mut AppState, area: Rect, target: HitTarget) {
    if area.width > 0 && area.height > 0 {
        app.hits.push(HitRegion { area, target });
    }
}

fn draw_progress(f: &mut Frame, app: &AppState, area: Rect) {
    let viewport = app.page.viewport();
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Blue).bg(Color::Black))
        .use_unicode(true)
        .ratio(progress::ratio(&viewport))
        .label(format!("{:.0}%", progress::percent(&viewport)));
    f.render_widget(gauge, area);
}

fn draw_page(f: &mut Frame, app: &mut AppState, area: Rect) {
    let title = app
        .page
        .document()
        .title
        .clone()
        .unwrap_or_else(|| "Documentation".to_string());
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let narrow = app.is_narrow();
    app.page.set_viewport(inner.width, inner.height, narrow);
    app.after_layout();

    let rows = app.page.visible_rows();
    let mut lines = Vec::with_capacity(rows.len());
    for (offset, row) in (0_u16..).zip(rows) {
        lines.push(row.line.clone());
        for hotspot in &row.hotspots {
            if hotspot.x >= inner.width {
                continue;
            }
            let area = Rect {
                x: inner.x + hotspot.x,
                y: inner.y + offset,
                width: hotspot.width.min(inner.width - hotspot.x),
                height: 1,
            };
            app.hits.push(HitRegion {
                area,
                target: HitTarget::Page(hotspot.action),
            });
        }
    }
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_sidebar(f: &mut Frame, app: &mut AppState, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Contents");
    let inner = block.inner(area);
    f.render_widget(block, area);
    record(app, area, HitTarget::Sidebar);

    let results_height = match app.search.results() {
        ResultList::Hidden => 0,
        ResultList::NoResults => 3,
        ResultList::Entries(entries) => {
            u16::try_from(entries.len() * 2 + 2).unwrap_or(u16::MAX)
        }
    };
    let [input_area, results_area, nav_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(results_height),
        Constraint::Min(0),
    ])
    .areas(inner);

    draw_search_input(f, app, input_area);
    draw_results(f, app, results_area);
    draw_nav(f, app, nav_area);
}

fn draw_search_input(f: &mut Frame, app: &mut AppState, area: Rect) {
    let focused = app.focus == Focus::Search;
    let border = if focused {
        Style::default().fg(Color::Blue)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title("Search");
    let inner = block.inner(area);
    let text = if app.search.input().is_empty() && !focused {
        Line::from(Span::styled(
            SEARCH_PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::raw(app.search.input().to_string())
    };
    f.render_widget(Paragraph::new(text).block(block), area);
    if focused {
        let typed = u16::try_from(app.search.input().chars().count()).unwrap_or(u16::MAX);
        let x = inner.x + typed.min(inner.width.saturating_sub(1));
        f.set_cursor_position(Position::new(x, inner.y));
    }
    record(app, area, HitTarget::SearchInput);
}

fn draw_results(f: &mut Frame, app: &mut AppState, area: Rect) {
    if area.height == 0 {
        return;
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    record(app, area, HitTarget::ResultPanel);

    let highlight = Style::default().fg(Color::Black).bg(Color::Yellow);
    let selected = app.search.selected();
    let lines: Vec<Line> = match app.search.results() {
        ResultList::Hidden => return,
        ResultList::NoResults => vec![Line::from(Span::styled(
            NO_RESULTS,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))],
        ResultList::Entries(entries) => entries
            .iter()
            .enumerate()
            .flat_map(|(i, entry)| {
                let mut title = Style::default().add_modifier(Modifier::BOLD);
                if selected == Some(i) {
                    title = title.add_modifier(Modifier::REVERSED);
                }
                let snippet = entry
                    .snippet
                    .iter()
                    .map(|fragment| {
                        if fragment.highlighted {
                            Span::styled(fragment.text.clone(), highlight)
                        } else {
                            Span::styled(fragment.text.clone(), Style::default().fg(Color::Gray))
                        }
                    })
                    .collect::<Vec<_>>();
                [
                    Line::from(Span::styled(entry.title.clone(), title)),
                    Line::from(snippet),
                ]
            })
            .collect(),
    };

    let entry_count = app.search.results().entries().len();
    f.render_widget(Paragraph::new(lines).block(block), area);
    for (i, y) in (0..entry_count).zip((inner.y..inner.bottom()).step_by(2)) {
        let entry_area = Rect {
            y,
            height: 2_u16.min(inner.bottom() - y),
            ..inner
        };
        record(app, entry_area, HitTarget::SearchResult(i));
    }
}

fn draw_nav(f: &mut Frame, app: &mut AppState, area: Rect) {
    let active = app.spy.active();
    let items: Vec<ListItem> = app
        .sidebar
        .entries()
        .iter()
        .map(|entry| {
            if active == Some(entry.id.as_str()) {
                ListItem::new(Line::from(vec![
                    Span::styled("▸ ", Style::default().fg(Color::Cyan)),
                    Span::styled(
                        entry.title.clone(),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]))
            } else {
                ListItem::new(Line::raw(format!("  {}", entry.title)))
            }
        })
        .collect();
    let count = items.len();

    let mut state = ListState::default();
    state.select(active.and_then(|id| app.sidebar.position(id)));
    f.render_stateful_widget(List::new(items), area, &mut state);

    let offset = state.offset();
    for (index, y) in (offset..count).zip(area.y..area.bottom()) {
        record(
            app,
            Rect {
                y,
                height: 1,
                ..area
            },
            HitTarget::NavEntry(index),
        );
    }
}

fn draw_help(f: &mut Frame, app: &mut AppState, area: Rect) {
    let mut spans = Vec::new();
    let mut text_area = area;
    if app.is_narrow() {
        let width = u16::try_from(TOGGLE_LABEL.chars().count()).unwrap_or(u16::MAX);
        let toggle = Rect {
            width: width.min(area.width),
            ..area
        };
        record(app, toggle, HitTarget::SidebarToggle);
        f.render_widget(
            Paragraph::new(Span::styled(
                TOGGLE_LABEL,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            toggle,
        );
        text_area.x += toggle.width + 1;
        text_area.width = text_area.width.saturating_sub(toggle.width + 1);
    }

    if let Some(ref msg) = app.message {
        spans.push(Span::styled(msg.clone(), Style::default().fg(Color::Yellow)));
    } else {
        let help = match (app.focus, app.is_narrow()) {
            (Focus::Search, _) => "Type to search | ↑/↓: Select | Enter: Go | Esc: Close",
            (Focus::Content, true) => {
                "/: Search | Tab: Contents | [/]: Sections | y: Copy code | q: Quit"
            }
            (Focus::Content, false) => {
                "/: Search | [/]: Sections | y: Copy code | Click ↕ to sort | q: Quit"
            }
        };
        spans.push(Span::styled(help, Style::default().fg(Color::DarkGray)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), text_area);
}

#[cfg(test)]
#[path = "tests/ui.rs"]
mod tests;
