use super::{wrap, PageAction, TerminalPage};
use crate::code::{COPIED_LABEL, COPY_LABEL};
use crate::config::Config;
use crate::document::Block;
use crate::navigation::Navigator;
use crate::surface::{ScrollBehavior, Surface};
use crate::test_support::{sample_document, FakeClipboard};
use std::time::{Duration, Instant};

fn page() -> TerminalPage {
    let mut page = TerminalPage::new(sample_document(), &Config::defaults());
    page.set_viewport(80, 10, false);
    page
}

fn row_text(page: &TerminalPage, row: usize) -> String {
    page.rows()[row]
        .line
        .spans
        .iter()
        .map(|s| s.content.as_ref())
        .collect()
}

fn all_text(page: &TerminalPage) -> Vec<String> {
    (0..page.rows().len()).map(|r| row_text(page, r)).collect()
}

fn settle(page: &mut TerminalPage) {
    for _ in 0..100 {
        if !page.step_animation() {
            break;
        }
    }
}

#[test]
fn test_section_bounds_are_in_page_units() {
    let page = page();

    let bounds = page.section_bounds();

    let ids: Vec<&str> = bounds.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, ["1-getting-started", "tables-data", "api", "faq"]);
    let geometry: Vec<(i64, i64)> = bounds.iter().map(|b| (b.top, b.height)).collect();
    assert_eq!(geometry, [(50, 80), (130, 90), (220, 70), (290, 70)]);

    let viewport = page.viewport();
    assert_eq!(viewport.height, 100);
    assert_eq!(viewport.document_height, 360);
}

#[test]
fn test_navigation_animates_to_target() {
    let mut page = page();

    assert!(Navigator::default().scroll_to(&mut page, "api"));
    assert!(page.is_animating());
    assert_eq!(page.viewport().scroll_top, 0, "Smooth scroll starts in place");

    settle(&mut page);

    assert!(!page.is_animating());
    assert_eq!(page.viewport().scroll_top, 200);
    assert_eq!(page.scroll_row(), 20);
    assert_eq!(row_text(&page, page.scroll_row() + 2), "API Reference");
}

#[test]
fn test_scroll_requests_are_clamped() {
    let mut page = page();

    page.scroll_to(10_000, ScrollBehavior::Instant);
    assert_eq!(page.viewport().scroll_top, 260);

    page.scroll_to(-50, ScrollBehavior::Smooth);
    settle(&mut page);
    assert_eq!(page.viewport().scroll_top, 0);
}

#[test]
fn test_instant_scroll_cancels_animation() {
    let mut page = page();
    page.scroll_to(200, ScrollBehavior::Smooth);

    page.scroll_by_rows(3);

    assert!(!page.is_animating());
    assert_eq!(page.viewport().scroll_top, 30);
}

#[test]
fn test_sections_expose_rendered_text() {
    let page = page();

    let api = page
        .sections()
        .into_iter()
        .find(|s| s.id == "api")
        .unwrap();

    assert_eq!(api.heading.as_deref(), Some("API Reference"));
    assert_eq!(api.text, "API Reference\nCall the search function to search.");
}

#[test]
fn test_sortable_header_has_hotspot_and_sorts() {
    let mut page = page();

    let header = &page.rows()[16];
    assert_eq!(header.hotspots.len(), 1, "Only the date column is sortable");
    let hotspot = &header.hotspots[0];
    assert_eq!(hotspot.action, PageAction::Sort { block: 6, column: 1 });
    assert_eq!((hotspot.x, hotspot.width), (8, 10));

    assert!(page.sort(6, 1));

    let Block::Table(table) = &page.document().blocks[6] else {
        panic!("block 6 should be the table");
    };
    let names: Vec<&str> = table.rows.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(names, ["Alpha", "Beta", "Gamma"]);
    assert!(row_text(&page, 18).starts_with("Alpha"), "Layout follows the sort");
}

#[test]
fn test_unsortable_column_is_refused() {
    let mut page = page();

    assert!(!page.sort(6, 0));
    assert!(!page.sort(4, 0), "Block 4 is code, not a table");
}

#[test]
fn test_compact_layout_labels_every_cell() {
    let mut page = page();
    page.set_viewport(80, 10, true);

    let text = all_text(&page);

    assert!(text.iter().any(|t| t == "Name: Beta"));
    assert!(text.iter().any(|t| t == "Released: 2024-03-15"));
    let chips = text.iter().position(|t| t.starts_with("Sort: ")).unwrap();
    assert_eq!(
        page.rows()[chips].hotspots[0].action,
        PageAction::Sort { block: 6, column: 1 }
    );
}

#[test]
fn test_table_too_wide_for_grid_falls_back_to_stacked() {
    let mut page = page();
    page.set_viewport(15, 10, false);

    assert!(all_text(&page).iter().any(|t| t == "Name: Alpha"));
}

#[test]
fn test_copy_button_flips_label_and_reverts() {
    let mut page = page();
    let mut clipboard = FakeClipboard::default();
    let start = Instant::now();

    let header = &page.rows()[10];
    assert_eq!(header.hotspots[0].action, PageAction::Copy(4));
    assert!(row_text(&page, 10).ends_with(COPY_LABEL));

    assert!(page.copy(4, &mut clipboard, start));
    assert_eq!(clipboard.written, ["cargo install project"]);
    assert!(row_text(&page, 10).ends_with(COPIED_LABEL));
    assert_eq!(page.deadline(), Some(start + Duration::from_secs(2)));

    assert!(page.tick(start + Duration::from_secs(2)));
    assert!(row_text(&page, 10).ends_with(COPY_LABEL));
}

#[test]
fn test_code_lines_are_prefixed() {
    let page = page();

    assert_eq!(row_text(&page, 11), "│ cargo install project");
}

#[test]
fn test_first_visible_code_follows_scroll() {
    let mut page = page();
    assert_eq!(page.first_visible_code(), None, "Code starts at row 10");

    page.scroll_by_rows(1);
    assert_eq!(page.first_visible_code(), Some(4));

    page.scroll_end();
    assert_eq!(page.first_visible_code(), None);
}

#[test]
fn test_visible_rows_window() {
    let mut page = page();
    page.scroll_by_rows(30);

    assert_eq!(page.scroll_row(), 26, "Clamped to the last full screen");
    assert_eq!(page.visible_rows().len(), 10);
}

#[test]
fn test_wrap_splits_on_words_and_long_tokens() {
    assert_eq!(wrap("one two three", 7), ["one two", "three"]);
    assert_eq!(wrap("abcdefghij", 4), ["abcd", "efgh", "ij"]);
    assert_eq!(wrap("", 10), [""]);
}
