use super::SearchController;
use crate::navigation::Navigator;
use crate::query::SearchLimits;
use crate::results::ResultList;
use crate::surface::{ScrollBehavior, Surface};
use crate::test_support::FakeSurface;
use std::time::{Duration, Instant};

const DELAY: Duration = Duration::from_millis(300);

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn docs() -> FakeSurface {
    FakeSurface::with_sections(&[
        ("intro", Some("1. Introduction"), "Introduction to the app"),
        ("install", Some("2. Install"), "Install the app with cargo"),
        ("config", Some("3. Config"), "Configure colours and themes"),
    ])
}

fn controller() -> SearchController {
    SearchController::new(DELAY, SearchLimits::default())
}

#[test]
fn test_typing_burst_runs_one_search_for_final_input() {
    let surface = docs();
    let mut search = controller();
    let start = Instant::now();

    search.push_char('a', start);
    search.push_char('p', start + ms(100));
    search.push_char('p', start + ms(200));

    assert!(!search.poll(&surface, start + ms(300)), "Still inside the quiet period");
    assert!(search.poll(&surface, start + ms(500)));
    assert!(!search.poll(&surface, start + ms(900)), "Only one search per burst");

    assert_eq!(surface.reads.get(), 1, "Exactly one index was built");
    assert_eq!(search.current_query().map(|q| q.raw()), Some("app"));
    assert_eq!(search.results().entries().len(), 2);
}

#[test]
fn test_short_query_hides_results_without_indexing() {
    let surface = docs();
    let mut search = controller();
    let start = Instant::now();

    search.set_input(" a ", start);
    search.poll(&surface, start + DELAY);

    assert_eq!(search.results(), &ResultList::Hidden);
    assert_eq!(surface.reads.get(), 0);
}

#[test]
fn test_shortening_query_hides_previous_results() {
    let surface = docs();
    let mut search = controller();
    let start = Instant::now();
    search.set_input("app", start);
    search.poll(&surface, start + DELAY);
    assert!(search.results().is_visible());

    search.pop_char(start + ms(400));
    search.pop_char(start + ms(450));
    search.poll(&surface, start + ms(750));

    assert_eq!(search.input(), "a");
    assert!(!search.results().is_visible());
    assert!(search.current_query().is_none());
}

#[test]
fn test_no_match_shows_placeholder() {
    let surface = docs();
    let mut search = controller();

    search.perform_search("zebra", &surface);

    assert_eq!(search.results(), &ResultList::NoResults);
    assert_eq!(search.selected(), None, "Placeholder cannot be selected");
}

#[test]
fn test_each_search_reindexes_the_surface() {
    let mut surface = docs();
    let mut search = controller();

    search.perform_search("cargo", &surface);
    assert_eq!(search.results().entries().len(), 1);

    surface.nodes[2].text.push_str(" and cargo features");
    search.perform_search("cargo", &surface);

    assert_eq!(search.results().entries().len(), 2, "New text is picked up");
    assert_eq!(surface.reads.get(), 2);
}

#[test]
fn test_activating_result_navigates_and_dismisses() {
    let mut surface = docs();
    let mut search = controller();
    search.perform_search("install", &surface);

    let entry = &search.results().entries()[0];
    assert_eq!(entry.title, "Install");

    assert!(search.activate(0, &Navigator::default(), &mut surface));

    assert_eq!(surface.scrolls, vec![(80, ScrollBehavior::Smooth)]);
    assert_eq!(search.results(), &ResultList::Hidden);
    assert_eq!(search.input(), "install", "Input is left as typed");
}

#[test]
fn test_out_of_range_activation_does_nothing() {
    let mut surface = docs();
    let mut search = controller();
    search.perform_search("install", &surface);

    assert!(!search.activate(4, &Navigator::default(), &mut surface));

    assert!(surface.scrolls.is_empty());
    assert!(search.results().is_visible());
}

#[test]
fn test_selection_wraps_both_ways() {
    let surface = docs();
    let mut search = controller();
    search.perform_search("app", &surface);
    assert_eq!(search.selected(), Some(0));

    search.select_prev();
    assert_eq!(search.selected(), Some(1));
    search.select_next();
    assert_eq!(search.selected(), Some(0));
}

#[test]
fn test_activate_selected_uses_highlight() {
    let mut surface = docs();
    let mut search = controller();
    search.perform_search("app", &surface);
    search.select_next();

    assert!(search.activate_selected(&Navigator::default(), &mut surface));

    assert_eq!(surface.viewport().scroll_top, 80, "Second result is install");
}

#[test]
fn test_deadline_tracks_pending_search() {
    let mut search = controller();
    let start = Instant::now();
    assert_eq!(search.deadline(), None);

    search.push_char('x', start);

    assert_eq!(search.deadline(), Some(start + DELAY));
}
