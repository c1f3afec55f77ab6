//! The in-page search controller: debounced input, fresh indexing, rendering and dispatch.
//!
//! Keystrokes only update the input and restart the debounce. When the quiet period elapses
//! the latest input is run against a fresh index of the surface and the rendered list replaces
//! the previous one. Activating an entry navigates to its section and hides the list.

use crate::debounce::Debouncer;
use crate::navigation::Navigator;
use crate::query::{self, Query, SearchLimits};
use crate::results::{self, ResultList};
use crate::section;
use crate::surface::Surface;
use std::time::{Duration, Instant};

#[derive(Debug)]
/// Owns the search box state for one page session.
pub struct SearchController {
    input: String,
    pending: Debouncer<String>,
    limits: SearchLimits,
    current: Option<Query>,
    results: ResultList,
    selected: usize,
}

impl SearchController {
    #[must_use]
    /// Controller that waits `delay` after the last keystroke before searching.
    pub fn new(delay: Duration, limits: SearchLimits) -> Self {
        Self {
            input: String::new(),
            pending: Debouncer::new(delay),
            limits,
            current: None,
            results: ResultList::Hidden,
            selected: 0,
        }
    }

    #[must_use]
    /// Text currently in the search box.
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    /// The list currently displayed.
    pub const fn results(&self) -> &ResultList {
        &self.results
    }

    #[must_use]
    /// The query behind the displayed list.
    pub const fn current_query(&self) -> Option<&Query> {
        self.current.as_ref()
    }

    #[must_use]
    /// Index of the highlighted entry, when there are entries.
    pub fn selected(&self) -> Option<usize> {
        (!self.results.entries().is_empty()).then_some(self.selected)
    }

    #[must_use]
    /// When the pending search becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.deadline()
    }

    /// Replace the search box contents and restart the debounce.
    pub fn set_input(&mut self, value: impl Into<String>, now: Instant) {
        self.input = value.into();
        self.pending.schedule(now, self.input.trim().to_string());
    }

    /// Append a typed character.
    pub fn push_char(&mut self, c: char, now: Instant) {
        let mut value = std::mem::take(&mut self.input);
        value.push(c);
        self.set_input(value, now);
    }

    /// Delete the last character.
    pub fn pop_char(&mut self, now: Instant) {
        let mut value = std::mem::take(&mut self.input);
        value.pop();
        self.set_input(value, now);
    }

    /// Run the pending search if its quiet period has elapsed.
    ///
    /// Returns whether a search was performed.
    pub fn poll<S: Surface + ?Sized>(&mut self, surface: &S, now: Instant) -> bool {
        match self.pending.fire_due(now) {
            Some(query) => {
                self.perform_search(&query, surface);
                true
            }
            None => false,
        }
    }

    /// Search `surface` for `input` immediately and replace the displayed list.
    ///
    /// Short queries hide the list instead.
    pub fn perform_search<S: Surface + ?Sized>(&mut self, input: &str, surface: &S) {
        let query = Query::new(input);
        self.selected = 0;
        if !query.is_searchable(self.limits.min_query_len) {
            self.results = ResultList::Hidden;
            self.current = None;
            return;
        }
        let sections = section::index(surface);
        let found = query::search(&query, &sections, &self.limits);
        tracing::debug!(query = query.raw(), results = found.len(), "search performed");
        self.results = results::render(&found, query.raw());
        self.current = Some(query);
    }

    /// Move the highlight to the next entry, wrapping around.
    pub fn select_next(&mut self) {
        let count = self.results.entries().len();
        if count > 0 {
            self.selected = (self.selected + 1) % count;
        }
    }

    /// Move the highlight to the previous entry, wrapping around.
    pub fn select_prev(&mut self) {
        let count = self.results.entries().len();
        if count > 0 {
            self.selected = (self.selected + count - 1) % count;
        }
    }

    /// Navigate to entry `index` and hide the list.
    ///
    /// The placeholder and out-of-range indices are not interactive.
    pub fn activate<S: Surface + ?Sized>(
        &mut self,
        index: usize,
        navigator: &Navigator,
        surface: &mut S,
    ) -> bool {
        let Some(entry) = self.results.entries().get(index) else {
            return false;
        };
        let id = entry.section_id.clone();
        navigator.scroll_to(surface, &id);
        self.dismiss();
        true
    }

    /// Activate the highlighted entry.
    pub fn activate_selected<S: Surface + ?Sized>(
        &mut self,
        navigator: &Navigator,
        surface: &mut S,
    ) -> bool {
        self.selected()
            .is_some_and(|index| self.activate(index, navigator, surface))
    }

    /// Hide the list, leaving the input untouched.
    pub fn dismiss(&mut self) {
        self.results = ResultList::Hidden;
        self.selected = 0;
    }
}

#[cfg(test)]
#[path = "tests/search.rs"]
mod tests;
