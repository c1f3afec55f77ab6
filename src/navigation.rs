//! The navigation controller: scroll-to-section and scroll-spy.
//!
//! Scrolling leaves a fixed header gap above the target. Scroll-spy follows intersection
//! observer semantics: it watches a horizontal band of the viewport and only reacts when a
//! section enters that band, at which point that section's entry becomes the only active one.

use crate::surface::{ScrollBehavior, SectionBounds, Surface, Viewport};
use std::collections::HashSet;

/// Space kept above a navigation target, in page units.
pub const DEFAULT_HEADER_OFFSET: i64 = 20;

#[derive(Clone, Copy, Debug)]
/// Maps section ids to smooth scroll requests.
pub struct Navigator {
    header_offset: i64,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(DEFAULT_HEADER_OFFSET)
    }
}

impl Navigator {
    #[must_use]
    /// Navigator reserving `header_offset` units above each target.
    pub const fn new(header_offset: i64) -> Self {
        Self { header_offset }
    }

    #[must_use]
    /// Scroll offset that brings section `id` just below the header gap.
    pub fn target_offset<S: Surface + ?Sized>(&self, surface: &S, id: &str) -> Option<i64> {
        surface.element_top(id).map(|top| top - self.header_offset)
    }

    /// Smooth-scroll to section `id`. Unknown ids are ignored.
    ///
    /// Returns whether a scroll was requested.
    pub fn scroll_to<S: Surface + ?Sized>(&self, surface: &mut S, id: &str) -> bool {
        let Some(offset) = self.target_offset(surface, id) else {
            tracing::debug!(id, "navigation target missing");
            return false;
        };
        tracing::debug!(id, offset, "scrolling to section");
        surface.scroll_to(offset, ScrollBehavior::Smooth);
        true
    }
}

#[derive(Clone, Debug)]
/// Tracks which section is in the reading band of the viewport.
pub struct ScrollSpy {
    band_top: f64,
    band_bottom: f64,
    intersecting: HashSet<String>,
    active: Option<String>,
}

impl ScrollSpy {
    #[must_use]
    /// Spy whose band excludes `band_top` of the viewport from the top and `band_bottom` from
    /// the bottom, both as fractions of the viewport height.
    pub fn new(band_top: f64, band_bottom: f64) -> Self {
        Self {
            band_top: band_top.clamp(0.0, 1.0),
            band_bottom: band_bottom.clamp(0.0, 1.0),
            intersecting: HashSet::new(),
            active: None,
        }
    }

    #[must_use]
    /// Id of the section whose navigation entry is active.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    /// Page offsets `[start, end)` of the observed band for `viewport`.
    pub fn band(&self, viewport: &Viewport) -> (i64, i64) {
        let height = viewport.height as f64;
        let start = viewport.scroll_top + (height * self.band_top).round() as i64;
        let end = viewport.scroll_top + (height * (1.0 - self.band_bottom)).round() as i64;
        (start, end.max(start))
    }

    /// Record section positions after a scroll or layout change.
    ///
    /// Returns whether the active section changed.
    pub fn observe(&mut self, bounds: &[SectionBounds], viewport: &Viewport) -> bool {
        let (start, end) = self.band(viewport);
        let mut entered = None;
        let mut now_intersecting = HashSet::new();
        for section in bounds {
            if section.top < end && section.bottom() > start {
                if !self.intersecting.contains(&section.id) {
                    entered = Some(section.id.clone());
                }
                now_intersecting.insert(section.id.clone());
            }
        }
        self.intersecting = now_intersecting;

        match entered {
            Some(id) if self.active.as_deref() != Some(id.as_str()) => {
                tracing::trace!(id, "active section changed");
                self.active = Some(id);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "tests/navigation.rs"]
mod tests;
