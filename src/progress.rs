//! Reading progress: how far through the scrollable extent of the page the reader is.

use crate::surface::Viewport;

#[must_use]
#[allow(clippy::cast_precision_loss)]
/// Percentage of the page scrolled past, clamped to `0..=100`.
///
/// A page that fits in the viewport counts as fully read.
pub fn percent(viewport: &Viewport) -> f64 {
    let scrollable = viewport.document_height - viewport.height;
    if scrollable <= 0 {
        return 100.0;
    }
    (viewport.scroll_top as f64 / scrollable as f64 * 100.0).clamp(0.0, 100.0)
}

#[must_use]
/// Progress as a `0.0..=1.0` ratio for gauges.
pub fn ratio(viewport: &Viewport) -> f64 {
    percent(viewport) / 100.0
}

#[cfg(test)]
#[path = "tests/progress.rs"]
mod tests;
