//! The capability interface between page logic and whatever renders the page.
//!
//! Indexing, search and navigation only ever need to list labeled sections, read their text,
//! ask where they sit, and request a scroll. Keeping that behind [`Surface`] lets the terminal
//! page and the test fake share every code path above it.

#[derive(Clone, Debug, PartialEq, Eq)]
/// A labeled container as the surface currently presents it.
pub struct SectionNode {
    /// Stable identifier.
    pub id: String,
    /// Heading text, absent when the container has no title.
    pub heading: Option<String>,
    /// Full rendered text content, heading included.
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Vertical extent of a labeled section, in page units.
pub struct SectionBounds {
    /// Section identifier.
    pub id: String,
    /// Offset of the section's top edge from the top of the page.
    pub top: i64,
    /// Height of the section.
    pub height: i64,
}

impl SectionBounds {
    #[must_use]
    /// Offset one past the section's bottom edge.
    pub const fn bottom(&self) -> i64 {
        self.top + self.height
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Scroll state of the visible window onto the page, in page units.
pub struct Viewport {
    /// Offset of the viewport's top edge from the top of the page.
    pub scroll_top: i64,
    /// Height of the visible window.
    pub height: i64,
    /// Total height of the laid-out page.
    pub document_height: i64,
}

impl Viewport {
    #[must_use]
    /// Largest reachable scroll offset.
    pub const fn max_scroll(&self) -> i64 {
        let max = self.document_height - self.height;
        if max > 0 {
            max
        } else {
            0
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// How a scroll request should be carried out.
pub enum ScrollBehavior {
    /// Animate toward the target over several frames.
    Smooth,
    /// Jump straight to the target.
    Instant,
}

/// Read and scroll access to a rendered documentation page.
pub trait Surface {
    /// Every labeled section in document order.
    fn sections(&self) -> Vec<SectionNode>;

    /// Geometry of every labeled section in document order.
    fn section_bounds(&self) -> Vec<SectionBounds>;

    /// Top offset of the section labeled `id`, if it exists.
    fn element_top(&self, id: &str) -> Option<i64> {
        self.section_bounds()
            .into_iter()
            .find(|b| b.id == id)
            .map(|b| b.top)
    }

    /// Current scroll state.
    fn viewport(&self) -> Viewport;

    /// Request a scroll so that `top` sits at the top of the viewport.
    ///
    /// Implementations clamp the target to the scrollable range.
    fn scroll_to(&mut self, top: i64, behavior: ScrollBehavior);
}
