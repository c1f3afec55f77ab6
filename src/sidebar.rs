//! Sidebar navigation: one entry per labeled section, plus overlay behaviour on narrow screens.
//!
//! On a wide terminal the sidebar is always shown and the overlay flag stays down. At or below
//! the narrow width it becomes an overlay toggled by the reader and closed by navigation, by a
//! click elsewhere, or by Escape. A settled resize back to a wide terminal resets the overlay.

use crate::navigation::Navigator;
use crate::section::Section;
use crate::surface::Surface;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// One navigation link.
pub struct NavEntry {
    /// Target section id.
    pub id: String,
    /// Cleaned section title.
    pub title: String,
}

#[derive(Clone, Debug)]
/// Generated navigation list and overlay state.
pub struct Sidebar {
    entries: Vec<NavEntry>,
    visible: bool,
    narrow_width: u16,
}

impl Sidebar {
    #[must_use]
    /// Build the navigation list from an index of the page.
    pub fn generate(sections: &[Section], narrow_width: u16) -> Self {
        let entries = sections
            .iter()
            .map(|s| NavEntry {
                id: s.id.clone(),
                title: s.title.clone(),
            })
            .collect();
        Self {
            entries,
            visible: false,
            narrow_width,
        }
    }

    #[must_use]
    /// Navigation entries in document order.
    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    #[must_use]
    /// Position of the entry for section `id`.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    #[must_use]
    /// Whether the overlay is open.
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    /// Whether `width` is in the overlay regime.
    pub const fn is_narrow(&self, width: u16) -> bool {
        width <= self.narrow_width
    }

    #[must_use]
    /// Whether the sidebar is on screen at `width`.
    pub const fn is_shown(&self, width: u16) -> bool {
        !self.is_narrow(width) || self.visible
    }

    /// Flip the overlay. Only applies on narrow terminals.
    pub fn toggle(&mut self, width: u16) -> bool {
        if !self.is_narrow(width) {
            return false;
        }
        self.visible = !self.visible;
        tracing::debug!(visible = self.visible, "sidebar toggled");
        true
    }

    /// Open the overlay.
    pub fn open(&mut self) {
        self.visible = true;
    }

    /// Close the overlay.
    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Navigate to entry `index`, closing the overlay on narrow terminals.
    pub fn activate<S: Surface + ?Sized>(
        &mut self,
        index: usize,
        width: u16,
        navigator: &Navigator,
        surface: &mut S,
    ) -> bool {
        let Some(entry) = self.entries.get(index) else {
            return false;
        };
        let scrolled = navigator.scroll_to(surface, &entry.id);
        if self.is_narrow(width) {
            self.close();
        }
        scrolled
    }

    /// A click landed outside the sidebar and its toggle.
    pub fn outside_click(&mut self, width: u16) {
        if self.is_narrow(width) && self.visible {
            self.close();
        }
    }

    /// Escape was pressed. Returns whether it closed the overlay.
    pub fn escape(&mut self) -> bool {
        let was_visible = self.visible;
        self.close();
        was_visible
    }

    /// Layout check after a resize has settled at `width`.
    pub fn settle_width(&mut self, width: u16) {
        if !self.is_narrow(width) && self.visible {
            tracing::debug!(width, "wide layout restored, resetting sidebar overlay");
            self.close();
        }
    }
}

#[cfg(test)]
#[path = "tests/sidebar.rs"]
mod tests;
