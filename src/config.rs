//! Configuration to acknowledge reader preferences as well as set defaults.
//!
//! We look for a lectern.toml (or the path given with `--config`) and load settings from it.
//! Every field has a default, so a partial file only overrides what it names and a missing or
//! malformed file leaves lectern with its built-in behaviour.

use facet::Facet;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE: &str = "lectern.toml";

#[derive(Facet, Clone, Debug)]
/// Reader preferences loaded from lectern.toml or falling back to defaults.
pub struct Config {
    #[facet(default = 300)]
    /// Quiet period after the last keystroke before a search runs.
    pub search_delay_ms: u64,
    #[facet(default = 250)]
    /// Quiet period after the last resize before the layout reset check runs.
    pub resize_delay_ms: u64,
    #[facet(default = 2000)]
    /// How long a copy button shows its confirmation.
    pub copy_feedback_ms: u64,
    #[facet(default = 2)]
    /// Shortest trimmed query that produces results.
    pub min_query_len: usize,
    #[facet(default = 5)]
    /// Upper bound on listed search results.
    pub max_results: usize,
    #[facet(default = 50)]
    /// Characters of context kept either side of a match in a snippet.
    pub snippet_radius: usize,
    #[facet(default = 20)]
    /// Space reserved above a navigation target, in page units.
    pub header_offset: i64,
    #[facet(default = 10)]
    /// Height of one terminal row, in page units.
    pub row_height: i64,
    #[facet(default = 0.2)]
    /// Fraction of the viewport excluded from the top of the scroll-spy band.
    pub spy_band_top: f64,
    #[facet(default = 0.3)]
    /// Fraction of the viewport excluded from the bottom of the scroll-spy band.
    pub spy_band_bottom: f64,
    #[facet(default = 100)]
    /// Terminal width (columns) at or below which the compact layout applies.
    pub narrow_width: u16,
    #[facet(default = 2)]
    /// Heading level that opens a labeled content section.
    pub section_level: usize,
    #[facet(default = "base16-ocean.dark".to_string())]
    /// Syntect theme used for code blocks.
    pub theme: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    #[must_use]
    /// Built-in settings, as if an empty lectern.toml had been read.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration cannot be parsed.
    pub fn defaults() -> Self {
        facet_toml::from_str::<Self>("").expect("empty config parses to defaults")
    }

    #[must_use]
    /// Load configuration from `path`, or from lectern.toml when no path is given.
    pub fn load(path: Option<&Path>) -> Self {
        let path = path.unwrap_or_else(|| Path::new(CONFIG_FILE));
        let Ok(contents) = fs::read_to_string(path) else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Self::defaults();
        };
        if let Ok(config) = facet_toml::from_str::<Self>(&contents) {
            tracing::debug!(path = %path.display(), "loaded config");
            config
        } else {
            tracing::warn!(path = %path.display(), "malformed config, using defaults");
            Self::defaults()
        }
    }

    #[must_use]
    /// Search input debounce window.
    pub const fn search_delay(&self) -> Duration {
        Duration::from_millis(self.search_delay_ms)
    }

    #[must_use]
    /// Resize debounce window.
    pub const fn resize_delay(&self) -> Duration {
        Duration::from_millis(self.resize_delay_ms)
    }

    #[must_use]
    /// Copy confirmation lifetime.
    pub const fn copy_feedback(&self) -> Duration {
        Duration::from_millis(self.copy_feedback_ms)
    }

    #[must_use]
    /// Whether a terminal of `width` columns gets the compact layout.
    pub const fn is_narrow(&self, width: u16) -> bool {
        width <= self.narrow_width
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
