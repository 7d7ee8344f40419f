//! Component options.
//!
//! Every options struct has sensible defaults and builder-style setters, and
//! can be deserialized from JSON with any field omitted.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Behavior switches for table keyboard navigation.
///
/// # Example
///
/// ```
/// use weft::config::NavigationOptions;
///
/// let options = NavigationOptions::default().with_selection(true);
/// assert!(options.selection_enabled);
/// assert!(options.pagination_enabled);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationOptions {
    /// Space toggles the focused row; Escape clears the selection.
    ///
    /// Default: false
    pub selection_enabled: bool,

    /// PageUp/PageDown change pages.
    ///
    /// Default: true
    pub pagination_enabled: bool,
}

impl Default for NavigationOptions {
    fn default() -> Self {
        Self {
            selection_enabled: false,
            pagination_enabled: true,
        }
    }
}

impl NavigationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selection(mut self, enabled: bool) -> Self {
        self.selection_enabled = enabled;
        self
    }

    pub fn with_pagination(mut self, enabled: bool) -> Self {
        self.pagination_enabled = enabled;
        self
    }
}

/// Options for copy-to-clipboard affordances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CopyOptions {
    /// How long the "copied" flag stays raised, in milliseconds.
    ///
    /// Default: 2000
    pub reset_after_ms: u64,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            reset_after_ms: 2000,
        }
    }
}

impl CopyOptions {
    pub fn with_reset_after(mut self, delay: Duration) -> Self {
        self.reset_after_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn reset_after(&self) -> Duration {
        Duration::from_millis(self.reset_after_ms)
    }
}

/// Top-level options document.
///
/// ```json
/// {
///   "navigation": { "selection_enabled": true },
///   "copy": { "reset_after_ms": 1500 },
///   "page_size": 25
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeftConfig {
    pub navigation: NavigationOptions,
    pub copy: CopyOptions,
    /// Rows per page; `None` shows every row.
    pub page_size: Option<usize>,
}

impl WeftConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON options file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&text)?;
        log::debug!("[config] loaded {}", path.as_ref().display());
        Ok(config)
    }
}
