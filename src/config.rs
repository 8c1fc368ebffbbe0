//! Construction-time editor configuration.
//!
//! Values are fixed once a [`RichEditor`](crate::RichEditor) is built from
//! them. Every field has a default, so partial configs deserialize cleanly.

use crate::error::{Error, Result};
use crate::history::DEFAULT_HISTORY_SIZE;
use crate::style::{BulletStyle, LinkStyle, QuoteStyle};
use serde::{Deserialize, Serialize};

/// Decoration styles and history policy for one editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default)]
    pub bullet: BulletStyle,

    #[serde(default)]
    pub quote: QuoteStyle,

    /// Presentation applied to every link, including parsed ones.
    #[serde(default)]
    pub link: LinkStyle,

    #[serde(default = "default_true")]
    pub history_enabled: bool,

    /// Maximum number of undo snapshots. Must be positive when history is enabled.
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

fn default_true() -> bool {
    true
}

fn default_history_size() -> usize {
    DEFAULT_HISTORY_SIZE
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            bullet: BulletStyle::default(),
            quote: QuoteStyle::default(),
            link: LinkStyle::default(),
            history_enabled: true,
            history_size: DEFAULT_HISTORY_SIZE,
        }
    }
}

impl EditorConfig {
    #[must_use]
    pub fn with_bullet(mut self, bullet: BulletStyle) -> Self {
        self.bullet = bullet;
        self
    }

    #[must_use]
    pub fn with_quote(mut self, quote: QuoteStyle) -> Self {
        self.quote = quote;
        self
    }

    #[must_use]
    pub fn with_link(mut self, link: LinkStyle) -> Self {
        self.link = link;
        self
    }

    /// Enable or disable undo/redo.
    #[must_use]
    pub fn with_history(mut self, enabled: bool) -> Self {
        self.history_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_history_size(mut self, size: usize) -> Self {
        self.history_size = size;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHistorySize`] when history is enabled with a
    /// size of zero.
    ///
    /// ```
    /// use quillspan::{EditorConfig, Error};
    ///
    /// let config = EditorConfig::default().with_history_size(0);
    /// assert_eq!(config.validate(), Err(Error::InvalidHistorySize { size: 0 }));
    /// assert!(config.with_history(false).validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.history_enabled && self.history_size == 0 {
            tracing::warn!(size = self.history_size, "rejecting editor config");
            return Err(Error::InvalidHistorySize {
                size: self.history_size,
            });
        }
        Ok(())
    }
}
