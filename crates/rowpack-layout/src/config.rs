//! Row calculator configuration.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// Default maximum row height in pixels.
pub const DEFAULT_MAX_ROW_HEIGHT: u32 = 600;

/// Minimum row height as a fraction of the maximum.
pub const MIN_ROW_HEIGHT_RATIO: f32 = 0.5;

/// Height used when a row would grow taller than the maximum, as a fraction
/// of the maximum.
pub const OVERFLOW_ROW_HEIGHT_RATIO: f32 = 0.75;

/// Construction-time settings for a [`crate::RowCalculator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowConfig {
    /// Maximum allowed height of any row.
    pub max_row_height: u32,
    /// Spacing between neighbouring items in a row (not at row edges).
    pub horizontal_padding: u32,
}

impl Default for RowConfig {
    fn default() -> Self {
        Self {
            max_row_height: DEFAULT_MAX_ROW_HEIGHT,
            horizontal_padding: 0,
        }
    }
}

impl RowConfig {
    /// Create a validated configuration.
    pub fn new(max_row_height: u32, horizontal_padding: u32) -> Result<Self> {
        let config = Self {
            max_row_height,
            horizontal_padding,
        };
        config.validate()?;
        Ok(config)
    }

    /// Set the maximum row height.
    #[must_use]
    pub const fn with_max_row_height(mut self, max_row_height: u32) -> Self {
        self.max_row_height = max_row_height;
        self
    }

    /// Set the spacing between items.
    #[must_use]
    pub const fn with_horizontal_padding(mut self, horizontal_padding: u32) -> Self {
        self.horizontal_padding = horizontal_padding;
        self
    }

    /// Check the configuration can produce rows.
    pub fn validate(&self) -> Result<()> {
        if self.max_row_height == 0 {
            return Err(LayoutError::InvalidConfig(
                "max_row_height must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Smallest height a row may take.
    #[must_use]
    pub fn min_row_height(&self) -> u32 {
        (self.max_row_height as f32 * MIN_ROW_HEIGHT_RATIO) as u32
    }

    /// Height given to rows whose natural height exceeds the maximum.
    #[must_use]
    pub fn overflow_row_height(&self) -> f32 {
        self.max_row_height as f32 * OVERFLOW_ROW_HEIGHT_RATIO
    }
}
