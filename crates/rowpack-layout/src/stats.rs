//! Counters describing how much work incremental layout saved.

use serde::Serialize;

/// Per-calculator layout counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LayoutStats {
    passes: usize,
    skipped: usize,
    rows_reused: usize,
    rows_computed: usize,
    items_laid_out: usize,
}

impl LayoutStats {
    /// Create zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_skip(&mut self) {
        self.passes += 1;
        self.skipped += 1;
    }

    pub(crate) fn record_pass(&mut self, rows_reused: usize, rows_computed: usize, items: usize) {
        self.passes += 1;
        self.rows_reused += rows_reused;
        self.rows_computed += rows_computed;
        self.items_laid_out += items;
    }

    /// Number of `add_items` calls seen.
    #[must_use]
    pub const fn passes(&self) -> usize {
        self.passes
    }

    /// Passes that found an identical item list and did nothing.
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.skipped
    }

    /// Rows carried over unchanged from a previous pass.
    #[must_use]
    pub const fn rows_reused(&self) -> usize {
        self.rows_reused
    }

    /// Rows produced by the packing search.
    #[must_use]
    pub const fn rows_computed(&self) -> usize {
        self.rows_computed
    }

    /// Items fed through the packing search.
    #[must_use]
    pub const fn items_laid_out(&self) -> usize {
        self.items_laid_out
    }

    /// Fraction of rows that were reused rather than computed.
    #[must_use]
    pub fn reuse_ratio(&self) -> f64 {
        let total = self.rows_reused + self.rows_computed;
        if total == 0 {
            0.0
        } else {
            self.rows_reused as f64 / total as f64
        }
    }

    /// Zero all counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
