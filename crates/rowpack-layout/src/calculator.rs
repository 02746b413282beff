//! Incremental row calculator.

use tracing::debug;

use crate::config::RowConfig;
use crate::diff::{first_difference_index, reusable_prefix};
use crate::error::Result;
use crate::item::Item;
use crate::packing::pack_rows;
use crate::row::Row;
use crate::stats::LayoutStats;

/// Packs items into justified rows and reuses unaffected rows across passes.
///
/// The calculator is meant to live as long as the surface it lays out. Each
/// pass hands it the full current item list; rows lying entirely before the
/// first changed index are kept as they are and only the tail is packed
/// again.
///
/// Rows are only valid for the width and items most recently supplied.
/// Changing the width does not invalidate anything by itself: call
/// [`RowCalculator::clear`] or use [`RowCalculator::layout`] when the width
/// changes under an unchanged item list.
#[derive(Debug, Clone)]
pub struct RowCalculator<K, C = ()> {
    config: RowConfig,
    available_width: u32,
    rows: Vec<Row<K, C>>,
    last_processed: Vec<Item<K, C>>,
    stats: LayoutStats,
}

impl<K, C> Default for RowCalculator<K, C> {
    fn default() -> Self {
        Self {
            config: RowConfig::default(),
            available_width: 0,
            rows: Vec::new(),
            last_processed: Vec::new(),
            stats: LayoutStats::default(),
        }
    }
}

impl<K, C> RowCalculator<K, C>
where
    K: Clone + PartialEq,
    C: Clone + PartialEq,
{
    /// Create a calculator with the given configuration.
    pub fn new(config: RowConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// Set the container width used by subsequent passes.
    ///
    /// Nothing is recomputed here.
    pub fn set_width(&mut self, width: u32) {
        self.available_width = width;
    }

    /// Container width used by the next pass.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.available_width
    }

    /// Configuration this calculator was built with.
    #[must_use]
    pub const fn config(&self) -> &RowConfig {
        &self.config
    }

    /// Lay out the full current item list.
    ///
    /// An identical list is a no-op. Otherwise every row ending at or before
    /// the first differing index is kept and the remaining items are packed
    /// from scratch.
    pub fn add_items(&mut self, items: &[Item<K, C>]) {
        let Some(diff_index) = first_difference_index(items, &self.last_processed) else {
            self.stats.record_skip();
            debug!(items = items.len(), "item list unchanged, skipping layout");
            return;
        };

        let (kept_rows, covered) = if !self.rows.is_empty() && diff_index > 0 {
            reusable_prefix(&self.rows, diff_index)
        } else {
            (0, 0)
        };
        self.rows.truncate(kept_rows);

        let tail = pack_rows(&items[covered..], &self.config, self.available_width);
        let computed = tail.len();
        self.rows.extend(tail);
        self.stats
            .record_pass(kept_rows, computed, items.len() - covered);

        debug!(
            diff_index,
            rows_reused = kept_rows,
            rows_computed = computed,
            width = self.available_width,
            "layout pass"
        );

        self.last_processed = items.to_vec();
    }

    /// Set the width and lay out `items`, starting over if the width changed.
    pub fn layout(&mut self, width: u32, items: &[Item<K, C>]) -> &[Row<K, C>] {
        if width != self.available_width {
            self.clear();
            self.set_width(width);
        }
        self.add_items(items);
        &self.rows
    }

    /// Rows from the most recent pass.
    #[must_use]
    pub fn rows(&self) -> &[Row<K, C>] {
        &self.rows
    }

    /// Counters accumulated over the calculator's lifetime.
    #[must_use]
    pub const fn stats(&self) -> &LayoutStats {
        &self.stats
    }

    /// Drop all rows and the remembered item list.
    ///
    /// The next pass lays out everything from scratch.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.last_processed.clear();
    }
}
