//! Rows of laid-out items.

use serde::Serialize;
use std::fmt::{self, Write};

use crate::item::LayoutItem;

/// A horizontal run of items sharing one height.
///
/// Rows are built by the calculator and never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row<K, C = ()> {
    items: Vec<LayoutItem<K, C>>,
}

impl<K, C> Row<K, C> {
    pub(crate) fn new(items: Vec<LayoutItem<K, C>>) -> Self {
        debug_assert!(!items.is_empty(), "rows are never empty");
        Self { items }
    }

    /// Items in left-to-right order.
    #[must_use]
    pub fn items(&self) -> &[LayoutItem<K, C>] {
        &self.items
    }

    /// Number of items in the row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false for rows produced by the calculator.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Shared height of the row's items.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.items.first().map_or(0, |item| item.height)
    }

    /// Total width of the items plus the spacing between them.
    ///
    /// Saturates at `u32::MAX`.
    #[must_use]
    pub fn width(&self, horizontal_padding: u32) -> u32 {
        let gaps = self.items.len().saturating_sub(1) as u64 * u64::from(horizontal_padding);
        let items: u64 = self.items.iter().map(|item| u64::from(item.width)).sum();
        u32::try_from(items + gaps).unwrap_or(u32::MAX)
    }

    /// Stable identity for recomposition: item keys joined with `-`.
    ///
    /// Items without a key contribute a structural token instead: the
    /// aspect ratio's bit pattern and the resolved size, e.g. `3f800000@100x100`.
    #[must_use]
    pub fn key(&self) -> String
    where
        K: fmt::Display,
    {
        let mut key = String::new();
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                key.push('-');
            }
            match item.key() {
                Some(k) => {
                    let _ = write!(key, "{k}");
                }
                None => {
                    let _ = write!(
                        key,
                        "{:08x}@{}x{}",
                        item.aspect_ratio().to_bits(),
                        item.width,
                        item.height
                    );
                }
            }
        }
        key
    }
}
