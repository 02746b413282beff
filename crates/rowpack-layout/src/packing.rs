//! Row-packing search.
//!
//! For each row start, candidate rows of 1, 2, 3, ... items are scored by
//! how closely their truncated widths fill the effective width. The search
//! commits the best candidate as soon as adding another item makes the score
//! strictly worse. This assumes the score is unimodal in the item count; it
//! is a greedy approximation, not an exhaustive optimum.

use tracing::trace;

use crate::config::RowConfig;
use crate::item::{Item, LayoutItem};
use crate::row::Row;

/// The committed shape of the next row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RowPlan {
    /// Number of items taken from the front of the segment.
    pub len: usize,
    /// Available width minus the gaps between `len` items.
    pub effective_width: u32,
    /// Clamped row height before truncation.
    pub row_height: f32,
    /// The natural height exceeded the maximum and the overflow height was
    /// used instead; such rows may underfill.
    pub overflow: bool,
}

/// Width left for items once the gaps between `count` items are removed.
///
/// Saturates at zero when the gaps alone exceed the available width.
pub(crate) fn effective_width(available_width: u32, horizontal_padding: u32, count: usize) -> u32 {
    let gaps = count.saturating_sub(1) as u64 * u64::from(horizontal_padding);
    u64::from(available_width).saturating_sub(gaps) as u32
}

/// Height of a row whose items have the given aspect ratio sum, and
/// whether the overflow height was used.
///
/// A row taller than the maximum gets the overflow height; anything else is
/// clamped into `[min_row_height, max_row_height]`.
pub(crate) fn row_height(
    config: &RowConfig,
    effective_width: u32,
    aspect_ratio_sum: f32,
) -> (f32, bool) {
    let min = config.min_row_height() as f32;
    let max = config.max_row_height as f32;
    if aspect_ratio_sum <= 0.0 {
        return (min, false);
    }

    let natural = effective_width as f32 / aspect_ratio_sum;
    if natural > max {
        return (config.overflow_row_height(), true);
    }
    (natural.clamp(min, max), false)
}

/// Truncated width of one item, never wider than the row.
pub(crate) fn item_width(row_height: f32, aspect_ratio: f32, effective_width: u32) -> u32 {
    ((row_height * aspect_ratio) as u32).min(effective_width)
}

/// Mean absolute deviation of the candidate's width from a perfect fill.
fn row_score<K, C>(items: &[Item<K, C>], effective_width: u32, row_height: f32) -> f32 {
    let total: u64 = items
        .iter()
        .map(|item| u64::from(item_width(row_height, item.aspect_ratio(), effective_width)))
        .sum();
    total.abs_diff(u64::from(effective_width)) as f32 / items.len() as f32
}

/// Pick the number of leading items of `items` that forms the next row.
///
/// `items` must not be empty.
pub(crate) fn find_best_row<K, C>(
    items: &[Item<K, C>],
    config: &RowConfig,
    available_width: u32,
) -> RowPlan {
    let mut best = RowPlan {
        len: 1,
        effective_width: 0,
        row_height: 0.0,
        overflow: false,
    };
    let mut best_score = f32::INFINITY;
    let mut aspect_ratio_sum = 0.0f32;

    for (i, item) in items.iter().enumerate() {
        let len = i + 1;
        aspect_ratio_sum += item.aspect_ratio();
        let effective = effective_width(available_width, config.horizontal_padding, len);
        // Nothing fits beside the first item once the gaps eat the width.
        if len > 1 && effective == 0 {
            break;
        }
        let (height, overflow) = row_height(config, effective, aspect_ratio_sum);
        let score = row_score(&items[..len], effective, height);

        if score > best_score {
            break;
        }

        best_score = score;
        best = RowPlan {
            len,
            effective_width: effective,
            row_height: height,
            overflow,
        };
    }

    best
}

/// Resolve final pixel sizes for the first `plan.len` items.
///
/// Widths are truncated individually, then every row except an overflow
/// row is made to span the effective width exactly: an overfilled row is
/// scaled down proportionally, and the remaining shortfall goes to the last
/// item.
pub(crate) fn resolve_row<K: Clone, C: Clone>(items: &[Item<K, C>], plan: RowPlan) -> Row<K, C> {
    let height = plan.row_height as u32;
    let mut laid: Vec<LayoutItem<K, C>> = items[..plan.len]
        .iter()
        .map(|item| LayoutItem {
            item: item.clone(),
            width: item_width(plan.row_height, item.aspect_ratio(), plan.effective_width),
            height,
        })
        .collect();

    if !plan.overflow {
        fill_width(&mut laid, plan.effective_width);
    }

    Row::new(laid)
}

fn fill_width<K, C>(laid: &mut [LayoutItem<K, C>], effective_width: u32) {
    let target = u64::from(effective_width);
    let mut total: u64 = laid.iter().map(|item| u64::from(item.width)).sum();

    if total > target {
        for item in laid.iter_mut() {
            item.width = (u64::from(item.width) * target / total) as u32;
        }
        total = laid.iter().map(|item| u64::from(item.width)).sum();
    }

    if total < target {
        if let Some(last) = laid.last_mut() {
            last.width += (target - total) as u32;
        }
    }
}

/// Partition `items` into rows, front to back.
pub(crate) fn pack_rows<K: Clone, C: Clone>(
    items: &[Item<K, C>],
    config: &RowConfig,
    available_width: u32,
) -> Vec<Row<K, C>> {
    let mut rows = Vec::new();
    let mut current = 0;

    while current < items.len() {
        let segment = &items[current..];
        let plan = find_best_row(segment, config, available_width);
        trace!(
            start = current,
            len = plan.len,
            row_height = plan.row_height,
            effective_width = plan.effective_width,
            "committed row"
        );
        rows.push(resolve_row(segment, plan));
        current += plan.len;
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn config() -> RowConfig {
        RowConfig::new(600, 8).unwrap()
    }

    fn items(ratios: &[f32]) -> Vec<Item<usize>> {
        ratios
            .iter()
            .enumerate()
            .map(|(i, r)| Item::keyed(*r, i, ()).unwrap())
            .collect()
    }

    #[test]
    fn test_effective_width() {
        assert_eq!(effective_width(1000, 8, 1), 1000);
        assert_eq!(effective_width(1000, 8, 2), 992);
        assert_eq!(effective_width(1000, 8, 4), 976);
    }

    #[test]
    fn test_effective_width_saturates() {
        assert_eq!(effective_width(10, 8, 3), 0);
        assert_eq!(effective_width(0, 0, 5), 0);
    }

    #[test]
    fn test_row_height_within_bounds() {
        assert_eq!(row_height(&config(), 992, 2.0), (496.0, false));
    }

    #[test]
    fn test_row_height_clamps_to_min() {
        assert_eq!(row_height(&config(), 1000, 10.0), (300.0, false));
    }

    #[test]
    fn test_row_height_overflow() {
        assert_eq!(row_height(&config(), 1000, 0.5), (450.0, true));
    }

    #[test]
    fn test_row_height_zero_sum_uses_min() {
        assert_eq!(row_height(&config(), 1000, 0.0), (300.0, false));
    }

    #[test]
    fn test_item_width_capped() {
        assert_eq!(item_width(300.0, 10.0, 1000), 1000);
        assert_eq!(item_width(450.0, 0.5, 1000), 225);
        assert_eq!(item_width(328.0, 1.0, 984), 328);
    }

    #[test]
    fn test_find_best_row_two_squares() {
        let plan = find_best_row(&items(&[1.0, 1.0]), &config(), 1000);
        assert_eq!(plan.len, 2);
        assert_eq!(plan.effective_width, 992);
        assert_eq!(plan.row_height, 496.0);
    }

    #[test]
    fn test_find_best_row_ties_keep_growing() {
        // Two and three squares both fill exactly; the larger row wins.
        let plan = find_best_row(&items(&[1.0, 1.0, 1.0, 1.0]), &config(), 1000);
        assert_eq!(plan.len, 3);
        assert_eq!(plan.row_height, 328.0);
    }

    #[test]
    fn test_find_best_row_single_item() {
        let plan = find_best_row(&items(&[0.5]), &config(), 1000);
        assert_eq!(plan.len, 1);
        assert_eq!(plan.row_height, 450.0);
    }

    #[test]
    fn test_resolve_row_assigns_remainder_to_last() {
        // 1000 / 3 = 333.33: truncation loses 1px which the last item takes.
        let config = RowConfig::new(400, 0).unwrap();
        let input = items(&[1.0, 1.0, 1.0]);
        let plan = find_best_row(&input, &config, 1000);
        assert_eq!(plan.len, 3);
        let row = resolve_row(&input, plan);
        let widths: Vec<u32> = row.items().iter().map(|i| i.width).collect();
        assert_eq!(widths, vec![333, 333, 334]);
        assert_eq!(row.width(0), 1000);
    }

    #[test]
    fn test_resolve_row_keeps_clamped_widths() {
        let input = items(&[0.5]);
        let row = resolve_row(&input, find_best_row(&input, &config(), 1000));
        assert_eq!(row.items()[0].width, 225);
        assert_eq!(row.height(), 450);
    }

    #[test]
    fn test_resolve_row_scales_overfilled_row() {
        // At the minimum height the pair is 90 + 1000 px wide; it is scaled
        // down to the 1000 px container.
        let config = RowConfig::new(600, 0).unwrap();
        let input = items(&[0.3, 5.0]);
        let plan = find_best_row(&input, &config, 1000);
        assert_eq!(plan.len, 2);
        assert!(!plan.overflow);

        let row = resolve_row(&input, plan);
        let widths: Vec<u32> = row.items().iter().map(|i| i.width).collect();
        assert_eq!(widths, vec![82, 918]);
        assert_eq!(row.height(), 300);
        assert_eq!(row.width(0), 1000);
    }

    #[test]
    fn test_find_best_row_marks_overflow() {
        let plan = find_best_row(&items(&[0.5]), &config(), 1000);
        assert!(plan.overflow);
    }

    #[test]
    fn test_find_best_row_stops_at_zero_effective_width() {
        let plan = find_best_row(&items(&[1.0; 5]), &config(), 0);
        assert_eq!(plan.len, 1);
        assert_eq!(plan.effective_width, 0);
    }

    #[test]
    fn test_pack_rows_padding_wider_than_container() {
        // Gaps alone exceed the width, so every item gets its own row.
        let config = RowConfig::new(600, 400).unwrap();
        let rows = pack_rows(&items(&[1.0, 1.0, 1.0]), &config, 300);
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.width(400) <= 300));
    }

    #[test]
    fn test_pack_rows_empty() {
        assert!(pack_rows(&items(&[]), &config(), 1000).is_empty());
    }

    #[test]
    fn test_pack_rows_three_plus_one() {
        let rows = pack_rows(&items(&[1.0; 4]), &config(), 1000);
        let lens: Vec<usize> = rows.iter().map(Row::len).collect();
        assert_eq!(lens, vec![3, 1]);
    }

    #[test]
    fn test_pack_rows_zero_width() {
        let rows = pack_rows(&items(&[1.0, 2.0]), &config(), 0);
        assert_eq!(rows.len(), 2);
        for row in &rows {
            assert_eq!(row.len(), 1);
            assert_eq!(row.height(), 300);
            assert!(row.items().iter().all(|i| i.width == 0));
        }
    }

    proptest! {
        #[test]
        fn prop_pack_rows_partitions_input(
            ratios in prop::collection::vec(0.1f32..5.0, 0..60),
            width in 100u32..3000,
            padding in 0u32..16,
        ) {
            let config = RowConfig::new(600, padding).unwrap();
            let input = items(&ratios);
            let rows = pack_rows(&input, &config, width);
            let flat: Vec<usize> = rows
                .iter()
                .flat_map(|row| row.items().iter().map(|i| *i.key().unwrap()))
                .collect();
            prop_assert_eq!(flat, (0..ratios.len()).collect::<Vec<_>>());
            prop_assert!(rows.iter().all(|row| !row.is_empty()));
        }

        #[test]
        fn prop_rows_share_height_within_bounds(
            ratios in prop::collection::vec(0.1f32..5.0, 1..60),
            width in 100u32..3000,
        ) {
            let config = RowConfig::new(600, 4).unwrap();
            let rows = pack_rows(&items(&ratios), &config, width);
            for row in &rows {
                let h = row.height();
                prop_assert!(row.items().iter().all(|i| i.height == h));
                prop_assert!(h >= config.min_row_height() && h <= config.max_row_height);
            }
        }

        #[test]
        fn prop_rows_never_exceed_available_width_by_truncation(
            ratios in prop::collection::vec(0.1f32..5.0, 1..60),
            width in 100u32..3000,
            padding in 0u32..16,
        ) {
            let config = RowConfig::new(600, padding).unwrap();
            let rows = pack_rows(&items(&ratios), &config, width);
            for row in &rows {
                let effective = effective_width(width, padding, row.len());
                prop_assert!(row.items().iter().all(|i| i.width <= effective));
            }
        }

        #[test]
        fn prop_rows_fit_available_width(
            ratios in prop::collection::vec(0.05f32..8.0, 1..60),
            width in 0u32..3000,
            padding in 0u32..32,
        ) {
            let config = RowConfig::new(600, padding).unwrap();
            let rows = pack_rows(&items(&ratios), &config, width);
            for row in &rows {
                prop_assert!(
                    row.width(padding) <= width,
                    "row of {} is {} px wide in {} px",
                    row.len(),
                    row.width(padding),
                    width
                );
            }
        }

        #[test]
        fn prop_equal_ratio_rows_fill_width(
            ratio in 0.3f32..3.0,
            count in 4usize..40,
            width in 200u32..3000,
            padding in 0u32..16,
        ) {
            let config = RowConfig::new(600, padding).unwrap();
            let rows = pack_rows(&items(&vec![ratio; count]), &config, width);

            // Every row but the last spans the effective width exactly; the
            // last item absorbs the truncation remainder.
            for row in &rows[..rows.len() - 1] {
                let n = row.len();
                let effective = effective_width(width, padding, n);
                let share = effective / n as u32;
                let h = row.height();
                prop_assert!(row.items().iter().all(|i| i.height == h));
                prop_assert_eq!(
                    row.items().iter().map(|i| i.width).sum::<u32>(),
                    effective
                );
                for item in &row.items()[..n - 1] {
                    prop_assert!(item.width.abs_diff(share) <= 1);
                }
            }
        }

        #[test]
        fn prop_single_overflow_item_uses_three_quarters_height(
            ratio in 0.05f32..1.0,
            width in 100u32..3000,
            max_row_height in 100u32..800,
        ) {
            prop_assume!(width as f32 / ratio > max_row_height as f32);
            let config = RowConfig::new(max_row_height, 8).unwrap();
            let rows = pack_rows(&items(&[ratio]), &config, width);
            prop_assert_eq!(rows.len(), 1);
            prop_assert_eq!(rows[0].height(), max_row_height * 3 / 4);
        }
    }
}
