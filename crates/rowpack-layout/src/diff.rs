//! Sequence diffing for incremental layout.

use crate::row::Row;

/// Lowest index where `new` and `old` differ.
///
/// When one list is a prefix of the other this is the length of the shorter
/// one. Returns `None` when both lists are identical.
pub(crate) fn first_difference_index<T: PartialEq>(new: &[T], old: &[T]) -> Option<usize> {
    let common = new.len().min(old.len());
    if let Some(index) = (0..common).find(|&i| new[i] != old[i]) {
        return Some(index);
    }
    (new.len() != old.len()).then_some(common)
}

/// Rows lying entirely before `diff_index`.
///
/// Returns how many leading rows survive and how many items they cover.
pub(crate) fn reusable_prefix<K, C>(rows: &[Row<K, C>], diff_index: usize) -> (usize, usize) {
    let mut covered = 0;
    for (kept, row) in rows.iter().enumerate() {
        if covered + row.len() > diff_index {
            return (kept, covered);
        }
        covered += row.len();
    }
    (rows.len(), covered)
}
