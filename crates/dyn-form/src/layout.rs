//! Two-column row layout.

use std::ops::Range;

/// Fields per row.
pub const COLUMNS: usize = 2;

/// Row index of the field at configuration index `index`.
pub fn row_of(index: usize) -> usize {
    index / COLUMNS
}

/// Groups `count` configuration indices into rows of [`COLUMNS`].
///
/// Rows come from the full field list, never from the visible subset, so a
/// hidden field keeps its slot and the remaining fields do not reflow.
pub fn pair_rows(count: usize) -> Vec<Range<usize>> {
    (0..count)
        .step_by(COLUMNS)
        .map(|start| start..(start + COLUMNS).min(count))
        .collect()
}
