//! Grid layout for displaying a history, row-major from the most recent color.

use crate::color::HexColor;
use crate::history::ColorHistory;

/// Default column count (6x6 grid for the default capacity of 36).
pub const DEFAULT_COLUMNS: usize = 6;

/// Split `history` into rows of `columns` entries. The last row may be short.
///
/// A `columns` value of zero is treated as one column.
pub fn rows(history: &ColorHistory, columns: usize) -> Vec<&[HexColor]> {
    history.as_slice().chunks(columns.max(1)).collect()
}
