//! Fill-down of blank cells.
//!
//! Schedulers often write a room or proctor once and leave the cells below
//! blank for the following sessions. Filling down copies the last non-blank
//! value of a column into the blank cells beneath it.

use tracing::debug;

use crate::row::RawRow;

/// Columns that are filled down by default.
pub const FILL_DOWN_COLUMNS: [&str; 5] = ["location", "minutes", "room", "proctor1", "proctor2"];

/// Fill blank cells of `columns` from the closest non-blank cell above.
///
/// A cell is blank when empty after trimming. Blank cells before the first
/// non-blank value of a column become empty strings. Rows without a column
/// are left alone. Returns the number of cells that received a value.
pub fn fill_down(rows: &mut [RawRow], columns: &[&str]) -> usize {
    let mut last: Vec<String> = vec![String::new(); columns.len()];
    let mut filled = 0usize;

    for row in rows.iter_mut() {
        for (column, remembered) in columns.iter().zip(last.iter_mut()) {
            let Some(value) = row.get(column) else {
                continue;
            };
            let value = value.trim();
            if value.is_empty() {
                if !remembered.is_empty() {
                    filled += 1;
                }
                row.set(column, remembered.clone());
            } else {
                *remembered = value.to_string();
            }
        }
    }

    debug!(filled, "filled down blank cells");
    filled
}
