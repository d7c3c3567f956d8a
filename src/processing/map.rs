//! Row mapping for [`crate::table::Table`].

use crate::table::{RowRef, Table};
use crate::types::Value;

/// Returns a new [`Table`] by applying `mapper` to every row's general
/// columns.
///
/// This is a convenience wrapper around [`Table::map_rows`]; key values pass
/// through unchanged.
///
/// # Panics
///
/// Panics if `mapper` returns rows with a different length than the column
/// count.
pub fn map<F>(table: &Table, mapper: F) -> Table
where
    F: FnMut(&RowRef<'_>) -> Vec<Value>,
{
    table.map_rows(mapper)
}
