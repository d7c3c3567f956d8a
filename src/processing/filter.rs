//! Row filtering for [`crate::table::Table`].

use crate::table::{RowRef, Table};

/// Returns a new [`Table`] containing only rows for which `predicate`
/// returns `true`.
///
/// This is a convenience wrapper around [`Table::filter_rows`]; columns,
/// storage backend, and (filtered) key values are preserved.
pub fn filter<F>(table: &Table, predicate: F) -> Table
where
    F: FnMut(&RowRef<'_>) -> bool,
{
    table.filter_rows(predicate)
}
