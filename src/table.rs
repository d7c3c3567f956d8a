//! In-memory tables with named columns, declared types, and an optional
//! promoted row key.
//!
//! A [`Table`] is the loader's output: its columns are exactly the union of
//! fields parsed from the source, every schema column carries its declared
//! [`DataType`], and columns outside the schema pass through untyped. One
//! table API is backed by two interchangeable storage layouts, selected at
//! construction via [`TableBackend`]; both satisfy the identical contract.

use crate::error::{LoadError, LoadResult};
use crate::types::{DataType, Value};

/// Storage layout used by a [`Table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableBackend {
    /// Rows stored contiguously, one `Vec<Value>` per row.
    #[default]
    RowMajor,
    /// Columns stored contiguously, one `Vec<Value>` per column.
    Columnar,
}

/// A named table column and its declared type.
///
/// `data_type` is `Some` exactly for columns named in the schema the table
/// was aligned against; passthrough columns are untyped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name (dot path for flattened nested fields).
    pub name: String,
    /// Declared type, or `None` for a passthrough column.
    pub data_type: Option<DataType>,
}

impl Column {
    /// An untyped passthrough column.
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: None,
        }
    }

    /// A column with a declared type.
    pub fn typed(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type: Some(data_type),
        }
    }
}

/// A column promoted out of the general column set to identify rows.
///
/// Uniqueness of the values is the caller's contract; the table does not
/// enforce it, and [`Table::lookup`] returns the first match.
#[derive(Debug, Clone, PartialEq)]
pub struct RowKey {
    name: String,
    values: Vec<Value>,
}

impl RowKey {
    /// Name of the promoted column.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Key values, one per row, in row order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Row index of the first row whose key equals `value`.
    pub fn position(&self, value: &Value) -> Option<usize> {
        self.values.iter().position(|v| v == value)
    }
}

#[derive(Debug, Clone)]
enum Storage {
    /// One `Vec<Value>` per row, aligned with the column list.
    RowMajor(Vec<Vec<Value>>),
    /// One `Vec<Value>` per column, each of length `row_count`.
    Columnar(Vec<Vec<Value>>),
}

/// In-memory table: general columns, ordered rows, optional promoted key.
///
/// Constructed fresh per load call and never shared; all transformations
/// return new tables.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<Column>,
    storage: Storage,
    row_count: usize,
    key: Option<RowKey>,
}

impl Table {
    /// Build a table from row-major data, converting to the requested
    /// storage layout.
    ///
    /// # Panics
    ///
    /// Panics if any row's length differs from the column count.
    pub fn from_rows(columns: Vec<Column>, rows: Vec<Vec<Value>>, backend: TableBackend) -> Self {
        let width = columns.len();
        for (i, row) in rows.iter().enumerate() {
            assert!(
                row.len() == width,
                "row {} has {} values but the table has {} columns",
                i,
                row.len(),
                width
            );
        }

        let row_count = rows.len();
        let storage = match backend {
            TableBackend::RowMajor => Storage::RowMajor(rows),
            TableBackend::Columnar => Storage::Columnar(transpose(rows, width)),
        };

        Self {
            columns,
            storage,
            row_count,
            key: None,
        }
    }

    /// The storage layout this table was constructed with.
    pub fn backend(&self) -> TableBackend {
        match self.storage {
            Storage::RowMajor(_) => TableBackend::RowMajor,
            Storage::Columnar(_) => TableBackend::Columnar,
        }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of general (non-key) columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// The general columns, in source order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a general column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Index of a general column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Declared type of a column, or `None` if the column is untyped or
    /// absent (use [`Table::column`] to distinguish the two).
    pub fn column_type(&self, name: &str) -> Option<DataType> {
        self.column(name).and_then(|c| c.data_type)
    }

    /// The cell at (`row`, `col`), if in bounds.
    pub fn value(&self, row: usize, col: usize) -> Option<&Value> {
        if row >= self.row_count {
            return None;
        }
        match &self.storage {
            Storage::RowMajor(rows) => rows.get(row)?.get(col),
            Storage::Columnar(cols) => cols.get(col)?.get(row),
        }
    }

    /// All values of a general column, in row order.
    pub fn column_values(&self, name: &str) -> Option<Vec<&Value>> {
        let idx = self.column_index(name)?;
        let out = match &self.storage {
            Storage::RowMajor(rows) => rows.iter().map(|r| &r[idx]).collect(),
            Storage::Columnar(cols) => cols[idx].iter().collect(),
        };
        Some(out)
    }

    /// A borrowed view of one row.
    pub fn row(&self, idx: usize) -> Option<RowRef<'_>> {
        (idx < self.row_count).then_some(RowRef { table: self, idx })
    }

    /// Iterate all rows in order.
    pub fn iter_rows(&self) -> impl Iterator<Item = RowRef<'_>> {
        (0..self.row_count).map(|idx| RowRef { table: self, idx })
    }

    /// The promoted row key, if any.
    pub fn key(&self) -> Option<&RowKey> {
        self.key.as_ref()
    }

    /// Promote `name` to the table's row identifier.
    ///
    /// The column leaves the general column set; its values become the key.
    /// Fails with [`LoadError::SchemaMismatch`] if no such column exists.
    ///
    /// # Panics
    ///
    /// Panics if a key has already been promoted.
    pub fn promote_key(mut self, name: &str) -> LoadResult<Self> {
        assert!(self.key.is_none(), "table already has a promoted key");

        let idx = self
            .column_index(name)
            .ok_or_else(|| LoadError::missing_column(name, "key column not found in table"))?;

        self.columns.remove(idx);
        let values = match &mut self.storage {
            Storage::RowMajor(rows) => rows.iter_mut().map(|row| row.remove(idx)).collect(),
            Storage::Columnar(cols) => cols.remove(idx),
        };

        self.key = Some(RowKey {
            name: name.to_string(),
            values,
        });
        Ok(self)
    }

    /// First row whose key equals `value`. Requires a promoted key.
    pub fn lookup(&self, value: &Value) -> Option<RowRef<'_>> {
        let idx = self.key.as_ref()?.position(value)?;
        self.row(idx)
    }

    /// New table containing only rows for which `predicate` returns `true`.
    ///
    /// Columns, backend, and (filtered) key values are preserved.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&RowRef<'_>) -> bool,
    {
        let kept: Vec<usize> = self
            .iter_rows()
            .filter(|row| predicate(row))
            .map(|row| row.idx)
            .collect();
        self.take_rows(&kept)
    }

    /// New table with `mapper` applied to every row's general columns.
    ///
    /// Key values pass through unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `mapper` returns a row with a different length than the
    /// column count.
    pub fn map_rows<F>(&self, mut mapper: F) -> Self
    where
        F: FnMut(&RowRef<'_>) -> Vec<Value>,
    {
        let width = self.columns.len();
        let rows: Vec<Vec<Value>> = self
            .iter_rows()
            .map(|row| {
                let out = mapper(&row);
                assert!(
                    out.len() == width,
                    "mapped row length {} does not match column count {}",
                    out.len(),
                    width
                );
                out
            })
            .collect();

        let mut out = Table::from_rows(self.columns.clone(), rows, self.backend());
        out.key = self.key.clone();
        out
    }

    /// Fold all rows into an accumulator value.
    pub fn reduce_rows<A, F>(&self, init: A, mut reducer: F) -> A
    where
        F: FnMut(A, &RowRef<'_>) -> A,
    {
        self.iter_rows().fold(init, |acc, row| reducer(acc, &row))
    }

    /// Materialize the general columns as row-major data.
    pub fn to_rows(&self) -> Vec<Vec<Value>> {
        match &self.storage {
            Storage::RowMajor(rows) => rows.clone(),
            Storage::Columnar(cols) => (0..self.row_count)
                .map(|r| cols.iter().map(|c| c[r].clone()).collect())
                .collect(),
        }
    }

    fn take_rows(&self, indices: &[usize]) -> Self {
        let storage = match &self.storage {
            Storage::RowMajor(rows) => {
                Storage::RowMajor(indices.iter().map(|&i| rows[i].clone()).collect())
            }
            Storage::Columnar(cols) => Storage::Columnar(
                cols.iter()
                    .map(|col| indices.iter().map(|&i| col[i].clone()).collect())
                    .collect(),
            ),
        };
        let key = self.key.as_ref().map(|k| RowKey {
            name: k.name.clone(),
            values: indices.iter().map(|&i| k.values[i].clone()).collect(),
        });
        Self {
            columns: self.columns.clone(),
            storage,
            row_count: indices.len(),
            key,
        }
    }
}

/// Tables compare by logical content: columns, key, and cell values.
///
/// Storage layout is deliberately ignored so a row-major and a columnar
/// table loaded from the same source compare equal.
impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        if self.columns != other.columns
            || self.key != other.key
            || self.row_count != other.row_count
        {
            return false;
        }
        (0..self.row_count).all(|r| {
            (0..self.columns.len()).all(|c| self.value(r, c) == other.value(r, c))
        })
    }
}

/// Borrowed view of a single table row.
#[derive(Debug, Clone, Copy)]
pub struct RowRef<'a> {
    table: &'a Table,
    idx: usize,
}

impl<'a> RowRef<'a> {
    /// Row index within the table.
    pub fn index(&self) -> usize {
        self.idx
    }

    /// Number of general columns in the row.
    pub fn len(&self) -> usize {
        self.table.columns.len()
    }

    /// True if the table has no general columns.
    pub fn is_empty(&self) -> bool {
        self.table.columns.is_empty()
    }

    /// Cell by column index.
    pub fn get(&self, col: usize) -> Option<&'a Value> {
        self.table.value(self.idx, col)
    }

    /// Cell by column name.
    pub fn get_named(&self, name: &str) -> Option<&'a Value> {
        self.get(self.table.column_index(name)?)
    }

    /// This row's key value, if the table has a promoted key.
    pub fn key(&self) -> Option<&'a Value> {
        self.table.key.as_ref()?.values.get(self.idx)
    }

    /// Clone the row's general-column values.
    pub fn to_vec(&self) -> Vec<Value> {
        (0..self.len()).map(|c| self.get(c).cloned().unwrap_or(Value::Null)).collect()
    }
}

fn transpose(rows: Vec<Vec<Value>>, width: usize) -> Vec<Vec<Value>> {
    let mut cols: Vec<Vec<Value>> = (0..width).map(|_| Vec::with_capacity(rows.len())).collect();
    for row in rows {
        for (c, value) in row.into_iter().enumerate() {
            cols[c].push(value);
        }
    }
    cols
}
