//! Reduction operations for [`crate::table::Table`].

use crate::table::Table;
use crate::types::{DataType, Value};

/// Built-in reduction operations over a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    /// Count all rows (including nulls).
    Count,
    /// Sum numeric values, ignoring nulls.
    Sum,
    /// Minimum numeric value, ignoring nulls.
    Min,
    /// Maximum numeric value, ignoring nulls.
    Max,
}

/// Reduce a general column using a built-in [`ReduceOp`].
///
/// - Returns `None` if `column` does not exist in the table.
/// - For `Sum`/`Min`/`Max`, returns `Some(Value::Null)` if the column is not
///   a declared numeric column, or if there are no non-null values.
/// - For `Count`, always returns `Some(Value::Int64(row_count))`.
pub fn reduce(table: &Table, column: &str, op: ReduceOp) -> Option<Value> {
    let col = table.column(column)?;

    match op {
        ReduceOp::Count => Some(Value::Int64(table.row_count() as i64)),
        ReduceOp::Sum | ReduceOp::Min | ReduceOp::Max => match col.data_type {
            Some(DataType::Int64) => reduce_int64(table, column, op),
            Some(DataType::Float64) => reduce_float64(table, column, op),
            _ => Some(Value::Null),
        },
    }
}

fn reduce_int64(table: &Table, column: &str, op: ReduceOp) -> Option<Value> {
    let values = table.column_values(column)?;
    let mut acc: Option<i64> = None;
    for v in values {
        if let Value::Int64(v) = v {
            acc = Some(match (op, acc) {
                (ReduceOp::Sum, Some(a)) => a + v,
                (ReduceOp::Min, Some(a)) => a.min(*v),
                (ReduceOp::Max, Some(a)) => a.max(*v),
                (_, None) => *v,
                _ => unreachable!("non-numeric op handled earlier"),
            });
        }
    }
    Some(acc.map(Value::Int64).unwrap_or(Value::Null))
}

fn reduce_float64(table: &Table, column: &str, op: ReduceOp) -> Option<Value> {
    let values = table.column_values(column)?;
    let mut acc: Option<f64> = None;
    for v in values {
        if let Value::Float64(v) = v {
            acc = Some(match (op, acc) {
                (ReduceOp::Sum, Some(a)) => a + v,
                (ReduceOp::Min, Some(a)) => a.min(*v),
                (ReduceOp::Max, Some(a)) => a.max(*v),
                (_, None) => *v,
                _ => unreachable!("non-numeric op handled earlier"),
            });
        }
    }
    Some(acc.map(Value::Float64).unwrap_or(Value::Null))
}
