//! JSON parsing, materialization, and schema alignment.
//!
//! Supported inputs:
//! - A JSON array of objects: `[{"a":1}, {"a":2}]`
//! - A single JSON object (treated as a one-row array)
//! - Newline-delimited JSON (NDJSON): `{"a":1}\n{"a":2}\n`
//!
//! Shallow-nested objects are flattened into dot-path columns (`user.name`);
//! nested arrays pass through as their raw JSON text. Rows keep source order,
//! columns keep first-seen field order.

use std::collections::HashMap;

use serde_json::{Map, Value as JsonValue};

use crate::error::{LoadError, LoadResult};
use crate::table::{Column, Table, TableBackend};
use crate::types::{DataType, Schema, Value};

/// One materialized source row: flattened (field, value) pairs in source order.
type FlatRow = Vec<(String, JsonValue)>;

/// Parse `input` and build a schema-aligned table.
///
/// Implements the full load pipeline except key promotion, which the caller
/// runs last: parse (fail with [`LoadError::Source`]), materialize the union
/// of fields, then align every schema column in declared order.
pub(crate) fn table_from_json_str(
    input: &str,
    location: &str,
    schema: &Schema,
    backend: TableBackend,
) -> LoadResult<Table> {
    let flat_rows = parse_rows(input, location)?;
    align(&flat_rows, schema, backend)
}

fn parse_rows(input: &str, location: &str) -> LoadResult<Vec<FlatRow>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(LoadError::source(location, "json input is empty"));
    }

    // A whole-document parse first; fall back to NDJSON framing.
    if let Ok(v) = serde_json::from_str::<JsonValue>(trimmed) {
        let items = match v {
            JsonValue::Array(items) => items,
            JsonValue::Object(_) => vec![v],
            _ => {
                return Err(LoadError::source(
                    location,
                    "json must be an object, an array of objects, or NDJSON",
                ));
            }
        };
        items
            .iter()
            .enumerate()
            .map(|(idx0, item)| flatten_record(item, idx0 + 1, location))
            .collect()
    } else {
        let mut rows = Vec::new();
        for (i, line) in trimmed.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let v = serde_json::from_str::<JsonValue>(line).map_err(|e| {
                LoadError::source(location, format!("invalid ndjson at line {}: {e}", i + 1))
            })?;
            rows.push(flatten_record(&v, rows.len() + 1, location)?);
        }
        Ok(rows)
    }
}

fn flatten_record(v: &JsonValue, row_num: usize, location: &str) -> LoadResult<FlatRow> {
    let obj = v
        .as_object()
        .ok_or_else(|| LoadError::source(location, format!("row {row_num} is not a json object")))?;

    let mut out = Vec::with_capacity(obj.len());
    flatten_object(None, obj, &mut out);
    Ok(out)
}

fn flatten_object(prefix: Option<&str>, obj: &Map<String, JsonValue>, out: &mut FlatRow) {
    for (k, v) in obj {
        let name = match prefix {
            Some(p) => format!("{p}.{k}"),
            None => k.clone(),
        };
        match v {
            JsonValue::Object(inner) => flatten_object(Some(&name), inner, out),
            _ => out.push((name, v.clone())),
        }
    }
}

fn field<'a>(row: &'a FlatRow, name: &str) -> Option<&'a JsonValue> {
    row.iter().find(|(n, _)| n == name).map(|(_, v)| v)
}

fn align(flat_rows: &[FlatRow], schema: &Schema, backend: TableBackend) -> LoadResult<Table> {
    // Union of fields over all rows, first-seen order.
    let mut union: Vec<String> = Vec::new();
    for row in flat_rows {
        for (name, _) in row {
            if !union.iter().any(|n| n == name) {
                union.push(name.clone());
            }
        }
    }

    // Schema columns first, in declared order, so the first defect named is
    // the first declared column with a problem.
    let mut coerced: HashMap<&str, Vec<Value>> = HashMap::new();
    for f in &schema.fields {
        if !union.iter().any(|n| *n == f.name) {
            return Err(LoadError::missing_column(&f.name, "column not found in source"));
        }
        let mut out = Vec::with_capacity(flat_rows.len());
        for (idx0, row) in flat_rows.iter().enumerate() {
            let row_num = idx0 + 1;
            let jv = field(row, &f.name).ok_or_else(|| {
                LoadError::missing_column(
                    &f.name,
                    format!("row {row_num} is missing the required field"),
                )
            })?;
            out.push(coerce_json(row_num, &f.name, f.data_type, jv)?);
        }
        coerced.insert(f.name.as_str(), out);
    }

    let columns: Vec<Column> = union
        .iter()
        .map(|name| match schema.data_type_of(name) {
            Some(dt) => Column::typed(name.clone(), dt),
            None => Column::untyped(name.clone()),
        })
        .collect();

    let mut rows: Vec<Vec<Value>> = Vec::with_capacity(flat_rows.len());
    for (idx0, row) in flat_rows.iter().enumerate() {
        let mut out: Vec<Value> = Vec::with_capacity(columns.len());
        for column in &columns {
            let cell = match coerced.get(column.name.as_str()) {
                Some(values) => values[idx0].clone(),
                // Passthrough columns pad fields missing from this row with null.
                None => field(row, &column.name).map(raw_value).unwrap_or(Value::Null),
            };
            out.push(cell);
        }
        rows.push(out);
    }

    Ok(Table::from_rows(columns, rows, backend))
}

/// Cast a JSON value to a declared type, cast-and-validate style: numeric
/// text coerces to numbers, integral floats to integers, booleans to 1/0,
/// and any scalar renders to text. JSON `null` is null under every target.
fn coerce_json(row: usize, column: &str, target: DataType, v: &JsonValue) -> LoadResult<Value> {
    if v.is_null() {
        return Ok(Value::Null);
    }

    let fail = || LoadError::TypeCoercion {
        row,
        column: column.to_string(),
        raw: v.to_string(),
        target,
    };

    match target {
        DataType::Int64 => {
            if let Some(n) = v.as_i64() {
                Ok(Value::Int64(n))
            } else if let Some(n) = v.as_u64() {
                i64::try_from(n).map(Value::Int64).map_err(|_| fail())
            } else if let Some(n) = v.as_f64() {
                // 2^53 bounds the range where f64 still holds exact integers.
                if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
                    Ok(Value::Int64(n as i64))
                } else {
                    Err(fail())
                }
            } else if let Some(s) = v.as_str() {
                s.trim().parse::<i64>().map(Value::Int64).map_err(|_| fail())
            } else if let Some(b) = v.as_bool() {
                Ok(Value::Int64(i64::from(b)))
            } else {
                Err(fail())
            }
        }
        DataType::Float64 => {
            if let Some(n) = v.as_f64() {
                Ok(Value::Float64(n))
            } else if let Some(s) = v.as_str() {
                s.trim().parse::<f64>().map(Value::Float64).map_err(|_| fail())
            } else if let Some(b) = v.as_bool() {
                Ok(Value::Float64(if b { 1.0 } else { 0.0 }))
            } else {
                Err(fail())
            }
        }
        DataType::Utf8 => match v {
            JsonValue::String(s) => Ok(Value::Utf8(s.clone())),
            other => Ok(Value::Utf8(other.to_string())),
        },
    }
}

/// Passthrough conversion for columns outside the schema.
fn raw_value(v: &JsonValue) -> Value {
    match v {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Number(_) => {
            if let Some(n) = v.as_i64() {
                Value::Int64(n)
            } else if let Some(n) = v.as_f64() {
                Value::Float64(n)
            } else {
                Value::Utf8(v.to_string())
            }
        }
        JsonValue::String(s) => Value::Utf8(s.clone()),
        // Arrays (and anything else) survive as raw JSON text.
        other => Value::Utf8(other.to_string()),
    }
}
