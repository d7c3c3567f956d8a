//! Parquet write/read for in-memory tables.
//!
//! Writing maps declared column types onto Parquet physical types
//! (INT64 / DOUBLE / BYTE_ARRAY+UTF8); untyped passthrough columns are
//! written as UTF-8 text of their values. A promoted key column is written
//! first, so reading the file back with the same schema and key option
//! reproduces the original table.
//!
//! Reading uses the Parquet record API and validates that all schema fields
//! exist as leaf columns before materializing any row.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use parquet::basic::{ConvertedType, Repetition, Type as PhysicalType};
use parquet::column::writer::ColumnWriter;
use parquet::data_type::ByteArray;
use parquet::file::properties::WriterProperties;
use parquet::file::reader::FileReader;
use parquet::file::serialized_reader::SerializedFileReader;
use parquet::file::writer::SerializedFileWriter;
use parquet::record::Field as ParquetField;
use parquet::schema::types::Type;

use crate::error::{LoadError, LoadResult};
use crate::loader::LoadOptions;
use crate::table::{Column, Table};
use crate::types::{DataType, Schema, Value};

/// Physical shape a table column takes in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Int64,
    Float64,
    Text,
}

/// Per-column write payload: non-null values plus one def level per row.
enum ColumnData {
    Int64(Vec<i64>, Vec<i16>),
    Float64(Vec<f64>, Vec<i16>),
    Text(Vec<ByteArray>, Vec<i16>),
}

/// Write a table to a Parquet file at `path`.
///
/// The promoted key column (if any) is written as the first column; general
/// columns follow in table order.
pub fn write_parquet(table: &Table, path: impl AsRef<Path>) -> LoadResult<()> {
    let path = path.as_ref();
    let location = path.display().to_string();

    // (name, kind, values) in file order: key first, then general columns.
    let mut planned: Vec<(String, ColumnKind, Vec<&Value>)> = Vec::new();
    if let Some(key) = table.key() {
        let values: Vec<&Value> = key.values().iter().collect();
        planned.push((key.name().to_string(), kind_of_values(&values), values));
    }
    for column in table.columns() {
        let values = table
            .column_values(&column.name)
            .unwrap_or_default();
        let kind = match column.data_type {
            Some(DataType::Int64) => ColumnKind::Int64,
            Some(DataType::Float64) => ColumnKind::Float64,
            Some(DataType::Utf8) | None => ColumnKind::Text,
        };
        planned.push((column.name.clone(), kind, values));
    }

    let mut fields: Vec<Arc<Type>> = Vec::with_capacity(planned.len());
    for (name, kind, _) in &planned {
        fields.push(parquet_field(name, *kind, &location)?);
    }
    let root = Type::group_type_builder("table")
        .with_fields(fields)
        .build()
        .map_err(|e| LoadError::source(&location, e))?;

    let mut batches: Vec<ColumnData> = Vec::with_capacity(planned.len());
    for (name, kind, values) in &planned {
        batches.push(column_data(name, *kind, values)?);
    }

    let file = File::create(path).map_err(|e| LoadError::source(&location, e))?;
    let props = Arc::new(WriterProperties::builder().build());
    let mut writer = SerializedFileWriter::new(file, Arc::new(root), props)
        .map_err(|e| LoadError::source(&location, e))?;

    let mut rg = writer
        .next_row_group()
        .map_err(|e| LoadError::source(&location, e))?;
    let mut batch_iter = batches.into_iter();
    while let Some(mut col) = rg
        .next_column()
        .map_err(|e| LoadError::source(&location, e))?
    {
        let batch = batch_iter
            .next()
            .ok_or_else(|| LoadError::source(&location, "more file columns than table columns"))?;
        let written = match (col.untyped(), batch) {
            (ColumnWriter::Int64ColumnWriter(w), ColumnData::Int64(values, defs)) => {
                w.write_batch(&values, Some(&defs), None)
            }
            (ColumnWriter::DoubleColumnWriter(w), ColumnData::Float64(values, defs)) => {
                w.write_batch(&values, Some(&defs), None)
            }
            (ColumnWriter::ByteArrayColumnWriter(w), ColumnData::Text(values, defs)) => {
                w.write_batch(&values, Some(&defs), None)
            }
            _ => {
                return Err(LoadError::source(
                    &location,
                    "column writer does not match planned column type",
                ));
            }
        };
        written.map_err(|e| LoadError::source(&location, e))?;
        col.close().map_err(|e| LoadError::source(&location, e))?;
    }
    let _ = rg.close().map_err(|e| LoadError::source(&location, e))?;
    let _ = writer.close().map_err(|e| LoadError::source(&location, e))?;

    Ok(())
}

/// Read a Parquet file into a schema-aligned [`Table`].
///
/// Same contract as [`crate::loader::load_from_path`]: the schema provider is
/// called exactly once, declared columns are validated then coerced in
/// declared order, undeclared file columns pass through, and key promotion
/// (from `options.key_column`) runs last.
pub fn read_parquet(
    path: impl AsRef<Path>,
    schema_provider: impl FnOnce() -> Schema,
    options: &LoadOptions,
) -> LoadResult<Table> {
    let path = path.as_ref();
    let location = path.display().to_string();

    let file = File::open(path).map_err(|e| LoadError::source(&location, e))?;
    let reader =
        SerializedFileReader::new(file).map_err(|e| LoadError::source(&location, e))?;

    let schema = schema_provider();

    let leaf_names: Vec<String> = reader
        .metadata()
        .file_metadata()
        .schema_descr()
        .columns()
        .iter()
        .map(|c| c.path().string())
        .collect();

    for f in &schema.fields {
        if !leaf_names.iter().any(|n| *n == f.name) {
            return Err(LoadError::missing_column(&f.name, "column not found in source"));
        }
    }

    let columns: Vec<Column> = leaf_names
        .iter()
        .map(|name| match schema.data_type_of(name) {
            Some(dt) => Column::typed(name.clone(), dt),
            None => Column::untyped(name.clone()),
        })
        .collect();

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for (idx0, row_res) in reader.into_iter().enumerate() {
        let row_num = idx0 + 1;
        let row = row_res.map_err(|e| LoadError::source(&location, e))?;

        let cells: Vec<(&String, &ParquetField)> = row.get_column_iter().collect();
        let mut out: Vec<Value> = Vec::with_capacity(columns.len());
        for column in &columns {
            let cell = cells.iter().find(|(n, _)| **n == column.name).map(|(_, f)| *f);
            let value = match (cell, column.data_type) {
                (Some(f), Some(dt)) => coerce_parquet(row_num, &column.name, dt, f)?,
                (Some(f), None) => raw_parquet(f),
                (None, Some(_)) => {
                    return Err(LoadError::missing_column(
                        &column.name,
                        format!("row {row_num} is missing the required field"),
                    ));
                }
                (None, None) => Value::Null,
            };
            out.push(value);
        }
        rows.push(out);
    }

    let table = Table::from_rows(columns, rows, options.backend);
    match options.key_column.as_deref() {
        Some(key) => table.promote_key(key),
        None => Ok(table),
    }
}

fn parquet_field(name: &str, kind: ColumnKind, location: &str) -> LoadResult<Arc<Type>> {
    let builder = match kind {
        ColumnKind::Int64 => Type::primitive_type_builder(name, PhysicalType::INT64),
        ColumnKind::Float64 => Type::primitive_type_builder(name, PhysicalType::DOUBLE),
        ColumnKind::Text => Type::primitive_type_builder(name, PhysicalType::BYTE_ARRAY)
            .with_converted_type(ConvertedType::UTF8),
    };
    builder
        .with_repetition(Repetition::OPTIONAL)
        .build()
        .map(Arc::new)
        .map_err(|e| LoadError::source(location, e))
}

/// Infer the file shape of a key column from its values: a homogeneous
/// numeric column keeps its type, anything else is written as text.
fn kind_of_values(values: &[&Value]) -> ColumnKind {
    let non_null: Vec<&&Value> = values.iter().filter(|v| !v.is_null()).collect();
    if !non_null.is_empty() && non_null.iter().all(|v| matches!(v, Value::Int64(_))) {
        ColumnKind::Int64
    } else if !non_null.is_empty() && non_null.iter().all(|v| matches!(v, Value::Float64(_))) {
        ColumnKind::Float64
    } else {
        ColumnKind::Text
    }
}

fn column_data(name: &str, kind: ColumnKind, values: &[&Value]) -> LoadResult<ColumnData> {
    let mut defs: Vec<i16> = Vec::with_capacity(values.len());
    match kind {
        ColumnKind::Int64 => {
            let mut out = Vec::new();
            for (idx0, v) in values.iter().enumerate() {
                match v {
                    Value::Null => defs.push(0),
                    Value::Int64(n) => {
                        defs.push(1);
                        out.push(*n);
                    }
                    other => return Err(write_mismatch(idx0 + 1, name, other, DataType::Int64)),
                }
            }
            Ok(ColumnData::Int64(out, defs))
        }
        ColumnKind::Float64 => {
            let mut out = Vec::new();
            for (idx0, v) in values.iter().enumerate() {
                match v {
                    Value::Null => defs.push(0),
                    Value::Float64(n) => {
                        defs.push(1);
                        out.push(*n);
                    }
                    other => return Err(write_mismatch(idx0 + 1, name, other, DataType::Float64)),
                }
            }
            Ok(ColumnData::Float64(out, defs))
        }
        ColumnKind::Text => {
            let mut out = Vec::new();
            for v in values {
                match v {
                    Value::Null => defs.push(0),
                    other => {
                        defs.push(1);
                        out.push(ByteArray::from(other.render().into_bytes()));
                    }
                }
            }
            Ok(ColumnData::Text(out, defs))
        }
    }
}

fn write_mismatch(row: usize, column: &str, value: &Value, target: DataType) -> LoadError {
    LoadError::TypeCoercion {
        row,
        column: column.to_string(),
        raw: value.render(),
        target,
    }
}

fn coerce_parquet(
    row: usize,
    column: &str,
    target: DataType,
    f: &ParquetField,
) -> LoadResult<Value> {
    if matches!(f, ParquetField::Null) {
        return Ok(Value::Null);
    }

    let fail = || LoadError::TypeCoercion {
        row,
        column: column.to_string(),
        raw: f.to_string(),
        target,
    };

    match target {
        DataType::Int64 => match f {
            ParquetField::Byte(v) => Ok(Value::Int64(i64::from(*v))),
            ParquetField::Short(v) => Ok(Value::Int64(i64::from(*v))),
            ParquetField::Int(v) => Ok(Value::Int64(i64::from(*v))),
            ParquetField::Long(v) => Ok(Value::Int64(*v)),
            ParquetField::UByte(v) => Ok(Value::Int64(i64::from(*v))),
            ParquetField::UShort(v) => Ok(Value::Int64(i64::from(*v))),
            ParquetField::UInt(v) => Ok(Value::Int64(i64::from(*v))),
            ParquetField::ULong(v) => i64::try_from(*v).map(Value::Int64).map_err(|_| fail()),
            ParquetField::Bool(b) => Ok(Value::Int64(i64::from(*b))),
            ParquetField::Str(s) => s.trim().parse::<i64>().map(Value::Int64).map_err(|_| fail()),
            _ => Err(fail()),
        },
        DataType::Float64 => match f {
            ParquetField::Float(v) => Ok(Value::Float64(f64::from(*v))),
            ParquetField::Double(v) => Ok(Value::Float64(*v)),
            ParquetField::Byte(v) => Ok(Value::Float64(f64::from(*v))),
            ParquetField::Short(v) => Ok(Value::Float64(f64::from(*v))),
            ParquetField::Int(v) => Ok(Value::Float64(f64::from(*v))),
            ParquetField::Long(v) => Ok(Value::Float64(*v as f64)),
            ParquetField::Str(s) => {
                s.trim().parse::<f64>().map(Value::Float64).map_err(|_| fail())
            }
            ParquetField::Bool(b) => Ok(Value::Float64(if *b { 1.0 } else { 0.0 })),
            _ => Err(fail()),
        },
        DataType::Utf8 => match f {
            ParquetField::Str(s) => Ok(Value::Utf8(s.clone())),
            other => Ok(Value::Utf8(other.to_string())),
        },
    }
}

fn raw_parquet(f: &ParquetField) -> Value {
    match f {
        ParquetField::Null => Value::Null,
        ParquetField::Bool(b) => Value::Bool(*b),
        ParquetField::Byte(v) => Value::Int64(i64::from(*v)),
        ParquetField::Short(v) => Value::Int64(i64::from(*v)),
        ParquetField::Int(v) => Value::Int64(i64::from(*v)),
        ParquetField::Long(v) => Value::Int64(*v),
        ParquetField::UByte(v) => Value::Int64(i64::from(*v)),
        ParquetField::UShort(v) => Value::Int64(i64::from(*v)),
        ParquetField::UInt(v) => Value::Int64(i64::from(*v)),
        ParquetField::ULong(v) => match i64::try_from(*v) {
            Ok(n) => Value::Int64(n),
            Err(_) => Value::Utf8(v.to_string()),
        },
        ParquetField::Float(v) => Value::Float64(f64::from(*v)),
        ParquetField::Double(v) => Value::Float64(*v),
        ParquetField::Str(s) => Value::Utf8(s.clone()),
        other => Value::Utf8(other.to_string()),
    }
}
