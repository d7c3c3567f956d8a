use tabload::loader::{load_from_path, load_from_str, LoadOptions};
use tabload::schemas::{genres_schema, movies_schema};
use tabload::types::{DataType, Field, Schema, Value};
use tabload::LoadError;

#[test]
fn load_genres_from_path_happy_path() {
    let table =
        load_from_path("tests/fixtures/genres.json", genres_schema, &LoadOptions::default())
            .unwrap();

    assert_eq!(table.row_count(), 4);
    assert_eq!(table.column_type("genre_id"), Some(DataType::Int64));
    assert_eq!(table.column_type("genre_name"), Some(DataType::Utf8));
    assert_eq!(table.value(0, 0), Some(&Value::Int64(1)));
    assert_eq!(table.value(1, 1), Some(&Value::Utf8("Drama".to_string())));
}

#[test]
fn every_declared_column_carries_its_declared_type() {
    let table =
        load_from_path("tests/fixtures/movies.json", movies_schema, &LoadOptions::default())
            .unwrap();

    for field in &movies_schema().fields {
        assert_eq!(
            table.column_type(&field.name),
            Some(field.data_type),
            "column '{}' lost its declared type",
            field.name
        );
    }
    assert_eq!(table.value(0, 5), Some(&Value::Float64(126.393695)));
}

#[test]
fn undeclared_columns_pass_through_untyped() {
    let table =
        load_from_path("tests/fixtures/movies.json", movies_schema, &LoadOptions::default())
            .unwrap();

    let extra = table.column("original_language").unwrap();
    assert_eq!(extra.data_type, None);
    assert_eq!(
        table.value(0, table.column_index("original_language").unwrap()),
        Some(&Value::Utf8("en".to_string()))
    );
    // 13 declared columns plus the passthrough one.
    assert_eq!(table.column_count(), 14);
}

#[test]
fn explicit_null_in_a_declared_column_loads_as_null() {
    let table =
        load_from_path("tests/fixtures/movies.json", movies_schema, &LoadOptions::default())
            .unwrap();

    let homepage = table.column_index("homepage").unwrap();
    assert_eq!(table.value(1, homepage), Some(&Value::Null));
    assert_eq!(table.column_type("homepage"), Some(DataType::Utf8));
}

#[test]
fn missing_file_is_a_source_error_naming_the_location() {
    let err = load_from_path(
        "tests/fixtures/does_not_exist.json",
        genres_schema,
        &LoadOptions::default(),
    )
    .unwrap_err();

    assert!(matches!(err, LoadError::Source { .. }));
    assert!(err.to_string().contains("does_not_exist.json"));
}

#[test]
fn malformed_json_is_a_source_error() {
    let err = load_from_str("[{\"genre_id\": 1,]", genres_schema, &LoadOptions::default())
        .unwrap_err();
    assert!(matches!(err, LoadError::Source { .. }));
}

#[test]
fn declared_column_absent_from_source_is_a_schema_mismatch() {
    let input = r#"[{"genre_id": 1}, {"genre_id": 2}]"#;
    let err = load_from_str(input, genres_schema, &LoadOptions::default()).unwrap_err();

    match err {
        LoadError::SchemaMismatch { ref column, .. } => assert_eq!(column, "genre_name"),
        other => panic!("expected SchemaMismatch, got {other:?}"),
    }
}

#[test]
fn uncoercible_value_is_a_type_coercion_error_with_context() {
    let input = r#"[{"genre_id": 1, "genre_name": "Action"},
                    {"genre_id": "not-a-number", "genre_name": "Drama"}]"#;
    let err = load_from_str(input, genres_schema, &LoadOptions::default()).unwrap_err();

    match err {
        LoadError::TypeCoercion {
            row,
            ref column,
            ref raw,
            target,
        } => {
            assert_eq!(row, 2);
            assert_eq!(column, "genre_id");
            assert!(raw.contains("not-a-number"));
            assert_eq!(target, DataType::Int64);
        }
        other => panic!("expected TypeCoercion, got {other:?}"),
    }
}

#[test]
fn numeric_text_coerces_into_numeric_columns() {
    let input = r#"[{"genre_id": "7", "genre_name": "Thriller"}]"#;
    let table = load_from_str(input, genres_schema, &LoadOptions::default()).unwrap();
    assert_eq!(table.value(0, 0), Some(&Value::Int64(7)));
}

#[test]
fn loading_twice_yields_equal_tables() {
    let options = LoadOptions::default();
    let first =
        load_from_path("tests/fixtures/movies.json", movies_schema, &options).unwrap();
    let second =
        load_from_path("tests/fixtures/movies.json", movies_schema, &options).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.columns(), second.columns());
}

#[test]
fn source_field_order_and_row_order_are_preserved() {
    let schema = Schema::new(vec![
        Field::new("b", DataType::Int64),
        Field::new("a", DataType::Int64),
    ]);
    let input = r#"[{"zz": 1, "b": 2, "a": 3}, {"zz": 4, "b": 5, "a": 6}]"#;
    let table = load_from_str(input, || schema, &LoadOptions::default()).unwrap();

    let names: Vec<&str> = table.columns().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["zz", "b", "a"]);
    assert_eq!(table.value(0, 0), Some(&Value::Int64(1)));
    assert_eq!(table.value(1, 2), Some(&Value::Int64(6)));
}
