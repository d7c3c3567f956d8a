use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use tabload::formats::{read_parquet, write_parquet};
use tabload::loader::{load_from_path, LoadOptions};
use tabload::schemas::{genres_schema, movies_schema};
use tabload::types::{DataType, Value};
use tabload::LoadError;

fn tmp_file(ext: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("tabload-roundtrip-{nanos}.{ext}"))
}

#[test]
fn movies_survive_a_parquet_round_trip() {
    let original = load_from_path(
        "tests/fixtures/movies.json",
        movies_schema,
        &LoadOptions::default(),
    )
    .unwrap();

    let path = tmp_file("parquet");
    write_parquet(&original, &path).unwrap();
    let restored = read_parquet(&path, movies_schema, &LoadOptions::default()).unwrap();

    assert_eq!(original, restored);
    assert_eq!(restored.column_type("budget"), Some(DataType::Int64));
    assert_eq!(restored.column_type("popularity"), Some(DataType::Float64));
    // Nulls survive.
    let homepage = restored.column_index("homepage").unwrap();
    assert_eq!(restored.value(1, homepage), Some(&Value::Null));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn keyed_tables_round_trip_with_re_promotion() {
    let options = LoadOptions {
        key_column: Some("genre_id".to_string()),
        ..Default::default()
    };
    let original =
        load_from_path("tests/fixtures/genres.json", genres_schema, &options).unwrap();

    let path = tmp_file("parquet");
    write_parquet(&original, &path).unwrap();
    let restored = read_parquet(&path, genres_schema, &options).unwrap();

    assert_eq!(original, restored);
    assert!(restored.column("genre_id").is_none());
    assert_eq!(
        restored
            .lookup(&Value::Int64(4))
            .unwrap()
            .get_named("genre_name"),
        Some(&Value::Utf8("Science Fiction".to_string()))
    );

    let _ = std::fs::remove_file(&path);
}

#[test]
fn untyped_columns_are_written_as_text() {
    let original = load_from_path(
        "tests/fixtures/movies.json",
        movies_schema,
        &LoadOptions::default(),
    )
    .unwrap();

    let path = tmp_file("parquet");
    write_parquet(&original, &path).unwrap();
    let restored = read_parquet(&path, movies_schema, &LoadOptions::default()).unwrap();

    // original_language is not in the schema; it comes back as passthrough text.
    let col = restored.column("original_language").unwrap();
    assert_eq!(col.data_type, None);
    assert_eq!(
        restored.value(0, restored.column_index("original_language").unwrap()),
        Some(&Value::Utf8("en".to_string()))
    );

    let _ = std::fs::remove_file(&path);
}

#[test]
fn reading_a_missing_parquet_file_is_a_source_error() {
    let err = read_parquet(
        "tests/fixtures/does_not_exist.parquet",
        genres_schema,
        &LoadOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, LoadError::Source { .. }));
}

#[test]
fn reading_with_an_unsatisfied_schema_is_a_schema_mismatch() {
    let original = load_from_path(
        "tests/fixtures/genres.json",
        genres_schema,
        &LoadOptions::default(),
    )
    .unwrap();

    let path = tmp_file("parquet");
    write_parquet(&original, &path).unwrap();

    let err = read_parquet(&path, movies_schema, &LoadOptions::default()).unwrap_err();
    match err {
        LoadError::SchemaMismatch { ref column, .. } => assert_eq!(column, "movie_id"),
        other => panic!("expected SchemaMismatch, got {other:?}"),
    }

    let _ = std::fs::remove_file(&path);
}
