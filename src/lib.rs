//! `tabload` is a small library for loading JSON record sources into typed
//! in-memory [`table::Table`]s, aligned against a user-provided
//! [`types::Schema`].
//!
//! The primary entrypoint is [`loader::load_from_path`], which parses a JSON
//! document (array-of-objects, single object, or NDJSON), materializes the
//! union of its fields, coerces every schema column to its declared type,
//! and optionally promotes one column to the table's row key.
//!
//! ## The load contract
//!
//! - The schema provider is a zero-argument function, called exactly once
//!   per load (see [`schemas`] for the bundled movie-dataset providers).
//! - Columns named in the schema end up with exactly their declared
//!   [`types::DataType`] (`Int64` / `Float64` / `Utf8`); columns outside the
//!   schema pass through untyped and unmodified.
//! - Failures are fail-fast and typed — [`LoadError::Source`] for an
//!   unreadable or malformed resource, [`LoadError::SchemaMismatch`] for a
//!   declared column missing from the data, [`LoadError::TypeCoercion`] for
//!   a value that cannot be cast. No partial table is ever returned.
//! - Key promotion runs strictly after alignment; the key column leaves the
//!   general column set and serves [`table::Table::lookup`].
//!
//! ## Quick example
//!
//! ```rust
//! use tabload::loader::{load_from_str, LoadOptions};
//! use tabload::schemas::genres_schema;
//! use tabload::types::{DataType, Value};
//!
//! let input = r#"[{"genre_id": 1, "genre_name": "Action"},
//!                 {"genre_id": 2, "genre_name": "Drama"}]"#;
//!
//! let options = LoadOptions {
//!     key_column: Some("genre_id".to_string()),
//!     ..Default::default()
//! };
//! let genres = load_from_str(input, genres_schema, &options).unwrap();
//!
//! // The key column left the general column set...
//! assert!(genres.column("genre_id").is_none());
//! // ...and serves row lookup.
//! let drama = genres.lookup(&Value::Int64(2)).unwrap();
//! assert_eq!(drama.get_named("genre_name"), Some(&Value::Utf8("Drama".to_string())));
//! assert_eq!(genres.column_type("genre_name"), Some(DataType::Utf8));
//! ```
//!
//! ## Loading from a file
//!
//! ```no_run
//! use tabload::loader::{load_from_path, LoadOptions};
//! use tabload::schemas::movies_schema;
//!
//! # fn main() -> Result<(), tabload::LoadError> {
//! let options = LoadOptions {
//!     key_column: Some("movie_id".to_string()),
//!     ..Default::default()
//! };
//! let movies = load_from_path("data/movies.json", movies_schema, &options)?;
//! println!("rows={}", movies.row_count());
//! # Ok(())
//! # }
//! ```
//!
//! ## Storage backends
//!
//! One table API is backed by two interchangeable storage layouts, selected
//! at construction via [`table::TableBackend`] in [`loader::LoadOptions`];
//! both satisfy the identical contract and compare equal when loaded from
//! the same source.
//!
//! ## Modules
//!
//! - [`loader`]: load entrypoints, options, and observability hooks
//! - [`types`]: schema and scalar value types
//! - [`table`]: the in-memory table, storage backends, and row key
//! - [`schemas`]: bundled movie-dataset schema providers
//! - [`formats`]: Parquet round-trip through the external codec
//! - [`processing`]: in-memory table transformations (filter/map/reduce)
//! - [`error`]: the error taxonomy

pub mod error;
pub mod formats;
pub mod loader;
pub mod processing;
pub mod schemas;
pub mod table;
pub mod types;

pub use error::{LoadError, LoadResult};
