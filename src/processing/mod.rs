//! In-memory table transformations.
//!
//! The processing layer operates on [`crate::table::Table`] values produced
//! by the loader. It is intentionally simple and purely in-memory.
//!
//! Currently implemented:
//!
//! - [`filter()`]: row filtering by predicate
//! - [`map()`]: row mapping by user function
//! - [`reduce()`]: common reductions (count/sum/min/max)
//!
//! ## Example: filter → reduce
//!
//! ```rust
//! use tabload::loader::{load_from_str, LoadOptions};
//! use tabload::processing::{filter, reduce, ReduceOp};
//! use tabload::schemas::genres_schema;
//! use tabload::types::Value;
//!
//! let input = r#"[{"genre_id": 1, "genre_name": "Action"},
//!                 {"genre_id": 2, "genre_name": "Drama"},
//!                 {"genre_id": 3, "genre_name": "Comedy"}]"#;
//! let genres = load_from_str(input, genres_schema, &LoadOptions::default()).unwrap();
//!
//! let tail = filter(&genres, |row| {
//!     matches!(row.get_named("genre_id"), Some(Value::Int64(v)) if *v > 1)
//! });
//! assert_eq!(tail.row_count(), 2);
//!
//! let max_id = reduce(&tail, "genre_id", ReduceOp::Max).unwrap();
//! assert_eq!(max_id, Value::Int64(3));
//! ```

pub mod filter;
pub mod map;
pub mod reduce;

pub use filter::filter;
pub use map::map;
pub use reduce::{reduce, ReduceOp};
