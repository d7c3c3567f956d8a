//! Columnar file-format round-trips for loaded tables.
//!
//! The codecs themselves are external collaborators; this layer only maps a
//! [`crate::table::Table`] onto them and routes reads back through the same
//! schema-alignment and key-promotion pipeline the JSON loader uses.

pub mod parquet;

pub use parquet::{read_parquet, write_parquet};
