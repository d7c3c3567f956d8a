//! Bundled schema providers for the movie reference dataset.
//!
//! Each logical dataset declares its schema once, through a zero-argument
//! provider function that plugs straight into
//! [`crate::loader::load_from_path`]:
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
//! # Ok(())
//! # }
//! ```

use crate::types::{DataType, Field, Schema};

/// Schema for the genres dataset.
pub fn genres_schema() -> Schema {
    Schema::new(vec![
        Field::new("genre_id", DataType::Int64),
        Field::new("genre_name", DataType::Utf8),
    ])
}

/// Schema for the movies dataset.
pub fn movies_schema() -> Schema {
    Schema::new(vec![
        Field::new("movie_id", DataType::Int64),
        Field::new("title", DataType::Utf8),
        Field::new("budget", DataType::Int64),
        Field::new("homepage", DataType::Utf8),
        Field::new("overview", DataType::Utf8),
        Field::new("popularity", DataType::Float64),
        Field::new("release_date", DataType::Utf8),
        Field::new("revenue", DataType::Int64),
        Field::new("runtime", DataType::Int64),
        Field::new("movie_status", DataType::Utf8),
        Field::new("tagline", DataType::Utf8),
        Field::new("vote_average", DataType::Float64),
        Field::new("vote_count", DataType::Int64),
    ])
}

/// Schema for the movie-to-genre link dataset.
pub fn movie_genre_schema() -> Schema {
    Schema::new(vec![
        Field::new("movie_id", DataType::Int64),
        Field::new("genre_id", DataType::Int64),
    ])
}

#[cfg(test)]
mod tests {
    use super::{genres_schema, movie_genre_schema, movies_schema};
    use crate::types::DataType;

    #[test]
    fn movie_schema_declares_all_columns_in_order() {
        let schema = movies_schema();
        assert_eq!(schema.fields.len(), 13);
        assert_eq!(schema.fields[0].name, "movie_id");
        assert_eq!(schema.data_type_of("popularity"), Some(DataType::Float64));
        assert_eq!(schema.data_type_of("movie_status"), Some(DataType::Utf8));
    }

    #[test]
    fn link_schema_spans_both_keyed_datasets() {
        let link = movie_genre_schema();
        let names: Vec<&str> = link.field_names().collect();
        assert_eq!(names, vec!["movie_id", "genre_id"]);
        assert_eq!(genres_schema().data_type_of("genre_id"), Some(DataType::Int64));
    }
}
