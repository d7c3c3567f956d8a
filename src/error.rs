use thiserror::Error;

use crate::types::DataType;

/// Convenience result type for load operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Error type returned by the loader and the format round-trip helpers.
///
/// The three variants are deliberately distinct so callers can react
/// differently: [`LoadError::Source`] is a configuration problem (wrong path,
/// unreadable or malformed resource), while [`LoadError::SchemaMismatch`] and
/// [`LoadError::TypeCoercion`] are data-quality problems in an otherwise
/// readable document.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The resource was unreadable or did not parse.
    #[error("source error: {location}: {message}")]
    Source {
        /// Resolved location of the resource (path, or `<inline>` for string input).
        location: String,
        /// Underlying I/O or parse message.
        message: String,
    },

    /// A column declared in the schema (or requested as the row key) is
    /// absent from the parsed data.
    #[error("schema mismatch: {message} (column '{column}')")]
    SchemaMismatch {
        /// The missing column.
        column: String,
        /// What exactly was missing and where.
        message: String,
    },

    /// A value could not be coerced to its declared type.
    #[error("cannot coerce value at row {row} column '{column}' to {target} (raw='{raw}')")]
    TypeCoercion {
        /// 1-based row number in the source.
        row: usize,
        /// The column being aligned.
        column: String,
        /// Textual rendition of the offending value.
        raw: String,
        /// The declared target type.
        target: DataType,
    },
}

impl LoadError {
    /// Build a [`LoadError::Source`] from a resolved location and any
    /// displayable cause.
    pub(crate) fn source(location: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        LoadError::Source {
            location: location.into(),
            message: cause.to_string(),
        }
    }

    /// Build a [`LoadError::SchemaMismatch`] naming the missing column.
    pub(crate) fn missing_column(column: impl Into<String>, message: impl Into<String>) -> Self {
        LoadError::SchemaMismatch {
            column: column.into(),
            message: message.into(),
        }
    }
}
