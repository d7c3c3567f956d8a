//! Loader entrypoints.
//!
//! Most callers should use [`load_from_path`], which:
//!
//! - reads a JSON resource (array-of-objects, single object, or NDJSON)
//! - obtains the schema from a provider function (called exactly once)
//! - materializes and schema-aligns an in-memory [`crate::table::Table`]
//! - optionally promotes a row-key column, strictly after alignment
//! - optionally reports success/failure/alerts to a [`LoadObserver`]
//!
//! [`load_from_str`] is the same pipeline over an in-memory document.

mod json;
pub mod observability;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{LoadError, LoadResult};
use crate::table::{Table, TableBackend};
use crate::types::Schema;

pub use observability::{
    CompositeObserver, FileObserver, LoadContext, LoadObserver, LoadSeverity, LoadStats,
    StdErrObserver,
};

/// Options controlling load behavior.
///
/// Use [`Default`] for common cases: no key, row-major storage, no observer.
#[derive(Clone)]
pub struct LoadOptions {
    /// Column to promote to the table's row identifier, after alignment.
    pub key_column: Option<String>,
    /// Storage layout for the produced table.
    pub backend: TableBackend,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("key_column", &self.key_column)
            .field("backend", &self.backend)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            key_column: None,
            backend: TableBackend::default(),
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

/// Load a JSON resource into a schema-aligned [`Table`].
///
/// `schema_provider` is invoked exactly once per call. The single-shot
/// pipeline is parse, materialize, align, then (if `options.key_column` is
/// set) promote the key; there is no retry and no partial result.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row/column stats
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use tabload::loader::{load_from_path, LoadOptions};
/// use tabload::schemas::genres_schema;
///
/// # fn main() -> Result<(), tabload::LoadError> {
/// let options = LoadOptions {
///     key_column: Some("genre_id".to_string()),
///     ..Default::default()
/// };
/// let genres = load_from_path("data/genres.json", genres_schema, &options)?;
/// println!("rows={}", genres.row_count());
/// # Ok(())
/// # }
/// ```
///
/// ## Observability (stderr logging + alert threshold)
///
/// ```no_run
/// use std::sync::Arc;
///
/// use tabload::loader::{load_from_path, LoadOptions, LoadSeverity, StdErrObserver};
/// use tabload::schemas::movies_schema;
///
/// let options = LoadOptions {
///     observer: Some(Arc::new(StdErrObserver)),
///     alert_at_or_above: LoadSeverity::Critical,
///     ..Default::default()
/// };
///
/// // Missing files are Critical and will trigger `on_alert` at this threshold.
/// let _err = load_from_path("does_not_exist.json", movies_schema, &options).unwrap_err();
/// ```
pub fn load_from_path(
    path: impl AsRef<Path>,
    schema_provider: impl FnOnce() -> Schema,
    options: &LoadOptions,
) -> LoadResult<Table> {
    let path = path.as_ref();
    let location = path.display().to_string();

    let ctx = LoadContext {
        location: location.clone(),
        backend: options.backend,
    };

    let result = fs::read_to_string(path)
        .map_err(|e| LoadError::source(&location, e))
        .and_then(|text| run_load(&text, &location, schema_provider, options));

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(table) => obs.on_success(
                &ctx,
                LoadStats {
                    rows: table.row_count(),
                    columns: table.column_count(),
                },
            ),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

/// Load a JSON document held in memory into a schema-aligned [`Table`].
///
/// Identical pipeline to [`load_from_path`] minus the file read; errors
/// report the location as `<inline>`. The observer hook is not consulted.
///
/// # Examples
///
/// ```
/// use tabload::loader::{load_from_str, LoadOptions};
/// use tabload::schemas::genres_schema;
/// use tabload::types::{DataType, Value};
///
/// let input = r#"[{"genre_id": 1, "genre_name": "Action"},
///                 {"genre_id": 2, "genre_name": "Drama"}]"#;
/// let genres = load_from_str(input, genres_schema, &LoadOptions::default()).unwrap();
///
/// assert_eq!(genres.row_count(), 2);
/// assert_eq!(genres.column_type("genre_id"), Some(DataType::Int64));
/// assert_eq!(genres.value(1, 1), Some(&Value::Utf8("Drama".to_string())));
/// ```
pub fn load_from_str(
    input: &str,
    schema_provider: impl FnOnce() -> Schema,
    options: &LoadOptions,
) -> LoadResult<Table> {
    run_load(input, "<inline>", schema_provider, options)
}

fn run_load(
    input: &str,
    location: &str,
    schema_provider: impl FnOnce() -> Schema,
    options: &LoadOptions,
) -> LoadResult<Table> {
    let schema = schema_provider();
    let table = json::table_from_json_str(input, location, &schema, options.backend)?;

    // Key promotion runs last: alignment must already have succeeded.
    match options.key_column.as_deref() {
        Some(key) => table.promote_key(key),
        None => Ok(table),
    }
}

/// Severity of a failure: an unreadable/malformed source is a configuration
/// problem, everything else is a data-quality problem.
fn severity_for_error(e: &LoadError) -> LoadSeverity {
    match e {
        LoadError::Source { .. } => LoadSeverity::Critical,
        LoadError::SchemaMismatch { .. } | LoadError::TypeCoercion { .. } => LoadSeverity::Error,
    }
}

/// Convenience helper for callers that want an owned request object.
///
/// Useful when load work is queued up front and executed later.
#[derive(Clone)]
pub struct LoadRequest {
    /// Path to the input document.
    pub path: PathBuf,
    /// Schema to align the table against.
    pub schema: Schema,
    /// Options controlling the load.
    pub options: LoadOptions,
}

impl fmt::Debug for LoadRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadRequest")
            .field("path", &self.path)
            .field("schema_fields", &self.schema.fields.len())
            .field("options", &self.options)
            .finish()
    }
}

impl LoadRequest {
    /// Execute the request by calling [`load_from_path`].
    pub fn run(&self) -> LoadResult<Table> {
        load_from_path(&self.path, || self.schema.clone(), &self.options)
    }
}
