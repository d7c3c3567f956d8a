use std::sync::{Arc, Mutex};

use tabload::loader::{
    load_from_path, LoadContext, LoadObserver, LoadOptions, LoadSeverity, LoadStats,
};
use tabload::schemas::genres_schema;
use tabload::types::{DataType, Field, Schema};
use tabload::LoadError;

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<LoadStats>>,
    failures: Mutex<Vec<LoadSeverity>>,
    alerts: Mutex<Vec<LoadSeverity>>,
}

impl LoadObserver for RecordingObserver {
    fn on_success(&self, _ctx: &LoadContext, stats: LoadStats) {
        self.successes.lock().unwrap().push(stats);
    }

    fn on_failure(&self, _ctx: &LoadContext, severity: LoadSeverity, _error: &LoadError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &LoadContext, severity: LoadSeverity, _error: &LoadError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn observed(obs: &Arc<RecordingObserver>) -> LoadOptions {
    LoadOptions {
        observer: Some(obs.clone() as Arc<dyn LoadObserver>),
        alert_at_or_above: LoadSeverity::Critical,
        ..Default::default()
    }
}

#[test]
fn observer_receives_failure_and_alert_on_critical_source_error() {
    let obs = Arc::new(RecordingObserver::default());

    // Missing file -> Source error -> Critical.
    let _ = load_from_path(
        "tests/fixtures/does_not_exist.json",
        genres_schema,
        &observed(&obs),
    )
    .unwrap_err();

    let failures = obs.failures.lock().unwrap().clone();
    let alerts = obs.alerts.lock().unwrap().clone();
    assert_eq!(failures, vec![LoadSeverity::Critical]);
    assert_eq!(alerts, vec![LoadSeverity::Critical]);
}

#[test]
fn observer_receives_failure_without_alert_for_data_quality_errors() {
    let obs = Arc::new(RecordingObserver::default());
    let absent_column = || Schema::new(vec![Field::new("definitely_missing", DataType::Utf8)]);

    // Schema mismatch -> Error severity (not Critical) -> no alert at this threshold.
    let _ = load_from_path("tests/fixtures/genres.json", absent_column, &observed(&obs))
        .unwrap_err();

    let failures = obs.failures.lock().unwrap().clone();
    assert_eq!(failures, vec![LoadSeverity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_alert_when_threshold_is_lowered() {
    let obs = Arc::new(RecordingObserver::default());
    let options = LoadOptions {
        alert_at_or_above: LoadSeverity::Error,
        ..observed(&obs)
    };
    let absent_column = || Schema::new(vec![Field::new("definitely_missing", DataType::Utf8)]);

    let _ = load_from_path("tests/fixtures/genres.json", absent_column, &options).unwrap_err();

    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![LoadSeverity::Error]);
}

#[test]
fn observer_receives_success_stats() {
    let obs = Arc::new(RecordingObserver::default());

    let table =
        load_from_path("tests/fixtures/genres.json", genres_schema, &observed(&obs)).unwrap();

    let successes = obs.successes.lock().unwrap().clone();
    assert_eq!(successes.len(), 1);
    assert_eq!(successes[0].rows, table.row_count());
    assert_eq!(successes[0].columns, table.column_count());
    assert!(obs.failures.lock().unwrap().is_empty());
}
