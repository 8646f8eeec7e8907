use pipcat_core::merge::MergeLog;
use pipcat_core::python::{reconcile, VersionOracle};
use pipcat_util::errors::PipcatError;

struct StubOracle {
    versions: Vec<&'static str>,
    fail: bool,
}

impl StubOracle {
    fn with(versions: Vec<&'static str>) -> Self {
        Self {
            versions,
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            versions: Vec::new(),
            fail: true,
        }
    }
}

impl VersionOracle for StubOracle {
    fn list_versions(&self) -> Result<Vec<String>, PipcatError> {
        if self.fail {
            return Err(PipcatError::Tool {
                message: "pyenv exited with 1".to_string(),
            });
        }
        Ok(self.versions.iter().map(|v| v.to_string()).collect())
    }
}

#[test]
fn declared_wins_without_baseline() {
    let mut log = MergeLog::new();
    let oracle = StubOracle::with(vec![]);
    let effective = reconcile("app", Some("3.10.4"), None, &oracle, &mut log).unwrap();
    assert_eq!(effective, "3.10");
    assert!(log.is_empty());
}

#[test]
fn declared_constraint_operators_are_stripped() {
    let mut log = MergeLog::new();
    let oracle = StubOracle::with(vec![]);
    let effective = reconcile("app", Some(">=3.9"), None, &oracle, &mut log).unwrap();
    assert_eq!(effective, "3.9");
}

#[test]
fn baseline_wins_without_declared() {
    let mut log = MergeLog::new();
    let oracle = StubOracle::with(vec![]);
    let effective = reconcile("app", None, Some("3.11.2"), &oracle, &mut log).unwrap();
    assert_eq!(effective, "3.11");
    assert!(log.is_empty());
}

#[test]
fn greater_baseline_overrides_declared_with_note() {
    let mut log = MergeLog::new();
    let oracle = StubOracle::with(vec![]);
    let effective = reconcile("app", Some("3.9"), Some("3.11"), &oracle, &mut log).unwrap();
    assert_eq!(effective, "3.11");
    assert_eq!(log.notes.len(), 1);
    assert_eq!(log.notes[0].name, "python_version");
    assert_eq!(log.notes[0].module, "app");
    assert_eq!(log.notes[0].kept, "3.11");
    assert_eq!(log.notes[0].discarded, "3.9");
}

#[test]
fn greater_declared_beats_baseline_silently() {
    let mut log = MergeLog::new();
    let oracle = StubOracle::with(vec![]);
    let effective = reconcile("app", Some("3.12.1"), Some("3.10"), &oracle, &mut log).unwrap();
    assert_eq!(effective, "3.12");
    assert!(log.is_empty());
}

#[test]
fn equal_after_padding_keeps_declared() {
    let mut log = MergeLog::new();
    let oracle = StubOracle::with(vec![]);
    let effective = reconcile("app", Some("3.10"), Some("3.10.0"), &oracle, &mut log).unwrap();
    assert_eq!(effective, "3.10");
    assert!(log.is_empty());
}

#[test]
fn wildcard_declared_counts_as_no_constraint() {
    let mut log = MergeLog::new();
    let oracle = StubOracle::with(vec![]);
    let effective = reconcile("app", Some("*"), Some("3.11"), &oracle, &mut log).unwrap();
    assert_eq!(effective, "3.11");
}

#[test]
fn oracle_decides_when_nothing_is_known() {
    let mut log = MergeLog::new();
    let oracle = StubOracle::with(vec!["", "3.12.1", "3.11.9"]);
    let effective = reconcile("app", None, None, &oracle, &mut log).unwrap();
    // First non-empty line, reduced to its feature version.
    assert_eq!(effective, "3.12");
}

#[test]
fn oracle_failure_is_fatal() {
    let mut log = MergeLog::new();
    let oracle = StubOracle::failing();
    let result = reconcile("app", None, None, &oracle, &mut log);
    assert!(result.is_err());
}

#[test]
fn oracle_empty_output_is_fatal() {
    let mut log = MergeLog::new();
    let oracle = StubOracle::with(vec!["", "   "]);
    let result = reconcile("app", None, None, &oracle, &mut log);
    let err = result.unwrap_err();
    assert!(err.to_string().contains("no versions"), "got: {err}");
}
