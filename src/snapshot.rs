//! Keeps the latest scan on disk so a report can be rebuilt later.
//!
//! Only one snapshot is kept; saving replaces the previous one. The scanner
//! never touches this store, the caller decides when to write.
use crate::aggregate::{aggregate, ScanResult};
use anyhow::Context;
use log::debug;
use serde_derive::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// On-disk layout of the snapshot file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastResults {
    /// The latest username scan.
    pub username_investigation: ScanResult,
}

/// Replaces the snapshot at `path` with `result`.
pub fn save(path: &Path, result: &ScanResult) -> anyhow::Result<()> {
    let snapshot = LastResults {
        username_investigation: result.clone(),
    };
    let json = serde_json::to_string_pretty(&snapshot)?;
    fs::write(path, json).with_context(|| format!("Could not save {}", path.display()))?;

    debug!("Saved scan of {:?} to {}", result.subject, path.display());
    Ok(())
}

/// Reads the snapshot at `path`. `Ok(None)` when no scan was saved yet.
///
/// The found total is recounted from the outcomes, whatever the file says.
pub fn load(path: &Path) -> anyhow::Result<Option<ScanResult>> {
    if !path.exists() {
        return Ok(None);
    }

    let content =
        fs::read_to_string(path).with_context(|| format!("Could not read {}", path.display()))?;
    let snapshot: LastResults = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a saved scan", path.display()))?;

    let ScanResult {
        subject, outcomes, ..
    } = snapshot.username_investigation;
    Ok(Some(aggregate(&subject, outcomes)))
}

#[cfg(test)]
mod tests {
    use super::{load, save};
    use crate::aggregate::{aggregate, ProbeError, ProbeOutcome};
    use std::fs;

    #[test]
    fn missing_snapshot_is_none() {
        let dir = tempfile::tempdir().unwrap();

        assert_eq!(load(&dir.path().join("last_results.json")).unwrap(), None);
    }

    #[test]
    fn saved_scan_is_loaded_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last_results.json");
        let result = aggregate(
            "alice123",
            vec![
                ProbeOutcome::classified("GitHub", true, "https://github.com/alice123".to_owned()),
                ProbeOutcome::failed("Reddit", ProbeError::Timeout),
            ],
        );

        save(&path, &result).unwrap();

        assert_eq!(load(&path).unwrap(), Some(result));
    }

    #[test]
    fn saving_replaces_previous_scan() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last_results.json");

        save(&path, &aggregate("first", vec![])).unwrap();
        save(&path, &aggregate("second", vec![])).unwrap();

        assert_eq!(load(&path).unwrap().unwrap().subject, "second");
    }

    #[test]
    fn reads_snapshot_without_error_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last_results.json");
        fs::write(
            &path,
            r#"{"username_investigation": {"searched_username": "bob", "total_found": 1,
                "profiles": [{"platform": "GitHub", "found": true, "url": "https://github.com/bob"},
                             {"platform": "GitLab", "found": false, "url": null}]}}"#,
        )
        .unwrap();

        let result = load(&path).unwrap().unwrap();

        assert_eq!(result.subject, "bob");
        assert_eq!(result.outcomes.len(), 2);
        assert_eq!(result.outcomes[1].error, None);
    }

    #[test]
    fn stale_total_is_recounted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last_results.json");
        fs::write(
            &path,
            r#"{"username_investigation": {"searched_username": "bob", "total_found": 7,
                "profiles": [{"platform": "GitHub", "found": true, "url": "https://github.com/bob"},
                             {"platform": "GitLab", "found": false, "url": null}]}}"#,
        )
        .unwrap();

        let result = load(&path).unwrap().unwrap();

        assert_eq!(result.total_found, 1);
    }

    #[test]
    fn corrupt_snapshot_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last_results.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(load(&path).is_err());
    }
}
