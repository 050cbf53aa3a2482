use std::fs;
use std::path::Path;

use serde::de::{Deserialize, DeserializeOwned};
use serde_json::Value;

use super::types::{DuplicateGroup, FileRecord, LogEntry, RecycleBin, ScanReport};
use crate::error::ReportError;

pub const DEFAULT_REPORT_DIR: &str = "/tmp/synology-space-report";

/// Read every known module file from `dir`.
///
/// A missing or unparseable module file only removes that category. Records
/// that do not match the expected shape are dropped one by one.
pub fn load_report(dir: &Path) -> Result<ScanReport, ReportError> {
    if !dir.is_dir() {
        return Err(ReportError::MissingDir(dir.to_path_buf()));
    }

    let report = ScanReport {
        large_files: load_module(dir, "large_files").and_then(|v| parse_large_files(&v)),
        recycle_bins: load_module(dir, "recycle_bins").and_then(|v| parse_recycle_bins(&v)),
        logs: load_module(dir, "logs").and_then(|v| parse_logs(&v)),
        duplicates: load_module(dir, "duplicates").and_then(|v| parse_duplicates(&v)),
    };

    if report.is_empty() {
        return Err(ReportError::NoData(dir.to_path_buf()));
    }
    Ok(report)
}

fn load_module(dir: &Path, module: &str) -> Option<Value> {
    let path = dir.join(format!("{module}.json"));
    if !path.exists() {
        tracing::debug!("No {} report at {}", module, path.display());
        return None;
    }
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", path.display(), e);
            return None;
        }
    };
    match serde_json::from_str(&text) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Ignoring malformed {}: {}", path.display(), e);
            None
        }
    }
}

/// Deserialize each element independently, skipping the ones that don't fit.
fn records<T: DeserializeOwned>(items: &[Value]) -> Vec<T> {
    let mut dropped = 0usize;
    let parsed: Vec<T> = items
        .iter()
        .filter_map(|item| {
            T::deserialize(item)
                .map_err(|_| dropped += 1)
                .ok()
        })
        .collect();
    if dropped > 0 {
        tracing::debug!("Dropped {} malformed records", dropped);
    }
    parsed
}

/// Pull a non-empty record list out of `value[key]`.
fn keyed_records<T: DeserializeOwned>(value: &Value, key: &str) -> Option<Vec<T>> {
    let items = value.get(key)?.as_array()?;
    if items.is_empty() {
        return None;
    }
    Some(records(items))
}

/// `large_files.json`: a bare array of `{path, size, modified}`.
pub fn parse_large_files(value: &Value) -> Option<Vec<FileRecord>> {
    let items = value.as_array()?;
    if items.is_empty() {
        return None;
    }
    Some(records(items))
}

/// `recycle_bins.json`: `{bins: [{share, size_bytes, file_count}], ...}`.
pub fn parse_recycle_bins(value: &Value) -> Option<Vec<RecycleBin>> {
    keyed_records(value, "bins")
}

/// `logs.json`: `{logs: [{path, size_bytes, safe_to_clean}], ...}`.
pub fn parse_logs(value: &Value) -> Option<Vec<LogEntry>> {
    keyed_records(value, "logs")
}

/// `duplicates.json`: `{groups: [{size, count, wasted, files}], ...}`.
pub fn parse_duplicates(value: &Value) -> Option<Vec<DuplicateGroup>> {
    keyed_records(value, "groups")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn malformed_file_records_are_dropped_individually() {
        let value = json!([
            {"path": "/vol1/a.iso", "size": 4096, "modified": "2024-01-02 10:00"},
            {"path": "/vol1/neg", "size": -5},
            {"size": 100},
            {"path": "/vol1/float", "size": 1.5},
            {"path": "/vol1/b.mkv", "size": 10}
        ]);

        let files = parse_large_files(&value).unwrap();
        let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["/vol1/a.iso", "/vol1/b.mkv"]);
        assert_eq!(files[0].modified.as_deref(), Some("2024-01-02 10:00"));
    }

    #[test]
    fn empty_or_wrong_shaped_modules_are_absent() {
        assert!(parse_large_files(&json!([])).is_none());
        assert!(parse_large_files(&json!({"files": []})).is_none());
        assert!(parse_recycle_bins(&json!({"bins": []})).is_none());
        assert!(parse_logs(&json!([])).is_none());
    }

    #[test]
    fn recycle_bins_default_missing_share() {
        let bins = parse_recycle_bins(&json!({
            "bins": [{"size_bytes": 10, "file_count": 2}],
            "total_size_bytes": 10
        }))
        .unwrap();
        assert_eq!(bins[0].share, "unknown");
        assert_eq!(bins[0].file_count, 2);
    }

    #[test]
    fn load_report_reads_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("logs.json"),
            r#"{"logs": [{"path": "/var/log/x.log", "size_bytes": 9, "safe_to_clean": true}]}"#,
        )
        .unwrap();
        fs::write(dir.path().join("duplicates.json"), "not json").unwrap();

        let report = load_report(dir.path()).unwrap();
        assert_eq!(report.logs.as_ref().unwrap().len(), 1);
        assert!(report.duplicates.is_none());
        assert!(report.large_files.is_none());
    }

    #[test]
    fn load_report_errors_on_missing_or_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_report(&dir.path().join("nope")),
            Err(ReportError::MissingDir(_))
        ));
        assert!(matches!(load_report(dir.path()), Err(ReportError::NoData(_))));
    }
}
