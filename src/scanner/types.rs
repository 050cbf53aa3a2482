use serde::{Deserialize, Serialize};

/// One file reported by the large-file scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Slash-delimited absolute path
    pub path: String,
    /// File size in bytes
    pub size: u64,
    #[serde(default)]
    pub modified: Option<String>,
}

/// Per-share recycle bin summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecycleBin {
    #[serde(default = "unknown_share")]
    pub share: String,
    #[serde(default)]
    pub size_bytes: u64,
    #[serde(default)]
    pub file_count: u64,
}

fn unknown_share() -> String {
    "unknown".to_string()
}

/// An oversized log file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub path: String,
    #[serde(default)]
    pub size_bytes: u64,
    #[serde(default)]
    pub safe_to_clean: bool,
}

/// A set of byte-identical files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// Content hash identifying the group, when the scanner provides one
    #[serde(default)]
    pub hash: Option<String>,
    /// Size of a single copy
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub count: u64,
    /// Bytes that removing all but one copy would free
    #[serde(default)]
    pub wasted: u64,
    #[serde(default)]
    pub files: Vec<String>,
}

/// Everything the external scanner produced. `None` means the category was
/// not reported (or had nothing in it).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub large_files: Option<Vec<FileRecord>>,
    pub recycle_bins: Option<Vec<RecycleBin>>,
    pub logs: Option<Vec<LogEntry>>,
    pub duplicates: Option<Vec<DuplicateGroup>>,
}

impl ScanReport {
    pub fn is_empty(&self) -> bool {
        self.large_files.is_none()
            && self.recycle_bins.is_none()
            && self.logs.is_none()
            && self.duplicates.is_none()
    }
}
