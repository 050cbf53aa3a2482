//! Input side of the pipeline: the JSON files an external NAS scanner leaves
//! in its report directory. Nothing here walks the filesystem itself.

pub mod report;
pub mod types;

pub use report::{load_report, DEFAULT_REPORT_DIR};
