use std::path::PathBuf;

use thiserror::Error;

use crate::tree::arena::NodeId;

/// Failures reading the scanner's report directory.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report directory not found: {0}")]
    MissingDir(PathBuf),
    #[error("no analysis data found in {0}")]
    NoData(PathBuf),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("unknown color mode `{0}`; expected `type`, `category` or `size`")]
    ColorMode(String),
    #[error("invalid viewport {width}x{height}")]
    Viewport { width: f64, height: f64 },
}

/// A navigation request that does not apply to the current state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    #[error("node {0:?} has no children to drill into")]
    NotDrillable(NodeId),
    #[error("already at the top level")]
    AtRoot,
    #[error("breadcrumb index {index} is deeper than the current depth {depth}")]
    InvalidIndex { index: usize, depth: usize },
}
