use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::layout::LayoutConfig;
use crate::render::colors::ColorMode;
use crate::scanner::DEFAULT_REPORT_DIR;

pub const DEFAULT_VIEWPORT_WIDTH: f64 = 1280.0;
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 800.0;

/// Settings for one treemap session. Every field is optional in the TOML file.
///
/// ```toml
/// report_dir = "/tmp/synology-space-report"
/// width = 1920
/// height = 1080
/// color_mode = "size"
///
/// [layout]
/// nest_depth = 2
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub report_dir: PathBuf,
    pub width: f64,
    pub height: f64,
    pub color_mode: ColorMode,
    pub layout: LayoutConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            report_dir: PathBuf::from(DEFAULT_REPORT_DIR),
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
            color_mode: ColorMode::default(),
            layout: LayoutConfig::default(),
        }
    }
}

impl ViewerConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ViewerConfig = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if !ok(self.width) || !ok(self.height) {
            return Err(ConfigError::Viewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spaceview.toml");
        fs::write(
            &path,
            "width = 1920.0\ncolor_mode = \"category\"\n\n[layout]\nnest_depth = 2\n",
        )
        .unwrap();

        let config = ViewerConfig::from_file(&path).unwrap();
        assert_eq!(config.width, 1920.0);
        assert_eq!(config.height, DEFAULT_VIEWPORT_HEIGHT);
        assert_eq!(config.color_mode, ColorMode::Category);
        assert_eq!(config.layout.nest_depth, 2);
        assert_eq!(config.layout.border, LayoutConfig::default().border);
        assert_eq!(config.report_dir, PathBuf::from(DEFAULT_REPORT_DIR));
    }

    #[test]
    fn bad_files_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            ViewerConfig::from_file(&missing),
            Err(ConfigError::Read { .. })
        ));

        let broken = dir.path().join("broken.toml");
        fs::write(&broken, "width = \"wide\"").unwrap();
        assert!(matches!(
            ViewerConfig::from_file(&broken),
            Err(ConfigError::Parse { .. })
        ));

        let zero = dir.path().join("zero.toml");
        fs::write(&zero, "height = 0.0").unwrap();
        assert!(matches!(
            ViewerConfig::from_file(&zero),
            Err(ConfigError::Viewport { .. })
        ));
    }
}
