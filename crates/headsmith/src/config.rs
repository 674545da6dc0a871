//! Editor configuration, loaded from RON.
//!
//! ```ron
//! (
//!     brush_color: "#2196F3",
//!     brush_size: 2,
//!     recent_colors: 8,
//!     tool: brush,
//! )
//! ```
//!
//! Every field is optional. The default location is
//! `~/.config/headsmith/editor.ron`; a missing file there means defaults.

use std::path::{Path, PathBuf};

use headsmith_texture::{CANVAS_SIZE, Color};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::session::Tool;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Initial brush colour.
    pub brush_color: Color,
    /// Initial brush size in pixels (square side).
    pub brush_size: u32,
    /// How many recently used colours to remember.
    pub recent_colors: usize,
    /// Initially selected tool.
    pub tool: Tool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            brush_color: Color::rgb(0xF4, 0x43, 0x36),
            brush_size: 1,
            recent_colors: 8,
            tool: Tool::Brush,
        }
    }
}

impl EditorConfig {
    /// `~/.config/headsmith/editor.ron`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("headsmith").join("editor.ron"))
    }

    /// Load from an explicit path, or from [`default_path`](Self::default_path)
    /// when `path` is `None`.
    ///
    /// An explicit path must exist. A missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load_from(path);
        }

        let Some(path) = Self::default_path() else {
            tracing::info!("no config directory available, using default editor config");
            return Ok(Self::default());
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "editor config not found, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_ron(&text)?;
        tracing::info!(path = %path.display(), "loaded editor config");
        Ok(config)
    }

    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.brush_size == 0 || self.brush_size > CANVAS_SIZE {
            return Err(ConfigError::Invalid(format!(
                "brush_size must be between 1 and {CANVAS_SIZE}, got {}",
                self.brush_size
            )));
        }
        if self.recent_colors == 0 {
            return Err(ConfigError::Invalid("recent_colors must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.brush_color.to_hex(), "#f44336");
        assert_eq!(config.brush_size, 1);
        assert_eq!(config.recent_colors, 8);
        assert_eq!(config.tool, Tool::Brush);
    }

    #[test]
    fn test_partial_ron_fills_defaults() {
        let config = EditorConfig::from_ron(r##"(brush_size: 3, tool: eraser)"##).unwrap();
        assert_eq!(config.brush_size, 3);
        assert_eq!(config.tool, Tool::Eraser);
        assert_eq!(config.recent_colors, 8);
        assert_eq!(config.brush_color, EditorConfig::default().brush_color);
    }

    #[test]
    fn test_empty_ron_is_default() {
        assert_eq!(EditorConfig::from_ron("()").unwrap(), EditorConfig::default());
    }

    #[test]
    fn test_bad_colour_is_parse_error() {
        let err = EditorConfig::from_ron(r##"(brush_color: "blue")"##).unwrap_err();
        assert!(matches!(err, ConfigError::Ron(_)));
    }

    #[test]
    fn test_zero_brush_size_rejected() {
        let err = EditorConfig::from_ron("(brush_size: 0)").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_ron_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("editor.ron");
        let config = EditorConfig {
            brush_color: Color::rgb(0x21, 0x96, 0xF3),
            brush_size: 4,
            recent_colors: 3,
            tool: Tool::Picker,
        };
        std::fs::write(&path, config.to_ron().unwrap()).unwrap();

        assert_eq!(EditorConfig::load(Some(&path)).unwrap(), config);
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = EditorConfig::load(Some(&dir.path().join("missing.ron"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
