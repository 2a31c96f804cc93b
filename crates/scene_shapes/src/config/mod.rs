//! Configuration system
//!
//! Scene and timeline settings that can be loaded from TOML or RON files.

use std::path::Path;

pub use serde::{Deserialize, Serialize};

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML (`.toml`)
    Toml,
    /// Rusty Object Notation (`.ron`)
    Ron,
}

impl ConfigFormat {
    /// Pick a format from a file extension
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Parse configuration from a string in the given format
    fn parse(contents: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        match format {
            ConfigFormat::Toml => toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
            ConfigFormat::Ron => ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Serialize configuration to a string in the given format
    fn to_string_as(&self, format: ConfigFormat) -> Result<String, ConfigError> {
        match format {
            ConfigFormat::Toml => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
            }
            ConfigFormat::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string())),
        }
    }

    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents, format)
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = self.to_string_as(ConfigFormat::from_path(path)?)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Initial arena sizes for a [`Scene`](crate::scene::Scene)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Nodes to reserve room for
    pub node_capacity: usize,

    /// Shape features to reserve room for
    pub shape_capacity: usize,

    /// Shape groups to reserve room for
    pub group_capacity: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            node_capacity: 256,
            shape_capacity: 256,
            group_capacity: 8,
        }
    }
}

impl Config for SceneConfig {}

/// Settings for a [`Timeline`](crate::foundation::time::Timeline)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TimelineConfig {
    /// Minimal frame time in seconds, `0` disables frame limiting
    pub minimal_frame_time: f32,
}

impl Config for TimelineConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_config_toml_roundtrip() {
        let config = SceneConfig {
            node_capacity: 1024,
            shape_capacity: 2048,
            group_capacity: 4,
        };

        let text = config.to_string_as(ConfigFormat::Toml).unwrap();
        let parsed = SceneConfig::parse(&text, ConfigFormat::Toml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_timeline_config_ron() {
        let parsed = TimelineConfig::parse("(minimal_frame_time: 0.5)", ConfigFormat::Ron).unwrap();
        assert_eq!(parsed.minimal_frame_time, 0.5);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let parsed = SceneConfig::parse("node_capacity = 10", ConfigFormat::Toml).unwrap();
        assert_eq!(parsed.node_capacity, 10);
        assert_eq!(parsed.shape_capacity, SceneConfig::default().shape_capacity);
    }

    #[test]
    fn test_unsupported_extension() {
        let result = SceneConfig::load_from_file("scene.json");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("scene_shapes_config_{}.ron", std::process::id()));
        let config = TimelineConfig {
            minimal_frame_time: 0.25,
        };

        config.save_to_file(&path).unwrap();
        let loaded = TimelineConfig::load_from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_parse_error_is_reported() {
        let result = SceneConfig::parse("node_capacity = \"many\"", ConfigFormat::Toml);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
