//! Default configuration loading.
//!
//! Built-in defaults, optionally overridden by a `clipcat.toml` next to the
//! working directory, are resolved into one immutable [`Defaults`] value.
//! Command-line arguments override both; precedence is CLI > file >
//! built-in.

use serde::Deserialize;
use tracing::info;

use crate::error::{ClipCatError, ClipCatResult};

/// Candidate configuration file locations, checked in order
const CONFIG_PATHS: &[&str] = &["clipcat.toml", "config/clipcat.toml"];

/// Default encoding and output parameters
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Defaults {
    /// Video codec
    pub video_codec: String,
    /// Constant rate factor
    pub crf: u32,
    /// Encoder speed preset
    pub preset: String,
    /// Audio codec
    pub audio_codec: String,
    /// Audio bitrate
    pub audio_bitrate: String,
    /// Target resolution token (`WIDTHxHEIGHT`)
    pub resolution: String,
    /// Spatial-fit policy token
    pub scale_mode: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            video_codec: "libx264".to_string(),
            crf: 20,
            preset: "medium".to_string(),
            audio_codec: "aac".to_string(),
            audio_bitrate: "128k".to_string(),
            resolution: "1080x1920".to_string(),
            scale_mode: "pad".to_string(),
        }
    }
}

impl Defaults {
    /// Load defaults, applying the first configuration file found
    pub fn load() -> ClipCatResult<Self> {
        for path in CONFIG_PATHS {
            if std::path::Path::new(path).exists() {
                info!("Loading configuration from: {}", path);
                return Self::from_file(path);
            }
        }
        Ok(Self::default())
    }

    /// Parse defaults from a TOML file
    pub fn from_file(path: &str) -> ClipCatResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| ClipCatError::ConfigError {
            message: format!("{}: {}", path, e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_defaults() {
        let defaults = Defaults::default();
        assert_eq!(defaults.video_codec, "libx264");
        assert_eq!(defaults.crf, 20);
        assert_eq!(defaults.resolution, "1080x1920");
        assert_eq!(defaults.scale_mode, "pad");
    }

    #[test]
    fn test_file_overrides_builtin() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "crf = 23\npreset = \"fast\"").unwrap();

        let defaults = Defaults::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(defaults.crf, 23);
        assert_eq!(defaults.preset, "fast");
        // Untouched fields keep the built-in value
        assert_eq!(defaults.video_codec, "libx264");
    }

    #[test]
    fn test_unknown_field_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bitrate = \"1M\"").unwrap();

        let err = Defaults::from_file(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ClipCatError::ConfigError { .. }));
    }
}
