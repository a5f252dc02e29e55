//! Source media inspection.
//!
//! Shells out to `ffprobe -v quiet -print_format json -show_format
//! -show_streams` and maps the JSON output into a [`SourceMetadata`]
//! record. The probe runs exactly once per invocation; the core never
//! retries or re-probes.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Deserialize;
use tracing::debug;

use crate::domain::model::{Rotation, SourceMetadata};
use crate::error::{ClipCatError, ClipCatResult};

/// A source prober backed by the `ffprobe` CLI
#[derive(Debug, Clone)]
pub struct SourceProbe {
    ffprobe_path: PathBuf,
}

impl SourceProbe {
    /// Create a prober using the given ffprobe binary
    pub fn new(ffprobe_path: PathBuf) -> Self {
        Self { ffprobe_path }
    }

    /// Create a prober that finds ffprobe on `PATH`
    pub fn from_path() -> ClipCatResult<Self> {
        which::which("ffprobe")
            .map(Self::new)
            .map_err(|_| ClipCatError::ToolNotFound {
                tool: "ffprobe".to_string(),
            })
    }

    /// Probe the source file for duration, audio presence, and rotation
    pub fn probe(&self, path: &Path) -> ClipCatResult<SourceMetadata> {
        let output = Command::new(&self.ffprobe_path)
            .args([
                "-v",
                "quiet",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
            ])
            .arg(path)
            .output()
            .map_err(|e| ClipCatError::ProbeFailure {
                message: format!("failed to run ffprobe: {}", e),
            })?;

        if !output.status.success() {
            return Err(ClipCatError::ProbeFailure {
                message: format!(
                    "ffprobe exited with {}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let parsed: FfprobeOutput =
            serde_json::from_str(&stdout).map_err(|e| ClipCatError::ProbeFailure {
                message: format!("ffprobe JSON parse error: {}", e),
            })?;

        parse_metadata(parsed)
    }
}

fn parse_metadata(output: FfprobeOutput) -> ClipCatResult<SourceMetadata> {
    let duration = output
        .format
        .duration
        .as_deref()
        .and_then(|d| d.parse::<f64>().ok())
        .ok_or_else(|| ClipCatError::ProbeFailure {
            message: "could not determine source duration".to_string(),
        })?;

    let has_audio = output
        .streams
        .iter()
        .any(|s| s.codec_type.as_deref() == Some("audio"));

    let video = output
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"));
    let rotation = video.map(stream_rotation).unwrap_or(Rotation::None);

    debug!(
        duration,
        has_audio,
        rotation = rotation.degrees(),
        "probed source metadata"
    );

    Ok(SourceMetadata {
        duration,
        has_audio,
        rotation,
    })
}

/// Extract rotation from Display Matrix side data, falling back to the
/// legacy `rotate` stream tag. ffprobe reports the side-data angle as a
/// number in newer builds and as a string in older ones.
///
/// The Display Matrix angle is counterclockwise-positive while the legacy
/// tag is clockwise-positive; the side-data value is negated so both
/// encodings of the same file normalize to the same rotation.
fn stream_rotation(stream: &FfprobeStream) -> Rotation {
    let side_data = stream
        .side_data_list
        .iter()
        .find(|d| d.side_data_type.as_deref() == Some("Display Matrix"))
        .and_then(|d| d.rotation.as_ref())
        .and_then(json_degrees)
        .map(|d| -d);

    let degrees = side_data.or_else(|| {
        stream
            .tags
            .rotate
            .as_deref()
            .and_then(|r| r.parse::<f64>().ok())
    });

    degrees
        .map(|d| Rotation::from_degrees(d.round() as i32))
        .unwrap_or(Rotation::None)
}

fn json_degrees(value: &serde_json::Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
}

// ---------------------------------------------------------------------------
// JSON structures
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: FfprobeFormat,
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: Option<String>,
    #[serde(default)]
    side_data_list: Vec<FfprobeSideData>,
    #[serde(default)]
    tags: FfprobeTags,
}

#[derive(Debug, Deserialize)]
struct FfprobeSideData {
    side_data_type: Option<String>,
    rotation: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeTags {
    rotate: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ClipCatResult<SourceMetadata> {
        parse_metadata(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_parse_basic_metadata() {
        let meta = parse(
            r#"{
                "format": {"duration": "120.5"},
                "streams": [
                    {"codec_type": "video"},
                    {"codec_type": "audio"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(meta.duration, 120.5);
        assert!(meta.has_audio);
        assert_eq!(meta.rotation, Rotation::None);
    }

    #[test]
    fn test_parse_without_audio() {
        let meta = parse(
            r#"{
                "format": {"duration": "10"},
                "streams": [{"codec_type": "video"}]
            }"#,
        )
        .unwrap();
        assert!(!meta.has_audio);
    }

    #[test]
    fn test_missing_duration_is_probe_failure() {
        let err = parse(r#"{"format": {}, "streams": []}"#).unwrap_err();
        assert!(matches!(err, ClipCatError::ProbeFailure { .. }));
    }

    #[test]
    fn test_rotation_from_display_matrix_number() {
        // Display Matrix angles are counterclockwise-positive: a portrait
        // clip reports -90 and needs a 90-degree clockwise rotation
        let meta = parse(
            r#"{
                "format": {"duration": "10"},
                "streams": [{
                    "codec_type": "video",
                    "side_data_list": [
                        {"side_data_type": "Display Matrix", "rotation": -90}
                    ]
                }]
            }"#,
        )
        .unwrap();
        assert_eq!(meta.rotation, Rotation::Cw90);
    }

    #[test]
    fn test_rotation_from_display_matrix_string() {
        let meta = parse(
            r#"{
                "format": {"duration": "10"},
                "streams": [{
                    "codec_type": "video",
                    "side_data_list": [
                        {"side_data_type": "Display Matrix", "rotation": "180"}
                    ]
                }]
            }"#,
        )
        .unwrap();
        assert_eq!(meta.rotation, Rotation::Cw180);
    }

    #[test]
    fn test_display_matrix_and_legacy_tag_agree_for_same_file() {
        // The same portrait source encoded both ways: newer ffprobe emits
        // Display Matrix -90, older emits tags.rotate "90". Both must land
        // on the same rotation.
        let side_data = parse(
            r#"{
                "format": {"duration": "10"},
                "streams": [{
                    "codec_type": "video",
                    "side_data_list": [
                        {"side_data_type": "Display Matrix", "rotation": -90}
                    ]
                }]
            }"#,
        )
        .unwrap();
        let legacy = parse(
            r#"{
                "format": {"duration": "10"},
                "streams": [{
                    "codec_type": "video",
                    "tags": {"rotate": "90"}
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(side_data.rotation, legacy.rotation);
        assert_eq!(side_data.rotation, Rotation::Cw90);
    }

    #[test]
    fn test_rotation_from_legacy_tag() {
        let meta = parse(
            r#"{
                "format": {"duration": "10"},
                "streams": [{
                    "codec_type": "video",
                    "tags": {"rotate": "90"}
                }]
            }"#,
        )
        .unwrap();
        assert_eq!(meta.rotation, Rotation::Cw90);
    }
}
