//! Filter graph construction.
//!
//! Turns validated time ranges plus probed source facts into a structured,
//! ordered operation graph. The graph is plain data: it is built and
//! validated here and rendered into an ffmpeg invocation by the engine,
//! keeping correctness logic out of the serialization syntax.

use crate::domain::model::{Resolution, Rotation, ScaleMode, SourceMetadata, TimeRange};
use crate::error::{ClipCatError, ClipCatResult};

/// How a scale step treats the source aspect ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectFit {
    /// Preserve aspect ratio, fit entirely inside the target
    Decrease,
    /// Preserve aspect ratio, cover the target entirely
    Increase,
    /// Scale both axes to the target exactly
    Exact,
}

/// One transform step in a segment's video chain, in application order
#[derive(Debug, Clone, PartialEq)]
pub enum VideoStep {
    /// Counter-rotate so the decoded frame displays upright
    Rotate(Rotation),
    /// Select `[start, end)` and reset the timestamp origin to zero
    Trim { start: f64, end: f64 },
    /// Resize toward the target resolution
    Scale {
        width: u32,
        height: u32,
        fit: AspectFit,
    },
    /// Center-pad with black to exactly the target
    Pad { width: u32, height: u32 },
    /// Center-crop to exactly the target
    Crop { width: u32, height: u32 },
    /// Force square pixel sample aspect ratio
    SetSar,
}

/// One transform step in a segment's audio chain
#[derive(Debug, Clone, PartialEq)]
pub enum AudioStep {
    /// Select `[start, end)` and reset the timestamp origin to zero
    Trim { start: f64, end: f64 },
}

/// Per-range operation: the range plus its video and (optional) audio chains
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentOp {
    pub range: TimeRange,
    pub video: Vec<VideoStep>,
    pub audio: Option<Vec<AudioStep>>,
}

/// The complete operation graph: segments in input order plus one final
/// concatenation whose stream layout is uniform across segments.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterGraph {
    pub segments: Vec<SegmentOp>,
    /// True iff the concatenation carries an audio branch
    pub concat_audio: bool,
}

/// Builds segment chains from validated ranges.
///
/// All policy dispatch (scale mode, rotation) happens once here; the
/// resulting graph contains only concrete steps.
pub struct FilterGraphBuilder<'a> {
    meta: &'a SourceMetadata,
    scale_mode: ScaleMode,
    resolution: Resolution,
    rotation: Rotation,
}

impl<'a> FilterGraphBuilder<'a> {
    /// Create a builder; `rotation_override` replaces the probed rotation
    pub fn new(
        meta: &'a SourceMetadata,
        scale_mode: ScaleMode,
        resolution: Resolution,
        rotation_override: Option<Rotation>,
    ) -> Self {
        Self {
            meta,
            scale_mode,
            resolution,
            rotation: rotation_override.unwrap_or(meta.rotation),
        }
    }

    /// Build the full graph over the given ranges, preserving their order
    pub fn build(&self, ranges: &[TimeRange]) -> ClipCatResult<FilterGraph> {
        if ranges.is_empty() {
            return Err(ClipCatError::NoValidRanges);
        }

        let segments: Vec<SegmentOp> = ranges.iter().map(|r| self.segment(*r)).collect();
        let concat_audio = self.meta.has_audio;

        // Not reachable when segments come from this builder, but the
        // concat stream layout must be uniform, so assert it.
        if segments
            .iter()
            .any(|s| s.audio.is_some() != concat_audio)
        {
            return Err(ClipCatError::MixedAudioAvailability);
        }

        Ok(FilterGraph {
            segments,
            concat_audio,
        })
    }

    /// Build the chains for one range.
    ///
    /// Also used by the output planner to rebuild a truncated segment, so
    /// the graph is reconstructed rather than patched in place.
    pub fn segment(&self, range: TimeRange) -> SegmentOp {
        let Resolution { width, height } = self.resolution;
        let mut video = Vec::with_capacity(5);

        if !self.rotation.is_upright() {
            video.push(VideoStep::Rotate(self.rotation));
        }

        video.push(VideoStep::Trim {
            start: range.start,
            end: range.end,
        });

        match self.scale_mode {
            ScaleMode::Pad => {
                video.push(VideoStep::Scale {
                    width,
                    height,
                    fit: AspectFit::Decrease,
                });
                video.push(VideoStep::Pad { width, height });
            }
            ScaleMode::Crop => {
                video.push(VideoStep::Scale {
                    width,
                    height,
                    fit: AspectFit::Increase,
                });
                video.push(VideoStep::Crop { width, height });
            }
            ScaleMode::Stretch => {
                video.push(VideoStep::Scale {
                    width,
                    height,
                    fit: AspectFit::Exact,
                });
            }
        }

        video.push(VideoStep::SetSar);

        let audio = self.meta.has_audio.then(|| {
            vec![AudioStep::Trim {
                start: range.start,
                end: range.end,
            }]
        });

        SegmentOp {
            range,
            video,
            audio,
        }
    }
}

impl FilterGraph {
    /// Sum of all segment durations in seconds
    pub fn total_duration(&self) -> f64 {
        self.segments.iter().map(|s| s.range.duration()).sum()
    }
}
