//! Serializes an [`OutputSpec`] into an ffmpeg invocation.
//!
//! Pure rendering: every correctness rule has already been enforced on the
//! structured graph, so this module only turns steps into filter syntax and
//! flags.

use crate::domain::model::Rotation;
use crate::engine::EncodeConfig;
use crate::graph::{AspectFit, AudioStep, SegmentOp, VideoStep};
use crate::planner::OutputSpec;

/// Renders the operation graph into ffmpeg arguments
pub struct CommandAssembler;

impl CommandAssembler {
    /// Assemble the full argument list (without the program name)
    pub fn assemble(
        spec: &OutputSpec,
        input: &str,
        output: &str,
        config: &EncodeConfig,
    ) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "-hide_banner".into(),
            "-nostdin".into(),
            "-i".into(),
            input.into(),
            "-filter_complex".into(),
            Self::filter_complex(spec),
        ];

        if spec.audio_only {
            args.extend(["-map".into(), "[outa]".into()]);
        } else {
            args.extend(["-map".into(), "[outv]".into()]);
            if spec.graph.concat_audio {
                args.extend(["-map".into(), "[outa]".into()]);
            }
            args.extend([
                "-c:v".into(),
                config.video_codec.clone(),
                "-crf".into(),
                config.crf.to_string(),
                "-preset".into(),
                config.preset.clone(),
            ]);
        }

        if spec.audio_only || spec.graph.concat_audio {
            args.extend([
                "-c:a".into(),
                config.audio_codec.clone(),
                "-b:a".into(),
                config.audio_bitrate.clone(),
            ]);
        }

        // Web-friendly layout for the MP4 family
        args.extend(["-movflags".into(), "+faststart".into()]);
        args.push(output.into());
        args
    }

    /// Render the labeled filter graph text
    pub fn filter_complex(spec: &OutputSpec) -> String {
        let mut parts = Vec::new();
        let n = spec.graph.segments.len();

        for (i, segment) in spec.graph.segments.iter().enumerate() {
            if !spec.audio_only {
                parts.push(format!("[0:v]{}[v{}]", render_video_chain(segment), i));
            }
            if let Some(audio) = &segment.audio {
                parts.push(format!("[0:a]{}[a{}]", render_audio_chain(audio), i));
            }
        }

        // One concatenation over all branches, in segment order
        let mut concat = String::new();
        for i in 0..n {
            if !spec.audio_only {
                concat.push_str(&format!("[v{}]", i));
            }
            if spec.graph.concat_audio {
                concat.push_str(&format!("[a{}]", i));
            }
        }
        let (v, a, labels) = if spec.audio_only {
            (0, 1, "[outa]")
        } else if spec.graph.concat_audio {
            (1, 1, "[outv][outa]")
        } else {
            (1, 0, "[outv]")
        };
        concat.push_str(&format!("concat=n={}:v={}:a={}{}", n, v, a, labels));
        parts.push(concat);

        parts.join("; ")
    }
}

fn render_video_chain(segment: &SegmentOp) -> String {
    segment
        .video
        .iter()
        .map(render_video_step)
        .collect::<Vec<_>>()
        .join(",")
}

fn render_video_step(step: &VideoStep) -> String {
    match step {
        VideoStep::Rotate(rotation) => match rotation {
            Rotation::Cw90 => "transpose=1".to_string(),
            Rotation::Cw180 => "transpose=1,transpose=1".to_string(),
            Rotation::Cw270 => "transpose=2".to_string(),
            // An upright rotate step never reaches the renderer, but keep
            // the chain well-formed if it ever does
            Rotation::None => "null".to_string(),
        },
        VideoStep::Trim { start, end } => {
            format!("trim=start={}:end={},setpts=PTS-STARTPTS", start, end)
        }
        VideoStep::Scale { width, height, fit } => match fit {
            AspectFit::Decrease => format!(
                "scale={}:{}:force_original_aspect_ratio=decrease",
                width, height
            ),
            AspectFit::Increase => format!(
                "scale={}:{}:force_original_aspect_ratio=increase",
                width, height
            ),
            AspectFit::Exact => format!("scale={}:{}", width, height),
        },
        VideoStep::Pad { width, height } => {
            format!("pad={}:{}:(ow-iw)/2:(oh-ih)/2", width, height)
        }
        VideoStep::Crop { width, height } => format!("crop={}:{}", width, height),
        VideoStep::SetSar => "setsar=1".to_string(),
    }
}

fn render_audio_chain(steps: &[AudioStep]) -> String {
    steps
        .iter()
        .map(|step| match step {
            AudioStep::Trim { start, end } => {
                format!("atrim=start={}:end={},asetpts=PTS-STARTPTS", start, end)
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}
