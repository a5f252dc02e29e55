//! Command-line argument definitions

use clap::Args;

/// Arguments for the extraction pipeline
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Input video file path
    pub input: String,

    /// Start and end times (must be an even number of tokens)
    #[arg(num_args = 0..)]
    pub time_tokens: Vec<String>,

    /// Output file path (default: shorts.mp4, or shorts.m4a with --only-audio)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Target WxH resolution (default: 1080x1920)
    #[arg(short, long)]
    pub resolution: Option<String>,

    /// Scaling mode: pad, crop, or stretch (default: pad)
    #[arg(long)]
    pub scale_mode: Option<String>,

    /// Video codec (default: libx264)
    #[arg(long)]
    pub codec_v: Option<String>,

    /// CRF value (default: 20)
    #[arg(long)]
    pub crf: Option<u32>,

    /// Encoding preset (default: medium)
    #[arg(long)]
    pub preset: Option<String>,

    /// Audio codec (default: aac)
    #[arg(long)]
    pub codec_a: Option<String>,

    /// Audio bitrate (default: 128k)
    #[arg(long)]
    pub audio_bitrate: Option<String>,

    /// Print the ffmpeg command without running it
    #[arg(long)]
    pub dry_run: bool,

    /// Stream ffmpeg output and enable debug logging
    #[arg(long)]
    pub verbose: bool,

    /// Cap final output length (seconds)
    #[arg(long)]
    pub max_duration: Option<f64>,

    /// Clamp start/end to the source duration instead of failing
    #[arg(long)]
    pub clamp: bool,

    /// Emit only the audio track
    #[arg(long)]
    pub only_audio: bool,
}
