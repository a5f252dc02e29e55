//! Execution engine: invocation assembly and the external encoder boundary

pub mod assembler;
pub mod runner;

pub use assembler::CommandAssembler;
pub use runner::FfmpegRunner;

/// Immutable per-run encoding parameters, resolved once from the defaults
/// and the command line before any graph work happens.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeConfig {
    /// Video codec, e.g. `libx264`
    pub video_codec: String,
    /// Constant rate factor
    pub crf: u32,
    /// Encoder speed preset, e.g. `medium`
    pub preset: String,
    /// Audio codec, e.g. `aac`
    pub audio_codec: String,
    /// Audio bitrate, e.g. `128k`
    pub audio_bitrate: String,
}
