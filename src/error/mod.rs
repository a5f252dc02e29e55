//! Error handling module for ClipCat

use thiserror::Error;

/// Main error type for ClipCat operations
#[derive(Error, Debug)]
pub enum ClipCatError {
    /// Input file not found or inaccessible
    #[error("Input file not found: {path}")]
    InputFileNotFound { path: String },

    /// Invalid time format
    #[error("Invalid time format: '{token}'. Expected HH:MM:SS[.ms] or seconds")]
    InvalidTimeFormat { token: String },

    /// Odd number of time tokens supplied
    #[error("Odd number of time tokens ({count}). Provide start/end pairs")]
    OddTokenCount { count: usize },

    /// Time range validation error
    #[error("Invalid range {index}: start ({start}) must be less than end ({end})")]
    InvalidRange { index: usize, start: f64, end: f64 },

    /// Range outside the source duration with clamping disabled
    #[error("Range {index} ({start}, {end}) is outside source duration (0, {duration})")]
    OutOfBounds {
        index: usize,
        start: f64,
        end: f64,
        duration: f64,
    },

    /// Every supplied range was skipped or rejected
    #[error("No valid time ranges remain after validation")]
    NoValidRanges,

    /// Internal consistency assertion on concatenation inputs
    #[error("Segments disagree on audio availability; cannot concatenate a mixed stream layout")]
    MixedAudioAvailability,

    /// Invalid resolution token
    #[error("Invalid resolution: '{value}'. Expected WIDTHxHEIGHT, e.g. 1080x1920")]
    InvalidResolution { value: String },

    /// Invalid scale mode token
    #[error("Invalid scale mode: '{value}'. Expected pad, crop, or stretch")]
    InvalidScaleMode { value: String },

    /// Audio-only output requested for a source without audio
    #[error("Audio-only output requested but the source has no audio stream")]
    NoAudioStream,

    /// Media probe error
    #[error("Failed to probe media file: {message}")]
    ProbeFailure { message: String },

    /// External encoder returned a failure
    #[error("ffmpeg failed with {status}: {stderr}")]
    ExecutionFailure { status: String, stderr: String },

    /// Required external tool is not installed
    #[error("Required tool not found on PATH: {tool}")]
    ToolNotFound { tool: String },

    /// Configuration file error
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for ClipCat operations
pub type ClipCatResult<T> = std::result::Result<T, ClipCatError>;
