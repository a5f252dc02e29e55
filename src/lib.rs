//! ClipCat CLI Library
//!
//! Extracts an ordered list of time ranges from one source video and emits a
//! single output that concatenates those ranges, optionally re-framed to a
//! target aspect ratio. The heart of the crate is the range validation and
//! filter-graph construction pipeline; probing and encoding are delegated to
//! the external ffprobe/ffmpeg tools.

pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod graph;
pub mod planner;
pub mod probe;

// Re-export commonly used types
pub use config::Defaults;
pub use domain::model::{
    Resolution, Rotation, ScaleMode, SourceMetadata, TimeRange, TimeSpec, Warning,
};
pub use domain::rules::{pair_tokens, RangeValidator};
pub use engine::{CommandAssembler, EncodeConfig, FfmpegRunner};
pub use error::{ClipCatError, ClipCatResult};
pub use graph::{FilterGraph, FilterGraphBuilder, SegmentOp};
pub use planner::{ContainerFormat, OutputPlanner, OutputSpec};
pub use probe::SourceProbe;
