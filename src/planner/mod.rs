//! Output planning: duration capping and output shape selection.

use crate::domain::model::Warning;
use crate::error::{ClipCatError, ClipCatResult};
use crate::graph::{FilterGraph, FilterGraphBuilder, SegmentOp};

/// Output container selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerFormat {
    Mp4,
    M4a,
}

impl ContainerFormat {
    /// Default output file name for this container
    pub fn default_output(&self) -> &'static str {
        match self {
            ContainerFormat::Mp4 => "shorts.mp4",
            ContainerFormat::M4a => "shorts.m4a",
        }
    }
}

/// The finished plan handed to the command assembler
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSpec {
    pub graph: FilterGraph,
    pub audio_only: bool,
    pub container: ContainerFormat,
}

/// Applies the total-duration cap and selects the output shape.
///
/// Holds the graph builder so truncated segments are rebuilt through the
/// same chain recipe instead of being edited in place.
pub struct OutputPlanner<'a, 'b> {
    builder: &'a FilterGraphBuilder<'b>,
}

impl<'a, 'b> OutputPlanner<'a, 'b> {
    pub fn new(builder: &'a FilterGraphBuilder<'b>) -> Self {
        Self { builder }
    }

    /// Produce the output spec, capping total duration when requested.
    ///
    /// Segments are kept in input order until the cumulative duration would
    /// cross the cap; the segment on the boundary is truncated so the total
    /// equals the cap exactly (a zero-length remainder drops it), and every
    /// later segment is dropped with a warning.
    pub fn plan(
        &self,
        graph: FilterGraph,
        max_duration: Option<f64>,
        audio_only: bool,
    ) -> ClipCatResult<(OutputSpec, Vec<Warning>)> {
        if audio_only && !graph.concat_audio {
            return Err(ClipCatError::NoAudioStream);
        }

        let mut warnings = Vec::new();
        let graph = match max_duration {
            Some(cap) if graph.total_duration() > cap => {
                self.cap_graph(graph, cap, &mut warnings)?
            }
            _ => graph,
        };

        let graph = if audio_only {
            strip_video(graph)
        } else {
            graph
        };

        let container = if audio_only {
            ContainerFormat::M4a
        } else {
            ContainerFormat::Mp4
        };

        Ok((
            OutputSpec {
                graph,
                audio_only,
                container,
            },
            warnings,
        ))
    }

    fn cap_graph(
        &self,
        graph: FilterGraph,
        cap: f64,
        warnings: &mut Vec<Warning>,
    ) -> ClipCatResult<FilterGraph> {
        let mut kept: Vec<SegmentOp> = Vec::new();
        let mut accumulated = 0.0_f64;
        let mut capped = false;

        for segment in graph.segments {
            let range = segment.range;
            if capped {
                warnings.push(Warning::Dropped { index: range.index });
                continue;
            }

            if accumulated + range.duration() <= cap {
                accumulated += range.duration();
                kept.push(segment);
                continue;
            }

            // Boundary segment: truncate to the exact remainder
            let remaining = cap - accumulated;
            capped = true;
            if remaining > 0.0 {
                let mut truncated = range;
                truncated.end = truncated.start + remaining;
                warnings.push(Warning::Truncated {
                    index: range.index,
                    kept: remaining,
                });
                kept.push(self.builder.segment(truncated));
                accumulated = cap;
            } else {
                // A zero-length remainder is a skip, same as validation
                warnings.push(Warning::Dropped { index: range.index });
            }
        }

        if kept.is_empty() {
            return Err(ClipCatError::NoValidRanges);
        }

        Ok(FilterGraph {
            segments: kept,
            concat_audio: graph.concat_audio,
        })
    }
}

/// Drop the video branch entirely, leaving trim-only audio chains
fn strip_video(graph: FilterGraph) -> FilterGraph {
    FilterGraph {
        segments: graph
            .segments
            .into_iter()
            .map(|s| SegmentOp {
                video: Vec::new(),
                ..s
            })
            .collect(),
        concat_audio: graph.concat_audio,
    }
}
