//! Command implementation: the full parse -> probe -> validate -> build ->
//! plan -> assemble -> execute pipeline.

use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use crate::cli::args::ExtractArgs;
use crate::config::Defaults;
use crate::domain::model::{Resolution, ScaleMode};
use crate::domain::rules::{pair_tokens, RangeValidator};
use crate::engine::{CommandAssembler, EncodeConfig, FfmpegRunner};
use crate::error::ClipCatError;
use crate::graph::FilterGraphBuilder;
use crate::planner::OutputPlanner;
use crate::probe::SourceProbe;

/// Execute the extraction pipeline
pub fn run(args: ExtractArgs) -> Result<()> {
    if !Path::new(&args.input).exists() {
        return Err(ClipCatError::InputFileNotFound {
            path: args.input.clone(),
        }
        .into());
    }

    if args.time_tokens.is_empty() {
        bail!("No time ranges provided. Specify start/end time pairs");
    }

    let pairs = pair_tokens(&args.time_tokens)?;

    // One immutable configuration value; CLI overrides file overrides built-in
    let defaults = Defaults::load().context("Failed to load configuration")?;
    let resolution =
        Resolution::parse(args.resolution.as_deref().unwrap_or(&defaults.resolution))?;
    let scale_mode = ScaleMode::parse(args.scale_mode.as_deref().unwrap_or(&defaults.scale_mode))?;
    let encode_config = EncodeConfig {
        video_codec: args.codec_v.unwrap_or(defaults.video_codec),
        crf: args.crf.unwrap_or(defaults.crf),
        preset: args.preset.unwrap_or(defaults.preset),
        audio_codec: args.codec_a.unwrap_or(defaults.audio_codec),
        audio_bitrate: args.audio_bitrate.unwrap_or(defaults.audio_bitrate),
    };

    info!("Analyzing input video: {}", args.input);
    let probe = SourceProbe::from_path()?;
    let meta = probe
        .probe(Path::new(&args.input))
        .context("Failed to probe input file")?;
    info!("Source duration: {:.2}s", meta.duration);
    info!("Has audio: {}", meta.has_audio);
    if !meta.rotation.is_upright() {
        info!("Source rotation: {} degrees", meta.rotation.degrees());
    }

    let validator = RangeValidator::new(args.clamp);
    let (ranges, warnings) = validator.validate(&pairs, meta.duration)?;
    for warning in &warnings {
        warn!("{}", warning);
    }

    let builder = FilterGraphBuilder::new(&meta, scale_mode, resolution, None);
    let graph = builder.build(&ranges)?;

    let planner = OutputPlanner::new(&builder);
    let (spec, warnings) = planner.plan(graph, args.max_duration, args.only_audio)?;
    for warning in &warnings {
        warn!("{}", warning);
    }

    let output = args
        .output
        .unwrap_or_else(|| spec.container.default_output().to_string());

    let invocation = CommandAssembler::assemble(&spec, &args.input, &output, &encode_config);

    if args.dry_run {
        println!("Generated ffmpeg command:");
        println!("ffmpeg {}", invocation.join(" "));
        return Ok(());
    }

    info!(
        "Processing {} segment(s) to {}",
        spec.graph.segments.len(),
        output
    );
    let runner = FfmpegRunner::from_path()?;
    runner
        .run(&invocation, Path::new(&output), args.verbose)
        .context("Encoding failed")?;

    info!("Successfully created: {}", output);
    Ok(())
}
