//! Blocking ffmpeg invocation.
//!
//! The single external call of a run. Verbose mode streams the encoder's
//! own output to the terminal; otherwise stderr is captured and surfaced
//! verbatim on failure.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::error::{ClipCatError, ClipCatResult};

/// Runs an assembled ffmpeg invocation
#[derive(Debug, Clone)]
pub struct FfmpegRunner {
    ffmpeg_path: PathBuf,
}

impl FfmpegRunner {
    /// Create a runner using the given ffmpeg binary
    pub fn new(ffmpeg_path: PathBuf) -> Self {
        Self { ffmpeg_path }
    }

    /// Create a runner that finds ffmpeg on `PATH`
    pub fn from_path() -> ClipCatResult<Self> {
        which::which("ffmpeg")
            .map(Self::new)
            .map_err(|_| ClipCatError::ToolNotFound {
                tool: "ffmpeg".to_string(),
            })
    }

    /// Execute the invocation; a partial `output` created by this run is
    /// removed again if the encoder fails. An output file that already
    /// existed before the run is never touched (ffmpeg with `-nostdin`
    /// refuses to overwrite it and fails without writing).
    pub fn run(&self, args: &[String], output: &Path, verbose: bool) -> ClipCatResult<()> {
        debug!(?args, "running ffmpeg");

        let output_preexisted = output.exists();

        if verbose {
            let status = Command::new(&self.ffmpeg_path)
                .args(args)
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()?;

            if !status.success() {
                self.cleanup_partial(output, output_preexisted);
                return Err(ClipCatError::ExecutionFailure {
                    status: status.to_string(),
                    stderr: "see streamed output above".to_string(),
                });
            }
        } else {
            let result = Command::new(&self.ffmpeg_path).args(args).output()?;

            if !result.status.success() {
                self.cleanup_partial(output, output_preexisted);
                return Err(ClipCatError::ExecutionFailure {
                    status: result.status.to_string(),
                    stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
                });
            }
        }

        Ok(())
    }

    fn cleanup_partial(&self, output: &Path, output_preexisted: bool) {
        if output_preexisted || !output.exists() {
            return;
        }
        if let Err(e) = std::fs::remove_file(output) {
            warn!("Failed to remove partial output {}: {}", output.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Build a fake ffmpeg that writes its last argument and exits non-zero
    #[cfg(unix)]
    fn failing_encoder(dir: &Path, writes_output: bool) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("ffmpeg");
        let script = if writes_output {
            "#!/bin/sh\nfor last in \"$@\"; do :; done\n: > \"$last\"\necho boom >&2\nexit 1\n"
        } else {
            "#!/bin/sh\necho boom >&2\nexit 1\n"
        };
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(script.as_bytes()).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path
    }

    #[test]
    #[cfg(unix)]
    fn failed_run_preserves_preexisting_output() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("shorts.mp4");
        std::fs::write(&output, b"user data").unwrap();

        let runner = FfmpegRunner::new(failing_encoder(dir.path(), false));
        let args: Vec<String> = vec![output.to_string_lossy().into_owned()];
        let err = runner.run(&args, &output, false).unwrap_err();

        assert!(matches!(err, ClipCatError::ExecutionFailure { .. }));
        assert!(output.exists());
        assert_eq!(std::fs::read(&output).unwrap(), b"user data");
    }

    #[test]
    #[cfg(unix)]
    fn failed_run_removes_partial_output_it_created() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("shorts.mp4");

        let runner = FfmpegRunner::new(failing_encoder(dir.path(), true));
        let args: Vec<String> = vec![output.to_string_lossy().into_owned()];
        let err = runner.run(&args, &output, false).unwrap_err();

        assert!(matches!(err, ClipCatError::ExecutionFailure { .. }));
        assert!(!output.exists());
    }

    #[test]
    #[cfg(unix)]
    fn failure_surfaces_captured_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("shorts.mp4");

        let runner = FfmpegRunner::new(failing_encoder(dir.path(), false));
        let err = runner.run(&[], &output, false).unwrap_err();

        match err {
            ClipCatError::ExecutionFailure { stderr, .. } => assert_eq!(stderr, "boom"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
