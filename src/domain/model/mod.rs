// Domain models - Core types and data structures

use std::fmt;

use crate::error::{ClipCatError, ClipCatResult};

/// Time specification in seconds with fractional precision
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimeSpec {
    seconds: f64,
}

impl TimeSpec {
    /// Create a TimeSpec from seconds
    pub fn from_seconds(seconds: f64) -> Self {
        Self { seconds }
    }

    /// Time value in seconds
    pub fn as_seconds(&self) -> f64 {
        self.seconds
    }

    /// Parse a time token.
    ///
    /// Accepts `HH:MM:SS[.ms]` (minutes and seconds bounded to `[0,59]`,
    /// hours unbounded) or a plain non-negative decimal number of seconds.
    pub fn parse(token: &str) -> ClipCatResult<Self> {
        let trimmed = token.trim();
        let invalid = || ClipCatError::InvalidTimeFormat {
            token: token.to_string(),
        };

        // Plain seconds, e.g. "83.45" or "83"
        if !trimmed.contains(':') {
            let seconds: f64 = trimmed.parse().map_err(|_| invalid())?;
            if !seconds.is_finite() || seconds < 0.0 {
                return Err(invalid());
            }
            return Ok(Self::from_seconds(seconds));
        }

        // HH:MM:SS[.ms] — digits only: unbounded hours, two-digit minutes
        // and seconds, optional all-digit fraction
        let parts: Vec<&str> = trimmed.split(':').collect();
        if parts.len() != 3 {
            return Err(invalid());
        }

        let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        let (whole_seconds, fraction) = match parts[2].split_once('.') {
            Some((whole, frac)) => (whole, Some(frac)),
            None => (parts[2], None),
        };
        if !is_digits(parts[0])
            || parts[1].len() != 2
            || !is_digits(parts[1])
            || whole_seconds.len() != 2
            || !is_digits(whole_seconds)
            || !fraction.map_or(true, is_digits)
        {
            return Err(invalid());
        }

        let hours: u32 = parts[0].parse().map_err(|_| invalid())?;
        let minutes: u32 = parts[1].parse().map_err(|_| invalid())?;
        if minutes > 59 {
            return Err(invalid());
        }

        let seconds: f64 = parts[2].parse().map_err(|_| invalid())?;
        if seconds >= 60.0 {
            return Err(invalid());
        }

        Ok(Self::from_seconds(
            hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds,
        ))
    }

    /// Format as HH:MM:SS.mmm
    pub fn format_hms(&self) -> String {
        // Round once to a millisecond total so a value like 59.9996 carries
        // into the next second instead of rendering a four-digit fraction
        let total_ms = (self.seconds * 1000.0).round() as u64;
        let hours = total_ms / 3_600_000;
        let minutes = (total_ms % 3_600_000) / 60_000;
        let seconds = (total_ms % 60_000) / 1000;
        let milliseconds = total_ms % 1000;
        format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, milliseconds)
    }
}

impl fmt::Display for TimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_hms())
    }
}

/// A validated half-open time interval `[start, end)` within the source.
///
/// `index` is the zero-based position of the originating pair in the
/// argument list; output ordering follows `index`, never timestamp order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
    pub index: usize,
}

impl TimeRange {
    /// Create a range; invariant `0 <= start < end` is the caller's to uphold
    /// via validation, so this stays crate-private.
    pub(crate) fn new(start: f64, end: f64, index: usize) -> Self {
        debug_assert!(start >= 0.0 && start < end);
        Self { start, end, index }
    }

    /// Length of the range in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether two half-open intervals intersect
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        !(self.end <= other.start || other.end <= self.start)
    }
}

/// Display-matrix rotation of the source video, normalized to a right angle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    None,
    Cw90,
    Cw180,
    Cw270,
}

impl Rotation {
    /// Normalize probed degrees into a right-angle rotation.
    ///
    /// Negative angles fold around (ffprobe reports -90 for a clockwise
    /// display rotation); anything that is not a multiple of 90 degrades to
    /// no rotation rather than failing the probe.
    pub fn from_degrees(degrees: i32) -> Self {
        match degrees.rem_euclid(360) {
            90 => Rotation::Cw90,
            180 => Rotation::Cw180,
            270 => Rotation::Cw270,
            _ => Rotation::None,
        }
    }

    /// Rotation in degrees
    pub fn degrees(&self) -> u32 {
        match self {
            Rotation::None => 0,
            Rotation::Cw90 => 90,
            Rotation::Cw180 => 180,
            Rotation::Cw270 => 270,
        }
    }

    /// Whether the frame already displays upright
    pub fn is_upright(&self) -> bool {
        matches!(self, Rotation::None)
    }
}

/// Source file facts the core consumes; produced once per run by the probe
/// and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceMetadata {
    /// Total duration in seconds
    pub duration: f64,
    /// Whether the source carries at least one audio stream
    pub has_audio: bool,
    /// Display rotation of the primary video stream
    pub rotation: Rotation,
}

/// Spatial-fit policy for reconciling source aspect ratio with the target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleMode {
    /// Scale to fit inside the target, center-pad with black
    Pad,
    /// Scale to cover the target, center-crop the excess
    Crop,
    /// Scale both axes independently, ignoring aspect ratio
    Stretch,
}

impl ScaleMode {
    /// Parse a scale mode token
    pub fn parse(value: &str) -> ClipCatResult<Self> {
        match value.to_lowercase().as_str() {
            "pad" => Ok(ScaleMode::Pad),
            "crop" => Ok(ScaleMode::Crop),
            "stretch" => Ok(ScaleMode::Stretch),
            _ => Err(ClipCatError::InvalidScaleMode {
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for ScaleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScaleMode::Pad => "pad",
            ScaleMode::Crop => "crop",
            ScaleMode::Stretch => "stretch",
        };
        write!(f, "{}", name)
    }
}

/// Target output resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    /// Parse a `WIDTHxHEIGHT` token like `1080x1920`
    pub fn parse(value: &str) -> ClipCatResult<Self> {
        let invalid = || ClipCatError::InvalidResolution {
            value: value.to_string(),
        };

        let (w, h) = value.split_once('x').ok_or_else(invalid)?;
        let width: u32 = w.parse().map_err(|_| invalid())?;
        let height: u32 = h.parse().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }

        Ok(Self { width, height })
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Non-fatal findings from validation and planning.
///
/// Warnings are logged and never change the exit code.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// A pair with start == end was skipped
    ZeroLength { index: usize, at: f64 },
    /// A range was clamped to the source bounds
    Clamped {
        index: usize,
        from: (f64, f64),
        to: (f64, f64),
    },
    /// Two retained ranges intersect
    Overlap { first: usize, second: usize },
    /// A segment was shortened to honor the duration cap
    Truncated { index: usize, kept: f64 },
    /// A segment was dropped entirely by the duration cap
    Dropped { index: usize },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::ZeroLength { index, at } => {
                write!(f, "Skipping zero-length range {} at {}s", index + 1, at)
            }
            Warning::Clamped { index, from, to } => write!(
                f,
                "Clamped range {}: ({}, {}) -> ({}, {})",
                index + 1,
                from.0,
                from.1,
                to.0,
                to.1
            ),
            Warning::Overlap { first, second } => write!(
                f,
                "Ranges {} and {} overlap; both are kept",
                first + 1,
                second + 1
            ),
            Warning::Truncated { index, kept } => write!(
                f,
                "Truncated range {} to {:.2}s to honor the duration cap",
                index + 1,
                kept
            ),
            Warning::Dropped { index } => {
                write!(f, "Dropped range {} (duration cap reached)", index + 1)
            }
        }
    }
}
