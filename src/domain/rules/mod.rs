// Domain rules - Range validation policy

use crate::domain::model::{TimeRange, TimeSpec, Warning};
use crate::error::{ClipCatError, ClipCatResult};

/// Parse raw time tokens into (start, end) pairs in seconds.
///
/// The token count is checked before any token is parsed, so an odd list
/// always fails with `OddTokenCount` regardless of its contents.
pub fn pair_tokens(tokens: &[String]) -> ClipCatResult<Vec<(f64, f64)>> {
    if tokens.len() % 2 != 0 {
        return Err(ClipCatError::OddTokenCount {
            count: tokens.len(),
        });
    }

    tokens
        .chunks_exact(2)
        .map(|pair| {
            let start = TimeSpec::parse(&pair[0])?.as_seconds();
            let end = TimeSpec::parse(&pair[1])?.as_seconds();
            Ok((start, end))
        })
        .collect()
}

/// Validates raw (start, end) pairs against the probed source duration.
///
/// With clamping disabled, out-of-bounds ranges are errors; with clamping
/// enabled, start and end are bounded independently to `[0, duration]` and
/// the inversion check runs again on the clamped values.
pub struct RangeValidator {
    clamp: bool,
}

impl RangeValidator {
    /// Create a validator with the given clamping policy
    pub fn new(clamp: bool) -> Self {
        Self { clamp }
    }

    /// Validate pairs in input order into retained `TimeRange` values.
    ///
    /// Zero-length pairs are skipped with a warning, never an error.
    /// Overlaps between retained ranges are warned about and kept.
    pub fn validate(
        &self,
        pairs: &[(f64, f64)],
        duration: f64,
    ) -> ClipCatResult<(Vec<TimeRange>, Vec<Warning>)> {
        let mut ranges = Vec::with_capacity(pairs.len());
        let mut warnings = Vec::new();

        for (index, &(start, end)) in pairs.iter().enumerate() {
            if start == end {
                warnings.push(Warning::ZeroLength { index, at: start });
                continue;
            }

            let (start, end) = if self.clamp {
                let clamped = (start.clamp(0.0, duration), end.clamp(0.0, duration));
                if clamped != (start, end) {
                    warnings.push(Warning::Clamped {
                        index,
                        from: (start, end),
                        to: clamped,
                    });
                }
                clamped
            } else {
                if start > end {
                    return Err(ClipCatError::InvalidRange { index, start, end });
                }
                if start < 0.0 || end > duration {
                    return Err(ClipCatError::OutOfBounds {
                        index,
                        start,
                        end,
                        duration,
                    });
                }
                (start, end)
            };

            // Re-check after clamping: a collapsed range is a skip, an
            // inverted one was never resolvable.
            if start == end {
                warnings.push(Warning::ZeroLength { index, at: start });
                continue;
            }
            if start > end {
                return Err(ClipCatError::InvalidRange { index, start, end });
            }

            ranges.push(TimeRange::new(start, end, index));
        }

        if ranges.is_empty() {
            return Err(ClipCatError::NoValidRanges);
        }

        for (i, a) in ranges.iter().enumerate() {
            for b in &ranges[i + 1..] {
                if a.overlaps(b) {
                    warnings.push(Warning::Overlap {
                        first: a.index,
                        second: b.index,
                    });
                }
            }
        }

        Ok((ranges, warnings))
    }
}

#[cfg(test)]
mod tests;
