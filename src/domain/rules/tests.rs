// Unit tests for range validation policy

use super::*;
use crate::domain::model::Warning;
use crate::error::ClipCatError;

fn tokens(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_pair_tokens_even_count() {
    let pairs = pair_tokens(&tokens(&["10", "30", "00:01:00", "90"])).unwrap();
    assert_eq!(pairs, vec![(10.0, 30.0), (60.0, 90.0)]);
}

#[test]
fn test_pair_tokens_odd_count_fails_first() {
    // Odd count wins even when a token would also fail to parse
    let err = pair_tokens(&tokens(&["10", "30", "garbage"])).unwrap_err();
    assert!(matches!(err, ClipCatError::OddTokenCount { count: 3 }));
}

#[test]
fn test_pair_tokens_bad_token() {
    let err = pair_tokens(&tokens(&["10", "garbage"])).unwrap_err();
    assert!(matches!(err, ClipCatError::InvalidTimeFormat { .. }));
}

#[test]
fn test_validate_in_bounds() {
    let validator = RangeValidator::new(false);
    let (ranges, warnings) = validator.validate(&[(10.0, 30.0)], 100.0).unwrap();

    assert_eq!(ranges.len(), 1);
    assert_eq!((ranges[0].start, ranges[0].end), (10.0, 30.0));
    assert!(warnings.is_empty());
}

#[test]
fn test_validate_out_of_bounds_without_clamp() {
    let validator = RangeValidator::new(false);
    let err = validator.validate(&[(95.0, 110.0)], 100.0).unwrap_err();
    assert!(matches!(err, ClipCatError::OutOfBounds { index: 0, .. }));
}

#[test]
fn test_validate_clamps_to_duration() {
    let validator = RangeValidator::new(true);
    let (ranges, warnings) = validator.validate(&[(95.0, 110.0)], 100.0).unwrap();

    assert_eq!((ranges[0].start, ranges[0].end), (95.0, 100.0));
    assert_eq!(
        warnings,
        vec![Warning::Clamped {
            index: 0,
            from: (95.0, 110.0),
            to: (95.0, 100.0),
        }]
    );
}

#[test]
fn test_validate_clamps_negative_start() {
    let validator = RangeValidator::new(true);
    let (ranges, _) = validator.validate(&[(-5.0, 10.0)], 100.0).unwrap();
    assert_eq!((ranges[0].start, ranges[0].end), (0.0, 10.0));
}

#[test]
fn test_zero_length_is_skipped_regardless_of_clamp() {
    for clamp in [false, true] {
        let validator = RangeValidator::new(clamp);
        let err = validator.validate(&[(10.0, 10.0)], 100.0).unwrap_err();
        // The pair is skipped, not rejected; failure is only because nothing remains
        assert!(matches!(err, ClipCatError::NoValidRanges));

        let (ranges, warnings) = validator
            .validate(&[(10.0, 10.0), (20.0, 30.0)], 100.0)
            .unwrap();
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].index, 1);
        assert!(warnings.contains(&Warning::ZeroLength { index: 0, at: 10.0 }));
    }
}

#[test]
fn test_range_collapsed_by_clamping_is_skipped() {
    let validator = RangeValidator::new(true);
    // Entirely past the end of the source: clamps to (100, 100), skipped
    let (ranges, warnings) = validator
        .validate(&[(150.0, 200.0), (10.0, 20.0)], 100.0)
        .unwrap();

    assert_eq!(ranges.len(), 1);
    assert_eq!(ranges[0].index, 1);
    assert!(warnings
        .iter()
        .any(|w| matches!(w, Warning::ZeroLength { index: 0, .. })));
}

#[test]
fn test_inverted_range_fails() {
    for clamp in [false, true] {
        let validator = RangeValidator::new(clamp);
        let err = validator.validate(&[(30.0, 10.0)], 100.0).unwrap_err();
        assert!(matches!(err, ClipCatError::InvalidRange { index: 0, .. }));
    }
}

#[test]
fn test_overlap_emits_single_warning_and_keeps_both() {
    let validator = RangeValidator::new(false);
    let (ranges, warnings) = validator
        .validate(&[(0.0, 10.0), (5.0, 15.0)], 100.0)
        .unwrap();

    assert_eq!(ranges.len(), 2);
    let overlaps: Vec<_> = warnings
        .iter()
        .filter(|w| matches!(w, Warning::Overlap { .. }))
        .collect();
    assert_eq!(overlaps.len(), 1);
    assert_eq!(
        overlaps[0],
        &Warning::Overlap { first: 0, second: 1 }
    );
}

#[test]
fn test_touching_ranges_do_not_warn() {
    let validator = RangeValidator::new(false);
    let (_, warnings) = validator
        .validate(&[(0.0, 10.0), (10.0, 20.0)], 100.0)
        .unwrap();
    assert!(warnings.is_empty());
}

#[test]
fn test_input_order_is_preserved() {
    let validator = RangeValidator::new(false);
    // Later timestamps first; output must keep argument order
    let (ranges, _) = validator
        .validate(&[(50.0, 60.0), (10.0, 20.0)], 100.0)
        .unwrap();

    assert_eq!(ranges[0].start, 50.0);
    assert_eq!(ranges[1].start, 10.0);
    assert_eq!(ranges[0].index, 0);
    assert_eq!(ranges[1].index, 1);
}
