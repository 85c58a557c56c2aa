//! # Tests for Config Constants

use crate::constants::*;

// =============================================================================
// DEFAULT TESTS
// =============================================================================

#[test]
fn test_default_clearance_is_small_and_non_negative() {
    assert!(DEFAULT_CLEARANCE >= 0.0);
    assert!(DEFAULT_CLEARANCE < 1.0, "clearance is a fit tolerance, not a gap");
}

#[test]
fn test_default_units_are_millimetres() {
    assert_eq!(DEFAULT_UNITS, "mm");
}

#[test]
fn test_material_defaults_are_named() {
    assert!(!DEFAULT_SPECIES.is_empty());
    assert!(!DEFAULT_GRADE.is_empty());
}

#[test]
fn test_short_id_fits_in_digest() {
    // A BLAKE3 digest is 32 bytes = 64 hex characters.
    assert!(SHORT_ID_HEX_LEN > 0 && SHORT_ID_HEX_LEN <= 64);
}

// =============================================================================
// EVALUATION TESTS
// =============================================================================

#[test]
fn test_evaluation_timeout_is_five_seconds() {
    assert_eq!(evaluation_timeout(), std::time::Duration::from_secs(5));
}

// =============================================================================
// TESSELLATION TESTS
// =============================================================================

#[test]
fn test_segment_bounds() {
    assert!(MIN_CYLINDER_SEGMENTS >= 3);
    assert!(DEFAULT_CYLINDER_SEGMENTS >= MIN_CYLINDER_SEGMENTS);
}

#[test]
fn test_depth_limit_is_positive() {
    assert!(MAX_TESSELLATION_DEPTH > 0);
}

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_epsilon_is_positive_and_small() {
    assert!(EPSILON > 0.0);
    assert!(EPSILON < 1e-3);
}
