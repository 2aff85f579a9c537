//! # Tests for Config Constants
//!
//! Unit tests verifying the correctness of configuration constants
//! and the validated hull configuration.

use crate::constants::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_epsilon_scale_is_positive() {
    assert!(HULL_EPSILON_SCALE > 0.0, "HULL_EPSILON_SCALE must be positive");
}

#[test]
fn test_epsilon_scale_is_small() {
    assert!(HULL_EPSILON_SCALE < 1e-4, "HULL_EPSILON_SCALE should be small for precision");
}

#[test]
fn test_min_hull_points_is_tetrahedron() {
    assert_eq!(MIN_HULL_POINTS, 4);
}

// =============================================================================
// TABLE AND SCHEDULE TESTS
// =============================================================================

#[test]
fn test_table_range_is_ordered() {
    assert!(MIN_TABLE_RESOLUTION < MAX_TABLE_RESOLUTION);
    assert!(MIN_TABLE_RESOLUTION as usize >= MIN_HULL_POINTS);
}

#[test]
fn test_default_resolution_inside_table() {
    assert!(DEFAULT_SPHERE_RESOLUTION >= MIN_TABLE_RESOLUTION);
    assert!(DEFAULT_SPHERE_RESOLUTION <= MAX_TABLE_RESOLUTION);
}

#[test]
fn test_schedule_bounds_cover_oscillation() {
    let low = SCHEDULE_CENTER - SCHEDULE_AMPLITUDE;
    let high = SCHEDULE_CENTER + SCHEDULE_AMPLITUDE;
    assert_eq!(low, SCHEDULE_MIN as f64);
    assert_eq!(high, SCHEDULE_MAX as f64);
    assert!(SCHEDULE_STEPS > 1);
}

// =============================================================================
// LAYOUT TESTS
// =============================================================================

#[test]
fn test_layout_matches_float_count() {
    let floats: usize = POSITION_NORMAL_LAYOUT
        .split_whitespace()
        .map(|token| token.trim_end_matches('f').parse::<usize>().unwrap())
        .sum();
    assert_eq!(floats, FLOATS_PER_VERTEX);
}

// =============================================================================
// HULL CONFIG TESTS
// =============================================================================

#[test]
fn test_default_config_is_valid() {
    let cfg = HullConfig::default();
    assert_eq!(
        HullConfig::new(cfg.epsilon_scale, cfg.sphere_resolution),
        Ok(cfg)
    );
}

#[test]
fn test_config_rejects_bad_tolerance() {
    assert_eq!(
        HullConfig::new(0.0, 100).unwrap_err(),
        ConfigError::InvalidTolerance(0.0)
    );
    assert!(HullConfig::new(-1e-7, 100).is_err());
    assert!(HullConfig::new(f64::NAN, 100).is_err());
    assert!(HullConfig::new(f64::INFINITY, 100).is_err());
}

#[test]
fn test_config_rejects_small_resolution() {
    assert_eq!(
        HullConfig::new(1e-7, 3).unwrap_err(),
        ConfigError::InvalidResolution(3)
    );
}

#[test]
fn test_tolerance_scales_with_extent() {
    let cfg = HullConfig::default();
    assert_eq!(cfg.tolerance_for(1000.0), cfg.epsilon_scale * 1000.0);
    assert_eq!(cfg.tolerance_for(1.0), cfg.epsilon_scale);
}

#[test]
fn test_tolerance_has_no_unit_floor() {
    let cfg = HullConfig::default();
    assert_eq!(cfg.tolerance_for(1e-6), cfg.epsilon_scale * 1e-6);
    assert_eq!(cfg.tolerance_for(2e-8), cfg.epsilon_scale * 2e-8);
    assert!(cfg.tolerance_for(1e-6) < cfg.tolerance_for(1.0));
}

#[test]
fn test_tolerance_of_zero_extent_is_positive() {
    let cfg = HullConfig::default();
    assert_eq!(cfg.tolerance_for(0.0), f64::MIN_POSITIVE);
}

#[test]
fn test_config_error_display() {
    let msg = ConfigError::InvalidResolution(2).to_string();
    assert!(msg.contains("sphere_resolution"));
    assert!(msg.contains('2'));
}
