//! # Configuration Constants
//!
//! Centralized constants for the hull mesh pipeline. Numerical tolerances,
//! sphere sampling defaults, resolution table bounds and the animation
//! schedule are all defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point tolerances for the hull builder
//! - **Sampling**: Default point counts for sphere clouds
//! - **Resolution Table**: Range of precomputed hull resolutions
//! - **Schedule**: Parameters of the per-frame resolution animation
//! - **Vertex Layout**: GPU vertex format of emitted meshes

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Relative tolerance used by the hull builder.
///
/// The absolute tolerance is this value multiplied by the largest
/// bounding-box extent of the input cloud, so the visibility test behaves
/// the same for micrometre-sized clouds, unit spheres and large scenes.
///
/// # Example
///
/// ```rust
/// use config::constants::HULL_EPSILON_SCALE;
///
/// let extent: f64 = 20.0;
/// let tolerance = HULL_EPSILON_SCALE * extent;
/// assert!(tolerance < 1e-5);
/// ```
pub const HULL_EPSILON_SCALE: f64 = 1e-7;

/// Minimum number of points that can span a 3D hull (a tetrahedron).
pub const MIN_HULL_POINTS: usize = 4;

// =============================================================================
// SAMPLING CONSTANTS
// =============================================================================

/// Default number of points sampled on a sphere for a light volume.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_SPHERE_RESOLUTION;
///
/// let requested: Option<u32> = None;
/// assert_eq!(requested.unwrap_or(DEFAULT_SPHERE_RESOLUTION), 100);
/// ```
pub const DEFAULT_SPHERE_RESOLUTION: u32 = 100;

// =============================================================================
// RESOLUTION TABLE CONSTANTS
// =============================================================================

/// Smallest resolution precomputed into the shared hull buffer.
pub const MIN_TABLE_RESOLUTION: u32 = 50;

/// Largest resolution precomputed into the shared hull buffer (inclusive).
///
/// # Example
///
/// ```rust
/// use config::constants::{MAX_TABLE_RESOLUTION, MIN_TABLE_RESOLUTION};
///
/// let entries = (MIN_TABLE_RESOLUTION..=MAX_TABLE_RESOLUTION).count();
/// assert_eq!(entries, 350);
/// ```
pub const MAX_TABLE_RESOLUTION: u32 = 399;

// =============================================================================
// SCHEDULE CONSTANTS
// =============================================================================

/// Number of samples in one period of the resolution animation.
pub const SCHEDULE_STEPS: usize = 180;

/// Resolution around which the animation oscillates.
pub const SCHEDULE_CENTER: f64 = 225.0;

/// Amplitude of the resolution oscillation.
pub const SCHEDULE_AMPLITUDE: f64 = 175.0;

/// Lower clip bound of the animated resolution.
pub const SCHEDULE_MIN: u32 = 50;

/// Upper clip bound of the animated resolution.
///
/// The sampled oscillation peaks at 399, so every scheduled value lies inside
/// the default table range even though this bound sits one past it.
pub const SCHEDULE_MAX: u32 = 400;

// =============================================================================
// VERTEX LAYOUT CONSTANTS
// =============================================================================

/// Layout string of emitted hull vertices: position then normal.
pub const POSITION_NORMAL_LAYOUT: &str = "3f 3f";

/// Number of `f32` values per emitted vertex.
///
/// # Example
///
/// ```rust
/// use config::constants::FLOATS_PER_VERTEX;
///
/// let stride = FLOATS_PER_VERTEX * std::mem::size_of::<f32>();
/// assert_eq!(stride, 24);
/// ```
pub const FLOATS_PER_VERTEX: usize = 6;

// =============================================================================
// HULL CONFIGURATION
// =============================================================================

/// Immutable snapshot of the hull builder settings.
///
/// # Examples
/// ```
/// use config::constants::HullConfig;
/// let config = HullConfig::default();
/// assert!(config.epsilon_scale > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HullConfig {
    /// Relative tolerance, scaled by the cloud's bounding-box extent.
    pub epsilon_scale: f64,
    /// Default point count for sphere clouds.
    pub sphere_resolution: u32,
}

impl HullConfig {
    /// Builds a configuration, rejecting tolerances that are not positive
    /// and finite and sphere resolutions too small to span a hull.
    ///
    /// # Examples
    /// ```
    /// use config::constants::HullConfig;
    /// let cfg = HullConfig::new(1.0e-6, 64).expect("valid config");
    /// assert_eq!(cfg.sphere_resolution, 64);
    /// ```
    pub fn new(epsilon_scale: f64, sphere_resolution: u32) -> Result<Self, ConfigError> {
        if !(epsilon_scale > 0.0 && epsilon_scale.is_finite()) {
            return Err(ConfigError::InvalidTolerance(epsilon_scale));
        }
        if (sphere_resolution as usize) < MIN_HULL_POINTS {
            return Err(ConfigError::InvalidResolution(sphere_resolution));
        }
        Ok(Self {
            epsilon_scale,
            sphere_resolution,
        })
    }

    /// Absolute tolerance for a cloud whose largest extent is `extent`.
    ///
    /// Proportional to the extent at every scale; only a zero extent falls
    /// back to the smallest positive `f64`.
    ///
    /// # Examples
    /// ```
    /// use config::constants::HullConfig;
    /// let cfg = HullConfig::default();
    /// assert_eq!(cfg.tolerance_for(0.5), cfg.epsilon_scale * 0.5);
    /// assert_eq!(cfg.tolerance_for(10.0), cfg.epsilon_scale * 10.0);
    /// assert!(cfg.tolerance_for(0.0) > 0.0);
    /// ```
    #[inline]
    pub fn tolerance_for(&self, extent: f64) -> f64 {
        (self.epsilon_scale * extent).max(f64::MIN_POSITIVE)
    }
}

impl Default for HullConfig {
    fn default() -> Self {
        Self {
            epsilon_scale: HULL_EPSILON_SCALE,
            sphere_resolution: DEFAULT_SPHERE_RESOLUTION,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the tolerance is zero, negative or not finite.
    InvalidTolerance(f64),
    /// Raised when the sphere resolution cannot span a tetrahedron.
    InvalidResolution(u32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "epsilon_scale must be positive and finite: {value}")
            }
            ConfigError::InvalidResolution(value) => {
                write!(f, "sphere_resolution must be >= {MIN_HULL_POINTS}: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
