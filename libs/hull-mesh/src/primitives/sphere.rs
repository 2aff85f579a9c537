//! # Sphere Primitive
//!
//! Quasi-uniform sphere point clouds (golden-angle spiral) and their hulls.

use crate::error::HullError;
use crate::mesh::HullMesh;
use crate::ops::hull::make_hull_with;
use config::constants::{HullConfig, MIN_HULL_POINTS};
use glam::DVec3;
use std::f64::consts::PI;

/// Axis the spiral advances along, from `+1` at the first sample to `-1`
/// at the last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpiralAxis {
    /// Height on z, spiral in the xy plane.
    #[default]
    Z,
    /// Height on y, spiral in the xz plane.
    Y,
}

/// Samples `count` points on a sphere using the golden-angle spiral.
///
/// # Arguments
///
/// * `radius` - The radius of the sphere
/// * `count` - Number of samples (at least 4)
/// * `axis` - Axis carrying the spiral height
///
/// # Algorithm
///
/// - golden angle `phi = PI * (3 - sqrt(5))`
/// - height `h_i = 1 - 2 i / (count - 1)`, so the first and last samples
///   sit on the poles
/// - sample `i` is at angle `phi * i` on the ring of radius `sqrt(1 - h_i^2)`
///
/// # Example
///
/// ```rust
/// use hull_mesh::primitives::{fibonacci_sphere, SpiralAxis};
///
/// let points = fibonacci_sphere(2.0, 100, SpiralAxis::Z).unwrap();
/// assert_eq!(points.len(), 100);
/// assert!((points[0].length() - 2.0).abs() < 1e-12);
/// ```
pub fn fibonacci_sphere(radius: f64, count: u32, axis: SpiralAxis) -> Result<Vec<DVec3>, HullError> {
    if !(radius > 0.0 && radius.is_finite()) {
        return Err(HullError::degenerate(format!(
            "Sphere radius must be positive: {}",
            radius
        )));
    }

    if (count as usize) < MIN_HULL_POINTS {
        return Err(HullError::degenerate(format!(
            "Sphere needs at least {} samples: {}",
            MIN_HULL_POINTS, count
        )));
    }

    let golden_angle = PI * (3.0 - 5.0f64.sqrt());
    let last = (count - 1) as f64;

    let points = (0..count)
        .map(|i| {
            let h = 1.0 - (i as f64 / last) * 2.0;
            // Clamp guards sqrt against -0.0 rounding at the poles
            let ring = (1.0 - h * h).max(0.0).sqrt();
            let theta = golden_angle * i as f64;
            let (a, b) = (theta.cos() * ring, theta.sin() * ring);
            let unit = match axis {
                SpiralAxis::Z => DVec3::new(a, b, h),
                SpiralAxis::Y => DVec3::new(a, h, b),
            };
            unit * radius
        })
        .collect();

    Ok(points)
}

/// Creates a flat-shaded sphere approximation as the hull of a spiral cloud.
///
/// # Example
///
/// ```rust
/// use hull_mesh::primitives::{create_sphere, SpiralAxis};
///
/// let mesh = create_sphere(1.0, 100, SpiralAxis::Y).unwrap();
/// // A closed triangulation of 100 points in convex position has 2n - 4 faces
/// assert_eq!(mesh.triangle_count(), 196);
/// ```
pub fn create_sphere(radius: f64, count: u32, axis: SpiralAxis) -> Result<HullMesh, HullError> {
    create_sphere_with(radius, count, axis, &HullConfig::default())
}

/// Same as [`create_sphere`] with an explicit hull configuration.
pub fn create_sphere_with(
    radius: f64,
    count: u32,
    axis: SpiralAxis,
    config: &HullConfig,
) -> Result<HullMesh, HullError> {
    let points = fibonacci_sphere(radius, count, axis)?;
    make_hull_with(&points, config)
}

/// Light volume for deferred shading: a y-up sphere hull sampled at the
/// configured resolution.
///
/// # Example
///
/// ```rust
/// use config::constants::HullConfig;
/// use hull_mesh::primitives::light_volume;
///
/// let mesh = light_volume(1.0, &HullConfig::default()).unwrap();
/// assert_eq!(mesh.triangle_count(), 196);
/// ```
pub fn light_volume(radius: f64, config: &HullConfig) -> Result<HullMesh, HullError> {
    create_sphere_with(radius, config.sphere_resolution, SpiralAxis::Y, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sphere_samples_on_surface() {
        let radius = 5.0;
        for p in fibonacci_sphere(radius, 64, SpiralAxis::Z).unwrap() {
            assert_relative_eq!(p.length(), radius, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_sphere_poles() {
        let points = fibonacci_sphere(1.0, 10, SpiralAxis::Z).unwrap();
        assert_relative_eq!(points[0].z, 1.0);
        assert_relative_eq!(points[9].z, -1.0);

        let points = fibonacci_sphere(1.0, 10, SpiralAxis::Y).unwrap();
        assert_relative_eq!(points[0].y, 1.0);
        assert_relative_eq!(points[9].y, -1.0);
    }

    #[test]
    fn test_sphere_axes_are_swizzles() {
        let z_up = fibonacci_sphere(1.0, 20, SpiralAxis::Z).unwrap();
        let y_up = fibonacci_sphere(1.0, 20, SpiralAxis::Y).unwrap();
        for (a, b) in z_up.iter().zip(&y_up) {
            assert_eq!(a.x, b.x);
            assert_eq!(a.y, b.z);
            assert_eq!(a.z, b.y);
        }
    }

    #[test]
    fn test_sphere_invalid_radius() {
        assert!(fibonacci_sphere(0.0, 16, SpiralAxis::Z).is_err());
        assert!(fibonacci_sphere(-5.0, 16, SpiralAxis::Z).is_err());
        assert!(fibonacci_sphere(f64::NAN, 16, SpiralAxis::Z).is_err());
    }

    #[test]
    fn test_sphere_too_few_samples() {
        let result = fibonacci_sphere(5.0, 3, SpiralAxis::Z);
        assert!(matches!(result, Err(HullError::DegenerateInput { .. })));
    }

    #[test]
    fn test_sphere_mesh_bounding_box() {
        let radius = 5.0;
        let mesh = create_sphere(radius, 200, SpiralAxis::Z).unwrap();
        let (min, max) = mesh.bounding_box();

        assert_relative_eq!(max.z, radius, epsilon = 1e-9);
        assert_relative_eq!(min.z, -radius, epsilon = 1e-9);
        assert!(min.x >= -radius && max.x <= radius);
    }

    #[test]
    fn test_light_volume_uses_configured_resolution() {
        let config = HullConfig::new(1e-7, 40).unwrap();
        let mesh = light_volume(2.0, &config).unwrap();
        assert_eq!(mesh.triangle_count(), 76);

        let (min, max) = mesh.bounding_box();
        assert_relative_eq!(max.y, 2.0, epsilon = 1e-12);
        assert_relative_eq!(min.y, -2.0, epsilon = 1e-12);
    }
}
