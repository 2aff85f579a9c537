//! # Convex Hull
//!
//! QuickHull algorithm for computing 3D convex hulls, flattened into
//! flat-shaded triangle lists ready for a non-indexed vertex buffer.
//!
//! ## Algorithm Overview
//!
//! 1. Find extreme points to form initial simplex (tetrahedron)
//! 2. For each face, find the farthest point outside
//! 3. Create new faces from that point to the horizon edges
//! 4. Repeat until no points remain outside
//!
//! ## Output Convention
//!
//! Face `k` occupies vertices `3k..3k+2`, counter-clockwise when viewed
//! from outside (compatible with back-face culling), and each of its three
//! vertices carries the same outward unit normal.

mod quickhull;


pub use quickhull::ConvexHull;

use crate::error::HullError;
use crate::mesh::HullMesh;
use config::constants::HullConfig;
use glam::DVec3;

/// Computes the flat-shaded hull mesh of a point cloud.
///
/// # Arguments
///
/// * `points` - Point cloud (at least 4 points, not all coplanar)
///
/// # Returns
///
/// A mesh whose `into_parts()` yields `(vertex_positions, vertex_normals)`.
///
/// # Example
///
/// ```rust
/// use hull_mesh::{make_hull, fibonacci_sphere, SpiralAxis};
///
/// let points = fibonacci_sphere(1.0, 100, SpiralAxis::Z)?;
/// let (positions, normals) = make_hull(&points)?.into_parts();
/// assert_eq!(positions.len(), normals.len());
/// assert_eq!(positions.len() % 3, 0);
/// # Ok::<(), hull_mesh::HullError>(())
/// ```
pub fn make_hull(points: &[DVec3]) -> Result<HullMesh, HullError> {
    make_hull_with(points, &HullConfig::default())
}

/// Computes the flat-shaded hull mesh with an explicit configuration.
pub fn make_hull_with(points: &[DVec3], config: &HullConfig) -> Result<HullMesh, HullError> {
    Ok(ConvexHull::compute_with(points, config)?.to_mesh())
}
