//! # Mesh Operations
//!
//! Operations that turn point clouds into meshes.

pub mod hull;

pub use hull::{make_hull, make_hull_with, ConvexHull};
