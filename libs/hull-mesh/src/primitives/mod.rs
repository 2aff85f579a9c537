//! # Primitives
//!
//! Point clouds and hull meshes for the shapes the renderer draws.

pub mod sphere;

pub use sphere::{create_sphere, create_sphere_with, fibonacci_sphere, light_volume, SpiralAxis};
