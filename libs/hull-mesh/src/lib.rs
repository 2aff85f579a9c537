//! # Hull Mesh
//!
//! Convex hull meshes for sphere and light-volume geometry, packed for
//! direct upload as non-indexed GPU vertex buffers.
//!
//! ## Architecture
//!
//! ```text
//! point cloud → ConvexHull (indexed) → HullMesh (flat-shaded) → `3f 3f` bytes
//!                                                        ↓
//!                        HullBuffer (many resolutions) + ResolutionTable
//!                                                        ↓
//!                           HullAnimator → DrawTarget (external pipeline)
//! ```
//!
//! ## Algorithms
//!
//! All algorithms are pure Rust and free of global state:
//! - **Hull**: QuickHull with horizon-loop stitching
//! - **Sampling**: Golden-angle spiral on the sphere
//! - **Packing**: `bytemuck` casts of interleaved vertices
//!
//! ## Usage
//!
//! ```rust
//! use hull_mesh::{make_hull, fibonacci_sphere, SpiralAxis};
//!
//! let points = fibonacci_sphere(1.0, 100, SpiralAxis::Y)?;
//! let mesh = make_hull(&points)?;
//! let vertex_bytes = mesh.to_bytes();
//! assert_eq!(vertex_bytes.len(), mesh.vertex_count() * 24);
//! # Ok::<(), hull_mesh::HullError>(())
//! ```

pub mod error;
pub mod layout;
pub mod mesh;
pub mod ops;
pub mod primitives;
pub mod render;
pub mod schedule;
pub mod table;

pub use error::HullError;
pub use layout::{calcsize, VertexLayout};
pub use mesh::{GpuVertex, HullMesh};
pub use ops::hull::{make_hull, make_hull_with, ConvexHull};
pub use primitives::{create_sphere, fibonacci_sphere, light_volume, SpiralAxis};
pub use render::{DrawRange, DrawTarget, HullAnimator};
pub use schedule::ResolutionSchedule;
pub use table::{BufferRange, HullBuffer, ResolutionTable};

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    /// Builds the full default table the LOD demo uploads at startup.
    #[test]
    fn test_default_buffer_covers_schedule() {
        let start = Instant::now();
        let buffer = HullBuffer::build_default().unwrap();
        let elapsed = start.elapsed();

        println!(
            "Default hull buffer: {} resolutions, {} bytes in {:?}",
            buffer.table.len(),
            buffer.bytes.len(),
            elapsed
        );

        let stride = calcsize(config::constants::POSITION_NORMAL_LAYOUT).unwrap();
        let schedule = ResolutionSchedule::default();
        for &res in schedule.period() {
            let range = buffer.table.draw_range(res, stride).unwrap();
            assert_eq!(range.vertex_count, (2 * res - 4) * 3);
        }
    }

    /// One frame of the LOD loop against a counting pipeline.
    #[test]
    fn test_animator_over_default_buffer() {
        struct Counter {
            renders: usize,
            last: Option<DrawRange>,
        }

        impl DrawTarget for Counter {
            fn set_draw_range(&mut self, range: DrawRange) {
                self.last = Some(range);
            }
            fn render(&mut self) {
                self.renders += 1;
            }
        }

        let buffer = HullBuffer::build(
            50..=60,
            1.0,
            SpiralAxis::Z,
            &config::constants::HullConfig::default(),
        )
        .unwrap();
        let schedule = [50u32, 55, 60].into_iter().cycle();
        let mut animator = HullAnimator::new(&buffer.table, schedule, 24);
        let mut pipeline = Counter {
            renders: 0,
            last: None,
        };

        for _ in 0..5 {
            animator.frame(&mut pipeline).unwrap();
        }

        assert_eq!(pipeline.renders, 5);
        assert_eq!(pipeline.last, Some(buffer.table.draw_range(55, 24).unwrap()));
    }
}
