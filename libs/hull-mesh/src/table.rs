//! # Resolution Table
//!
//! Many sphere hulls of increasing resolution packed back to back into one
//! vertex buffer, plus the explicit table mapping each resolution to its
//! byte range. The table is built once at startup and handed to the render
//! loop by reference.

use crate::error::HullError;
use crate::primitives::{create_sphere_with, SpiralAxis};
use crate::render::DrawRange;
use config::constants::{HullConfig, MAX_TABLE_RESOLUTION, MIN_TABLE_RESOLUTION};
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

/// A byte range inside a packed buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferRange {
    /// Byte offset of the first vertex.
    pub offset: usize,
    /// Length in bytes.
    pub len: usize,
}

impl BufferRange {
    /// One past the last byte.
    #[inline]
    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// Resolution → byte range of its hull in the shared buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionTable {
    entries: BTreeMap<u32, BufferRange>,
}

impl ResolutionTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the byte range of `resolution`, returning any previous one.
    pub fn insert(&mut self, resolution: u32, range: BufferRange) -> Option<BufferRange> {
        self.entries.insert(resolution, range)
    }

    /// Looks up the byte range of `resolution`.
    pub fn get(&self, resolution: u32) -> Option<BufferRange> {
        self.entries.get(&resolution).copied()
    }

    /// Number of resolutions in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no resolution has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in ascending resolution order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, BufferRange)> + '_ {
        self.entries.iter().map(|(&res, &range)| (res, range))
    }

    /// Resolutions present in the table, ascending.
    pub fn resolutions(&self) -> Vec<u32> {
        self.entries.keys().copied().collect()
    }

    /// Converts the byte range of `resolution` into vertex units.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hull_mesh::table::{BufferRange, ResolutionTable};
    ///
    /// let mut table = ResolutionTable::new();
    /// table.insert(50, BufferRange { offset: 240, len: 72 });
    /// let range = table.draw_range(50, 24).unwrap();
    /// assert_eq!((range.first_vertex, range.vertex_count), (10, 3));
    /// ```
    pub fn draw_range(&self, resolution: u32, stride: usize) -> Result<DrawRange, HullError> {
        let range = self
            .get(resolution)
            .ok_or(HullError::UnknownResolution { resolution })?;
        DrawRange::from_bytes(range, stride)
    }
}

/// Packed vertex bytes of several hull resolutions and their table.
#[derive(Debug, Clone, Default)]
pub struct HullBuffer {
    /// Interleaved `3f 3f` vertices of every resolution, back to back.
    pub bytes: Vec<u8>,
    /// Where each resolution lives inside `bytes`.
    pub table: ResolutionTable,
}

impl HullBuffer {
    /// Builds unit-sphere hulls for the default resolution range.
    pub fn build_default() -> Result<Self, HullError> {
        Self::build(
            MIN_TABLE_RESOLUTION..=MAX_TABLE_RESOLUTION,
            1.0,
            SpiralAxis::Z,
            &HullConfig::default(),
        )
    }

    /// Computes one sphere hull per resolution and packs them in ascending
    /// resolution order.
    ///
    /// Hulls are computed in parallel; the first failure aborts the build.
    ///
    /// # Example
    ///
    /// ```rust
    /// use config::constants::HullConfig;
    /// use hull_mesh::{HullBuffer, SpiralAxis};
    ///
    /// let buffer = HullBuffer::build(10..=12, 1.0, SpiralAxis::Z, &HullConfig::default())?;
    /// assert_eq!(buffer.table.len(), 3);
    /// assert_eq!(buffer.table.get(10).map(|r| r.offset), Some(0));
    /// # Ok::<(), hull_mesh::HullError>(())
    /// ```
    pub fn build(
        resolutions: RangeInclusive<u32>,
        radius: f64,
        axis: SpiralAxis,
        config: &HullConfig,
    ) -> Result<Self, HullError> {
        let meshes = resolutions
            .into_par_iter()
            .map(|res| create_sphere_with(radius, res, axis, config).map(|mesh| (res, mesh.to_bytes())))
            .collect::<Result<Vec<_>, _>>()?;

        let mut buffer = Self::default();
        for (res, mesh) in meshes {
            buffer.push(res, &mesh);
        }

        debug!(
            "hull buffer: {} resolutions, {} bytes",
            buffer.table.len(),
            buffer.bytes.len()
        );
        Ok(buffer)
    }

    /// Appends pre-packed vertex bytes for `resolution`.
    pub fn push(&mut self, resolution: u32, mesh: &[u8]) -> BufferRange {
        let range = BufferRange {
            offset: self.bytes.len(),
            len: mesh.len(),
        };
        self.bytes.extend_from_slice(mesh);
        self.table.insert(resolution, range);
        range
    }

    /// Returns the bytes of `resolution`.
    pub fn slice(&self, resolution: u32) -> Option<&[u8]> {
        let range = self.table.get(resolution)?;
        self.bytes.get(range.offset..range.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::position_normal_stride;
    use crate::primitives::create_sphere;

    fn small_buffer() -> HullBuffer {
        HullBuffer::build(20..=30, 1.0, SpiralAxis::Z, &HullConfig::default()).unwrap()
    }

    #[test]
    fn test_table_ranges_are_contiguous() {
        let buffer = small_buffer();
        assert_eq!(buffer.table.resolutions(), (20..=30).collect::<Vec<_>>());

        let mut expected_offset = 0;
        for (_, range) in buffer.table.iter() {
            assert_eq!(range.offset, expected_offset);
            assert_eq!(range.len % position_normal_stride(), 0);
            expected_offset = range.end();
        }
        assert_eq!(expected_offset, buffer.bytes.len());
    }

    #[test]
    fn test_table_slice_matches_standalone_hull() {
        let buffer = small_buffer();
        let mesh = create_sphere(1.0, 25, SpiralAxis::Z).unwrap();
        assert_eq!(buffer.slice(25), Some(mesh.to_bytes().as_slice()));
    }

    #[test]
    fn test_draw_range_in_vertices() {
        let buffer = small_buffer();
        let stride = position_normal_stride();
        let range = buffer.table.get(21).unwrap();
        let draw = buffer.table.draw_range(21, stride).unwrap();

        assert_eq!(draw.first_vertex as usize, range.offset / stride);
        assert_eq!(draw.vertex_count as usize, range.len / stride);
        // Convex position on the sphere: 2n - 4 faces, 3 vertices each
        assert_eq!(draw.vertex_count, (2 * 21 - 4) * 3);
    }

    #[test]
    fn test_unknown_resolution() {
        let buffer = small_buffer();
        assert_eq!(
            buffer.table.draw_range(99, 24),
            Err(HullError::UnknownResolution { resolution: 99 })
        );
        assert!(buffer.slice(99).is_none());
    }

    #[test]
    fn test_build_propagates_degenerate_resolution() {
        let result = HullBuffer::build(2..=6, 1.0, SpiralAxis::Z, &HullConfig::default());
        assert!(matches!(result, Err(HullError::DegenerateInput { .. })));
    }

    #[test]
    fn test_push_replaces_entry() {
        let mut buffer = HullBuffer::default();
        buffer.push(7, &[0u8; 24]);
        let second = buffer.push(7, &[1u8; 48]);
        assert_eq!(buffer.table.len(), 1);
        assert_eq!(buffer.table.get(7), Some(second));
        assert_eq!(buffer.bytes.len(), 72);
    }
}
