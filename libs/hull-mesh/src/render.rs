//! # Draw Boundary
//!
//! The seam between precomputed hull buffers and an external rendering
//! pipeline. A pipeline exposes mutable per-draw parameters (first vertex,
//! vertex count, instance count) and a `render()` call; [`DrawTarget`] is
//! the trait a caller implements on top of its own pipeline object.

use crate::error::HullError;
use crate::table::{BufferRange, ResolutionTable};
use log::trace;
use serde::{Deserialize, Serialize};

/// Per-draw parameters of a non-indexed draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRange {
    /// Index of the first vertex to draw.
    pub first_vertex: u32,
    /// Number of vertices to draw.
    pub vertex_count: u32,
    /// Number of instances to draw.
    pub instance_count: u32,
}

impl DrawRange {
    /// Converts a byte range of a packed buffer into vertex units.
    ///
    /// # Errors
    ///
    /// * [`HullError::InvalidLayout`] for a zero stride.
    /// * [`HullError::DrawRangeOverflow`] when the first vertex or the
    ///   vertex count does not fit in `u32`.
    pub fn from_bytes(range: BufferRange, stride: usize) -> Result<Self, HullError> {
        if stride == 0 {
            return Err(HullError::invalid_layout("vertex stride must be non-zero"));
        }
        let to_vertices = |bytes: usize| {
            u32::try_from(bytes / stride)
                .map_err(|_| HullError::DrawRangeOverflow { bytes, stride })
        };
        Ok(Self {
            first_vertex: to_vertices(range.offset)?,
            vertex_count: to_vertices(range.len)?,
            instance_count: 1,
        })
    }

    /// Same range, drawn `instance_count` times.
    pub fn with_instances(self, instance_count: u32) -> Self {
        Self {
            instance_count,
            ..self
        }
    }
}

/// A pipeline whose draw parameters can be changed between draws.
pub trait DrawTarget {
    /// Updates `first_vertex`, `vertex_count` and `instance_count`.
    fn set_draw_range(&mut self, range: DrawRange);

    /// Issues the configured draw call against the current frame.
    fn render(&mut self);
}

/// Drives one pipeline through a sequence of hull resolutions, one per
/// frame, using a table built at startup.
///
/// Each frame renders the range selected on the previous frame, then picks
/// the next scheduled resolution, so a new range becomes visible one frame
/// after it is selected.
pub struct HullAnimator<'a, I> {
    table: &'a ResolutionTable,
    schedule: I,
    stride: usize,
}

impl<'a, I> HullAnimator<'a, I>
where
    I: Iterator<Item = u32>,
{
    /// Creates an animator over `table`, stepping through `schedule` with
    /// vertices of `stride` bytes.
    pub fn new(table: &'a ResolutionTable, schedule: I, stride: usize) -> Self {
        Self {
            table,
            schedule,
            stride,
        }
    }

    /// Renders one frame and selects the range for the next one.
    ///
    /// Returns the resolution selected for the next frame, or `None` once
    /// the schedule is exhausted (the last range stays in place).
    ///
    /// # Errors
    ///
    /// [`HullError::UnknownResolution`] when the schedule names a resolution
    /// missing from the table, or the errors of [`DrawRange::from_bytes`].
    pub fn frame<T: DrawTarget>(&mut self, target: &mut T) -> Result<Option<u32>, HullError> {
        target.render();

        let Some(resolution) = self.schedule.next() else {
            return Ok(None);
        };
        let range = self.table.draw_range(resolution, self.stride)?;
        trace!("next frame: resolution {resolution}, {range:?}");
        target.set_draw_range(range);
        Ok(Some(resolution))
    }
}
