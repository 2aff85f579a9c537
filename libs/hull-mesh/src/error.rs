//! # Hull Errors
//!
//! Error types for hull construction and GPU packing.

use thiserror::Error;

/// Errors that can occur while building or packing hull meshes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HullError {
    /// The caller's point cloud cannot span a 3D hull.
    ///
    /// Raised for fewer than 4 points, non-finite coordinates, or clouds
    /// whose points are all coincident, collinear or coplanar.
    #[error("Degenerate input: {message}")]
    DegenerateInput {
        /// What is wrong with the input.
        message: String,
    },

    /// An internal invariant of the hull construction broke.
    ///
    /// This indicates a defect in horizon stitching, not bad input data,
    /// and must never be swallowed.
    #[error("Numerical instability: {message}")]
    NumericalInstability {
        /// Which invariant broke.
        message: String,
    },

    /// A vertex layout string could not be parsed.
    #[error("Invalid vertex layout: {message}")]
    InvalidLayout {
        /// Why the layout or stride was rejected.
        message: String,
    },

    /// A draw range was requested for a resolution missing from the table.
    #[error("Unknown resolution: {resolution}")]
    UnknownResolution {
        /// The requested resolution.
        resolution: u32,
    },

    /// A byte range does not fit the `u32` fields of a draw call.
    #[error("Draw range out of bounds: {bytes} bytes at stride {stride}")]
    DrawRangeOverflow {
        /// Offending byte offset or length.
        bytes: usize,
        /// Vertex stride in bytes.
        stride: usize,
    },
}

impl HullError {
    /// Creates a degenerate input error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateInput {
            message: message.into(),
        }
    }

    /// Creates a numerical instability error.
    pub fn instability(message: impl Into<String>) -> Self {
        Self::NumericalInstability {
            message: message.into(),
        }
    }

    /// Creates an invalid layout error.
    pub fn invalid_layout(message: impl Into<String>) -> Self {
        Self::InvalidLayout {
            message: message.into(),
        }
    }

    /// Returns true when the error was caused by the caller's input rather
    /// than by a broken internal invariant.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Self::NumericalInstability { .. })
    }
}
