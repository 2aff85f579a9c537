//! # Resolution Schedule
//!
//! Endless sequence of resolutions the LOD demo steps through, one per
//! frame: a sine period sampled at `steps` points (endpoints included),
//! scaled, truncated toward zero and clipped.

use config::constants::{
    SCHEDULE_AMPLITUDE, SCHEDULE_CENTER, SCHEDULE_MAX, SCHEDULE_MIN, SCHEDULE_STEPS,
};
use std::f64::consts::TAU;

/// Cycling resolution schedule.
///
/// # Example
///
/// ```rust
/// use hull_mesh::ResolutionSchedule;
///
/// let first: Vec<u32> = ResolutionSchedule::default().take(3).collect();
/// assert_eq!(first[0], 225);
/// assert!(first[1] > first[0]);
/// ```
#[derive(Debug, Clone)]
pub struct ResolutionSchedule {
    values: Vec<u32>,
    cursor: usize,
}

impl ResolutionSchedule {
    /// Samples `clip(trunc(sin(2π i / (steps - 1)) * amplitude + center), min, max)`
    /// for `i in 0..steps`. With `steps == 1` the single sample is at angle 0.
    pub fn new(steps: usize, center: f64, amplitude: f64, min: u32, max: u32) -> Self {
        let denom = steps.saturating_sub(1).max(1) as f64;
        let values = (0..steps)
            .map(|i| {
                let angle = TAU * i as f64 / denom;
                let value = (angle.sin() * amplitude + center).trunc();
                value.clamp(min as f64, max as f64) as u32
            })
            .collect();
        Self { values, cursor: 0 }
    }

    /// One period of the schedule.
    pub fn period(&self) -> &[u32] {
        &self.values
    }
}

impl Default for ResolutionSchedule {
    fn default() -> Self {
        Self::new(
            SCHEDULE_STEPS,
            SCHEDULE_CENTER,
            SCHEDULE_AMPLITUDE,
            SCHEDULE_MIN,
            SCHEDULE_MAX,
        )
    }
}

impl Iterator for ResolutionSchedule {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let value = *self.values.get(self.cursor)?;
        self.cursor = (self.cursor + 1) % self.values.len();
        Some(value)
    }
}
