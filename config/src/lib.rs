//! # Config Crate
//!
//! Centralized configuration constants for the hull mesh pipeline.
//! All magic numbers and tunable parameters are defined here to ensure
//! consistency across crates and easy configuration management.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{HullConfig, DEFAULT_SPHERE_RESOLUTION, HULL_EPSILON_SCALE};
//!
//! let config = HullConfig::default();
//! assert_eq!(config.epsilon_scale, HULL_EPSILON_SCALE);
//! assert_eq!(config.sphere_resolution, DEFAULT_SPHERE_RESOLUTION);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **No Dependencies**: Plain constants and a validated config snapshot
//! - **Demo Compatible**: Defaults match the sphere and LOD demos

pub mod constants;

#[cfg(test)]
mod tests;
