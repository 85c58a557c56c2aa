//! # Config Crate
//!
//! Centralized configuration constants for the joinery pipeline.
//! Every default, limit and tolerance used by the graph model, validator,
//! tessellator and evaluation controller is defined here so the crates
//! agree on one value.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_CLEARANCE, DEFAULT_UNITS, EVALUATION_TIMEOUT_MS};
//!
//! assert_eq!(DEFAULT_UNITS, "mm");
//! assert!(DEFAULT_CLEARANCE >= 0.0);
//! assert_eq!(EVALUATION_TIMEOUT_MS, 5_000);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Millimetres**: Lengths are expressed in the default unit (mm)
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;

#[cfg(test)]
mod tests;
