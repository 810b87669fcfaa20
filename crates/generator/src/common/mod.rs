//! Common types and constants shared by every stage of a run.
//!
//! This module provides:
//! 1. **Error Handling:** The crate-wide error enum and result alias.
//! 2. **Constants:** Label names, artifact banners, and toolchain defaults.

/// Error types for catalog construction, toolchain calls, and pairing.
pub mod error;

/// Fixed names and defaults used across the generator.
pub mod constants;

pub use error::{Error, Result};
