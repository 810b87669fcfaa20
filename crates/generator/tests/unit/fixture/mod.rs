//! # Fixture Unit Tests

/// Label-independence check over multi-form expansions.
pub mod check;

/// Pairing and JSON serialization.
pub mod pairing;


/// Byte-stream repacking.
pub mod words;
