//! # Toolchain Unit Tests


/// In-process `.text` extraction.
pub mod elf;
