//! RV64 assembler cross-check fixture generator.
//!
//! This crate produces randomized test vectors that pin an instruction encoder
//! to the bit patterns of a reference RISC-V toolchain. It is organised as:
//! 1. **ISA:** Operand model, mnemonic normalization, instruction formats, and the catalog.
//! 2. **Engine:** Seeded generation of instruction instances and their two renderings.
//! 3. **Toolchain:** Assembler, disassembler, and code-section extraction.
//! 4. **Fixture:** Byte-stream repacking, pairing, and artifact rendering.
//! 5. **Driver:** One end-to-end run tying the above together.

/// Common types and constants (errors, fixed labels, tool names).
pub mod common;
/// Generator configuration (defaults, toolchain, API notation).
pub mod config;
/// End-to-end run sequencing.
pub mod driver;
/// Instance generation and dual rendering.
pub mod engine;
/// Byte-stream formatting and fixture artifacts.
pub mod fixture;
/// Instruction set model (operands, mnemonics, formats, catalog).
pub mod isa;
/// External assembler, disassembler, and code extraction.
pub mod toolchain;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Crate-wide error and result types.
pub use crate::common::error::{Error, Result};
/// Seeded instance generator.
pub use crate::engine::Generator;
/// The built-in mnemonic catalog.
pub use crate::isa::catalog::Catalog;
