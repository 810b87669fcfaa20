//! Instruction Set Model.
//!
//! Describes the RV64G instructions the generator covers, without encoding
//! any of them.
//!
//! # Layers
//!
//! * `operand`: Register, address, and immediate operands with their two renderings.
//! * `mnemonic`: Validated names and their API/assembly spellings.
//! * `rounding` / `ordering`: Rounding-mode, atomic-ordering, and fence tokens.
//! * `format`: Encoding shapes, including multi-form label expansion.
//! * `catalog`: The ordered table binding every mnemonic to one shape.
//! * `instruction`: Field extraction for reading assembled words back.

/// Ordered mnemonic catalog.
pub mod catalog;

/// Instruction formats, families, and multi-form behavior.
pub mod format;

/// Instruction word field extraction.
pub mod instruction;

/// Mnemonic validation and spelling.
pub mod mnemonic;

/// Operand types and slot kinds.
pub mod operand;

/// Atomic ordering, atomic width, and fence barrier tokens.
pub mod ordering;

/// Floating-point rounding modes.
pub mod rounding;
