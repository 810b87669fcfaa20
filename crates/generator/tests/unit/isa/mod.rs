//! # ISA Unit Tests
//!
//! Tests for the instruction set model: operand ranges and spellings, mnemonic
//! normalization, format validation, field extraction, and the RV64G catalog.



/// Target-independent field extraction.
pub mod instruction_bits;
