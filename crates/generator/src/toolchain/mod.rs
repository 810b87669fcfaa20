//! Reference toolchain interface.
//!
//! The driver talks to the assembler only through [`Toolchain`], so a run can
//! be exercised against a stand-in that returns canned bytes.

/// ELF code-section reader.
pub mod elf;

/// GNU binutils implementation.
pub mod gnu;

use std::path::Path;

use crate::common::error::Result;

pub use self::gnu::GnuToolchain;

/// Operations a run needs from the reference toolchain.
pub trait Toolchain {
    /// Assembles `source` into the object file `object`.
    ///
    /// # Errors
    ///
    /// Fails when the assembler cannot be run or rejects the source.
    fn assemble(&self, source: &Path, object: &Path) -> Result<()>;

    /// Returns the disassembly of `object`.
    ///
    /// # Errors
    ///
    /// Fails when the disassembler cannot be run or exits unsuccessfully.
    fn disassemble(&self, object: &Path) -> Result<String>;

    /// Returns the raw bytes of the code section of `object`.
    ///
    /// # Errors
    ///
    /// Fails when the object cannot be read or has no code section.
    fn extract_code(&self, object: &Path) -> Result<Vec<u8>>;
}
