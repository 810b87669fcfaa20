//! Error definitions.
//!
//! Every failure in a run is fatal: the driver stops at the first error and
//! writes no partial fixture. The variants fall into three groups:
//! 1. **Catalog:** Malformed mnemonics or format declarations.
//! 2. **Toolchain:** Missing binaries, rejected sources, unreadable objects.
//! 3. **Pairing:** Extracted code that does not line up with the emitted instructions.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building the catalog or producing a fixture.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A mnemonic spelling is not a valid instruction name.
    #[error("invalid mnemonic `{name}`: {reason}")]
    InvalidMnemonic {
        /// The rejected spelling.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// A catalog entry declares an inconsistent format.
    #[error("invalid catalog entry `{mnemonic}`: {reason}")]
    InvalidCatalog {
        /// Mnemonic of the offending entry.
        mnemonic: String,
        /// What is inconsistent.
        reason: String,
    },

    /// A label-targeting form would sit farther from its label than its
    /// encoding can express.
    #[error(
        "`{mnemonic}` would target a label {offset} bytes away, outside its reach of \
         {min}..={max} bytes; at most {limit} instances per mnemonic fit the selected families"
    )]
    LabelOutOfReach {
        /// Assembly mnemonic of the form.
        mnemonic: String,
        /// Byte offset from the form to its label.
        offset: i64,
        /// Most negative encodable offset.
        min: i64,
        /// Most positive encodable offset.
        max: i64,
        /// Largest repetition count whose forms all fit.
        limit: usize,
    },

    /// A family name in the configuration matches no catalog group.
    #[error("unknown instruction family `{0}`")]
    UnknownFamily(String),

    /// A required external binary could not be located.
    #[error("toolchain binary not found: {tool}")]
    ToolNotFound {
        /// Name or path that was searched for.
        tool: String,
    },

    /// An external binary ran but exited unsuccessfully.
    #[error("{tool} failed ({status}):\n{stderr}")]
    ToolFailed {
        /// Binary that was invoked.
        tool: String,
        /// Its exit status.
        status: ExitStatus,
        /// Captured standard error.
        stderr: String,
    },

    /// Reading or writing an artifact failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The assembled object could not be parsed.
    #[error("malformed object file: {0}")]
    Object(#[from] object::Error),

    /// The assembled object has no code section.
    #[error("object {path} has no {section} section")]
    MissingCodeSection {
        /// Object that was inspected.
        path: PathBuf,
        /// Section that was looked up.
        section: &'static str,
    },

    /// The extracted code is not a whole number of 32-bit words.
    #[error("code section is {len} bytes, not a multiple of 4")]
    MisalignedCode {
        /// Byte length of the extracted code.
        len: usize,
    },

    /// The toolchain produced a different number of words than were emitted.
    #[error("extracted {actual} instruction words but emitted {expected} instructions")]
    WordCountMismatch {
        /// Number of emitted assembly instructions.
        expected: usize,
        /// Number of extracted words.
        actual: usize,
    },

    /// The forms of one multi-form entry disagree outside their target field.
    #[error("forms of `{mnemonic}` differ outside the target field: {words:08x?}")]
    FormMismatch {
        /// Assembly mnemonic of the expansion.
        mnemonic: String,
        /// The words that were compared.
        words: Vec<u32>,
    },

    /// Configuration JSON could not be parsed, or the fixture could not be
    /// serialized.
    #[error("JSON error: {0}")]
    Config(#[from] serde_json::Error),
}
