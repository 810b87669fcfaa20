//! Configuration for a fixture generation run.
//!
//! This module defines the structures that parameterize a run. It provides:
//! 1. **Defaults:** Toolchain ISA string, artifact names, and notation prefixes.
//! 2. **Structures:** General, toolchain, and API-notation sections.
//! 3. **Enums:** How the code section is extracted from the assembled object.
//!
//! Configuration is read from JSON (`Config::from_json_file`) or built with
//! `Config::default()`; the CLI overrides individual fields from flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::common::error::Result;

/// Default configuration constants.
mod defaults {
    /// ISA string passed to the assembler. No `c`: every word must be 4 bytes.
    pub const MARCH: &str = "rv64g";

    /// ABI string passed to the assembler.
    pub const MABI: &str = "lp64";

    /// Directory artifacts are written to.
    pub const OUTPUT_DIR: &str = ".";

    /// Stem of every artifact file name.
    pub const BASE_NAME: &str = "riscv64ops";

    /// Instances generated per catalog entry.
    pub const INSTANCES_PER_MNEMONIC: usize = 1;

    /// Scope prefix of enum-valued encoder arguments.
    pub const ENUM_SCOPE: &str = "Assembler::";
}

/// How the raw code bytes are pulled out of the assembled object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extraction {
    /// Read the `.text` section of the ELF object in-process.
    #[default]
    Elf,
    /// Run `objcopy -O binary -j .text` and read its output.
    Objcopy,
}

impl FromStr for Extraction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "elf" => Ok(Self::Elf),
            "objcopy" => Ok(Self::Objcopy),
            other => Err(format!("unknown extraction method `{other}` (expected elf or objcopy)")),
        }
    }
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use rvasmtest_core::config::{Config, Extraction};
///
/// let json = r#"{
///     "general": { "seed": 42, "families": ["ArithOp"] },
///     "toolchain": { "prefix": "riscv64-linux-gnu-", "extraction": "objcopy" },
///     "api": { "call_prefix": "__ " }
/// }"#;
///
/// let config = Config::from_json_str(json).unwrap();
/// assert_eq!(config.general.seed, Some(42));
/// assert_eq!(config.toolchain.extraction, Extraction::Objcopy);
/// assert_eq!(config.toolchain.march, "rv64g");
/// assert_eq!(config.api.enum_scope, "Assembler::");
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Run-level settings
    pub general: GeneralConfig,
    /// External toolchain settings
    pub toolchain: ToolchainConfig,
    /// Encoder API notation settings
    pub api: ApiConfig,
}

impl Config {
    /// Parses a configuration from JSON text; missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] for malformed JSON or unknown values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] if the file cannot be read and
    /// [`crate::Error::Config`] if it cannot be parsed.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }
}

/// Run-level settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// RNG seed; a fresh one is drawn and logged when unset.
    pub seed: Option<u64>,

    /// Directory the artifacts are written to.
    pub output_dir: PathBuf,

    /// File stem shared by the `.s`, `.o`, `.txt` and `.json` artifacts.
    pub base_name: String,

    /// Instances generated per catalog entry.
    pub instances_per_mnemonic: usize,

    /// Families to generate (by section name); empty means all.
    pub families: Vec<String>,

    /// Embed the disassembly in the listing.
    pub include_disassembly: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            seed: None,
            output_dir: PathBuf::from(defaults::OUTPUT_DIR),
            base_name: defaults::BASE_NAME.to_string(),
            instances_per_mnemonic: defaults::INSTANCES_PER_MNEMONIC,
            families: Vec::new(),
            include_disassembly: true,
        }
    }
}

impl GeneralConfig {
    /// Path of the artifact with the given extension.
    pub fn artifact(&self, extension: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.{extension}", self.base_name))
    }
}

/// External toolchain settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    /// Binary name prefix, e.g. `riscv64-linux-gnu-`; probed on `PATH` when unset.
    pub prefix: Option<String>,

    /// Explicit assembler path; overrides the prefix.
    pub assembler: Option<PathBuf>,

    /// Explicit disassembler path; overrides the prefix.
    pub objdump: Option<PathBuf>,

    /// Explicit object-copy path; overrides the prefix.
    pub objcopy: Option<PathBuf>,

    /// `-march` value.
    pub march: String,

    /// `-mabi` value.
    pub mabi: String,

    /// Allow linker relaxation. Off by default so branch offsets are resolved
    /// by the assembler instead of left to relocations.
    pub relax: bool,

    /// Code extraction method.
    pub extraction: Extraction,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            prefix: None,
            assembler: None,
            objdump: None,
            objcopy: None,
            march: defaults::MARCH.to_string(),
            mabi: defaults::MABI.to_string(),
            relax: false,
            extraction: Extraction::default(),
        }
    }
}

/// Spelling of encoder calls.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Text placed before every call, e.g. `__ ` for a macro-assembler shorthand.
    pub call_prefix: String,

    /// Scope prefix of rounding-mode and ordering arguments.
    pub enum_scope: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            call_prefix: String::new(),
            enum_scope: defaults::ENUM_SCOPE.to_string(),
        }
    }
}
