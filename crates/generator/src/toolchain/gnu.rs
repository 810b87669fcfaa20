//! GNU binutils driver.
//!
//! Binaries are located once, at discovery: explicit paths from the
//! configuration win, otherwise the first known cross prefix whose `as` is on
//! `PATH` is used for all three tools.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tracing::{debug, info};

use crate::common::constants::{CODE_SECTION, TOOL_PREFIXES};
use crate::common::error::{Error, Result};
use crate::config::{Extraction, ToolchainConfig};
use crate::toolchain::{Toolchain, elf};

/// Assembler, disassembler, and object-copy binaries of one cross toolchain.
#[derive(Clone, Debug)]
pub struct GnuToolchain {
    assembler: PathBuf,
    objdump: Option<PathBuf>,
    objcopy: Option<PathBuf>,
    march: String,
    mabi: String,
    relax: bool,
    extraction: Extraction,
}

impl GnuToolchain {
    /// Locates the toolchain binaries described by `config`.
    ///
    /// The assembler is required. The disassembler and object-copy tools are
    /// optional here and reported as missing only when used.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ToolNotFound`] when no assembler can be located.
    pub fn discover(config: &ToolchainConfig) -> Result<Self> {
        let prefix = config.prefix.clone().or_else(probe_prefix);
        if let Some(prefix) = &prefix {
            info!(prefix = %prefix, "using toolchain prefix");
        }

        let assembler = locate(config.assembler.as_deref(), prefix.as_deref(), "as")?;
        let objdump = locate(config.objdump.as_deref(), prefix.as_deref(), "objdump").ok();
        let objcopy = locate(config.objcopy.as_deref(), prefix.as_deref(), "objcopy").ok();
        debug!(?assembler, ?objdump, ?objcopy, "located toolchain binaries");

        Ok(Self {
            assembler,
            objdump,
            objcopy,
            march: config.march.clone(),
            mabi: config.mabi.clone(),
            relax: config.relax,
            extraction: config.extraction,
        })
    }

    /// Path of the located assembler.
    pub fn assembler(&self) -> &Path {
        &self.assembler
    }
}

impl Toolchain for GnuToolchain {
    fn assemble(&self, source: &Path, object: &Path) -> Result<()> {
        let mut cmd = Command::new(&self.assembler);
        let _ = cmd
            .arg(format!("-march={}", self.march))
            .arg(format!("-mabi={}", self.mabi));
        if !self.relax {
            let _ = cmd.arg("-mno-relax");
        }
        let _ = cmd.arg(source).arg("-o").arg(object);
        let _ = run(&mut cmd, &self.assembler)?;
        Ok(())
    }

    fn disassemble(&self, object: &Path) -> Result<String> {
        let objdump = required(self.objdump.as_ref(), "objdump")?;
        let out = run(Command::new(objdump).arg("-d").arg(object), objdump)?;
        Ok(String::from_utf8_lossy(&out.stdout).into_owned())
    }

    fn extract_code(&self, object: &Path) -> Result<Vec<u8>> {
        match self.extraction {
            Extraction::Elf => elf::read_code_section(object),
            Extraction::Objcopy => {
                let objcopy = required(self.objcopy.as_ref(), "objcopy")?;
                let binary = object.with_extension("bin");
                let _ = run(
                    Command::new(objcopy)
                        .arg("-O")
                        .arg("binary")
                        .arg("-j")
                        .arg(CODE_SECTION)
                        .arg(object)
                        .arg(&binary),
                    objcopy,
                )?;
                Ok(fs::read(&binary)?)
            }
        }
    }
}

/// First known cross prefix whose assembler is on `PATH`.
fn probe_prefix() -> Option<String> {
    TOOL_PREFIXES
        .iter()
        .find(|p| which::which(format!("{p}as")).is_ok())
        .map(|p| (*p).to_string())
}

fn locate(explicit: Option<&Path>, prefix: Option<&str>, tool: &str) -> Result<PathBuf> {
    let name = match (explicit, prefix) {
        (Some(path), _) => path.to_path_buf(),
        (None, Some(prefix)) => PathBuf::from(format!("{prefix}{tool}")),
        (None, None) => {
            return Err(Error::ToolNotFound {
                tool: format!("{tool} (no prefix among {})", TOOL_PREFIXES.join(", ")),
            });
        }
    };
    which::which(&name).map_err(|_| Error::ToolNotFound {
        tool: name.display().to_string(),
    })
}

fn required<'a>(path: Option<&'a PathBuf>, tool: &str) -> Result<&'a PathBuf> {
    path.ok_or_else(|| Error::ToolNotFound {
        tool: tool.to_string(),
    })
}

fn run(cmd: &mut Command, tool: &Path) -> Result<Output> {
    debug!(command = ?cmd, "running toolchain binary");
    let out = cmd.output().map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::ToolNotFound {
            tool: tool.display().to_string(),
        },
        _ => Error::Io(e),
    })?;
    if !out.status.success() {
        return Err(Error::ToolFailed {
            tool: tool.display().to_string(),
            status: out.status,
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
        });
    }
    Ok(out)
}
