//! Mnemonic normalization.
//!
//! Catalog names are written in the encoder's spelling: lowercase with `_`
//! separating the parts of a dotted assembler mnemonic (`fcvt_w_s`). From that
//! single spelling this module derives:
//! 1. **API name:** The encoder method name, with reserved C++ keywords renamed.
//! 2. **Assembly name:** The assembler mnemonic, with `_` turned into `.`.

use std::fmt;

use crate::common::error::{Error, Result};

/// Mnemonics that collide with reserved words of the encoder's host language,
/// paired with the method names the encoder uses instead.
const RESERVED: [(&str, &str); 4] = [("and", "andr"), ("or", "orr"), ("not", "notr"), ("xor", "xorr")];

/// A validated instruction name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Mnemonic {
    name: String,
}

impl Mnemonic {
    /// Validates `name` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMnemonic`] when the name is empty, does not start
    /// with a letter, contains anything other than lowercase ASCII letters,
    /// digits and `_`, or has an empty `_`-separated part.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let reject = |reason| Err(Error::InvalidMnemonic {
            name: name.clone(),
            reason,
        });

        if name.is_empty() {
            return reject("empty name");
        }
        if !name.starts_with(|c: char| c.is_ascii_lowercase()) {
            return reject("must start with a lowercase letter");
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        {
            return reject("only lowercase letters, digits and '_' are allowed");
        }
        if name.split('_').any(str::is_empty) {
            return reject("empty '_'-separated part");
        }
        Ok(Self { name })
    }

    /// The catalog spelling.
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Name of the encoder method that emits this instruction.
    pub fn api_name(&self) -> &str {
        RESERVED
            .iter()
            .find(|&&(isa, _)| isa == self.name)
            .map_or(self.name.as_str(), |&(_, api)| api)
    }

    /// Mnemonic as the assembler spells it.
    pub fn assembly_name(&self) -> String {
        self.name.replace('_', ".")
    }

    /// Appends `_<part>` to the name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMnemonic`] when the result is not a valid name.
    pub fn with_part(&self, part: &str) -> Result<Self> {
        Self::new(format!("{}_{part}", self.name))
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
