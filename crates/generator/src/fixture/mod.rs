//! Fixture assembly and artifact rendering.
//!
//! This module turns toolchain output back into test vectors. It provides:
//! 1. **Words:** Little-endian repacking of the code section into 32-bit words.
//! 2. **Check:** Confirmation that multi-form expansions differ only in their target.
//! 3. **Listing:** Assembly source, encoder-test listing, and word array text.
//! 4. **Fixture:** The paired, checked record serialized to JSON.

/// Label-independence check.
pub mod check;

/// Assembly source and listing text.
pub mod listing;

/// Byte-stream repacking and pairing.
pub mod words;

use serde::{Serialize, Serializer};

use crate::common::error::Result;
use crate::engine::Emission;
use crate::isa::format::{Family, LabelTarget};

/// One emitted instruction paired with the word the toolchain produced for it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FixtureEntry {
    /// Catalog family.
    pub family: Family,
    /// Encoder call text.
    pub api: String,
    /// Assembly line text.
    pub assembly: String,
    /// Reference encoding, serialized as a `0x%08x` literal.
    #[serde(serialize_with = "serialize_word")]
    pub word: u32,
    /// Label target of a multi-form expansion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<LabelTarget>,
}

/// A checked set of encoder test vectors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Fixture {
    /// Seed that reproduces the run.
    pub seed: u64,
    /// Entries in emission order.
    pub entries: Vec<FixtureEntry>,
}

impl Fixture {
    /// Pairs `words` with `emission` and checks every multi-form expansion.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::WordCountMismatch`] when the counts differ and
    /// [`crate::Error::FormMismatch`] when an expansion fails its check.
    pub fn pair(emission: &Emission, words: &[u32]) -> Result<Self> {
        words::ensure_paired(emission.len(), words)?;
        check::check_expansions(emission, words)?;
        let entries = emission
            .instructions()
            .iter()
            .zip(words)
            .map(|(insn, &word)| FixtureEntry {
                family: insn.family,
                api: insn.api.clone(),
                assembly: insn.assembly.clone(),
                word,
                target: insn.target,
            })
            .collect();
        Ok(Self {
            seed: emission.seed(),
            entries,
        })
    }

    /// Words in emission order.
    pub fn words(&self) -> Vec<u32> {
        self.entries.iter().map(|e| e.word).collect()
    }

    /// Pretty-printed JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn serialize_word<S: Serializer>(word: &u32, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&words::hex_literal(*word))
}
