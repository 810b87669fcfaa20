//! The ordered record of a generation run.

use std::ops::Range;

use serde::Serialize;

use crate::isa::format::{Family, LabelTarget};

/// One emitted assembly instruction and its encoder call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EmittedInstruction {
    /// Catalog family the instruction was generated from.
    pub family: Family,
    /// Assembler mnemonic, including any ordering suffix.
    pub mnemonic: String,
    /// Encoder call text.
    pub api: String,
    /// Assembly line text.
    pub assembly: String,
    /// Label target of a multi-form expansion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<LabelTarget>,
}

/// A run of consecutive instructions generated from one catalog group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    /// Family of the group.
    pub family: Family,
    /// Positions of the group's instructions in the emission.
    pub span: Range<usize>,
}

/// Everything a run emitted, in emission order.
///
/// Position `i` of [`Emission::instructions`] corresponds to the `i`-th word
/// the toolchain produces for the assembly source.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Emission {
    pub(crate) seed: u64,
    pub(crate) instructions: Vec<EmittedInstruction>,
    pub(crate) sections: Vec<Section>,
    pub(crate) expansions: Vec<Range<usize>>,
}

impl Emission {
    /// Seed the run was generated from.
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Instructions in emission order.
    pub fn instructions(&self) -> &[EmittedInstruction] {
        &self.instructions
    }

    /// Catalog groups in emission order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Position ranges of every multi-form expansion.
    pub fn expansions(&self) -> &[Range<usize>] {
        &self.expansions
    }

    /// Number of emitted instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether nothing was emitted.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Instructions of one section.
    pub fn section_instructions(&self, section: &Section) -> &[EmittedInstruction] {
        self.instructions.get(section.span.clone()).unwrap_or_default()
    }
}
