//! Instruction format descriptions.
//!
//! An [`InstructionFormat`] fixes everything about an encoding shape except
//! the concrete operand values: the operand slots, the mnemonic transform, an
//! optional rounding-mode tag, and an optional [`MultiForm`] expansion for
//! label-targeting pseudo-instructions.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::common::constants::{BACK_LABEL, CURRENT_ADDRESS, FORTH_LABEL};
use crate::common::error::{Error, Result};
use crate::isa::mnemonic::Mnemonic;
use crate::isa::operand::SlotKind;
use crate::isa::ordering::{AtomicKind, AtomicOrdering};
use crate::isa::rounding::Rounding;

/// Target substituted into one form of a multi-form instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelTarget {
    /// The address of the instruction itself.
    Current,
    /// The label bound after the generated body.
    Forward,
    /// The label bound before the generated body.
    Backward,
}

impl LabelTarget {
    /// Text of the target in an encoder call; `call_prefix` qualifies `pc()`.
    pub fn api_token(self, call_prefix: &str) -> String {
        match self {
            Self::Current => format!("{call_prefix}pc()"),
            Self::Forward => FORTH_LABEL.to_string(),
            Self::Backward => BACK_LABEL.to_string(),
        }
    }

    /// Text of the target in assembly.
    pub const fn assembly_token(self) -> &'static str {
        match self {
            Self::Current => CURRENT_ADDRESS,
            Self::Forward => FORTH_LABEL,
            Self::Backward => BACK_LABEL,
        }
    }
}

/// Byte offsets the target field of a label-taking encoding can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Reach {
    /// Most negative offset.
    pub min: i64,
    /// Most positive offset.
    pub max: i64,
}

impl Reach {
    /// 13-bit signed, even offset of a conditional branch.
    pub const BRANCH: Self = Self {
        min: -(1 << 12),
        max: (1 << 12) - 2,
    };

    /// 21-bit signed, even offset of `jal`.
    pub const JUMP: Self = Self {
        min: -(1 << 20),
        max: (1 << 20) - 2,
    };

    /// Whether `offset` fits the target field.
    pub const fn contains(self, offset: i64) -> bool {
        self.min <= offset && offset <= self.max
    }
}

/// Expansion of one catalog entry into several emitted forms that differ only
/// in their label target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MultiForm {
    targets: &'static [LabelTarget],
    reach: Reach,
}

impl MultiForm {
    const LABELS: &'static [LabelTarget] =
        &[LabelTarget::Current, LabelTarget::Forward, LabelTarget::Backward];

    /// Conditional branch to the current address, forward label, backward label.
    pub const BRANCH: Self = Self {
        targets: Self::LABELS,
        reach: Reach::BRANCH,
    };

    /// Jump to the current address, forward label, backward label.
    pub const JUMP: Self = Self {
        targets: Self::LABELS,
        reach: Reach::JUMP,
    };

    /// Number of forms emitted per instance.
    pub const fn count(self) -> usize {
        self.targets.len()
    }

    /// Targets in emission order.
    pub const fn targets(self) -> &'static [LabelTarget] {
        self.targets
    }

    /// Offsets the target field can encode.
    pub const fn reach(self) -> Reach {
        self.reach
    }
}

/// How the operands of a format are laid out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Layout {
    /// Operands listed in the same order in both notations.
    Slots(Vec<SlotKind>),
    /// Atomic memory operation; the address register is parenthesized in
    /// assembly and the operand order differs between notations.
    Atomic {
        /// Register layout.
        kind: AtomicKind,
        /// Fixed ordering suffix.
        ordering: AtomicOrdering,
    },
    /// `fence` with sampled predecessor and successor sets.
    Fence,
}

/// One ISA encoding shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstructionFormat {
    layout: Layout,
    rounding: Option<Rounding>,
    multi_form: Option<MultiForm>,
}

impl InstructionFormat {
    /// Format whose operands are `slots`, in order.
    pub fn slots(slots: impl Into<Vec<SlotKind>>) -> Self {
        Self {
            layout: Layout::Slots(slots.into()),
            rounding: None,
            multi_form: None,
        }
    }

    /// Format with no operands.
    pub const fn bare() -> Self {
        Self {
            layout: Layout::Slots(Vec::new()),
            rounding: None,
            multi_form: None,
        }
    }

    /// Atomic memory operation.
    pub const fn atomic(kind: AtomicKind, ordering: AtomicOrdering) -> Self {
        Self {
            layout: Layout::Atomic { kind, ordering },
            rounding: None,
            multi_form: None,
        }
    }

    /// Memory fence.
    pub const fn fence() -> Self {
        Self {
            layout: Layout::Fence,
            rounding: None,
            multi_form: None,
        }
    }

    /// Format whose register slots are given as a mode string (see
    /// [`SlotKind::from_mode`]).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCatalog`] for an unknown mode character.
    pub fn registers(mnemonic: &Mnemonic, modes: &str) -> Result<Self> {
        let slots = modes
            .chars()
            .map(|c| {
                SlotKind::from_mode(c).ok_or_else(|| Error::InvalidCatalog {
                    mnemonic: mnemonic.to_string(),
                    reason: format!("unknown register mode '{c}' in \"{modes}\""),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::slots(slots))
    }

    /// Attaches a rounding-mode tag.
    #[must_use]
    pub fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = Some(rounding);
        self
    }

    /// Marks the format as expanding into the forms of `multi`.
    #[must_use]
    pub fn with_labels(mut self, multi: MultiForm) -> Self {
        self.multi_form = Some(multi);
        self
    }

    /// Operand layout.
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Rounding-mode tag, if the format has one.
    pub const fn rounding(&self) -> Option<Rounding> {
        self.rounding
    }

    /// Ordering suffix of an atomic format.
    pub const fn ordering(&self) -> Option<AtomicOrdering> {
        match self.layout {
            Layout::Atomic { ordering, .. } => Some(ordering),
            _ => None,
        }
    }

    /// Multi-form expansion, if any.
    pub const fn multi_form(&self) -> Option<MultiForm> {
        self.multi_form
    }

    /// Number of assembly instructions one instance emits.
    pub fn forms_count(&self) -> usize {
        self.multi_form.map_or(1, MultiForm::count)
    }

    /// Assembler mnemonic for `mnemonic` under this format.
    pub fn assembly_name(&self, mnemonic: &Mnemonic) -> String {
        match self.layout {
            Layout::Atomic { ordering, .. } => {
                format!("{}.{}", mnemonic.assembly_name(), ordering.suffix())
            }
            _ => mnemonic.assembly_name(),
        }
    }

    /// Checks that the format is self-consistent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCatalog`] when a rounding mode is attached to a
    /// format without float registers, when a multi-form format has
    /// non-register operands, or when rounding or multi-form behavior is
    /// combined with an atomic or fence layout.
    pub fn validate(&self, mnemonic: &Mnemonic) -> Result<()> {
        let invalid = |reason: &str| {
            Err(Error::InvalidCatalog {
                mnemonic: mnemonic.to_string(),
                reason: reason.to_string(),
            })
        };
        match &self.layout {
            Layout::Slots(slots) => {
                if self.rounding.is_some() && !slots.contains(&SlotKind::Float) {
                    return invalid("rounding mode on a format without float registers");
                }
                if self.multi_form.is_some() && !slots.iter().all(|s| s.is_register()) {
                    return invalid("multi-form format with non-register operands");
                }
                Ok(())
            }
            Layout::Atomic { .. } | Layout::Fence => {
                if self.rounding.is_some() || self.multi_form.is_some() {
                    return invalid("atomic and fence formats take no rounding or label");
                }
                Ok(())
            }
        }
    }
}

/// Section of the catalog, named after the shape its entries share.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Family {
    /// Three-register arithmetic and logic.
    ArithOp,
    /// Add/subtract with a 12-bit immediate.
    AddSubImmOp,
    /// Logic with a 12-bit immediate.
    LogicalImmOp,
    /// Label-only jumps.
    AbsOp,
    /// Register-indirect jump.
    TwoRegAbsOp,
    /// Upper-immediate loads.
    LoadImmedOp,
    /// Branches comparing one register against zero.
    RegAndAbsOp,
    /// Branches comparing two registers.
    TwoRegAndAbsOp,
    /// Compare with a 12-bit immediate.
    TwoRegImmedOp,
    /// Shift by register.
    ShiftRegOp,
    /// Shift by immediate.
    ShiftImmOp,
    /// No operands.
    Op,
    /// Memory fence.
    SystemOp,
    /// Atomic memory operations.
    AtomOp,
    /// Single destination register.
    OneRegOp,
    /// Two-register moves and compares.
    TwoRegOp,
    /// Three-register compares.
    ThreeRegOp,
    /// `csrrw`-style: rd, csr, rs1.
    CsrxixOp,
    /// `csrrwi`-style: rd, csr, uimm.
    CsrxiiOp,
    /// `csrr`: rd, csr.
    CsrxiOp,
    /// `csrw`-style: csr, rs.
    CsrixOp,
    /// `csrwi`-style: csr, uimm.
    CsriiOp,
    /// Loads and stores through an address.
    LoadStoreOp,
    /// Two-operand float arithmetic.
    Float2ArithOp,
    /// Three-operand float arithmetic.
    Float3ArithOp,
    /// Fused multiply-add family.
    Float4ArithOp,
    /// Two-operand float moves, classification and sign ops.
    TwoRegFloatOp,
    /// Three-operand sign injection, min/max and compares.
    ThreeRegFloatOp,
    /// Conversions between integer and float formats.
    FloatConvertOp,
}

impl Family {
    /// Every family in catalog order.
    pub const ALL: [Self; 29] = [
        Self::ArithOp,
        Self::AddSubImmOp,
        Self::LogicalImmOp,
        Self::AbsOp,
        Self::TwoRegAbsOp,
        Self::LoadImmedOp,
        Self::RegAndAbsOp,
        Self::TwoRegAndAbsOp,
        Self::TwoRegImmedOp,
        Self::ShiftRegOp,
        Self::ShiftImmOp,
        Self::Op,
        Self::SystemOp,
        Self::AtomOp,
        Self::OneRegOp,
        Self::TwoRegOp,
        Self::ThreeRegOp,
        Self::CsrxixOp,
        Self::CsrxiiOp,
        Self::CsrxiOp,
        Self::CsrixOp,
        Self::CsriiOp,
        Self::LoadStoreOp,
        Self::Float2ArithOp,
        Self::Float3ArithOp,
        Self::Float4ArithOp,
        Self::TwoRegFloatOp,
        Self::ThreeRegFloatOp,
        Self::FloatConvertOp,
    ];

    /// Section name written into the generated artifacts.
    pub const fn name(self) -> &'static str {
        match self {
            Self::ArithOp => "ArithOp",
            Self::AddSubImmOp => "AddSubImmOp",
            Self::LogicalImmOp => "LogicalImmOp",
            Self::AbsOp => "AbsOp",
            Self::TwoRegAbsOp => "TwoRegAbsOp",
            Self::LoadImmedOp => "LoadImmedOp",
            Self::RegAndAbsOp => "RegAndAbsOp",
            Self::TwoRegAndAbsOp => "TwoRegAndAbsOp",
            Self::TwoRegImmedOp => "TwoRegImmedOp",
            Self::ShiftRegOp => "ShiftRegOp",
            Self::ShiftImmOp => "ShiftImmOp",
            Self::Op => "Op",
            Self::SystemOp => "SystemOp",
            Self::AtomOp => "AtomOp",
            Self::OneRegOp => "OneRegOp",
            Self::TwoRegOp => "TwoRegOp",
            Self::ThreeRegOp => "ThreeRegOp",
            Self::CsrxixOp => "CsrxixOp",
            Self::CsrxiiOp => "CsrxiiOp",
            Self::CsrxiOp => "CsrxiOp",
            Self::CsrixOp => "CsrixOp",
            Self::CsriiOp => "CsriiOp",
            Self::LoadStoreOp => "LoadStoreOp",
            Self::Float2ArithOp => "Float2ArithOp",
            Self::Float3ArithOp => "Float3ArithOp",
            Self::Float4ArithOp => "Float4ArithOp",
            Self::TwoRegFloatOp => "TwoRegFloatOp",
            Self::ThreeRegFloatOp => "ThreeRegFloatOp",
            Self::FloatConvertOp => "FloatConvertOp",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Family {
    type Err = String;

    /// Parses a family name, ignoring ASCII case.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown instruction family `{s}`"))
    }
}
