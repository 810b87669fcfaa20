//! Concrete instruction instances.
//!
//! A [`GeneratedInstance`] holds the one set of operand values drawn for a
//! catalog entry. Both textual renderings read from it, so the register
//! indices, immediates, rounding mode, ordering suffix, and fence barriers are
//! identical across notations by construction.

use rand::Rng;

use crate::common::error::{Error, Result};
use crate::isa::catalog::CatalogEntry;
use crate::isa::format::Layout;
use crate::isa::operand::{GeneralRegister, OperandValue, Random, SlotKind};
use crate::isa::ordering::{AtomicOrdering, Barrier};
use crate::isa::rounding::Rounding;

/// One instantiation of a catalog entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedInstance<'c> {
    entry: &'c CatalogEntry,
    operands: Vec<OperandValue>,
    barriers: Option<[Barrier; 2]>,
}

impl<'c> GeneratedInstance<'c> {
    /// Builds an instance from explicit operand values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCatalog`] when the operands do not fill the
    /// entry's layout exactly, or when the entry is a fence (use
    /// [`GeneratedInstance::fence`]).
    pub fn new(entry: &'c CatalogEntry, operands: Vec<OperandValue>) -> Result<Self> {
        let expected: Vec<SlotKind> = match entry.format().layout() {
            Layout::Slots(slots) => slots.clone(),
            Layout::Atomic { kind, .. } => vec![SlotKind::General; kind.register_count()],
            Layout::Fence => {
                return Err(mismatch(entry, "fence instances are built from barriers"));
            }
        };
        let actual: Vec<SlotKind> = operands.iter().map(OperandValue::kind).collect();
        if actual != expected {
            return Err(mismatch(
                entry,
                &format!("expected operands {expected:?}, got {actual:?}"),
            ));
        }
        Ok(Self {
            entry,
            operands,
            barriers: None,
        })
    }

    /// Builds a fence instance from its predecessor and successor sets.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCatalog`] when the entry is not a fence.
    pub fn fence(entry: &'c CatalogEntry, predecessor: Barrier, successor: Barrier) -> Result<Self> {
        if *entry.format().layout() != Layout::Fence {
            return Err(mismatch(entry, "barriers given for a non-fence entry"));
        }
        Ok(Self {
            entry,
            operands: Vec::new(),
            barriers: Some([predecessor, successor]),
        })
    }

    /// Draws every operand of `entry` exactly once.
    pub(crate) fn generate<R: Rng + ?Sized>(entry: &'c CatalogEntry, rng: &mut R) -> Self {
        let mut barriers = None;
        let operands = match entry.format().layout() {
            Layout::Slots(slots) => slots.iter().map(|slot| slot.generate(rng)).collect(),
            Layout::Atomic { kind, .. } => (0..kind.register_count())
                .map(|_| OperandValue::General(GeneralRegister::random(rng)))
                .collect(),
            Layout::Fence => {
                let mut pick = || Barrier::CHOICES[rng.gen_range(0..Barrier::CHOICES.len())];
                barriers = Some([pick(), pick()]);
                Vec::new()
            }
        };
        Self {
            entry,
            operands,
            barriers,
        }
    }

    /// The instantiated catalog entry.
    pub const fn entry(&self) -> &'c CatalogEntry {
        self.entry
    }

    /// Operand values in layout order.
    pub fn operands(&self) -> &[OperandValue] {
        &self.operands
    }

    /// Fence predecessor and successor sets.
    pub const fn barriers(&self) -> Option<[Barrier; 2]> {
        self.barriers
    }

    /// Rounding mode fixed by the entry's format.
    pub const fn rounding(&self) -> Option<Rounding> {
        self.entry.format().rounding()
    }

    /// Ordering suffix fixed by the entry's format.
    pub const fn ordering(&self) -> Option<AtomicOrdering> {
        self.entry.format().ordering()
    }
}

fn mismatch(entry: &CatalogEntry, reason: &str) -> Error {
    Error::InvalidCatalog {
        mnemonic: entry.mnemonic().to_string(),
        reason: reason.to_string(),
    }
}
