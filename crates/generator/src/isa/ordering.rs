//! Memory-ordering operands: atomic `aq`/`rl` suffixes and fence barrier sets.

use std::fmt;

/// Ordering bit set on an atomic memory operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AtomicOrdering {
    /// `aq`: no later access may be observed before this one.
    Acquire,
    /// `rl`: no earlier access may be observed after this one.
    Release,
}

impl AtomicOrdering {
    /// Suffix appended to the assembler mnemonic and named in the encoder call.
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Acquire => "aq",
            Self::Release => "rl",
        }
    }
}

impl fmt::Display for AtomicOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Operand width of an atomic memory operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AtomicWidth {
    /// 32-bit (`.w`).
    Word,
    /// 64-bit (`.d`).
    Double,
}

impl AtomicWidth {
    /// Width letter as it appears in the mnemonic.
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Word => "w",
            Self::Double => "d",
        }
    }
}

/// Operand layout of an atomic instruction, derived from its root mnemonic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AtomicKind {
    /// `lr`: destination and address register.
    LoadReserved,
    /// `sc`: status destination, value, and address register.
    StoreConditional,
    /// `amo*`: destination, address, and value register.
    MemoryOperation,
}

impl AtomicKind {
    /// Classifies a root mnemonic, or returns `None` for non-atomic names.
    pub fn from_root(root: &str) -> Option<Self> {
        match root {
            "lr" => Some(Self::LoadReserved),
            "sc" => Some(Self::StoreConditional),
            r if r.starts_with("amo") && r.len() > 3 => Some(Self::MemoryOperation),
            _ => None,
        }
    }

    /// Number of general registers the instruction names.
    pub const fn register_count(self) -> usize {
        match self {
            Self::LoadReserved => 2,
            Self::StoreConditional | Self::MemoryOperation => 3,
        }
    }
}

/// A `fence` predecessor or successor set, as I/O/R/W bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Barrier(u8);

impl Barrier {
    /// Device input.
    pub const I: u8 = 0b1000;
    /// Device output.
    pub const O: u8 = 0b0100;
    /// Memory reads.
    pub const R: u8 = 0b0010;
    /// Memory writes.
    pub const W: u8 = 0b0001;

    /// Barrier sets the generator samples from.
    pub const CHOICES: [Self; 7] = [
        Self(Self::I),
        Self(Self::O),
        Self(Self::R),
        Self(Self::W),
        Self(Self::I | Self::R),
        Self(Self::O | Self::W),
        Self(Self::I | Self::O | Self::R | Self::W),
    ];

    /// Raw 4-bit set as the encoder takes it.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Assembler spelling, e.g. `iorw`.
    pub fn name(self) -> String {
        [(Self::I, 'i'), (Self::O, 'o'), (Self::R, 'r'), (Self::W, 'w')]
            .iter()
            .filter(|&&(bit, _)| self.0 & bit != 0)
            .map(|&(_, c)| c)
            .collect()
    }
}
