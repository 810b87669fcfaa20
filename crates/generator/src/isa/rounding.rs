//! Floating-point rounding mode tags.
//!
//! RISC-V defines five static rounding modes:
//!
//! | Value | Mode | Description                             |
//! |-------|------|-----------------------------------------|
//! | 0b000 | RNE  | Round to Nearest, ties to Even          |
//! | 0b001 | RTZ  | Round towards Zero                      |
//! | 0b010 | RDN  | Round Down (towards −∞)                 |
//! | 0b011 | RUP  | Round Up (towards +∞)                   |
//! | 0b100 | RMM  | Round to Nearest, ties to Max Magnitude |
//!
//! Each floating-point catalog entry carries one fixed mode so that every run
//! cross-checks the same `rm` field for that mnemonic.

use std::fmt;

/// RISC-V rounding mode encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RoundingMode {
    /// Round to Nearest, ties to Even (default IEEE mode).
    Rne = 0b000,
    /// Round towards Zero.
    Rtz = 0b001,
    /// Round Down (towards −∞).
    Rdn = 0b010,
    /// Round Up (towards +∞).
    Rup = 0b011,
    /// Round to Nearest, ties to Max Magnitude.
    Rmm = 0b100,
}

impl RoundingMode {
    /// Lowercase name used by both the assembler and the encoder enum.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rne => "rne",
            Self::Rtz => "rtz",
            Self::Rdn => "rdn",
            Self::Rup => "rup",
            Self::Rmm => "rmm",
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rounding mode attached to a floating-point format.
///
/// The encoder call always names the mode. The assembly text names it only
/// when it is *spelled*; conversions that are exact in every mode are written
/// without a suffix, which the assembler encodes as RNE. An unspelled rounding
/// is therefore always RNE.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rounding {
    mode: RoundingMode,
    spelled: bool,
}

impl Rounding {
    /// A mode written out in both notations.
    pub const fn explicit(mode: RoundingMode) -> Self {
        Self {
            mode,
            spelled: true,
        }
    }

    /// RNE, named in the encoder call and left to the assembler's default.
    pub const fn implied() -> Self {
        Self {
            mode: RoundingMode::Rne,
            spelled: false,
        }
    }

    /// The mode encoded in the `rm` field.
    pub const fn mode(self) -> RoundingMode {
        self.mode
    }

    /// Whether the assembly text carries the mode.
    pub const fn is_spelled(self) -> bool {
        self.spelled
    }
}
