//! Operand model.
//!
//! Every operand a catalog entry can carry is one of the types below. Each
//! type samples only values that are legal for its slot, so nothing
//! downstream validates ranges. Rendering is a pure function of the stored
//! value and the requested [`Notation`]:
//! 1. **Api:** Constructor-style text placed inside an encoder call.
//! 2. **Assembly:** Operand text accepted by the reference assembler.

use std::ops::RangeInclusive;

use rand::Rng;

/// The two textual grammars every instance is rendered in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Notation {
    /// Encoder API call syntax, e.g. `Address(x5, -16)`.
    Api,
    /// Reference assembler syntax, e.g. `-16(x5)`.
    Assembly,
}

/// Renders a stored operand value.
pub trait Operand {
    /// Returns the operand text in the requested notation.
    fn render(&self, notation: Notation) -> String;
}

/// Operands that can be sampled without further parameters.
pub trait Random: Sized {
    /// Draws a value uniformly from the legal range of the operand.
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

macro_rules! register_operand {
    ($(#[$meta:meta])* $name:ident, $range:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub struct $name(u8);

        impl $name {
            /// Indices this operand may take.
            pub const RANGE: RangeInclusive<u8> = $range;

            /// Wraps `index`, or returns `None` when it is outside [`Self::RANGE`].
            pub fn new(index: u8) -> Option<Self> {
                Self::RANGE.contains(&index).then_some(Self(index))
            }

            /// Architectural register number.
            pub const fn index(self) -> u8 {
                self.0
            }
        }

        impl Random for $name {
            fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
                Self(rng.gen_range(Self::RANGE))
            }
        }
    };
}

register_operand!(
    /// Integer register that never aliases `x0`.
    GeneralRegister,
    1..=31
);

register_operand!(
    /// Integer register whose index 0 renders as the zero-register alias.
    GeneralRegisterOrZero,
    0..=31
);

register_operand!(
    /// Integer register whose index 2 renders as the stack-pointer alias.
    GeneralRegisterOrStackPointer,
    0..=31
);

register_operand!(
    /// Floating-point register.
    FloatRegister,
    0..=31
);

impl Operand for GeneralRegister {
    fn render(&self, _notation: Notation) -> String {
        format!("x{}", self.0)
    }
}

impl Operand for GeneralRegisterOrZero {
    fn render(&self, notation: Notation) -> String {
        match (self.0, notation) {
            (0, Notation::Api) => "zr".to_string(),
            (0, Notation::Assembly) => "zero".to_string(),
            (n, _) => format!("x{n}"),
        }
    }
}

impl Operand for GeneralRegisterOrStackPointer {
    fn render(&self, _notation: Notation) -> String {
        match self.0 {
            2 => "sp".to_string(),
            n => format!("x{n}"),
        }
    }
}

impl FloatRegister {
    /// The next register in the file, wrapping from `f31` to `f0`.
    pub const fn successor(self) -> Self {
        Self((self.0 + 1) % 32)
    }
}

impl Operand for FloatRegister {
    fn render(&self, _notation: Notation) -> String {
        format!("f{}", self.0)
    }
}

/// Base register plus signed 12-bit displacement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Address {
    base: GeneralRegister,
    offset: i16,
}

impl Address {
    /// Displacements an I/S-type memory access can encode.
    pub const OFFSET_RANGE: RangeInclusive<i16> = -2048..=2047;

    /// Builds an address, or `None` when `offset` does not fit 12 signed bits.
    pub fn new(base: GeneralRegister, offset: i16) -> Option<Self> {
        Self::OFFSET_RANGE
            .contains(&offset)
            .then_some(Self { base, offset })
    }

    /// Base register.
    pub const fn base(self) -> GeneralRegister {
        self.base
    }

    /// Signed displacement.
    pub const fn offset(self) -> i16 {
        self.offset
    }
}

impl Random for Address {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            base: GeneralRegister::random(rng),
            offset: rng.gen_range(Self::OFFSET_RANGE),
        }
    }
}

impl Operand for Address {
    fn render(&self, notation: Notation) -> String {
        let base = self.base.render(notation);
        match notation {
            Notation::Api => format!("Address({base}, {})", self.offset),
            Notation::Assembly => format!("{}({base})", self.offset),
        }
    }
}

/// Role of an immediate operand; fixes its width and both spellings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImmediateKind {
    /// Non-negative value of a sign-extended 12-bit I-type field.
    Imm12,
    /// 5-bit shift amount.
    ShiftAmount,
    /// 20-bit upper immediate for `lui`/`auipc`.
    Upper20,
    /// 12-bit CSR identifier.
    Csr,
    /// 5-bit zero-extended value of the `csr*i` forms.
    CsrValue,
}

impl ImmediateKind {
    /// Values this role may take.
    pub const fn range(self) -> RangeInclusive<u32> {
        match self {
            Self::Imm12 => 0..=(1 << 11) - 1,
            Self::ShiftAmount | Self::CsrValue => 0..=(1 << 5) - 1,
            Self::Upper20 => 0..=(1 << 20) - 1,
            Self::Csr => 0..=(1 << 12) - 1,
        }
    }

    /// Draws a value for this role.
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> Immediate {
        Immediate {
            kind: self,
            value: rng.gen_range(self.range()),
        }
    }
}

/// Constant operand encoded in the instruction word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Immediate {
    kind: ImmediateKind,
    value: u32,
}

impl Immediate {
    /// Builds an immediate, or `None` when `value` is outside the role's range.
    pub fn new(kind: ImmediateKind, value: u32) -> Option<Self> {
        kind.range().contains(&value).then_some(Self { kind, value })
    }

    /// Role of this immediate.
    pub const fn kind(self) -> ImmediateKind {
        self.kind
    }

    /// Raw value.
    pub const fn value(self) -> u32 {
        self.value
    }
}

impl Operand for Immediate {
    fn render(&self, notation: Notation) -> String {
        let v = self.value;
        match (self.kind, notation) {
            (ImmediateKind::Imm12 | ImmediateKind::ShiftAmount, Notation::Api) => format!("{v}u"),
            // The encoder takes the full 32-bit value, the assembler the upper 20 bits.
            (ImmediateKind::Upper20, Notation::Api) => format!("{v:#x}000"),
            (ImmediateKind::Csr | ImmediateKind::CsrValue, Notation::Api)
            | (ImmediateKind::CsrValue, Notation::Assembly) => v.to_string(),
            (
                ImmediateKind::Imm12
                | ImmediateKind::ShiftAmount
                | ImmediateKind::Upper20
                | ImmediateKind::Csr,
                Notation::Assembly,
            ) => format!("{v:#x}"),
        }
    }
}

/// Kind of value a format slot holds, resolved when the catalog is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotKind {
    /// [`GeneralRegister`].
    General,
    /// [`GeneralRegisterOrZero`].
    GeneralOrZero,
    /// [`GeneralRegisterOrStackPointer`].
    GeneralOrStackPointer,
    /// [`FloatRegister`].
    Float,
    /// [`Address`].
    Address,
    /// [`Immediate`] of the given role.
    Immediate(ImmediateKind),
}

impl SlotKind {
    /// Parses one character of a register mode string.
    ///
    /// `x` is a general register, `f` a float register, `z` a general register
    /// that may be `x0`, and `s` a general register that may be `sp`.
    pub const fn from_mode(mode: char) -> Option<Self> {
        match mode {
            'x' => Some(Self::General),
            'f' => Some(Self::Float),
            'z' => Some(Self::GeneralOrZero),
            's' => Some(Self::GeneralOrStackPointer),
            _ => None,
        }
    }

    /// Whether the slot holds a register of either file.
    pub const fn is_register(self) -> bool {
        !matches!(self, Self::Address | Self::Immediate(_))
    }

    /// Draws a concrete value for this slot.
    pub fn generate<R: Rng + ?Sized>(self, rng: &mut R) -> OperandValue {
        match self {
            Self::General => OperandValue::General(GeneralRegister::random(rng)),
            Self::GeneralOrZero => OperandValue::GeneralOrZero(GeneralRegisterOrZero::random(rng)),
            Self::GeneralOrStackPointer => {
                OperandValue::GeneralOrStackPointer(GeneralRegisterOrStackPointer::random(rng))
            }
            Self::Float => OperandValue::Float(FloatRegister::random(rng)),
            Self::Address => OperandValue::Address(Address::random(rng)),
            Self::Immediate(kind) => OperandValue::Immediate(kind.sample(rng)),
        }
    }
}

/// A concrete operand of any kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperandValue {
    /// See [`GeneralRegister`].
    General(GeneralRegister),
    /// See [`GeneralRegisterOrZero`].
    GeneralOrZero(GeneralRegisterOrZero),
    /// See [`GeneralRegisterOrStackPointer`].
    GeneralOrStackPointer(GeneralRegisterOrStackPointer),
    /// See [`FloatRegister`].
    Float(FloatRegister),
    /// See [`Address`].
    Address(Address),
    /// See [`Immediate`].
    Immediate(Immediate),
}

impl OperandValue {
    /// The slot kind this value fills.
    pub const fn kind(&self) -> SlotKind {
        match self {
            Self::General(_) => SlotKind::General,
            Self::GeneralOrZero(_) => SlotKind::GeneralOrZero,
            Self::GeneralOrStackPointer(_) => SlotKind::GeneralOrStackPointer,
            Self::Float(_) => SlotKind::Float,
            Self::Address(_) => SlotKind::Address,
            Self::Immediate(imm) => SlotKind::Immediate(imm.kind()),
        }
    }
}

impl Operand for OperandValue {
    fn render(&self, notation: Notation) -> String {
        match self {
            Self::General(r) => r.render(notation),
            Self::GeneralOrZero(r) => r.render(notation),
            Self::GeneralOrStackPointer(r) => r.render(notation),
            Self::Float(r) => r.render(notation),
            Self::Address(a) => a.render(notation),
            Self::Immediate(i) => i.render(notation),
        }
    }
}

impl From<GeneralRegister> for OperandValue {
    fn from(r: GeneralRegister) -> Self {
        Self::General(r)
    }
}

impl From<FloatRegister> for OperandValue {
    fn from(r: FloatRegister) -> Self {
        Self::Float(r)
    }
}

impl From<Address> for OperandValue {
    fn from(a: Address) -> Self {
        Self::Address(a)
    }
}

impl From<Immediate> for OperandValue {
    fn from(i: Immediate) -> Self {
        Self::Immediate(i)
    }
}
