//! Instruction word field extraction.
//!
//! The generator never encodes instructions. It only reads a few fixed fields
//! back out of the words the reference assembler produced, to confirm that the
//! forms of a multi-form expansion differ in nothing but their target offset.

/// Bit mask for extracting the opcode field (bits 0-6).
pub const OPCODE_MASK: u32 = 0x7F;
/// Bit mask for extracting a register field.
pub const REG_MASK: u32 = 0x1F;
/// Bit mask for extracting the funct3 field (bits 12-14).
pub const FUNCT3_MASK: u32 = 0x7;

/// Conditional branches (BEQ, BNE, BLT, BGE, BLTU, BGEU).
pub const OP_BRANCH: u32 = 0b1100011;
/// Jump and link (JAL).
pub const OP_JAL: u32 = 0b1101111;

/// Trait for extracting instruction fields from encoded instructions.
pub trait InstructionBits {
    /// Extracts the opcode field (bits 0-6).
    fn opcode(&self) -> u32;

    /// Extracts the destination register field (bits 7-11).
    fn rd(&self) -> usize;

    /// Extracts the first source register field (bits 15-19).
    fn rs1(&self) -> usize;

    /// Extracts the second source register field (bits 20-24).
    fn rs2(&self) -> usize;

    /// Extracts the funct3 field (bits 12-14).
    fn funct3(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        self & OPCODE_MASK
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        ((self >> 7) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs1(&self) -> usize {
        ((self >> 15) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs2(&self) -> usize {
        ((self >> 20) & REG_MASK) as usize
    }

    #[inline(always)]
    fn funct3(&self) -> u32 {
        (self >> 12) & FUNCT3_MASK
    }
}

/// Fields of a control-transfer word that do not encode its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetFreeFields {
    /// B-type: opcode, funct3, rs1, rs2.
    Branch {
        /// Comparison selector.
        funct3: u32,
        /// First compared register.
        rs1: usize,
        /// Second compared register.
        rs2: usize,
    },
    /// J-type: opcode, rd.
    Jump {
        /// Link register.
        rd: usize,
    },
    /// Any other opcode, compared as a whole word.
    Other(u32),
}

impl TargetFreeFields {
    /// Extracts the target-independent fields of `word`.
    pub fn of(word: u32) -> Self {
        match word.opcode() {
            OP_BRANCH => Self::Branch {
                funct3: word.funct3(),
                rs1: word.rs1(),
                rs2: word.rs2(),
            },
            OP_JAL => Self::Jump { rd: word.rd() },
            _ => Self::Other(word),
        }
    }
}
