//! # Field Extraction Tests
//!
//! Which fields of a word count as target-independent.

use crate::common::harness::{b_type, j_type};
use rvasmtest_core::isa::instruction::{InstructionBits, TargetFreeFields};

#[test]
fn test_field_accessors() {
    // add x5, x17, x3
    let word: u32 = 0x0038_82b3;
    assert_eq!(word.opcode(), 0b0110011);
    assert_eq!(word.rd(), 5);
    assert_eq!(word.rs1(), 17);
    assert_eq!(word.rs2(), 3);
    assert_eq!(word.funct3(), 0);
}

#[test]
fn test_branch_offsets_do_not_matter() {
    let a = b_type(0b001, 5, 6, 0);
    let b = b_type(0b001, 5, 6, -64);
    let c = b_type(0b001, 5, 6, 2000);
    assert_ne!(a, b);
    assert_eq!(TargetFreeFields::of(a), TargetFreeFields::of(b));
    assert_eq!(TargetFreeFields::of(a), TargetFreeFields::of(c));
}

#[test]
fn test_branch_registers_matter() {
    assert_ne!(
        TargetFreeFields::of(b_type(0b000, 5, 6, 8)),
        TargetFreeFields::of(b_type(0b000, 5, 7, 8))
    );
    assert_ne!(
        TargetFreeFields::of(b_type(0b000, 5, 6, 8)),
        TargetFreeFields::of(b_type(0b101, 5, 6, 8))
    );
}

#[test]
fn test_jump_offsets_do_not_matter() {
    assert_eq!(
        TargetFreeFields::of(j_type(1, 0)),
        TargetFreeFields::of(j_type(1, -4096))
    );
    assert_ne!(
        TargetFreeFields::of(j_type(0, 16)),
        TargetFreeFields::of(j_type(1, 16))
    );
}

#[test]
fn test_other_words_compare_whole() {
    assert_eq!(TargetFreeFields::of(0x0000_0013), TargetFreeFields::Other(0x0000_0013));
    assert_ne!(TargetFreeFields::of(0x0000_0013), TargetFreeFields::of(0x0010_0013));
}
