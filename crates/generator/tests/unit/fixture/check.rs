//! # Expansion Check Tests
//!
//! The three words of a multi-form expansion may differ only in their target.

use crate::common::harness::{b_type, catalog, j_type};
use rvasmtest_core::Error;
use rvasmtest_core::Generator;
use rvasmtest_core::engine::{Emission, Renderer};
use rvasmtest_core::fixture::check::check_expansions;
use rvasmtest_core::isa::format::Family;

/// Emission of one `beq` and one `jal`, each expanded into three forms.
fn branch_and_jump() -> Emission {
    let mut catalog = catalog();
    catalog.retain_families(&[Family::AbsOp, Family::TwoRegAndAbsOp]);
    Generator::seeded(11).emit(&catalog, &Renderer::default(), 1)
}

/// Words matching `emission` whose expansions all agree.
fn consistent_words(emission: &Emission) -> Vec<u32> {
    emission
        .instructions()
        .iter()
        .enumerate()
        .map(|(i, insn)| {
            let offset = (i as i32 - 8) * 4;
            if insn.mnemonic.starts_with('j') {
                j_type(u32::from(insn.mnemonic == "jal"), offset)
            } else {
                b_type(0b000, 5, 6, offset)
            }
        })
        .collect()
}

#[test]
fn test_consistent_expansions_pass() {
    let emission = branch_and_jump();
    assert_eq!(emission.expansions().len(), 8);
    let words = consistent_words(&emission);
    check_expansions(&emission, &words).unwrap();
}

#[test]
fn test_register_change_is_caught() {
    let emission = branch_and_jump();
    let mut words = consistent_words(&emission);
    let span = emission.expansions()[3].clone();
    words[span.start + 2] = b_type(0b000, 5, 7, 0);

    let err = check_expansions(&emission, &words).unwrap_err();
    match err {
        Error::FormMismatch { mnemonic, words: forms } => {
            assert_eq!(mnemonic, emission.instructions()[span.start].mnemonic);
            assert_eq!(forms.len(), 3);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_link_register_change_is_caught() {
    let emission = branch_and_jump();
    let mut words = consistent_words(&emission);
    // Second expansion is `jal`.
    let span = emission.expansions()[1].clone();
    words[span.start] = j_type(2, 0);
    assert!(matches!(
        check_expansions(&emission, &words),
        Err(Error::FormMismatch { .. })
    ));
}
