//! # Byte-Stream Tests

use rstest::rstest;

use rvasmtest_core::Error;
use rvasmtest_core::fixture::words::{ensure_paired, hex_literal, words_from_bytes};

#[test]
fn test_bytes_are_reversed_within_each_word() {
    let words = words_from_bytes(&[0x13, 0x00, 0x00, 0x00, 0xb3, 0x82, 0x38, 0x00]).unwrap();
    assert_eq!(words, vec![0x0000_0013, 0x0038_82b3]);
    assert_eq!(hex_literal(words[0]), "0x00000013");
    assert_eq!(hex_literal(words[1]), "0x003882b3");
}

#[test]
fn test_empty_stream() {
    assert!(words_from_bytes(&[]).unwrap().is_empty());
}

#[rstest]
#[case(1)]
#[case(3)]
#[case(6)]
#[case(9)]
fn test_misaligned_stream_is_rejected(#[case] len: usize) {
    let err = words_from_bytes(&vec![0u8; len]).unwrap_err();
    assert!(matches!(err, Error::MisalignedCode { len: l } if l == len), "{err}");
}

#[test]
fn test_hex_literal_is_padded_lowercase() {
    assert_eq!(hex_literal(0), "0x00000000");
    assert_eq!(hex_literal(0xDEAD_BEEF), "0xdeadbeef");
}

#[test]
fn test_pairing_requires_equal_counts() {
    assert!(ensure_paired(2, &[1, 2]).is_ok());
    let err = ensure_paired(3, &[1, 2]).unwrap_err();
    assert!(matches!(
        err,
        Error::WordCountMismatch {
            expected: 3,
            actual: 2
        }
    ));
}
