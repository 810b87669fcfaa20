//! # ELF Extraction Tests

use std::path::Path;

use tempfile::tempdir;

use crate::common::harness::{elf_object, le_bytes};
use rvasmtest_core::Error;
use rvasmtest_core::toolchain::elf::{code_section, read_code_section};

#[test]
fn test_reads_text_section() {
    let code = le_bytes(&[0x0000_0013, 0x0038_82b3]);
    let object = elf_object(".text", &code);
    assert_eq!(code_section(&object, Path::new("t.o")).unwrap(), code);
}

#[test]
fn test_missing_text_section() {
    let object = elf_object(".data", &[0; 8]);
    let err = code_section(&object, Path::new("t.o")).unwrap_err();
    assert!(
        matches!(err, Error::MissingCodeSection { section: ".text", .. }),
        "{err}"
    );
}

#[test]
fn test_garbage_is_not_an_object() {
    let err = code_section(b"not an object file", Path::new("t.o")).unwrap_err();
    assert!(matches!(err, Error::Object(_)), "{err}");
}

#[test]
fn test_reads_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ops.o");
    std::fs::write(&path, elf_object(".text", &[0x13, 0, 0, 0])).unwrap();
    assert_eq!(read_code_section(&path).unwrap(), vec![0x13, 0, 0, 0]);

    let missing = read_code_section(&dir.path().join("absent.o")).unwrap_err();
    assert!(matches!(missing, Error::Io(_)));
}
