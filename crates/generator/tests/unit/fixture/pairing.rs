//! # Pairing Tests

use pretty_assertions::assert_eq;

use crate::common::harness::catalog;
use rvasmtest_core::Error;
use rvasmtest_core::Generator;
use rvasmtest_core::engine::Renderer;
use rvasmtest_core::fixture::Fixture;
use rvasmtest_core::isa::format::Family;

const OP_WORDS: [u32; 4] = [0x0000_0013, 0x0000_0073, 0x0010_0073, 0x0000_100f];

#[test]
fn test_pairs_by_position() {
    let mut catalog = catalog();
    catalog.retain_families(&[Family::Op]);
    let emission = Generator::seeded(8).emit(&catalog, &Renderer::default(), 1);

    let fixture = Fixture::pair(&emission, &OP_WORDS).unwrap();
    assert_eq!(fixture.seed, 8);
    assert_eq!(fixture.words(), OP_WORDS.to_vec());
    assert_eq!(fixture.entries[2].assembly, "ebreak");
    assert_eq!(fixture.entries[2].word, 0x0010_0073);
}

#[test]
fn test_length_mismatch_is_fatal() {
    let mut catalog = catalog();
    catalog.retain_families(&[Family::Op]);
    let emission = Generator::seeded(8).emit(&catalog, &Renderer::default(), 1);

    let err = Fixture::pair(&emission, &OP_WORDS[..3]).unwrap_err();
    assert!(matches!(
        err,
        Error::WordCountMismatch {
            expected: 4,
            actual: 3
        }
    ));
}

#[test]
fn test_json_shape() {
    let mut catalog = catalog();
    catalog.retain_families(&[Family::Op]);
    let emission = Generator::seeded(8).emit(&catalog, &Renderer::default(), 1);
    let fixture = Fixture::pair(&emission, &OP_WORDS).unwrap();

    let value: serde_json::Value = serde_json::from_str(&fixture.to_json().unwrap()).unwrap();
    assert_eq!(value["seed"], 8);
    assert_eq!(value["entries"][0]["family"], "Op");
    assert_eq!(value["entries"][0]["api"], "nop();");
    assert_eq!(value["entries"][0]["assembly"], "nop");
    assert_eq!(value["entries"][0]["word"], "0x00000013");
    assert!(value["entries"][0].get("target").is_none());
}
