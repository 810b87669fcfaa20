//! # Rendering Tests
//!
//! Both notations of hand-built instances, one layout at a time.

use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::harness::{catalog, entry, f, imm, instance, render, x};
use rvasmtest_core::config::ApiConfig;
use rvasmtest_core::engine::{GeneratedInstance, Renderer};
use rvasmtest_core::isa::format::LabelTarget;
use rvasmtest_core::isa::operand::{Address, GeneralRegister, ImmediateKind, OperandValue};
use rvasmtest_core::isa::ordering::Barrier;

// ══════════════════════════════════════════════════════════
// Register and immediate layouts
// ══════════════════════════════════════════════════════════

#[test]
fn test_three_register_arith() {
    let catalog = catalog();
    let add = instance(entry(&catalog, "add"), vec![x(5), x(17), x(3)]);
    assert_eq!(
        render(&add),
        ("add(x5, x17, x3);".to_string(), "add\tx5, x17, x3".to_string())
    );
}

#[rstest]
#[case("and", "andr(x1, x2, x3);", "and\tx1, x2, x3")]
#[case("or", "orr(x1, x2, x3);", "or\tx1, x2, x3")]
#[case("xor", "xorr(x1, x2, x3);", "xor\tx1, x2, x3")]
fn test_reserved_names_in_calls(#[case] name: &str, #[case] api: &str, #[case] assembly: &str) {
    let catalog = catalog();
    let i = instance(entry(&catalog, name), vec![x(1), x(2), x(3)]);
    assert_eq!(render(&i), (api.to_string(), assembly.to_string()));
}

#[test]
fn test_not_is_renamed() {
    let catalog = catalog();
    let i = instance(entry(&catalog, "not"), vec![x(9), x(10)]);
    assert_eq!(render(&i), ("notr(x9, x10);".to_string(), "not\tx9, x10".to_string()));
}

#[test]
fn test_immediate_forms() {
    let catalog = catalog();
    let addi = instance(
        entry(&catalog, "addi"),
        vec![x(1), x(2), imm(ImmediateKind::Imm12, 100)],
    );
    assert_eq!(
        render(&addi),
        ("addi(x1, x2, 100u);".to_string(), "addi\tx1, x2, 0x64".to_string())
    );

    let lui = instance(
        entry(&catalog, "lui"),
        vec![x(5), imm(ImmediateKind::Upper20, 0x1234)],
    );
    assert_eq!(
        render(&lui),
        ("lui(x5, 0x1234000);".to_string(), "lui\tx5, 0x1234".to_string())
    );

    let srai = instance(
        entry(&catalog, "srai"),
        vec![x(4), x(4), imm(ImmediateKind::ShiftAmount, 7)],
    );
    assert_eq!(
        render(&srai),
        ("srai(x4, x4, 7u);".to_string(), "srai\tx4, x4, 0x7".to_string())
    );
}

#[test]
fn test_csr_id_is_decimal_in_calls_and_hex_in_assembly() {
    let catalog = catalog();
    let csrrw = instance(
        entry(&catalog, "csrrw"),
        vec![x(5), imm(ImmediateKind::Csr, 0x300), x(6)],
    );
    assert_eq!(
        render(&csrrw),
        ("csrrw(x5, 768, x6);".to_string(), "csrrw\tx5, 0x300, x6".to_string())
    );

    let csrsi = instance(
        entry(&catalog, "csrsi"),
        vec![imm(ImmediateKind::Csr, 0x001), imm(ImmediateKind::CsrValue, 17)],
    );
    assert_eq!(
        render(&csrsi),
        ("csrsi(1, 17);".to_string(), "csrsi\t0x1, 17".to_string())
    );
}

#[test]
fn test_load_store_address() {
    let catalog = catalog();
    let address: OperandValue = Address::new(GeneralRegister::new(2).unwrap(), -12).unwrap().into();
    let ld = instance(entry(&catalog, "ld"), vec![x(1), address]);
    assert_eq!(
        render(&ld),
        ("ld(x1, Address(x2, -12));".to_string(), "ld\tx1, -12(x2)".to_string())
    );

    let fsw = instance(entry(&catalog, "fsw"), vec![f(3), address]);
    assert_eq!(
        render(&fsw),
        ("fsw(f3, Address(x2, -12));".to_string(), "fsw\tf3, -12(x2)".to_string())
    );
}

#[test]
fn test_no_operands_has_no_tab() {
    let catalog = catalog();
    let fence_i = instance(entry(&catalog, "fence.i"), vec![]);
    assert_eq!(render(&fence_i), ("fence_i();".to_string(), "fence.i".to_string()));
}

// ══════════════════════════════════════════════════════════
// Atomics and fences
// ══════════════════════════════════════════════════════════

#[test]
fn test_load_reserved_has_two_registers() {
    let catalog = catalog();
    let lr = instance(entry(&catalog, "lr.w.aq"), vec![x(1), x(2)]);
    assert_eq!(
        render(&lr),
        (
            "lr_w(x1, x2, Assembler::aq);".to_string(),
            "lr.w.aq\tx1, (x2)".to_string()
        )
    );
}

#[test]
fn test_store_conditional_has_three_registers() {
    let catalog = catalog();
    let sc = instance(entry(&catalog, "sc.w.aq"), vec![x(1), x(2), x(3)]);
    assert_eq!(
        render(&sc),
        (
            "sc_w(x1, x2, x3, Assembler::aq);".to_string(),
            "sc.w.aq\tx1, x2, (x3)".to_string()
        )
    );
}

#[test]
fn test_amo_swaps_address_and_value() {
    let catalog = catalog();
    let amo = instance(entry(&catalog, "amoadd.d.rl"), vec![x(1), x(2), x(3)]);
    assert_eq!(
        render(&amo),
        (
            "amoadd_d(x1, x2, x3, Assembler::rl);".to_string(),
            "amoadd.d.rl\tx1, x3, (x2)".to_string()
        )
    );
}

#[test]
fn test_fence_barriers() {
    let catalog = catalog();
    let fence = GeneratedInstance::fence(
        entry(&catalog, "fence"),
        Barrier::CHOICES[4],
        Barrier::CHOICES[6],
    )
    .unwrap();
    assert_eq!(
        render(&fence),
        ("fence(10u, 15u);".to_string(), "fence\tir, iorw".to_string())
    );
}

// ══════════════════════════════════════════════════════════
// Floating point
// ══════════════════════════════════════════════════════════

#[test]
fn test_explicit_rounding_mode() {
    let catalog = catalog();
    let fadd = instance(entry(&catalog, "fadd.s"), vec![f(1), f(2), f(3)]);
    assert_eq!(
        render(&fadd),
        (
            "fadd_s(f1, f2, f3, Assembler::rup);".to_string(),
            "fadd.s\tf1, f2, f3, rup".to_string()
        )
    );
}

#[test]
fn test_implied_rounding_is_not_spelled_in_assembly() {
    let catalog = catalog();
    let cvt = instance(entry(&catalog, "fcvt.d.w"), vec![f(4), x(9)]);
    assert_eq!(
        render(&cvt),
        (
            "fcvt_d_w(f4, x9, Assembler::rne);".to_string(),
            "fcvt.d.w\tf4, x9".to_string()
        )
    );
}

#[test]
fn test_mixed_register_files() {
    let catalog = catalog();
    let feq = instance(entry(&catalog, "feq.d"), vec![x(10), f(0), f(31)]);
    assert_eq!(
        render(&feq),
        ("feq_d(x10, f0, f31);".to_string(), "feq.d\tx10, f0, f31".to_string())
    );
}

// ══════════════════════════════════════════════════════════
// Multi-form expansions
// ══════════════════════════════════════════════════════════

#[test]
fn test_branch_expands_into_three_forms() {
    let catalog = catalog();
    let beq = instance(entry(&catalog, "beq"), vec![x(5), x(6)]);
    let forms = Renderer::default().forms(&beq);

    let targets: Vec<_> = forms.iter().map(|(t, _)| *t).collect();
    assert_eq!(
        targets,
        [
            Some(LabelTarget::Current),
            Some(LabelTarget::Forward),
            Some(LabelTarget::Backward)
        ]
    );
    let api: Vec<&str> = forms.iter().map(|(_, f)| f.api.as_str()).collect();
    assert_eq!(api, ["beq(x5, x6, pc());", "beq(x5, x6, forth);", "beq(x5, x6, back);"]);
    let assembly: Vec<&str> = forms.iter().map(|(_, f)| f.assembly.as_str()).collect();
    assert_eq!(
        assembly,
        ["beq\tx5, x6, .", "beq\tx5, x6, forth", "beq\tx5, x6, back"]
    );
}

#[test]
fn test_call_prefix_qualifies_calls_and_pc() {
    let catalog = catalog();
    let renderer = Renderer::new(&ApiConfig {
        call_prefix: "__ ".to_string(),
        ..ApiConfig::default()
    });
    let j = instance(entry(&catalog, "j"), vec![]);
    let api: Vec<String> = renderer.forms(&j).into_iter().map(|(_, f)| f.api).collect();
    assert_eq!(api, ["__ j(__ pc());", "__ j(forth);", "__ j(back);"]);
    assert_eq!(renderer.bind("back"), "__ bind(back);");
}

#[test]
fn test_single_form_entries_render_once() {
    let catalog = catalog();
    let add = instance(entry(&catalog, "add"), vec![x(1), x(2), x(3)]);
    let forms = Renderer::default().forms(&add);
    assert_eq!(forms.len(), 1);
    assert_eq!(forms[0].0, None);
}

#[test]
fn test_enum_scope_is_configurable() {
    let catalog = catalog();
    let renderer = Renderer::new(&ApiConfig {
        call_prefix: String::new(),
        enum_scope: "Assembler::RoundingMode::".to_string(),
    });
    let fsqrt = instance(entry(&catalog, "fsqrt.d"), vec![f(1), f(2)]);
    assert_eq!(
        renderer.api(&fsqrt, None),
        "fsqrt_d(f1, f2, Assembler::RoundingMode::rdn);"
    );
}
