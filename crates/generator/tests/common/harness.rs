use rvasmtest_core::Catalog;
use rvasmtest_core::engine::{GeneratedInstance, Renderer};
use rvasmtest_core::isa::catalog::CatalogEntry;
use rvasmtest_core::isa::operand::{
    FloatRegister, GeneralRegister, Immediate, ImmediateKind, OperandValue,
};

/// Installs a test log subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("debug")
        .try_init();
}

/// The built-in catalog.
pub fn catalog() -> Catalog {
    Catalog::rv64g().unwrap()
}

/// First entry whose assembler mnemonic is `name`.
pub fn entry<'c>(catalog: &'c Catalog, name: &str) -> &'c CatalogEntry {
    catalog
        .entries()
        .map(|(_, e)| e)
        .find(|e| e.assembly_name() == name)
        .unwrap_or_else(|| panic!("no catalog entry `{name}`"))
}

/// General register operand `x<n>`.
pub fn x(n: u8) -> OperandValue {
    GeneralRegister::new(n).unwrap().into()
}

/// Float register operand `f<n>`.
pub fn f(n: u8) -> OperandValue {
    FloatRegister::new(n).unwrap().into()
}

/// Immediate operand.
pub fn imm(kind: ImmediateKind, value: u32) -> OperandValue {
    Immediate::new(kind, value).unwrap().into()
}

/// Builds an instance of `entry` from explicit operands.
pub fn instance<'c>(entry: &'c CatalogEntry, operands: Vec<OperandValue>) -> GeneratedInstance<'c> {
    GeneratedInstance::new(entry, operands).unwrap()
}

/// Renders `instance` with the default notation, unlabeled.
pub fn render(instance: &GeneratedInstance<'_>) -> (String, String) {
    let form = Renderer::default().render(instance, None);
    (form.api, form.assembly)
}

/// Little-endian byte stream of `words`.
pub fn le_bytes(words: &[u32]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_le_bytes()).collect()
}

/// Encode a B-type instruction.
pub fn b_type(funct3: u32, rs1: u32, rs2: u32, imm: i32) -> u32 {
    let v = imm as u32;
    ((v >> 12) & 1) << 31
        | ((v >> 5) & 0x3F) << 25
        | (rs2 & 0x1F) << 20
        | (rs1 & 0x1F) << 15
        | (funct3 & 0x7) << 12
        | ((v >> 1) & 0xF) << 8
        | ((v >> 11) & 1) << 7
        | 0b1100011
}

/// Encode a JAL instruction.
pub fn j_type(rd: u32, imm: i32) -> u32 {
    let v = imm as u32;
    ((v >> 20) & 1) << 31
        | ((v >> 1) & 0x3FF) << 21
        | ((v >> 11) & 1) << 20
        | ((v >> 12) & 0xFF) << 12
        | (rd & 0x1F) << 7
        | 0b1101111
}

/// Minimal ELF64 relocatable object with one code section named `section`
/// holding `code`.
pub fn elf_object(section: &str, code: &[u8]) -> Vec<u8> {
    let strtab = format!("\0{section}\0.shstrtab\0").into_bytes();
    let code_offset = 64u64;
    let strtab_offset = code_offset + code.len() as u64;
    let shoff = (strtab_offset + strtab.len() as u64).next_multiple_of(8);

    let mut out = Vec::new();
    out.extend_from_slice(&[0x7f, b'E', b'L', b'F', 2, 1, 1, 0]);
    out.extend_from_slice(&[0; 8]);
    out.extend_from_slice(&1u16.to_le_bytes()); // ET_REL
    out.extend_from_slice(&243u16.to_le_bytes()); // EM_RISCV
    out.extend_from_slice(&1u32.to_le_bytes());
    out.extend_from_slice(&0u64.to_le_bytes()); // entry
    out.extend_from_slice(&0u64.to_le_bytes()); // phoff
    out.extend_from_slice(&shoff.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // flags
    out.extend_from_slice(&64u16.to_le_bytes()); // ehsize
    out.extend_from_slice(&0u16.to_le_bytes()); // phentsize
    out.extend_from_slice(&0u16.to_le_bytes()); // phnum
    out.extend_from_slice(&64u16.to_le_bytes()); // shentsize
    out.extend_from_slice(&3u16.to_le_bytes()); // shnum
    out.extend_from_slice(&2u16.to_le_bytes()); // shstrndx

    out.extend_from_slice(code);
    out.extend_from_slice(&strtab);
    out.resize(shoff as usize, 0);

    let header = |name: u32, kind: u32, flags: u64, offset: u64, size: u64, align: u64| {
        let mut h = Vec::with_capacity(64);
        h.extend_from_slice(&name.to_le_bytes());
        h.extend_from_slice(&kind.to_le_bytes());
        h.extend_from_slice(&flags.to_le_bytes());
        h.extend_from_slice(&0u64.to_le_bytes()); // addr
        h.extend_from_slice(&offset.to_le_bytes());
        h.extend_from_slice(&size.to_le_bytes());
        h.extend_from_slice(&0u32.to_le_bytes()); // link
        h.extend_from_slice(&0u32.to_le_bytes()); // info
        h.extend_from_slice(&align.to_le_bytes());
        h.extend_from_slice(&0u64.to_le_bytes()); // entsize
        h
    };
    out.extend_from_slice(&[0; 64]);
    out.extend(header(1, 1, 0x6, code_offset, code.len() as u64, 4));
    out.extend(header(
        2 + section.len() as u32,
        3,
        0,
        strtab_offset,
        strtab.len() as u64,
        1,
    ));
    out
}
