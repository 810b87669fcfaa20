//! Text artifacts: assembly source and the paired listing.

use std::fmt::Write;

use crate::common::constants::{
    BACK_LABEL, BEGIN_BANNER, END_BANNER, FORTH_LABEL, LISTING_API_WIDTH, WORDS_PER_LINE,
};
use crate::engine::{Emission, Renderer};
use crate::fixture::words::hex_literal;

/// Assembly source handed to the reference assembler.
///
/// The body is enclosed by the `back` and `forth` labels that multi-form
/// entries target, with one `# <Family>` comment per catalog group.
pub fn assembly_source(emission: &Emission) -> String {
    let mut out = format!("{BACK_LABEL}:\n");
    for section in emission.sections() {
        let _ = writeln!(out, "# {}", section.family);
        for insn in emission.section_instructions(section) {
            let _ = writeln!(out, "\t{}", insn.assembly);
        }
    }
    let _ = writeln!(out, "{FORTH_LABEL}:");
    out
}

/// Encoder-test listing pairing each call with its assembly and the word
/// array the calls must reproduce.
///
/// # Arguments
///
/// * `emission` - Emitted instructions.
/// * `renderer` - Supplies the call prefix of the label binds.
/// * `words` - Words paired with the emission.
/// * `disassembly` - Disassembler output embedded as a comment, if any.
pub fn listing(
    emission: &Emission,
    renderer: &Renderer,
    words: &[u32],
    disassembly: Option<&str>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{BEGIN_BANNER}");
    let _ = writeln!(out, "// Generated by asmtest (seed {})", emission.seed());
    let _ = writeln!(out);
    let _ = writeln!(out, "    Label {BACK_LABEL}, {FORTH_LABEL};");
    let _ = writeln!(out, "    {}", renderer.bind(BACK_LABEL));

    for section in emission.sections() {
        let _ = writeln!(out);
        let _ = writeln!(out, "// {}", section.family);
        for insn in emission.section_instructions(section) {
            let _ = writeln!(
                out,
                "    {:<width$} //\t{}",
                insn.api,
                insn.assembly,
                width = LISTING_API_WIDTH
            );
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "    {}", renderer.bind(FORTH_LABEL));

    if let Some(text) = disassembly {
        let _ = writeln!(out);
        let _ = writeln!(out, "/*");
        out.push_str(text.trim_end());
        let _ = writeln!(out);
        let _ = writeln!(out, "*/");
    }

    let _ = writeln!(out);
    out.push_str(&word_array(words));
    let _ = writeln!(out, "{END_BANNER}");
    out
}

/// The `insns[]` initializer, four words per line.
pub fn word_array(words: &[u32]) -> String {
    let mut out = String::from("  static const unsigned int insns[] =\n  {\n");
    for line in words.chunks(WORDS_PER_LINE) {
        let cells: Vec<String> = line.iter().map(|&w| format!("{},", hex_literal(w))).collect();
        let _ = writeln!(out, "    {}", cells.join(" "));
    }
    out.push_str("  };\n");
    out
}
