//! Fixed names and limits shared across the generator.

/// Label bound before the first generated instruction.
pub const BACK_LABEL: &str = "back";

/// Label bound after the last generated instruction.
pub const FORTH_LABEL: &str = "forth";

/// Assembly token for the address of the current instruction.
pub const CURRENT_ADDRESS: &str = ".";

/// Size in bytes of one uncompressed RV64 instruction word.
pub const WORD_BYTES: usize = 4;

/// Words printed per line of the fixture array.
pub const WORDS_PER_LINE: usize = 4;

/// Column the API text is padded to in the paired listing.
pub const LISTING_API_WIDTH: usize = 50;

/// Name of the executable code section in the assembled object.
pub const CODE_SECTION: &str = ".text";

/// Toolchain prefixes probed on `PATH`, in order.
pub const TOOL_PREFIXES: [&str; 3] = ["riscv64-unknown-elf-", "riscv64-linux-gnu-", "riscv64-elf-"];

/// First line of the generated listing.
pub const BEGIN_BANNER: &str = "// BEGIN  Generated code -- do not edit";

/// Last line of the generated listing.
pub const END_BANNER: &str = "// END  Generated code -- do not edit";
