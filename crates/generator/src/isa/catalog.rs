//! The built-in RV64G mnemonic catalog.
//!
//! The catalog is an ordered list of groups, one per [`Family`], each binding
//! mnemonics to exactly one [`InstructionFormat`]. Declaration order is the
//! emission order of a run and therefore the order of the fixture's words.
//!
//! Register classes are resolved here, once. Loads and stores name their data
//! register class explicitly, and floating-point entries carry a mode string
//! with one character per operand.

use crate::common::constants::WORD_BYTES;
use crate::common::error::{Error, Result};
use crate::isa::format::{Family, InstructionFormat, LabelTarget, MultiForm, Reach};
use crate::isa::mnemonic::Mnemonic;
use crate::isa::operand::{ImmediateKind, SlotKind};
use crate::isa::ordering::{AtomicKind, AtomicOrdering, AtomicWidth};
use crate::isa::rounding::{Rounding, RoundingMode};

use ImmediateKind::{Csr, CsrValue, Imm12, ShiftAmount, Upper20};
use RoundingMode::{Rdn, Rmm, Rne, Rtz, Rup};
use SlotKind::{Address, Float, General, Immediate};

/// One mnemonic bound to its format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    mnemonic: Mnemonic,
    format: InstructionFormat,
}

impl CatalogEntry {
    /// Binds `mnemonic` to `format` after validating the format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCatalog`] when the format is inconsistent.
    pub fn new(mnemonic: Mnemonic, format: InstructionFormat) -> Result<Self> {
        format.validate(&mnemonic)?;
        Ok(Self { mnemonic, format })
    }

    /// The bound mnemonic.
    pub const fn mnemonic(&self) -> &Mnemonic {
        &self.mnemonic
    }

    /// The bound format.
    pub const fn format(&self) -> &InstructionFormat {
        &self.format
    }

    /// Encoder method name.
    pub fn api_name(&self) -> &str {
        self.mnemonic.api_name()
    }

    /// Assembler mnemonic, including any format suffix.
    pub fn assembly_name(&self) -> String {
        self.format.assembly_name(&self.mnemonic)
    }
}

/// Entries sharing a family, in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogGroup {
    family: Family,
    entries: Vec<CatalogEntry>,
}

impl CatalogGroup {
    /// Family shared by the entries.
    pub const fn family(&self) -> Family {
        self.family
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }
}

/// Ordered collection of catalog groups.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    groups: Vec<CatalogGroup>,
}

impl Catalog {
    /// An empty catalog.
    pub const fn new() -> Self {
        Self { groups: Vec::new() }
    }

    /// Appends a group.
    pub fn push(&mut self, family: Family, entries: Vec<CatalogEntry>) {
        self.groups.push(CatalogGroup { family, entries });
    }

    /// Groups in declaration order.
    pub fn groups(&self) -> &[CatalogGroup] {
        &self.groups
    }

    /// Every entry with its family, in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (Family, &CatalogEntry)> {
        self.groups
            .iter()
            .flat_map(|g| g.entries.iter().map(move |e| (g.family, e)))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }

    /// Whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of assembly instructions a run emits when every entry is
    /// instantiated `per_mnemonic` times.
    pub fn expected_words(&self, per_mnemonic: usize) -> usize {
        self.entries()
            .map(|(_, e)| e.format().forms_count() * per_mnemonic)
            .sum()
    }

    /// Keeps only the groups of the given families; an empty slice keeps all.
    pub fn retain_families(&mut self, families: &[Family]) {
        if !families.is_empty() {
            self.groups.retain(|g| families.contains(&g.family));
        }
    }

    /// Checks that every label-targeting form still reaches its label when
    /// each entry is instantiated `per_mnemonic` times.
    ///
    /// All forms share one body between the `back` and `forth` labels, so the
    /// distance to either label grows with the repetition count. A branch the
    /// assembler cannot reach is rewritten as an inverted branch over a jump,
    /// which adds a word the emission does not account for.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LabelOutOfReach`] for the first form that does not
    /// fit, with the largest repetition count that does.
    pub fn check_label_reach(&self, per_mnemonic: usize) -> Result<()> {
        let Some((mnemonic, offset, reach)) = self.first_out_of_reach(per_mnemonic) else {
            return Ok(());
        };
        Err(Error::LabelOutOfReach {
            mnemonic,
            offset,
            min: reach.min,
            max: reach.max,
            limit: self.max_instances_within_reach(per_mnemonic),
        })
    }

    /// Largest repetition count below `failing` whose forms all reach their
    /// labels. The distances grow monotonically with the count.
    fn max_instances_within_reach(&self, failing: usize) -> usize {
        let (mut lo, mut hi) = (0, failing);
        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            if self.first_out_of_reach(mid).is_none() {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        lo
    }

    fn first_out_of_reach(&self, per_mnemonic: usize) -> Option<(String, i64, Reach)> {
        const WORD: i64 = WORD_BYTES as i64;
        let end = self.expected_words(per_mnemonic) as i64 * WORD;
        let mut pc = 0;
        for (_, entry) in self.entries() {
            let Some(multi) = entry.format().multi_form() else {
                pc += (entry.format().forms_count() * per_mnemonic) as i64 * WORD;
                continue;
            };
            for _ in 0..per_mnemonic {
                for &target in multi.targets() {
                    let offset = match target {
                        LabelTarget::Current => 0,
                        LabelTarget::Forward => end - pc,
                        LabelTarget::Backward => -pc,
                    };
                    if !multi.reach().contains(offset) {
                        return Some((entry.assembly_name(), offset, multi.reach()));
                    }
                    pc += WORD;
                }
            }
        }
        None
    }

    /// Builds the RV64G catalog.
    ///
    /// # Errors
    ///
    /// Returns an error only if a built-in declaration is malformed.
    pub fn rv64g() -> Result<Self> {
        let mut catalog = Self::new();
        let three_reg = || InstructionFormat::slots([General, General, General]);
        let reg_imm = |kind| InstructionFormat::slots([General, General, Immediate(kind)]);

        catalog.uniform(
            Family::ArithOp,
            &[
                "add", "sub", "addw", "subw", "or", "xor", "mul", "mulh", "mulhsu", "mulhu", "div",
                "divu", "rem", "remu", "mulw", "divw", "divuw", "remw", "remuw", "and",
            ],
            &three_reg(),
        )?;
        catalog.uniform(Family::AddSubImmOp, &["addi", "addiw"], &reg_imm(Imm12))?;
        catalog.uniform(Family::LogicalImmOp, &["ori", "xori", "andi"], &reg_imm(Imm12))?;
        catalog.uniform(Family::AbsOp, &["j", "jal"], &InstructionFormat::bare().with_labels(MultiForm::JUMP))?;
        catalog.uniform(Family::TwoRegAbsOp, &["jalr"], &reg_imm(Imm12))?;
        catalog.uniform(
            Family::LoadImmedOp,
            &["lui", "auipc"],
            &InstructionFormat::slots([General, Immediate(Upper20)]),
        )?;
        catalog.uniform(
            Family::RegAndAbsOp,
            &["bnez", "beqz"],
            &InstructionFormat::slots([General]).with_labels(MultiForm::BRANCH),
        )?;
        catalog.uniform(
            Family::TwoRegAndAbsOp,
            &["bne", "beq", "bge", "bgeu", "blt", "bltu"],
            &InstructionFormat::slots([General, General]).with_labels(MultiForm::BRANCH),
        )?;
        catalog.uniform(Family::TwoRegImmedOp, &["slti", "sltiu"], &reg_imm(Imm12))?;
        catalog.uniform(
            Family::ShiftRegOp,
            &["sll", "srl", "sra", "sraw", "sllw", "srlw"],
            &three_reg(),
        )?;
        catalog.uniform(
            Family::ShiftImmOp,
            &["slli", "srli", "srai", "slliw", "srliw", "sraiw"],
            &reg_imm(ShiftAmount),
        )?;
        catalog.uniform(
            Family::Op,
            &["nop", "ecall", "ebreak", "fence_i"],
            &InstructionFormat::bare(),
        )?;
        catalog.uniform(Family::SystemOp, &["fence"], &InstructionFormat::fence())?;

        for width in [AtomicWidth::Word, AtomicWidth::Double] {
            for ordering in [AtomicOrdering::Acquire, AtomicOrdering::Release] {
                catalog.atomics(
                    width,
                    ordering,
                    &[
                        "sc", "amoswap", "amoadd", "amoxor", "amoand", "amoor", "amomin",
                        "amomax", "amominu", "amomaxu", "lr",
                    ],
                )?;
            }
        }

        catalog.uniform(
            Family::OneRegOp,
            &["frflags", "frrm", "frcsr", "rdtime", "rdcycle", "rdinstret"],
            &InstructionFormat::slots([General]),
        )?;
        catalog.uniform(
            Family::TwoRegOp,
            &[
                "mv", "not", "neg", "negw", "sext_w", "seqz", "snez", "sltz", "sgtz", "fscsr",
                "fsrm", "fsflags",
            ],
            &InstructionFormat::slots([General, General]),
        )?;
        catalog.uniform(Family::ThreeRegOp, &["slt", "sltu"], &three_reg())?;

        catalog.uniform(
            Family::CsrxixOp,
            &["csrrw", "csrrs", "csrrc"],
            &InstructionFormat::slots([General, Immediate(Csr), General]),
        )?;
        catalog.uniform(
            Family::CsrxiiOp,
            &["csrrwi", "csrrsi", "csrrci"],
            &InstructionFormat::slots([General, Immediate(Csr), Immediate(CsrValue)]),
        )?;
        catalog.uniform(
            Family::CsrxiOp,
            &["csrr"],
            &InstructionFormat::slots([General, Immediate(Csr)]),
        )?;
        catalog.uniform(
            Family::CsrixOp,
            &["csrw", "csrs", "csrc"],
            &InstructionFormat::slots([Immediate(Csr), General]),
        )?;
        catalog.uniform(
            Family::CsriiOp,
            &["csrwi", "csrsi", "csrci"],
            &InstructionFormat::slots([Immediate(Csr), Immediate(CsrValue)]),
        )?;

        catalog.load_store(&[
            ("ld", General),
            ("lw", General),
            ("lwu", General),
            ("lh", General),
            ("lhu", General),
            ("lb", General),
            ("lbu", General),
            ("sd", General),
            ("sw", General),
            ("sh", General),
            ("sb", General),
            ("fld", Float),
            ("flw", Float),
            ("fsd", Float),
            ("fsw", Float),
        ])?;

        let rm = |mode| Some(Rounding::explicit(mode));

        catalog.float(
            Family::Float2ArithOp,
            &[("fsqrt_s", "ff", rm(Rdn)), ("fsqrt_d", "ff", rm(Rdn))],
        )?;
        catalog.float(
            Family::Float3ArithOp,
            &[
                ("fadd_s", "fff", rm(Rup)),
                ("fsub_s", "fff", rm(Rup)),
                ("fadd_d", "fff", rm(Rup)),
                ("fsub_d", "fff", rm(Rup)),
                ("fmul_s", "fff", rm(Rup)),
                ("fdiv_s", "fff", rm(Rup)),
                ("fmul_d", "fff", rm(Rup)),
                ("fdiv_d", "fff", rm(Rup)),
            ],
        )?;
        catalog.float(
            Family::Float4ArithOp,
            &[
                ("fmadd_s", "ffff", rm(Rup)),
                ("fmsub_s", "ffff", rm(Rtz)),
                ("fmadd_d", "ffff", rm(Rup)),
                ("fmsub_d", "ffff", rm(Rtz)),
                ("fnmsub_s", "ffff", rm(Rmm)),
                ("fnmadd_s", "ffff", rm(Rtz)),
                ("fnmsub_d", "ffff", rm(Rmm)),
                ("fnmadd_d", "ffff", rm(Rtz)),
            ],
        )?;
        catalog.float(
            Family::TwoRegFloatOp,
            &[
                ("fclass_s", "xf", None),
                ("fmv_s", "ff", None),
                ("fclass_d", "xf", None),
                ("fmv_d", "ff", None),
                ("fabs_s", "ff", None),
                ("fneg_s", "ff", None),
                ("fabs_d", "ff", None),
                ("fneg_d", "ff", None),
                ("fmv_x_w", "xf", None),
                ("fmv_x_d", "xf", None),
            ],
        )?;
        catalog.float(
            Family::ThreeRegFloatOp,
            &[
                ("fsgnj_s", "fff", None),
                ("fsgnjn_s", "fff", None),
                ("fsgnj_d", "fff", None),
                ("fsgnjn_d", "fff", None),
                ("fsgnjx_s", "fff", None),
                ("fmin_s", "fff", None),
                ("fsgnjx_d", "fff", None),
                ("fmin_d", "fff", None),
                ("fmax_s", "fff", None),
                ("feq_s", "xff", None),
                ("fmax_d", "fff", None),
                ("feq_d", "xff", None),
                ("flt_s", "xff", None),
                ("fle_s", "xff", None),
                ("flt_d", "xff", None),
                ("fle_d", "xff", None),
            ],
        )?;

        // Widening conversions are exact, so their assembly omits the mode.
        let exact = Some(Rounding::implied());
        catalog.float(
            Family::FloatConvertOp,
            &[
                ("fcvt_w_s", "xf", rm(Rup)),
                ("fcvt_wu_s", "xf", rm(Rne)),
                ("fcvt_s_w", "fx", rm(Rdn)),
                ("fcvt_s_wu", "fx", rm(Rtz)),
                ("fcvt_l_s", "xf", rm(Rne)),
                ("fcvt_lu_s", "xf", rm(Rmm)),
                ("fcvt_s_l", "fx", rm(Rup)),
                ("fcvt_s_lu", "fx", rm(Rtz)),
                ("fcvt_s_d", "ff", rm(Rdn)),
                ("fcvt_d_s", "ff", exact),
                ("fcvt_w_d", "xf", rm(Rdn)),
                ("fcvt_wu_d", "xf", rm(Rdn)),
                ("fcvt_d_w", "fx", exact),
                ("fcvt_d_wu", "fx", exact),
                ("fcvt_l_d", "xf", rm(Rdn)),
                ("fcvt_lu_d", "xf", rm(Rdn)),
                ("fcvt_d_l", "fx", rm(Rdn)),
                ("fcvt_d_lu", "fx", rm(Rdn)),
            ],
        )?;

        Ok(catalog)
    }

    /// Adds a group whose entries all share `format`.
    fn uniform(&mut self, family: Family, names: &[&str], format: &InstructionFormat) -> Result<()> {
        let entries = names
            .iter()
            .map(|name| CatalogEntry::new(Mnemonic::new(*name)?, format.clone()))
            .collect::<Result<Vec<_>>>()?;
        self.push(family, entries);
        Ok(())
    }

    /// Adds an atomic group for one width and ordering.
    fn atomics(&mut self, width: AtomicWidth, ordering: AtomicOrdering, roots: &[&str]) -> Result<()> {
        let entries = roots
            .iter()
            .map(|root| {
                let kind = AtomicKind::from_root(root).ok_or_else(|| Error::InvalidCatalog {
                    mnemonic: (*root).to_string(),
                    reason: "not an atomic memory operation".to_string(),
                })?;
                let mnemonic = Mnemonic::new(*root)?.with_part(width.suffix())?;
                CatalogEntry::new(mnemonic, InstructionFormat::atomic(kind, ordering))
            })
            .collect::<Result<Vec<_>>>()?;
        self.push(Family::AtomOp, entries);
        Ok(())
    }

    /// Adds the load/store group; each entry names its data register class.
    fn load_store(&mut self, table: &[(&str, SlotKind)]) -> Result<()> {
        let entries = table
            .iter()
            .map(|&(name, class)| {
                let mnemonic = Mnemonic::new(name)?;
                if !matches!(class, General | Float) {
                    return Err(Error::InvalidCatalog {
                        mnemonic: name.to_string(),
                        reason: "load/store data operand must be a register".to_string(),
                    });
                }
                CatalogEntry::new(mnemonic, InstructionFormat::slots([class, Address]))
            })
            .collect::<Result<Vec<_>>>()?;
        self.push(Family::LoadStoreOp, entries);
        Ok(())
    }

    /// Adds a floating-point group from `(name, modes, rounding)` rows.
    fn float(&mut self, family: Family, table: &[(&str, &str, Option<Rounding>)]) -> Result<()> {
        let entries = table
            .iter()
            .map(|&(name, modes, rounding)| {
                let mnemonic = Mnemonic::new(name)?;
                let mut format = InstructionFormat::registers(&mnemonic, modes)?;
                if let Some(rounding) = rounding {
                    format = format.with_rounding(rounding);
                }
                CatalogEntry::new(mnemonic, format)
            })
            .collect::<Result<Vec<_>>>()?;
        self.push(family, entries);
        Ok(())
    }
}
