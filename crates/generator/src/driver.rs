//! End-to-end run sequencing.
//!
//! A run is strictly sequential:
//! 1. **Generate:** Check label reach, then emit every selected catalog entry in both notations.
//! 2. **Assemble:** Write the `.s` source and assemble it into the `.o` object.
//! 3. **Extract:** Read the code section back and repack it into words.
//! 4. **Check:** Pair words with emissions and verify multi-form expansions.
//! 5. **Write:** Emit the listing and JSON fixture.
//!
//! Any failure aborts the run. The listing and fixture are written only after
//! every check has passed, so a failed run never leaves a stale fixture that
//! looks current.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::common::error::{Error, Result};
use crate::config::{Config, GeneralConfig};
use crate::engine::{Emission, Generator, Renderer};
use crate::fixture::{Fixture, listing, words};
use crate::isa::catalog::Catalog;
use crate::isa::format::Family;
use crate::toolchain::Toolchain;

/// Paths of the artifacts a run writes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifacts {
    /// Assembly source.
    pub source: PathBuf,
    /// Assembled object.
    pub object: PathBuf,
    /// Encoder-test listing.
    pub listing: PathBuf,
    /// JSON fixture.
    pub fixture: PathBuf,
}

impl Artifacts {
    /// Artifact paths derived from the output directory and base name.
    pub fn new(general: &GeneralConfig) -> Self {
        Self {
            source: general.artifact("s"),
            object: general.artifact("o"),
            listing: general.artifact("txt"),
            fixture: general.artifact("json"),
        }
    }
}

/// Result of a completed run.
#[derive(Clone, Debug)]
pub struct Outcome {
    /// The checked fixture.
    pub fixture: Fixture,
    /// Where the artifacts were written.
    pub artifacts: Artifacts,
}

/// Builds the RV64G catalog restricted to the configured families.
///
/// # Errors
///
/// Returns [`Error::UnknownFamily`] for a family name that matches no group.
pub fn select_catalog(general: &GeneralConfig) -> Result<Catalog> {
    let families = general
        .families
        .iter()
        .map(|name| name.parse::<Family>().map_err(|_| Error::UnknownFamily(name.clone())))
        .collect::<Result<Vec<_>>>()?;
    let mut catalog = Catalog::rv64g()?;
    catalog.retain_families(&families);
    Ok(catalog)
}

/// Generates the emission for `catalog` without touching the toolchain.
pub fn generate(config: &Config, catalog: &Catalog) -> (Emission, Renderer) {
    let renderer = Renderer::new(&config.api);
    let mut generator = Generator::new(config.general.seed);
    let emission = generator.emit(catalog, &renderer, config.general.instances_per_mnemonic);
    (emission, renderer)
}

/// Runs the full pipeline against `toolchain`.
///
/// # Arguments
///
/// * `config` - Run configuration.
/// * `catalog` - Entries to emit, in order.
/// * `toolchain` - Reference assembler and code extractor.
///
/// # Returns
///
/// The checked [`Fixture`] and the paths it was written to.
///
/// # Errors
///
/// Returns [`Error::LabelOutOfReach`] before anything is written when the
/// repetition count pushes a label-targeting form out of reach. Otherwise
/// propagates every toolchain, I/O, and pairing error; see [`Error`].
pub fn run(config: &Config, catalog: &Catalog, toolchain: &dyn Toolchain) -> Result<Outcome> {
    catalog.check_label_reach(config.general.instances_per_mnemonic)?;
    let (emission, renderer) = generate(config, catalog);
    let expected = catalog.expected_words(config.general.instances_per_mnemonic);
    debug_assert_eq!(emission.len(), expected);

    let artifacts = Artifacts::new(&config.general);
    fs::create_dir_all(&config.general.output_dir)?;
    fs::write(&artifacts.source, listing::assembly_source(&emission))?;
    info!(path = %artifacts.source.display(), instructions = emission.len(), "wrote assembly source");

    toolchain.assemble(&artifacts.source, &artifacts.object)?;
    info!(path = %artifacts.object.display(), "assembled");

    let disassembly = if config.general.include_disassembly {
        Some(toolchain.disassemble(&artifacts.object)?)
    } else {
        None
    };

    let bytes = toolchain.extract_code(&artifacts.object)?;
    let words = words::words_from_bytes(&bytes)?;
    debug!(bytes = bytes.len(), words = words.len(), "extracted code section");

    let fixture = Fixture::pair(&emission, &words)?;
    info!(
        expansions = emission.expansions().len(),
        "every word paired and every expansion checked"
    );

    let json = fixture.to_json()?;
    let text = listing::listing(&emission, &renderer, &words, disassembly.as_deref());
    fs::write(&artifacts.listing, text)?;
    fs::write(&artifacts.fixture, json)?;
    info!(
        listing = %artifacts.listing.display(),
        fixture = %artifacts.fixture.display(),
        "wrote fixture"
    );

    Ok(Outcome { fixture, artifacts })
}
