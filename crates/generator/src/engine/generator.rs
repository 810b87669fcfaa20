//! Seeded instance generator.
//!
//! The generator owns the only source of randomness in a run. It is seeded
//! explicitly, so the same seed and catalog always emit the same instructions.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::engine::emission::{EmittedInstruction, Emission, Section};
use crate::engine::instance::GeneratedInstance;
use crate::engine::render::Renderer;
use crate::isa::catalog::{Catalog, CatalogEntry};

/// Draws operand values for catalog entries and emits their renderings.
#[derive(Clone, Debug)]
pub struct Generator {
    rng: ChaCha8Rng,
    seed: u64,
}

impl Generator {
    /// Creates a generator whose output is fully determined by `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Creates a generator from a freshly drawn seed, which is logged so the
    /// run can be replayed.
    pub fn from_entropy() -> Self {
        let seed: u64 = rand::random();
        info!(seed, "no seed configured, drew a fresh one");
        Self::seeded(seed)
    }

    /// Seeds from `seed` when given, otherwise from entropy.
    pub fn new(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }

    /// Seed this generator was created with.
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Draws one instance of `entry`.
    pub fn instantiate<'c>(&mut self, entry: &'c CatalogEntry) -> GeneratedInstance<'c> {
        GeneratedInstance::generate(entry, &mut self.rng)
    }

    /// Generates and renders the whole catalog.
    ///
    /// Order is catalog group, entry, repetition, then form. Each instance is
    /// drawn once and rendered once per form.
    ///
    /// # Arguments
    ///
    /// * `catalog` - Groups to emit, in order.
    /// * `renderer` - Notation settings.
    /// * `per_mnemonic` - Instances generated per entry.
    ///
    /// # Returns
    ///
    /// The [`Emission`], whose length is `catalog.expected_words(per_mnemonic)`.
    pub fn emit(&mut self, catalog: &Catalog, renderer: &Renderer, per_mnemonic: usize) -> Emission {
        let mut emission = Emission {
            seed: self.seed,
            ..Emission::default()
        };

        for group in catalog.groups() {
            let start = emission.instructions.len();
            for entry in group.entries() {
                for _ in 0..per_mnemonic {
                    let instance = self.instantiate(entry);
                    let forms = renderer.forms(&instance);
                    let first = emission.instructions.len();
                    let multi = forms.len() > 1;
                    emission
                        .instructions
                        .extend(forms.into_iter().map(|(target, form)| EmittedInstruction {
                            family: group.family(),
                            mnemonic: entry.assembly_name(),
                            api: form.api,
                            assembly: form.assembly,
                            target,
                        }));
                    if multi {
                        emission.expansions.push(first..emission.instructions.len());
                    }
                }
            }
            let span = start..emission.instructions.len();
            debug!(family = %group.family(), count = span.len(), "emitted group");
            emission.sections.push(Section {
                family: group.family(),
                span,
            });
        }

        info!(
            seed = self.seed,
            instructions = emission.instructions.len(),
            "generation complete"
        );
        emission
    }
}
