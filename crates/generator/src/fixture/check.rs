//! Label-independence check for multi-form expansions.
//!
//! The forms of one expansion are rendered from the same operands and differ
//! only in their label target. Their encodings must therefore agree on every
//! field that does not hold the target offset. A disagreement means either the
//! renderer or the toolchain substituted something other than the label.

use tracing::debug;

use crate::common::error::{Error, Result};
use crate::engine::Emission;
use crate::isa::instruction::TargetFreeFields;

/// Verifies every expansion of `emission` against the paired `words`.
///
/// `words` must already be paired one-to-one with the emission.
///
/// # Errors
///
/// Returns [`Error::FormMismatch`] for the first expansion whose words differ
/// outside their target field.
pub fn check_expansions(emission: &Emission, words: &[u32]) -> Result<()> {
    for span in emission.expansions() {
        let Some(forms) = words.get(span.clone()) else {
            continue;
        };
        let Some((&first, rest)) = forms.split_first() else {
            continue;
        };
        let expected = TargetFreeFields::of(first);
        if rest.iter().any(|&w| TargetFreeFields::of(w) != expected) {
            let mnemonic = emission
                .instructions()
                .get(span.start)
                .map(|i| i.mnemonic.clone())
                .unwrap_or_default();
            return Err(Error::FormMismatch {
                mnemonic,
                words: forms.to_vec(),
            });
        }
    }
    debug!(
        expansions = emission.expansions().len(),
        "multi-form expansions agree outside their targets"
    );
    Ok(())
}
