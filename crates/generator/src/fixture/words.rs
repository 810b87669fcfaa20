//! Byte-stream to instruction-word conversion.

use crate::common::constants::WORD_BYTES;
use crate::common::error::{Error, Result};

/// Groups raw code bytes into little-endian 32-bit words, in file order.
///
/// # Errors
///
/// Returns [`Error::MisalignedCode`] when the length is not a multiple of 4.
pub fn words_from_bytes(bytes: &[u8]) -> Result<Vec<u32>> {
    let chunks = bytes.chunks_exact(WORD_BYTES);
    if !chunks.remainder().is_empty() {
        return Err(Error::MisalignedCode { len: bytes.len() });
    }
    Ok(chunks
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

/// Fixture spelling of a word: `0x` and eight lowercase hex digits.
pub fn hex_literal(word: u32) -> String {
    format!("{word:#010x}")
}

/// Checks that every emitted instruction has exactly one word.
///
/// # Errors
///
/// Returns [`Error::WordCountMismatch`] when the counts differ.
pub fn ensure_paired(expected: usize, words: &[u32]) -> Result<()> {
    if words.len() != expected {
        return Err(Error::WordCountMismatch {
            expected,
            actual: words.len(),
        });
    }
    Ok(())
}
