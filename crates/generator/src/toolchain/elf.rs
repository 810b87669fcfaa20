//! In-process code extraction from an ELF object.

use std::fs;
use std::path::Path;

use object::{Object, ObjectSection};

use crate::common::constants::CODE_SECTION;
use crate::common::error::{Error, Result};

/// Reads the raw `.text` bytes of the object file at `path`.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, [`Error::Object`] if it
/// is not a parseable object, and [`Error::MissingCodeSection`] if it has no
/// `.text` section.
pub fn read_code_section(path: &Path) -> Result<Vec<u8>> {
    let data = fs::read(path)?;
    code_section(&data, path)
}

/// Extracts the `.text` bytes from an in-memory object image.
///
/// `path` is only used in the error for a missing section.
///
/// # Errors
///
/// See [`read_code_section`].
pub fn code_section(data: &[u8], path: &Path) -> Result<Vec<u8>> {
    let file = object::File::parse(data)?;
    let section = file
        .section_by_name(CODE_SECTION)
        .ok_or_else(|| Error::MissingCodeSection {
            path: path.to_path_buf(),
            section: CODE_SECTION,
        })?;
    Ok(section.data()?.to_vec())
}
