//! Machine ID lookup.
use std::fs;
use std::path::Path;

use crate::error::UnitError;

/// Read the machine ID recorded under `root`, from `<root>/etc/machine-id`,
/// with surrounding whitespace removed.
///
/// # Errors
///
/// Returns [`UnitError::Read`] if the file cannot be read.
pub fn machine_id(root: &Path) -> Result<String, UnitError> {
    let path = root.join("etc").join("machine-id");
    let raw = fs::read_to_string(&path).map_err(|source| UnitError::Read { path, source })?;
    Ok(raw.trim().to_string())
}
