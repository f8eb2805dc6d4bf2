//! File-system helpers shared by placement and masking.
use std::fs::{self, DirBuilder};
use std::io;
use std::os::unix::fs::DirBuilderExt as _;
use std::path::Path;

use super::UNIT_DIR_MODE;
use crate::error::UnitError;

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) with mode `0755` if necessary.
///
/// Directories that already exist keep their mode.
pub(super) fn ensure_parent_dir(path: &Path) -> Result<(), UnitError> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    DirBuilder::new()
        .recursive(true)
        .mode(UNIT_DIR_MODE)
        .create(parent)
        .map_err(|source| UnitError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })
}

/// Remove whatever entry sits at `path`, including broken symlinks and
/// empty directories.
///
/// Returns `Ok(false)` when there was nothing to remove.  A non-empty
/// directory fails with the underlying error.
pub(super) fn remove_existing(path: &Path) -> Result<bool, UnitError> {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(source) => {
            return Err(UnitError::Remove {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let result = if meta.is_dir() {
        fs::remove_dir(path)
    } else {
        fs::remove_file(path)
    };
    match result {
        Ok(()) => Ok(true),
        // Raced with another remover; the end state is the same.
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(UnitError::Remove {
            path: path.to_path_buf(),
            source,
        }),
    }
}
