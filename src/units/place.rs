//! Writing unit content to its destination.
use std::fs::{self, File, OpenOptions, Permissions};
use std::io::Write as _;
use std::os::unix::fs::{OpenOptionsExt as _, PermissionsExt as _};
use std::path::{Path, PathBuf};

use super::fs::ensure_parent_dir;
use super::{UNIT_FILE_MODE, Unit};
use crate::error::UnitError;

/// Write `unit.content` verbatim to `dst` with mode `0644`.
///
/// Missing parent directories are created with mode `0755`.  The content is
/// staged in a hidden sibling file and renamed into place, so whatever sat
/// at `dst` before (including a mask symlink) is replaced rather than
/// written through.  The staging file is created exclusively: an existing
/// entry at that name is never truncated, followed or removed.
///
/// # Errors
///
/// Returns [`UnitError::CreateDir`] if a parent directory cannot be created
/// and [`UnitError::Write`] if the content cannot be written or moved into
/// place.  When the staging name is already taken the error carries the
/// staging path and [`std::io::ErrorKind::AlreadyExists`].  No retry is
/// attempted.
pub fn place_unit(unit: &Unit, dst: &Path) -> Result<(), UnitError> {
    ensure_parent_dir(dst)?;

    let staged = staging_path(dst);
    let file = create_staged(&staged).map_err(|source| UnitError::Write {
        path: staged.clone(),
        source,
    })?;
    if let Err(source) =
        fill_staged(file, unit.content.as_bytes()).and_then(|()| fs::rename(&staged, dst))
    {
        let _ = fs::remove_file(&staged);
        return Err(UnitError::Write {
            path: dst.to_path_buf(),
            source,
        });
    }

    tracing::debug!(
        unit = %unit.name,
        path = %dst.display(),
        bytes = unit.content.len(),
        "placed unit"
    );
    Ok(())
}

/// Sibling path `.<file name>.tmp`, on the same filesystem as `dst`.
fn staging_path(dst: &Path) -> PathBuf {
    let name = dst
        .file_name()
        .map_or_else(|| "unit".into(), |n| n.to_string_lossy().into_owned());
    dst.with_file_name(format!(".{name}.tmp"))
}

/// `O_CREAT | O_EXCL`: fails on any existing entry, dangling symlinks included.
fn create_staged(path: &Path) -> std::io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(UNIT_FILE_MODE)
        .open(path)
}

fn fill_staged(mut file: File, content: &[u8]) -> std::io::Result<()> {
    file.write_all(content)?;
    // The open mode is filtered through the umask; pin it explicitly.
    file.set_permissions(Permissions::from_mode(UNIT_FILE_MODE))?;
    file.sync_all()
}
