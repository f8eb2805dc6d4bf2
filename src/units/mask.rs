//! Masking: a unit whose persistent file is a symlink to `/dev/null` is
//! refused by systemd.
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::fs::{ensure_parent_dir, remove_existing};
use super::{NULL_DEVICE, Unit, is_valid_name, unit_destination};
use crate::error::UnitError;

/// Persistent, non-drop-in destination for `name`.
fn masked_path(name: &str, root: &Path) -> PathBuf {
    unit_destination(&Unit::new(name, ""), root)
}

/// Mask `name` under `root`.
///
/// Whatever sits at `root/etc/systemd/system/<name>` (nothing, a regular
/// file, an earlier mask or any other symlink) is removed and replaced by a
/// symlink to `/dev/null`.  Masking twice leaves the same end state.
///
/// # Errors
///
/// - [`UnitError::InvalidName`] if `name` does not resolve to an entry
///   inside `etc/systemd/system` (see [`is_valid_name`]).  Nothing is
///   touched.
/// - [`UnitError::CreateDir`] if `etc/systemd/system` cannot be created.
/// - [`UnitError::Remove`] if the existing entry cannot be removed for any
///   reason other than not existing (e.g. a non-empty directory).
/// - [`UnitError::Symlink`] if the link cannot be created.  The unit file
///   has already been removed at that point.
pub fn mask_unit(name: &str, root: &Path) -> Result<(), UnitError> {
    let path = masked_path(name, root);
    if !is_valid_name(name) {
        return Err(UnitError::InvalidName {
            name: name.to_string(),
            path,
            source: io::Error::new(io::ErrorKind::InvalidInput, "no unit file name"),
        });
    }
    ensure_parent_dir(&path)?;

    let replaced = remove_existing(&path)?;
    std::os::unix::fs::symlink(NULL_DEVICE, &path).map_err(|source| UnitError::Symlink {
        path: path.clone(),
        source,
    })?;

    tracing::debug!(unit = name, path = %path.display(), replaced, "masked unit");
    Ok(())
}

/// Whether `name` is masked under `root`.
///
/// # Errors
///
/// Returns [`UnitError::Read`] if the entry exists but cannot be inspected.
pub fn is_masked(name: &str, root: &Path) -> Result<bool, UnitError> {
    let path = masked_path(name, root);
    match fs::read_link(&path) {
        Ok(target) => Ok(target == Path::new(NULL_DEVICE)),
        // EINVAL: present but not a symlink.
        Err(e) if e.kind() == io::ErrorKind::NotFound || e.kind() == io::ErrorKind::InvalidInput => {
            Ok(false)
        }
        Err(source) => Err(UnitError::Read { path, source }),
    }
}

/// Undo [`mask_unit`].
///
/// Only a symlink to `/dev/null` is removed; a missing entry, a regular
/// unit file or a link anywhere else is left alone.  Returns whether a mask
/// was removed.
///
/// # Errors
///
/// Returns [`UnitError::Read`] if the entry cannot be inspected and
/// [`UnitError::Remove`] if the mask cannot be removed.
pub fn unmask_unit(name: &str, root: &Path) -> Result<bool, UnitError> {
    if !is_masked(name, root)? {
        return Ok(false);
    }
    let path = masked_path(name, root);
    fs::remove_file(&path).map_err(|source| UnitError::Remove {
        path: path.clone(),
        source,
    })?;
    tracing::debug!(unit = name, path = %path.display(), "unmasked unit");
    Ok(true)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn system_dir(root: &Path) -> PathBuf {
        root.join("etc").join("systemd").join("system")
    }

    fn assert_masked(path: &Path) {
        let meta = fs::symlink_metadata(path).unwrap();
        assert!(meta.is_symlink(), "{} is not a symlink", path.display());
        assert_eq!(fs::read_link(path).unwrap(), Path::new("/dev/null"));
    }

    #[test]
    fn masks_missing_unit() {
        let dir = tempfile::tempdir().unwrap();
        mask_unit("foo.service", dir.path()).unwrap();
        assert_masked(&system_dir(dir.path()).join("foo.service"));
    }

    #[test]
    fn masks_existing_regular_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = system_dir(dir.path()).join("bar.service");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "[Service]\nExecStart=/bin/bar\n").unwrap();

        mask_unit("bar.service", dir.path()).unwrap();

        assert_masked(&path);
    }

    #[test]
    fn mask_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = system_dir(dir.path()).join("foo.service");
        mask_unit("foo.service", dir.path()).unwrap();
        assert_masked(&path);
        mask_unit("foo.service", dir.path()).unwrap();
        assert_masked(&path);
    }

    #[test]
    fn refuses_names_resolving_to_the_unit_dir() {
        let dir = tempfile::tempdir().unwrap();
        let system = system_dir(dir.path());
        fs::create_dir_all(&system).unwrap();

        for name in ["", "/", ".", "foo/.."] {
            let err = mask_unit(name, dir.path()).unwrap_err();
            assert!(matches!(err, UnitError::InvalidName { .. }), "{name}: {err}");
            assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        }

        assert!(fs::symlink_metadata(&system).unwrap().is_dir());
    }

    #[test]
    fn replaces_symlink_to_elsewhere() {
        let dir = tempfile::tempdir().unwrap();
        let path = system_dir(dir.path()).join("foo.service");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let real = dir.path().join("real.service");
        fs::write(&real, "keep me").unwrap();
        std::os::unix::fs::symlink(&real, &path).unwrap();

        mask_unit("foo.service", dir.path()).unwrap();

        assert_masked(&path);
        assert_eq!(fs::read_to_string(&real).unwrap(), "keep me");
    }

    #[test]
    fn drop_in_flag_is_irrelevant_to_mask_path() {
        let dir = tempfile::tempdir().unwrap();
        mask_unit("50-eth0.network", dir.path()).unwrap();
        assert_masked(&system_dir(dir.path()).join("50-eth0.network"));
    }

    #[test]
    fn non_empty_directory_fails_and_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = system_dir(dir.path()).join("foo.service");
        fs::create_dir_all(&path).unwrap();
        fs::write(path.join("inner"), "x").unwrap();

        let err = mask_unit("foo.service", dir.path()).unwrap_err();

        assert!(matches!(err, UnitError::Remove { .. }));
        assert!(path.join("inner").exists());
    }

    #[test]
    fn is_masked_reports_state() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_masked("foo.service", dir.path()).unwrap());

        let path = system_dir(dir.path()).join("foo.service");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "x").unwrap();
        assert!(!is_masked("foo.service", dir.path()).unwrap());

        mask_unit("foo.service", dir.path()).unwrap();
        assert!(is_masked("foo.service", dir.path()).unwrap());
    }

    #[test]
    fn unmask_removes_only_null_links() {
        let dir = tempfile::tempdir().unwrap();
        let sys = system_dir(dir.path());
        fs::create_dir_all(&sys).unwrap();
        fs::write(sys.join("real.service"), "x").unwrap();
        std::os::unix::fs::symlink("/lib/systemd/system/other.service", sys.join("other.service"))
            .unwrap();
        mask_unit("foo.service", dir.path()).unwrap();

        assert!(unmask_unit("foo.service", dir.path()).unwrap());
        assert!(fs::symlink_metadata(sys.join("foo.service")).is_err());

        assert!(!unmask_unit("foo.service", dir.path()).unwrap());
        assert!(!unmask_unit("real.service", dir.path()).unwrap());
        assert!(!unmask_unit("other.service", dir.path()).unwrap());
        assert!(sys.join("real.service").exists());
        assert!(fs::symlink_metadata(sys.join("other.service")).is_ok());
    }
}
