//! Domain-specific error types for unit provisioning.
//!
//! The core operations in [`crate::units`] return [`UnitError`], which keeps
//! the failing path next to the untouched [`std::io::Error`] that caused it.
//! Manifest loading returns [`ConfigError`].  Command handlers at the CLI
//! boundary convert both to [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! UnitError                  filesystem failures while placing or masking
//! ├── CreateDir
//! ├── Write
//! ├── Remove
//! ├── Symlink
//! ├── Read
//! └── InvalidName
//! ConfigError                unit manifest loading
//! ├── Io
//! ├── Parse
//! └── InvalidName
//! ```

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Filesystem failure raised by a unit placement, mask or read operation.
///
/// Every variant carries the path being operated on and the underlying
/// I/O error as its `source`; nothing is classified or translated.
#[derive(Error, Debug)]
pub enum UnitError {
    /// A parent directory of the destination could not be created.
    #[error("create directory {}: {source}", path.display())]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Unit content could not be written to its destination.
    #[error("write unit {}: {source}", path.display())]
    Write {
        /// Destination of the unit file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// An existing entry at the destination could not be removed.
    #[error("remove {}: {source}", path.display())]
    Remove {
        /// Entry that could not be removed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The mask symlink could not be created.
    #[error("link {} -> {}: {source}", path.display(), crate::units::NULL_DEVICE)]
    Symlink {
        /// Path where the symlink should have been created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A file or link under the root could not be read.
    #[error("read {}: {source}", path.display())]
    Read {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The unit name does not name a file inside the unit directory
    /// (empty, `/`, `.` or `..` components).
    #[error("invalid unit name {name:?} (resolves to {})", path.display())]
    InvalidName {
        /// Name as given.
        name: String,
        /// Path the name resolved to.
        path: PathBuf,
        /// Always [`io::ErrorKind::InvalidInput`].
        source: io::Error,
    },
}

impl UnitError {
    /// Path the failing operation was acting on.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::CreateDir { path, .. }
            | Self::Write { path, .. }
            | Self::Remove { path, .. }
            | Self::Symlink { path, .. }
            | Self::Read { path, .. }
            | Self::InvalidName { path, .. } => path,
        }
    }

    /// The underlying I/O error.
    #[must_use]
    pub const fn io_error(&self) -> &io::Error {
        match self {
            Self::CreateDir { source, .. }
            | Self::Write { source, .. }
            | Self::Remove { source, .. }
            | Self::Symlink { source, .. }
            | Self::Read { source, .. }
            | Self::InvalidName { source, .. } => source,
        }
    }

    /// Shorthand for `self.io_error().kind()`.
    #[must_use]
    pub fn kind(&self) -> io::ErrorKind {
        self.io_error().kind()
    }
}

/// Errors that arise while loading a unit manifest.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The manifest exists but could not be read.
    #[error("IO error reading manifest {}: {source}", path.display())]
    Io {
        /// Path to the manifest.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The manifest is not valid TOML or does not match the expected shape.
    #[error("invalid manifest {}: {source}", path.display())]
    Parse {
        /// Path to the manifest.
        path: PathBuf,
        /// Underlying deserialization error.
        source: toml::de::Error,
    },

    /// A `[[unit]]` entry has an empty `name` or one that does not name a
    /// file inside the unit directory.
    #[error("unit entry #{index} in {} has an invalid name {name:?}", path.display())]
    InvalidName {
        /// Path to the manifest.
        path: PathBuf,
        /// One-based position of the offending entry.
        index: usize,
        /// Name as written.
        name: String,
    },
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn remove_display_includes_path_and_cause() {
        let e = UnitError::Remove {
            path: PathBuf::from("/etc/systemd/system/foo.service"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        let msg = e.to_string();
        assert!(msg.contains("/etc/systemd/system/foo.service"), "{msg}");
        assert!(msg.starts_with("remove "), "{msg}");
    }

    #[test]
    fn symlink_display_names_null_device() {
        let e = UnitError::Symlink {
            path: PathBuf::from("/root/bar.service"),
            source: io::Error::from(io::ErrorKind::AlreadyExists),
        };
        assert!(e.to_string().contains("-> /dev/null"));
    }

    #[test]
    fn kind_passes_through_io_error() {
        let e = UnitError::Write {
            path: PathBuf::from("/x"),
            source: io::Error::from(io::ErrorKind::StorageFull),
        };
        assert_eq!(e.kind(), io::ErrorKind::StorageFull);
        assert_eq!(e.path(), Path::new("/x"));
    }

    #[test]
    fn source_is_the_io_error() {
        use std::error::Error as _;
        let e = UnitError::CreateDir {
            path: PathBuf::from("/x"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        let source = e.source().unwrap();
        assert!(source.downcast_ref::<io::Error>().is_some());
    }

    #[test]
    fn invalid_name_display() {
        let e = ConfigError::InvalidName {
            path: PathBuf::from("units.toml"),
            index: 3,
            name: String::new(),
        };
        assert_eq!(
            e.to_string(),
            "unit entry #3 in units.toml has an invalid name \"\""
        );
    }

    #[test]
    fn unit_error_converts_to_anyhow() {
        let e = UnitError::Read {
            path: PathBuf::from("/etc/machine-id"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        let _anyhow_err: anyhow::Error = e.into();
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn errors_are_send_sync() {
        assert_send_sync::<UnitError>();
        assert_send_sync::<ConfigError>();
    }
}
