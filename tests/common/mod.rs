// Shared helpers for integration tests.
//
// Provides a temporary directory that stands in for the target root, plus
// small accessors for inspecting what ended up underneath it.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::os::unix::fs::PermissionsExt as _;
use std::path::{Path, PathBuf};

/// An isolated target root backed by a [`tempfile::TempDir`].
///
/// The directory is automatically deleted when dropped.
pub struct TestRoot {
    /// Temporary directory acting as the filesystem root.
    pub dir: tempfile::TempDir,
}

impl TestRoot {
    /// Create a new, empty root.
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// Path to the root.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of `rel` under the root.
    pub fn join(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Write `content` to `rel`, creating parent directories.
    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dir");
        }
        std::fs::write(&path, content).expect("write file");
        path
    }

    /// Read `rel` as a string.
    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.join(rel)).expect("read file")
    }

    /// Permission bits of `rel`.
    pub fn mode(&self, rel: &str) -> u32 {
        std::fs::metadata(self.join(rel))
            .expect("stat file")
            .permissions()
            .mode()
            & 0o777
    }

    /// Target of the symlink at `rel`, or `None` if `rel` is not a symlink.
    pub fn link_target(&self, rel: &str) -> Option<PathBuf> {
        std::fs::read_link(self.join(rel)).ok()
    }
}

impl Default for TestRoot {
    fn default() -> Self {
        Self::new()
    }
}
