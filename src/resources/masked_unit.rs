//! Masked unit resource.
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::units::{self, Unit};

/// A unit that must be masked (`etc/systemd/system/<name>` -> `/dev/null`).
#[derive(Debug, Clone)]
pub struct MaskedUnitResource {
    /// Unit name including the type suffix.
    pub name: String,
    /// Target root.
    pub root: PathBuf,
}

impl MaskedUnitResource {
    /// Create a new masked unit resource.
    #[must_use]
    pub fn new(name: impl Into<String>, root: &Path) -> Self {
        Self {
            name: name.into(),
            root: root.to_path_buf(),
        }
    }

    /// Where the mask link lives.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        units::unit_destination(&Unit::new(self.name.as_str(), ""), &self.root)
    }
}

impl Applicable for MaskedUnitResource {
    fn description(&self) -> String {
        format!("mask {}", self.name)
    }

    fn apply(&self) -> Result<ResourceChange> {
        units::mask_unit(&self.name, &self.root)?;
        Ok(ResourceChange::Applied)
    }

    fn remove(&self) -> Result<ResourceChange> {
        if units::unmask_unit(&self.name, &self.root)? {
            Ok(ResourceChange::Applied)
        } else {
            Ok(ResourceChange::AlreadyCorrect)
        }
    }
}

impl Resource for MaskedUnitResource {
    fn current_state(&self) -> Result<ResourceState> {
        if units::is_masked(&self.name, &self.root)? {
            return Ok(ResourceState::Correct);
        }
        let path = self.path();
        match std::fs::symlink_metadata(&path) {
            Ok(meta) if meta.is_symlink() => Ok(ResourceState::Incorrect {
                current: "symlink to another unit".to_string(),
            }),
            Ok(meta) if meta.is_dir() => Ok(ResourceState::Incorrect {
                current: "directory".to_string(),
            }),
            Ok(_) => Ok(ResourceState::Incorrect {
                current: "unit file".to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ResourceState::Missing),
            Err(e) => Err(e).with_context(|| format!("reading metadata: {}", path.display())),
        }
    }
}
