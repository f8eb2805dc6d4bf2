//! Unit file resource.
use anyhow::{Context as _, Result};
use std::io;
use std::os::unix::fs::PermissionsExt as _;
use std::path::{Path, PathBuf};

use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::units::{self, UNIT_FILE_MODE, Unit};

/// A unit file (or drop-in fragment) placed at its resolved destination.
#[derive(Debug, Clone)]
pub struct UnitFileResource {
    /// Unit to write.
    pub unit: Unit,
    /// Absolute destination of the file.
    pub path: PathBuf,
}

impl UnitFileResource {
    /// Resolve `unit`'s destination under `root`.
    #[must_use]
    pub fn new(unit: Unit, root: &Path) -> Self {
        let path = units::unit_destination(&unit, root);
        Self { unit, path }
    }
}

impl Applicable for UnitFileResource {
    fn description(&self) -> String {
        format!("{} -> {}", self.unit.name, self.path.display())
    }

    fn apply(&self) -> Result<ResourceChange> {
        units::place_unit(&self.unit, &self.path)?;
        Ok(ResourceChange::Applied)
    }

    fn remove(&self) -> Result<ResourceChange> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(ResourceChange::Applied),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(ResourceChange::AlreadyCorrect),
            Err(e) => Err(e).with_context(|| format!("remove unit: {}", self.path.display())),
        }
    }
}

impl Resource for UnitFileResource {
    fn current_state(&self) -> Result<ResourceState> {
        let meta = match std::fs::symlink_metadata(&self.path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ResourceState::Missing),
            Err(e) => {
                return Err(e).with_context(|| format!("reading metadata: {}", self.path.display()));
            }
        };

        if meta.is_dir() {
            return Ok(ResourceState::Invalid {
                reason: "destination is a directory".to_string(),
            });
        }

        if meta.is_symlink() {
            let target = std::fs::read_link(&self.path)
                .with_context(|| format!("reading link: {}", self.path.display()))?;
            let current = if target == Path::new(units::NULL_DEVICE) {
                "masked".to_string()
            } else {
                format!("symlink to {}", target.display())
            };
            return Ok(ResourceState::Incorrect { current });
        }

        let existing = std::fs::read(&self.path)
            .with_context(|| format!("reading unit: {}", self.path.display()))?;
        if existing != self.unit.content.as_bytes() {
            return Ok(ResourceState::Incorrect {
                current: "content differs".to_string(),
            });
        }

        let mode = meta.permissions().mode() & 0o7777;
        if mode != UNIT_FILE_MODE {
            return Ok(ResourceState::Incorrect {
                current: format!("mode {mode:o}"),
            });
        }

        Ok(ResourceState::Correct)
    }
}
