//! Non-fatal manifest checks.
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::manifest::{Manifest, UnitEntry};
use crate::units;

/// A validation warning detected while loading a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// Unit name the warning is about.
    pub item: String,
    /// Human-readable warning message.
    pub message: String,
}

impl ValidationWarning {
    /// Create a warning for `item`.
    #[must_use]
    pub fn new(item: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            message: message.into(),
        }
    }
}

/// Check a manifest for entries that will not do what they look like.
///
/// - unknown unit type suffix
/// - `mask = true` combined with fields a mask ignores
/// - two entries resolving to the same destination under `root`
#[must_use]
pub fn validate(manifest: &Manifest, root: &Path) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let mut seen: HashMap<PathBuf, &str> = HashMap::new();

    for entry in &manifest.units {
        let unit = entry.to_unit();
        if !unit.is_known_type() {
            warnings.push(ValidationWarning::new(
                &entry.name,
                format!("unknown unit type '{}'", unit.unit_type()),
            ));
        }

        if entry.mask {
            let ignored = ignored_mask_fields(entry);
            if !ignored.is_empty() {
                warnings.push(ValidationWarning::new(
                    &entry.name,
                    format!("masked unit ignores {}", ignored.join(", ")),
                ));
            }
        }

        let dst = if entry.mask {
            units::unit_destination(&units::Unit::new(entry.name.as_str(), ""), root)
        } else {
            units::unit_destination(&unit, root)
        };
        if let Some(first) = seen.insert(dst.clone(), &entry.name) {
            warnings.push(ValidationWarning::new(
                &entry.name,
                format!(
                    "{} is also written by an earlier '{first}' entry",
                    dst.display()
                ),
            ));
        }
    }

    warnings
}

fn ignored_mask_fields(entry: &UnitEntry) -> Vec<&'static str> {
    let mut ignored = Vec::new();
    if entry.runtime {
        ignored.push("runtime");
    }
    if entry.drop_in {
        ignored.push("drop_in");
    }
    if !entry.content.is_empty() {
        ignored.push("content");
    }
    ignored
}
