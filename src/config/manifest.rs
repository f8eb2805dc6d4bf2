//! Unit manifest loading.
use serde::Deserialize;
use std::path::Path;

use crate::error::ConfigError;
use crate::units::{self, Unit};

/// One `[[unit]]` entry of a manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitEntry {
    /// Unit file name including the type suffix.
    pub name: String,
    /// Place under `run/systemd/` instead of `etc/systemd/system/`.
    #[serde(default)]
    pub runtime: bool,
    /// Write an override fragment into `<name>.d/`.
    #[serde(default)]
    pub drop_in: bool,
    /// Replace the persistent unit with a `/dev/null` link instead of writing.
    #[serde(default)]
    pub mask: bool,
    /// Unit file content, written verbatim.
    #[serde(default)]
    pub content: String,
}

impl UnitEntry {
    /// The unit this entry describes.
    #[must_use]
    pub fn to_unit(&self) -> Unit {
        Unit {
            name: self.name.clone(),
            runtime: self.runtime,
            drop_in: self.drop_in,
            content: self.content.clone(),
        }
    }
}

/// Parsed manifest: the ordered list of units to materialize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Entries in file order.
    #[serde(default, rename = "unit")]
    pub units: Vec<UnitEntry>,
}

/// Load a manifest from `path`.
///
/// A missing file yields an empty manifest.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file exists but cannot be read,
/// [`ConfigError::Parse`] if it is not a valid manifest and
/// [`ConfigError::InvalidName`] if an entry has an empty name or one that
/// resolves outside a file of the unit directory (`/`, `.`, `..`).
pub fn load(path: &Path) -> Result<Manifest, ConfigError> {
    if !path.exists() {
        return Ok(Manifest::default());
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content, path)
}

/// Parse manifest text; `path` is only used in error messages.
///
/// # Errors
///
/// See [`load`].
pub fn parse(content: &str, path: &Path) -> Result<Manifest, ConfigError> {
    let manifest: Manifest = toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some((pos, entry)) = manifest
        .units
        .iter()
        .enumerate()
        .find(|(_, u)| u.name.trim().is_empty() || !units::is_valid_name(&u.name))
    {
        return Err(ConfigError::InvalidName {
            path: path.to_path_buf(),
            index: pos + 1,
            name: entry.name.clone(),
        });
    }
    Ok(manifest)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn parse_str(content: &str) -> Result<Manifest, ConfigError> {
        parse(content, Path::new("units.toml"))
    }

    #[test]
    fn parses_all_fields_and_defaults() {
        let manifest = parse_str(
            r#"
[[unit]]
name = "50-eth0.network"
runtime = true
content = """
[Match]
Name=eth47
"""

[[unit]]
name = "docker.service"
drop_in = true
content = "[Service]\nEnvironment=A=1\n"

[[unit]]
name = "foo.service"
mask = true
"#,
        )
        .unwrap();

        assert_eq!(manifest.units.len(), 3);
        assert!(manifest.units[0].runtime);
        assert_eq!(manifest.units[0].content, "[Match]\nName=eth47\n");
        assert!(manifest.units[1].drop_in);
        assert!(!manifest.units[1].runtime);
        assert!(manifest.units[2].mask);
        assert_eq!(manifest.units[2].content, "");
    }

    #[test]
    fn to_unit_copies_fields() {
        let entry = UnitEntry {
            name: "media-state.mount".to_string(),
            runtime: false,
            drop_in: true,
            mask: false,
            content: "[Mount]\n".to_string(),
        };
        assert_eq!(
            entry.to_unit(),
            Unit::new("media-state.mount", "[Mount]\n").drop_in(true)
        );
    }

    #[test]
    fn empty_document_has_no_units() {
        assert!(parse_str("").unwrap().units.is_empty());
    }

    #[test]
    fn empty_name_is_rejected_with_position() {
        let err = parse_str("[[unit]]\nname = \"a.service\"\n\n[[unit]]\nname = \"  \"\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidName { index: 2, .. }), "{err}");
    }

    #[test]
    fn names_outside_the_unit_dir_are_rejected() {
        for name in ["/", "..", "foo/.."] {
            let err = parse_str(&format!("[[unit]]\nname = \"{name}\"\nmask = true\n")).unwrap_err();
            assert!(
                matches!(&err, ConfigError::InvalidName { index: 1, name: n, .. } if n == name),
                "{err}"
            );
        }
    }

    #[test]
    fn missing_name_is_a_parse_error() {
        let err = parse_str("[[unit]]\nruntime = true\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn unknown_field_is_a_parse_error() {
        let err = parse_str("[[unit]]\nname = \"a.service\"\nenable = true\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn load_missing_file_returns_empty() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = load(&dir.path().join("nonexistent.toml")).unwrap();
        assert!(manifest.units.is_empty());
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("units.toml");
        std::fs::write(&path, "[[unit]]\nname = \"x.timer\"\n").unwrap();
        assert_eq!(load(&path).unwrap().units[0].name, "x.timer");
    }
}
