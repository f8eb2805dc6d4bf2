//! Command: place and mask every unit listed in a TOML manifest.
use anyhow::{Context as _, Result};
use std::path::Path;

use super::process;
use crate::cli::{ApplyOpts, GlobalOpts};
use crate::config::{Manifest, manifest, validation};
use crate::logging::Logger;
use crate::resources::{MaskedUnitResource, UnitFileResource};

/// Run the apply command.
///
/// # Errors
///
/// Returns an error if the manifest cannot be loaded or any unit fails to
/// be placed or masked.  Units after the failing one are not attempted.
pub fn run(global: &GlobalOpts, opts: &ApplyOpts, log: &Logger) -> Result<()> {
    log.stage("Loading manifest");
    if !opts.manifest.exists() {
        log.warn(&format!(
            "manifest {} not found, nothing to do",
            opts.manifest.display()
        ));
    }
    let manifest = manifest::load(&opts.manifest)
        .with_context(|| format!("loading {}", opts.manifest.display()))?;
    log.info(&format!(
        "{} units, root {}",
        manifest.units.len(),
        global.root.display()
    ));

    for warning in validation::validate(&manifest, &global.root) {
        log.warn(&format!("{}: {}", warning.item, warning.message));
    }

    log.stage(if global.dry_run {
        "Placing units (dry run)"
    } else {
        "Placing units"
    });
    let result = apply_manifest(&manifest, &global.root, global.dry_run, log);
    log.print_summary();
    result
}

/// Place or mask every manifest entry under `root`, in file order.
///
/// # Errors
///
/// Stops at and returns the first failing entry.
pub fn apply_manifest(manifest: &Manifest, root: &Path, dry_run: bool, log: &Logger) -> Result<()> {
    for entry in &manifest.units {
        if entry.mask {
            let resource = MaskedUnitResource::new(entry.name.as_str(), root);
            process::apply_one(&resource, dry_run, log)?;
        } else {
            let resource = UnitFileResource::new(entry.to_unit(), root);
            process::apply_one(&resource, dry_run, log)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::UnitEntry;
    use crate::logging::UnitStatus;
    use std::fs;

    fn entry(name: &str, content: &str) -> UnitEntry {
        UnitEntry {
            name: name.to_string(),
            content: content.to_string(),
            ..UnitEntry::default()
        }
    }

    #[test]
    fn applies_units_and_masks_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let log = Logger::new();
        let manifest = Manifest {
            units: vec![
                UnitEntry {
                    runtime: true,
                    ..entry("50-eth0.network", "[Match]\nName=eth0\n")
                },
                UnitEntry {
                    mask: true,
                    ..entry("foo.service", "")
                },
            ],
        };

        apply_manifest(&manifest, dir.path(), false, &log).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("run/systemd/network/50-eth0.network")).unwrap(),
            "[Match]\nName=eth0\n"
        );
        assert_eq!(
            fs::read_link(dir.path().join("etc/systemd/system/foo.service")).unwrap(),
            Path::new("/dev/null")
        );
        assert_eq!(log.count(UnitStatus::Changed), 2);
    }

    #[test]
    fn stops_at_first_failure() {
        let dir = tempfile::tempdir().unwrap();
        let log = Logger::new();
        let blocked = dir.path().join("etc/systemd/system/a.service");
        fs::create_dir_all(&blocked).unwrap();
        fs::write(blocked.join("inner"), "x").unwrap();
        let manifest = Manifest {
            units: vec![
                UnitEntry {
                    mask: true,
                    ..entry("a.service", "")
                },
                entry("b.service", "[Service]\n"),
            ],
        };

        assert!(apply_manifest(&manifest, dir.path(), false, &log).is_err());
        assert!(!dir.path().join("etc/systemd/system/b.service").exists());
        assert!(log.has_failures());
    }

    #[test]
    fn run_with_missing_manifest_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let log = Logger::new();
        let global = GlobalOpts {
            root: dir.path().to_path_buf(),
            dry_run: false,
        };
        let opts = ApplyOpts {
            manifest: dir.path().join("missing.toml"),
        };
        run(&global, &opts, &log).unwrap();
        assert!(log.outcomes().is_empty());
    }
}
