//! Single-unit subcommands: place, mask, unmask, destination, machine-id.
use anyhow::{Context as _, Result};
use std::io::Read as _;
use std::path::Path;

use super::process;
use crate::cli::{GlobalOpts, NamesOpts, PlaceOpts, UnitOpts};
use crate::logging::Logger;
use crate::resources::{MaskedUnitResource, UnitFileResource};
use crate::units::{self, Unit};

/// Read unit content from `path`, or from stdin when `path` is `-`.
fn read_content(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("reading unit content from stdin")?;
        return Ok(content);
    }
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn to_unit(opts: &UnitOpts, content: String) -> Unit {
    Unit::new(opts.name.as_str(), content)
        .runtime(opts.runtime)
        .drop_in(opts.drop_in)
}

/// Write one unit file under the root.
///
/// # Errors
///
/// Returns an error if the content cannot be read or the unit cannot be
/// written.
pub fn place(global: &GlobalOpts, opts: &PlaceOpts, log: &Logger) -> Result<()> {
    let content = read_content(&opts.content_file)?;
    let unit = to_unit(&opts.unit, content);
    if !unit.is_known_type() {
        log.warn(&format!(
            "{}: unrecognised unit type, placing under system/",
            unit.name
        ));
    }
    let resource = UnitFileResource::new(unit, &global.root);
    process::apply_one(&resource, global.dry_run, log)?;
    Ok(())
}

/// Mask every named unit.
///
/// # Errors
///
/// Stops at and returns the first unit that cannot be masked.
pub fn mask(global: &GlobalOpts, opts: &NamesOpts, log: &Logger) -> Result<()> {
    for name in &opts.names {
        let resource = MaskedUnitResource::new(name.as_str(), &global.root);
        process::apply_one(&resource, global.dry_run, log)?;
    }
    Ok(())
}

/// Remove the `/dev/null` mask of every named unit.
///
/// # Errors
///
/// Stops at and returns the first unit that cannot be unmasked.
pub fn unmask(global: &GlobalOpts, opts: &NamesOpts, log: &Logger) -> Result<()> {
    for name in &opts.names {
        let resource = MaskedUnitResource::new(name.as_str(), &global.root);
        process::remove_one(&resource, global.dry_run, log)?;
    }
    Ok(())
}

/// Print where a unit would be placed.
#[allow(clippy::print_stdout)]
pub fn destination(global: &GlobalOpts, opts: &UnitOpts) {
    let unit = to_unit(opts, String::new());
    println!("{}", unit.destination(&global.root).display());
}

/// Print the machine ID recorded under the root.
///
/// # Errors
///
/// Returns an error if `etc/machine-id` cannot be read.
#[allow(clippy::print_stdout)]
pub fn machine_id(global: &GlobalOpts) -> Result<()> {
    let id = units::machine_id(&global.root)?;
    println!("{id}");
    Ok(())
}
