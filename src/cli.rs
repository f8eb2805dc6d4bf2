//! Command-line argument model.
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::units;

/// Accept only names that resolve to an entry inside the unit directory.
fn parse_unit_name(name: &str) -> Result<String, String> {
    if units::is_valid_name(name) {
        Ok(name.to_string())
    } else {
        Err(format!(
            "'{name}' is not a unit file name (empty, '/', '.' and '..' are refused)"
        ))
    }
}

/// Top-level CLI entry point.
#[derive(Parser, Debug)]
#[command(
    name = "unit-provision",
    about = "Place, mask and unmask systemd unit files under a target root",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Target filesystem root
    #[arg(long, global = true, env = "UNIT_PROVISION_ROOT", default_value = "/")]
    pub root: PathBuf,

    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Place and mask every unit listed in a TOML manifest
    Apply(ApplyOpts),
    /// Write a single unit file
    Place(PlaceOpts),
    /// Mask units by linking them to /dev/null
    Mask(NamesOpts),
    /// Remove /dev/null masks
    Unmask(NamesOpts),
    /// Print where a unit would be placed
    Destination(UnitOpts),
    /// Print the machine ID recorded under the root
    MachineId,
    /// Print version information
    Version,
}

/// Options for the `apply` subcommand.
#[derive(Args, Debug, Clone)]
pub struct ApplyOpts {
    /// Path to the unit manifest
    pub manifest: PathBuf,
}

/// Unit name and placement flags.
#[derive(Args, Debug, Clone)]
pub struct UnitOpts {
    /// Unit file name, including its type suffix
    #[arg(value_parser = parse_unit_name)]
    pub name: String,

    /// Place under run/systemd instead of etc/systemd/system
    #[arg(long)]
    pub runtime: bool,

    /// Write a drop-in fragment into <name>.d/
    #[arg(long)]
    pub drop_in: bool,
}

/// Options for the `place` subcommand.
#[derive(Args, Debug, Clone)]
pub struct PlaceOpts {
    /// Unit name and placement flags.
    #[command(flatten)]
    pub unit: UnitOpts,

    /// File holding the unit content ("-" for stdin)
    #[arg(long, short = 'f')]
    pub content_file: PathBuf,
}

/// One or more unit names.
#[derive(Args, Debug, Clone)]
pub struct NamesOpts {
    /// Unit file names
    #[arg(required = true, value_parser = parse_unit_name)]
    pub names: Vec<String>,
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn root_defaults_to_slash() {
        let cli = Cli::try_parse_from(["unit-provision", "machine-id"]).unwrap();
        if std::env::var_os("UNIT_PROVISION_ROOT").is_none() {
            assert_eq!(cli.global.root, PathBuf::from("/"));
        }
    }

    #[test]
    fn parse_apply_with_root_and_dry_run() {
        let cli = Cli::parse_from([
            "unit-provision",
            "--root",
            "/mnt/target",
            "-d",
            "apply",
            "units.toml",
        ]);
        assert_eq!(cli.global.root, PathBuf::from("/mnt/target"));
        assert!(cli.global.dry_run);
        assert!(
            matches!(&cli.command, Command::Apply(opts) if opts.manifest == PathBuf::from("units.toml"))
        );
    }

    #[test]
    fn parse_place_flags() {
        let cli = Cli::parse_from([
            "unit-provision",
            "place",
            "50-eth0.network",
            "--runtime",
            "-f",
            "eth0.network",
        ]);
        let Command::Place(opts) = cli.command else {
            panic!("expected place");
        };
        assert_eq!(opts.unit.name, "50-eth0.network");
        assert!(opts.unit.runtime);
        assert!(!opts.unit.drop_in);
        assert_eq!(opts.content_file, PathBuf::from("eth0.network"));
    }

    #[test]
    fn parse_mask_many() {
        let cli = Cli::parse_from(["unit-provision", "mask", "a.service", "b.socket"]);
        let Command::Mask(opts) = cli.command else {
            panic!("expected mask");
        };
        assert_eq!(opts.names, vec!["a.service", "b.socket"]);
    }

    #[test]
    fn mask_requires_a_name() {
        assert!(Cli::try_parse_from(["unit-provision", "mask"]).is_err());
    }

    #[test]
    fn empty_or_root_names_are_refused() {
        for bad in ["", "/", ".."] {
            assert!(
                Cli::try_parse_from(["unit-provision", "mask", "a.service", bad]).is_err(),
                "mask {bad:?}"
            );
            assert!(
                Cli::try_parse_from(["unit-provision", "destination", bad]).is_err(),
                "destination {bad:?}"
            );
        }
    }

    #[test]
    fn parse_destination_drop_in() {
        let cli = Cli::parse_from(["unit-provision", "destination", "foo.service", "--drop-in"]);
        assert!(matches!(&cli.command, Command::Destination(o) if o.drop_in && !o.runtime));
    }

    #[test]
    fn parse_verbose_after_subcommand() {
        let cli = Cli::parse_from(["unit-provision", "version", "-v"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Version));
    }
}
