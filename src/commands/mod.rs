//! Top-level subcommand orchestration.
pub mod apply;
pub mod process;
pub mod unit;
pub mod version;

use anyhow::Result;

use crate::cli::{Cli, Command};
use crate::logging::Logger;

/// Dispatch a parsed command line to its subcommand.
///
/// # Errors
///
/// Returns the error of the subcommand that ran.
pub fn run(args: &Cli, log: &Logger) -> Result<()> {
    let global = &args.global;
    match &args.command {
        Command::Apply(opts) => apply::run(global, opts, log),
        Command::Place(opts) => unit::place(global, opts, log),
        Command::Mask(opts) => unit::mask(global, opts, log),
        Command::Unmask(opts) => unit::unmask(global, opts, log),
        Command::Destination(opts) => {
            unit::destination(global, opts);
            Ok(())
        }
        Command::MachineId => unit::machine_id(global),
        Command::Version => {
            version::run();
            Ok(())
        }
    }
}
