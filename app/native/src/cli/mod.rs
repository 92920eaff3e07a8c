//! CLI module for Wallgrid.
//!
//! A thin host around the library: fetch one thumbnail through the cache,
//! prefetch a directory in the background, and inspect the on-disk cache.

mod commands;
mod output;

use clap::Parser;
pub use commands::Cli;

use crate::error::WallgridError;

/// Runs the CLI.
///
/// Parses command-line arguments, installs logging and executes the command.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn run() -> Result<(), WallgridError> {
    let cli = Cli::parse();
    crate::logging::init(cli.verbose);
    cli.execute()
}
