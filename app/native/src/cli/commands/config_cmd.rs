//! Config CLI commands.

use clap::Subcommand;

use crate::config::{self, config_paths};
use crate::error::WallgridError;

/// Config commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum ConfigCommands {
    /// Show the path to the configuration file.
    ///
    /// Displays the paths where Wallgrid looks for configuration files,
    /// and indicates which one is currently in use (if any).
    Path,

    /// Print the effective configuration as JSON.
    Show,
}

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the configuration cannot be serialized.
pub fn execute(cmd: &ConfigCommands) -> Result<(), WallgridError> {
    match cmd {
        ConfigCommands::Path => {
            show_config_path();
            Ok(())
        }
        ConfigCommands::Show => {
            let json = serde_json::to_string_pretty(config::get_config())
                .map_err(|err| WallgridError::Config(err.to_string()))?;
            println!("{json}");
            Ok(())
        }
    }
}

/// Show the configuration file path.
fn show_config_path() {
    config::init();

    if let Some(path) = config::get_config_path() {
        println!("{}", path.display());
        return;
    }

    println!("No configuration file found. Searched (in priority order):\n");
    for (i, path) in config_paths().iter().enumerate() {
        println!("  {}. {}", i + 1, path.display());
    }
}
