//! CLI command definitions using Clap.
//!
//! Commands are organized into domain-specific submodules:
//!
//! - `thumbnail` - Fetch a single image through the cache
//! - `prefetch` - Warm the cache for a directory in the background
//! - `cache` - Inspect the on-disk thumbnail cache
//! - `config_cmd` - Locate and print the configuration

use std::io;
use std::path::Path;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};

use crate::config::{self, ThumbnailConfig};
use crate::error::WallgridError;
use crate::thumbnail::ThumbnailSize;

pub mod cache;
pub mod config_cmd;
pub mod prefetch;
pub mod thumbnail;

pub use cache::CacheCommands;
pub use config_cmd::ConfigCommands;
pub use prefetch::PrefetchArgs;
pub use thumbnail::ThumbnailArgs;

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Wallgrid CLI - thumbnail cache and background prefetcher for image galleries.
#[derive(Parser, Debug)]
#[command(name = "wallgrid")]
#[command(author, version = APP_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a custom configuration file.
    ///
    /// Overrides the default configuration file search paths.
    /// Supports JSONC format (JSON with comments).
    #[arg(long, short, global = true, value_name = "PATH")]
    pub config: Option<String>,

    /// Log debug output to stderr (overridden by `WALLGRID_LOG` / `RUST_LOG`).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum Commands {
    /// Produce one image through the cache.
    ///
    /// Prints the resulting dimensions, the cache key and where the thumbnail
    /// is stored on disk.
    Thumbnail(ThumbnailArgs),

    /// Warm the cache for a directory.
    ///
    /// Runs the background worker over the directory, its parent and its
    /// immediate subdirectories, printing each path as it is warmed.
    Prefetch(PrefetchArgs),

    /// Thumbnail cache inspection commands.
    #[command(subcommand)]
    Cache(CacheCommands),

    /// Configuration file commands.
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions.
    ///
    /// Usage:
    ///   eval "$(wallgrid completions --shell zsh)"
    Completions {
        /// The shell to generate completions for.
        #[arg(long, short, value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Execute the parsed command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file passed with `--config` does
    /// not exist or if the command fails.
    pub fn execute(&self) -> Result<(), WallgridError> {
        if let Some(ref path) = self.config {
            let path_buf = crate::platform::path::expand(path);
            if !path_buf.is_file() {
                return Err(WallgridError::Config(format!(
                    "Configuration file not found: {path}"
                )));
            }
            config::set_custom_config_path(path_buf);
        }

        match &self.command {
            Commands::Thumbnail(args) => thumbnail::execute(args),
            Commands::Prefetch(args) => prefetch::execute(args),
            Commands::Cache(cmd) => cache::execute(cmd),
            Commands::Config(cmd) => config_cmd::execute(cmd),
            Commands::Completions { shell } => {
                Self::print_completions(*shell);
                Ok(())
            }
        }
    }

    fn print_completions<G: Generator>(generator: G) {
        let mut cmd = Self::command();
        generate(generator, &mut cmd, "wallgrid", &mut io::stdout());
    }
}

/// Picks the requested size: `--original`, then `--size`, then the configured default.
pub(super) fn resolve_size(
    size: Option<u32>,
    original: bool,
    config: &ThumbnailConfig,
) -> Result<ThumbnailSize, WallgridError> {
    if original {
        return Ok(ThumbnailSize::Original);
    }

    match size {
        Some(pixels) => ThumbnailSize::max(pixels).ok_or_else(|| {
            WallgridError::InvalidArguments("--size must be greater than zero".to_string())
        }),
        None => Ok(config.default_thumbnail_size()),
    }
}

/// Rejects anything that is not an existing directory.
pub(super) fn require_directory(path: &Path) -> Result<(), WallgridError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(WallgridError::InvalidArguments(format!("Not a directory: {}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_cli_parses_thumbnail_with_size() {
        let cli = Cli::try_parse_from(["wallgrid", "thumbnail", "a.png", "--size", "128"]).unwrap();
        match cli.command {
            Commands::Thumbnail(args) => {
                assert_eq!(args.path, PathBuf::from("a.png"));
                assert_eq!(args.size, Some(128));
                assert!(!args.original);
            }
            _ => panic!("Expected Thumbnail command"),
        }
    }

    #[test]
    fn test_cli_rejects_size_with_original() {
        let result =
            Cli::try_parse_from(["wallgrid", "thumbnail", "a.png", "--size", "64", "--original"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parses_prefetch_with_timeout() {
        let cli =
            Cli::try_parse_from(["wallgrid", "prefetch", "/pics", "--timeout", "5", "-v"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Prefetch(args) => {
                assert_eq!(args.directory, PathBuf::from("/pics"));
                assert_eq!(args.timeout, Some(5));
                assert_eq!(args.size, None);
            }
            _ => panic!("Expected Prefetch command"),
        }
    }

    #[test]
    fn test_cli_parses_cache_info() {
        let cli = Cli::try_parse_from(["wallgrid", "cache", "info"]).unwrap();
        assert!(matches!(cli.command, Commands::Cache(CacheCommands::Info)));
    }

    #[test]
    fn test_cli_parses_global_config_after_subcommand() {
        let args = ["wallgrid", "config", "path", "--config", "/tmp/c.jsonc"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config.as_deref(), Some("/tmp/c.jsonc"));
        assert!(matches!(cli.command, Commands::Config(ConfigCommands::Path)));
    }

    #[test]
    fn test_cli_parses_completions() {
        let cli = Cli::try_parse_from(["wallgrid", "completions", "--shell", "bash"]).unwrap();
        match cli.command {
            Commands::Completions { shell } => assert_eq!(shell, Shell::Bash),
            _ => panic!("Expected Completions command"),
        }
    }

    #[test]
    fn test_resolve_size_prefers_original() {
        let config = ThumbnailConfig::default();
        assert_eq!(resolve_size(Some(64), true, &config).unwrap(), ThumbnailSize::Original);
    }

    #[test]
    fn test_resolve_size_falls_back_to_config() {
        let config = ThumbnailConfig { default_size: 96, ..Default::default() };
        assert_eq!(resolve_size(None, false, &config).unwrap(), ThumbnailSize::max(96).unwrap());
    }

    #[test]
    fn test_resolve_size_rejects_zero() {
        let config = ThumbnailConfig::default();
        let err = resolve_size(Some(0), false, &config).unwrap_err();
        assert!(matches!(err, WallgridError::InvalidArguments(_)));
    }

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }
}
