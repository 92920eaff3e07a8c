//! Cache CLI commands.

use clap::Subcommand;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::cache::{SizeBucket, format_bytes, summarize_thumbnail_root};
use crate::cli::output;
use crate::config;
use crate::error::WallgridError;

/// Cache subcommands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum CacheCommands {
    /// Show where thumbnails are stored and how much space each size uses.
    Info,

    /// Print the thumbnail cache directory.
    Path,
}

#[derive(Tabled)]
struct BucketRow {
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Entries")]
    entries: usize,
    #[tabled(rename = "Disk")]
    disk: String,
}

impl From<&SizeBucket> for BucketRow {
    fn from(bucket: &SizeBucket) -> Self {
        Self {
            size: bucket.label.clone(),
            entries: bucket.entries,
            disk: format_bytes(bucket.bytes),
        }
    }
}

/// Execute cache subcommands.
///
/// # Errors
///
/// Returns an error if the cache directory exists but cannot be read.
pub fn execute(cmd: &CacheCommands) -> Result<(), WallgridError> {
    let root = config::get_config().thumbnails.thumbnail_root();

    match cmd {
        CacheCommands::Path => {
            println!("{}", root.display());
        }
        CacheCommands::Info => {
            let buckets = summarize_thumbnail_root(&root)?;
            output::print_field("Root", root.display());

            if buckets.is_empty() {
                output::print_field("Entries", "none");
                return Ok(());
            }

            let entries: usize = buckets.iter().map(|bucket| bucket.entries).sum();
            let bytes: u64 = buckets.iter().map(|bucket| bucket.bytes).sum();

            let rows: Vec<BucketRow> = buckets.iter().map(BucketRow::from).collect();
            let table = Table::new(rows)
                .with(Style::rounded())
                .with(Modify::new(Columns::new(0..3)).with(Alignment::right()))
                .to_string();

            println!("{table}");
            output::print_field("Total", format!("{entries} entries, {}", format_bytes(bytes)));
        }
    }

    Ok(())
}
