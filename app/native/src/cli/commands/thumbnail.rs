//! Thumbnail CLI command.

use std::path::PathBuf;

use clap::Args;

use super::resolve_size;
use crate::cli::output;
use crate::config;
use crate::error::WallgridError;
use crate::thumbnail::ThumbnailCache;

/// Arguments of `wallgrid thumbnail`.
#[derive(Args, Debug)]
#[command(after_long_help = r#"Examples:
  wallgrid thumbnail ~/Pictures/sunset.jpg             # Configured default size
  wallgrid thumbnail sunset.jpg --size 512 -o out.png  # 512px, saved to out.png
  wallgrid thumbnail sunset.jpg --original             # Decode at full size"#)]
pub struct ThumbnailArgs {
    /// The source image.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Max dimension in pixels. Defaults to `thumbnails.defaultSize`.
    #[arg(long, short, value_name = "PIXELS", conflicts_with = "original")]
    pub size: Option<u32>,

    /// Decode the image at its own dimensions instead of a thumbnail size.
    #[arg(long)]
    pub original: bool,

    /// Also write the resulting image to this file (format from the extension).
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Execute the thumbnail command.
///
/// # Errors
///
/// Returns an error if the size is invalid, the image cannot be produced, or
/// the output file cannot be written.
pub fn execute(args: &ThumbnailArgs) -> Result<(), WallgridError> {
    let config = config::get_config();
    let size = resolve_size(args.size, args.original, &config.thumbnails)?;
    let cache = ThumbnailCache::from_config(&config.thumbnails);

    let image = cache.get(&args.path, size)?;
    let key = cache.key_for(&args.path, size)?;

    output::print_heading(&args.path.display().to_string());
    output::print_field("Size", size);
    output::print_field("Pixels", format!("{}x{}", image.width(), image.height()));
    output::print_field("Key", &key);
    match cache.disk_path(&key, size) {
        Some(entry) => output::print_field("Cached at", entry.display()),
        None => output::print_field("Cached at", "memory only"),
    }

    if let Some(ref destination) = args.output {
        image.save(destination)?;
        output::print_success(&format!("Saved to {}", destination.display()));
    }

    Ok(())
}
