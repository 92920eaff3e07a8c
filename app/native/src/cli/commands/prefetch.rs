//! Prefetch CLI command.
//!
//! Drives a [`PrefetchWorker`] in the foreground the way a gallery UI would:
//! the handoff queue is drained on a short interval until the worker has
//! visited every relevant file.

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Args;

use super::{require_directory, resolve_size};
use crate::cli::output;
use crate::config;
use crate::error::WallgridError;
use crate::prefetch::{HandoffQueue, PrefetchOptions, PrefetchWorker, WorkerState};
use crate::thumbnail::ThumbnailCache;

/// How often the handoff queue is drained.
const DRAIN_INTERVAL: Duration = Duration::from_millis(50);

/// Arguments of `wallgrid prefetch`.
#[derive(Args, Debug)]
pub struct PrefetchArgs {
    /// The directory being browsed.
    #[arg(value_name = "DIR")]
    pub directory: PathBuf,

    /// Max dimension in pixels. Defaults to `thumbnails.defaultSize`.
    #[arg(long, short, value_name = "PIXELS")]
    pub size: Option<u32>,

    /// Give up after this many seconds. Waits until done by default.
    #[arg(long, short, value_name = "SECS")]
    pub timeout: Option<u64>,
}

/// Execute the prefetch command.
///
/// # Errors
///
/// Returns an error if the directory does not exist, the size is invalid, or
/// the worker thread cannot be started.
pub fn execute(args: &PrefetchArgs) -> Result<(), WallgridError> {
    require_directory(&args.directory)?;

    let config = config::get_config();
    let size = resolve_size(args.size, false, &config.thumbnails)?;
    let cache = Arc::new(ThumbnailCache::from_config(&config.thumbnails));
    let queue = Arc::new(HandoffQueue::new());
    let worker =
        PrefetchWorker::new(cache, Arc::clone(&queue), PrefetchOptions::from(&config.prefetch));

    let deadline = args.timeout.map(|secs| Instant::now() + Duration::from_secs(secs));
    worker.start(&args.directory, size)?;

    let mut warmed = 0usize;
    let mut timed_out = false;
    loop {
        warmed += print_handoffs(&queue);

        if worker.state() == WorkerState::IdleWaiting {
            break;
        }
        if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            timed_out = true;
            break;
        }

        thread::sleep(DRAIN_INTERVAL);
    }

    worker.stop();
    worker.join();
    warmed += print_handoffs(&queue);

    if timed_out {
        output::print_warning(&format!("Timed out after warming {warmed} files"));
    } else {
        output::print_success(&format!("Warmed {warmed} files at {size}"));
    }

    Ok(())
}

/// Prints every queued path, returning how many there were.
fn print_handoffs(queue: &HandoffQueue) -> usize {
    let paths = queue.drain();
    for path in &paths {
        println!("{}", path.display());
    }
    paths.len()
}
