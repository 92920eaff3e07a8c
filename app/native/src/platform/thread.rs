//! Named background threads.

use std::io;
use std::thread::{self, JoinHandle};

use crate::constants::APP_ID;

/// Spawns a thread named `wallgrid-{name}` running `task`.
///
/// # Errors
///
/// Returns the OS error if the thread could not be created. The failure is also
/// logged so fire-and-forget callers still leave a trace.
pub fn spawn_named_thread<F>(name: &str, task: F) -> io::Result<JoinHandle<()>>
where F: FnOnce() + Send + 'static {
    let thread_name = format!("{APP_ID}-{name}");

    thread::Builder::new().name(thread_name.clone()).spawn(task).inspect_err(|err| {
        tracing::error!(thread = %thread_name, error = %err, "failed to spawn thread");
    })
}
