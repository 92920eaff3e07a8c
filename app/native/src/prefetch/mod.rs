//! Background prefetching of thumbnails.
//!
//! A [`PrefetchWorker`] owns one thread that walks the files relevant to a
//! (directory, size) target, warms each one through the shared
//! [`ThumbnailCache`], and pushes the warmed path onto a [`HandoffQueue`].
//!
//! The worker never competes with foreground work it was told to yield to:
//! [`PrefetchWorker::pause`] closes a gate that is checked before every file,
//! and [`PrefetchWorker::resume`] continues the same pass where it stopped.
//! Changing the target abandons the current pass; once
//! [`PrefetchWorker::set_target`] returns, no path from the old target is
//! handed off anymore.

mod gate;
mod queue;
mod scan;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

use parking_lot::{Condvar, Mutex};
use thiserror::Error;

pub use self::gate::PauseGate;
pub use self::queue::HandoffQueue;
pub use self::scan::relevant_files;
use crate::config::PrefetchConfig;
use crate::platform::thread::spawn_named_thread;
pub use crate::thumbnail::processing::list_image_files;
use crate::thumbnail::{ThumbnailCache, ThumbnailSize};

/// What the worker thread is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// Warming the files of the current pass.
    Scanning,
    /// Every relevant file has been visited; waiting for a new target.
    IdleWaiting,
    /// Blocked on the pause gate.
    Paused,
    /// Not running: either never started or terminated.
    Stopped,
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Scanning => "scanning",
            Self::IdleWaiting => "idle",
            Self::Paused => "paused",
            Self::Stopped => "stopped",
        };
        f.write_str(label)
    }
}

/// The directory being browsed and the size it is displayed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefetchTarget {
    pub directory: PathBuf,
    pub size: ThumbnailSize,
}

/// Shortest idle wait, so an idle worker never spins.
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Tuning knobs for a [`PrefetchWorker`].
#[derive(Debug, Clone)]
pub struct PrefetchOptions {
    /// Upper bound on how long an idle worker waits before re-checking its target.
    pub poll_interval: Duration,
    /// Extensions (lowercase, no dot) of the files worth warming.
    pub extensions: Vec<String>,
}

impl PrefetchOptions {
    /// The idle wait actually used: `poll_interval`, but never below 1 ms.
    #[must_use]
    pub fn idle_wait(&self) -> Duration { self.poll_interval.max(MIN_POLL_INTERVAL) }
}

impl Default for PrefetchOptions {
    fn default() -> Self { Self::from(&PrefetchConfig::default()) }
}

impl From<&PrefetchConfig> for PrefetchOptions {
    fn from(config: &PrefetchConfig) -> Self {
        Self {
            poll_interval: config.poll_interval(),
            extensions: config.extensions.iter().map(|ext| ext.to_lowercase()).collect(),
        }
    }
}

/// Errors returned by [`PrefetchWorker::start`].
#[derive(Debug, Error)]
pub enum PrefetchError {
    #[error("prefetch worker has already been started")]
    AlreadyStarted,

    #[error("failed to spawn prefetch thread: {0}")]
    Spawn(#[source] std::io::Error),
}

/// State shared between the worker handle and its thread.
struct Shared {
    cache: Arc<ThumbnailCache>,
    queue: Arc<HandoffQueue>,
    options: PrefetchOptions,
    target: Mutex<Option<PrefetchTarget>>,
    /// Signalled whenever the target changes, on stop, and on pause.
    wake: Condvar,
    gate: PauseGate,
    stopping: AtomicBool,
    state: Mutex<WorkerState>,
}

impl Shared {
    fn is_stopping(&self) -> bool { self.stopping.load(Ordering::SeqCst) }

    fn set_state(&self, state: WorkerState) { *self.state.lock() = state; }

    fn notify(&self) {
        // Taken so a waiter between its checks and `wait_for` cannot miss the signal.
        let _target = self.target.lock();
        self.wake.notify_all();
    }

    /// Blocks while paused. Reports `resumed_state` once through the gate.
    fn pass_gate(&self, resumed_state: WorkerState) {
        if self.gate.pass(|| self.set_state(WorkerState::Paused)) {
            tracing::debug!("prefetch resumed");
            self.set_state(resumed_state);
        }
    }

    fn is_current(&self, snapshot: &PrefetchTarget) -> bool {
        self.target.lock().as_ref() == Some(snapshot)
    }

    fn run(&self) {
        tracing::debug!("prefetch worker started");

        'passes: while !self.is_stopping() {
            let Some(snapshot) = self.target.lock().clone() else {
                break;
            };

            self.set_state(WorkerState::Scanning);
            let files = relevant_files(&snapshot.directory, &self.options.extensions);
            tracing::debug!(
                directory = %snapshot.directory.display(),
                size = %snapshot.size,
                files = files.len(),
                "prefetch pass started"
            );

            for path in files {
                self.pass_gate(WorkerState::Scanning);
                if self.is_stopping() {
                    break 'passes;
                }
                if !self.is_current(&snapshot) {
                    tracing::debug!("prefetch target changed, abandoning pass");
                    continue 'passes;
                }

                if let Err(err) = self.cache.get(&path, snapshot.size) {
                    tracing::debug!(path = %path.display(), error = %err, "prefetch skipped file");
                    continue;
                }

                let target = self.target.lock();
                if target.as_ref() != Some(&snapshot) {
                    continue 'passes;
                }
                self.queue.push(path);
                drop(target);
            }

            if !self.idle(&snapshot) {
                break;
            }
        }

        self.set_state(WorkerState::Stopped);
        tracing::debug!("prefetch worker stopped");
    }

    /// Waits until the target differs from `snapshot`. Returns `false` on stop.
    fn idle(&self, snapshot: &PrefetchTarget) -> bool {
        self.set_state(WorkerState::IdleWaiting);

        loop {
            self.pass_gate(WorkerState::IdleWaiting);

            let mut target = self.target.lock();
            if self.is_stopping() {
                return false;
            }
            if target.as_ref() != Some(snapshot) {
                return true;
            }
            if !self.gate.is_open() {
                continue;
            }

            self.wake.wait_for(&mut target, self.options.idle_wait());
        }
    }
}

/// Handle to the background prefetch thread.
///
/// Dropping the handle stops the thread without waiting for it.
pub struct PrefetchWorker {
    shared: Arc<Shared>,
    handle: Mutex<Option<JoinHandle<()>>>,
    started: AtomicBool,
}

impl PrefetchWorker {
    /// Creates a worker that warms `cache` and hands warmed paths to `queue`.
    ///
    /// The thread is not spawned until [`PrefetchWorker::start`].
    #[must_use]
    pub fn new(
        cache: Arc<ThumbnailCache>,
        queue: Arc<HandoffQueue>,
        options: PrefetchOptions,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                cache,
                queue,
                options,
                target: Mutex::new(None),
                wake: Condvar::new(),
                gate: PauseGate::new(),
                stopping: AtomicBool::new(false),
                state: Mutex::new(WorkerState::Stopped),
            }),
            handle: Mutex::new(None),
            started: AtomicBool::new(false),
        }
    }

    /// Sets the initial target and spawns the worker thread.
    ///
    /// A worker paused before being started begins in the paused state.
    ///
    /// # Errors
    ///
    /// Returns [`PrefetchError::AlreadyStarted`] on a second call and
    /// [`PrefetchError::Spawn`] if the OS refuses to create the thread.
    pub fn start(
        &self,
        directory: impl Into<PathBuf>,
        size: ThumbnailSize,
    ) -> Result<(), PrefetchError> {
        self.start_with(directory.into(), size, |task| spawn_named_thread("prefetch", task))
    }

    /// [`PrefetchWorker::start`] with the thread spawner supplied by the caller.
    fn start_with<F>(
        &self,
        directory: PathBuf,
        size: ThumbnailSize,
        spawn: F,
    ) -> Result<(), PrefetchError>
    where
        F: FnOnce(Box<dyn FnOnce() + Send>) -> std::io::Result<JoinHandle<()>>,
    {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(PrefetchError::AlreadyStarted);
        }

        *self.shared.target.lock() = Some(PrefetchTarget { directory, size });
        self.shared.set_state(WorkerState::Scanning);

        let shared = Arc::clone(&self.shared);
        let handle = spawn(Box::new(move || shared.run())).map_err(|err| {
            self.shared.set_state(WorkerState::Stopped);
            self.started.store(false, Ordering::SeqCst);
            PrefetchError::Spawn(err)
        })?;

        *self.handle.lock() = Some(handle);
        Ok(())
    }

    /// Closes the gate. The worker stops before its next file.
    pub fn pause(&self) {
        self.shared.gate.close();
        self.shared.notify();
    }

    /// Opens the gate. The worker continues its pass where it stopped.
    pub fn resume(&self) { self.shared.gate.open(); }

    #[must_use]
    pub fn is_paused(&self) -> bool { !self.shared.gate.is_open() }

    /// Points the worker at a new directory and/or size.
    ///
    /// Setting the current target again is a no-op and does not restart the pass.
    pub fn set_target(&self, directory: impl Into<PathBuf>, size: ThumbnailSize) {
        let target = PrefetchTarget { directory: directory.into(), size };
        let mut current = self.shared.target.lock();
        if current.as_ref() == Some(&target) {
            return;
        }

        tracing::debug!(
            directory = %target.directory.display(),
            size = %target.size,
            "prefetch target changed"
        );
        *current = Some(target);
        self.shared.wake.notify_all();
    }

    /// Returns the current target, if one has been set.
    #[must_use]
    pub fn target(&self) -> Option<PrefetchTarget> { self.shared.target.lock().clone() }

    #[must_use]
    pub fn state(&self) -> WorkerState { *self.shared.state.lock() }

    /// Asks the worker to terminate at its next check. Does not wait.
    ///
    /// Opens the gate so a paused worker can observe the request.
    pub fn stop(&self) {
        self.shared.stopping.store(true, Ordering::SeqCst);
        self.shared.gate.open();
        self.shared.notify();
    }

    /// Waits for the worker thread to finish. Call [`PrefetchWorker::stop`] first.
    pub fn join(&self) {
        let handle = self.handle.lock().take();
        if let Some(handle) = handle
            && handle.join().is_err()
        {
            tracing::error!("prefetch thread panicked");
        }
    }

    /// Returns the cache this worker warms.
    #[must_use]
    pub fn cache(&self) -> &Arc<ThumbnailCache> { &self.shared.cache }

    /// Returns the queue warmed paths are pushed onto.
    #[must_use]
    pub fn queue(&self) -> &Arc<HandoffQueue> { &self.shared.queue }
}

impl Drop for PrefetchWorker {
    fn drop(&mut self) { self.stop(); }
}

impl fmt::Debug for PrefetchWorker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefetchWorker")
            .field("target", &self.target())
            .field("state", &self.state())
            .field("paused", &self.is_paused())
            .finish_non_exhaustive()
    }
}
