//! FIFO of paths the worker has finished warming.

use std::collections::VecDeque;
use std::path::PathBuf;

use parking_lot::Mutex;

/// Thread-safe queue between the prefetch worker (producer) and a consumer
/// that materializes display items for warmed paths.
///
/// Popping never blocks; an empty queue is a normal condition.
#[derive(Debug, Default)]
pub struct HandoffQueue {
    items: Mutex<VecDeque<PathBuf>>,
}

impl HandoffQueue {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    pub fn push(&self, path: PathBuf) { self.items.lock().push_back(path); }

    /// Removes and returns the oldest path, or `None` if the queue is empty.
    #[must_use]
    pub fn try_pop(&self) -> Option<PathBuf> { self.items.lock().pop_front() }

    /// Removes and returns every queued path, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<PathBuf> { self.items.lock().drain(..).collect() }

    #[must_use]
    pub fn len(&self) -> usize { self.items.lock().len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.items.lock().is_empty() }
}
