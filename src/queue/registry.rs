//! Queue registry
//!
//! Name to queue directory. Queues are created on first reference and never
//! removed.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::Queue;

/// Process-wide mapping of queue names to queues
#[derive(Debug, Default)]
pub struct Registry {
    queues: RwLock<HashMap<String, Arc<Queue>>>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the queue called `name`, creating it if it does not exist
    ///
    /// Concurrent callers asking for the same unseen name all receive the
    /// same queue.
    pub fn get_or_create(&self, name: &str) -> Arc<Queue> {
        if let Some(queue) = self.queues.read().get(name) {
            return Arc::clone(queue);
        }

        // Re-check under the write lock: another caller may have won the race
        let mut queues = self.queues.write();
        let queue = queues.entry(name.to_string()).or_insert_with(|| {
            tracing::debug!("Creating queue '{}'", name);
            Arc::new(Queue::new())
        });
        Arc::clone(queue)
    }

    /// Look up an existing queue without creating it
    pub fn get(&self, name: &str) -> Option<Arc<Queue>> {
        self.queues.read().get(name).cloned()
    }

    /// Number of known queues
    pub fn len(&self) -> usize {
        self.queues.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.read().is_empty()
    }

    /// Sorted names of all known queues
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.queues.read().keys().cloned().collect();
        names.sort();
        names
    }
}
