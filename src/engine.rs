//! Engine Module
//!
//! Routes parsed commands to the named queues.
//!
//! ## Responsibilities
//! - Resolve queue names through the Registry (creating queues lazily)
//! - Run the matching Queue operation
//! - Turn the outcome into a wire Response

use crate::error::{DeliError, Result};
use crate::protocol::{Command, Response};
use crate::queue::{Queue, Registry, RetryOutcome};

use std::sync::Arc;

/// The command engine
///
/// ## Concurrency Model
///
/// The engine itself holds no lock. Each Queue owns a Mutex taken only for
/// the length of one operation, and the Registry takes its write lock only
/// on the create-if-absent path. Connections therefore run fully in
/// parallel unless they hit the same queue at the same instant.
#[derive(Debug, Default)]
pub struct Engine {
    registry: Registry,
}

impl Engine {
    /// Create an engine with an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute a command
    ///
    /// Routes commands to appropriate handlers. `CLOSE` is a connection
    /// concern and is rejected here.
    pub fn execute(&self, command: Command) -> Result<Response> {
        match command {
            Command::Len { queue } => {
                let len = self.len(&queue);
                Ok(Response::integer(len as i64))
            }
            Command::Add {
                queue,
                retries,
                body,
            } => self.add(&queue, body, retries).map(Response::text),
            Command::Reserve { queue } => {
                let (id, body) = self.reserve(&queue)?;
                Ok(Response::text(format!("{} {}", id, body)))
            }
            Command::Retry { queue, id } => {
                self.retry(&queue, &id)?;
                Ok(Response::ok())
            }
            Command::Done { queue, id } => {
                self.done(&queue, &id)?;
                Ok(Response::ok())
            }
            Command::Close => Err(DeliError::Protocol(
                "CLOSE is handled by the connection".to_string(),
            )),
        }
    }

    /// Count unreserved items in `queue`
    pub fn len(&self, queue: &str) -> usize {
        self.queue(queue).len()
    }

    /// Add an item, returning its id
    pub fn add(&self, queue: &str, body: String, retries: u32) -> Result<String> {
        let id = self.queue(queue).add(body, retries)?;
        tracing::trace!("Added item {} to '{}' ({} retries)", id, queue, retries);
        Ok(id)
    }

    /// Reserve the next item, returning `(id, body)`
    pub fn reserve(&self, queue: &str) -> Result<(String, String)> {
        let item = self.queue(queue).reserve()?;
        tracing::trace!("Reserved item {} from '{}'", item.id(), queue);
        Ok((item.id().to_string(), item.body().to_string()))
    }

    /// Retry an item
    ///
    /// Fails with `NoSuchId` for an unknown id and `NoRetriesRemaining` when
    /// the item ran out of retries (and has been dropped).
    ///
    /// Note: earlier servers answered `No retries remaining.` for an unknown
    /// id as well. Clients that matched on that text to detect a missing id
    /// now see `No such Id.` instead.
    pub fn retry(&self, queue: &str, id: &str) -> Result<()> {
        match self.queue(queue).retry_outcome(id) {
            RetryOutcome::Requeued => Ok(()),
            RetryOutcome::Exhausted => {
                tracing::debug!("Item {} in '{}' out of retries, dropped", id, queue);
                Err(DeliError::NoRetriesRemaining)
            }
            RetryOutcome::NotFound => Err(DeliError::NoSuchId),
        }
    }

    /// Remove an item for good
    pub fn done(&self, queue: &str, id: &str) -> Result<()> {
        if self.queue(queue).done(id) {
            Ok(())
        } else {
            Err(DeliError::NoSuchId)
        }
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Resolve (or create) a queue by name
    pub fn queue(&self, name: &str) -> Arc<Queue> {
        self.registry.get_or_create(name)
    }

    /// Get the queue registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
