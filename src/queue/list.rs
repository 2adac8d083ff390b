//! Queue implementation
//!
//! VecDeque of items behind a single Mutex. Every operation takes the lock
//! for the duration of its scan/mutation only.

use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::error::{DeliError, Result};
use super::{Item, RetryOutcome};

/// An ordered, lock-guarded collection of items
///
/// New items go to the back. Retried items go to the front so they are
/// redelivered first. Reservation is a flag on the item, not a lease: an
/// item reserved by a consumer that never calls `done`/`retry` stays
/// reserved for the life of the process.
#[derive(Debug, Default)]
pub struct Queue {
    items: Mutex<VecDeque<Item>>,
}

impl Queue {
    /// Create a new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new item to the back of the queue, returning its id
    pub fn add(&self, body: impl Into<String>, retries: u32) -> Result<String> {
        // Validate before taking the lock so a bad body never touches state
        let item = Item::new(body, retries)?;
        let id = item.id().to_string();

        self.items.lock().push_back(item);
        Ok(id)
    }

    /// Reserve the first unreserved item in queue order
    ///
    /// Returns a snapshot of the reserved item.
    pub fn reserve(&self) -> Result<Item> {
        let mut items = self.items.lock();

        let item = items
            .iter_mut()
            .find(|item| !item.is_reserved())
            .ok_or(DeliError::EmptyQueue)?;

        item.reserve();
        Ok(item.clone())
    }

    /// Remove the item with `id` whether or not it is reserved
    ///
    /// Returns whether an item was removed.
    pub fn done(&self, id: &str) -> bool {
        let mut items = self.items.lock();

        match position(&items, id) {
            Some(index) => {
                items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Retry the item with `id`
    ///
    /// Returns false if the item is unknown or was out of retries. In the
    /// latter case the item has been removed from the queue.
    pub fn retry(&self, id: &str) -> bool {
        self.retry_outcome(id) == RetryOutcome::Requeued
    }

    /// Retry the item with `id`, reporting exactly what happened
    pub fn retry_outcome(&self, id: &str) -> RetryOutcome {
        let mut items = self.items.lock();

        let Some(index) = position(&items, id) else {
            return RetryOutcome::NotFound;
        };

        if !items[index].decrement_retries() {
            items.remove(index);
            return RetryOutcome::Exhausted;
        }

        if let Some(mut item) = items.remove(index) {
            item.release();
            items.push_front(item);
        }
        RetryOutcome::Requeued
    }

    /// Count of unreserved items
    pub fn len(&self) -> usize {
        self.items.lock().iter().filter(|item| !item.is_reserved()).count()
    }

    /// True when no unreserved items are available
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Count of all items, reserved or not
    pub fn total_len(&self) -> usize {
        self.items.lock().len()
    }

    /// Count of items currently held by consumers
    pub fn reserved_len(&self) -> usize {
        self.items.lock().iter().filter(|item| item.is_reserved()).count()
    }
}

fn position(items: &VecDeque<Item>, id: &str) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}
