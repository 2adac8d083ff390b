//! Queue Module
//!
//! In-memory work queues.
//!
//! ## Responsibilities
//! - Hold items in delivery order (new at the back, retried at the front)
//! - Hand each unreserved item to exactly one consumer at a time
//! - Track retry budgets and drop items that run out
//! - Resolve queue names to queues, creating them lazily
//!
//! ## Known Limitation
//! Reservations never expire. A consumer that disconnects without sending
//! `DONE` or `RETRY` leaves its item reserved (and invisible to `LEN` and
//! `RESERVE`) until the process exits.

mod item;
mod list;
mod registry;

pub use item::Item;
pub use list::Queue;
pub use registry::Registry;

/// Result of retrying an item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryOutcome {
    /// Retry budget decremented, item released and moved to the front
    Requeued,

    /// No retries left; the item has been removed
    Exhausted,

    /// No item with that id
    NotFound,
}
