//! # deliq
//!
//! An in-memory, network-accessible work queue:
//! - Producers add items to named queues
//! - Consumers reserve an item for exclusive processing
//! - Consumers then mark it done or send it back for a retry
//! - Line-based TCP protocol (a small subset of Redis RESP)
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TCP Server                              │
//! │              (one thread per connection)                     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  line in / response out
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  Protocol Codec                              │
//! │          (Command parse, Response encode)                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Engine                                  │
//! │                 (command dispatch)                           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────▼────────────┐
//!          │        Registry         │
//!          │  (name -> Queue, RwLock)│
//!          └────────────┬────────────┘
//!                       │
//!                       ▼
//!                ┌─────────────┐
//!                │    Queue    │
//!                │   (Mutex)   │
//!                └─────────────┘
//! ```
//!
//! State is volatile: everything is lost when the process exits.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod queue;
pub mod protocol;
pub mod engine;
pub mod network;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{DeliError, Result};
pub use config::Config;
pub use engine::Engine;
pub use client::Client;

use std::sync::Arc;

use network::Server;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of deliq
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Serve a fresh set of queues on `port` (all interfaces) until the
/// listener fails
pub fn run(port: u16) -> Result<()> {
    let config = Config::builder().port(port).build();
    let server = Server::bind(config, Arc::new(Engine::new()))?;
    server.run()
}
