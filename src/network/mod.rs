//! Network Module
//!
//! TCP server and client handling.
//!
//! ## Architecture
//! - Single acceptor loop
//! - One thread per connection, running until the client leaves
//! - Commands routed through Engine; queue locks are the only shared
//!   synchronization between connections

mod server;
mod connection;

pub use server::{Server, ShutdownHandle};
pub use connection::Connection;
