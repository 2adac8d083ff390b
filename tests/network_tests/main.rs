//! Network Tests
//!
//! Runs a real server on an ephemeral port and drives it over TCP, both with
//! raw protocol lines and through `Client`.

mod server_tests;
mod client_tests;
