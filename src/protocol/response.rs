//! Response definitions
//!
//! Represents responses to clients.

use std::fmt;

/// A response to send to client
///
/// Exactly three wire forms exist, one per variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// `+<text>`
    Text(String),

    /// `:<integer>`
    Integer(i64),

    /// `-ERR <message>`
    Failure(String),
}

impl Response {
    /// The `+OK` response
    pub fn ok() -> Self {
        Response::Text("OK".to_string())
    }

    /// Create a text response
    pub fn text(text: impl Into<String>) -> Self {
        Response::Text(text.into())
    }

    /// Create an integer response
    pub fn integer(value: i64) -> Self {
        Response::Integer(value)
    }

    /// Create an error response from anything printable
    pub fn error(message: impl fmt::Display) -> Self {
        Response::Failure(message.to_string())
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Response::Failure(_))
    }
}
