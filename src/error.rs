//! Error types for deliq
//!
//! Provides a unified error type for all operations. The `Display` text of
//! the validation and not-found variants is exactly what clients see after
//! `-ERR ` on the wire.

use thiserror::Error;

/// Result type alias using DeliError
pub type Result<T> = std::result::Result<T, DeliError>;

/// Unified error type for deliq operations
#[derive(Debug, Error)]
pub enum DeliError {
    // -------------------------------------------------------------------------
    // Validation Errors
    // -------------------------------------------------------------------------
    #[error("No body provided.")]
    EmptyBody,

    #[error("Missing {0} parameters.")]
    MissingParameters(&'static str),

    #[error("Invalid number of retries.")]
    InvalidRetries,

    #[error("Unrecognized command.")]
    UnrecognizedCommand,

    // -------------------------------------------------------------------------
    // Queue State Errors
    // -------------------------------------------------------------------------
    #[error("No items available to reserve.")]
    EmptyQueue,

    #[error("No such Id.")]
    NoSuchId,

    #[error("No retries remaining.")]
    NoRetriesRemaining,

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Network Errors
    // -------------------------------------------------------------------------
    #[error("Network error: {0}")]
    Network(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    /// An error line from the server that maps to no known variant
    #[error("Server error: {0}")]
    Server(String),

    /// A client argument that cannot be sent as one protocol line
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl DeliError {
    /// Map the message of a `-ERR` line back to a typed error.
    ///
    /// Used on the client side so callers can match on variants instead of
    /// comparing strings.
    pub fn from_server_message(message: &str) -> Self {
        match message {
            "No body provided." => DeliError::EmptyBody,
            "Invalid number of retries." => DeliError::InvalidRetries,
            "Unrecognized command." => DeliError::UnrecognizedCommand,
            "No items available to reserve." => DeliError::EmptyQueue,
            "No such Id." => DeliError::NoSuchId,
            "No retries remaining." => DeliError::NoRetriesRemaining,
            other => match other
                .strip_prefix("Missing ")
                .and_then(|rest| rest.strip_suffix(" parameters."))
                .and_then(known_verb)
            {
                Some(verb) => DeliError::MissingParameters(verb),
                None => DeliError::Server(other.to_string()),
            },
        }
    }

    /// True for errors that are reported to the client and leave the
    /// connection open.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            DeliError::Io(_) | DeliError::Network(_) | DeliError::InvalidArgument(_)
        )
    }
}

fn known_verb(verb: &str) -> Option<&'static str> {
    match verb {
        "LEN" => Some("LEN"),
        "ADD" => Some("ADD"),
        "RESERVE" => Some("RESERVE"),
        "RETRY" => Some("RETRY"),
        "DONE" => Some("DONE"),
        _ => None,
    }
}
