//! Command definitions
//!
//! Represents commands from clients.

/// Command verbs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Len,
    Add,
    Reserve,
    Retry,
    Done,
    Close,
}

impl CommandType {
    /// The verb as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandType::Len => "LEN",
            CommandType::Add => "ADD",
            CommandType::Reserve => "RESERVE",
            CommandType::Retry => "RETRY",
            CommandType::Done => "DONE",
            CommandType::Close => "CLOSE",
        }
    }

    /// Parse a verb (case-sensitive)
    pub fn from_verb(verb: &str) -> Option<Self> {
        match verb {
            "LEN" => Some(CommandType::Len),
            "ADD" => Some(CommandType::Add),
            "RESERVE" => Some(CommandType::Reserve),
            "RETRY" => Some(CommandType::Retry),
            "DONE" => Some(CommandType::Done),
            "CLOSE" => Some(CommandType::Close),
            _ => None,
        }
    }
}

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Count unreserved items in a queue
    Len { queue: String },

    /// Append an item to a queue
    Add {
        queue: String,
        retries: u32,
        body: String,
    },

    /// Reserve the next available item
    Reserve { queue: String },

    /// Send a reserved item back to the front of the queue
    Retry { queue: String, id: String },

    /// Remove an item for good
    Done { queue: String, id: String },

    /// Close the connection (no response)
    Close,
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Len { .. } => CommandType::Len,
            Command::Add { .. } => CommandType::Add,
            Command::Reserve { .. } => CommandType::Reserve,
            Command::Retry { .. } => CommandType::Retry,
            Command::Done { .. } => CommandType::Done,
            Command::Close => CommandType::Close,
        }
    }

    /// Name of the queue the command targets, if any
    pub fn queue(&self) -> Option<&str> {
        match self {
            Command::Len { queue }
            | Command::Add { queue, .. }
            | Command::Reserve { queue }
            | Command::Retry { queue, .. }
            | Command::Done { queue, .. } => Some(queue.as_str()),
            Command::Close => None,
        }
    }
}
