//! Blocking client
//!
//! Talks to a deliq server over one TCP connection. Error lines from the
//! server come back as typed `DeliError` variants.

use std::io::{BufReader, BufWriter};
use std::net::{TcpStream, ToSocketAddrs};

use crate::error::{DeliError, Result};
use crate::protocol::{read_response, write_command, Command, Response};

/// A connection to a deliq server
pub struct Client {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
}

impl Client {
    /// Connect to a server
    pub fn connect(addr: impl ToSocketAddrs) -> Result<Self> {
        let stream = TcpStream::connect(addr)
            .map_err(|e| DeliError::Network(format!("failed to connect: {}", e)))?;
        stream.set_nodelay(true)?;

        let read_stream = stream.try_clone()?;
        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(stream),
        })
    }

    /// Number of unreserved items in `queue`
    pub fn len(&mut self, queue: &str) -> Result<usize> {
        let response = self.call(&Command::Len {
            queue: queue.to_string(),
        })?;

        match response {
            Response::Integer(n) => usize::try_from(n)
                .map_err(|_| DeliError::Protocol(format!("negative length: {}", n))),
            other => Err(unexpected(other)),
        }
    }

    /// Add an item, returning its id
    pub fn add(&mut self, queue: &str, body: &str, retries: u32) -> Result<String> {
        self.call_text(&Command::Add {
            queue: queue.to_string(),
            retries,
            body: body.to_string(),
        })
    }

    /// Reserve the next item, returning `(id, body)`
    pub fn reserve(&mut self, queue: &str) -> Result<(String, String)> {
        let text = self.call_text(&Command::Reserve {
            queue: queue.to_string(),
        })?;

        match text.split_once(' ') {
            Some((id, body)) => Ok((id.to_string(), body.to_string())),
            None => Err(DeliError::Protocol(format!(
                "malformed RESERVE reply: {:?}",
                text
            ))),
        }
    }

    /// Send a reserved item back for another attempt
    pub fn retry(&mut self, queue: &str, id: &str) -> Result<()> {
        self.call_text(&Command::Retry {
            queue: queue.to_string(),
            id: id.to_string(),
        })
        .map(drop)
    }

    /// Mark an item as finished
    pub fn done(&mut self, queue: &str, id: &str) -> Result<()> {
        self.call_text(&Command::Done {
            queue: queue.to_string(),
            id: id.to_string(),
        })
        .map(drop)
    }

    /// Tell the server to close the connection
    pub fn close(mut self) -> Result<()> {
        write_command(&mut self.writer, &Command::Close)
    }

    fn call(&mut self, command: &Command) -> Result<Response> {
        check_arguments(command)?;
        write_command(&mut self.writer, command)?;

        match read_response(&mut self.reader)? {
            Response::Failure(message) => Err(DeliError::from_server_message(&message)),
            response => Ok(response),
        }
    }

    fn call_text(&mut self, command: &Command) -> Result<String> {
        match self.call(command)? {
            Response::Text(text) => Ok(text),
            other => Err(unexpected(other)),
        }
    }
}

/// Reject arguments that would not arrive as the same single request line
///
/// Nothing is written when this fails, so the connection stays in step.
fn check_arguments(command: &Command) -> Result<()> {
    if let Some(queue) = command.queue() {
        check_token("queue name", queue)?;
    }

    match command {
        Command::Add { body, .. } if body.contains(['\r', '\n']) => Err(
            DeliError::InvalidArgument("body must not contain line breaks".to_string()),
        ),
        Command::Retry { id, .. } | Command::Done { id, .. } => check_token("id", id),
        _ => Ok(()),
    }
}

fn check_token(what: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(DeliError::InvalidArgument(format!("{} must not be empty", what)));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(DeliError::InvalidArgument(format!(
            "{} must not contain whitespace: {:?}",
            what, value
        )));
    }
    Ok(())
}

fn unexpected(response: Response) -> DeliError {
    DeliError::Protocol(format!("unexpected response: {:?}", response))
}
