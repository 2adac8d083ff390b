//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! ### Request Format
//! One command per line, fields separated by single spaces:
//! ```text
//! VERB arg1 arg2 rest of line\r\n
//! ```
//! The last argument of each command takes the remainder of the line, so an
//! `ADD` body may itself contain spaces.
//!
//! ### Response Format
//! ```text
//! +<text>\r\n          success string
//! :<integer>\r\n       success integer
//! -ERR <message>\r\n   error
//! ```

use std::io::{BufRead, Read, Write};

use crate::error::{DeliError, Result};
use super::{Command, CommandType, Response};

/// Line terminator written after every command and response
pub const LINE_END: &str = "\r\n";

/// Maximum accepted line length (16 MB)
pub const MAX_LINE_LEN: usize = 16 * 1024 * 1024;

// =============================================================================
// Command Encoding/Decoding
// =============================================================================

/// Encode a command to its request line
pub fn encode_command(command: &Command) -> Vec<u8> {
    let line = match command {
        Command::Len { queue } => format!("LEN {}", queue),
        Command::Add {
            queue,
            retries,
            body,
        } => format!("ADD {} {} {}", queue, retries, body),
        Command::Reserve { queue } => format!("RESERVE {}", queue),
        Command::Retry { queue, id } => format!("RETRY {} {}", queue, id),
        Command::Done { queue, id } => format!("DONE {} {}", queue, id),
        Command::Close => "CLOSE".to_string(),
    };

    let mut message = line.into_bytes();
    message.extend_from_slice(LINE_END.as_bytes());
    message
}

/// Decode a command from one request line
///
/// Surrounding whitespace (including the line terminator) is ignored.
pub fn decode_command(line: &str) -> Result<Command> {
    let line = line.trim();
    let verb = line.split(' ').next().unwrap_or_default();

    let command_type = CommandType::from_verb(verb).ok_or(DeliError::UnrecognizedCommand)?;

    match command_type {
        CommandType::Len => {
            let [queue] = split_args::<1>(line, command_type)?;
            Ok(Command::Len { queue })
        }
        CommandType::Add => {
            let [queue, retries, body] = split_args::<3>(line, command_type)?;
            let retries = retries
                .parse::<u32>()
                .map_err(|_| DeliError::InvalidRetries)?;
            Ok(Command::Add {
                queue,
                retries,
                body,
            })
        }
        CommandType::Reserve => {
            let [queue] = split_args::<1>(line, command_type)?;
            Ok(Command::Reserve { queue })
        }
        CommandType::Retry => {
            let [queue, id] = split_args::<2>(line, command_type)?;
            Ok(Command::Retry { queue, id })
        }
        CommandType::Done => {
            let [queue, id] = split_args::<2>(line, command_type)?;
            Ok(Command::Done { queue, id })
        }
        CommandType::Close => Ok(Command::Close),
    }
}

/// Split the arguments after the verb into exactly `N` non-empty parts
///
/// The final part keeps any remaining spaces.
fn split_args<const N: usize>(line: &str, command_type: CommandType) -> Result<[String; N]> {
    let missing = || DeliError::MissingParameters(command_type.as_str());

    let args: Vec<String> = line
        .splitn(N + 1, ' ')
        .skip(1)
        .map(str::to_string)
        .collect();

    if args.iter().any(|arg| arg.is_empty()) {
        return Err(missing());
    }

    args.try_into().map_err(|_| missing())
}

// =============================================================================
// Response Encoding/Decoding
// =============================================================================

/// Encode a response to bytes
pub fn encode_response(response: &Response) -> Vec<u8> {
    let line = match response {
        Response::Text(text) => format!("+{}{}", text, LINE_END),
        Response::Integer(value) => format!(":{}{}", value, LINE_END),
        Response::Failure(message) => format!("-ERR {}{}", message, LINE_END),
    };
    line.into_bytes()
}

/// Decode a response from one line
pub fn decode_response(line: &str) -> Result<Response> {
    let line = line.trim_end_matches(['\r', '\n']);

    let Some(kind) = line.chars().next() else {
        return Err(DeliError::Protocol("Empty response line".to_string()));
    };
    let rest = &line[kind.len_utf8()..];

    match kind {
        '+' => Ok(Response::Text(rest.to_string())),
        ':' => rest.parse::<i64>().map(Response::Integer).map_err(|_| {
            DeliError::Protocol(format!("Invalid integer response: {:?}", rest))
        }),
        '-' => {
            let message = rest.strip_prefix("ERR ").unwrap_or(rest);
            Ok(Response::Failure(message.to_string()))
        }
        other => Err(DeliError::Protocol(format!(
            "Unknown response type: {:?}",
            other
        ))),
    }
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read one line from a stream
///
/// Returns `None` at end of stream. Invalid UTF-8 is replaced rather than
/// rejected.
pub fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut buf = Vec::new();
    let mut limited = reader.take(MAX_LINE_LEN as u64 + 1);
    let read = limited.read_until(b'\n', &mut buf)?;

    if read == 0 {
        return Ok(None);
    }

    if buf.len() > MAX_LINE_LEN {
        return Err(DeliError::Protocol(format!(
            "Line too long: more than {} bytes",
            MAX_LINE_LEN
        )));
    }

    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

/// Write a command to a stream
pub fn write_command<W: Write>(writer: &mut W, command: &Command) -> Result<()> {
    let bytes = encode_command(command);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Read a complete response from a stream
pub fn read_response<R: BufRead>(reader: &mut R) -> Result<Response> {
    match read_line(reader)? {
        Some(line) => decode_response(&line),
        None => Err(DeliError::Network(
            "Connection closed by server".to_string(),
        )),
    }
}

/// Write a response to a stream
pub fn write_response<W: Write>(writer: &mut W, response: &Response) -> Result<()> {
    let bytes = encode_response(response);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}
