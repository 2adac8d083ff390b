//! Protocol Module
//!
//! Defines the line-based wire protocol for client-server communication,
//! a small subset of the Redis RESP conventions.
//!
//! ### Commands
//! - `LEN <queue>`                    - `:<unreserved count>`
//! - `ADD <queue> <retries> <body>`   - `+<id>`
//! - `RESERVE <queue>`                - `+<id> <body>`
//! - `RETRY <queue> <id>`             - `+OK`
//! - `DONE <queue> <id>`              - `+OK`
//! - `CLOSE`                          - connection closed, no response
//!
//! Any failure is answered with `-ERR <message>` and the connection stays
//! open.

mod command;
mod response;
mod codec;

pub use command::{Command, CommandType};
pub use response::Response;
pub use codec::{
    decode_command, decode_response, encode_command, encode_response, read_line,
    read_response, write_command, write_response, LINE_END, MAX_LINE_LEN,
};
