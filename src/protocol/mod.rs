//! Protocol Module
//!
//! Defines the wire protocol spoken with the Lattice server.
//!
//! ## Wire Format (null-delimited frames over TCP)
//!
//! ### Handshake
//! ```text
//! Server -> Client:  ┌───────────────┬──────┐
//!                    │  timestamp    │ 0x00 │
//!                    └───────────────┴──────┘
//! Client -> Server:  ┌──────────┬──────┬──────────────┬──────┐
//!                    │ username │ 0x00 │ auth digest  │ 0x00 │
//!                    └──────────┴──────┴──────────────┴──────┘
//! Server -> Client:  0x00 (accepted) | 0x01 (rejected)
//! ```
//!
//! The auth digest is `md5hex(md5hex(password) ++ timestamp)`, where the
//! inner digest is concatenated in its ASCII lowercase-hex form.
//!
//! ### Command Exchange
//! ```text
//! Client -> Server:  ┌──────────┬──────┐
//!                    │ command  │ 0x00 │
//!                    └──────────┴──────┘
//! Server -> Client:  ┌──────────┬──────┬──────────┬──────┬────────┐
//!                    │  result  │ 0x00 │   info   │ 0x00 │ status │
//!                    └──────────┴──────┴──────────┴──────┴────────┘
//! ```
//!
//! ### Status Codes
//! - 0x00: OK
//! - 0x01: ERROR (on a command response, `result` is present but void)
//!
//! All strings are raw bytes terminated by a single `0x00` and may not
//! contain an embedded `0x00`. Any status byte outside `{0x00, 0x01}` is a
//! protocol violation.

mod auth;
mod codec;
mod response;

pub use auth::{authenticate, credential_digest};
pub use codec::{
    read_byte, read_outcome, read_status, read_string, send_command, write_frame,
    INITIAL_BUFFER_CAPACITY, MAX_STRING_LEN,
};
pub use response::{CommandOutcome, Status};
