//! Authentication handshake
//!
//! Challenge-response exchange performed immediately after connect:
//!
//! 1. Read the session-opening timestamp frame from the server.
//! 2. Send `{username}\0`.
//! 3. Send `{digest}\0`, where the digest is
//!    `md5hex(md5hex(password) ++ timestamp)`, with the inner digest
//!    concatenated in its ASCII lowercase-hex form, not as raw bytes.
//! 4. Read one status byte: `0x00` accepted, `0x01` rejected.
//!
//! Any step failing aborts the whole handshake; the connection must then be
//! closed and may not be reused for command execution.

use std::io::{Read, Write};

use md5::{Digest, Md5};

use crate::config::Credentials;
use crate::error::{LatticeError, Result};
use super::codec::{read_byte, read_string, write_frame};

/// Render an MD5 digest as lowercase hex text
fn md5_hex(data: &[u8]) -> String {
    Md5::digest(data)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Compute the handshake digest for a password and server timestamp
///
/// The timestamp is opaque server-supplied bytes, consumed once per
/// connection and not retained afterward.
pub fn credential_digest(password: &str, timestamp: &[u8]) -> String {
    let first = md5_hex(password.as_bytes());

    let mut seeded = Vec::with_capacity(first.len() + timestamp.len());
    seeded.extend_from_slice(first.as_bytes());
    seeded.extend_from_slice(timestamp);

    md5_hex(&seeded)
}

/// Run the handshake on a freshly connected stream
///
/// Must be called exactly once, immediately after connect and before any
/// command is executed.
pub fn authenticate<S: Read + Write>(stream: &mut S, credentials: &Credentials) -> Result<()> {
    let timestamp = read_string(stream)?;
    tracing::debug!(
        username = %credentials.username,
        "received session timestamp, sending credentials"
    );

    write_frame(stream, credentials.username.as_bytes())?;

    let digest = credential_digest(&credentials.password, &timestamp);
    write_frame(stream, digest.as_bytes())?;

    match read_byte(stream)? {
        0x00 => {
            tracing::debug!(username = %credentials.username, "authentication accepted");
            Ok(())
        }
        0x01 => Err(LatticeError::Auth),
        byte => Err(LatticeError::Protocol(format!(
            "invalid handshake status byte 0x{:02x}",
            byte
        ))),
    }
}
