//! Protocol codec
//!
//! Stream-level reading and writing of null-delimited frames.
//!
//! All readers work a byte at a time on top of [`read_byte`], so they compose
//! with any [`Read`] implementation (a live transport in production, a
//! `Cursor` in tests). Reads interrupted by a transient signal are retried
//! transparently and never surface as failures.

use std::io::{ErrorKind, Read, Write};

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{LatticeError, Result};
use super::{CommandOutcome, Status};

/// Initial capacity of the string accumulation buffer
pub const INITIAL_BUFFER_CAPACITY: usize = 32;

/// Hard ceiling on a single response string (10 MiB)
pub const MAX_STRING_LEN: usize = 10 * 1024 * 1024;

// =============================================================================
// Read Primitives
// =============================================================================

/// Read a single byte from the stream
///
/// End-of-stream is a protocol violation: the protocol guarantees every
/// frame is complete, so EOF mid-frame means the peer died or framing
/// desynced.
pub fn read_byte<R: Read>(reader: &mut R) -> Result<u8> {
    let mut byte = [0u8; 1];
    loop {
        match reader.read(&mut byte) {
            Ok(0) => {
                return Err(LatticeError::Protocol(
                    "unexpected end of stream".to_string(),
                ))
            }
            Ok(_) => return Ok(byte[0]),
            Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
}

/// Read a null-terminated byte string
///
/// Accumulates bytes until the terminator into a buffer that starts small
/// and doubles whenever full, saturating at [`MAX_STRING_LEN`]. Returns the
/// accumulated bytes excluding the terminator.
///
/// Fails with `Overflow` if the ceiling would be exceeded before a
/// terminator is seen, and with a protocol violation if the stream ends
/// first.
pub fn read_string<R: Read>(reader: &mut R) -> Result<Bytes> {
    let mut buf = BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY);

    loop {
        let byte = read_byte(reader)?;
        if byte == 0x00 {
            return Ok(buf.freeze());
        }

        if buf.len() == MAX_STRING_LEN {
            return Err(LatticeError::Overflow {
                limit: MAX_STRING_LEN,
            });
        }

        // Double the capacity when full, saturating at the ceiling so the
        // size computation cannot wrap.
        if buf.len() == buf.capacity() {
            let target = buf.capacity().saturating_mul(2).min(MAX_STRING_LEN);
            buf.reserve(target - buf.len());
        }

        buf.put_u8(byte);
    }
}

/// Read a terminal status byte
///
/// Only `0x00` and `0x01` are valid; anything else is a protocol violation,
/// never silently coerced.
pub fn read_status<R: Read>(reader: &mut R) -> Result<Status> {
    match read_byte(reader)? {
        0x00 => Ok(Status::Ok),
        0x01 => Ok(Status::Error),
        byte => Err(LatticeError::Protocol(format!(
            "invalid status byte 0x{:02x}",
            byte
        ))),
    }
}

// =============================================================================
// Write Primitives
// =============================================================================

/// Write an entire buffer, looping over short writes
///
/// Transient interruption is retried; any other error fails fast without
/// partial silent success.
fn write_full<W: Write>(writer: &mut W, mut buf: &[u8]) -> Result<()> {
    while !buf.is_empty() {
        match writer.write(buf) {
            Ok(0) => {
                return Err(std::io::Error::new(
                    ErrorKind::WriteZero,
                    "failed to write whole frame",
                )
                .into())
            }
            Ok(n) => buf = &buf[n..],
            Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Write one frame: the payload followed by exactly one null terminator
///
/// Payloads may not contain an embedded null byte; the terminator is the
/// only framing the stream has, so an embedded null would desynchronize
/// every later exchange.
pub fn write_frame<W: Write>(writer: &mut W, payload: &[u8]) -> Result<()> {
    if payload.contains(&0x00) {
        return Err(LatticeError::Protocol(
            "frame payload contains an embedded null byte".to_string(),
        ));
    }

    let mut frame = Vec::with_capacity(payload.len() + 1);
    frame.extend_from_slice(payload);
    frame.push(0x00);

    write_full(writer, &frame)?;
    writer.flush()?;
    Ok(())
}

// =============================================================================
// Command Exchange
// =============================================================================

/// Send one command frame
pub fn send_command<W: Write>(writer: &mut W, command: &str) -> Result<()> {
    write_frame(writer, command.as_bytes())
}

/// Read the three-part response to a command
///
/// Reads the result string, the info string, then the terminal status byte.
/// On an error status the result string has already been consumed from the
/// wire but is semantically void and is discarded, never exposed.
pub fn read_outcome<R: Read>(reader: &mut R) -> Result<CommandOutcome> {
    let result = read_string(reader)?;
    let info = read_string(reader)?;

    match read_status(reader)? {
        Status::Ok => Ok(CommandOutcome::Success { result, info }),
        Status::Error => Ok(CommandOutcome::CommandError { info }),
    }
}
