//! Codec Tests
//!
//! Tests for null-delimited frame reading and writing.

use std::io::{Cursor, ErrorKind, Read, Write};

use lattice_client::error::LatticeError;
use lattice_client::protocol::{
    read_outcome, read_status, read_string, send_command, write_frame, CommandOutcome, Status,
    MAX_STRING_LEN,
};

// =============================================================================
// Test Streams
// =============================================================================

/// Reader that yields non-null bytes forever
struct EndlessReader;

impl Read for EndlessReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        for byte in buf.iter_mut() {
            *byte = b'x';
        }
        Ok(buf.len())
    }
}

/// Reader that returns a transient interruption before every delivered byte
struct InterruptingReader {
    data: Vec<u8>,
    pos: usize,
    interrupt_next: bool,
}

impl InterruptingReader {
    fn new(data: &[u8]) -> Self {
        Self {
            data: data.to_vec(),
            pos: 0,
            interrupt_next: true,
        }
    }
}

impl Read for InterruptingReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if self.interrupt_next {
            self.interrupt_next = false;
            return Err(std::io::Error::new(ErrorKind::Interrupted, "signal"));
        }
        self.interrupt_next = true;

        if self.pos == self.data.len() {
            return Ok(0);
        }
        buf[0] = self.data[self.pos];
        self.pos += 1;
        Ok(1)
    }
}

/// Writer that accepts one byte at a time, interrupting before each
struct StingyWriter {
    written: Vec<u8>,
    interrupt_next: bool,
}

impl StingyWriter {
    fn new() -> Self {
        Self {
            written: Vec::new(),
            interrupt_next: true,
        }
    }
}

impl Write for StingyWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if self.interrupt_next {
            self.interrupt_next = false;
            return Err(std::io::Error::new(ErrorKind::Interrupted, "signal"));
        }
        self.interrupt_next = true;

        if buf.is_empty() {
            return Ok(0);
        }
        self.written.push(buf[0]);
        Ok(1)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

// =============================================================================
// String Reading Tests
// =============================================================================

#[test]
fn test_read_string_returns_bytes_before_terminator() {
    let mut cursor = Cursor::new(b"hello\0".to_vec());
    let s = read_string(&mut cursor).unwrap();
    assert_eq!(&s[..], b"hello");
}

#[test]
fn test_read_string_empty() {
    let mut cursor = Cursor::new(b"\0".to_vec());
    let s = read_string(&mut cursor).unwrap();
    assert!(s.is_empty());
}

#[test]
fn test_read_string_stops_at_first_terminator() {
    let mut cursor = Cursor::new(b"abc\0def\0".to_vec());
    let s = read_string(&mut cursor).unwrap();
    assert_eq!(&s[..], b"abc");
}

#[test]
fn test_read_string_sequential_frames() {
    let mut cursor = Cursor::new(b"abc\0def\0".to_vec());
    assert_eq!(&read_string(&mut cursor).unwrap()[..], b"abc");
    assert_eq!(&read_string(&mut cursor).unwrap()[..], b"def");
}

#[test]
fn test_read_string_grows_past_initial_capacity() {
    // Crosses several doublings of the 32-byte initial buffer
    let payload = vec![b'a'; 1000];
    let mut framed = payload.clone();
    framed.push(0);

    let mut cursor = Cursor::new(framed);
    let s = read_string(&mut cursor).unwrap();
    assert_eq!(&s[..], &payload[..]);
}

#[test]
fn test_read_string_eof_is_protocol_violation() {
    let mut cursor = Cursor::new(b"unterminated".to_vec());
    let result = read_string(&mut cursor);
    assert!(matches!(result, Err(LatticeError::Protocol(_))));
}

#[test]
fn test_read_string_eof_on_empty_stream() {
    let mut cursor = Cursor::new(Vec::new());
    let result = read_string(&mut cursor);
    assert!(matches!(result, Err(LatticeError::Protocol(_))));
}

#[test]
fn test_read_string_overflow_at_ceiling() {
    let result = read_string(&mut EndlessReader);
    match result {
        Err(LatticeError::Overflow { limit }) => assert_eq!(limit, MAX_STRING_LEN),
        other => panic!("expected overflow, got {:?}", other.map(|b| b.len())),
    }
}

#[test]
fn test_read_string_exactly_at_ceiling_succeeds() {
    let mut framed = vec![b'a'; MAX_STRING_LEN];
    framed.push(0);

    let mut cursor = Cursor::new(framed);
    let s = read_string(&mut cursor).unwrap();
    assert_eq!(s.len(), MAX_STRING_LEN);
}

#[test]
fn test_read_string_retries_interrupted_reads() {
    let mut reader = InterruptingReader::new(b"resilient\0");
    let s = read_string(&mut reader).unwrap();
    assert_eq!(&s[..], b"resilient");
}

// =============================================================================
// Status Byte Tests
// =============================================================================

#[test]
fn test_read_status_ok() {
    let mut cursor = Cursor::new(vec![0x00]);
    assert_eq!(read_status(&mut cursor).unwrap(), Status::Ok);
}

#[test]
fn test_read_status_error() {
    let mut cursor = Cursor::new(vec![0x01]);
    assert_eq!(read_status(&mut cursor).unwrap(), Status::Error);
}

#[test]
fn test_read_status_rejects_out_of_domain_byte() {
    let mut cursor = Cursor::new(vec![0x07]);
    let result = read_status(&mut cursor);
    assert!(matches!(result, Err(LatticeError::Protocol(_))));
}

#[test]
fn test_read_status_eof() {
    let mut cursor = Cursor::new(Vec::new());
    let result = read_status(&mut cursor);
    assert!(matches!(result, Err(LatticeError::Protocol(_))));
}

// =============================================================================
// Frame Writing Tests
// =============================================================================

#[test]
fn test_write_frame_appends_single_terminator() {
    let mut buffer = Vec::new();
    write_frame(&mut buffer, b"list").unwrap();
    assert_eq!(buffer, b"list\0");
}

#[test]
fn test_write_frame_empty_payload() {
    let mut buffer = Vec::new();
    write_frame(&mut buffer, b"").unwrap();
    assert_eq!(buffer, b"\0");
}

#[test]
fn test_write_frame_rejects_embedded_null() {
    let mut buffer = Vec::new();
    let result = write_frame(&mut buffer, b"bad\0payload");
    assert!(matches!(result, Err(LatticeError::Protocol(_))));
    assert!(buffer.is_empty());
}

#[test]
fn test_write_frame_survives_short_writes_and_interrupts() {
    let mut writer = StingyWriter::new();
    write_frame(&mut writer, b"persistent").unwrap();
    assert_eq!(writer.written, b"persistent\0");
}

#[test]
fn test_send_command_frames_the_command() {
    let mut buffer = Vec::new();
    send_command(&mut buffer, "xquery 1 + 1").unwrap();
    assert_eq!(buffer, b"xquery 1 + 1\0");
}

// =============================================================================
// Outcome Parsing Tests
// =============================================================================

#[test]
fn test_read_outcome_success() {
    let mut cursor = Cursor::new(b"2\0Query executed.\0\x00".to_vec());
    let outcome = read_outcome(&mut cursor).unwrap();

    match outcome {
        CommandOutcome::Success { result, info } => {
            assert_eq!(&result[..], b"2");
            assert_eq!(&info[..], b"Query executed.");
        }
        other => panic!("expected success, got {:?}", other),
    }
}

#[test]
fn test_read_outcome_command_error_discards_result() {
    let mut cursor =
        Cursor::new(b"\0Stopped at line 1: unknown command.\0\x01".to_vec());
    let outcome = read_outcome(&mut cursor).unwrap();

    match outcome {
        CommandOutcome::CommandError { ref info } => {
            assert_eq!(&info[..], b"Stopped at line 1: unknown command.");
        }
        other => panic!("expected command error, got {:?}", other),
    }
    assert!(outcome_result_is_absent(&outcome));
}

fn outcome_result_is_absent(outcome: &CommandOutcome) -> bool {
    outcome.result().is_none()
}

#[test]
fn test_read_outcome_error_with_nonempty_result_field() {
    // The wire still carries a result string on error; it must be consumed
    // but never exposed.
    let mut cursor = Cursor::new(b"partial\0failed\0\x01".to_vec());
    let outcome = read_outcome(&mut cursor).unwrap();

    assert!(!outcome.is_success());
    assert_eq!(outcome.result(), None);
    assert_eq!(outcome.info(), b"failed");
}

#[test]
fn test_read_outcome_invalid_status_is_transport_failure() {
    let mut cursor = Cursor::new(b"2\0Query executed.\0\x42".to_vec());
    let result = read_outcome(&mut cursor);
    assert!(matches!(result, Err(LatticeError::Protocol(_))));
}

#[test]
fn test_read_outcome_truncated_response() {
    let mut cursor = Cursor::new(b"2\0Query exec".to_vec());
    let result = read_outcome(&mut cursor);
    assert!(matches!(result, Err(LatticeError::Protocol(_))));
}

#[test]
fn test_read_outcome_sequential_responses_stay_framed() {
    // Two full response frames back to back: each exchange must consume
    // exactly one with no cross-talk.
    let mut cursor =
        Cursor::new(b"1\0first done.\0\x00\0second failed.\0\x01".to_vec());

    let first = read_outcome(&mut cursor).unwrap();
    assert_eq!(first, CommandOutcome::success(&b"1"[..], &b"first done."[..]));

    let second = read_outcome(&mut cursor).unwrap();
    assert_eq!(second, CommandOutcome::command_error(&b"second failed."[..]));
}
