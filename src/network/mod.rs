//! Network Module
//!
//! Blocking TCP transport for one protocol session.
//!
//! ## Architecture
//! - One `Transport` per connection, owned exclusively by its session
//! - Buffered read half, unbuffered write half (frames are written whole)
//! - No multiplexing: the byte stream has no message boundaries beyond the
//!   protocol's own framing, so all I/O on one transport is sequential

mod transport;

pub use transport::Transport;
