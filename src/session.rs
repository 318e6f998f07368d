//! Session Module
//!
//! Ties transport, handshake, and command exchange into one lifecycle:
//! connect -> authenticate -> execute* -> close.
//!
//! ## State Model
//!
//! A [`Session`] value only exists once the handshake has succeeded, so
//! "execute only when authenticated" holds by construction. Any transport
//! failure during an exchange poisons the session: the stream position is
//! unknown, framing is permanently desynchronized, and every later call
//! fails with [`LatticeError::ConnectionUnusable`] without touching the
//! socket. Closing sends a final `exit` frame best-effort and shuts the
//! transport down; it never raises.
//!
//! ## Concurrency Model
//!
//! One session, one thread: each call blocks until its network I/O completes
//! or fails, and calls must be strictly sequential because the stream has no
//! message boundaries other than the protocol's own framing. Independent
//! sessions may run concurrently from separate threads with no shared state.
//! For queued dispatch from many callers, see [`crate::worker`].

use crate::config::ClientConfig;
use crate::error::{LatticeError, Result};
use crate::network::Transport;
use crate::protocol::{self, CommandOutcome};

/// Command sent to announce an orderly close
const EXIT_COMMAND: &str = "exit";

/// One authenticated connection to the server
pub struct Session {
    /// Exclusively-owned transport
    transport: Transport,

    /// False once a transport failure has desynchronized framing
    healthy: bool,

    /// True once the exit frame and shutdown have run
    closed: bool,
}

impl Session {
    /// Connect to the server and authenticate
    ///
    /// Steps:
    /// 1. Resolve and connect the transport
    /// 2. Run the challenge-response handshake
    ///
    /// On handshake failure the connection is shut down before the error is
    /// returned; a half-authenticated connection is never handed out.
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        let mut transport = Transport::connect(config)?;

        if let Err(e) = protocol::authenticate(&mut transport, &config.credentials) {
            transport.shutdown();
            return Err(e);
        }

        tracing::debug!(peer = %transport.peer_addr(), "session established");

        Ok(Self {
            transport,
            healthy: true,
            closed: false,
        })
    }

    /// Execute one command and parse its three-part response
    ///
    /// Safe to call repeatedly; each exchange fully drains the response
    /// before returning, keeping the stream aligned for the next call. A
    /// returned [`CommandOutcome::CommandError`] leaves the channel healthy;
    /// an `Err` means the channel is dead and the session must be closed.
    pub fn execute(&mut self, command: &str) -> Result<CommandOutcome> {
        if !self.healthy {
            return Err(LatticeError::ConnectionUnusable);
        }

        tracing::trace!(peer = %self.transport.peer_addr(), command, "executing");

        match self.exchange(command) {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                // Framing state is unknown after a failed exchange; any
                // further traffic on this stream would desynchronize.
                self.healthy = false;
                Err(e)
            }
        }
    }

    /// One request/response round trip
    fn exchange(&mut self, command: &str) -> Result<CommandOutcome> {
        protocol::send_command(&mut self.transport, command)?;
        protocol::read_outcome(&mut self.transport)
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        self.transport.peer_addr()
    }

    /// Close the session
    ///
    /// Sends the exit frame best-effort and shuts the transport down. Never
    /// fails past the caller, regardless of prior error state; dropping the
    /// session performs the same teardown.
    pub fn close(mut self) {
        self.teardown();
    }

    /// Exit frame + transport shutdown, idempotent
    fn teardown(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        if let Err(e) = protocol::send_command(&mut self.transport, EXIT_COMMAND) {
            tracing::debug!(peer = %self.transport.peer_addr(), error = %e, "exit frame not sent");
        }
        self.transport.shutdown();
        self.healthy = false;
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("peer_addr", &self.transport.peer_addr())
            .field("healthy", &self.healthy)
            .finish()
    }
}
