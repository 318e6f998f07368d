//! Session Worker
//!
//! Serialized command dispatch for one session.
//!
//! ## Architecture
//! - One dedicated thread owns one [`Session`] exclusively
//! - Callers submit commands over a channel and block on a reply channel
//! - Commands are executed strictly in submission order, so concurrent
//!   callers can never interleave reads/writes on the shared socket
//!
//! This is the layer an event-driven front-end drives instead of touching a
//! session directly: the session's sequential-exchange contract is enforced
//! here once, not at every call site.

use std::thread::{self, JoinHandle};

use crossbeam::channel::{unbounded, Receiver, Sender};

use crate::config::ClientConfig;
use crate::error::{LatticeError, Result};
use crate::protocol::CommandOutcome;
use crate::session::Session;

/// One queued command and the channel its outcome is delivered on
struct Request {
    command: String,
    reply: Sender<Result<CommandOutcome>>,
}

/// Handle to a dedicated session-owning worker thread
pub struct SessionWorker {
    /// Command queue into the worker thread; dropped to stop it
    queue: Option<Sender<Request>>,

    /// Worker thread handle, taken on shutdown
    thread: Option<JoinHandle<()>>,
}

impl SessionWorker {
    /// Connect, authenticate, and spawn the worker thread
    ///
    /// Connection and handshake run on the calling thread so failures are
    /// reported directly; only a live session is moved into the worker.
    pub fn spawn(config: &ClientConfig) -> Result<Self> {
        let session = Session::connect(config)?;
        let (queue, requests) = unbounded::<Request>();

        let thread = thread::Builder::new()
            .name("lattice-session-worker".to_string())
            .spawn(move || Self::run(session, requests))?;

        Ok(Self {
            queue: Some(queue),
            thread: Some(thread),
        })
    }

    /// Worker loop: drain the queue until all handles are gone
    fn run(mut session: Session, requests: Receiver<Request>) {
        tracing::debug!(peer = %session.peer_addr(), "session worker started");

        for request in requests.iter() {
            let outcome = session.execute(&request.command);
            // A caller that gave up waiting is not an error for the worker.
            let _ = request.reply.send(outcome);
        }

        tracing::debug!(peer = %session.peer_addr(), "session worker stopping");
        session.close();
    }

    /// Execute a command through the queue, blocking until its outcome
    ///
    /// Submissions from multiple threads are serialized in arrival order.
    pub fn execute(&self, command: &str) -> Result<CommandOutcome> {
        let queue = self
            .queue
            .as_ref()
            .ok_or(LatticeError::ConnectionUnusable)?;

        let (reply, outcome) = unbounded();
        queue
            .send(Request {
                command: command.to_string(),
                reply,
            })
            .map_err(|_| LatticeError::ConnectionUnusable)?;

        outcome
            .recv()
            .map_err(|_| LatticeError::ConnectionUnusable)?
    }

    /// Stop the worker and close its session
    ///
    /// Queued commands submitted before the call are still executed.
    pub fn shutdown(mut self) {
        self.stop();
    }

    /// Close the queue and join the thread, idempotent
    fn stop(&mut self) {
        // Dropping the only sender ends the worker's receive loop.
        drop(self.queue.take());

        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::warn!("session worker thread panicked");
            }
        }
    }
}

impl Drop for SessionWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for SessionWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionWorker")
            .field("running", &self.thread.is_some())
            .finish()
    }
}
