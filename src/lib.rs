//! # Lattice Client
//!
//! A blocking TCP client for the Lattice database server protocol:
//! - Null-delimited request/response framing
//! - Challenge-response authentication (two-stage MD5 digest)
//! - Typed command outcomes with strict status interpretation
//! - Growth-capped dynamic string reading (10 MiB ceiling)
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      SessionWorker                           │
//! │        (optional: queued dispatch, one thread/session)       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Session                               │
//! │        connect -> authenticate -> execute* -> close          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  Protocol   │          │  Transport  │
//!   │ (framing,   │─────────▶│ (blocking   │
//!   │  handshake) │          │  TCP)       │
//!   └─────────────┘          └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use lattice_client::{ClientConfig, Credentials, Session};
//!
//! fn main() -> lattice_client::Result<()> {
//!     let config = ClientConfig::builder()
//!         .host("127.0.0.1")
//!         .port(1984)
//!         .credentials(Credentials::new("admin", "admin"))
//!         .build();
//!
//!     let mut session = Session::connect(&config)?;
//!     let outcome = session.execute("xquery 1 + 1")?;
//!     println!("{}", String::from_utf8_lossy(outcome.info()));
//!     session.close();
//!     Ok(())
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod network;
pub mod protocol;
pub mod session;
pub mod worker;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{LatticeError, Result};
pub use config::{ClientConfig, Credentials};
pub use protocol::CommandOutcome;
pub use session::Session;
pub use worker::SessionWorker;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the client
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
