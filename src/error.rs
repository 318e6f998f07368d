//! Error types for the Lattice client
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using LatticeError
pub type Result<T> = std::result::Result<T, LatticeError>;

/// Unified error type for Lattice client operations
#[derive(Debug, Error)]
pub enum LatticeError {
    // -------------------------------------------------------------------------
    // Connection Errors
    // -------------------------------------------------------------------------
    #[error("address resolution failed: {0}")]
    Resolution(String),

    #[error("connection failed: {0}")]
    Connect(String),

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("response string exceeded the {limit} byte ceiling")]
    Overflow { limit: usize },

    #[error("protocol violation: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Session Errors
    // -------------------------------------------------------------------------
    #[error("authentication rejected by server")]
    Auth,

    #[error("connection is no longer usable")]
    ConnectionUnusable,
}
