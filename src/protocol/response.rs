//! Response definitions
//!
//! Typed outcome of one command exchange.

use bytes::Bytes;

/// Response status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Status {
    Ok = 0x00,
    Error = 0x01,
}

/// Outcome of one executed command
///
/// Exactly one variant is produced per exchange. A broken channel is not a
/// variant here: transport failures surface as the `Err` arm of
/// [`crate::Result`], and the connection must then be closed, not reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Server executed the command
    Success {
        /// Result payload (e.g. the serialized query value)
        result: Bytes,

        /// Informational message accompanying the result
        info: Bytes,
    },

    /// Server rejected the command; the channel remains healthy
    CommandError {
        /// Error message describing the rejection
        info: Bytes,
    },
}

impl CommandOutcome {
    /// Create a success outcome
    pub fn success(result: impl Into<Bytes>, info: impl Into<Bytes>) -> Self {
        Self::Success {
            result: result.into(),
            info: info.into(),
        }
    }

    /// Create a command-error outcome
    pub fn command_error(info: impl Into<Bytes>) -> Self {
        Self::CommandError { info: info.into() }
    }

    /// Whether the command executed successfully
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Result payload, if the command succeeded
    pub fn result(&self) -> Option<&[u8]> {
        match self {
            Self::Success { result, .. } => Some(result),
            Self::CommandError { .. } => None,
        }
    }

    /// Informational or error message
    pub fn info(&self) -> &[u8] {
        match self {
            Self::Success { info, .. } => info,
            Self::CommandError { info } => info,
        }
    }
}
