//! Error types for the game client.

use thiserror::Error;

/// Errors that can end a game session.
///
/// Every variant is fatal: the session terminates, the connection is
/// released, and the error is surfaced to the caller. Nothing in this
/// crate catches and retries.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport establishment, write, or unexpected-close failure.
    #[error("connection error: {0}")]
    Connection(#[from] std::io::Error),

    /// TLS connector setup or handshake failure.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Malformed or semantically incomplete server message, or a message
    /// type that is not valid in the current protocol state.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Mismatched word lengths supplied to the feedback scorer.
    #[error("mismatched word lengths: guess '{guess}' vs target '{target}'")]
    InvalidInput { guess: String, target: String },

    /// Filtering emptied the candidate set: the server scores guesses
    /// differently than we do, or the word list does not contain the target.
    #[error("no candidates remaining after filtering")]
    NoCandidatesRemaining,
}

impl ClientError {
    /// Creates a new protocol error.
    pub fn protocol(reason: impl Into<String>) -> Self {
        Self::Protocol(reason.into())
    }
}
