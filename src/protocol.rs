//! Wire message types for the newline-delimited JSON protocol.
//!
//! One JSON object per line, UTF-8 encoded. Messages are parsed into the
//! tagged variants below; anything that does not match one of them is
//! rejected at the framing layer instead of being poked at field by field.

use serde::{Deserialize, Serialize};

/// Messages sent by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientMessage {
    /// Opens the session and identifies the player.
    Hello { northeastern_username: String },
    /// One word guess for the given game.
    Guess { id: String, word: String },
}

/// Messages received from the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerMessage {
    /// Handshake reply carrying the game identifier.
    Start { id: GameId },
    /// The guess was wrong; the history carries per-letter marks.
    Retry { id: GameId, guesses: Vec<GuessRecord> },
    /// Terminal message carrying the result token.
    Bye { id: GameId, flag: String },
}

/// A single entry in a retry message's guess history.
///
/// Mark encoding: 2 = exact position match, 1 = letter present elsewhere,
/// 0 = letter absent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GuessRecord {
    pub word: String,
    pub marks: Vec<u8>,
}

/// The game identifier as it appears on the wire.
///
/// Servers send it either as a JSON string or as a number; it is opaque
/// to the client and echoed back as a string in every guess.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum GameId {
    Text(String),
    Number(u64),
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameId::Text(s) => f.write_str(s),
            GameId::Number(n) => write!(f, "{n}"),
        }
    }
}
