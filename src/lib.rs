// Library interface for wordle-client
// This allows integration tests to access internal modules

pub mod cli;
pub mod connection;
pub mod error;
pub mod logging;
pub mod protocol;
pub mod session;
pub mod solver;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use connection::{Connection, DEFAULT_PORT, DEFAULT_TLS_PORT, Transport, connect};
pub use error::ClientError;
pub use protocol::{ClientMessage, GameId, GuessRecord, ServerMessage};
pub use session::{GameSession, SessionConfig, run_session};
pub use solver::{Feedback, OPENING_GUESS, WORD_LENGTH, filter_candidates, score_guess};
pub use wordbank::{EMBEDDED_WORDBANK, load_wordbank_from_file, load_wordbank_from_str};
