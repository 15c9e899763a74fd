//! The handshake → guess-loop → termination state machine.

use crate::connection::{self, Connection, DEFAULT_PORT, DEFAULT_TLS_PORT};
use crate::error::ClientError;
use crate::protocol::{ClientMessage, GuessRecord, ServerMessage};
use crate::solver::{Feedback, OPENING_GUESS, WORD_LENGTH, filter_candidates};
use log::{debug, info};
use std::io::{Read, Write};

/// Connection parameters resolved from the command line.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub host: String,
    pub port: Option<u16>,
    pub tls: bool,
    pub username: String,
}

impl SessionConfig {
    /// The port to connect to: an explicit override, or the default for
    /// the chosen transport.
    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or(if self.tls {
            DEFAULT_TLS_PORT
        } else {
            DEFAULT_PORT
        })
    }
}

/// Connect, play one full game and return the server's result token.
///
/// The word list is an explicit immutable input; the session keeps no
/// global state. The connection is dropped on every exit path, errors
/// included.
pub fn run_session(config: &SessionConfig, words: Vec<String>) -> Result<String, ClientError> {
    let port = config.effective_port();
    info!("connecting to {}:{} (tls: {})", config.host, port, config.tls);
    let transport = connection::connect(&config.host, port, config.tls)?;
    GameSession::new(Connection::new(transport), words).play(&config.username)
}

/// Outcome of the hello/start exchange.
enum Handshake {
    Started(String),
    /// The server ended the session before any guess was sent.
    Finished(String),
}

/// A game in progress over an already-open stream.
///
/// Generic over the stream so the whole state machine can be exercised
/// without real sockets.
pub struct GameSession<S> {
    conn: Connection<S>,
    candidates: Vec<String>,
}

impl<S: Read + Write> GameSession<S> {
    pub fn new(conn: Connection<S>, candidates: Vec<String>) -> Self {
        Self { conn, candidates }
    }

    /// Run the handshake and the guess loop to completion, returning the
    /// result token from the server's terminal message.
    pub fn play(mut self, username: &str) -> Result<String, ClientError> {
        let game_id = match self.handshake(username)? {
            Handshake::Started(id) => id,
            Handshake::Finished(flag) => return Ok(flag),
        };
        info!(
            "game {game_id} started, {} candidates loaded",
            self.candidates.len()
        );
        self.guess_loop(&game_id)
    }

    /// Send `hello` and block for the server's opening message.
    fn handshake(&mut self, username: &str) -> Result<Handshake, ClientError> {
        self.conn.send(&ClientMessage::Hello {
            northeastern_username: username.to_string(),
        })?;
        match self.conn.receive()? {
            ServerMessage::Start { id } => Ok(Handshake::Started(id.to_string())),
            ServerMessage::Bye { flag, .. } => Ok(Handshake::Finished(flag)),
            ServerMessage::Retry { .. } => Err(ClientError::protocol(
                "retry received before the game started",
            )),
        }
    }

    /// Alternate guesses and feedback until the server says goodbye.
    ///
    /// Strictly sequential: every guess is followed by exactly one
    /// blocking receive before the next guess is chosen.
    fn guess_loop(&mut self, game_id: &str) -> Result<String, ClientError> {
        let mut guess = OPENING_GUESS.to_string();
        let mut rounds = 0u32;
        loop {
            rounds += 1;
            debug!(
                "round {rounds}: guessing '{guess}' ({} candidates)",
                self.candidates.len()
            );
            self.conn.send(&ClientMessage::Guess {
                id: game_id.to_string(),
                word: guess.clone(),
            })?;

            match self.conn.receive()? {
                ServerMessage::Bye { flag, .. } => {
                    info!("game {game_id} finished after {rounds} guesses");
                    return Ok(flag);
                }
                ServerMessage::Retry { guesses, .. } => {
                    let feedback = latest_feedback(&guesses)?;
                    self.candidates = filter_candidates(&self.candidates, &guess, &feedback)?;
                    guess = self.candidates[0].clone();
                }
                ServerMessage::Start { .. } => {
                    return Err(ClientError::protocol(
                        "unexpected start during the guess loop",
                    ));
                }
            }
        }
    }
}

/// Decode the marks of the most recent guess from the server's history.
/// The last entry corresponds to the word just sent.
fn latest_feedback(guesses: &[GuessRecord]) -> Result<Vec<Feedback>, ClientError> {
    let last = guesses
        .last()
        .ok_or_else(|| ClientError::protocol("retry carried an empty guess history"))?;
    if last.marks.len() != WORD_LENGTH {
        return Err(ClientError::protocol(format!(
            "expected {WORD_LENGTH} marks, got {}",
            last.marks.len()
        )));
    }
    last.marks
        .iter()
        .map(|&mark| {
            Feedback::from_mark(mark)
                .ok_or_else(|| ClientError::protocol(format!("invalid feedback mark {mark}")))
        })
        .collect()
}
