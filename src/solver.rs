//! Feedback scoring and candidate filtering.

use crate::error::ClientError;

/// Fixed word length for the game.
pub const WORD_LENGTH: usize = 5;

/// Fixed opening guess, sent before any feedback exists. Chosen for its
/// common letters; it is independent of the candidate set.
pub const OPENING_GUESS: &str = "least";

/// Per-position verdict for one letter of a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    /// Correct letter in the correct position (wire mark 2).
    Exact,
    /// Letter occurs elsewhere in the target and is not yet accounted
    /// for by another mark (wire mark 1).
    Present,
    /// Letter matches no unaccounted occurrence in the target (wire mark 0).
    Absent,
}

impl Feedback {
    /// Parse a wire mark (0, 1 or 2).
    pub fn from_mark(mark: u8) -> Option<Self> {
        match mark {
            2 => Some(Feedback::Exact),
            1 => Some(Feedback::Present),
            0 => Some(Feedback::Absent),
            _ => None,
        }
    }

    /// The wire encoding of this mark.
    pub fn mark(self) -> u8 {
        match self {
            Feedback::Exact => 2,
            Feedback::Present => 1,
            Feedback::Absent => 0,
        }
    }
}

/// Compute the feedback the server would produce for `guess` against
/// `target`.
///
/// First pass: positions where the letters agree become `Exact`, and every
/// other target letter is counted as an unaccounted occurrence. Second
/// pass: each remaining guess letter with a positive unaccounted count
/// becomes `Present` and consumes one occurrence; the rest stay `Absent`.
/// Exact matches are never stolen by present-letter accounting, and a
/// repeated guess letter earns `Present` at most as many times as the
/// target has unaccounted occurrences of it.
pub fn score_guess(guess: &str, target: &str) -> Result<Vec<Feedback>, ClientError> {
    let guess_bytes = guess.as_bytes();
    let target_bytes = target.as_bytes();
    if guess_bytes.len() != target_bytes.len() {
        return Err(ClientError::InvalidInput {
            guess: guess.to_string(),
            target: target.to_string(),
        });
    }

    let mut feedback = vec![Feedback::Absent; guess_bytes.len()];
    let mut unaccounted = [0u8; 256];

    for (i, (&g, &t)) in guess_bytes.iter().zip(target_bytes).enumerate() {
        if g == t {
            feedback[i] = Feedback::Exact;
        } else {
            unaccounted[t as usize] += 1;
        }
    }

    for (i, &g) in guess_bytes.iter().enumerate() {
        if feedback[i] == Feedback::Exact {
            continue;
        }
        if unaccounted[g as usize] > 0 {
            feedback[i] = Feedback::Present;
            unaccounted[g as usize] -= 1;
        }
    }

    Ok(feedback)
}

/// Keep only the candidates whose score against `last_guess` equals the
/// feedback the server reported, preserving input order.
///
/// The next guess is always the first surviving word, so order determines
/// play. An empty result means the server scores guesses differently than
/// [`score_guess`] or the candidate source is corrupt; there is no valid
/// next guess and the session cannot continue.
pub fn filter_candidates(
    candidates: &[String],
    last_guess: &str,
    observed: &[Feedback],
) -> Result<Vec<String>, ClientError> {
    let mut filtered = Vec::new();
    for word in candidates {
        if score_guess(last_guess, word)? == observed {
            filtered.push(word.clone());
        }
    }
    if filtered.is_empty() {
        return Err(ClientError::NoCandidatesRemaining);
    }
    Ok(filtered)
}
