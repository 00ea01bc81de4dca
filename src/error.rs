//! Error types for swipe decoding operations.
//!
//! All fallible operations in the crate report failures through
//! [`DecodeError`]; empty-but-valid situations (empty dictionary, empty
//! index) deliberately return empty results instead of erroring so that
//! the decoder stays total.

use thiserror::Error;

/// Main error type for swipe decoding operations.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Input validation errors (malformed swipe line, bad coordinate token).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A trajectory operation received no points.
    #[error("Empty trajectory: {context}")]
    EmptyTrajectory { context: String },

    /// No character of the word maps to a key in the layout.
    #[error("Word {word:?} has no keys in the layout")]
    UnknownWord { word: String },

    /// The adaptive-radius cluster search did not settle on a usable
    /// result count within the retry budget.
    #[error("Cluster search did not converge after {retries} retries")]
    SearchDidNotConverge { retries: usize },

    /// Configuration validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for swipe decoding operations.
pub type Result<T> = std::result::Result<T, DecodeError>;

impl DecodeError {
    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an empty trajectory error.
    #[must_use]
    pub fn empty_trajectory(context: impl Into<String>) -> Self {
        Self::EmptyTrajectory {
            context: context.into(),
        }
    }

    /// Create an unknown word error.
    #[must_use]
    pub fn unknown_word(word: impl Into<String>) -> Self {
        Self::UnknownWord { word: word.into() }
    }

    /// Create a search non-convergence error.
    #[must_use]
    pub const fn search_did_not_converge(retries: usize) -> Self {
        Self::SearchDidNotConverge { retries }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
