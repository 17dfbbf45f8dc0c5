//! Error types for the calculator core.
//!
//! [`CalculatorError`] covers everything that can go wrong between accumulating an
//! expression and producing a number. [`HistoryError`] covers the persistence side of the
//! history ledger. Neither is fatal: every failure is recoverable by further input.

use std::fmt;
use std::io;

/// Failures raised while preparing or evaluating an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum CalculatorError {
    /// A character outside the evaluation whitelist survived placeholder substitution.
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Byte offset of the character in the prepared expression.
        position: usize,
    },
    /// The expression could not be parsed or produced a non-finite value.
    Evaluation(String),
    /// Evaluate was requested with nothing accumulated. Never shown to the user.
    EmptyInput,
    /// A button value or key did not map to any token.
    UnknownToken(String),
}

impl CalculatorError {
    /// Shorthand for building an [`CalculatorError::Evaluation`] error.
    pub fn evaluation(message: impl Into<String>) -> Self {
        CalculatorError::Evaluation(message.into())
    }
}

impl fmt::Display for CalculatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalculatorError::InvalidCharacter {
                character,
                position,
            } => write!(
                f,
                "Invalid character '{}' at position {}",
                character, position
            ),
            CalculatorError::Evaluation(msg) => write!(f, "Evaluation error: {}", msg),
            CalculatorError::EmptyInput => write!(f, "Nothing to evaluate"),
            CalculatorError::UnknownToken(token) => write!(f, "Unknown token: {}", token),
        }
    }
}

impl std::error::Error for CalculatorError {}

/// Result type for calculator operations.
pub type CalculatorResult<T> = Result<T, CalculatorError>;

/// Failures raised by a [`HistoryStore`](crate::history::HistoryStore).
#[derive(Debug)]
pub enum HistoryError {
    /// Reading or writing the backing file failed.
    Io(io::Error),
    /// The persisted ledger could not be encoded or decoded.
    Serialization(serde_json::Error),
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::Io(e) => write!(f, "History IO error: {}", e),
            HistoryError::Serialization(e) => write!(f, "History serialization error: {}", e),
        }
    }
}

impl std::error::Error for HistoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HistoryError::Io(e) => Some(e),
            HistoryError::Serialization(e) => Some(e),
        }
    }
}

impl From<io::Error> for HistoryError {
    fn from(e: io::Error) -> Self {
        HistoryError::Io(e)
    }
}

impl From<serde_json::Error> for HistoryError {
    fn from(e: serde_json::Error) -> Self {
        HistoryError::Serialization(e)
    }
}
