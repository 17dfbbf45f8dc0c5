//! # Expression Session
//!
//! [`Session`] owns the in-progress expression text, the last successful result and the
//! history ledger. Every operation runs to completion before the next input is accepted,
//! so no locking is involved.
//!
//! ## Appending
//!
//! [`Session::append`] applies these rules in order:
//!
//! A [`Token::Digit`] above 9 is not a single digit and is always refused.
//!
//! 1. An operator typed into an empty expression while a last result exists starts the
//!    expression with that result (`=` then `+3` chains from the answer).
//! 2. A decimal point is refused if the trailing number segment already has one.
//! 3. With operator collapsing enabled, an operator typed after an operator replaces it.
//! 4. Otherwise the token text is appended.
//!
//! ## State
//!
//! ```text
//!              append                evaluate ok
//!   Empty ─────────────▶ Accumulating ────────────▶ DisplayedResult
//!     ▲                    │      ▲                       │
//!     │       evaluate err │      │ append                │ append
//!     │                    ▼      │                       │
//!     │                   Error ──┘◀──────────────────────┘
//!     └──────────── clear_all (from any state)
//! ```
//!
//! A failed evaluation leaves the expression text untouched so it can be corrected.
//!
//! ```rust
//! use anscalc::{CalculatorConfig, Session, SessionState};
//! use anscalc::token::{BinaryOperator, Token};
//!
//! let mut session = Session::new(&CalculatorConfig::default());
//! for token in [Token::Digit(2), Token::Operator(BinaryOperator::Add), Token::Digit(2)] {
//!     session.append(token);
//! }
//! assert_eq!(session.evaluate().unwrap(), 4.0);
//! assert_eq!(session.state(), SessionState::DisplayedResult);
//! assert_eq!(session.history().render(), vec!["2+2 = 4".to_string()]);
//! ```

use log::{debug, info, warn};

use crate::anscalc::config::{CalculatorConfig, ResultPolicy};
use crate::anscalc::error::{CalculatorError, CalculatorResult, HistoryError};
use crate::anscalc::evaluator::{self, format_number};
use crate::anscalc::history::{
    HistoryLedger, HistoryStore, InMemoryHistoryStore, JsonFileHistoryStore,
};
use crate::anscalc::sanitizer;
use crate::anscalc::token::{is_operator_char, Token};

/// Where the session is in its interaction cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing accumulated.
    Empty,
    /// The user is building an expression.
    Accumulating,
    /// The last evaluation succeeded.
    DisplayedResult,
    /// The last evaluation failed; the expression text is preserved.
    Error,
}

/// The expression accumulator, evaluator front end and history owner.
pub struct Session {
    expression: String,
    last_result: Option<f64>,
    state: SessionState,
    history: HistoryLedger,
    result_policy: ResultPolicy,
    collapse_operators: bool,
}

impl Session {
    /// Creates a session whose history lives at `config.history_path`, or in memory when
    /// no path is configured.
    pub fn new(config: &CalculatorConfig) -> Self {
        let store: Box<dyn HistoryStore> = match &config.history_path {
            Some(path) => Box::new(JsonFileHistoryStore::new(path.clone())),
            None => Box::new(InMemoryHistoryStore::new()),
        };
        Self::with_store(config, store)
    }

    /// Creates a session backed by an explicit history store.
    pub fn with_store(config: &CalculatorConfig, store: Box<dyn HistoryStore>) -> Self {
        Self {
            expression: String::new(),
            last_result: None,
            state: SessionState::Empty,
            history: HistoryLedger::open(store, config.max_history_entries),
            result_policy: config.result_policy,
            collapse_operators: config.collapse_operators,
        }
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn last_result(&self) -> Option<f64> {
        self.last_result
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn history(&self) -> &HistoryLedger {
        &self.history
    }

    /// Appends a token. Returns `false` when the token was refused and nothing changed.
    pub fn append(&mut self, token: Token) -> bool {
        if let Token::Digit(d) = token {
            if d > 9 {
                debug!("refusing out-of-range digit {}", d);
                return false;
            }
        }

        if token.is_operator() && self.expression.is_empty() {
            if let Some(last) = self.last_result {
                self.expression = format_number(last);
            }
        }

        if token == Token::DecimalPoint && trailing_segment(&self.expression).contains('.') {
            debug!("refusing second decimal point in {:?}", self.expression);
            return false;
        }

        if self.collapse_operators && token.is_operator() && self.expression.ends_with(is_operator_char)
        {
            self.expression.pop();
        }

        self.expression.push_str(&token.to_string());
        self.state = SessionState::Accumulating;
        true
    }

    /// Removes the final character. Returns `false` if the expression was already empty.
    pub fn delete_last(&mut self) -> bool {
        if self.expression.pop().is_none() {
            return false;
        }
        self.state = if self.expression.is_empty() {
            SessionState::Empty
        } else {
            SessionState::Accumulating
        };
        true
    }

    /// Forgets the expression and the last result. History is kept.
    pub fn clear_all(&mut self) {
        self.expression.clear();
        self.last_result = None;
        self.state = SessionState::Empty;
    }

    /// Evaluates the accumulated expression.
    ///
    /// On success the rounded result becomes the last result, is recorded in the history
    /// ledger, and the expression text is replaced or cleared according to the
    /// [`ResultPolicy`]. On failure only the state changes.
    ///
    /// # Errors
    ///
    /// - [`CalculatorError::EmptyInput`] when nothing is accumulated; the state is unchanged
    /// - [`CalculatorError::InvalidCharacter`] when the sanitizer rejects the expression
    /// - [`CalculatorError::Evaluation`] when the expression is malformed or not finite
    pub fn evaluate(&mut self) -> CalculatorResult<f64> {
        if self.expression.trim().is_empty() {
            return Err(CalculatorError::EmptyInput);
        }

        let outcome = sanitizer::prepare(&self.expression, self.last_result)
            .and_then(|prepared| evaluator::evaluate(&prepared));

        let result = match outcome {
            Ok(result) => result,
            Err(e) => {
                debug!("evaluation of {:?} failed: {}", self.expression, e);
                self.state = SessionState::Error;
                return Err(e);
            }
        };

        info!("{} = {}", self.expression, format_number(result));
        if let Err(e) = self.history.record(&self.expression, result) {
            warn!("failed to persist history: {}", e);
        }

        self.last_result = Some(result);
        self.expression = match self.result_policy {
            ResultPolicy::ReplaceWithResult => format_number(result),
            ResultPolicy::ClearInput => String::new(),
        };
        self.state = SessionState::DisplayedResult;
        Ok(result)
    }

    /// Empties the history ledger and its persisted copy.
    pub fn clear_history(&mut self) -> Result<(), HistoryError> {
        self.history.clear()
    }
}

/// The substring after the last operator or parenthesis.
fn trailing_segment(expression: &str) -> &str {
    expression
        .rsplit(|c: char| is_operator_char(c) || c == '(' || c == ')')
        .next()
        .unwrap_or(expression)
}
