//! Configuration for a calculator session.
//!
//! [`CalculatorConfig`] gathers the policy choices that differ between calculator front
//! ends plus the history settings. Users construct it manually — no file parsing
//! dependencies are required.
//!
//! # Example
//!
//! ```rust
//! use anscalc::{CalculatorConfig, ResultPolicy};
//! use std::path::PathBuf;
//!
//! // Defaults: replace input with the result, collapse operators, unbounded history.
//! let config = CalculatorConfig::default();
//! assert_eq!(config.result_policy, ResultPolicy::ReplaceWithResult);
//!
//! let config = CalculatorConfig::default()
//!     .with_result_policy(ResultPolicy::ClearInput)
//!     .with_history_path(PathBuf::from("/tmp/calculator_history.json"))
//!     .with_max_history_entries(50);
//! assert_eq!(config.max_history_entries, Some(50));
//! ```

use std::path::PathBuf;

/// What happens to the expression text after a successful evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultPolicy {
    /// The expression text becomes the formatted result, ready for further editing.
    #[default]
    ReplaceWithResult,
    /// The expression text is cleared; the next operator chains from the last result.
    ClearInput,
}

/// Session and history settings.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorConfig {
    /// See [`ResultPolicy`].
    pub result_policy: ResultPolicy,
    /// Replace a trailing operator instead of appending a second one (`5+` then `*` gives `5*`).
    pub collapse_operators: bool,
    /// File the history ledger is persisted to. `None` keeps history in memory only.
    pub history_path: Option<PathBuf>,
    /// Retention cap for the history ledger; the oldest entries are evicted first.
    /// `None` means unbounded.
    pub max_history_entries: Option<usize>,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            result_policy: ResultPolicy::default(),
            collapse_operators: true,
            history_path: None,
            max_history_entries: None,
        }
    }
}

impl CalculatorConfig {
    pub fn with_result_policy(mut self, policy: ResultPolicy) -> Self {
        self.result_policy = policy;
        self
    }

    pub fn with_operator_collapse(mut self, collapse: bool) -> Self {
        self.collapse_operators = collapse;
        self
    }

    pub fn with_history_path(mut self, path: PathBuf) -> Self {
        self.history_path = Some(path);
        self
    }

    pub fn with_max_history_entries(mut self, max: usize) -> Self {
        self.max_history_entries = Some(max);
        self
    }
}
