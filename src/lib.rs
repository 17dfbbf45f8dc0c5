//! # anscalc
//!
//! anscalc is the core of an interactive arithmetic calculator: the part that sits between
//! button presses and the numbers on screen.
//!
//! The crate provides carefully layered pieces:
//!
//! * **Input accumulation**: [`Session`] builds an expression from discrete [`token::Token`]s,
//!   refusing a second decimal point in a number and collapsing adjacent operators
//! * **Live answers**: the `ans` placeholder is resolved to the last result when the
//!   expression is evaluated, so editing the expression afterwards stays correct
//! * **A whitelisting sanitizer**: [`sanitizer::prepare`] refuses anything that is not an
//!   arithmetic character before evaluation
//! * **A dedicated evaluator**: [`evaluator::evaluate`] parses `+ - * / % ^` and parentheses
//!   with standard precedence and rounds results to 10 decimal places
//! * **A persisted history ledger**: [`history::HistoryLedger`] mirrors every successful
//!   calculation to a [`history::HistoryStore`]
//! * **An event-handling layer**: [`Calculator`] maps keys and buttons onto the session and
//!   renders through a [`DisplaySink`]
//!
//! ## Getting Started
//!
//! ```rust
//! use anscalc::{Calculator, CalculatorConfig, RecordingDisplay, ResultPolicy};
//! use std::sync::Arc;
//!
//! anscalc::init_logger();
//!
//! let config = CalculatorConfig::default().with_result_policy(ResultPolicy::ClearInput);
//! let display = RecordingDisplay::new();
//! let mut calc = Calculator::new(config, Arc::new(display.clone()));
//!
//! for key in ["5", "Enter"] {
//!     calc.handle_key(key);
//! }
//! calc.press("ans").unwrap();
//! for key in ["*", "2", "Enter"] {
//!     calc.handle_key(key);
//! }
//!
//! assert_eq!(display.last_output().as_deref(), Some("10"));
//! assert_eq!(
//!     display.last_history().unwrap(),
//!     vec!["5 = 5".to_string(), "ans*2 = 10".to_string()]
//! );
//! ```

use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Initialise the global [`env_logger`] subscriber exactly once.
///
/// Embedding applications can opt in to `RUST_LOG` driven diagnostics without choosing a
/// logging backend upfront. Repeated calls are harmless.
///
/// ```rust
/// anscalc::init_logger();
/// log::info!("Logger is ready");
/// ```
pub fn init_logger() {
    INIT_LOGGER.call_once(|| {
        let _ = env_logger::try_init();
    });
}

// Import the top-level `anscalc` module.
pub mod anscalc;

// Re-exporting key items for easier external access.
pub use anscalc::calculator;
pub use anscalc::calculator::{Calculator, ERROR_INDICATOR};
pub use anscalc::config;
pub use anscalc::config::{CalculatorConfig, ResultPolicy};
pub use anscalc::display;
pub use anscalc::display::{ConsoleDisplay, DisplaySink, DisplayUpdate, RecordingDisplay};
pub use anscalc::error;
pub use anscalc::error::{CalculatorError, CalculatorResult, HistoryError};
pub use anscalc::evaluator;
pub use anscalc::history;
pub use anscalc::history::{HistoryEntry, HistoryLedger, HistoryStore};
pub use anscalc::sanitizer;
pub use anscalc::session;
pub use anscalc::session::{Session, SessionState};
pub use anscalc::token;
