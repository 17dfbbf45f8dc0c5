//! Event-handling layer between a front end and the [`Session`].
//!
//! [`Calculator`] turns button values, key names and [`InputEvent`]s into session calls,
//! pushes the resulting state to a [`DisplaySink`], and converts every evaluation failure
//! into the single `"Error"` output indicator. Nothing fails past this layer.
//!
//! ```rust
//! use anscalc::{Calculator, CalculatorConfig, DisplayUpdate, RecordingDisplay};
//! use std::sync::Arc;
//!
//! let display = RecordingDisplay::new();
//! let mut calc = Calculator::new(CalculatorConfig::default(), Arc::new(display.clone()));
//!
//! for key in ["1", "/", "3", "Enter"] {
//!     calc.handle_key(key);
//! }
//! assert_eq!(display.last_output().as_deref(), Some("0.3333333333"));
//!
//! for key in ["/", "0", "Enter"] {
//!     calc.handle_key(key);
//! }
//! assert_eq!(display.last_output().as_deref(), Some("Error"));
//! assert_eq!(calc.session().expression(), "0.3333333333/0");
//! ```

use std::sync::Arc;

use log::{debug, warn};

use crate::anscalc::config::CalculatorConfig;
use crate::anscalc::display::DisplaySink;
use crate::anscalc::error::CalculatorError;
use crate::anscalc::evaluator::format_number;
use crate::anscalc::history::HistoryStore;
use crate::anscalc::session::Session;
use crate::anscalc::token::{InputEvent, Token};

/// Output text shown for any failed evaluation.
pub const ERROR_INDICATOR: &str = "Error";

/// Input text shown while the expression is empty.
const EMPTY_INPUT: &str = "0";

/// A [`Session`] wired to a display.
pub struct Calculator {
    session: Session,
    display: Arc<dyn DisplaySink>,
}

impl Calculator {
    /// Builds the session from `config` and paints the initial frame.
    pub fn new(config: CalculatorConfig, display: Arc<dyn DisplaySink>) -> Self {
        Self::from_session(Session::new(&config), display)
    }

    /// Like [`Calculator::new`] with an explicit history store.
    pub fn with_store(
        config: CalculatorConfig,
        store: Box<dyn HistoryStore>,
        display: Arc<dyn DisplaySink>,
    ) -> Self {
        Self::from_session(Session::with_store(&config, store), display)
    }

    fn from_session(session: Session, display: Arc<dyn DisplaySink>) -> Self {
        let calculator = Self { session, display };
        calculator.refresh_input();
        calculator.display.show_output(EMPTY_INPUT);
        calculator.refresh_history();
        calculator
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Applies one user action.
    pub fn handle(&mut self, event: InputEvent) {
        debug!("handling {:?}", event);
        match event {
            InputEvent::Append(token) => {
                if self.session.append(token) {
                    self.refresh_input();
                }
            }
            InputEvent::Evaluate => self.evaluate(),
            InputEvent::DeleteLast => {
                if self.session.delete_last() {
                    self.refresh_input();
                }
            }
            InputEvent::ClearAll => {
                self.session.clear_all();
                self.refresh_input();
                self.display.show_output(EMPTY_INPUT);
            }
            InputEvent::ClearHistory => {
                if let Err(e) = self.session.clear_history() {
                    warn!("failed to remove persisted history: {}", e);
                }
                self.refresh_history();
            }
        }
    }

    /// Applies a keyboard key. Returns `false` for keys the calculator ignores.
    pub fn handle_key(&mut self, key: &str) -> bool {
        match InputEvent::from_key(key) {
            Some(event) => {
                self.handle(event);
                true
            }
            None => false,
        }
    }

    /// Applies a button value such as `"7"`, `"×"` or `"ans"`.
    pub fn press(&mut self, value: &str) -> Result<(), CalculatorError> {
        let token: Token = value.parse()?;
        self.handle(InputEvent::Append(token));
        Ok(())
    }

    fn evaluate(&mut self) {
        match self.session.evaluate() {
            Ok(result) => {
                self.display.show_output(&format_number(result));
                self.refresh_history();
                self.refresh_input();
            }
            Err(CalculatorError::EmptyInput) => {}
            Err(e) => {
                debug!("showing error indicator: {}", e);
                self.display.show_output(ERROR_INDICATOR);
            }
        }
    }

    fn refresh_input(&self) {
        let expression = self.session.expression();
        if expression.is_empty() {
            self.display.show_input(EMPTY_INPUT);
        } else {
            self.display.show_input(expression);
        }
    }

    fn refresh_history(&self) {
        self.display.show_history(&self.session.history().render());
    }
}
