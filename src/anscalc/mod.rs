// src/anscalc/mod.rs

pub mod calculator;
pub mod config;
pub mod display;
pub mod error;
pub mod evaluator;
pub mod history;
pub mod sanitizer;
pub mod session;
pub mod token;

// Let's explicitly export Session so we don't have to access it via anscalc::session::Session
// and instead as anscalc::Session
pub use calculator::Calculator;
pub use session::{Session, SessionState};
