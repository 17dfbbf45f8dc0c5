//! Rendering collaborators for the [`Calculator`](crate::Calculator).
//!
//! A front end implements [`DisplaySink`] to receive the input line, the output line and
//! the history lines. All methods default to no-ops, so a sink only overrides what it
//! renders.

use std::sync::{Arc, Mutex};

/// Receives everything the calculator wants shown.
pub trait DisplaySink {
    /// The in-progress expression (`"0"` when empty).
    fn show_input(&self, _text: &str) {}

    /// The latest result, `"0"` after a clear, or `"Error"`.
    fn show_output(&self, _text: &str) {}

    /// The rendered history ledger.
    fn show_history(&self, _lines: &[String]) {}
}

/// Prints every update to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleDisplay;

impl DisplaySink for ConsoleDisplay {
    fn show_input(&self, text: &str) {
        println!("  input : {}", text);
    }

    fn show_output(&self, text: &str) {
        println!("  output: {}", text);
    }

    fn show_history(&self, lines: &[String]) {
        println!("  history:");
        for line in lines {
            println!("    {}", line);
        }
    }
}

/// One call received by a [`RecordingDisplay`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayUpdate {
    Input(String),
    Output(String),
    History(Vec<String>),
}

/// Records every update, for assertions in tests and headless front ends.
///
/// Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingDisplay {
    updates: Arc<Mutex<Vec<DisplayUpdate>>>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every update received so far, oldest first.
    pub fn updates(&self) -> Vec<DisplayUpdate> {
        self.lock().clone()
    }

    pub fn last_input(&self) -> Option<String> {
        self.lock().iter().rev().find_map(|u| match u {
            DisplayUpdate::Input(text) => Some(text.clone()),
            _ => None,
        })
    }

    pub fn last_output(&self) -> Option<String> {
        self.lock().iter().rev().find_map(|u| match u {
            DisplayUpdate::Output(text) => Some(text.clone()),
            _ => None,
        })
    }

    pub fn last_history(&self) -> Option<Vec<String>> {
        self.lock().iter().rev().find_map(|u| match u {
            DisplayUpdate::History(lines) => Some(lines.clone()),
            _ => None,
        })
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<DisplayUpdate>> {
        self.updates.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl DisplaySink for RecordingDisplay {
    fn show_input(&self, text: &str) {
        self.lock().push(DisplayUpdate::Input(text.to_string()));
    }

    fn show_output(&self, text: &str) {
        self.lock().push(DisplayUpdate::Output(text.to_string()));
    }

    fn show_history(&self, lines: &[String]) {
        self.lock().push(DisplayUpdate::History(lines.to_vec()));
    }
}
