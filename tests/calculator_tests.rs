use std::sync::Arc;

use anscalc::history::InMemoryHistoryStore;
use anscalc::token::InputEvent;
use anscalc::{
    Calculator, CalculatorConfig, CalculatorError, DisplayUpdate, RecordingDisplay, ResultPolicy,
    ERROR_INDICATOR,
};
use tempfile::tempdir;

fn calculator(config: CalculatorConfig) -> (Calculator, RecordingDisplay) {
    let display = RecordingDisplay::new();
    let calc = Calculator::with_store(
        config,
        Box::new(InMemoryHistoryStore::new()),
        Arc::new(display.clone()),
    );
    (calc, display)
}

fn keys(calc: &mut Calculator, sequence: &[&str]) {
    for key in sequence {
        calc.handle_key(key);
    }
}

#[test]
fn test_initial_frame() {
    let (_calc, display) = calculator(CalculatorConfig::default());
    assert_eq!(
        display.updates(),
        vec![
            DisplayUpdate::Input("0".into()),
            DisplayUpdate::Output("0".into()),
            DisplayUpdate::History(vec!["No history".into()]),
        ]
    );
}

#[test]
fn test_every_append_refreshes_input() {
    let (mut calc, display) = calculator(CalculatorConfig::default());
    display.clear();

    keys(&mut calc, &["1", "+", "2"]);
    assert_eq!(
        display.updates(),
        vec![
            DisplayUpdate::Input("1".into()),
            DisplayUpdate::Input("1+".into()),
            DisplayUpdate::Input("1+2".into()),
        ]
    );
}

#[test]
fn test_refused_decimal_does_not_refresh() {
    let (mut calc, display) = calculator(CalculatorConfig::default());
    keys(&mut calc, &["1", "."]);
    display.clear();

    calc.handle_key(".");
    assert!(display.updates().is_empty());
    assert_eq!(calc.session().expression(), "1.");
}

#[test]
fn test_evaluate_shows_result_and_history() {
    let (mut calc, display) = calculator(CalculatorConfig::default());
    keys(&mut calc, &["2", "^", "1", "0", "Enter"]);

    assert_eq!(display.last_output().as_deref(), Some("1024"));
    assert_eq!(display.last_input().as_deref(), Some("1024"));
    assert_eq!(display.last_history().unwrap(), vec!["2^10 = 1024"]);
}

#[test]
fn test_clear_input_policy_shows_zero_after_evaluate() {
    let config = CalculatorConfig::default().with_result_policy(ResultPolicy::ClearInput);
    let (mut calc, display) = calculator(config);
    keys(&mut calc, &["3", "*", "3", "="]);

    assert_eq!(display.last_output().as_deref(), Some("9"));
    assert_eq!(display.last_input().as_deref(), Some("0"));
}

#[test]
fn test_errors_become_indicator() {
    let (mut calc, display) = calculator(CalculatorConfig::default());
    keys(&mut calc, &["(", "2", "+", "3", "Enter"]);

    assert_eq!(display.last_output().as_deref(), Some(ERROR_INDICATOR));
    assert_eq!(calc.session().expression(), "(2+3");
    assert_eq!(display.last_history().unwrap(), vec!["No history"]);

    keys(&mut calc, &[")", "Enter"]);
    assert_eq!(display.last_output().as_deref(), Some("5"));
}

#[test]
fn test_empty_evaluate_shows_nothing() {
    let (mut calc, display) = calculator(CalculatorConfig::default());
    display.clear();
    calc.handle_key("Enter");
    assert!(display.updates().is_empty());
}

#[test]
fn test_backspace_and_escape() {
    let (mut calc, display) = calculator(CalculatorConfig::default());
    keys(&mut calc, &["4", "2", "Backspace"]);
    assert_eq!(display.last_input().as_deref(), Some("4"));

    keys(&mut calc, &["Enter", "Escape"]);
    assert_eq!(display.last_input().as_deref(), Some("0"));
    assert_eq!(display.last_output().as_deref(), Some("0"));
    assert_eq!(calc.session().last_result(), None);
}

#[test]
fn test_unmapped_keys_are_ignored() {
    let (mut calc, display) = calculator(CalculatorConfig::default());
    display.clear();
    assert!(!calc.handle_key("a"));
    assert!(!calc.handle_key("Shift"));
    assert!(display.updates().is_empty());
}

#[test]
fn test_buttons() {
    let (mut calc, display) = calculator(CalculatorConfig::default());
    for value in ["6", "×", "7"] {
        calc.press(value).unwrap();
    }
    calc.handle(InputEvent::Evaluate);
    assert_eq!(display.last_output().as_deref(), Some("42"));

    assert_eq!(
        calc.press("sqrt"),
        Err(CalculatorError::UnknownToken("sqrt".into()))
    );
}

#[test]
fn test_answer_button_chains_results() {
    let config = CalculatorConfig::default().with_result_policy(ResultPolicy::ClearInput);
    let (mut calc, display) = calculator(config);

    keys(&mut calc, &["1", "0", "Enter"]);
    calc.press("ans").unwrap();
    keys(&mut calc, &["/", "4", "Enter"]);
    assert_eq!(display.last_output().as_deref(), Some("2.5"));

    keys(&mut calc, &["-", "1", "Enter"]);
    assert_eq!(display.last_output().as_deref(), Some("1.5"));
    assert_eq!(
        display.last_history().unwrap(),
        vec!["10 = 10", "ans/4 = 2.5", "2.5-1 = 1.5"]
    );
}

#[test]
fn test_clear_history_event() {
    let (mut calc, display) = calculator(CalculatorConfig::default());
    keys(&mut calc, &["1", "+", "1", "Enter"]);
    calc.handle(InputEvent::ClearHistory);
    assert_eq!(display.last_history().unwrap(), vec!["No history"]);
    assert_eq!(calc.session().expression(), "2");
}

#[test]
fn test_history_survives_restart() {
    let dir = tempdir().unwrap();
    let config = CalculatorConfig::default().with_history_path(dir.path().join("history.json"));

    {
        let display = RecordingDisplay::new();
        let mut calc = Calculator::new(config.clone(), Arc::new(display));
        keys(&mut calc, &["7", "*", "6", "Enter"]);
    }

    let display = RecordingDisplay::new();
    let calc = Calculator::new(config, Arc::new(display.clone()));
    assert_eq!(display.last_history().unwrap(), vec!["7*6 = 42"]);
    // results do not survive, only the ledger does
    assert_eq!(calc.session().last_result(), None);
}
