use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anscalc::token::InputEvent;
use anscalc::{Calculator, CalculatorConfig, ConsoleDisplay};

// Run from the root folder of the repo as follows:
// RUST_LOG=debug cargo run --example interactive_calculator
//
// Type an expression and finish it with `=` (or type `Enter` on its own), e.g. `12*(3+4)=`.
// `ans` inserts the last answer, `Backspace`/`Escape` behave like their keys,
// `clear-history` empties the ledger and `quit` exits.
// Set ANSCALC_HISTORY to choose where history is persisted.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    anscalc::init_logger();

    let history_path = env::var("ANSCALC_HISTORY")
        .map(PathBuf::from)
        .unwrap_or_else(|_| env::temp_dir().join("anscalc_history.json"));
    println!("History file: {}", history_path.display());

    let config = CalculatorConfig::default().with_history_path(history_path);
    let mut calc = Calculator::new(config, Arc::new(ConsoleDisplay));

    let stdin = io::stdin();
    loop {
        print!("\n> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        for word in line.split_whitespace() {
            match word {
                "quit" | "exit" => return Ok(()),
                "clear-history" => calc.handle(InputEvent::ClearHistory),
                "Enter" | "Backspace" | "Escape" => {
                    calc.handle_key(word);
                }
                "ans" => calc.press(word)?,
                _ => feed_characters(&mut calc, word),
            }
        }
    }

    Ok(())
}

fn feed_characters(calc: &mut Calculator, word: &str) {
    let mut rest = word;
    while let Some(ch) = rest.chars().next() {
        if let Some(tail) = rest.strip_prefix("ans") {
            let _ = calc.press("ans");
            rest = tail;
            continue;
        }

        let key = &rest[..ch.len_utf8()];
        if !calc.handle_key(key) && calc.press(key).is_err() {
            println!("  ignored '{}'", key);
        }
        rest = &rest[ch.len_utf8()..];
    }
}
