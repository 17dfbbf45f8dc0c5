//! Placeholder substitution and the evaluation whitelist.
//!
//! [`prepare`] is the only path from accumulated expression text to the
//! [`evaluator`](crate::evaluator). It resolves the `ans` placeholder, normalises alternate
//! operator spellings and then refuses anything that is not an arithmetic character.
//!
//! ```rust
//! use anscalc::sanitizer::prepare;
//! use anscalc::CalculatorError;
//!
//! assert_eq!(prepare("ans+1", Some(5.0)).unwrap(), "(5)+1");
//! assert_eq!(prepare("ans*2", Some(-3.0)).unwrap(), "(-3)*2");
//! assert_eq!(prepare("ans", None).unwrap(), "0");
//! assert_eq!(prepare("6×2÷3", None).unwrap(), "6*2/3");
//! assert!(matches!(
//!     prepare("alert(1)", None),
//!     Err(CalculatorError::InvalidCharacter { character: 'a', position: 0 })
//! ));
//! ```

use log::debug;

use crate::anscalc::error::{CalculatorError, CalculatorResult};
use crate::anscalc::evaluator::{format_number, POWER_OPERATOR};

/// Textual stand-in for the last successfully computed result.
pub const ANSWER_PLACEHOLDER: &str = "ans";

/// Alternate spellings folded onto the evaluator's operators, applied in order.
const GLYPH_REPLACEMENTS: [(&str, &str); 4] = [("×", "*"), ("÷", "/"), ("−", "-"), ("**", "^")];

/// Returns true if `ch` may reach the evaluator.
pub fn is_whitelisted(ch: char) -> bool {
    ch.is_ascii_digit()
        || ch.is_whitespace()
        || matches!(ch, '+' | '-' | '*' | '/' | '%' | '(' | ')' | '.')
        || ch == POWER_OPERATOR
}

/// Replaces every `ans` with the parenthesised last result, or `0` when there is none.
///
/// The parentheses keep precedence intact when the result is negative.
pub fn substitute_answer(expression: &str, last_result: Option<f64>) -> String {
    let replacement = match last_result {
        Some(value) => format!("({})", format_number(value)),
        None => "0".to_string(),
    };
    expression.replace(ANSWER_PLACEHOLDER, &replacement)
}

fn normalize_glyphs(expression: &str) -> String {
    GLYPH_REPLACEMENTS
        .iter()
        .fold(expression.to_string(), |acc, (from, to)| acc.replace(from, to))
}

/// Rejects the first character outside the whitelist.
pub fn validate(expression: &str) -> CalculatorResult<()> {
    match expression.char_indices().find(|&(_, ch)| !is_whitelisted(ch)) {
        Some((position, character)) => {
            debug!(
                "rejecting {:?}: '{}' at {} is not whitelisted",
                expression, character, position
            );
            Err(CalculatorError::InvalidCharacter {
                character,
                position,
            })
        }
        None => Ok(()),
    }
}

/// Produces an expression that is safe to hand to the evaluator.
///
/// # Errors
///
/// Returns [`CalculatorError::InvalidCharacter`] when anything other than digits,
/// `+ - * / % ^ ( ) .` and whitespace remains after substitution and normalisation.
pub fn prepare(expression: &str, last_result: Option<f64>) -> CalculatorResult<String> {
    let substituted = substitute_answer(expression, last_result);
    let prepared = normalize_glyphs(&substituted);
    validate(&prepared)?;
    Ok(prepared)
}
