//! # Arithmetic Evaluator
//!
//! A dedicated evaluator for the sanitized expressions produced by
//! [`prepare`](crate::sanitizer::prepare). It understands exactly the calculator's
//! vocabulary and nothing more, so there is no route from user input to general code
//! execution.
//!
//! ## Grammar
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/' | '%') unary)*
//! unary   := ('+' | '-') unary | power
//! power   := primary ('^' unary)?
//! primary := number | '(' expr ')'
//! number  := digits with at most one '.', e.g. `12`, `1.5`, `5.`, `.5`
//! ```
//!
//! `^` is right-associative and binds tighter than a leading sign, so `-2^2` is `-4` and
//! `2^3^2` is `512`. `%` is the floating-point remainder; its sign follows the dividend.
//!
//! ## Results
//!
//! Every intermediate value must be finite: division by zero, `0 % 0`, overflowing powers
//! and roots of negative numbers are all reported as [`CalculatorError::Evaluation`].
//! Successful results are rounded to [`RESULT_DECIMALS`] fractional digits.
//!
//! ```rust
//! use anscalc::evaluator::{evaluate, format_number};
//!
//! assert_eq!(evaluate("2 + 3 * 4").unwrap(), 14.0);
//! assert_eq!(evaluate("(2 + 3) * 4").unwrap(), 20.0);
//! assert_eq!(format_number(evaluate("1/3").unwrap()), "0.3333333333");
//! assert!(evaluate("5/0").is_err());
//! ```

use std::iter::Peekable;
use std::vec::IntoIter;

use log::trace;

use crate::anscalc::error::{CalculatorError, CalculatorResult};
use crate::anscalc::token::BinaryOperator;

/// Number of fractional digits results are rounded to.
pub const RESULT_DECIMALS: usize = 10;

/// The evaluator's power operator.
pub const POWER_OPERATOR: char = '^';

/// Deepest parenthesis / sign nesting accepted before giving up.
const MAX_NESTING: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Lexeme {
    Number(f64),
    Operator(BinaryOperator),
    OpenParen,
    CloseParen,
}

fn describe(lexeme: Option<Lexeme>) -> String {
    match lexeme {
        Some(Lexeme::Number(n)) => format!("number {}", format_number(n)),
        Some(Lexeme::Operator(op)) => format!("operator '{}'", op),
        Some(Lexeme::OpenParen) => "'('".to_string(),
        Some(Lexeme::CloseParen) => "')'".to_string(),
        None => "end of input".to_string(),
    }
}

fn tokenize(expression: &str) -> CalculatorResult<Vec<Lexeme>> {
    let mut lexemes = Vec::new();
    let mut chars = expression.char_indices().peekable();

    while let Some(&(start, ch)) = chars.peek() {
        let lexeme = match ch {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '0'..='9' | '.' => {
                let mut end = start;
                while let Some(&(i, c)) = chars.peek() {
                    if !(c.is_ascii_digit() || c == '.') {
                        break;
                    }
                    end = i + c.len_utf8();
                    chars.next();
                }

                let literal = &expression[start..end];
                let value = literal.parse::<f64>().map_err(|_| {
                    CalculatorError::evaluation(format!("malformed number '{}'", literal))
                })?;
                if !value.is_finite() {
                    return Err(CalculatorError::evaluation(format!(
                        "number '{}' is too large",
                        literal
                    )));
                }
                Lexeme::Number(value)
            }
            '(' => {
                chars.next();
                Lexeme::OpenParen
            }
            ')' => {
                chars.next();
                Lexeme::CloseParen
            }
            // glyph spellings are the sanitizer's job
            other => match BinaryOperator::from_symbol(other).filter(|_| other.is_ascii()) {
                Some(op) => {
                    chars.next();
                    Lexeme::Operator(op)
                }
                None => {
                    return Err(CalculatorError::InvalidCharacter {
                        character: other,
                        position: start,
                    })
                }
            },
        };
        lexemes.push(lexeme);
    }

    Ok(lexemes)
}

struct Parser {
    lexemes: Peekable<IntoIter<Lexeme>>,
    depth: usize,
}

impl Parser {
    fn new(lexemes: Vec<Lexeme>) -> Self {
        Self {
            lexemes: lexemes.into_iter().peekable(),
            depth: 0,
        }
    }

    fn parse(mut self) -> CalculatorResult<f64> {
        let value = self.parse_expr()?;
        match self.lexemes.next() {
            None => Ok(value),
            extra => Err(CalculatorError::evaluation(format!(
                "unexpected {}",
                describe(extra)
            ))),
        }
    }

    fn parse_expr(&mut self) -> CalculatorResult<f64> {
        let mut lhs = self.parse_term()?;

        while let Some(&Lexeme::Operator(op @ (BinaryOperator::Add | BinaryOperator::Subtract))) =
            self.lexemes.peek()
        {
            self.lexemes.next();
            let rhs = self.parse_term()?;
            lhs = apply(op, lhs, rhs)?;
        }

        Ok(lhs)
    }

    fn parse_term(&mut self) -> CalculatorResult<f64> {
        let mut lhs = self.parse_unary()?;

        while let Some(&Lexeme::Operator(
            op @ (BinaryOperator::Multiply | BinaryOperator::Divide | BinaryOperator::Remainder),
        )) = self.lexemes.peek()
        {
            self.lexemes.next();
            let rhs = self.parse_unary()?;
            lhs = apply(op, lhs, rhs)?;
        }

        Ok(lhs)
    }

    fn parse_unary(&mut self) -> CalculatorResult<f64> {
        match self.lexemes.peek() {
            Some(&Lexeme::Operator(op @ (BinaryOperator::Add | BinaryOperator::Subtract))) => {
                self.lexemes.next();
                self.enter()?;
                let operand = self.parse_unary();
                self.depth -= 1;
                let operand = operand?;
                Ok(if op == BinaryOperator::Subtract {
                    -operand
                } else {
                    operand
                })
            }
            _ => self.parse_power(),
        }
    }

    fn parse_power(&mut self) -> CalculatorResult<f64> {
        let base = self.parse_primary()?;

        if let Some(&Lexeme::Operator(BinaryOperator::Power)) = self.lexemes.peek() {
            self.lexemes.next();
            self.enter()?;
            let exponent = self.parse_unary();
            self.depth -= 1;
            return apply(BinaryOperator::Power, base, exponent?);
        }

        Ok(base)
    }

    fn parse_primary(&mut self) -> CalculatorResult<f64> {
        match self.lexemes.next() {
            Some(Lexeme::Number(n)) => Ok(n),
            Some(Lexeme::OpenParen) => {
                self.enter()?;
                let inner = self.parse_expr();
                self.depth -= 1;
                let inner = inner?;
                match self.lexemes.next() {
                    Some(Lexeme::CloseParen) => Ok(inner),
                    other => Err(CalculatorError::evaluation(format!(
                        "expected ')' but got {}",
                        describe(other)
                    ))),
                }
            }
            other => Err(CalculatorError::evaluation(format!(
                "unexpected {}",
                describe(other)
            ))),
        }
    }

    fn enter(&mut self) -> CalculatorResult<()> {
        if self.depth >= MAX_NESTING {
            return Err(CalculatorError::evaluation("expression is nested too deeply"));
        }
        self.depth += 1;
        Ok(())
    }
}

fn apply(op: BinaryOperator, lhs: f64, rhs: f64) -> CalculatorResult<f64> {
    let value = match op {
        BinaryOperator::Add => lhs + rhs,
        BinaryOperator::Subtract => lhs - rhs,
        BinaryOperator::Multiply => lhs * rhs,
        BinaryOperator::Divide => lhs / rhs,
        BinaryOperator::Remainder => lhs % rhs,
        BinaryOperator::Power => lhs.powf(rhs),
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalculatorError::evaluation(format!(
            "{} {} {} is not a finite number",
            format_number(lhs),
            op,
            format_number(rhs)
        )))
    }
}

/// Evaluates a sanitized expression and returns the rounded result.
///
/// # Errors
///
/// - [`CalculatorError::EmptyInput`] if the expression is empty or whitespace only
/// - [`CalculatorError::InvalidCharacter`] for anything outside the evaluator's vocabulary
/// - [`CalculatorError::Evaluation`] for malformed syntax or a non-finite value
pub fn evaluate(expression: &str) -> CalculatorResult<f64> {
    if expression.trim().is_empty() {
        return Err(CalculatorError::EmptyInput);
    }

    let lexemes = tokenize(expression)?;
    trace!("lexemes for {:?}: {:?}", expression, lexemes);

    let raw = Parser::new(lexemes).parse()?;
    if !raw.is_finite() {
        return Err(CalculatorError::evaluation("result is not a finite number"));
    }

    Ok(round_result(raw))
}

/// Rounds to at most [`RESULT_DECIMALS`] fractional digits and folds `-0` into `0`.
///
/// ```rust
/// use anscalc::evaluator::round_result;
///
/// assert_eq!(round_result(0.1 + 0.2), 0.3);
/// assert_eq!(round_result(2.0 / 3.0), 0.6666666667);
/// assert!(round_result(-0.00000000001).is_sign_positive());
/// ```
pub fn round_result(value: f64) -> f64 {
    let rounded = format!("{:.*}", RESULT_DECIMALS, value)
        .parse::<f64>()
        .unwrap_or(value);
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Renders a number in plain decimal notation, the form used for display, history lines
/// and `ans` substitution.
///
/// The output never uses exponent notation, so it can always be fed back into
/// [`evaluate`].
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}
