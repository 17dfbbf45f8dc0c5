//! Input atoms and the mapping from UI controls and keys onto them.
//!
//! A [`Token`] is the only thing the [`Session`](crate::Session) accepts for appending.
//! Buttons carry a textual value parsed through [`FromStr`]; keyboard keys go through
//! [`InputEvent::from_key`], which also produces the non-append actions (evaluate,
//! delete-last, clear-all).
//!
//! ```rust
//! use anscalc::token::{BinaryOperator, InputEvent, Token};
//!
//! let token: Token = "ans".parse().unwrap();
//! assert_eq!(token, Token::Answer);
//! assert_eq!("×".parse::<Token>().unwrap(), Token::Operator(BinaryOperator::Multiply));
//! assert_eq!(InputEvent::from_key("Enter"), Some(InputEvent::Evaluate));
//! assert_eq!(InputEvent::from_key("F5"), None);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::anscalc::error::CalculatorError;
use crate::anscalc::sanitizer::ANSWER_PLACEHOLDER;

/// One of the six binary operators a user can enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    Power,
}

impl BinaryOperator {
    pub const ALL: [BinaryOperator; 6] = [
        BinaryOperator::Add,
        BinaryOperator::Subtract,
        BinaryOperator::Multiply,
        BinaryOperator::Divide,
        BinaryOperator::Remainder,
        BinaryOperator::Power,
    ];

    /// The character this operator is written as in expression text.
    pub fn symbol(self) -> char {
        match self {
            BinaryOperator::Add => '+',
            BinaryOperator::Subtract => '-',
            BinaryOperator::Multiply => '*',
            BinaryOperator::Divide => '/',
            BinaryOperator::Remainder => '%',
            BinaryOperator::Power => '^',
        }
    }

    pub fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(BinaryOperator::Add),
            '-' => Some(BinaryOperator::Subtract),
            '*' | '×' => Some(BinaryOperator::Multiply),
            '/' | '÷' => Some(BinaryOperator::Divide),
            '%' => Some(BinaryOperator::Remainder),
            '^' => Some(BinaryOperator::Power),
            _ => None,
        }
    }
}

/// Returns true for any character written by a [`BinaryOperator`].
pub fn is_operator_char(ch: char) -> bool {
    BinaryOperator::ALL.iter().any(|op| op.symbol() == ch)
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// An atom the input accumulator may append.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// A single decimal digit in `0..=9`. Prefer [`Token::digit`]; the session refuses
    /// anything larger.
    Digit(u8),
    DecimalPoint,
    Operator(BinaryOperator),
    OpenParen,
    CloseParen,
    /// The live `ans` placeholder, resolved to the last result at evaluation time.
    Answer,
}

impl Token {
    /// Builds a digit token, rejecting anything above 9.
    pub fn digit(value: u8) -> Option<Self> {
        (value <= 9).then_some(Token::Digit(value))
    }

    pub fn is_operator(&self) -> bool {
        matches!(self, Token::Operator(_))
    }

    fn from_char(ch: char) -> Option<Self> {
        match ch {
            '0'..='9' => Token::digit(ch as u8 - b'0'),
            '.' => Some(Token::DecimalPoint),
            '(' => Some(Token::OpenParen),
            ')' => Some(Token::CloseParen),
            _ => BinaryOperator::from_symbol(ch).map(Token::Operator),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Digit(d) => write!(f, "{}", d),
            Token::DecimalPoint => write!(f, "."),
            Token::Operator(op) => write!(f, "{}", op),
            Token::OpenParen => write!(f, "("),
            Token::CloseParen => write!(f, ")"),
            Token::Answer => write!(f, "{}", ANSWER_PLACEHOLDER),
        }
    }
}

impl FromStr for Token {
    type Err = CalculatorError;

    /// Parses a button value.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == ANSWER_PLACEHOLDER {
            return Ok(Token::Answer);
        }

        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => {
                Token::from_char(ch).ok_or_else(|| CalculatorError::UnknownToken(value.to_string()))
            }
            _ => Err(CalculatorError::UnknownToken(value.to_string())),
        }
    }
}

/// A discrete user action delivered by a button or a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Append(Token),
    Evaluate,
    DeleteLast,
    ClearAll,
    ClearHistory,
}

impl InputEvent {
    /// Maps a keyboard key name onto an event.
    ///
    /// Digits, `+ - * / ^ ( ) % .`, `Enter`/`=`, `Backspace` and `Escape` are recognised;
    /// every other key is ignored.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Enter" | "=" => Some(InputEvent::Evaluate),
            "Backspace" => Some(InputEvent::DeleteLast),
            "Escape" => Some(InputEvent::ClearAll),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Token::from_char(ch)
                        // glyphs only come from buttons
                        .filter(|_| ch.is_ascii())
                        .map(InputEvent::Append),
                    _ => None,
                }
            }
        }
    }
}

impl From<Token> for InputEvent {
    fn from(token: Token) -> Self {
        InputEvent::Append(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_tokens_are_bounded() {
        assert_eq!(Token::digit(9), Some(Token::Digit(9)));
        assert_eq!(Token::digit(10), None);
    }

    #[test]
    fn tokens_render_as_expression_text() {
        let text: String = [
            Token::Answer,
            Token::Operator(BinaryOperator::Power),
            Token::OpenParen,
            Token::Digit(1),
            Token::DecimalPoint,
            Token::Digit(5),
            Token::CloseParen,
        ]
        .iter()
        .map(|t| t.to_string())
        .collect();
        assert_eq!(text, "ans^(1.5)");
    }

    #[test]
    fn unknown_button_values_are_rejected() {
        assert_eq!(
            "sin".parse::<Token>(),
            Err(CalculatorError::UnknownToken("sin".into()))
        );
        assert!("".parse::<Token>().is_err());
        assert!("12".parse::<Token>().is_err());
    }

    #[test]
    fn keyboard_mapping_follows_key_handler() {
        assert_eq!(
            InputEvent::from_key("7"),
            Some(InputEvent::Append(Token::Digit(7)))
        );
        assert_eq!(
            InputEvent::from_key("%"),
            Some(InputEvent::Append(Token::Operator(BinaryOperator::Remainder)))
        );
        assert_eq!(InputEvent::from_key("Backspace"), Some(InputEvent::DeleteLast));
        assert_eq!(InputEvent::from_key("Escape"), Some(InputEvent::ClearAll));
        assert_eq!(InputEvent::from_key("a"), None);
        assert_eq!(InputEvent::from_key("×"), None);
    }
}
