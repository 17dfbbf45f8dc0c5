//! Test suite for the arithmetic evaluator
//!
//! Tests cover:
//! - Basic arithmetic operations
//! - Order of operations, associativity and parentheses
//! - Signs, remainders and powers
//! - Result rounding and re-evaluation of rendered results
//! - Error conditions and edge cases

use anscalc::evaluator::{evaluate, format_number, round_result};
use anscalc::CalculatorError;

#[test]
fn test_simple_arithmetic() {
    assert_eq!(evaluate("2+2").unwrap(), 4.0);
    assert_eq!(evaluate("10 - 3").unwrap(), 7.0);
    assert_eq!(evaluate("4 * 5").unwrap(), 20.0);
    assert_eq!(evaluate("20 / 4").unwrap(), 5.0);
}

#[test]
fn test_exponentiation() {
    assert_eq!(evaluate("2^3").unwrap(), 8.0);
    assert_eq!(evaluate("10^2").unwrap(), 100.0);
    assert_eq!(evaluate("2^-1").unwrap(), 0.5);
    assert_eq!(evaluate("4^0.5").unwrap(), 2.0);
}

#[test]
fn test_power_is_right_associative_and_binds_tighter_than_sign() {
    assert_eq!(evaluate("2^3^2").unwrap(), 512.0);
    assert_eq!(evaluate("-2^2").unwrap(), -4.0);
    assert_eq!(evaluate("(-2)^2").unwrap(), 4.0);
}

#[test]
fn test_modulo() {
    assert_eq!(evaluate("17 % 5").unwrap(), 2.0);
    assert_eq!(evaluate("10 % 3").unwrap(), 1.0);
    assert_eq!(evaluate("20 % 4").unwrap(), 0.0);
    assert_eq!(evaluate("-7 % 3").unwrap(), -1.0);
    assert_eq!(evaluate("5.5 % 2").unwrap(), 1.5);
}

#[test]
fn test_order_of_operations() {
    assert_eq!(evaluate("2 + 3 * 4").unwrap(), 14.0);
    assert_eq!(evaluate("(2 + 3) * 4").unwrap(), 20.0);
    assert_eq!(evaluate("10 - 5 - 2").unwrap(), 3.0);
    assert_eq!(evaluate("2^3 * 2").unwrap(), 16.0);
    assert_eq!(evaluate("100 / 10 / 5").unwrap(), 2.0);
    assert_eq!(evaluate("10 - 4 % 3").unwrap(), 9.0);
}

#[test]
fn test_signs() {
    assert_eq!(evaluate("-3").unwrap(), -3.0);
    assert_eq!(evaluate("+3").unwrap(), 3.0);
    assert_eq!(evaluate("5*-3").unwrap(), -15.0);
    assert_eq!(evaluate("(-3)*2").unwrap(), -6.0);
    assert_eq!(evaluate("--3").unwrap(), 3.0);
}

#[test]
fn test_decimal_literals() {
    assert_eq!(evaluate("1.5 + .5").unwrap(), 2.0);
    assert_eq!(evaluate("5. * 2").unwrap(), 10.0);
}

#[test]
fn test_results_are_rounded_to_ten_places() {
    assert_eq!(evaluate("1/3").unwrap(), 0.3333333333);
    assert_eq!(evaluate("0.1 + 0.2").unwrap(), 0.3);
    assert_eq!(evaluate("2/3").unwrap(), 0.6666666667);
    assert_eq!(format_number(evaluate("1/3").unwrap()), "0.3333333333");
}

#[test]
fn test_rounding_leaves_large_values_alone() {
    assert_eq!(round_result(123456789012.5), 123456789012.5);
    assert_eq!(round_result(1e20), 1e20);
    assert_eq!(round_result(-42.0), -42.0);
}

#[test]
fn test_reevaluating_rendered_result_is_idempotent() {
    let expressions = [
        "1/3",
        "2/3",
        "-7/9",
        "0.1+0.2",
        "2^0.5",
        "1/7*1000000",
        "10^15/3",
        "0.00000000004",
        "-0.00000000004",
        "123.456%1",
    ];
    for expression in expressions {
        let first = evaluate(expression).unwrap();
        let second = evaluate(&format_number(first)).unwrap();
        assert_eq!(first, second, "re-evaluating {} drifted", expression);
    }
}

#[test]
fn test_division_by_zero_is_an_error() {
    assert!(matches!(evaluate("5/0"), Err(CalculatorError::Evaluation(_))));
    assert!(matches!(evaluate("0/0"), Err(CalculatorError::Evaluation(_))));
    assert!(matches!(evaluate("5%0"), Err(CalculatorError::Evaluation(_))));
    assert!(matches!(evaluate("1/(1/0)"), Err(CalculatorError::Evaluation(_))));
}

#[test]
fn test_non_finite_results_are_errors() {
    assert!(matches!(evaluate("10^400"), Err(CalculatorError::Evaluation(_))));
    assert!(matches!(evaluate("(-8)^0.5"), Err(CalculatorError::Evaluation(_))));
}

#[test]
fn test_malformed_syntax() {
    for expression in ["(2+3", "2+3)", "2+", "*2", "()", "2(3)", "(2)(3)", "1.2.3", ".", "2 3"] {
        assert!(
            matches!(evaluate(expression), Err(CalculatorError::Evaluation(_))),
            "{} should fail to evaluate",
            expression
        );
    }
}

#[test]
fn test_empty_input() {
    assert_eq!(evaluate(""), Err(CalculatorError::EmptyInput));
    assert_eq!(evaluate("   "), Err(CalculatorError::EmptyInput));
}

#[test]
fn test_characters_outside_vocabulary() {
    assert!(matches!(
        evaluate("2×3"),
        Err(CalculatorError::InvalidCharacter { character: '×', .. })
    ));
    assert!(matches!(
        evaluate("ans"),
        Err(CalculatorError::InvalidCharacter { character: 'a', .. })
    ));
}
