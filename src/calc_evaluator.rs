use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::calc_function_registry::{FunctionRegistry, MATH_FUNCTIONS};
use crate::calc_lexer::Lexer;
use crate::calc_parser::Parser;
use crate::calc_types::{CalcError, Expression, Mode};

lazy_static! {
    // The safe numeric-literal-and-arithmetic-operator set. '^' is
    // deliberately absent: power expressions always take the broad path.
    static ref LITERAL_EXPR: Regex = Regex::new(r"^[0-9+\-*/.()]+$").unwrap();
}

/// Evaluate a raw display-buffer string under the given mode.
///
/// The input is first normalized (mode-specific rewrites), then routed to
/// one of two paths: a literal-only parse for input made purely of digits
/// and `+ - * / . ( )`, where no name resolution is possible, or the full
/// parse whose only callable namespace is the fixed math-function registry.
pub fn evaluate(raw_input: &str, mode: Mode) -> Result<f64, CalcError> {
    let normalized = normalize(raw_input, mode);
    let stripped: String = normalized.chars().filter(|c| !c.is_whitespace()).collect();

    if is_literal_expression(&stripped) {
        debug!(expression = %stripped, "literal path");
        evaluate_literal(&stripped)
    } else {
        debug!(expression = %stripped, "function path");
        evaluate_with_functions(&stripped, &MATH_FUNCTIONS)
    }
}

/// Mode-specific rewrite of the raw input into a canonical expression.
pub fn normalize(raw: &str, mode: Mode) -> String {
    match mode {
        Mode::Scientific => raw.replace("pi", &std::f64::consts::PI.to_string()),
        Mode::Programmer => replace_hex_digits(raw),
        Mode::Standard | Mode::Currency | Mode::Unit => raw.to_string(),
    }
}

// Blunt character-level substitution of the hex digit keys, A -> 10 and
// so on. Not hex-literal parsing: "FF" becomes "1515".
fn replace_hex_digits(expr: &str) -> String {
    let mut result = expr.to_string();
    for (ch, value) in [
        ('A', "10"),
        ('B', "11"),
        ('C', "12"),
        ('D', "13"),
        ('E', "14"),
        ('F', "15"),
    ] {
        result = result.replace(ch, value);
    }
    result
}

pub fn is_literal_expression(stripped: &str) -> bool {
    LITERAL_EXPR.is_match(stripped)
}

/// The narrow path: literal grammar, empty function namespace.
pub fn evaluate_literal(expr: &str) -> Result<f64, CalcError> {
    let tokens = Lexer::new(expr).tokenize()?;
    let ast = Parser::literal(tokens).parse()?;
    evaluate_ast(&ast, &FunctionRegistry::empty())
}

/// The broad path: full grammar, names resolved against `functions` only.
pub fn evaluate_with_functions(
    expr: &str,
    functions: &FunctionRegistry,
) -> Result<f64, CalcError> {
    let tokens = Lexer::new(expr).tokenize()?;
    let ast = Parser::new(tokens).parse()?;
    evaluate_ast(&ast, functions)
}

pub fn evaluate_ast(expr: &Expression, functions: &FunctionRegistry) -> Result<f64, CalcError> {
    match expr {
        Expression::Number(n) => Ok(*n),
        Expression::BinaryOp { op, left, right } => {
            let left = evaluate_ast(left, functions)?;
            let right = evaluate_ast(right, functions)?;

            match op.as_str() {
                "+" => Ok(left + right),
                "-" => Ok(left - right),
                "*" => Ok(left * right),
                "/" => {
                    if right == 0.0 {
                        return Err(CalcError::evaluation("Division by zero"));
                    }
                    Ok(left / right)
                }
                "^" => Ok(left.powf(right)),
                "<<" => {
                    let l = as_integer(left)?;
                    let r = shift_count(right)?;
                    Ok((l << r) as f64)
                }
                ">>" => {
                    let l = as_integer(left)?;
                    let r = shift_count(right)?;
                    Ok((l >> r) as f64)
                }
                "&" => Ok((as_integer(left)? & as_integer(right)?) as f64),
                "|" => Ok((as_integer(left)? | as_integer(right)?) as f64),
                other => Err(CalcError::evaluation(format!(
                    "Unknown operator: {}",
                    other
                ))),
            }
        }
        Expression::UnaryOp { op, expr } => {
            let value = evaluate_ast(expr, functions)?;
            match op.as_str() {
                "-" => Ok(-value),
                "~" => Ok(!as_integer(value)? as f64),
                other => Err(CalcError::evaluation(format!(
                    "Unknown operator: {}",
                    other
                ))),
            }
        }
        Expression::FunctionCall { name, arg } => {
            let arg = evaluate_ast(arg, functions)?;
            functions.call_function(name, arg)
        }
    }
}

/// Result stringification for the display, using the host's default
/// float formatting.
pub fn format_result(value: f64) -> String {
    value.to_string()
}

// Bitwise operators work on whole numbers only.
fn as_integer(value: f64) -> Result<i64, CalcError> {
    if value.fract() != 0.0 {
        return Err(CalcError::evaluation(
            "Bitwise operations require whole numbers",
        ));
    }
    Ok(value as i64)
}

fn shift_count(value: f64) -> Result<u32, CalcError> {
    let n = as_integer(value)?;
    if !(0..64).contains(&n) {
        return Err(CalcError::evaluation("Shift count out of range"));
    }
    Ok(n as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_standard_precedence() {
        assert_eq!(evaluate("2+2*2", Mode::Standard).unwrap(), 6.0);
    }

    #[test]
    fn test_standard_parentheses() {
        assert_eq!(evaluate("(2+2)*2", Mode::Standard).unwrap(), 8.0);
    }

    #[test]
    fn test_division_by_zero() {
        let result = evaluate("1/0", Mode::Standard);
        assert!(matches!(result, Err(CalcError::Evaluation { .. })));
    }

    #[test]
    fn test_scientific_sqrt() {
        assert_eq!(evaluate("sqrt(16)", Mode::Scientific).unwrap(), 4.0);
    }

    #[test]
    fn test_scientific_log_base_10() {
        assert_eq!(evaluate("log(100)", Mode::Scientific).unwrap(), 2.0);
    }

    #[test]
    fn test_scientific_pi_substitution() {
        let result = evaluate("2*pi", Mode::Scientific).unwrap();
        assert_eq!(result, 2.0 * std::f64::consts::PI);
    }

    #[test]
    fn test_scientific_nested_functions() {
        assert_eq!(evaluate("sqrt(sqrt(16))", Mode::Scientific).unwrap(), 2.0);
    }

    #[test]
    fn test_sqrt_of_negative_fails() {
        assert!(evaluate("sqrt(0-16)", Mode::Scientific).is_err());
    }

    #[test]
    fn test_power_falls_through_to_function_path() {
        // '^' is not in the literal charset, so this classifies as
        // non-literal and still evaluates on the broad path.
        assert!(!is_literal_expression("2^10"));
        assert_eq!(evaluate("2^10", Mode::Standard).unwrap(), 1024.0);
    }

    #[test]
    fn test_power_is_right_associative() {
        assert_eq!(evaluate("2^3^2", Mode::Standard).unwrap(), 512.0);
    }

    #[test]
    fn test_unary_minus_with_power() {
        assert_eq!(evaluate("-2^2", Mode::Standard).unwrap(), -4.0);
    }

    #[test]
    fn test_literal_classification() {
        assert!(is_literal_expression("2+2*2"));
        assert!(is_literal_expression("(1.5-0.5)/4"));
        assert!(!is_literal_expression("sqrt(16)"));
        assert!(!is_literal_expression("1<<4"));
        assert!(!is_literal_expression(""));
    }

    // Every all-literal input evaluates with an empty function namespace;
    // a name lookup on this path is impossible by construction.
    #[test]
    fn test_literal_path_never_resolves_names() {
        for input in ["2+2*2", "1.5/0.5", "(1+2)*(3+4)", "-5+10"] {
            assert!(is_literal_expression(input));
            let narrow = evaluate_literal(input).unwrap();
            let routed = evaluate(input, Mode::Standard).unwrap();
            assert_eq!(narrow, routed);
        }
    }

    #[test]
    fn test_programmer_hex_digit_substitution() {
        assert_eq!(evaluate("A+1", Mode::Programmer).unwrap(), 11.0);
        assert_eq!(evaluate("F", Mode::Programmer).unwrap(), 15.0);
    }

    #[test]
    fn test_programmer_substitution_is_character_level() {
        // "FF" rewrites to "1515", not to 255. Shipped behavior.
        assert_eq!(evaluate("FF", Mode::Programmer).unwrap(), 1515.0);
    }

    #[test]
    fn test_programmer_bitwise() {
        assert_eq!(evaluate("1<<4", Mode::Programmer).unwrap(), 16.0);
        assert_eq!(evaluate("16>>2", Mode::Programmer).unwrap(), 4.0);
        assert_eq!(evaluate("12&10", Mode::Programmer).unwrap(), 8.0);
        assert_eq!(evaluate("12|3", Mode::Programmer).unwrap(), 15.0);
        assert_eq!(evaluate("~0", Mode::Programmer).unwrap(), -1.0);
    }

    #[test]
    fn test_bitwise_requires_whole_numbers() {
        assert!(evaluate("2.5&1", Mode::Programmer).is_err());
        assert!(evaluate("1<<0.5", Mode::Programmer).is_err());
    }

    #[test]
    fn test_shift_count_out_of_range() {
        assert!(evaluate("1<<200", Mode::Programmer).is_err());
    }

    #[test]
    fn test_malformed_expressions() {
        assert!(evaluate("2+", Mode::Standard).is_err());
        assert!(evaluate("(2+2", Mode::Standard).is_err());
        assert!(evaluate("1..2", Mode::Standard).is_err());
        assert!(evaluate("nonsense(3)", Mode::Scientific).is_err());
    }

    #[test]
    fn test_format_result() {
        assert_eq!(format_result(6.0), "6");
        assert_eq!(format_result(0.5), "0.5");
        assert_eq!(format_result(-4.0), "-4");
    }

    #[test]
    fn test_currency_and_unit_modes_evaluate_like_standard() {
        assert_eq!(evaluate("2+2*2", Mode::Currency).unwrap(), 6.0);
        assert_eq!(evaluate("2+2*2", Mode::Unit).unwrap(), 6.0);
    }
}
