use std::fmt;
use std::str::FromStr;

use thiserror::Error;

// Calculator modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Standard,
    Scientific,
    Programmer,
    Currency,
    Unit,
}

impl Mode {
    pub const ALL: [Mode; 5] = [
        Mode::Standard,
        Mode::Scientific,
        Mode::Programmer,
        Mode::Currency,
        Mode::Unit,
    ];

    /// Converter modes route named buttons to the conversion table
    /// instead of the expression pipeline.
    pub fn is_converter(&self) -> bool {
        matches!(self, Mode::Currency | Mode::Unit)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Mode::Standard => write!(f, "Standard"),
            Mode::Scientific => write!(f, "Scientific"),
            Mode::Programmer => write!(f, "Programmer"),
            Mode::Currency => write!(f, "Currency"),
            Mode::Unit => write!(f, "Unit"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(Mode::Standard),
            "scientific" => Ok(Mode::Scientific),
            "programmer" => Ok(Mode::Programmer),
            "currency" => Ok(Mode::Currency),
            "unit" => Ok(Mode::Unit),
            other => Err(format!("Unknown mode: {}", other)),
        }
    }
}

// Expression tokens
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Values
    Number(String),
    Identifier(String),

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Power,
    ShiftLeft,
    ShiftRight,
    Ampersand,
    Pipe,
    Tilde,

    // Punctuation
    LeftParen,
    RightParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Identifier(id) => write!(f, "{}", id),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Power => write!(f, "^"),
            Token::ShiftLeft => write!(f, "<<"),
            Token::ShiftRight => write!(f, ">>"),
            Token::Ampersand => write!(f, "&"),
            Token::Pipe => write!(f, "|"),
            Token::Tilde => write!(f, "~"),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
        }
    }
}

impl Token {
    pub fn new_number(n: &str) -> Self {
        Token::Number(n.to_string())
    }

    pub fn new_identifier(id: &str) -> Self {
        Token::Identifier(id.to_string())
    }
}

// Expression types
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Number(f64),

    BinaryOp {
        op: String,
        left: Box<Expression>,
        right: Box<Expression>,
    },

    UnaryOp {
        op: String,
        expr: Box<Expression>,
    },

    FunctionCall {
        name: String,
        arg: Box<Expression>,
    },
}

impl Expression {
    pub fn new_number(n: f64) -> Self {
        Expression::Number(n)
    }

    pub fn new_binary_op(op: String, left: Expression, right: Expression) -> Self {
        Expression::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn new_unary_op(op: String, expr: Expression) -> Self {
        Expression::UnaryOp {
            op,
            expr: Box::new(expr),
        }
    }

    pub fn new_function_call(name: String, arg: Expression) -> Self {
        Expression::FunctionCall {
            name,
            arg: Box::new(arg),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expression::Number(n) => write!(f, "{}", n),
            Expression::BinaryOp { op, left, right } => {
                write!(f, "({} {} {})", left, op, right)
            }
            Expression::UnaryOp { op, expr } => write!(f, "{}{}", op, expr),
            Expression::FunctionCall { name, arg } => write!(f, "{}({})", name, arg),
        }
    }
}

// Error taxonomy: evaluation errors surface to the user as a blocking
// dialog, persistence errors are swallowed by the history layer.
#[derive(Debug, Error)]
pub enum CalcError {
    #[error("{message}")]
    Evaluation { message: String },

    #[error("{message}")]
    Persistence { message: String },
}

impl CalcError {
    pub fn evaluation(message: impl Into<String>) -> Self {
        CalcError::Evaluation {
            message: message.into(),
        }
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        CalcError::Persistence {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for CalcError {
    fn from(error: std::io::Error) -> Self {
        CalcError::Persistence {
            message: format!("I/O error: {}", error),
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(error: serde_json::Error) -> Self {
        CalcError::Persistence {
            message: format!("JSON error: {}", error),
        }
    }
}

// Button activation is dispatched through a single tagged command,
// resolved from the label and the active mode.
#[derive(Debug, Clone, PartialEq)]
pub enum ButtonCommand {
    Insert(String),
    Clear,
    Equals,
    ShowHistory,
    Convert(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_str() {
        assert_eq!(Mode::from_str("standard").unwrap(), Mode::Standard);
        assert_eq!(Mode::from_str("Scientific").unwrap(), Mode::Scientific);
        assert_eq!(Mode::from_str("PROGRAMMER").unwrap(), Mode::Programmer);
        assert!(Mode::from_str("hexadecimal").is_err());
    }

    #[test]
    fn test_converter_modes() {
        assert!(Mode::Currency.is_converter());
        assert!(Mode::Unit.is_converter());
        assert!(!Mode::Standard.is_converter());
        assert!(!Mode::Scientific.is_converter());
        assert!(!Mode::Programmer.is_converter());
    }

    #[test]
    fn test_expression_display() {
        let expr = Expression::new_binary_op(
            "+".to_string(),
            Expression::new_number(2.0),
            Expression::new_binary_op(
                "*".to_string(),
                Expression::new_number(2.0),
                Expression::new_number(2.0),
            ),
        );
        assert_eq!(format!("{}", expr), "(2 + (2 * 2))");
    }

    #[test]
    fn test_error_messages() {
        let err = CalcError::evaluation("Division by zero");
        assert_eq!(format!("{}", err), "Division by zero");
    }
}
