use crate::calc_types::{CalcError, Expression, Token};

/// Recursive-descent parser for calculator expressions.
///
/// Two grammar profiles exist. The full grammar accepts numeric literals,
/// `+ - * / ^ ( )`, the programmer-mode bitwise operators, and
/// single-argument function calls. The literal profile accepts only
/// literals, `+ - * /`, unary minus, and parentheses; names and the
/// power/bitwise operators are parse errors there, so no function lookup
/// can ever happen on that path.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    literal_only: bool,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            current: 0,
            literal_only: false,
        }
    }

    pub fn literal(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            current: 0,
            literal_only: true,
        }
    }

    pub fn parse(&mut self) -> Result<Expression, CalcError> {
        if self.is_at_end() {
            return Err(CalcError::evaluation("Empty expression"));
        }
        let expr = self.parse_expression()?;
        if !self.is_at_end() {
            return Err(CalcError::evaluation(format!(
                "Unexpected token: {}",
                self.peek().unwrap()
            )));
        }
        Ok(expr)
    }

    fn parse_expression(&mut self) -> Result<Expression, CalcError> {
        self.parse_bitor()
    }

    fn parse_bitor(&mut self) -> Result<Expression, CalcError> {
        let mut expr = self.parse_bitand()?;

        while !self.literal_only && self.check(&Token::Pipe) {
            self.advance();
            let right = self.parse_bitand()?;
            expr = Expression::new_binary_op("|".to_string(), expr, right);
        }

        Ok(expr)
    }

    fn parse_bitand(&mut self) -> Result<Expression, CalcError> {
        let mut expr = self.parse_shift()?;

        while !self.literal_only && self.check(&Token::Ampersand) {
            self.advance();
            let right = self.parse_shift()?;
            expr = Expression::new_binary_op("&".to_string(), expr, right);
        }

        Ok(expr)
    }

    fn parse_shift(&mut self) -> Result<Expression, CalcError> {
        let mut expr = self.parse_term()?;

        while !self.literal_only && self.match_any(&[Token::ShiftLeft, Token::ShiftRight]) {
            let op = match self.previous() {
                Token::ShiftLeft => "<<",
                Token::ShiftRight => ">>",
                _ => unreachable!(),
            };
            let right = self.parse_term()?;
            expr = Expression::new_binary_op(op.to_string(), expr, right);
        }

        Ok(expr)
    }

    fn parse_term(&mut self) -> Result<Expression, CalcError> {
        let mut expr = self.parse_factor()?;

        while self.match_any(&[Token::Plus, Token::Minus]) {
            let op = match self.previous() {
                Token::Plus => "+",
                Token::Minus => "-",
                _ => unreachable!(),
            };
            let right = self.parse_factor()?;
            expr = Expression::new_binary_op(op.to_string(), expr, right);
        }

        Ok(expr)
    }

    fn parse_factor(&mut self) -> Result<Expression, CalcError> {
        let mut expr = self.parse_unary()?;

        while self.match_any(&[Token::Star, Token::Slash]) {
            let op = match self.previous() {
                Token::Star => "*",
                Token::Slash => "/",
                _ => unreachable!(),
            };
            let right = self.parse_unary()?;
            expr = Expression::new_binary_op(op.to_string(), expr, right);
        }

        Ok(expr)
    }

    fn parse_unary(&mut self) -> Result<Expression, CalcError> {
        if self.check(&Token::Minus) {
            self.advance();
            let expr = self.parse_unary()?;
            return Ok(Expression::new_unary_op("-".to_string(), expr));
        }
        if !self.literal_only && self.check(&Token::Tilde) {
            self.advance();
            let expr = self.parse_unary()?;
            return Ok(Expression::new_unary_op("~".to_string(), expr));
        }
        self.parse_power()
    }

    // Power is right-associative and binds tighter than unary minus,
    // so -2^2 is -(2^2) and 2^3^2 is 2^(3^2).
    fn parse_power(&mut self) -> Result<Expression, CalcError> {
        let expr = self.parse_primary()?;

        if !self.literal_only && self.check(&Token::Power) {
            self.advance();
            let right = self.parse_unary()?;
            return Ok(Expression::new_binary_op("^".to_string(), expr, right));
        }

        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expression, CalcError> {
        let token = self.peek().cloned();
        match token {
            Some(Token::Number(n)) => {
                self.advance();
                let value: f64 = n
                    .parse()
                    .map_err(|_| CalcError::evaluation(format!("Invalid number: {}", n)))?;
                Ok(Expression::new_number(value))
            }
            Some(Token::Identifier(name)) => {
                if self.literal_only {
                    return Err(CalcError::evaluation(format!(
                        "Unexpected name: {}",
                        name
                    )));
                }
                self.advance();
                self.consume(&Token::LeftParen, "Expected '(' after function name")?;
                let arg = self.parse_expression()?;
                self.consume(&Token::RightParen, "Expected ')' after argument")?;
                Ok(Expression::new_function_call(name, arg))
            }
            Some(Token::LeftParen) => {
                self.advance();
                let expr = self.parse_expression()?;
                self.consume(&Token::RightParen, "Expected ')' after expression")?;
                Ok(expr)
            }
            _ => Err(CalcError::evaluation("Expected expression")),
        }
    }

    // Helper methods
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.current)
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn check(&self, token: &Token) -> bool {
        self.peek().map_or(false, |t| t == token)
    }

    fn match_any(&mut self, tokens: &[Token]) -> bool {
        for token in tokens {
            if self.check(token) {
                self.advance();
                return true;
            }
        }
        false
    }

    fn consume(&mut self, token: &Token, message: &str) -> Result<&Token, CalcError> {
        if self.check(token) {
            Ok(self.advance())
        } else {
            Err(CalcError::evaluation(message))
        }
    }

    fn is_at_end(&self) -> bool {
        self.peek().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc_lexer::Lexer;

    fn parse_full(input: &str) -> Result<Expression, CalcError> {
        let tokens = Lexer::new(input).tokenize()?;
        Parser::new(tokens).parse()
    }

    fn parse_literal(input: &str) -> Result<Expression, CalcError> {
        let tokens = Lexer::new(input).tokenize()?;
        Parser::literal(tokens).parse()
    }

    #[test]
    fn test_precedence() {
        let expr = parse_full("2+2*2").unwrap();
        assert_eq!(format!("{}", expr), "(2 + (2 * 2))");
    }

    #[test]
    fn test_parentheses() {
        let expr = parse_full("(2+2)*2").unwrap();
        assert_eq!(format!("{}", expr), "((2 + 2) * 2)");
    }

    #[test]
    fn test_power_right_associative() {
        let expr = parse_full("2^3^2").unwrap();
        assert_eq!(format!("{}", expr), "(2 ^ (3 ^ 2))");
    }

    #[test]
    fn test_unary_minus_binds_looser_than_power() {
        let expr = parse_full("-2^2").unwrap();
        assert_eq!(format!("{}", expr), "-(2 ^ 2)");
    }

    #[test]
    fn test_function_call() {
        let expr = parse_full("sqrt(16)").unwrap();
        assert_eq!(
            expr,
            Expression::new_function_call("sqrt".to_string(), Expression::new_number(16.0))
        );
    }

    #[test]
    fn test_shift_binds_tighter_than_and() {
        let expr = parse_full("3&1<<2").unwrap();
        assert_eq!(format!("{}", expr), "(3 & (1 << 2))");
    }

    #[test]
    fn test_unbalanced_parens() {
        assert!(parse_full("(2+2").is_err());
        assert!(parse_full("2+2)").is_err());
    }

    #[test]
    fn test_trailing_operator() {
        assert!(parse_full("2+").is_err());
    }

    #[test]
    fn test_literal_profile_accepts_arithmetic() {
        let expr = parse_literal("(1+2)*3-4/5").unwrap();
        assert_eq!(format!("{}", expr), "(((1 + 2) * 3) - (4 / 5))");
    }

    #[test]
    fn test_literal_profile_rejects_names() {
        let result = parse_literal("sqrt(16)");
        assert!(result.is_err());
    }

    #[test]
    fn test_literal_profile_rejects_power() {
        // '^' never reaches the literal parser through the safe-charset
        // gate, but the grammar itself refuses it as well.
        assert!(parse_literal("2^3").is_err());
    }

    #[test]
    fn test_literal_profile_rejects_bitwise() {
        assert!(parse_literal("1<<2").is_err());
        assert!(parse_literal("~1").is_err());
    }
}
