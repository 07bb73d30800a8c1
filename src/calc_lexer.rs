use std::str::Chars;

use crate::calc_types::{CalcError, Token};

pub struct Lexer<'a> {
    chars: Chars<'a>,
    current: Option<char>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut chars = input.chars();
        let current = chars.next();
        Lexer { chars, current }
    }

    pub fn tokenize(&mut self) -> Result<Vec<Token>, CalcError> {
        let mut tokens = Vec::new();

        while let Some(c) = self.current {
            match c {
                ' ' | '\t' => {
                    self.advance();
                }
                '0'..='9' | '.' => {
                    let mut number = String::new();
                    while let Some(c) = self.current {
                        if c.is_ascii_digit() || c == '.' {
                            number.push(c);
                            self.advance();
                        } else {
                            break;
                        }
                    }
                    tokens.push(Token::Number(number));
                }
                'a'..='z' | 'A'..='Z' => {
                    let mut identifier = String::new();
                    while let Some(c) = self.current {
                        if c.is_ascii_alphabetic() {
                            identifier.push(c);
                            self.advance();
                        } else {
                            break;
                        }
                    }
                    tokens.push(Token::Identifier(identifier));
                }
                '+' => {
                    tokens.push(Token::Plus);
                    self.advance();
                }
                '-' => {
                    tokens.push(Token::Minus);
                    self.advance();
                }
                '*' => {
                    tokens.push(Token::Star);
                    self.advance();
                }
                '/' => {
                    tokens.push(Token::Slash);
                    self.advance();
                }
                '^' => {
                    tokens.push(Token::Power);
                    self.advance();
                }
                '&' => {
                    tokens.push(Token::Ampersand);
                    self.advance();
                }
                '|' => {
                    tokens.push(Token::Pipe);
                    self.advance();
                }
                '~' => {
                    tokens.push(Token::Tilde);
                    self.advance();
                }
                '<' => {
                    self.advance();
                    if let Some('<') = self.current {
                        tokens.push(Token::ShiftLeft);
                        self.advance();
                    } else {
                        return Err(CalcError::evaluation("Expected '<<'"));
                    }
                }
                '>' => {
                    self.advance();
                    if let Some('>') = self.current {
                        tokens.push(Token::ShiftRight);
                        self.advance();
                    } else {
                        return Err(CalcError::evaluation("Expected '>>'"));
                    }
                }
                '(' => {
                    tokens.push(Token::LeftParen);
                    self.advance();
                }
                ')' => {
                    tokens.push(Token::RightParen);
                    self.advance();
                }
                _ => {
                    return Err(CalcError::evaluation(format!(
                        "Unexpected character: {}",
                        c
                    )));
                }
            }
        }

        Ok(tokens)
    }

    fn advance(&mut self) {
        self.current = self.chars.next();
    }
}
