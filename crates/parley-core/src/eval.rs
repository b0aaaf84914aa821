//! Sandboxed arithmetic evaluator.
//!
//! A hand-rolled tokenizer and recursive-descent parser over a fixed
//! grammar: `+ - * / ** // % ( )`, numeric literals, and unary sign.
//! Nothing else tokenizes, so there is no name lookup, no attribute
//! access, no call syntax, and no code-execution surface of any kind.
//!
//! Operator semantics: `**` is right-associative and binds tighter than a
//! unary minus on its left, `//` is floor division, and `%` is floored
//! modulo (the result takes the sign of the divisor).
//!
//! Grammar, one method per precedence level:
//!
//! ```text
//! expression := term { ("+" | "-") term }
//! term       := unary { ("*" | "/" | "//" | "%") unary }
//! unary      := ("+" | "-") unary | power
//! power      := atom [ "**" unary ]
//! atom       := NUMBER | "(" expression ")"
//! ```

use thiserror::Error;

/// An evaluation failure.
///
/// Callers that surface results to a user are expected to swallow these
/// into a fixed message; the variants exist for logging and tests.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// A character outside the arithmetic grammar.
    #[error("unexpected character '{0}' in expression")]
    UnexpectedChar(char),

    /// A numeric literal that failed to parse (e.g. `1.2.3`).
    #[error("malformed number literal '{0}'")]
    InvalidNumber(String),

    /// The expression ended where a value or operator was required.
    #[error("unexpected end of expression")]
    UnexpectedEnd,

    /// A token that cannot start or continue the expression here.
    #[error("unexpected token at position {0}")]
    UnexpectedToken(usize),

    /// Leftover tokens after a complete expression (e.g. `1 2`).
    #[error("trailing input after expression")]
    TrailingInput,

    /// Division, floor division, or modulo by zero; also `0 ** negative`.
    #[error("division by zero")]
    DivisionByZero,

    /// The result overflowed or is undefined (infinity or NaN).
    #[error("result is not a finite number")]
    NonFinite,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    DoubleStar,
    Slash,
    DoubleSlash,
    Percent,
    LParen,
    RParen,
}

fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' => {
                chars.next();
            }
            '0'..='9' | '.' => {
                let mut literal = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        literal.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| EvalError::InvalidNumber(literal.clone()))?;
                tokens.push(Token::Number(value));
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '*' => {
                chars.next();
                if chars.peek() == Some(&'*') {
                    chars.next();
                    tokens.push(Token::DoubleStar);
                } else {
                    tokens.push(Token::Star);
                }
            }
            '/' => {
                chars.next();
                if chars.peek() == Some(&'/') {
                    chars.next();
                    tokens.push(Token::DoubleSlash);
                } else {
                    tokens.push(Token::Slash);
                }
            }
            '%' => {
                chars.next();
                tokens.push(Token::Percent);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            other => return Err(EvalError::UnexpectedChar(other)),
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expression(&mut self) -> Result<f64, EvalError> {
        let mut value = self.term()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Plus => {
                    self.advance();
                    value += self.term()?;
                }
                Token::Minus => {
                    self.advance();
                    value -= self.term()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.unary()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Star => {
                    self.advance();
                    value *= self.unary()?;
                }
                Token::Slash => {
                    self.advance();
                    let rhs = self.unary()?;
                    if rhs == 0.0 {
                        return Err(EvalError::DivisionByZero);
                    }
                    value /= rhs;
                }
                Token::DoubleSlash => {
                    self.advance();
                    let rhs = self.unary()?;
                    if rhs == 0.0 {
                        return Err(EvalError::DivisionByZero);
                    }
                    value = (value / rhs).floor();
                }
                Token::Percent => {
                    self.advance();
                    let rhs = self.unary()?;
                    if rhs == 0.0 {
                        return Err(EvalError::DivisionByZero);
                    }
                    // Floored modulo: the result takes the sign of the divisor.
                    value -= rhs * (value / rhs).floor();
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn unary(&mut self) -> Result<f64, EvalError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.advance();
                Ok(-self.unary()?)
            }
            Some(Token::Plus) => {
                self.advance();
                self.unary()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<f64, EvalError> {
        let base = self.atom()?;
        if self.peek() == Some(Token::DoubleStar) {
            self.advance();
            // Right-associative; the exponent may carry its own sign.
            let exponent = self.unary()?;
            if base == 0.0 && exponent < 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<f64, EvalError> {
        match self.advance() {
            Some(Token::Number(value)) => Ok(value),
            Some(Token::LParen) => {
                let value = self.expression()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(value),
                    Some(_) => Err(EvalError::UnexpectedToken(self.pos - 1)),
                    None => Err(EvalError::UnexpectedEnd),
                }
            }
            Some(_) => Err(EvalError::UnexpectedToken(self.pos - 1)),
            None => Err(EvalError::UnexpectedEnd),
        }
    }
}

/// Evaluates an arithmetic expression inside the sandboxed grammar.
pub fn evaluate(input: &str) -> Result<f64, EvalError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(EvalError::UnexpectedEnd);
    }

    let mut parser = Parser::new(tokens);
    let value = parser.expression()?;
    if parser.peek().is_some() {
        return Err(EvalError::TrailingInput);
    }
    if !value.is_finite() {
        return Err(EvalError::NonFinite);
    }
    Ok(value)
}

/// Formats an evaluation result for display.
///
/// Integral results print without a decimal point (`4`, not `4.0`), so
/// `2+2` reads the way a user expects.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(input: &str) -> f64 {
        evaluate(input).unwrap()
    }

    #[test]
    fn basic_arithmetic() {
        assert_eq!(eval("2+2"), 4.0);
        assert_eq!(eval("10 - 3 - 2"), 5.0);
        assert_eq!(eval("6 * 7"), 42.0);
        assert_eq!(eval("1 / 4"), 0.25);
    }

    #[test]
    fn precedence_and_parentheses() {
        assert_eq!(eval("2 + 3 * 4"), 14.0);
        assert_eq!(eval("(2 + 3) * 4"), 20.0);
        assert_eq!(eval("2 * (1 + (3 - 1))"), 6.0);
    }

    #[test]
    fn power_is_right_associative() {
        assert_eq!(eval("2 ** 3 ** 2"), 512.0);
    }

    #[test]
    fn power_binds_tighter_than_unary_minus() {
        assert_eq!(eval("-2 ** 2"), -4.0);
        assert_eq!(eval("(-2) ** 2"), 4.0);
        assert_eq!(eval("2 ** -1"), 0.5);
    }

    #[test]
    fn floor_division_floors_toward_negative_infinity() {
        assert_eq!(eval("7 // 2"), 3.0);
        assert_eq!(eval("-7 // 2"), -4.0);
    }

    #[test]
    fn modulo_takes_sign_of_divisor() {
        assert_eq!(eval("7 % 3"), 1.0);
        assert_eq!(eval("-7 % 3"), 2.0);
        assert_eq!(eval("7 % -3"), -2.0);
    }

    #[test]
    fn unary_signs_stack() {
        assert_eq!(eval("--4"), 4.0);
        assert_eq!(eval("+-4"), -4.0);
        assert_eq!(eval("3 - -2"), 5.0);
    }

    #[test]
    fn float_literals() {
        assert_eq!(eval("1.5 + 2.25"), 3.75);
        assert_eq!(eval(".5 * 4"), 2.0);
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert_eq!(evaluate("1 / 0"), Err(EvalError::DivisionByZero));
        assert_eq!(evaluate("1 // 0"), Err(EvalError::DivisionByZero));
        assert_eq!(evaluate("1 % 0"), Err(EvalError::DivisionByZero));
        assert_eq!(evaluate("0 ** -1"), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn foreign_characters_do_not_tokenize() {
        assert_eq!(
            evaluate("__import__('os')"),
            Err(EvalError::UnexpectedChar('_'))
        );
        assert_eq!(evaluate("2 + x"), Err(EvalError::UnexpectedChar('x')));
        assert_eq!(evaluate("len(1)"), Err(EvalError::UnexpectedChar('l')));
    }

    #[test]
    fn malformed_expressions_are_errors() {
        assert_eq!(evaluate(""), Err(EvalError::UnexpectedEnd));
        assert_eq!(evaluate("1 +"), Err(EvalError::UnexpectedEnd));
        assert_eq!(evaluate("(1 + 2"), Err(EvalError::UnexpectedEnd));
        assert_eq!(evaluate("1 2"), Err(EvalError::TrailingInput));
        assert_eq!(
            evaluate("1.2.3"),
            Err(EvalError::InvalidNumber("1.2.3".to_string()))
        );
    }

    #[test]
    fn overflow_is_an_error() {
        assert_eq!(evaluate("10 ** 400"), Err(EvalError::NonFinite));
    }

    #[test]
    fn formats_integral_results_without_decimal_point() {
        assert_eq!(format_number(4.0), "4");
        assert_eq!(format_number(-12.0), "-12");
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(3.5), "3.5");
    }
}
