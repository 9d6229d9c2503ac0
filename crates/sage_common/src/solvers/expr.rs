//! Numeric expression evaluator
//!
//! Recursive descent over a small grammar:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/' | '%') unary)*
//! unary   := ('+' | '-') unary | power
//! power   := postfix (('**' | '^') unary)?
//! postfix := primary '!'*
//! primary := number | constant | function '(' expr (',' expr)? ')' | '(' expr ')'
//! ```
//!
//! Nesting is capped at `MAX_DEPTH`; deeper input is rejected, not recursed.
//!
//! `^` is exponentiation, not xor. Power is right associative and binds
//! tighter than unary minus, so `-2**2` is `-4`.

use std::f64::consts::{E, PI};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),

    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("unexpected token {0:?}")]
    UnexpectedToken(Token),

    #[error("unknown name '{0}'")]
    UnknownName(String),

    #[error("wrong number of arguments for {0}")]
    Arity(String),

    #[error("factorial of {0} is undefined")]
    Factorial(f64),

    #[error("result is not a finite number")]
    NotFinite,

    #[error("expression nested deeper than {0} levels")]
    TooDeep(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Pow,
    Bang,
    LParen,
    RParen,
    Comma,
}

/// Largest n for which n! is still finite in f64
const MAX_FACTORIAL: f64 = 170.0;

/// Nesting limit for parentheses, calls and prefix signs
const MAX_DEPTH: usize = 256;

/// Evaluate an expression to a finite number
pub fn evaluate(input: &str) -> Result<f64, ExprError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    if let Some(tok) = parser.peek() {
        return Err(ExprError::UnexpectedToken(tok.clone()));
    }
    if !value.is_finite() {
        return Err(ExprError::NotFinite);
    }
    Ok(value)
}

fn tokenize(input: &str) -> Result<Vec<Token>, ExprError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
            '0'..='9' | '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                // Exponent part, only when followed by digits
                if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                    let mut j = i + 1;
                    if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
                        j += 1;
                    }
                    if j < chars.len() && chars[j].is_ascii_digit() {
                        while j < chars.len() && chars[j].is_ascii_digit() {
                            j += 1;
                        }
                        i = j;
                    }
                }
                let text: String = chars[start..i].iter().collect();
                let value = text.parse::<f64>().map_err(|_| ExprError::UnexpectedChar(c))?;
                tokens.push(Token::Number(value));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                tokens.push(Token::Ident(chars[start..i].iter().collect()));
            }
            '*' if chars.get(i + 1) == Some(&'*') => {
                tokens.push(Token::Pow);
                i += 2;
            }
            _ => {
                let tok = match c {
                    '+' => Token::Plus,
                    '-' => Token::Minus,
                    '*' => Token::Star,
                    '/' => Token::Slash,
                    '%' => Token::Percent,
                    '^' => Token::Pow,
                    '!' => Token::Bang,
                    '(' => Token::LParen,
                    ')' => Token::RParen,
                    ',' => Token::Comma,
                    other => return Err(ExprError::UnexpectedChar(other)),
                };
                tokens.push(tok);
                i += 1;
            }
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Result<Token, ExprError> {
        let tok = self.tokens.get(self.pos).cloned().ok_or(ExprError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(tok)
    }

    fn eat(&mut self, tok: &Token) -> bool {
        if self.peek() == Some(tok) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, tok: Token) -> Result<(), ExprError> {
        match self.next()? {
            t if t == tok => Ok(()),
            t => Err(ExprError::UnexpectedToken(t)),
        }
    }

    /// Run one nested rule, failing once nesting passes MAX_DEPTH
    fn nested(
        &mut self,
        rule: fn(&mut Self) -> Result<f64, ExprError>,
    ) -> Result<f64, ExprError> {
        if self.depth >= MAX_DEPTH {
            return Err(ExprError::TooDeep(MAX_DEPTH));
        }
        self.depth += 1;
        let value = rule(self);
        self.depth -= 1;
        value
    }

    fn expr(&mut self) -> Result<f64, ExprError> {
        let mut value = self.term()?;
        loop {
            if self.eat(&Token::Plus) {
                value += self.term()?;
            } else if self.eat(&Token::Minus) {
                value -= self.term()?;
            } else {
                return Ok(value);
            }
        }
    }

    fn term(&mut self) -> Result<f64, ExprError> {
        let mut value = self.unary()?;
        loop {
            if self.eat(&Token::Star) {
                value *= self.unary()?;
            } else if self.eat(&Token::Slash) {
                value /= self.unary()?;
            } else if self.eat(&Token::Percent) {
                // Floored modulo: result takes the divisor's sign
                let rhs = self.unary()?;
                value -= rhs * (value / rhs).floor();
            } else {
                return Ok(value);
            }
        }
    }

    fn unary(&mut self) -> Result<f64, ExprError> {
        self.nested(Self::signed)
    }

    fn signed(&mut self) -> Result<f64, ExprError> {
        if self.eat(&Token::Minus) {
            return Ok(-self.unary()?);
        }
        if self.eat(&Token::Plus) {
            return self.unary();
        }
        self.power()
    }

    fn power(&mut self) -> Result<f64, ExprError> {
        let base = self.postfix()?;
        if self.eat(&Token::Pow) {
            let exponent = self.unary()?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn postfix(&mut self) -> Result<f64, ExprError> {
        let mut value = self.primary()?;
        while self.eat(&Token::Bang) {
            value = factorial(value)?;
        }
        Ok(value)
    }

    fn primary(&mut self) -> Result<f64, ExprError> {
        self.nested(Self::atom)
    }

    fn atom(&mut self) -> Result<f64, ExprError> {
        match self.next()? {
            Token::Number(n) => Ok(n),
            Token::LParen => {
                let value = self.expr()?;
                self.expect(Token::RParen)?;
                Ok(value)
            }
            Token::Ident(name) => {
                if self.peek() == Some(&Token::LParen) {
                    self.pos += 1;
                    let args = self.arguments()?;
                    call(&name, &args)
                } else {
                    constant(&name)
                }
            }
            tok => Err(ExprError::UnexpectedToken(tok)),
        }
    }

    fn arguments(&mut self) -> Result<Vec<f64>, ExprError> {
        let mut args = vec![self.expr()?];
        while self.eat(&Token::Comma) {
            args.push(self.expr()?);
        }
        self.expect(Token::RParen)?;
        Ok(args)
    }
}

fn constant(name: &str) -> Result<f64, ExprError> {
    match name {
        "pi" | "PI" | "Pi" => Ok(PI),
        "E" => Ok(E),
        _ => Err(ExprError::UnknownName(name.to_string())),
    }
}

fn call(name: &str, args: &[f64]) -> Result<f64, ExprError> {
    let one = |f: fn(f64) -> f64| match args {
        [x] => Ok(f(*x)),
        _ => Err(ExprError::Arity(name.to_string())),
    };

    match name {
        "sqrt" => one(f64::sqrt),
        "sin" => one(f64::sin),
        "cos" => one(f64::cos),
        "tan" => one(f64::tan),
        "asin" => one(f64::asin),
        "acos" => one(f64::acos),
        "atan" => one(f64::atan),
        "exp" => one(f64::exp),
        "ln" => one(f64::ln),
        "abs" | "Abs" => one(f64::abs),
        "floor" => one(f64::floor),
        "ceiling" | "ceil" => one(f64::ceil),
        "factorial" => match args {
            [x] => factorial(*x),
            _ => Err(ExprError::Arity(name.to_string())),
        },
        // Natural log, with an optional base as second argument
        "log" => match args {
            [x] => Ok(x.ln()),
            [x, base] => Ok(x.ln() / base.ln()),
            _ => Err(ExprError::Arity(name.to_string())),
        },
        _ => Err(ExprError::UnknownName(name.to_string())),
    }
}

fn factorial(n: f64) -> Result<f64, ExprError> {
    if n < 0.0 || n.fract() != 0.0 || n > MAX_FACTORIAL {
        return Err(ExprError::Factorial(n));
    }
    Ok((1..=n as u64).fold(1.0, |acc, k| acc * k as f64))
}
