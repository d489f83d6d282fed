//! Safe arithmetic evaluator for `/calc`.
//!
//! Accepts only digits, `+ - * / ( ) .` and spaces; anything else is
//! rejected before parsing. Evaluation is a small recursive-descent
//! parser over f64, with the usual precedence and unary minus.

const ALLOWED: &str = "0123456789+-*/(). ";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalcError {
    #[error("only numbers and + - * / ( ) allowed")]
    DisallowedCharacter,
    #[error("invalid expression")]
    Invalid,
    #[error("division by zero")]
    DivisionByZero,
}

pub fn evaluate(expr: &str) -> Result<f64, CalcError> {
    if expr.chars().any(|c| !ALLOWED.contains(c)) {
        return Err(CalcError::DisallowedCharacter);
    }
    let mut parser = Parser {
        input: expr.as_bytes(),
        pos: 0,
    };
    let value = parser.expression()?;
    parser.skip_spaces();
    if !parser.at_end() {
        return Err(CalcError::Invalid);
    }
    Ok(value)
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    // expression := term (('+' | '-') term)*
    fn expression(&mut self) -> Result<f64, CalcError> {
        let mut value = self.term()?;
        loop {
            self.skip_spaces();
            match self.peek() {
                Some(b'+') => {
                    self.pos += 1;
                    value += self.term()?;
                }
                Some(b'-') => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    // term := factor (('*' | '/') factor)*
    fn term(&mut self) -> Result<f64, CalcError> {
        let mut value = self.factor()?;
        loop {
            self.skip_spaces();
            match self.peek() {
                Some(b'*') => {
                    self.pos += 1;
                    value *= self.factor()?;
                }
                Some(b'/') => {
                    self.pos += 1;
                    let divisor = self.factor()?;
                    if divisor == 0.0 {
                        return Err(CalcError::DivisionByZero);
                    }
                    value /= divisor;
                }
                _ => return Ok(value),
            }
        }
    }

    // factor := '-' factor | '(' expression ')' | number
    fn factor(&mut self) -> Result<f64, CalcError> {
        self.skip_spaces();
        match self.peek() {
            Some(b'-') => {
                self.pos += 1;
                Ok(-self.factor()?)
            }
            Some(b'(') => {
                self.pos += 1;
                let value = self.expression()?;
                self.skip_spaces();
                if self.peek() != Some(b')') {
                    return Err(CalcError::Invalid);
                }
                self.pos += 1;
                Ok(value)
            }
            _ => self.number(),
        }
    }

    fn number(&mut self) -> Result<f64, CalcError> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == b'.') {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(CalcError::Invalid);
        }
        std::str::from_utf8(&self.input[start..self.pos])
            .ok()
            .and_then(|s| s.parse::<f64>().ok())
            .ok_or(CalcError::Invalid)
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn skip_spaces(&mut self) {
        while self.peek() == Some(b' ') {
            self.pos += 1;
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }
}
