//! Numeric evaluation of rendered root expressions.
//!
//! Understands exactly the notation the engine emits (`-5`, `3/2`, `-2+√3`,
//! `(1-3√5)/2`, `√10/2`) plus a little slack for typed answers: whitespace,
//! `sqrt` as a spelling of `√`, `*` for explicit products and the Unicode
//! minus sign.

use crate::error::EvalError;

/// Evaluate a rendered root to a floating-point value.
///
/// ```
/// use quadforge_core::evaluate::evaluate;
///
/// let v = evaluate("(1+√5)/2").unwrap();
/// assert!((v - 1.618033988749895).abs() < 1e-12);
/// ```
pub fn evaluate(input: &str) -> Result<f64, EvalError> {
    let mut parser = Parser {
        chars: input.replace("sqrt", "√").replace('−', "-").chars().collect(),
        pos: 0,
    };
    let value = parser.expr()?;
    parser.skip_ws();
    if let Some(&found) = parser.chars.get(parser.pos) {
        return Err(EvalError::UnexpectedChar {
            found,
            position: parser.pos,
        });
    }
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::Undefined)
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn skip_ws(&mut self) {
        while self.chars.get(self.pos).is_some_and(|c| c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.skip_ws();
        self.chars.get(self.pos).copied()
    }

    fn expr(&mut self) -> Result<f64, EvalError> {
        let mut value = self.term()?;
        loop {
            match self.peek() {
                Some('+') => {
                    self.pos += 1;
                    value += self.term()?;
                }
                Some('-') => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.unary()?;
        loop {
            match self.peek() {
                Some('*') => {
                    self.pos += 1;
                    value *= self.unary()?;
                }
                Some('/') => {
                    self.pos += 1;
                    let divisor = self.unary()?;
                    if divisor == 0.0 {
                        return Err(EvalError::Undefined);
                    }
                    value /= divisor;
                }
                // Implicit product: 2√3, 3(1+√2)
                Some('√') | Some('(') => value *= self.unary()?,
                _ => return Ok(value),
            }
        }
    }

    fn unary(&mut self) -> Result<f64, EvalError> {
        match self.peek() {
            Some('-') => {
                self.pos += 1;
                Ok(-self.unary()?)
            }
            Some('+') => {
                self.pos += 1;
                self.unary()
            }
            _ => self.atom(),
        }
    }

    fn atom(&mut self) -> Result<f64, EvalError> {
        match self.peek() {
            None => Err(EvalError::UnexpectedEnd),
            Some('(') => {
                self.pos += 1;
                let value = self.expr()?;
                match self.peek() {
                    Some(')') => {
                        self.pos += 1;
                        Ok(value)
                    }
                    Some(found) => Err(EvalError::UnexpectedChar {
                        found,
                        position: self.pos,
                    }),
                    None => Err(EvalError::UnexpectedEnd),
                }
            }
            Some('√') => {
                self.pos += 1;
                let radicand = self.atom()?;
                if radicand < 0.0 {
                    return Err(EvalError::Undefined);
                }
                Ok(radicand.sqrt())
            }
            Some(c) if c.is_ascii_digit() => self.number(),
            Some(found) => Err(EvalError::UnexpectedChar {
                found,
                position: self.pos,
            }),
        }
    }

    fn number(&mut self) -> Result<f64, EvalError> {
        let start = self.pos;
        while self.chars.get(self.pos).is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        let digits: String = self.chars[start..self.pos].iter().collect();
        digits
            .parse::<i64>()
            .map(|n| n as f64)
            .map_err(|_| EvalError::NumberTooLarge(start))
    }
}
