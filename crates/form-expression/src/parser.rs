//! Recursive-descent parser for visibility expressions.
//!
//! The accepted language is deliberately small: comparisons, `&&`, `||`, `!`,
//! parentheses, literals and `formData.KEY` references. There are no calls,
//! assignments or free identifiers, so a hostile configuration cannot do
//! anything beyond reading form values.

use crate::error::ParseError;
use crate::types::{ComparisonOperator, Expr, ExprValue, LogicalOperator};
use serde_json::{Number, Value};

/// Root identifiers that refer to the form value map.
const ROOTS: &[&str] = &["formData", "model"];

/// Deepest nesting of `!`, parentheses and `&&`/`||` chains accepted.
pub const MAX_DEPTH: usize = 128;

/// Helper struct returned by `peek_comparison_operator`.
struct ComparisonToken {
    operator: ComparisonOperator,
    len: usize,
}

/// Visibility expression parser.
pub struct ExprParser<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> ExprParser<'a> {
    /// Parse a complete expression. Trailing input is an error.
    pub fn parse(input: &'a str) -> Result<Expr, ParseError> {
        let mut parser = Self {
            input,
            pos: 0,
            depth: 0,
        };
        parser.skip_whitespace();
        if parser.is_at_end() {
            return Err(ParseError::Empty);
        }
        let expr = parser.parse_or()?;
        parser.skip_whitespace();
        match parser.peek() {
            None => Ok(expr),
            Some(ch) => Err(ParseError::UnexpectedChar { ch, pos: parser.pos }),
        }
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;
        self.skip_whitespace();
        let depth = self.depth;

        while self.peek_str("||") {
            self.enter()?;
            self.advance_by(2);
            let right = self.parse_and()?;
            left = Expr::logical(LogicalOperator::Or, left, right);
            self.skip_whitespace();
        }

        self.depth = depth;
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;
        self.skip_whitespace();
        let depth = self.depth;

        while self.peek_str("&&") {
            self.enter()?;
            self.advance_by(2);
            let right = self.parse_unary()?;
            left = Expr::logical(LogicalOperator::And, left, right);
            self.skip_whitespace();
        }

        self.depth = depth;
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        self.skip_whitespace();

        if self.peek() == Some('!') && !self.peek_str("!=") {
            self.enter()?;
            self.advance();
            let inner = self.parse_unary()?;
            self.depth -= 1;
            return Ok(Expr::Not(Box::new(inner)));
        }

        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_operand()?;
        self.skip_whitespace();

        if let Some(op) = self.peek_comparison_operator() {
            self.advance_by(op.len);
            let right = self.parse_operand()?;
            return Ok(Expr::compare(op.operator, left, right));
        }

        Ok(left)
    }

    fn parse_operand(&mut self) -> Result<Expr, ParseError> {
        self.skip_whitespace();

        match self.peek() {
            None => Err(ParseError::UnexpectedEnd),
            Some('(') => {
                self.enter()?;
                self.advance();
                let expr = self.parse_or()?;
                self.skip_whitespace();
                self.expect(')')?;
                self.depth -= 1;
                Ok(expr)
            }
            Some('\'') | Some('"') => {
                let s = self.parse_string()?;
                Ok(Expr::Literal(ExprValue::Json(Value::String(s))))
            }
            Some(c) if c.is_ascii_digit() || c == '-' => {
                let n = self.parse_number()?;
                Ok(Expr::Literal(ExprValue::Json(Value::Number(n))))
            }
            Some(c) if is_ident_start(c) => self.parse_word(),
            Some(ch) => Err(ParseError::UnexpectedChar { ch, pos: self.pos }),
        }
    }

    fn parse_word(&mut self) -> Result<Expr, ParseError> {
        let start = self.pos;
        let word = self.parse_identifier();

        match word.as_str() {
            "true" => Ok(Expr::literal(true)),
            "false" => Ok(Expr::literal(false)),
            "null" => Ok(Expr::Literal(ExprValue::Json(Value::Null))),
            "undefined" => Ok(Expr::Literal(ExprValue::Undefined)),
            root if ROOTS.contains(&root) => self.parse_reference(root),
            _ => Err(ParseError::UnknownIdentifier { name: word, pos: start }),
        }
    }

    /// Parses the accessor chain following a root identifier. The first
    /// accessor names the field, the rest read members of its value.
    fn parse_reference(&mut self, root: &str) -> Result<Expr, ParseError> {
        let mut segments = Vec::new();

        loop {
            match self.peek() {
                Some('.') => {
                    self.advance();
                    let pos = self.pos;
                    let name = self.parse_identifier();
                    if name.is_empty() {
                        return match self.peek() {
                            Some(ch) => Err(ParseError::UnexpectedChar { ch, pos }),
                            None => Err(ParseError::UnexpectedEnd),
                        };
                    }
                    segments.push(name);
                }
                Some('[') => {
                    self.advance();
                    self.skip_whitespace();
                    match self.peek() {
                        Some('\'') | Some('"') => segments.push(self.parse_string()?),
                        Some(ch) => return Err(ParseError::UnexpectedChar { ch, pos: self.pos }),
                        None => return Err(ParseError::UnexpectedEnd),
                    }
                    self.skip_whitespace();
                    self.expect(']')?;
                }
                _ => break,
            }
        }

        let mut segments = segments.into_iter();
        match segments.next() {
            Some(key) => Ok(Expr::Field {
                key,
                path: segments.collect(),
            }),
            None => Err(ParseError::MissingAccessor {
                root: root.to_string(),
                pos: self.pos,
            }),
        }
    }

    fn parse_identifier(&mut self) -> String {
        let start = self.pos;

        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }

        self.input[start..self.pos].to_string()
    }

    fn parse_string(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        let quote = match self.peek() {
            Some(q) => q,
            None => return Err(ParseError::UnexpectedEnd),
        };
        self.advance();

        let mut result = String::new();

        loop {
            match self.peek() {
                None => return Err(ParseError::UnclosedString { pos: start }),
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    let escape_pos = self.pos;
                    self.advance();
                    match self.peek() {
                        Some('n') => result.push('\n'),
                        Some('t') => result.push('\t'),
                        Some('r') => result.push('\r'),
                        Some('\\') => result.push('\\'),
                        Some('\'') => result.push('\''),
                        Some('"') => result.push('"'),
                        _ => return Err(ParseError::InvalidEscape { pos: escape_pos }),
                    }
                    self.advance();
                }
                Some(c) => {
                    result.push(c);
                    self.advance();
                }
            }
        }

        Ok(result)
    }

    fn parse_number(&mut self) -> Result<Number, ParseError> {
        let start = self.pos;

        if self.peek() == Some('-') {
            self.advance();
        }

        if !matches!(self.peek(), Some('0'..='9')) {
            return Err(ParseError::InvalidNumber { pos: start });
        }
        while matches!(self.peek(), Some('0'..='9')) {
            self.advance();
        }

        let mut is_float = false;
        if self.peek() == Some('.') {
            is_float = true;
            self.advance();
            if !matches!(self.peek(), Some('0'..='9')) {
                return Err(ParseError::InvalidNumber { pos: start });
            }
            while matches!(self.peek(), Some('0'..='9')) {
                self.advance();
            }
        }

        if matches!(self.peek(), Some('e') | Some('E')) {
            is_float = true;
            self.advance();
            if matches!(self.peek(), Some('+') | Some('-')) {
                self.advance();
            }
            if !matches!(self.peek(), Some('0'..='9')) {
                return Err(ParseError::InvalidNumber { pos: start });
            }
            while matches!(self.peek(), Some('0'..='9')) {
                self.advance();
            }
        }

        let text = &self.input[start..self.pos];
        if !is_float {
            if let Ok(n) = text.parse::<i64>() {
                return Ok(Number::from(n));
            }
        }
        text.parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .ok_or(ParseError::InvalidNumber { pos: start })
    }

    fn peek_comparison_operator(&self) -> Option<ComparisonToken> {
        let table: [(&str, ComparisonOperator); 8] = [
            ("===", ComparisonOperator::StrictEqual),
            ("!==", ComparisonOperator::StrictNotEqual),
            ("==", ComparisonOperator::Equal),
            ("!=", ComparisonOperator::NotEqual),
            ("<=", ComparisonOperator::LessEqual),
            (">=", ComparisonOperator::GreaterEqual),
            ("<", ComparisonOperator::Less),
            (">", ComparisonOperator::Greater),
        ];
        table
            .iter()
            .find(|(token, _)| self.peek_str(token))
            .map(|(token, operator)| ComparisonToken {
                operator: *operator,
                len: token.len(),
            })
    }

    /// Opens one nesting level. Every recursive descent and every link of an
    /// operator chain deepens the tree, which the evaluator walks recursively.
    fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(ParseError::TooDeep { pos: self.pos });
        }
        self.depth += 1;
        Ok(())
    }

    fn peek_str(&self, s: &str) -> bool {
        self.input[self.pos..].starts_with(s)
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.advance();
                Ok(())
            }
            Some(ch) => Err(ParseError::UnexpectedChar { ch, pos: self.pos }),
            None => Err(ParseError::UnexpectedEnd),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Returns true if `key` can be written with dot notation (`formData.KEY`).
pub(crate) fn is_plain_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if is_ident_start(c) => chars.all(is_ident_continue),
        _ => false,
    }
}
