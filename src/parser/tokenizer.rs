// Copyright 2024 Popo Utility Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Tokenizer for math expressions
//!
//! Byte-oriented scanner over ASCII syntax. Identifiers are zero-copy slices of
//! the input; numbers are converted eagerly since every literal is consumed.

use super::error::{ParseError, ParseResult};
use super::span::Spanned;
use num_bigint::BigInt;
use std::fmt;

/// Keywords of statements and constructs that exist in general-purpose
/// languages but have no place in a math expression. They are reported as
/// such instead of surfacing later as unknown names.
const RESERVED_WORDS: &[&str] = &[
    "None", "as", "assert", "async", "await", "break", "class", "continue", "def", "del", "elif",
    "except", "finally", "for", "from", "global", "import", "in", "is", "lambda", "nonlocal",
    "pass", "raise", "return", "try", "while", "with", "yield",
];

/// Expression tokens
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token<'input> {
    /// Integer literal (42, 0xff, 1_000)
    Integer(i64),
    /// Integer literal too large for i64, as written
    BigInteger(&'input str),
    /// Float literal (3.14, .5, 1e-3)
    Float(f64),
    /// Imaginary literal (2j, 0.5J)
    Imaginary(f64),
    /// Identifier
    Identifier(&'input str),
    /// Reserved keyword outside the grammar
    Reserved(&'input str),

    /// True
    True,
    /// False
    False,
    /// and
    And,
    /// or
    Or,
    /// not
    Not,
    /// if
    If,
    /// else
    Else,

    /// +
    Plus,
    /// -
    Minus,
    /// *
    Multiply,
    /// /
    Divide,
    /// //
    FloorDivide,
    /// %
    Modulo,
    /// **
    Power,
    /// ==
    Equal,
    /// !=
    NotEqual,
    /// <
    LessThan,
    /// <=
    LessThanOrEqual,
    /// >
    GreaterThan,
    /// >=
    GreaterThanOrEqual,
    /// (
    LeftParen,
    /// )
    RightParen,
    /// ,
    Comma,
}

impl<'input> Token<'input> {
    /// Get keyword from string
    #[inline]
    pub fn from_keyword(s: &str) -> Option<Token<'input>> {
        match s {
            "True" => Some(Token::True),
            "False" => Some(Token::False),
            "and" => Some(Token::And),
            "or" => Some(Token::Or),
            "not" => Some(Token::Not),
            "if" => Some(Token::If),
            "else" => Some(Token::Else),
            _ => None,
        }
    }
}

/// Value of an integer literal that did not fit in i64
///
/// Accepts the literal as written: optional `0x`/`0o`/`0b` prefix and `_` separators.
pub fn parse_big_integer(raw: &str) -> Option<BigInt> {
    let (radix, digits) = match raw.get(..2) {
        Some("0x" | "0X") => (16, &raw[2..]),
        Some("0o" | "0O") => (8, &raw[2..]),
        Some("0b" | "0B") => (2, &raw[2..]),
        _ => (10, raw),
    };
    let digits: Vec<u8> = digits.bytes().filter(|b| *b != b'_').collect();
    BigInt::parse_bytes(&digits, radix)
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Integer(i) => write!(f, "{i}"),
            Token::BigInteger(raw) => f.write_str(raw),
            Token::Float(x) => write!(f, "{x:?}"),
            Token::Imaginary(x) => write!(f, "{x:?}j"),
            Token::Identifier(s) | Token::Reserved(s) => f.write_str(s),
            Token::True => f.write_str("True"),
            Token::False => f.write_str("False"),
            Token::And => f.write_str("and"),
            Token::Or => f.write_str("or"),
            Token::Not => f.write_str("not"),
            Token::If => f.write_str("if"),
            Token::Else => f.write_str("else"),
            Token::Plus => f.write_str("+"),
            Token::Minus => f.write_str("-"),
            Token::Multiply => f.write_str("*"),
            Token::Divide => f.write_str("/"),
            Token::FloorDivide => f.write_str("//"),
            Token::Modulo => f.write_str("%"),
            Token::Power => f.write_str("**"),
            Token::Equal => f.write_str("=="),
            Token::NotEqual => f.write_str("!="),
            Token::LessThan => f.write_str("<"),
            Token::LessThanOrEqual => f.write_str("<="),
            Token::GreaterThan => f.write_str(">"),
            Token::GreaterThanOrEqual => f.write_str(">="),
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
            Token::Comma => f.write_str(","),
        }
    }
}

/// Tokenizer over a borrowed expression string
#[derive(Clone)]
pub struct Tokenizer<'input> {
    input: &'input str,
    bytes: &'input [u8],
    pos: usize,
    end: usize,
}

impl<'input> Tokenizer<'input> {
    /// Create a new tokenizer
    #[inline]
    pub fn new(input: &'input str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            end: input.len(),
        }
    }

    /// Current byte offset
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline(always)]
    fn peek_byte(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    #[inline(always)]
    fn is_id_start(ch: u8) -> bool {
        matches!(ch, b'A'..=b'Z' | b'a'..=b'z' | b'_')
    }

    #[inline(always)]
    fn is_id_continue(ch: u8) -> bool {
        matches!(ch, b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_')
    }

    /// Skip whitespace and `#` comments
    fn skip_trivia(&mut self) {
        while self.pos < self.end {
            match self.bytes[self.pos] {
                b' ' | b'\t' | b'\r' | b'\n' => self.pos += 1,
                b'#' => {
                    while self.pos < self.end && !matches!(self.bytes[self.pos], b'\n' | b'\r') {
                        self.pos += 1;
                    }
                }
                _ => break,
            }
        }
    }

    fn scan_digits(&mut self, accept: fn(u8) -> bool) {
        while self.pos < self.end && (accept(self.bytes[self.pos]) || self.bytes[self.pos] == b'_')
        {
            self.pos += 1;
        }
    }

    fn invalid_literal(&self, literal_type: &'static str, start: usize) -> ParseError {
        ParseError::InvalidLiteral {
            literal_type,
            value: self.input[start..self.pos].to_string(),
            position: start,
        }
    }

    /// Digits with `_` separators; separators must sit between digits
    fn strip_separators(&self, text: &str, literal_type: &'static str, start: usize) -> ParseResult<String> {
        if text.starts_with('_') || text.ends_with('_') || text.contains("__") {
            return Err(self.invalid_literal(literal_type, start));
        }
        Ok(text.replace('_', ""))
    }

    /// 0x / 0o / 0b literals
    fn parse_prefixed_integer(&mut self, start: usize) -> ParseResult<Token<'input>> {
        let (radix, accept): (u32, fn(u8) -> bool) = match self.bytes[self.pos + 1] {
            b'x' | b'X' => (16, |b: u8| b.is_ascii_hexdigit()),
            b'o' | b'O' => (8, |b: u8| matches!(b, b'0'..=b'7')),
            _ => (2, |b: u8| matches!(b, b'0' | b'1')),
        };
        self.pos += 2;
        let digits_start = self.pos;
        self.scan_digits(accept);
        if self.pos < self.end && Self::is_id_continue(self.bytes[self.pos]) {
            self.pos += 1;
            return Err(self.invalid_literal("integer", start));
        }
        let raw = &self.input[digits_start..self.pos];
        let digits = raw.strip_prefix('_').unwrap_or(raw);
        if digits.is_empty() {
            return Err(self.invalid_literal("integer", start));
        }
        let digits = self.strip_separators(digits, "integer", start)?;
        match i64::from_str_radix(&digits, radix) {
            Ok(value) => Ok(Token::Integer(value)),
            Err(_) => Ok(Token::BigInteger(&self.input[start..self.pos])),
        }
    }

    /// Decimal integers, floats and imaginary literals
    fn parse_number(&mut self) -> ParseResult<Token<'input>> {
        let start = self.pos;

        if self.bytes[self.pos] == b'0'
            && matches!(
                self.peek_byte(1),
                Some(b'x' | b'X' | b'o' | b'O' | b'b' | b'B')
            )
        {
            return self.parse_prefixed_integer(start);
        }

        let mut is_float = false;
        self.scan_digits(|b| b.is_ascii_digit());

        if self.peek_byte(0) == Some(b'.') {
            is_float = true;
            self.pos += 1;
            self.scan_digits(|b| b.is_ascii_digit());
        }

        if matches!(self.peek_byte(0), Some(b'e' | b'E')) {
            is_float = true;
            self.pos += 1;
            if matches!(self.peek_byte(0), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            let exponent_start = self.pos;
            self.scan_digits(|b| b.is_ascii_digit());
            if self.pos == exponent_start {
                return Err(self.invalid_literal("float", start));
            }
        }

        let text = self.strip_separators(&self.input[start..self.pos], "number", start)?;

        if matches!(self.peek_byte(0), Some(b'j' | b'J')) {
            self.pos += 1;
            if self.pos < self.end && Self::is_id_continue(self.bytes[self.pos]) {
                return Err(self.invalid_literal("imaginary", start));
            }
            return text
                .parse::<f64>()
                .map(Token::Imaginary)
                .map_err(|_| self.invalid_literal("imaginary", start));
        }

        // "2a" and friends
        if self.pos < self.end && Self::is_id_continue(self.bytes[self.pos]) {
            self.pos += 1;
            return Err(self.invalid_literal("number", start));
        }

        if is_float {
            return text
                .parse::<f64>()
                .map(Token::Float)
                .map_err(|_| self.invalid_literal("float", start));
        }

        // Leading zeros are only legal for zero itself
        if text.len() > 1 && text.starts_with('0') && text.bytes().any(|b| b != b'0') {
            return Err(self.invalid_literal("integer", start));
        }

        match text.parse::<i64>() {
            Ok(value) => Ok(Token::Integer(value)),
            Err(_) => Ok(Token::BigInteger(&self.input[start..self.pos])),
        }
    }

    fn parse_word(&mut self) -> Token<'input> {
        let start = self.pos;
        while self.pos < self.end && Self::is_id_continue(self.bytes[self.pos]) {
            self.pos += 1;
        }
        let word = &self.input[start..self.pos];
        if let Some(keyword) = Token::from_keyword(word) {
            keyword
        } else if RESERVED_WORDS.contains(&word) {
            Token::Reserved(word)
        } else {
            Token::Identifier(word)
        }
    }

    /// Consume `len` bytes and yield `token`
    #[inline(always)]
    fn operator(&mut self, token: Token<'input>, len: usize) -> Token<'input> {
        self.pos += len;
        token
    }

    /// Produce the next token, or `None` at end of input
    pub fn next_token(&mut self) -> ParseResult<Option<Spanned<Token<'input>>>> {
        self.skip_trivia();

        if self.pos >= self.end {
            return Ok(None);
        }

        let start = self.pos;
        let next = self.peek_byte(1);
        let token = match self.bytes[self.pos] {
            b'0'..=b'9' => self.parse_number()?,
            b'.' if next.is_some_and(|b| b.is_ascii_digit()) => self.parse_number()?,
            ch if Self::is_id_start(ch) => self.parse_word(),
            b'+' => self.operator(Token::Plus, 1),
            b'-' => self.operator(Token::Minus, 1),
            b'*' if next == Some(b'*') => self.operator(Token::Power, 2),
            b'*' => self.operator(Token::Multiply, 1),
            b'/' if next == Some(b'/') => self.operator(Token::FloorDivide, 2),
            b'/' => self.operator(Token::Divide, 1),
            b'%' => self.operator(Token::Modulo, 1),
            b'=' if next == Some(b'=') => self.operator(Token::Equal, 2),
            b'!' if next == Some(b'=') => self.operator(Token::NotEqual, 2),
            b'<' if next == Some(b'=') => self.operator(Token::LessThanOrEqual, 2),
            b'<' => self.operator(Token::LessThan, 1),
            b'>' if next == Some(b'=') => self.operator(Token::GreaterThanOrEqual, 2),
            b'>' => self.operator(Token::GreaterThan, 1),
            b'(' => self.operator(Token::LeftParen, 1),
            b')' => self.operator(Token::RightParen, 1),
            b',' => self.operator(Token::Comma, 1),
            _ => {
                let character = self.input[start..].chars().next().unwrap_or('\u{fffd}');
                return Err(ParseError::UnexpectedCharacter {
                    character,
                    position: start,
                });
            }
        };

        Ok(Some(Spanned::new(token, start, self.pos)))
    }

    /// Tokenize the whole input
    pub fn tokenize(mut self) -> ParseResult<Vec<Spanned<Token<'input>>>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<Token<'_>> {
        Tokenizer::new(input)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.value)
            .collect()
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("a ** b // c % 2 <= 3 != 4"),
            vec![
                Token::Identifier("a"),
                Token::Power,
                Token::Identifier("b"),
                Token::FloorDivide,
                Token::Identifier("c"),
                Token::Modulo,
                Token::Integer(2),
                Token::LessThanOrEqual,
                Token::Integer(3),
                Token::NotEqual,
                Token::Integer(4),
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(kinds("42"), vec![Token::Integer(42)]);
        assert_eq!(kinds("3.5"), vec![Token::Float(3.5)]);
        assert_eq!(kinds(".5"), vec![Token::Float(0.5)]);
        assert_eq!(kinds("1."), vec![Token::Float(1.0)]);
        assert_eq!(kinds("1e3"), vec![Token::Float(1000.0)]);
        assert_eq!(kinds("2.5E-1"), vec![Token::Float(0.25)]);
        assert_eq!(kinds("1_000"), vec![Token::Integer(1000)]);
        assert_eq!(kinds("0x1F"), vec![Token::Integer(31)]);
        assert_eq!(kinds("0b101"), vec![Token::Integer(5)]);
        assert_eq!(kinds("0o17"), vec![Token::Integer(15)]);
        assert_eq!(kinds("2j"), vec![Token::Imaginary(2.0)]);
        assert_eq!(kinds("0"), vec![Token::Integer(0)]);
        assert_eq!(kinds("00"), vec![Token::Integer(0)]);
        assert_eq!(
            kinds("99999999999999999999"),
            vec![Token::BigInteger("99999999999999999999")]
        );
        assert_eq!(kinds("0x1_0000_0000_0000_0000"), vec![Token::BigInteger("0x1_0000_0000_0000_0000")]);
    }

    #[test]
    fn test_parse_big_integer() {
        assert_eq!(
            parse_big_integer("99999999999999999999"),
            "99999999999999999999".parse::<BigInt>().ok()
        );
        assert_eq!(
            parse_big_integer("0x1_0000_0000_0000_0000"),
            Some(BigInt::from(1u8) << 64)
        );
        assert_eq!(parse_big_integer("0b1"), Some(BigInt::from(1u8)));
    }

    #[test]
    fn test_invalid_numbers() {
        for input in ["2a", "1e", "1__0", "0x", "007", "1_", "3jx"] {
            let result = Tokenizer::new(input).tokenize();
            assert!(
                matches!(result, Err(ParseError::InvalidLiteral { .. })),
                "{input} should be rejected, got {result:?}"
            );
        }
    }

    #[test]
    fn test_keywords_and_reserved_words() {
        assert_eq!(
            kinds("not True and False or x if y else z"),
            vec![
                Token::Not,
                Token::True,
                Token::And,
                Token::False,
                Token::Or,
                Token::Identifier("x"),
                Token::If,
                Token::Identifier("y"),
                Token::Else,
                Token::Identifier("z"),
            ]
        );
        assert_eq!(kinds("lambda"), vec![Token::Reserved("lambda")]);
        assert_eq!(kinds("lambdas"), vec![Token::Identifier("lambdas")]);
    }

    #[test]
    fn test_comments_and_spans() {
        let tokens = Tokenizer::new("a + # trailing\n b").tokenize().unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!((tokens[2].start, tokens[2].end), (16, 17));
    }

    #[test]
    fn test_unexpected_characters() {
        for (input, character) in [("a = 1", '='), ("'x'", '\''), ("a.b", '.'), ("x[0]", '['), ("π", 'π')] {
            match Tokenizer::new(input).tokenize() {
                Err(ParseError::UnexpectedCharacter { character: c, .. }) => assert_eq!(c, character),
                other => panic!("{input}: expected unexpected character, got {other:?}"),
            }
        }
    }
}
