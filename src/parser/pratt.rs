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

//! Pratt parser for restricted math expressions
//!
//! The grammar is closed: numbers, booleans, identifiers, calls of plain
//! identifiers, arithmetic, chained comparisons, `and`/`or`/`not` and the
//! `x if cond else y` conditional. There are no strings, attributes,
//! subscripts, lambdas or keyword arguments, so a parsed tree cannot reach
//! anything but the evaluation namespace.

use super::error::{ParseError, ParseResult};
use super::span::Spanned;
use super::tokenizer::{Token, Tokenizer, parse_big_integer};
use crate::ast::{
    Arguments, BinaryOperator, ComparisonOperator, ExpressionNode, LiteralValue, LogicalOperator,
    UnaryOperator,
};

/// Default nesting limit, matching the parenthesis limit of common interpreters
pub const DEFAULT_MAX_DEPTH: usize = 200;

/// Operator precedence levels (higher = tighter binding)
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// `x if c else y` (right associative)
    Conditional = 1,
    /// or
    Or = 2,
    /// and
    And = 3,
    /// Prefix `not`
    Not = 4,
    /// Comparison chains (<, <=, >, >=, ==, !=)
    Comparison = 5,
    /// + and -
    Additive = 6,
    /// *, /, //, %
    Multiplicative = 7,
    /// Prefix + and -
    Unary = 8,
    /// ** (right associative, binds tighter than a unary operator on its left)
    Power = 9,
}

impl Precedence {
    /// Get the next higher precedence level for left-associative operators
    #[inline(always)]
    pub const fn next_level(self) -> Self {
        match self {
            Precedence::Conditional => Precedence::Or,
            Precedence::Or => Precedence::And,
            Precedence::And => Precedence::Not,
            Precedence::Not => Precedence::Comparison,
            Precedence::Comparison => Precedence::Additive,
            Precedence::Additive => Precedence::Multiplicative,
            Precedence::Multiplicative => Precedence::Unary,
            Precedence::Unary => Precedence::Power,
            Precedence::Power => Precedence::Power,
        }
    }
}

#[inline(always)]
fn get_precedence(token: &Token<'_>) -> Option<Precedence> {
    match token {
        Token::Plus | Token::Minus => Some(Precedence::Additive),
        Token::Multiply | Token::Divide | Token::FloorDivide | Token::Modulo => {
            Some(Precedence::Multiplicative)
        }
        Token::Power => Some(Precedence::Power),
        Token::Equal
        | Token::NotEqual
        | Token::LessThan
        | Token::LessThanOrEqual
        | Token::GreaterThan
        | Token::GreaterThanOrEqual => Some(Precedence::Comparison),
        Token::And => Some(Precedence::And),
        Token::Or => Some(Precedence::Or),
        Token::If => Some(Precedence::Conditional),
        _ => None,
    }
}

#[inline(always)]
fn token_to_binary_op(token: &Token<'_>) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Subtract),
        Token::Multiply => Some(BinaryOperator::Multiply),
        Token::Divide => Some(BinaryOperator::Divide),
        Token::FloorDivide => Some(BinaryOperator::FloorDivide),
        Token::Modulo => Some(BinaryOperator::Modulo),
        Token::Power => Some(BinaryOperator::Power),
        _ => None,
    }
}

#[inline(always)]
fn token_to_comparison_op(token: &Token<'_>) -> Option<ComparisonOperator> {
    match token {
        Token::Equal => Some(ComparisonOperator::Equal),
        Token::NotEqual => Some(ComparisonOperator::NotEqual),
        Token::LessThan => Some(ComparisonOperator::LessThan),
        Token::LessThanOrEqual => Some(ComparisonOperator::LessThanOrEqual),
        Token::GreaterThan => Some(ComparisonOperator::GreaterThan),
        Token::GreaterThanOrEqual => Some(ComparisonOperator::GreaterThanOrEqual),
        _ => None,
    }
}

/// Pratt parser over a single expression
///
/// ### Precedence Levels (highest to lowest):
/// - **Power** (9): `**`, right associative; its right operand may carry a sign
/// - **Unary** (8): prefix `+`, `-`
/// - **Multiplicative** (7): `*`, `/`, `//`, `%`
/// - **Additive** (6): `+`, `-`
/// - **Comparison** (5): `<`, `<=`, `>`, `>=`, `==`, `!=`, chained
/// - **Not** (4): prefix `not`
/// - **And** (3) / **Or** (2): short-circuiting
/// - **Conditional** (1): `x if cond else y`
pub struct PrattParser<'input> {
    tokenizer: Tokenizer<'input>,
    current_token: Option<Spanned<Token<'input>>>,
    depth: usize,
    max_depth: usize,
}

impl<'input> PrattParser<'input> {
    /// Create a parser with the default nesting limit
    #[inline]
    pub fn new(input: &'input str) -> Self {
        Self::with_max_depth(input, DEFAULT_MAX_DEPTH)
    }

    /// Create a parser with a custom nesting limit
    #[inline]
    pub fn with_max_depth(input: &'input str, max_depth: usize) -> Self {
        Self {
            tokenizer: Tokenizer::new(input),
            current_token: None,
            depth: 0,
            max_depth,
        }
    }

    /// Parse the whole input as one expression
    pub fn parse(mut self) -> ParseResult<ExpressionNode> {
        self.advance()?;
        if self.current_token.is_none() {
            return Err(ParseError::EmptyExpression);
        }

        let expr = self.parse_expression_with_precedence(Precedence::Conditional)?;

        match &self.current_token {
            None => Ok(expr),
            Some(token) => Err(ParseError::UnexpectedToken {
                token: token.value.to_string(),
                position: token.start,
            }),
        }
    }

    #[inline(always)]
    fn advance(&mut self) -> ParseResult<()> {
        self.current_token = self.tokenizer.next_token()?;
        Ok(())
    }

    #[inline(always)]
    fn current(&self) -> Option<&Token<'input>> {
        self.current_token.as_ref().map(|t| &t.value)
    }

    #[inline(always)]
    fn position(&self) -> usize {
        self.current_token
            .as_ref()
            .map_or_else(|| self.tokenizer.position(), |t| t.start)
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        match &self.current_token {
            Some(token) => ParseError::ExpectedToken {
                expected: format!("{expected}, found '{}'", token.value),
                position: token.start,
            },
            None => ParseError::UnexpectedEof {
                expected: expected.to_string(),
            },
        }
    }

    /// Consume `expected` or fail with a description of what was wanted
    fn expect(&mut self, expected: Token<'input>, description: &str) -> ParseResult<()> {
        match self.current() {
            Some(token) if std::mem::discriminant(token) == std::mem::discriminant(&expected) => {
                self.advance()
            }
            _ => Err(self.unexpected(description)),
        }
    }

    /// Parse an expression whose operators all bind at least as tightly as `min`
    fn parse_expression_with_precedence(
        &mut self,
        min: Precedence,
    ) -> ParseResult<ExpressionNode> {
        if self.depth >= self.max_depth {
            return Err(ParseError::NestingTooDeep {
                max_depth: self.max_depth,
                position: self.position(),
            });
        }
        self.depth += 1;
        let result = self.parse_operators(min);
        self.depth -= 1;
        result
    }

    fn parse_operators(&mut self, min: Precedence) -> ParseResult<ExpressionNode> {
        let mut left = self.parse_prefix(min)?;

        while let Some(token) = self.current().copied() {
            let Some(precedence) = get_precedence(&token) else {
                break;
            };
            if precedence < min {
                break;
            }

            left = match token {
                Token::If => {
                    self.advance()?;
                    let condition = self.parse_expression_with_precedence(Precedence::Or)?;
                    self.expect(Token::Else, "'else' after conditional")?;
                    let else_expr = self.parse_expression_with_precedence(Precedence::Conditional)?;
                    ExpressionNode::conditional(condition, left, else_expr)
                }
                Token::And | Token::Or => {
                    let op = if token == Token::And {
                        LogicalOperator::And
                    } else {
                        LogicalOperator::Or
                    };
                    self.advance()?;
                    let right = self.parse_expression_with_precedence(precedence.next_level())?;
                    ExpressionNode::logical(op, left, right)
                }
                Token::Power => {
                    self.advance()?;
                    // Right operand at unary level: 2 ** -1 and 2 ** 3 ** 2
                    let right = self.parse_expression_with_precedence(Precedence::Unary)?;
                    ExpressionNode::binary_op(BinaryOperator::Power, left, right)
                }
                _ if precedence == Precedence::Comparison => {
                    let mut rest = Vec::new();
                    while let Some(op) = self.current().and_then(token_to_comparison_op) {
                        self.advance()?;
                        let operand = self.parse_expression_with_precedence(Precedence::Additive)?;
                        rest.push((op, operand));
                    }
                    ExpressionNode::comparison(left, rest)
                }
                _ => {
                    let Some(op) = token_to_binary_op(&token) else {
                        break;
                    };
                    self.advance()?;
                    let right = self.parse_expression_with_precedence(precedence.next_level())?;
                    ExpressionNode::binary_op(op, left, right)
                }
            };
        }

        Ok(left)
    }

    /// Literals, names, calls, parenthesized expressions and prefix operators
    fn parse_prefix(&mut self, min: Precedence) -> ParseResult<ExpressionNode> {
        let Some(spanned) = self.current_token else {
            return Err(self.unexpected("an expression"));
        };

        match spanned.value {
            Token::Integer(value) => {
                self.advance()?;
                Ok(ExpressionNode::literal(LiteralValue::Integer(value)))
            }
            Token::BigInteger(raw) => {
                let value = parse_big_integer(raw).ok_or_else(|| ParseError::InvalidLiteral {
                    literal_type: "integer",
                    value: raw.to_string(),
                    position: spanned.start,
                })?;
                self.advance()?;
                Ok(ExpressionNode::literal(LiteralValue::BigInteger(value)))
            }
            Token::Float(value) => {
                self.advance()?;
                Ok(ExpressionNode::literal(LiteralValue::Float(value)))
            }
            Token::Imaginary(value) => {
                self.advance()?;
                Ok(ExpressionNode::literal(LiteralValue::Imaginary(value)))
            }
            Token::True | Token::False => {
                self.advance()?;
                Ok(ExpressionNode::literal(LiteralValue::Boolean(
                    spanned.value == Token::True,
                )))
            }
            Token::Identifier(name) => {
                self.advance()?;
                if let Some(Token::LeftParen) = self.current() {
                    self.parse_function_call(name)
                } else {
                    Ok(ExpressionNode::identifier(name))
                }
            }
            Token::LeftParen => {
                self.advance()?;
                let expr = self.parse_expression_with_precedence(Precedence::Conditional)?;
                self.expect(Token::RightParen, "')'")?;
                Ok(expr)
            }
            Token::Minus | Token::Plus => {
                let op = if spanned.value == Token::Minus {
                    UnaryOperator::Minus
                } else {
                    UnaryOperator::Plus
                };
                self.advance()?;
                let operand = self.parse_expression_with_precedence(Precedence::Unary)?;
                Ok(ExpressionNode::unary_op(op, operand))
            }
            // `not` only appears where a boolean operand is allowed: `a + not b` is invalid
            Token::Not if min <= Precedence::Not => {
                self.advance()?;
                let operand = self.parse_expression_with_precedence(Precedence::Not)?;
                Ok(ExpressionNode::unary_op(UnaryOperator::Not, operand))
            }
            Token::Reserved(word) => Err(ParseError::ReservedWord {
                word: word.to_string(),
                position: spanned.start,
            }),
            other => Err(ParseError::UnexpectedToken {
                token: other.to_string(),
                position: spanned.start,
            }),
        }
    }

    /// Parse `name(arg, ...)`; the current token is the opening parenthesis
    fn parse_function_call(&mut self, name: &str) -> ParseResult<ExpressionNode> {
        self.advance()?;
        let mut args = Arguments::new();

        while !matches!(self.current(), Some(Token::RightParen)) {
            args.push(self.parse_expression_with_precedence(Precedence::Conditional)?);
            match self.current() {
                Some(Token::Comma) => self.advance()?,
                Some(Token::RightParen) => break,
                _ => return Err(self.unexpected("',' or ')' in argument list")),
            }
        }

        self.expect(Token::RightParen, "')'")?;
        Ok(ExpressionNode::function_call(name, args))
    }
}

/// Parse a math expression with the default nesting limit
pub fn parse_expression_pratt(input: &str) -> ParseResult<ExpressionNode> {
    PrattParser::new(input).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(input: &str) -> ExpressionNode {
        parse_expression_pratt(input).unwrap()
    }

    fn render(input: &str) -> String {
        parse(input).to_string()
    }

    #[test]
    fn test_precedence_ordering() {
        assert!(Precedence::Power > Precedence::Unary);
        assert!(Precedence::Multiplicative > Precedence::Additive);
        assert!(Precedence::Additive > Precedence::Comparison);
        assert!(Precedence::Comparison > Precedence::Not);
        assert!(Precedence::And > Precedence::Or);
        assert!(Precedence::Or > Precedence::Conditional);
    }

    #[test]
    fn test_basic_expressions() {
        assert_eq!(render("a + b * c"), "(a + (b * c))");
        assert_eq!(render("(a + b) * c"), "((a + b) * c)");
        assert_eq!(render("a - b - c"), "((a - b) - c)");
        assert_eq!(render("a // b % c"), "((a // b) % c)");
    }

    #[test]
    fn test_power_binding() {
        assert_eq!(render("-2 ** 2"), "(-(2 ** 2))");
        assert_eq!(render("2 ** -1"), "(2 ** (-1))");
        assert_eq!(render("2 ** 3 ** 2"), "(2 ** (3 ** 2))");
        assert_eq!(render("a * -b"), "(a * (-b))");
    }

    #[test]
    fn test_comparison_chain() {
        let expr = parse("0 < a <= b + 1");
        match expr {
            ExpressionNode::Comparison(data) => {
                assert_eq!(data.rest.len(), 2);
                assert_eq!(data.rest[0].0, ComparisonOperator::LessThan);
                assert_eq!(data.rest[1].0, ComparisonOperator::LessThanOrEqual);
            }
            other => panic!("Expected comparison chain, got {other:?}"),
        }
    }

    #[test]
    fn test_boolean_operators() {
        assert_eq!(render("a or b and c"), "(a or (b and c))");
        assert_eq!(render("not a < b"), "(not (a < b))");
        assert_eq!(render("not not a"), "(not (not a))");
    }

    #[test]
    fn test_conditional() {
        assert_eq!(render("a if a > b else b"), "(a if (a > b) else b)");
        assert_eq!(
            render("a if x else b if y else c"),
            "(a if x else (b if y else c))"
        );
        assert_eq!(render("1 + a if b else c"), "((1 + a) if b else c)");
    }

    #[test]
    fn test_function_calls() {
        assert_eq!(render("max(a, b, c)"), "max(a, b, c)");
        assert_eq!(render("pow(sqrt(a), b) + c"), "(pow(sqrt(a), b) + c)");
        assert_eq!(render("int()"), "int()");
        assert_eq!(render("round(a, 2,)"), "round(a, 2)");
    }

    #[test]
    fn test_syntax_errors() {
        let cases = [
            "",
            "   # only a comment",
            "a +",
            "(a + b",
            "a b",
            "f(a b)",
            "a + not b",
            "a if b",
            "(sqrt)(4)",
            "2(3)",
            ")",
            "lambda: 1",
            "import os",
            "f(x=1)",
        ];
        for input in cases {
            assert!(
                parse_expression_pratt(input).is_err(),
                "'{input}' should not parse"
            );
        }
    }

    #[test]
    fn test_reserved_word_error() {
        assert_eq!(
            parse_expression_pratt("lambda"),
            Err(ParseError::ReservedWord {
                word: "lambda".to_string(),
                position: 0,
            })
        );
    }

    #[test]
    fn test_nesting_limit() {
        let nested = format!("{}1{}", "(".repeat(10), ")".repeat(10));
        assert!(PrattParser::with_max_depth(&nested, 20).parse().is_ok());
        assert!(matches!(
            PrattParser::with_max_depth(&nested, 5).parse(),
            Err(ParseError::NestingTooDeep { max_depth: 5, .. })
        ));

        let deep = format!("{}1{}", "(".repeat(1000), ")".repeat(1000));
        assert!(matches!(
            parse_expression_pratt(&deep),
            Err(ParseError::NestingTooDeep { .. })
        ));
    }
}
