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

//! Math expression parser
//!
//! Tokenizer plus Pratt parser producing the closed [`ExpressionNode`] tree.
//!
//! [`ExpressionNode`]: crate::ast::ExpressionNode

#![warn(missing_docs)]

pub mod error;
pub mod pratt;
pub mod span;
pub mod tokenizer;

pub use error::{ParseError, ParseResult};
pub use pratt::{DEFAULT_MAX_DEPTH, PrattParser, Precedence, parse_expression_pratt};
pub use span::Spanned;
pub use tokenizer::{Token, Tokenizer};

// Re-export parser function for compatibility
pub use pratt::parse_expression_pratt as parse_expression;

/// Parse a math expression string into an AST
pub fn parse(input: &str) -> ParseResult<crate::ast::ExpressionNode> {
    parse_expression_pratt(input)
}

/// Parse with a custom nesting limit
pub fn parse_with_max_depth(
    input: &str,
    max_depth: usize,
) -> ParseResult<crate::ast::ExpressionNode> {
    PrattParser::with_max_depth(input, max_depth).parse()
}
