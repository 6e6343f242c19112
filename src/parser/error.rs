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

//! Parser error types

use thiserror::Error;

/// Result type for parser operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Parse error with location information
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Nothing but whitespace or comments
    #[error("Empty expression")]
    EmptyExpression,

    /// Character that starts no token of the grammar
    #[error("Unexpected character '{character}' at position {position}")]
    UnexpectedCharacter {
        /// The offending character
        character: char,
        /// Byte offset of the character
        position: usize,
    },

    /// Token that is valid on its own but not where it appears
    #[error("Unexpected token '{token}' at position {position}")]
    UnexpectedToken {
        /// The unexpected token that was found
        token: String,
        /// Position where the token was found
        position: usize,
    },

    /// Expected token
    #[error("Expected {expected} at position {position}")]
    ExpectedToken {
        /// The expected token description
        expected: String,
        /// Position where the token was expected
        position: usize,
    },

    /// Unexpected end of input
    #[error("Unexpected end of input, expected {expected}")]
    UnexpectedEof {
        /// What the parser was looking for
        expected: String,
    },

    /// Malformed numeric literal
    #[error("Invalid {literal_type} literal at position {position}: {value}")]
    InvalidLiteral {
        /// Kind of literal that failed to parse
        literal_type: &'static str,
        /// The source text of the literal
        value: String,
        /// Position where the literal starts
        position: usize,
    },

    /// Keyword of a statement or construct outside the expression grammar
    #[error("'{word}' is not supported in math expressions (position {position})")]
    ReservedWord {
        /// The keyword
        word: String,
        /// Position of the keyword
        position: usize,
    },

    /// Nesting beyond the configured limit
    #[error("Expression nesting exceeds the limit of {max_depth} at position {position}")]
    NestingTooDeep {
        /// Configured limit
        max_depth: usize,
        /// Position where the limit was hit
        position: usize,
    },
}

impl ParseError {
    /// Byte offset the error points at, if any
    pub fn position(&self) -> Option<usize> {
        match self {
            ParseError::EmptyExpression | ParseError::UnexpectedEof { .. } => None,
            ParseError::UnexpectedCharacter { position, .. }
            | ParseError::UnexpectedToken { position, .. }
            | ParseError::ExpectedToken { position, .. }
            | ParseError::InvalidLiteral { position, .. }
            | ParseError::ReservedWord { position, .. }
            | ParseError::NestingTooDeep { position, .. } => Some(*position),
        }
    }
}
