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

//! Top-level error type for expression evaluation

use crate::evaluator::EvaluationError;
use crate::parser::ParseError;
use crate::screening::ScreeningError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type alias for expression operations
pub type Result<T> = std::result::Result<T, ExpressionError>;

/// Everything that can make an expression fail
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    /// Source longer than the configured limit
    #[error("expression is {length} bytes long, the limit is {max_length}")]
    TooLong {
        /// Source length in bytes
        length: usize,
        /// Configured limit
        max_length: usize,
    },

    /// Refused by the deny list
    #[error(transparent)]
    Screening(#[from] ScreeningError),

    /// Outside the restricted grammar
    #[error("syntax error: {0}")]
    Parse(#[from] ParseError),

    /// Runtime failure
    #[error("evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),
}

/// Coarse classification of failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorCategory {
    /// Refused before evaluation
    RejectedSyntax,
    /// Failed while parsing or evaluating
    EvaluationError,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::RejectedSyntax => f.write_str("RejectedSyntax"),
            ErrorCategory::EvaluationError => f.write_str("EvaluationError"),
        }
    }
}

impl ExpressionError {
    /// Category of this error
    ///
    /// Over-long sources count as rejected; syntax errors and non-real
    /// results count as evaluation errors.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ExpressionError::TooLong { .. } | ExpressionError::Screening(_) => {
                ErrorCategory::RejectedSyntax
            }
            ExpressionError::Parse(_) | ExpressionError::Evaluation(_) => {
                ErrorCategory::EvaluationError
            }
        }
    }
}
