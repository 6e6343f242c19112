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

//! Error types for math expression evaluation

use crate::model::ArithmeticError;
use crate::registry::FunctionError;
use thiserror::Error;

/// Result type for evaluation operations
pub type EvaluationResult<T> = Result<T, EvaluationError>;

/// Errors that can occur while evaluating a parsed expression
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    /// Function evaluation error
    #[error("Function error: {0}")]
    Function(#[from] FunctionError),

    /// Operator evaluation error (division by zero, overflow, bad operand types)
    #[error("Operator error: {0}")]
    Arithmetic(#[from] ArithmeticError),

    /// Identifier outside the namespace
    #[error("name '{name}' is not defined")]
    UndefinedName {
        /// Identifier
        name: String,
    },

    /// Call of a name bound to a value
    #[error("'{name}' is not callable ({type_name})")]
    NotCallable {
        /// Identifier
        name: String,
        /// Type of the bound value
        type_name: &'static str,
    },

    /// Function used without being called
    #[error("function '{name}' used as a value")]
    FunctionAsValue {
        /// Function name
        name: String,
    },

    /// Result has a non-zero imaginary part
    #[error("result is not a real number: ({re}{im:+}j)")]
    NonRealResult {
        /// Real part
        re: f64,
        /// Imaginary part
        im: f64,
    },

    /// Expression tree deeper than the evaluator allows
    #[error("expression nesting exceeds {max_depth} levels")]
    DepthExceeded {
        /// Configured limit
        max_depth: usize,
    },
}

impl EvaluationError {
    /// Whether the error stems from an argument outside a function's domain
    pub fn is_domain_error(&self) -> bool {
        matches!(self, EvaluationError::Function(FunctionError::Domain { .. }))
    }

    /// Whether the error is a division (or modulo) by zero
    pub fn is_division_by_zero(&self) -> bool {
        matches!(
            self,
            EvaluationError::Arithmetic(ArithmeticError::DivisionByZero { .. })
                | EvaluationError::Function(FunctionError::Arithmetic {
                    source: ArithmeticError::DivisionByZero { .. },
                    ..
                })
        )
    }

    /// Whether the error is a numeric overflow
    pub fn is_overflow(&self) -> bool {
        matches!(
            self,
            EvaluationError::Arithmetic(ArithmeticError::Overflow { .. })
                | EvaluationError::Function(FunctionError::Overflow { .. })
                | EvaluationError::Function(FunctionError::Arithmetic {
                    source: ArithmeticError::Overflow { .. },
                    ..
                })
        )
    }
}
