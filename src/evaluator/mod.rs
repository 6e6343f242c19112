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

//! Math expression evaluator
//!
//! Evaluates a parsed expression against a fresh [`Namespace`] and
//! normalises the outcome to an [`ExpressionResult`].

#![warn(missing_docs)]

mod error;
mod interpreter;
mod namespace;
mod normalize;

pub use error::{EvaluationError, EvaluationResult};
pub use interpreter::{DEFAULT_MAX_EVALUATION_DEPTH, Interpreter};
pub use namespace::{Binding, Namespace, OPERAND_NAMES};
pub use normalize::{
    ExpressionResult, NEGATIVE_INFINITY_SENTINEL, POSITIVE_INFINITY_SENTINEL, normalize,
    normalize_float,
};
