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

//! Whitelisted functions and constants
//!
//! Only the names registered here resolve inside an expression. The set is
//! fixed at startup: nothing in it performs I/O, reflects on the evaluator
//! or re-enters it.

#![warn(missing_docs)]

pub mod constants;
pub mod function;
pub mod functions;
pub mod signature;

pub use constants::{CONSTANTS, Constant, lookup_constant};
pub use function::{
    EvaluationContext, FunctionError, FunctionRegistry, FunctionResult, MathFunction,
    standard_registry,
};
pub use signature::{FunctionSignature, ParameterInfo};
