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

//! Image shape nodes and a sandboxed math expression evaluator
//!
//! The `popo-utility` node package: three nodes that read the shape of an
//! image tensor and one node that evaluates a math expression over three
//! operands `a`, `b` and `c`.
//!
//! Expressions run in a closed language. A deny list rejects known escape
//! patterns before parsing, the parser only accepts arithmetic, comparison
//! and boolean syntax, and only whitelisted functions and constants resolve.
//!
//! ```
//! use popo_utility::evaluate;
//!
//! assert_eq!(evaluate(3.0, 4.0, 0.0, "sqrt(a*a + b*b)"), (5, 5.0));
//! assert_eq!(evaluate(0.0, 0.0, 0.0, "__import__('os')"), (0, 0.0));
//! ```

pub mod ast;
pub mod config;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod model;
pub mod nodes;
pub mod parser;
pub mod registry;
pub mod screening;

// Re-export main types
pub use config::EvaluatorConfig;
pub use engine::{MathExpressionEngine, default_engine, evaluate, try_evaluate};
pub use error::{ErrorCategory, ExpressionError, Result};
pub use evaluator::{EvaluationError, ExpressionResult};
pub use model::Value;
pub use nodes::{
    ImageShape, Node, NodeDescriptor, NodeInputs, NodeOutputs, NodeRegistry, NodeValue,
    PopoImageAspectRatioNode, PopoImageDimensionsNode, PopoImageSizeNode, PopoMathExpressionNode,
    standard_node_registry,
};
pub use parser::{ParseError, parse};
pub use registry::{FunctionRegistry, standard_registry};
pub use screening::{DenyList, ScreeningError, standard_deny_list};
