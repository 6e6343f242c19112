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

//! Popo Math Expression node

use super::descriptor::{InputField, NodeDescriptor, OutputKind};
use super::error::NodeResult;
use super::value::{NodeInputs, NodeOutputs, NodeValue};
use super::Node;
use crate::engine::{MathExpressionEngine, default_engine};
use std::sync::{Arc, LazyLock};

/// Expression shown when the node is first placed
pub const DEFAULT_EXPRESSION: &str = "a + b + c";

/// Bound of the operand inputs
pub const OPERAND_LIMIT: f64 = 1_000_000.0;

/// Evaluates an expression over the operands `a`, `b` and `c`
#[derive(Debug, Default, Clone)]
pub struct PopoMathExpressionNode {
    engine: Option<Arc<MathExpressionEngine>>,
}

impl PopoMathExpressionNode {
    /// Node backed by the shared default engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Node backed by its own engine
    pub fn with_engine(engine: Arc<MathExpressionEngine>) -> Self {
        Self {
            engine: Some(engine),
        }
    }

    fn engine(&self) -> &MathExpressionEngine {
        match &self.engine {
            Some(engine) => engine.as_ref(),
            None => default_engine(),
        }
    }

    /// `(result_int, result_float)`; `(0, 0.0)` when evaluation fails
    pub fn calculate_expression(&self, a: f64, b: f64, c: f64, expression: &str) -> (i64, f64) {
        self.engine().evaluate(a, b, c, expression).into_pair()
    }
}

impl Node for PopoMathExpressionNode {
    fn descriptor(&self) -> &NodeDescriptor {
        static DESCRIPTOR: LazyLock<NodeDescriptor> = LazyLock::new(|| {
            let operand = |name: &str| InputField::float(name, 0.0, -OPERAND_LIMIT, OPERAND_LIMIT, 0.01);
            NodeDescriptor::new(
                "PopoMathExpressionNode",
                "Popo Math Expression",
                "calculate_expression",
                "Evaluate a math expression over a, b and c",
            )
            .input(operand("a"))
            .input(operand("b"))
            .input(operand("c"))
            .input(InputField::string("expression", DEFAULT_EXPRESSION))
            .output("result_int", OutputKind::Int)
            .output("result_float", OutputKind::Float)
        });
        &DESCRIPTOR
    }

    fn invoke(&self, inputs: &NodeInputs) -> NodeResult<NodeOutputs> {
        let node = self.class_name();
        let (int, float) = self.calculate_expression(
            inputs.float(node, "a")?,
            inputs.float(node, "b")?,
            inputs.float(node, "c")?,
            inputs.string(node, "expression")?,
        );
        Ok(NodeOutputs::new(vec![NodeValue::Int(int), NodeValue::Float(float)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EvaluatorConfig;
    use crate::nodes::NodeError;

    #[test]
    fn test_calculate_expression() {
        let node = PopoMathExpressionNode::new();
        assert_eq!(node.calculate_expression(10.0, 5.0, 3.0, "a + b + c"), (18, 18.0));
        assert_eq!(node.calculate_expression(20.0, 4.0, 2.0, "a / b / c"), (2, 2.5));
        assert_eq!(node.calculate_expression(1.0, 0.0, 0.0, "a / b"), (0, 0.0));
        assert!(std::ptr::eq(node.engine(), default_engine()));
    }

    #[test]
    fn test_own_engine() {
        let engine = Arc::new(MathExpressionEngine::with_config(
            EvaluatorConfig::default().with_max_expression_length(8),
        ));
        let node = PopoMathExpressionNode::with_engine(engine);
        assert_eq!(node.calculate_expression(1.0, 2.0, 3.0, "a + b + c"), (0, 0.0));
        assert_eq!(node.calculate_expression(1.0, 2.0, 3.0, "a+b+c"), (6, 6.0));
        assert!(!std::ptr::eq(node.engine(), default_engine()));
    }

    #[test]
    fn test_invoke() {
        let node = PopoMathExpressionNode::new();
        let inputs = NodeInputs::new()
            .with("a", 3.0)
            .with("b", 4i64)
            .with("c", 0.0)
            .with("expression", "sqrt(a*a + b*b)");
        assert_eq!(
            node.invoke(&inputs),
            Ok(NodeOutputs::new(vec![NodeValue::Int(5), NodeValue::Float(5.0)]))
        );

        let missing = NodeInputs::new().with("a", 1.0);
        assert!(matches!(
            node.invoke(&missing),
            Err(NodeError::MissingInput { input, .. }) if input == "b"
        ));
    }

    #[test]
    fn test_descriptor() {
        let descriptor = PopoMathExpressionNode::new().descriptor().clone();
        assert_eq!(descriptor.return_names(), vec!["result_int", "result_float"]);
        assert_eq!(descriptor.inputs.len(), 4);
        assert!(descriptor.find_input("expression").is_some());
    }
}
