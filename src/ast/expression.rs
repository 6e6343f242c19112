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

//! Expression AST node definitions

use super::operator::{BinaryOperator, ComparisonOperator, LogicalOperator, UnaryOperator};
use num_bigint::BigInt;
use smallvec::SmallVec;

/// Argument list of a function call; most whitelisted functions take one or two
pub type Arguments = SmallVec<[ExpressionNode; 2]>;

/// AST of a restricted math expression
///
/// The node set is closed: literals, identifiers, whitelisted calls and
/// arithmetic/comparison/boolean/conditional operators. Anything else is
/// rejected by the parser before evaluation starts.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionNode {
    /// Numeric or boolean literal
    Literal(LiteralValue),

    /// Name resolved against the evaluation namespace
    Identifier(String),

    /// Prefix operation
    UnaryOp {
        /// The operator
        op: UnaryOperator,
        /// The operand
        operand: Box<ExpressionNode>,
    },

    /// Arithmetic operation (boxed for size optimization)
    BinaryOp(Box<BinaryOpData>),

    /// Comparison chain such as `a < b <= c`
    Comparison(Box<ComparisonData>),

    /// Short-circuiting `and` / `or`
    Logical(Box<LogicalData>),

    /// Call of a whitelisted function by name
    FunctionCall(Box<FunctionCallData>),

    /// `then_expr if condition else else_expr`
    Conditional(Box<ConditionalData>),
}

/// Literal values
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// Integer literal (42, 0x2a)
    Integer(i64),
    /// Integer literal outside the i64 range
    BigInteger(BigInt),
    /// Float literal (3.14, 1e-3)
    Float(f64),
    /// Imaginary literal (2j)
    Imaginary(f64),
    /// True / False
    Boolean(bool),
}

/// Binary operation data
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOpData {
    /// The operator
    pub op: BinaryOperator,
    /// Left operand
    pub left: ExpressionNode,
    /// Right operand
    pub right: ExpressionNode,
}

/// Comparison chain data: `first op0 rest[0].1 op1 rest[1].1 ...`
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonData {
    /// Leftmost operand
    pub first: ExpressionNode,
    /// Following (operator, operand) pairs, never empty
    pub rest: Vec<(ComparisonOperator, ExpressionNode)>,
}

/// Logical operation data
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalData {
    /// The operator
    pub op: LogicalOperator,
    /// Left operand, always evaluated
    pub left: ExpressionNode,
    /// Right operand, evaluated only when the left one does not decide
    pub right: ExpressionNode,
}

/// Function call data
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCallData {
    /// Function name
    pub name: String,
    /// Positional arguments
    pub args: Arguments,
}

/// Conditional expression data
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalData {
    /// Condition
    pub condition: ExpressionNode,
    /// Value when the condition is truthy
    pub then_expr: ExpressionNode,
    /// Value otherwise
    pub else_expr: ExpressionNode,
}

impl ExpressionNode {
    /// Create a literal node
    pub fn literal(value: LiteralValue) -> Self {
        Self::Literal(value)
    }

    /// Create an identifier node
    pub fn identifier(name: impl Into<String>) -> Self {
        Self::Identifier(name.into())
    }

    /// Create a unary operation node
    pub fn unary_op(op: UnaryOperator, operand: ExpressionNode) -> Self {
        Self::UnaryOp {
            op,
            operand: Box::new(operand),
        }
    }

    /// Create a binary operation node
    pub fn binary_op(op: BinaryOperator, left: ExpressionNode, right: ExpressionNode) -> Self {
        Self::BinaryOp(Box::new(BinaryOpData { op, left, right }))
    }

    /// Create a comparison chain node
    pub fn comparison(
        first: ExpressionNode,
        rest: Vec<(ComparisonOperator, ExpressionNode)>,
    ) -> Self {
        Self::Comparison(Box::new(ComparisonData { first, rest }))
    }

    /// Create a logical operation node
    pub fn logical(op: LogicalOperator, left: ExpressionNode, right: ExpressionNode) -> Self {
        Self::Logical(Box::new(LogicalData { op, left, right }))
    }

    /// Create a function call node
    pub fn function_call(name: impl Into<String>, args: impl IntoIterator<Item = Self>) -> Self {
        Self::FunctionCall(Box::new(FunctionCallData {
            name: name.into(),
            args: args.into_iter().collect(),
        }))
    }

    /// Create a conditional node
    pub fn conditional(
        condition: ExpressionNode,
        then_expr: ExpressionNode,
        else_expr: ExpressionNode,
    ) -> Self {
        Self::Conditional(Box::new(ConditionalData {
            condition,
            then_expr,
            else_expr,
        }))
    }

    /// Depth of the tree (a leaf has depth 1)
    pub fn depth(&self) -> usize {
        1 + match self {
            ExpressionNode::Literal(_) | ExpressionNode::Identifier(_) => 0,
            ExpressionNode::UnaryOp { operand, .. } => operand.depth(),
            ExpressionNode::BinaryOp(data) => data.left.depth().max(data.right.depth()),
            ExpressionNode::Comparison(data) => data
                .rest
                .iter()
                .map(|(_, operand)| operand.depth())
                .fold(data.first.depth(), usize::max),
            ExpressionNode::Logical(data) => data.left.depth().max(data.right.depth()),
            ExpressionNode::FunctionCall(data) => {
                data.args.iter().map(Self::depth).max().unwrap_or(0)
            }
            ExpressionNode::Conditional(data) => data
                .condition
                .depth()
                .max(data.then_expr.depth())
                .max(data.else_expr.depth()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth() {
        let leaf = ExpressionNode::identifier("a");
        assert_eq!(leaf.depth(), 1);

        let sum = ExpressionNode::binary_op(
            BinaryOperator::Add,
            ExpressionNode::identifier("a"),
            ExpressionNode::function_call("sqrt", [ExpressionNode::identifier("b")]),
        );
        assert_eq!(sum.depth(), 3);
    }
}
