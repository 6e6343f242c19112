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

//! Visitor pattern for AST traversal

use super::expression::{ExpressionNode, LiteralValue};
use super::operator::{BinaryOperator, ComparisonOperator, LogicalOperator, UnaryOperator};
use std::collections::BTreeSet;
use std::fmt;

/// Trait for visiting AST nodes
pub trait Visitor: Sized {
    /// The result type of visiting a node
    type Result;

    /// Visit an expression node
    fn visit_expression(&mut self, expr: &ExpressionNode) -> Self::Result {
        walk_expression(self, expr)
    }

    /// Visit a literal
    fn visit_literal(&mut self, literal: &LiteralValue) -> Self::Result;

    /// Visit an identifier
    fn visit_identifier(&mut self, name: &str) -> Self::Result;

    /// Visit a unary operation
    fn visit_unary_op(&mut self, op: UnaryOperator, operand: &ExpressionNode) -> Self::Result;

    /// Visit a binary operation
    fn visit_binary_op(
        &mut self,
        op: BinaryOperator,
        left: &ExpressionNode,
        right: &ExpressionNode,
    ) -> Self::Result;

    /// Visit a comparison chain
    fn visit_comparison(
        &mut self,
        first: &ExpressionNode,
        rest: &[(ComparisonOperator, ExpressionNode)],
    ) -> Self::Result;

    /// Visit a logical operation
    fn visit_logical(
        &mut self,
        op: LogicalOperator,
        left: &ExpressionNode,
        right: &ExpressionNode,
    ) -> Self::Result;

    /// Visit a function call
    fn visit_function_call(&mut self, name: &str, args: &[ExpressionNode]) -> Self::Result;

    /// Visit a conditional expression
    fn visit_conditional(
        &mut self,
        condition: &ExpressionNode,
        then_expr: &ExpressionNode,
        else_expr: &ExpressionNode,
    ) -> Self::Result;
}

/// Default implementation of walking an expression tree
pub fn walk_expression<V: Visitor>(visitor: &mut V, expr: &ExpressionNode) -> V::Result {
    match expr {
        ExpressionNode::Literal(lit) => visitor.visit_literal(lit),
        ExpressionNode::Identifier(name) => visitor.visit_identifier(name),
        ExpressionNode::UnaryOp { op, operand } => visitor.visit_unary_op(*op, operand),
        ExpressionNode::BinaryOp(data) => visitor.visit_binary_op(data.op, &data.left, &data.right),
        ExpressionNode::Comparison(data) => visitor.visit_comparison(&data.first, &data.rest),
        ExpressionNode::Logical(data) => visitor.visit_logical(data.op, &data.left, &data.right),
        ExpressionNode::FunctionCall(data) => visitor.visit_function_call(&data.name, &data.args),
        ExpressionNode::Conditional(data) => {
            visitor.visit_conditional(&data.condition, &data.then_expr, &data.else_expr)
        }
    }
}

/// Collects every identifier an expression references, function names included
#[derive(Debug, Default)]
pub struct NameCollector {
    names: BTreeSet<String>,
}

impl NameCollector {
    /// Walk `expr` and return the sorted set of referenced names
    pub fn collect(expr: &ExpressionNode) -> BTreeSet<String> {
        let mut collector = Self::default();
        collector.visit_expression(expr);
        collector.names
    }
}

impl Visitor for NameCollector {
    type Result = ();

    fn visit_literal(&mut self, _literal: &LiteralValue) {}

    fn visit_identifier(&mut self, name: &str) {
        self.names.insert(name.to_string());
    }

    fn visit_unary_op(&mut self, _op: UnaryOperator, operand: &ExpressionNode) {
        self.visit_expression(operand);
    }

    fn visit_binary_op(&mut self, _op: BinaryOperator, left: &ExpressionNode, right: &ExpressionNode) {
        self.visit_expression(left);
        self.visit_expression(right);
    }

    fn visit_comparison(
        &mut self,
        first: &ExpressionNode,
        rest: &[(ComparisonOperator, ExpressionNode)],
    ) {
        self.visit_expression(first);
        for (_, operand) in rest {
            self.visit_expression(operand);
        }
    }

    fn visit_logical(&mut self, _op: LogicalOperator, left: &ExpressionNode, right: &ExpressionNode) {
        self.visit_expression(left);
        self.visit_expression(right);
    }

    fn visit_function_call(&mut self, name: &str, args: &[ExpressionNode]) {
        self.names.insert(name.to_string());
        for arg in args {
            self.visit_expression(arg);
        }
    }

    fn visit_conditional(
        &mut self,
        condition: &ExpressionNode,
        then_expr: &ExpressionNode,
        else_expr: &ExpressionNode,
    ) {
        self.visit_expression(condition);
        self.visit_expression(then_expr);
        self.visit_expression(else_expr);
    }
}

/// Renders an expression back to source, fully parenthesized
struct Printer<'a, 'f> {
    f: &'a mut fmt::Formatter<'f>,
}

impl Visitor for Printer<'_, '_> {
    type Result = fmt::Result;

    fn visit_literal(&mut self, literal: &LiteralValue) -> fmt::Result {
        match literal {
            LiteralValue::Integer(i) => write!(self.f, "{i}"),
            LiteralValue::BigInteger(i) => write!(self.f, "{i}"),
            LiteralValue::Float(x) => write!(self.f, "{x:?}"),
            LiteralValue::Imaginary(x) => write!(self.f, "{x:?}j"),
            LiteralValue::Boolean(true) => self.f.write_str("True"),
            LiteralValue::Boolean(false) => self.f.write_str("False"),
        }
    }

    fn visit_identifier(&mut self, name: &str) -> fmt::Result {
        self.f.write_str(name)
    }

    fn visit_unary_op(&mut self, op: UnaryOperator, operand: &ExpressionNode) -> fmt::Result {
        write!(self.f, "({op}")?;
        self.visit_expression(operand)?;
        self.f.write_str(")")
    }

    fn visit_binary_op(
        &mut self,
        op: BinaryOperator,
        left: &ExpressionNode,
        right: &ExpressionNode,
    ) -> fmt::Result {
        self.f.write_str("(")?;
        self.visit_expression(left)?;
        write!(self.f, " {op} ")?;
        self.visit_expression(right)?;
        self.f.write_str(")")
    }

    fn visit_comparison(
        &mut self,
        first: &ExpressionNode,
        rest: &[(ComparisonOperator, ExpressionNode)],
    ) -> fmt::Result {
        self.f.write_str("(")?;
        self.visit_expression(first)?;
        for (op, operand) in rest {
            write!(self.f, " {op} ")?;
            self.visit_expression(operand)?;
        }
        self.f.write_str(")")
    }

    fn visit_logical(
        &mut self,
        op: LogicalOperator,
        left: &ExpressionNode,
        right: &ExpressionNode,
    ) -> fmt::Result {
        self.f.write_str("(")?;
        self.visit_expression(left)?;
        write!(self.f, " {op} ")?;
        self.visit_expression(right)?;
        self.f.write_str(")")
    }

    fn visit_function_call(&mut self, name: &str, args: &[ExpressionNode]) -> fmt::Result {
        write!(self.f, "{name}(")?;
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                self.f.write_str(", ")?;
            }
            self.visit_expression(arg)?;
        }
        self.f.write_str(")")
    }

    fn visit_conditional(
        &mut self,
        condition: &ExpressionNode,
        then_expr: &ExpressionNode,
        else_expr: &ExpressionNode,
    ) -> fmt::Result {
        self.f.write_str("(")?;
        self.visit_expression(then_expr)?;
        self.f.write_str(" if ")?;
        self.visit_expression(condition)?;
        self.f.write_str(" else ")?;
        self.visit_expression(else_expr)?;
        self.f.write_str(")")
    }
}

impl fmt::Display for ExpressionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer { f }.visit_expression(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ExpressionNode {
        // sqrt(a * a + b) if a > 0 else c
        ExpressionNode::conditional(
            ExpressionNode::comparison(
                ExpressionNode::identifier("a"),
                vec![(
                    ComparisonOperator::GreaterThan,
                    ExpressionNode::literal(LiteralValue::Integer(0)),
                )],
            ),
            ExpressionNode::function_call(
                "sqrt",
                [ExpressionNode::binary_op(
                    BinaryOperator::Add,
                    ExpressionNode::binary_op(
                        BinaryOperator::Multiply,
                        ExpressionNode::identifier("a"),
                        ExpressionNode::identifier("a"),
                    ),
                    ExpressionNode::identifier("b"),
                )],
            ),
            ExpressionNode::identifier("c"),
        )
    }

    #[test]
    fn test_name_collector() {
        let names: Vec<_> = NameCollector::collect(&sample()).into_iter().collect();
        assert_eq!(names, vec!["a", "b", "c", "sqrt"]);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            sample().to_string(),
            "(sqrt(((a * a) + b)) if (a > 0) else c)"
        );
        let float = ExpressionNode::literal(LiteralValue::Float(2.0));
        assert_eq!(float.to_string(), "2.0");
    }
}
