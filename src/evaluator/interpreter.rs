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

//! Tree-walking interpreter over the restricted expression AST

use super::error::{EvaluationError, EvaluationResult};
use super::namespace::{Binding, Namespace};
use crate::ast::{
    BinaryOperator, ComparisonOperator, ExpressionNode, LiteralValue, LogicalOperator,
    UnaryOperator, Visitor, walk_expression,
};
use crate::model::{Complex, Value, arithmetic};
use crate::registry::EvaluationContext;
use smallvec::SmallVec;

/// Default limit on the depth of the evaluated tree
pub const DEFAULT_MAX_EVALUATION_DEPTH: usize = 1000;

/// Evaluates an expression tree against a [`Namespace`]
///
/// `and` / `or` return one of their operands and skip the right side when
/// the left decides the result; comparison chains stop at the first false
/// link; only the taken branch of a conditional is evaluated.
pub struct Interpreter<'ns> {
    namespace: Namespace<'ns>,
    context: EvaluationContext,
    depth: usize,
    max_depth: usize,
}

impl<'ns> Interpreter<'ns> {
    /// Interpreter with default limits
    pub fn new(namespace: Namespace<'ns>) -> Self {
        Self::with_limits(
            namespace,
            EvaluationContext::default(),
            DEFAULT_MAX_EVALUATION_DEPTH,
        )
    }

    /// Interpreter with explicit function context and depth limit
    pub fn with_limits(
        namespace: Namespace<'ns>,
        context: EvaluationContext,
        max_depth: usize,
    ) -> Self {
        Self {
            namespace,
            context,
            depth: 0,
            max_depth,
        }
    }

    /// Evaluate `expr` to a value
    pub fn evaluate(&mut self, expr: &ExpressionNode) -> EvaluationResult<Value> {
        self.visit_expression(expr)
    }
}

impl Visitor for Interpreter<'_> {
    type Result = EvaluationResult<Value>;

    fn visit_expression(&mut self, expr: &ExpressionNode) -> Self::Result {
        if self.depth >= self.max_depth {
            return Err(EvaluationError::DepthExceeded {
                max_depth: self.max_depth,
            });
        }
        self.depth += 1;
        let result = walk_expression(self, expr);
        self.depth -= 1;
        result
    }

    fn visit_literal(&mut self, literal: &LiteralValue) -> Self::Result {
        Ok(match literal {
            LiteralValue::Integer(i) => Value::Integer(*i),
            LiteralValue::BigInteger(i) => Value::from_bigint(i.clone()),
            LiteralValue::Float(x) => Value::Float(*x),
            LiteralValue::Imaginary(x) => Value::Complex(Complex::new(0.0, *x)),
            LiteralValue::Boolean(b) => Value::Boolean(*b),
        })
    }

    fn visit_identifier(&mut self, name: &str) -> Self::Result {
        match self.namespace.lookup(name) {
            Some(Binding::Value(value)) => Ok(value),
            Some(Binding::Function(_)) => Err(EvaluationError::FunctionAsValue {
                name: name.to_string(),
            }),
            None => Err(EvaluationError::UndefinedName {
                name: name.to_string(),
            }),
        }
    }

    fn visit_unary_op(&mut self, op: UnaryOperator, operand: &ExpressionNode) -> Self::Result {
        let value = self.visit_expression(operand)?;
        Ok(arithmetic::unary(op, &value)?)
    }

    fn visit_binary_op(
        &mut self,
        op: BinaryOperator,
        left: &ExpressionNode,
        right: &ExpressionNode,
    ) -> Self::Result {
        // The left spine folds in a loop: `1 + 1 + ... + 1` is one level deep
        let mut pending: SmallVec<[(BinaryOperator, &ExpressionNode); 4]> = SmallVec::new();
        pending.push((op, right));
        let mut innermost = left;
        while let ExpressionNode::BinaryOp(data) = innermost {
            pending.push((data.op, &data.right));
            innermost = &data.left;
        }
        let mut accumulated = self.visit_expression(innermost)?;
        for (op, operand) in pending.into_iter().rev() {
            let value = self.visit_expression(operand)?;
            accumulated = arithmetic::binary(op, &accumulated, &value)?;
        }
        Ok(accumulated)
    }

    fn visit_comparison(
        &mut self,
        first: &ExpressionNode,
        rest: &[(ComparisonOperator, ExpressionNode)],
    ) -> Self::Result {
        let mut left = self.visit_expression(first)?;
        for (op, operand) in rest {
            let right = self.visit_expression(operand)?;
            if !arithmetic::compare(*op, &left, &right)? {
                return Ok(Value::Boolean(false));
            }
            left = right;
        }
        Ok(Value::Boolean(true))
    }

    fn visit_logical(
        &mut self,
        op: LogicalOperator,
        left: &ExpressionNode,
        right: &ExpressionNode,
    ) -> Self::Result {
        let left = self.visit_expression(left)?;
        let decided = match op {
            LogicalOperator::And => !left.is_truthy(),
            LogicalOperator::Or => left.is_truthy(),
        };
        if decided {
            Ok(left)
        } else {
            self.visit_expression(right)
        }
    }

    fn visit_function_call(&mut self, name: &str, args: &[ExpressionNode]) -> Self::Result {
        let function = match self.namespace.lookup(name) {
            Some(Binding::Function(function)) => function,
            Some(Binding::Value(value)) => {
                return Err(EvaluationError::NotCallable {
                    name: name.to_string(),
                    type_name: value.type_name(),
                });
            }
            None => {
                return Err(EvaluationError::UndefinedName {
                    name: name.to_string(),
                });
            }
        };
        let values = args
            .iter()
            .map(|arg| self.visit_expression(arg))
            .collect::<EvaluationResult<SmallVec<[Value; 4]>>>()?;
        Ok(function.call(&values, &self.context)?)
    }

    fn visit_conditional(
        &mut self,
        condition: &ExpressionNode,
        then_expr: &ExpressionNode,
        else_expr: &ExpressionNode,
    ) -> Self::Result {
        if self.visit_expression(condition)?.is_truthy() {
            self.visit_expression(then_expr)
        } else {
            self.visit_expression(else_expr)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn eval(a: f64, b: f64, c: f64, source: &str) -> EvaluationResult<Value> {
        let expr = parse(source).unwrap();
        Interpreter::new(Namespace::new(a, b, c)).evaluate(&expr)
    }

    #[test]
    fn test_operands_are_floats() {
        assert_eq!(eval(10.0, 5.0, 3.0, "a + b + c"), Ok(Value::Float(18.0)));
        assert_eq!(eval(0.0, 0.0, 0.0, "2 + 3"), Ok(Value::Integer(5)));
    }

    #[test]
    fn test_logical_returns_operand() {
        assert_eq!(eval(0.0, 7.0, 0.0, "a or b"), Ok(Value::Float(7.0)));
        assert_eq!(eval(0.0, 7.0, 0.0, "a and b"), Ok(Value::Float(0.0)));
        assert_eq!(eval(0.0, 0.0, 0.0, "not a"), Ok(Value::Boolean(true)));
    }

    #[test]
    fn test_short_circuit_skips_errors() {
        assert_eq!(eval(0.0, 0.0, 0.0, "a and 1/a"), Ok(Value::Float(0.0)));
        assert_eq!(eval(1.0, 0.0, 0.0, "a or 1/b"), Ok(Value::Float(1.0)));
        assert_eq!(eval(-1.0, 0.0, 0.0, "sqrt(a) if a >= 0 else 0"), Ok(Value::Integer(0)));
        assert_eq!(eval(3.0, 2.0, 1.0, "c < b < a"), Ok(Value::Boolean(true)));
        assert_eq!(eval(3.0, 2.0, 1.0, "a < b < 1/0"), Ok(Value::Boolean(false)));
    }

    #[test]
    fn test_name_errors() {
        assert!(matches!(
            eval(1.0, 2.0, 3.0, "invalid_function(a)"),
            Err(EvaluationError::UndefinedName { name }) if name == "invalid_function"
        ));
        assert!(matches!(
            eval(1.0, 2.0, 3.0, "a(2)"),
            Err(EvaluationError::NotCallable { .. })
        ));
        assert!(matches!(
            eval(1.0, 2.0, 3.0, "sqrt + 1"),
            Err(EvaluationError::FunctionAsValue { .. })
        ));
    }

    #[test]
    fn test_runtime_errors() {
        assert!(eval(10.0, 0.0, 0.0, "a / b").unwrap_err().is_division_by_zero());
        assert!(eval(-1.0, 0.0, 0.0, "sqrt(a)").unwrap_err().is_domain_error());
        assert!(matches!(
            eval(0.0, 0.0, 0.0, "sqrt()"),
            Err(EvaluationError::Function(_))
        ));
    }

    #[test]
    fn test_depth_limit() {
        let expr = parse("-(-(-(-a)))").unwrap();
        let mut interpreter =
            Interpreter::with_limits(Namespace::new(1.0, 0.0, 0.0), EvaluationContext::default(), 3);
        assert_eq!(
            interpreter.evaluate(&expr),
            Err(EvaluationError::DepthExceeded { max_depth: 3 })
        );
        let mut interpreter = Interpreter::new(Namespace::new(1.0, 0.0, 0.0));
        assert_eq!(interpreter.evaluate(&expr), Ok(Value::Float(1.0)));
    }

    #[test]
    fn test_long_chains_are_shallow() {
        let sum = vec!["1"; 1500].join("+");
        let expr = parse(&sum).unwrap();
        let mut interpreter =
            Interpreter::with_limits(Namespace::new(0.0, 0.0, 0.0), EvaluationContext::default(), 3);
        assert_eq!(interpreter.evaluate(&expr), Ok(Value::Integer(1500)));

        assert_eq!(eval(8.0, 2.0, 0.0, "a - b - 1"), Ok(Value::Float(5.0)));
        assert_eq!(eval(0.0, 0.0, 0.0, "100 // 7 % 4 * 3"), Ok(Value::Integer(6)));
        assert_eq!(eval(0.0, 0.0, 0.0, "2 ** 3 ** 2"), Ok(Value::Integer(512)));
    }

    #[test]
    fn test_big_integer_literals() {
        assert_eq!(
            eval(0.0, 0.0, 0.0, "99999999999999999999 - 99999999999999999998"),
            Ok(Value::Integer(1))
        );
        assert_eq!(eval(0.0, 0.0, 0.0, "0x1_0000_0000_0000_0000 // 2**63"), Ok(Value::Integer(2)));
    }

    #[test]
    fn test_imaginary_literals() {
        assert_eq!(
            eval(0.0, 0.0, 0.0, "2j * 2j"),
            Ok(Value::Complex(Complex::new(-4.0, 0.0)))
        );
    }
}
