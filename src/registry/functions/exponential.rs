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

//! Square root, exponential and logarithms

use crate::model::{ArithmeticError, TypeInfo, Value};
use crate::registry::function::{
    EvaluationContext, FunctionError, FunctionRegistry, FunctionResult, MathFunction,
};
use crate::registry::functions::real::{OnInfinite, RealFunction, check_result};
use crate::registry::functions::real_at;
use crate::registry::signature::{FunctionSignature, ParameterInfo};
use std::sync::LazyLock;

/// Register sqrt, exp, log, log10 and log2
pub fn register(registry: &mut FunctionRegistry) {
    registry.register(RealFunction::new(
        "sqrt",
        "Square Root",
        "Square root of x; x must not be negative.",
        f64::sqrt,
        OnInfinite::Domain,
    ));
    registry.register(RealFunction::new(
        "exp",
        "Exponential",
        "e raised to the power x.",
        f64::exp,
        OnInfinite::Overflow,
    ));
    registry.register(LogFunction);
    registry.register(RealFunction::new(
        "log10",
        "Base-10 Logarithm",
        "Base-10 logarithm of x; x must be positive.",
        f64::log10,
        OnInfinite::Domain,
    ));
    registry.register(RealFunction::new(
        "log2",
        "Base-2 Logarithm",
        "Base-2 logarithm of x; x must be positive.",
        f64::log2,
        OnInfinite::Domain,
    ));
}

/// log(x[, base]) - natural logarithm, or logarithm to `base`
pub struct LogFunction;

impl MathFunction for LogFunction {
    fn name(&self) -> &str {
        "log"
    }
    fn human_friendly_name(&self) -> &str {
        "Logarithm"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: LazyLock<FunctionSignature> = LazyLock::new(|| {
            FunctionSignature::new(
                "log",
                vec![
                    ParameterInfo::required("x", TypeInfo::Real),
                    ParameterInfo::optional("base", TypeInfo::Real),
                ],
                TypeInfo::Float,
            )
        });
        &SIG
    }

    fn documentation(&self) -> &str {
        "Natural logarithm of x, or the logarithm of x to the given base. x and base must be positive and base must not be 1."
    }

    fn evaluate(&self, args: &[Value], _context: &EvaluationContext) -> FunctionResult<Value> {
        let ln = |x: f64| check_result(self.name(), &[x], x.ln(), OnInfinite::Domain);
        let numerator = ln(real_at(args, 0))?;
        if args.len() == 1 {
            return Ok(Value::Float(numerator));
        }
        let denominator = ln(real_at(args, 1))?;
        if denominator == 0.0 {
            return Err(FunctionError::arithmetic(
                self.name(),
                ArithmeticError::DivisionByZero { operation: "/" },
            ));
        }
        Ok(Value::Float(numerator / denominator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(args: &[f64]) -> FunctionResult<Value> {
        let args: Vec<Value> = args.iter().copied().map(Value::Float).collect();
        LogFunction.call(&args, &EvaluationContext::default())
    }

    #[test]
    fn test_log() {
        assert_eq!(log(&[1.0]), Ok(Value::Float(0.0)));
        assert_eq!(log(&[8.0, 2.0]), Ok(Value::Float(3.0)));
        assert!(matches!(log(&[0.0]), Err(FunctionError::Domain { .. })));
        assert!(matches!(log(&[-1.0]), Err(FunctionError::Domain { .. })));
        assert!(matches!(
            log(&[5.0, 1.0]),
            Err(FunctionError::Arithmetic { .. })
        ));
        assert!(matches!(log(&[5.0, 0.0]), Err(FunctionError::Domain { .. })));
    }

    #[test]
    fn test_registered_kernels() {
        let mut registry = FunctionRegistry::new();
        register(&mut registry);
        let context = EvaluationContext::default();
        let eval = |name: &str, x: f64| {
            registry
                .get(name)
                .map(|f| f.call(&[Value::Float(x)], &context))
        };
        assert_eq!(eval("sqrt", 16.0), Some(Ok(Value::Float(4.0))));
        assert_eq!(eval("log10", 1000.0), Some(Ok(Value::Float(3.0))));
        assert_eq!(eval("log2", 1024.0), Some(Ok(Value::Float(10.0))));
        assert!(matches!(
            eval("exp", 710.0),
            Some(Err(FunctionError::Overflow { .. }))
        ));
        assert!(matches!(
            eval("sqrt", -4.0),
            Some(Err(FunctionError::Domain { .. }))
        ));
    }
}
