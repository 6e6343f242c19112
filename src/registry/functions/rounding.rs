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

//! ceil, floor and trunc

use crate::model::{TypeInfo, Value};
use crate::registry::function::{EvaluationContext, FunctionRegistry, FunctionResult, MathFunction};
use crate::registry::functions::basic::float_to_integer;
use crate::registry::functions::real_at;
use crate::registry::signature::{FunctionSignature, ParameterInfo};
use std::sync::LazyLock;

/// Register the rounding functions
pub fn register(registry: &mut FunctionRegistry) {
    registry.register(CeilFunction);
    registry.register(FloorFunction);
    registry.register(TruncFunction);
}

fn integral_signature(name: &str) -> FunctionSignature {
    FunctionSignature::new(
        name,
        vec![ParameterInfo::required("x", TypeInfo::Real)],
        TypeInfo::Integer,
    )
}

fn to_integral(name: &str, args: &[Value], op: fn(f64) -> f64) -> FunctionResult<Value> {
    match args[0].to_bigint() {
        Some(i) => Ok(Value::from_bigint(i)),
        None => float_to_integer(name, op(real_at(args, 0))),
    }
}

/// ceil(x) - smallest integer >= x
pub struct CeilFunction;

impl MathFunction for CeilFunction {
    fn name(&self) -> &str {
        "ceil"
    }
    fn human_friendly_name(&self) -> &str {
        "Ceiling"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: LazyLock<FunctionSignature> = LazyLock::new(|| integral_signature("ceil"));
        &SIG
    }

    fn documentation(&self) -> &str {
        "Smallest integer greater than or equal to x."
    }

    fn evaluate(&self, args: &[Value], _context: &EvaluationContext) -> FunctionResult<Value> {
        to_integral(self.name(), args, f64::ceil)
    }
}

/// floor(x) - largest integer <= x
pub struct FloorFunction;

impl MathFunction for FloorFunction {
    fn name(&self) -> &str {
        "floor"
    }
    fn human_friendly_name(&self) -> &str {
        "Floor"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: LazyLock<FunctionSignature> = LazyLock::new(|| integral_signature("floor"));
        &SIG
    }

    fn documentation(&self) -> &str {
        "Largest integer less than or equal to x."
    }

    fn evaluate(&self, args: &[Value], _context: &EvaluationContext) -> FunctionResult<Value> {
        to_integral(self.name(), args, f64::floor)
    }
}

/// trunc(x) - integer part of x
pub struct TruncFunction;

impl MathFunction for TruncFunction {
    fn name(&self) -> &str {
        "trunc"
    }
    fn human_friendly_name(&self) -> &str {
        "Truncate"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: LazyLock<FunctionSignature> = LazyLock::new(|| integral_signature("trunc"));
        &SIG
    }

    fn documentation(&self) -> &str {
        "x with its fractional part removed, rounding toward zero."
    }

    fn evaluate(&self, args: &[Value], _context: &EvaluationContext) -> FunctionResult<Value> {
        to_integral(self.name(), args, f64::trunc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::function::FunctionError;

    fn call(function: &dyn MathFunction, x: f64) -> FunctionResult<Value> {
        function.call(&[Value::Float(x)], &EvaluationContext::default())
    }

    #[test]
    fn test_rounding_directions() {
        assert_eq!(call(&CeilFunction, 3.2), Ok(Value::Integer(4)));
        assert_eq!(call(&FloorFunction, 3.8), Ok(Value::Integer(3)));
        assert_eq!(call(&FloorFunction, -3.2), Ok(Value::Integer(-4)));
        assert_eq!(call(&TruncFunction, -3.8), Ok(Value::Integer(-3)));
        assert_eq!(
            call(&CeilFunction, 1e20),
            Ok(Value::from_bigint("100000000000000000000".parse().unwrap()))
        );
    }

    #[test]
    fn test_non_finite_arguments() {
        assert!(matches!(
            call(&FloorFunction, f64::INFINITY),
            Err(FunctionError::Overflow { .. })
        ));
        assert!(matches!(
            call(&CeilFunction, f64::NAN),
            Err(FunctionError::Domain { .. })
        ));
    }
}
