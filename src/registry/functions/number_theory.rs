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

//! Integer and float helpers: factorial, gcd, lcm, fmod, copysign

use crate::model::arithmetic::MAX_INTEGER_BITS;
use crate::model::{TypeInfo, Value};
use crate::registry::function::{
    EvaluationContext, FunctionError, FunctionRegistry, FunctionResult, MathFunction,
};
use crate::registry::functions::real::{OnInfinite, check_result};
use crate::registry::functions::{integral_at, real_at};
use crate::registry::signature::{FunctionSignature, ParameterInfo};
use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};
use std::sync::LazyLock;

/// Register the number theory helpers
pub fn register(registry: &mut FunctionRegistry) {
    registry.register(FactorialFunction);
    registry.register(GcdFunction);
    registry.register(LcmFunction);
    registry.register(FmodFunction);
    registry.register(CopysignFunction);
}

/// factorial(n) - n!
pub struct FactorialFunction;

impl MathFunction for FactorialFunction {
    fn name(&self) -> &str {
        "factorial"
    }
    fn human_friendly_name(&self) -> &str {
        "Factorial"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: LazyLock<FunctionSignature> = LazyLock::new(|| {
            FunctionSignature::new(
                "factorial",
                vec![ParameterInfo::required("n", TypeInfo::Real)],
                TypeInfo::Integer,
            )
        });
        &SIG
    }

    fn documentation(&self) -> &str {
        "n! for a non-negative integral n, computed exactly."
    }

    fn evaluate(&self, args: &[Value], context: &EvaluationContext) -> FunctionResult<Value> {
        let Some(n) = args[0].to_integral_bigint() else {
            return Err(FunctionError::domain(
                self.name(),
                "factorial() only accepts integral values",
            ));
        };
        if n.is_negative() {
            return Err(FunctionError::domain(
                self.name(),
                "factorial() not defined for negative values",
            ));
        }
        let n = n
            .to_u64()
            .filter(|n| *n <= context.max_factorial_argument)
            .ok_or_else(|| FunctionError::overflow(self.name()))?;
        let product = (2..=n).fold(BigInt::from(1u8), |acc, k| acc * k);
        Ok(Value::from_bigint(product))
    }
}

fn gcd(a: BigInt, b: BigInt) -> BigInt {
    let (mut a, mut b) = (a.abs(), b.abs());
    while !b.is_zero() {
        let r = &a % &b;
        a = std::mem::replace(&mut b, r);
    }
    a
}

fn integral_variadic(name: &str) -> FunctionSignature {
    FunctionSignature::variadic(
        name,
        vec![ParameterInfo::optional("n", TypeInfo::Integral)],
        TypeInfo::Integer,
    )
}

/// gcd(*integers) - greatest common divisor
pub struct GcdFunction;

impl MathFunction for GcdFunction {
    fn name(&self) -> &str {
        "gcd"
    }
    fn human_friendly_name(&self) -> &str {
        "Greatest Common Divisor"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: LazyLock<FunctionSignature> = LazyLock::new(|| integral_variadic("gcd"));
        &SIG
    }

    fn documentation(&self) -> &str {
        "Greatest common divisor of the integer arguments; gcd() is 0."
    }

    fn evaluate(&self, args: &[Value], _context: &EvaluationContext) -> FunctionResult<Value> {
        let result = (0..args.len())
            .map(|i| integral_at(args, i))
            .fold(BigInt::zero(), gcd);
        Ok(Value::from_bigint(result))
    }
}

/// lcm(*integers) - least common multiple
pub struct LcmFunction;

impl MathFunction for LcmFunction {
    fn name(&self) -> &str {
        "lcm"
    }
    fn human_friendly_name(&self) -> &str {
        "Least Common Multiple"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: LazyLock<FunctionSignature> = LazyLock::new(|| integral_variadic("lcm"));
        &SIG
    }

    fn documentation(&self) -> &str {
        "Least common multiple of the integer arguments; lcm() is 1."
    }

    fn evaluate(&self, args: &[Value], _context: &EvaluationContext) -> FunctionResult<Value> {
        let mut result = BigInt::from(1u8);
        for i in 0..args.len() {
            let n = integral_at(args, i);
            if n.is_zero() || result.is_zero() {
                result = BigInt::zero();
                continue;
            }
            if result.bits() + n.bits() > MAX_INTEGER_BITS {
                return Err(FunctionError::overflow(self.name()));
            }
            let divisor = gcd(result.clone(), n.clone());
            result = result / divisor * n.abs();
        }
        Ok(Value::from_bigint(result))
    }
}

/// fmod(x, y) - remainder with the sign of x
pub struct FmodFunction;

impl MathFunction for FmodFunction {
    fn name(&self) -> &str {
        "fmod"
    }
    fn human_friendly_name(&self) -> &str {
        "Float Remainder"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: LazyLock<FunctionSignature> = LazyLock::new(|| {
            FunctionSignature::new(
                "fmod",
                vec![
                    ParameterInfo::required("x", TypeInfo::Real),
                    ParameterInfo::required("y", TypeInfo::Real),
                ],
                TypeInfo::Float,
            )
        });
        &SIG
    }

    fn documentation(&self) -> &str {
        "Remainder of x / y carrying the sign of x, unlike the % operator."
    }

    fn evaluate(&self, args: &[Value], _context: &EvaluationContext) -> FunctionResult<Value> {
        let (x, y) = (real_at(args, 0), real_at(args, 1));
        check_result(self.name(), &[x, y], x % y, OnInfinite::Domain).map(Value::Float)
    }
}

/// copysign(x, y) - magnitude of x with the sign of y
pub struct CopysignFunction;

impl MathFunction for CopysignFunction {
    fn name(&self) -> &str {
        "copysign"
    }
    fn human_friendly_name(&self) -> &str {
        "Copy Sign"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: LazyLock<FunctionSignature> = LazyLock::new(|| {
            FunctionSignature::new(
                "copysign",
                vec![
                    ParameterInfo::required("x", TypeInfo::Real),
                    ParameterInfo::required("y", TypeInfo::Real),
                ],
                TypeInfo::Float,
            )
        });
        &SIG
    }

    fn documentation(&self) -> &str {
        "Float with the magnitude of x and the sign of y."
    }

    fn evaluate(&self, args: &[Value], _context: &EvaluationContext) -> FunctionResult<Value> {
        Ok(Value::Float(real_at(args, 0).copysign(real_at(args, 1))))
    }
}
