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

//! Builtin-style functions: abs, round, int, float, min, max, pow

use crate::ast::ComparisonOperator;
use crate::model::{TypeInfo, Value, arithmetic};
use crate::registry::function::{
    EvaluationContext, FunctionError, FunctionRegistry, FunctionResult, MathFunction,
};
use crate::registry::functions::{integral_at, real_at};
use crate::registry::signature::{FunctionSignature, ParameterInfo};
use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::sync::LazyLock;

/// Register the builtin-style functions
pub fn register(registry: &mut FunctionRegistry) {
    registry.register(AbsFunction);
    registry.register(RoundFunction);
    registry.register(IntFunction);
    registry.register(FloatFunction);
    registry.register(MinFunction);
    registry.register(MaxFunction);
    registry.register(PowFunction);
}

/// Convert an integral float to an integer value
///
/// NaN and infinities have no integer counterpart.
pub(crate) fn float_to_integer(name: &str, x: f64) -> FunctionResult<Value> {
    if x.is_nan() {
        return Err(FunctionError::domain(
            name,
            "cannot convert float NaN to integer",
        ));
    }
    if x.is_infinite() {
        return Err(FunctionError::overflow(name));
    }
    Ok(Value::integer_or_float(x))
}

/// Round `x` to `digits` decimal places, ties to even
///
/// Non-negative `digits` round the exact decimal expansion of `x`; negative
/// `digits` round to tens, hundreds and so on.
pub fn round_to_digits(x: f64, digits: i32) -> f64 {
    if !x.is_finite() || x == 0.0 {
        return x;
    }
    if digits >= 0 {
        if digits > 323 {
            return x;
        }
        return format!("{:.*}", digits as usize, x)
            .parse::<f64>()
            .unwrap_or(x);
    }
    let scale = 10f64.powi(-digits);
    if !scale.is_finite() {
        return 0f64.copysign(x);
    }
    let rounded = (x / scale).round_ties_even() * scale;
    if rounded.is_finite() { rounded } else { x }
}

fn round_integer(x: BigInt, digits: i32) -> Value {
    if digits >= 0 {
        return Value::from_bigint(x);
    }
    // 10^k > 2|x| once k reaches the bit length of x
    if u64::from(digits.unsigned_abs()) > x.bits() {
        return Value::Integer(0);
    }
    let scale = BigInt::from(10u8).pow(digits.unsigned_abs());
    let Some((quotient, remainder)) = arithmetic::big_divmod(&x, &scale) else {
        return Value::Integer(0);
    };
    let down = x - &remainder;
    let rounded = match (remainder * 2u8).cmp(&scale) {
        Ordering::Less => down,
        Ordering::Greater => down + scale,
        Ordering::Equal if (quotient % 2u8).is_zero() => down,
        Ordering::Equal => down + scale,
    };
    Value::from_bigint(rounded)
}

/// abs(x) - absolute value
pub struct AbsFunction;

impl MathFunction for AbsFunction {
    fn name(&self) -> &str {
        "abs"
    }
    fn human_friendly_name(&self) -> &str {
        "Absolute Value"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: LazyLock<FunctionSignature> = LazyLock::new(|| {
            FunctionSignature::new(
                "abs",
                vec![ParameterInfo::required("x", TypeInfo::Any)],
                TypeInfo::Real,
            )
        });
        &SIG
    }

    fn documentation(&self) -> &str {
        "Absolute value of x; the magnitude for complex x. Integers stay integers."
    }

    fn evaluate(&self, args: &[Value], _context: &EvaluationContext) -> FunctionResult<Value> {
        Ok(match &args[0] {
            Value::Boolean(b) => Value::Integer(i64::from(*b)),
            Value::Integer(i) => match i.checked_abs() {
                Some(magnitude) => Value::Integer(magnitude),
                None => Value::from_bigint(BigInt::from(*i).abs()),
            },
            Value::BigInteger(i) => Value::from_bigint(i.abs()),
            Value::Float(x) => Value::Float(x.abs()),
            Value::Complex(c) => {
                let magnitude = c.abs();
                if magnitude.is_infinite() && c.is_finite() {
                    return Err(FunctionError::overflow(self.name()));
                }
                Value::Float(magnitude)
            }
        })
    }
}

/// round(x[, ndigits]) - round half to even
pub struct RoundFunction;

impl MathFunction for RoundFunction {
    fn name(&self) -> &str {
        "round"
    }
    fn human_friendly_name(&self) -> &str {
        "Round"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: LazyLock<FunctionSignature> = LazyLock::new(|| {
            FunctionSignature::new(
                "round",
                vec![
                    ParameterInfo::required("x", TypeInfo::Real),
                    ParameterInfo::optional("ndigits", TypeInfo::Integer),
                ],
                TypeInfo::Real,
            )
        });
        &SIG
    }

    fn documentation(&self) -> &str {
        "Rounds x to the nearest integer, or to ndigits decimal places when given. Halfway cases round to the even choice."
    }

    fn evaluate(&self, args: &[Value], _context: &EvaluationContext) -> FunctionResult<Value> {
        let digits = args.get(1).and_then(Value::to_bigint).map(|n| {
            n.to_i32()
                .unwrap_or(if n.is_negative() { i32::MIN } else { i32::MAX })
        });
        match (args[0].to_bigint(), digits) {
            (Some(i), None) => Ok(Value::from_bigint(i)),
            (Some(i), Some(digits)) => Ok(round_integer(i, digits)),
            (None, None) => float_to_integer(self.name(), real_at(args, 0).round_ties_even()),
            (None, Some(digits)) => Ok(Value::Float(round_to_digits(real_at(args, 0), digits))),
        }
    }
}

/// int([x]) - truncate to an integer
pub struct IntFunction;

impl MathFunction for IntFunction {
    fn name(&self) -> &str {
        "int"
    }
    fn human_friendly_name(&self) -> &str {
        "Integer"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: LazyLock<FunctionSignature> = LazyLock::new(|| {
            FunctionSignature::new(
                "int",
                vec![ParameterInfo::optional("x", TypeInfo::Real)],
                TypeInfo::Integer,
            )
        });
        &SIG
    }

    fn documentation(&self) -> &str {
        "Converts x to an integer, truncating toward zero. int() is 0."
    }

    fn evaluate(&self, args: &[Value], _context: &EvaluationContext) -> FunctionResult<Value> {
        match args.first() {
            None => Ok(Value::Integer(0)),
            Some(value) => match value.to_bigint() {
                Some(i) => Ok(Value::from_bigint(i)),
                None => float_to_integer(self.name(), real_at(args, 0).trunc()),
            },
        }
    }
}

/// float([x]) - convert to a float
pub struct FloatFunction;

impl MathFunction for FloatFunction {
    fn name(&self) -> &str {
        "float"
    }
    fn human_friendly_name(&self) -> &str {
        "Float"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: LazyLock<FunctionSignature> = LazyLock::new(|| {
            FunctionSignature::new(
                "float",
                vec![ParameterInfo::optional("x", TypeInfo::Real)],
                TypeInfo::Float,
            )
        });
        &SIG
    }

    fn documentation(&self) -> &str {
        "Converts x to a float. float() is 0.0."
    }

    fn evaluate(&self, args: &[Value], _context: &EvaluationContext) -> FunctionResult<Value> {
        if args.is_empty() {
            return Ok(Value::Float(0.0));
        }
        Ok(Value::Float(real_at(args, 0)))
    }
}

/// Pick the extreme argument: an item replaces the current pick when
/// `item <op> pick` holds, so NaN never displaces an earlier value
fn extreme(name: &str, args: &[Value], op: ComparisonOperator) -> FunctionResult<Value> {
    let mut best = &args[0];
    for item in &args[1..] {
        let replace = arithmetic::compare(op, item, best)
            .map_err(|e| FunctionError::arithmetic(name, e))?;
        if replace {
            best = item;
        }
    }
    Ok(best.clone())
}

fn extreme_signature(name: &str) -> FunctionSignature {
    FunctionSignature::variadic(
        name,
        vec![
            ParameterInfo::required("x", TypeInfo::Any),
            ParameterInfo::required("y", TypeInfo::Any),
        ],
        TypeInfo::Real,
    )
}

/// min(x, y, ...) - smallest argument
pub struct MinFunction;

impl MathFunction for MinFunction {
    fn name(&self) -> &str {
        "min"
    }
    fn human_friendly_name(&self) -> &str {
        "Minimum"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: LazyLock<FunctionSignature> = LazyLock::new(|| extreme_signature("min"));
        &SIG
    }

    fn documentation(&self) -> &str {
        "Smallest of two or more arguments; the first one wins ties."
    }

    fn evaluate(&self, args: &[Value], _context: &EvaluationContext) -> FunctionResult<Value> {
        extreme(self.name(), args, ComparisonOperator::LessThan)
    }
}

/// max(x, y, ...) - largest argument
pub struct MaxFunction;

impl MathFunction for MaxFunction {
    fn name(&self) -> &str {
        "max"
    }
    fn human_friendly_name(&self) -> &str {
        "Maximum"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: LazyLock<FunctionSignature> = LazyLock::new(|| extreme_signature("max"));
        &SIG
    }

    fn documentation(&self) -> &str {
        "Largest of two or more arguments; the first one wins ties."
    }

    fn evaluate(&self, args: &[Value], _context: &EvaluationContext) -> FunctionResult<Value> {
        extreme(self.name(), args, ComparisonOperator::GreaterThan)
    }
}

/// pow(x, y[, mod]) - power, optionally modular
pub struct PowFunction;

impl MathFunction for PowFunction {
    fn name(&self) -> &str {
        "pow"
    }
    fn human_friendly_name(&self) -> &str {
        "Power"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: LazyLock<FunctionSignature> = LazyLock::new(|| {
            FunctionSignature::new(
                "pow",
                vec![
                    ParameterInfo::required("base", TypeInfo::Any),
                    ParameterInfo::required("exp", TypeInfo::Any),
                    ParameterInfo::optional("mod", TypeInfo::Integral),
                ],
                TypeInfo::Any,
            )
        });
        &SIG
    }

    fn documentation(&self) -> &str {
        "base ** exp. With mod, (base ** exp) % mod computed on integers; a negative exp uses the modular inverse."
    }

    fn evaluate(&self, args: &[Value], _context: &EvaluationContext) -> FunctionResult<Value> {
        if args.len() == 2 {
            return arithmetic::power(&args[0], &args[1])
                .map_err(|e| FunctionError::arithmetic(self.name(), e));
        }
        for (index, arg) in args[..2].iter().enumerate() {
            if !arg.is_integral() {
                return Err(FunctionError::InvalidArgumentType {
                    name: self.name().to_string(),
                    index,
                    expected: TypeInfo::Integral.to_string(),
                    actual: arg.type_name().to_string(),
                });
            }
        }
        modular_pow(
            self.name(),
            integral_at(args, 0),
            integral_at(args, 1),
            integral_at(args, 2),
        )
        .map(Value::from_bigint)
    }
}

fn modular_pow(
    name: &str,
    base: BigInt,
    exponent: BigInt,
    modulus: BigInt,
) -> FunctionResult<BigInt> {
    if modulus.is_zero() {
        return Err(FunctionError::domain(name, "pow() 3rd argument cannot be 0"));
    }
    let m = modulus.abs();
    let mut base = ((base % &m) + &m) % &m;
    let mut exponent = exponent;
    if exponent.is_negative() {
        base = modular_inverse(&base, &m).ok_or_else(|| {
            FunctionError::domain(name, "base is not invertible for the given modulus")
        })?;
        exponent = -exponent;
    }
    let mut result = base.modpow(&exponent, &m);
    if modulus.is_negative() && !result.is_zero() {
        result -= &m;
    }
    Ok(result)
}

fn modular_inverse(a: &BigInt, m: &BigInt) -> Option<BigInt> {
    let (mut old_r, mut r) = (a.clone(), m.clone());
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    while !r.is_zero() {
        let q = &old_r / &r;
        let next_r = &old_r - &q * &r;
        old_r = std::mem::replace(&mut r, next_r);
        let next_s = &old_s - &q * &s;
        old_s = std::mem::replace(&mut s, next_s);
    }
    old_r.is_one().then(|| ((old_s % m) + m) % m)
}
