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

//! Operator semantics for math expression values
//!
//! Integers stay integral and exact under `+ - * // % **` (spilling from
//! i64 into arbitrary precision when needed), `/` always yields a float,
//! `//` and `%` floor toward negative infinity, and any complex operand
//! makes the whole operation complex.

use super::complex::Complex;
use super::value::{Value, bigint_to_f64};
use crate::ast::{BinaryOperator, ComparisonOperator, UnaryOperator};
use num_bigint::BigInt;
use num_traits::{FromPrimitive, One, Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use thiserror::Error;

/// Largest integer result, in bits, that `*` and `**` will build
///
/// Keeps `9**9**9` from tying up the evaluator; larger results are `Overflow`.
pub const MAX_INTEGER_BITS: u64 = 1 << 16;

/// Result type for operator evaluation
pub type ArithmeticResult<T> = Result<T, ArithmeticError>;

/// Errors raised by operators
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArithmeticError {
    /// Division, modulo or power with a zero divisor
    #[error("division by zero in '{operation}'")]
    DivisionByZero {
        /// Operator symbol
        operation: &'static str,
    },

    /// Result too large to represent
    #[error("numeric result of '{operation}' out of range")]
    Overflow {
        /// Operator symbol
        operation: &'static str,
    },

    /// Operator not defined for the operand types
    #[error("unsupported operand type(s) for '{operation}': '{left}' and '{right}'")]
    UnsupportedOperands {
        /// Operator symbol
        operation: &'static str,
        /// Left operand type
        left: &'static str,
        /// Right operand type
        right: &'static str,
    },
}

enum Operands {
    Integer(i64, i64),
    BigInteger(BigInt, BigInt),
    Float(f64, f64),
    Complex(Complex, Complex),
}

fn coerce(left: &Value, right: &Value) -> Operands {
    if let (Some(l), Some(r)) = (left.as_integer(), right.as_integer()) {
        return Operands::Integer(l, r);
    }
    if let (Some(l), Some(r)) = (left.to_bigint(), right.to_bigint()) {
        return Operands::BigInteger(l, r);
    }
    match (left.as_real(), right.as_real()) {
        (Some(l), Some(r)) => Operands::Float(l, r),
        _ => Operands::Complex(left.as_complex(), right.as_complex()),
    }
}

/// Integers mixed into float or complex arithmetic must fit a float
fn ensure_float_range(operation: &'static str, operands: [&Value; 2]) -> ArithmeticResult<()> {
    let too_large = operands
        .iter()
        .any(|v| matches!(v, Value::BigInteger(i) if bigint_to_f64(i).is_infinite()));
    if too_large {
        Err(ArithmeticError::Overflow { operation })
    } else {
        Ok(())
    }
}

fn ensure_bits(operation: &'static str, bits: u64) -> ArithmeticResult<()> {
    if bits > MAX_INTEGER_BITS {
        Err(ArithmeticError::Overflow { operation })
    } else {
        Ok(())
    }
}

/// Apply a binary arithmetic operator
pub fn binary(op: BinaryOperator, left: &Value, right: &Value) -> ArithmeticResult<Value> {
    if op == BinaryOperator::Power {
        return power(left, right);
    }
    let operation = op.symbol();
    match coerce(left, right) {
        Operands::Integer(l, r) => integer_binary(op, l, r),
        Operands::BigInteger(l, r) => big_binary(op, &l, &r),
        Operands::Float(l, r) => {
            ensure_float_range(operation, [left, right])?;
            float_binary(op, l, r)
        }
        Operands::Complex(l, r) => {
            ensure_float_range(operation, [left, right])?;
            match op {
                BinaryOperator::Add => Ok(Value::Complex(l + r)),
                BinaryOperator::Subtract => Ok(Value::Complex(l - r)),
                BinaryOperator::Multiply => Ok(Value::Complex(l * r)),
                BinaryOperator::Divide => l
                    .checked_div(r)
                    .map(Value::Complex)
                    .ok_or(ArithmeticError::DivisionByZero { operation }),
                _ => Err(ArithmeticError::UnsupportedOperands {
                    operation,
                    left: left.type_name(),
                    right: right.type_name(),
                }),
            }
        }
    }
}

fn integer_binary(op: BinaryOperator, l: i64, r: i64) -> ArithmeticResult<Value> {
    let operation = op.symbol();
    let exact = match op {
        BinaryOperator::Add => l.checked_add(r),
        BinaryOperator::Subtract => l.checked_sub(r),
        BinaryOperator::Multiply => l.checked_mul(r),
        BinaryOperator::Divide => {
            if r == 0 {
                return Err(ArithmeticError::DivisionByZero { operation });
            }
            return Ok(Value::Float(l as f64 / r as f64));
        }
        BinaryOperator::FloorDivide => {
            if r == 0 {
                return Err(ArithmeticError::DivisionByZero { operation });
            }
            // i64::MIN // -1 has no i64 quotient
            l.checked_div(r).map(|q| {
                if l % r != 0 && ((l < 0) != (r < 0)) {
                    q - 1
                } else {
                    q
                }
            })
        }
        BinaryOperator::Modulo => {
            if r == 0 {
                return Err(ArithmeticError::DivisionByZero { operation });
            }
            let m = l.checked_rem(r).unwrap_or(0);
            Some(if m != 0 && ((m < 0) != (r < 0)) { m + r } else { m })
        }
        BinaryOperator::Power => return small_power(l, r),
    };
    match exact {
        Some(value) => Ok(Value::Integer(value)),
        None => big_binary(op, &BigInt::from(l), &BigInt::from(r)),
    }
}

fn big_binary(op: BinaryOperator, l: &BigInt, r: &BigInt) -> ArithmeticResult<Value> {
    let operation = op.symbol();
    let value = match op {
        BinaryOperator::Add => l + r,
        BinaryOperator::Subtract => l - r,
        BinaryOperator::Multiply => {
            ensure_bits(operation, l.bits() + r.bits())?;
            l * r
        }
        BinaryOperator::Divide => return big_true_divide(l, r).map(Value::Float),
        BinaryOperator::FloorDivide => {
            big_divmod(l, r)
                .ok_or(ArithmeticError::DivisionByZero { operation })?
                .0
        }
        BinaryOperator::Modulo => {
            big_divmod(l, r)
                .ok_or(ArithmeticError::DivisionByZero { operation })?
                .1
        }
        BinaryOperator::Power => return integer_power(l, r),
    };
    Ok(Value::from_bigint(value))
}

/// Floored quotient and remainder of two integers; `None` for a zero divisor
pub fn big_divmod(l: &BigInt, r: &BigInt) -> Option<(BigInt, BigInt)> {
    if r.is_zero() {
        return None;
    }
    let (mut q, mut m) = (l / r, l % r);
    if !m.is_zero() && m.sign() != r.sign() {
        q -= 1;
        m += r;
    }
    Some((q, m))
}

/// `l / r` for integers of any size, rounded to a float
fn big_true_divide(l: &BigInt, r: &BigInt) -> ArithmeticResult<f64> {
    let operation = BinaryOperator::Divide.symbol();
    if r.is_zero() {
        return Err(ArithmeticError::DivisionByZero { operation });
    }
    let (lf, rf) = (bigint_to_f64(l), bigint_to_f64(r));
    if lf.is_finite() && rf.is_finite() {
        return Ok(lf / rf);
    }
    // Scale so the integer quotient keeps 64 significant bits
    let shift = 64 + r.bits() as i64 - l.bits() as i64;
    let quotient = if shift >= 0 {
        (l << shift as usize) / r
    } else {
        l / (r << shift.unsigned_abs() as usize)
    };
    let exponent = i32::try_from(-shift).unwrap_or(i32::MAX);
    // Two steps so subnormal results are not flushed to zero
    let half = exponent / 2;
    let result = bigint_to_f64(&quotient) * 2f64.powi(half) * 2f64.powi(exponent - half);
    if result.is_finite() {
        Ok(result)
    } else {
        Err(ArithmeticError::Overflow { operation })
    }
}

fn float_binary(op: BinaryOperator, l: f64, r: f64) -> ArithmeticResult<Value> {
    let operation = op.symbol();
    let value = match op {
        BinaryOperator::Add => l + r,
        BinaryOperator::Subtract => l - r,
        BinaryOperator::Multiply => l * r,
        BinaryOperator::Divide => {
            if r == 0.0 {
                return Err(ArithmeticError::DivisionByZero { operation });
            }
            l / r
        }
        BinaryOperator::FloorDivide => float_divmod(l, r)
            .ok_or(ArithmeticError::DivisionByZero { operation })?
            .0,
        BinaryOperator::Modulo => float_divmod(l, r)
            .ok_or(ArithmeticError::DivisionByZero { operation })?
            .1,
        BinaryOperator::Power => return float_power(l, r),
    };
    Ok(Value::Float(value))
}

/// Floored quotient and remainder of two floats; `None` for a zero divisor
///
/// The remainder takes the sign of the divisor and the quotient is rounded
/// so that `q * r + m` stays as close to `l` as the float format allows.
pub fn float_divmod(l: f64, r: f64) -> Option<(f64, f64)> {
    if r == 0.0 {
        return None;
    }
    let mut m = l % r;
    let mut div = (l - m) / r;
    if m != 0.0 {
        if (r < 0.0) != (m < 0.0) {
            m += r;
            div -= 1.0;
        }
    } else {
        m = 0f64.copysign(r);
    }
    let q = if div != 0.0 {
        let mut floor = div.floor();
        if div - floor > 0.5 {
            floor += 1.0;
        }
        floor
    } else {
        0f64.copysign(l / r)
    };
    Some((q, m))
}

/// `base ** exponent`
pub fn power(base: &Value, exponent: &Value) -> ArithmeticResult<Value> {
    let operation = BinaryOperator::Power.symbol();
    match coerce(base, exponent) {
        Operands::Integer(l, r) => small_power(l, r),
        Operands::BigInteger(l, r) => integer_power(&l, &r),
        Operands::Float(l, r) => {
            ensure_float_range(operation, [base, exponent])?;
            float_power(l, r)
        }
        Operands::Complex(l, r) => {
            ensure_float_range(operation, [base, exponent])?;
            let result = if r.im == 0.0 && r.re.fract() == 0.0 && r.re.abs() <= 100.0 {
                l.checked_powi(r.re as i32)
            } else {
                l.checked_pow(r)
            }
            .ok_or(ArithmeticError::DivisionByZero { operation })?;
            if !result.is_finite() && l.is_finite() && r.is_finite() {
                return Err(ArithmeticError::Overflow { operation });
            }
            Ok(Value::Complex(result))
        }
    }
}

fn small_power(base: i64, exponent: i64) -> ArithmeticResult<Value> {
    let exact = u32::try_from(exponent)
        .ok()
        .and_then(|e| base.checked_pow(e));
    match exact {
        Some(value) => Ok(Value::Integer(value)),
        None => integer_power(&BigInt::from(base), &BigInt::from(exponent)),
    }
}

/// Integer power; negative exponents fall back to float power
pub fn integer_power(base: &BigInt, exponent: &BigInt) -> ArithmeticResult<Value> {
    let operation = BinaryOperator::Power.symbol();
    if exponent.is_negative() {
        let (b, e) = (bigint_to_f64(base), bigint_to_f64(exponent));
        if b.is_infinite() || e.is_infinite() {
            return Err(ArithmeticError::Overflow { operation });
        }
        return float_power(b, e);
    }
    if base.is_zero() || base.is_one() {
        return Ok(Value::from_bigint(base.clone()));
    }
    if *base == -BigInt::one() {
        let odd = (exponent % 2u32).is_one();
        return Ok(Value::Integer(if odd { -1 } else { 1 }));
    }
    // |base| >= 2, so the result has at least (bits - 1) * exponent bits
    let exponent = exponent
        .to_u32()
        .ok_or(ArithmeticError::Overflow { operation })?;
    ensure_bits(
        operation,
        (base.bits() - 1).saturating_mul(u64::from(exponent)),
    )?;
    Ok(Value::from_bigint(base.pow(exponent)))
}

/// Float power; negative bases with fractional exponents give complex results
pub fn float_power(base: f64, exponent: f64) -> ArithmeticResult<Value> {
    let operation = BinaryOperator::Power.symbol();
    if exponent.is_finite() && base.is_finite() {
        if base == 0.0 && exponent < 0.0 {
            return Err(ArithmeticError::DivisionByZero { operation });
        }
        if base < 0.0 && exponent.fract() != 0.0 {
            let result = Complex::real(base)
                .checked_pow(Complex::real(exponent))
                .ok_or(ArithmeticError::DivisionByZero { operation })?;
            return Ok(Value::Complex(result));
        }
        let result = base.powf(exponent);
        if result.is_infinite() {
            return Err(ArithmeticError::Overflow { operation });
        }
        return Ok(Value::Float(result));
    }
    Ok(Value::Float(base.powf(exponent)))
}

/// Apply a unary operator
pub fn unary(op: UnaryOperator, operand: &Value) -> ArithmeticResult<Value> {
    Ok(match (op, operand) {
        (UnaryOperator::Not, value) => Value::Boolean(!value.is_truthy()),
        (UnaryOperator::Plus, Value::Boolean(b)) => Value::Integer(i64::from(*b)),
        (UnaryOperator::Plus, value) => value.clone(),
        (UnaryOperator::Minus, Value::Boolean(b)) => Value::Integer(-i64::from(*b)),
        (UnaryOperator::Minus, Value::Integer(i)) => match i.checked_neg() {
            Some(negated) => Value::Integer(negated),
            None => Value::from_bigint(-BigInt::from(*i)),
        },
        (UnaryOperator::Minus, Value::BigInteger(i)) => Value::from_bigint(-i),
        (UnaryOperator::Minus, Value::Float(x)) => Value::Float(-x),
        (UnaryOperator::Minus, Value::Complex(c)) => Value::Complex(-*c),
    })
}

/// Exact ordering of an integer against a float; `None` for NaN
fn compare_integer_float(integer: &BigInt, x: f64) -> Option<Ordering> {
    if x.is_nan() {
        return None;
    }
    if x.is_infinite() {
        return Some(if x > 0.0 { Ordering::Less } else { Ordering::Greater });
    }
    let floor = BigInt::from_f64(x.floor())?;
    Some(match integer.cmp(&floor) {
        Ordering::Equal if x.fract() != 0.0 => Ordering::Less,
        ordering => ordering,
    })
}

/// Evaluate a single comparison
///
/// Complex values only support equality.
pub fn compare(op: ComparisonOperator, left: &Value, right: &Value) -> ArithmeticResult<bool> {
    let ordering = match (left, right) {
        (Value::BigInteger(l), Value::Float(x)) => compare_integer_float(l, *x),
        (Value::Float(x), Value::BigInteger(r)) => {
            compare_integer_float(r, *x).map(Ordering::reverse)
        }
        _ => match coerce(left, right) {
            Operands::Integer(l, r) => Some(l.cmp(&r)),
            Operands::BigInteger(l, r) => Some(l.cmp(&r)),
            Operands::Float(l, r) => l.partial_cmp(&r),
            Operands::Complex(l, r) => {
                return match op {
                    ComparisonOperator::Equal => Ok(l == r),
                    ComparisonOperator::NotEqual => Ok(l != r),
                    _ => Err(ArithmeticError::UnsupportedOperands {
                        operation: op.symbol(),
                        left: left.type_name(),
                        right: right.type_name(),
                    }),
                };
            }
        },
    };
    Ok(match (op, ordering) {
        // NaN is unordered: only '!=' holds
        (ComparisonOperator::NotEqual, None) => true,
        (_, None) => false,
        (ComparisonOperator::Equal, Some(o)) => o == Ordering::Equal,
        (ComparisonOperator::NotEqual, Some(o)) => o != Ordering::Equal,
        (ComparisonOperator::LessThan, Some(o)) => o == Ordering::Less,
        (ComparisonOperator::LessThanOrEqual, Some(o)) => o != Ordering::Greater,
        (ComparisonOperator::GreaterThan, Some(o)) => o == Ordering::Greater,
        (ComparisonOperator::GreaterThanOrEqual, Some(o)) => o != Ordering::Less,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use BinaryOperator::*;

    fn int(i: i64) -> Value {
        Value::Integer(i)
    }

    fn float(x: f64) -> Value {
        Value::Float(x)
    }

    fn big(digits: &str) -> Value {
        Value::from_bigint(digits.parse().unwrap())
    }

    #[test]
    fn test_integer_arithmetic_stays_integral() {
        assert_eq!(binary(Add, &int(2), &int(3)), Ok(int(5)));
        assert_eq!(binary(Multiply, &int(-4), &int(3)), Ok(int(-12)));
        assert_eq!(binary(Divide, &int(7), &int(2)), Ok(float(3.5)));
        assert_eq!(binary(Add, &Value::Boolean(true), &int(1)), Ok(int(2)));
    }

    #[test]
    fn test_floor_division_and_modulo() {
        assert_eq!(binary(FloorDivide, &int(7), &int(2)), Ok(int(3)));
        assert_eq!(binary(FloorDivide, &int(-7), &int(2)), Ok(int(-4)));
        assert_eq!(binary(Modulo, &int(-7), &int(2)), Ok(int(1)));
        assert_eq!(binary(Modulo, &int(7), &int(-2)), Ok(int(-1)));
        assert_eq!(binary(FloorDivide, &float(-7.0), &float(2.0)), Ok(float(-4.0)));
        assert_eq!(binary(Modulo, &float(-7.5), &float(2.0)), Ok(float(0.5)));
        assert_eq!(binary(Modulo, &float(5.0), &float(-3.0)), Ok(float(-1.0)));
    }

    #[test]
    fn test_division_by_zero() {
        for op in [Divide, FloorDivide, Modulo] {
            assert!(matches!(
                binary(op, &int(1), &int(0)),
                Err(ArithmeticError::DivisionByZero { .. })
            ));
            assert!(matches!(
                binary(op, &float(1.0), &float(0.0)),
                Err(ArithmeticError::DivisionByZero { .. })
            ));
            assert!(matches!(
                binary(op, &big("100000000000000000000"), &int(0)),
                Err(ArithmeticError::DivisionByZero { .. })
            ));
        }
        assert!(matches!(
            power(&float(0.0), &int(-1)),
            Err(ArithmeticError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_integer_overflow_stays_exact() {
        assert_eq!(
            binary(Add, &int(i64::MAX), &int(1)),
            Ok(big("9223372036854775808"))
        );
        assert_eq!(power(&int(10), &int(20)), Ok(big("100000000000000000000")));
        assert_eq!(
            binary(FloorDivide, &int(i64::MIN), &int(-1)),
            Ok(big("9223372036854775808"))
        );
        let three_to_forty = power(&int(3), &int(40)).unwrap();
        assert_eq!(binary(Modulo, &three_to_forty, &int(7)), Ok(int(4)));

        let two_to_sixty_four = power(&int(2), &int(64)).unwrap();
        let sum = binary(Add, &two_to_sixty_four, &int(1)).unwrap();
        assert_eq!(binary(Subtract, &sum, &two_to_sixty_four), Ok(int(1)));
    }

    #[test]
    fn test_big_integer_division() {
        let googol = power(&int(10), &int(100)).unwrap();
        assert_eq!(binary(FloorDivide, &googol, &power(&int(10), &int(98)).unwrap()), Ok(int(100)));
        assert_eq!(
            binary(FloorDivide, &binary(Subtract, &int(0), &googol).unwrap(), &power(&int(10), &int(99)).unwrap()),
            Ok(int(-10))
        );
        assert_eq!(binary(Modulo, &googol, &int(-3)), Ok(int(-2)));
        assert_eq!(binary(Divide, &googol, &int(4)), Ok(float(2.5e99)));

        let huge = power(&int(10), &int(400)).unwrap();
        assert_eq!(
            binary(Divide, &huge, &power(&int(10), &int(399)).unwrap()),
            Ok(float(10.0))
        );
        assert!(matches!(
            binary(Divide, &huge, &int(3)),
            Err(ArithmeticError::Overflow { .. })
        ));
        // Quotients in the subnormal range are not flushed to zero
        match binary(Divide, &int(1), &power(&int(10), &int(320)).unwrap()) {
            Ok(Value::Float(q)) => assert!(q > 0.0 && (q / 1e-320 - 1.0).abs() < 1e-3),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_big_integer_limits() {
        assert!(matches!(
            power(&int(10), &int(1_000_000)),
            Err(ArithmeticError::Overflow { .. })
        ));
        assert!(matches!(
            power(&int(2), &int(i64::MAX)),
            Err(ArithmeticError::Overflow { .. })
        ));
        // Mixing a huge integer into float arithmetic cannot convert it
        let huge = power(&int(10), &int(400)).unwrap();
        assert!(matches!(
            binary(Add, &huge, &float(1.0)),
            Err(ArithmeticError::Overflow { .. })
        ));
        assert_eq!(power(&int(-1), &big("100000000000000000001")), Ok(int(-1)));
    }

    #[test]
    fn test_power() {
        assert_eq!(power(&int(2), &int(10)), Ok(int(1024)));
        assert_eq!(power(&int(2), &int(-1)), Ok(float(0.5)));
        assert_eq!(power(&int(-1), &int(1_000_000_000_001)), Ok(int(-1)));
        assert_eq!(power(&float(4.0), &float(0.5)), Ok(float(2.0)));
        assert!(matches!(
            power(&float(10.0), &float(400.0)),
            Err(ArithmeticError::Overflow { .. })
        ));
        assert_eq!(
            power(&float(f64::INFINITY), &int(2)),
            Ok(float(f64::INFINITY))
        );
        assert!(matches!(
            power(&float(-8.0), &float(1.0 / 3.0)),
            Ok(Value::Complex(c)) if c.im > 1.7
        ));
    }

    #[test]
    fn test_complex_operands() {
        let i = Value::Complex(Complex::new(0.0, 1.0));
        assert_eq!(
            power(&i, &int(2)),
            Ok(Value::Complex(Complex::real(-1.0)))
        );
        assert_eq!(
            binary(Add, &i, &int(1)),
            Ok(Value::Complex(Complex::new(1.0, 1.0)))
        );
        assert!(matches!(
            binary(Modulo, &i, &int(1)),
            Err(ArithmeticError::UnsupportedOperands { .. })
        ));
        assert_eq!(compare(ComparisonOperator::Equal, &i, &i), Ok(true));
        assert!(compare(ComparisonOperator::LessThan, &i, &int(1)).is_err());
    }

    #[test]
    fn test_unary() {
        assert_eq!(unary(UnaryOperator::Minus, &int(3)), Ok(int(-3)));
        assert_eq!(unary(UnaryOperator::Plus, &Value::Boolean(true)), Ok(int(1)));
        assert_eq!(
            unary(UnaryOperator::Not, &float(0.0)),
            Ok(Value::Boolean(true))
        );
        assert_eq!(
            unary(UnaryOperator::Minus, &int(i64::MIN)),
            Ok(big("9223372036854775808"))
        );
        assert_eq!(
            unary(UnaryOperator::Minus, &big("9223372036854775808")),
            Ok(int(i64::MIN))
        );
    }

    #[test]
    fn test_comparisons() {
        use ComparisonOperator::*;
        assert_eq!(compare(LessThan, &int(1), &float(1.5)), Ok(true));
        assert_eq!(compare(Equal, &int(2), &float(2.0)), Ok(true));
        assert_eq!(compare(Equal, &float(f64::NAN), &float(f64::NAN)), Ok(false));
        assert_eq!(compare(NotEqual, &float(f64::NAN), &float(f64::NAN)), Ok(true));
        assert_eq!(compare(GreaterThanOrEqual, &Value::Boolean(true), &int(1)), Ok(true));
    }

    #[test]
    fn test_big_integer_comparisons() {
        use ComparisonOperator::*;
        let huge = power(&int(10), &int(400)).unwrap();
        assert_eq!(compare(GreaterThan, &huge, &float(1e308)), Ok(true));
        assert_eq!(compare(LessThan, &huge, &float(f64::INFINITY)), Ok(true));
        assert_eq!(compare(Equal, &big("100000000000000000000"), &float(1e20)), Ok(true));
        assert_eq!(compare(LessThan, &float(1e20), &big("100000000000000000001")), Ok(true));
        assert_eq!(compare(GreaterThan, &big("-100000000000000000000"), &int(i64::MIN)), Ok(false));
    }
}
