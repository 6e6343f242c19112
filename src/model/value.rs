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

//! Runtime values of math expressions

use super::complex::Complex;
use super::types::TypeInfo;
use num_bigint::BigInt;
use num_traits::{FromPrimitive, Signed, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Value produced while evaluating an expression
///
/// Integer arithmetic stays integral and exact, true division yields floats
/// and booleans behave as 0 / 1 wherever a number is expected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean value
    Boolean(bool),
    /// Integer value (64-bit signed)
    Integer(i64),
    /// Integer outside the i64 range; never holds a value that fits `Integer`
    BigInteger(BigInt),
    /// Float value
    Float(f64),
    /// Complex value
    Complex(Complex),
}

impl Value {
    /// Type of this value
    pub fn type_info(&self) -> TypeInfo {
        match self {
            Value::Boolean(_) => TypeInfo::Boolean,
            Value::Integer(_) | Value::BigInteger(_) => TypeInfo::Integer,
            Value::Float(_) => TypeInfo::Float,
            Value::Complex(_) => TypeInfo::Complex,
        }
    }

    /// Type name used in error messages
    pub fn type_name(&self) -> &'static str {
        self.type_info().name()
    }

    /// Whether this value can be passed where `expected` is required
    pub fn conforms_to(&self, expected: TypeInfo) -> bool {
        match expected {
            TypeInfo::Any => true,
            TypeInfo::Real => !matches!(self, Value::Complex(_)),
            TypeInfo::Integral => self.is_integral(),
            TypeInfo::Integer => matches!(
                self,
                Value::Integer(_) | Value::BigInteger(_) | Value::Boolean(_)
            ),
            other => self.type_info() == other,
        }
    }

    /// Truthiness: zero is false, everything else (NaN included) is true
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Boolean(b) => *b,
            Value::Integer(i) => *i != 0,
            Value::BigInteger(i) => !i.is_zero(),
            Value::Float(x) => *x != 0.0,
            Value::Complex(c) => !c.is_zero(),
        }
    }

    /// Integer view of booleans and integers
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Boolean(b) => Some(i64::from(*b)),
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Exact view of booleans and integers of any size
    pub fn to_bigint(&self) -> Option<BigInt> {
        match self {
            Value::BigInteger(i) => Some(i.clone()),
            other => other.as_integer().map(BigInt::from),
        }
    }

    /// Exact view that also accepts floats without a fractional part
    pub fn to_integral_bigint(&self) -> Option<BigInt> {
        match self {
            Value::Float(x) if x.is_finite() && x.fract() == 0.0 => BigInt::from_f64(*x),
            other => other.to_bigint(),
        }
    }

    /// Whether the value is a boolean, an integer or an integral float
    pub fn is_integral(&self) -> bool {
        match self {
            Value::Float(x) => x.is_finite() && x.fract() == 0.0,
            Value::Complex(_) => false,
            _ => true,
        }
    }

    /// Real view of every non-complex value
    ///
    /// Integers beyond the float range map to a signed infinity.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Value::Boolean(b) => Some(f64::from(u8::from(*b))),
            Value::Integer(i) => Some(*i as f64),
            Value::BigInteger(i) => Some(bigint_to_f64(i)),
            Value::Float(x) => Some(*x),
            Value::Complex(_) => None,
        }
    }

    /// Complex view of every value
    pub fn as_complex(&self) -> Complex {
        match self {
            Value::Complex(c) => *c,
            other => Complex::real(other.as_real().unwrap_or_default()),
        }
    }

    /// Integer holding `value`, in the narrowest representation
    pub fn from_bigint(value: BigInt) -> Value {
        match value.to_i64() {
            Some(i) => Value::Integer(i),
            None => Value::BigInteger(value),
        }
    }

    /// Exact integer for an integral float, else the float itself
    pub fn integer_or_float(value: f64) -> Value {
        match BigInt::from_f64(value) {
            Some(i) if value.fract() == 0.0 => Value::from_bigint(i),
            _ => Value::Float(value),
        }
    }
}

/// Nearest float to an integer; beyond the float range, a signed infinity
pub fn bigint_to_f64(value: &BigInt) -> f64 {
    match value.to_f64() {
        Some(x) => x,
        None if value.is_negative() => f64::NEG_INFINITY,
        None => f64::INFINITY,
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Value::from_bigint(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<Complex> for Value {
    fn from(value: Complex) -> Self {
        Value::Complex(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(true) => f.write_str("True"),
            Value::Boolean(false) => f.write_str("False"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::BigInteger(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Complex(c) => write!(f, "{c}"),
        }
    }
}
