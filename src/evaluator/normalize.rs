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

//! Mapping of evaluation results onto the `(int, float)` output pair

use super::error::{EvaluationError, EvaluationResult};
use crate::model::value::bigint_to_f64;
use crate::model::{ArithmeticError, Value};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Float reported for a positive infinite result
pub const POSITIVE_INFINITY_SENTINEL: f64 = 999_999.0;

/// Float reported for a negative infinite result
pub const NEGATIVE_INFINITY_SENTINEL: f64 = -999_999.0;

/// Normalised result of an expression
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ExpressionResult {
    /// Float truncated toward zero
    pub int: i64,
    /// Finite float value
    pub float: f64,
}

impl ExpressionResult {
    /// The `(0, 0.0)` pair reported for every failure
    pub const ZERO: Self = Self { int: 0, float: 0.0 };

    /// Build from an already finite float
    pub fn from_float(float: f64) -> Self {
        // `as` truncates toward zero and saturates at the i64 range
        Self {
            int: float as i64,
            float,
        }
    }

    /// Pair form
    pub fn into_pair(self) -> (i64, f64) {
        (self.int, self.float)
    }
}

impl From<ExpressionResult> for (i64, f64) {
    fn from(result: ExpressionResult) -> Self {
        result.into_pair()
    }
}

impl fmt::Display for ExpressionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {:?})", self.int, self.float)
    }
}

/// Map NaN to 0.0 and infinities to the sentinels
pub fn normalize_float(value: f64) -> f64 {
    if value.is_nan() {
        debug!("normalising NaN result to 0.0");
        0.0
    } else if value == f64::INFINITY {
        debug!("normalising +inf result to {POSITIVE_INFINITY_SENTINEL}");
        POSITIVE_INFINITY_SENTINEL
    } else if value == f64::NEG_INFINITY {
        debug!("normalising -inf result to {NEGATIVE_INFINITY_SENTINEL}");
        NEGATIVE_INFINITY_SENTINEL
    } else {
        value
    }
}

/// Normalise an evaluated value
///
/// Complex values are accepted only with a zero imaginary part; integers
/// beyond the float range overflow rather than becoming infinite.
pub fn normalize(value: Value) -> EvaluationResult<ExpressionResult> {
    let real = match value {
        Value::BigInteger(i) => {
            let real = bigint_to_f64(&i);
            if real.is_infinite() {
                return Err(ArithmeticError::Overflow { operation: "float" }.into());
            }
            real
        }
        Value::Complex(c) if c.im != 0.0 => {
            return Err(EvaluationError::NonRealResult { re: c.re, im: c.im });
        }
        Value::Complex(c) => c.re,
        Value::Integer(i) => i as f64,
        Value::Boolean(b) => f64::from(u8::from(b)),
        Value::Float(x) => x,
    };
    Ok(ExpressionResult::from_float(normalize_float(real)))
}
