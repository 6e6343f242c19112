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

//! Single-argument real functions with checked results

use crate::model::{TypeInfo, Value};
use crate::registry::function::{EvaluationContext, FunctionError, FunctionResult, MathFunction};
use crate::registry::functions::real_at;
use crate::registry::signature::{FunctionSignature, ParameterInfo};

/// How an infinite result from a finite argument is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnInfinite {
    /// Pole of the function (`log(0)`, `atanh(1)`)
    Domain,
    /// Result too large (`exp(1000)`)
    Overflow,
    /// Returned as is (`degrees(1e308)`)
    Allow,
}

/// Real function of one argument
///
/// A NaN result from a non-NaN argument is a domain error.
pub struct RealFunction {
    name: &'static str,
    human_friendly_name: &'static str,
    documentation: &'static str,
    signature: FunctionSignature,
    kernel: fn(f64) -> f64,
    on_infinite: OnInfinite,
}

impl RealFunction {
    /// Wrap `kernel` as a whitelisted function
    pub fn new(
        name: &'static str,
        human_friendly_name: &'static str,
        documentation: &'static str,
        kernel: fn(f64) -> f64,
        on_infinite: OnInfinite,
    ) -> Self {
        Self {
            name,
            human_friendly_name,
            documentation,
            signature: FunctionSignature::new(
                name,
                vec![ParameterInfo::required("x", TypeInfo::Real)],
                TypeInfo::Float,
            ),
            kernel,
            on_infinite,
        }
    }

    /// Apply the kernel and check the result
    pub fn apply(&self, x: f64) -> FunctionResult<f64> {
        let result = (self.kernel)(x);
        check_result(self.name, &[x], result, self.on_infinite)
    }
}

/// Reject NaN from non-NaN arguments and infinities from finite ones
pub(crate) fn check_result(
    name: &str,
    args: &[f64],
    result: f64,
    on_infinite: OnInfinite,
) -> FunctionResult<f64> {
    if result.is_nan() && !args.iter().any(|x| x.is_nan()) {
        return Err(FunctionError::domain(name, "math domain error"));
    }
    if result.is_infinite() && args.iter().all(|x| x.is_finite()) {
        return match on_infinite {
            OnInfinite::Domain => Err(FunctionError::domain(name, "math domain error")),
            OnInfinite::Overflow => Err(FunctionError::overflow(name)),
            OnInfinite::Allow => Ok(result),
        };
    }
    Ok(result)
}

impl MathFunction for RealFunction {
    fn name(&self) -> &str {
        self.name
    }

    fn human_friendly_name(&self) -> &str {
        self.human_friendly_name
    }

    fn signature(&self) -> &FunctionSignature {
        &self.signature
    }

    fn documentation(&self) -> &str {
        self.documentation
    }

    fn evaluate(&self, args: &[Value], _context: &EvaluationContext) -> FunctionResult<Value> {
        self.apply(real_at(args, 0)).map(Value::Float)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sqrt() -> RealFunction {
        RealFunction::new("sqrt", "Square Root", "", f64::sqrt, OnInfinite::Domain)
    }

    #[test]
    fn test_domain_checks() {
        assert_eq!(sqrt().apply(16.0), Ok(4.0));
        assert!(matches!(sqrt().apply(-1.0), Err(FunctionError::Domain { .. })));
        assert!(sqrt().apply(f64::NAN).is_ok_and(f64::is_nan));
        assert_eq!(sqrt().apply(f64::INFINITY), Ok(f64::INFINITY));
    }

    #[test]
    fn test_infinite_results() {
        let exp = RealFunction::new("exp", "Exponential", "", f64::exp, OnInfinite::Overflow);
        assert!(matches!(exp.apply(1000.0), Err(FunctionError::Overflow { .. })));
        assert_eq!(exp.apply(f64::NEG_INFINITY), Ok(0.0));

        let ln = RealFunction::new("log", "Logarithm", "", f64::ln, OnInfinite::Domain);
        assert!(matches!(ln.apply(0.0), Err(FunctionError::Domain { .. })));

        let degrees =
            RealFunction::new("degrees", "Degrees", "", f64::to_degrees, OnInfinite::Allow);
        assert_eq!(degrees.apply(1e308), Ok(f64::INFINITY));
    }

    #[test]
    fn test_evaluate_accepts_integers() {
        let result = sqrt().evaluate(&[Value::Integer(9)], &EvaluationContext::default());
        assert_eq!(result, Ok(Value::Float(3.0)));
    }
}
