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

//! Trigonometric functions and angle conversion

use crate::model::{TypeInfo, Value};
use crate::registry::function::{EvaluationContext, FunctionRegistry, FunctionResult, MathFunction};
use crate::registry::functions::real::{OnInfinite, RealFunction, check_result};
use crate::registry::functions::real_at;
use crate::registry::signature::{FunctionSignature, ParameterInfo};
use std::sync::LazyLock;

/// Register the trigonometric functions
pub fn register(registry: &mut FunctionRegistry) {
    let unary: [(&'static str, &'static str, &'static str, fn(f64) -> f64); 6] = [
        ("sin", "Sine", "Sine of x radians.", f64::sin),
        ("cos", "Cosine", "Cosine of x radians.", f64::cos),
        ("tan", "Tangent", "Tangent of x radians.", f64::tan),
        ("asin", "Arc Sine", "Arc sine of x in radians; |x| <= 1.", f64::asin),
        ("acos", "Arc Cosine", "Arc cosine of x in radians; |x| <= 1.", f64::acos),
        ("atan", "Arc Tangent", "Arc tangent of x in radians.", f64::atan),
    ];
    for (name, human, doc, kernel) in unary {
        registry.register(RealFunction::new(name, human, doc, kernel, OnInfinite::Domain));
    }
    registry.register(Atan2Function);
    registry.register(HypotFunction);
    registry.register(RealFunction::new(
        "degrees",
        "Degrees",
        "Converts x from radians to degrees.",
        f64::to_degrees,
        OnInfinite::Allow,
    ));
    registry.register(RealFunction::new(
        "radians",
        "Radians",
        "Converts x from degrees to radians.",
        f64::to_radians,
        OnInfinite::Allow,
    ));
}

/// atan2(y, x) - angle of the point (x, y)
pub struct Atan2Function;

impl MathFunction for Atan2Function {
    fn name(&self) -> &str {
        "atan2"
    }
    fn human_friendly_name(&self) -> &str {
        "Arc Tangent of y/x"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: LazyLock<FunctionSignature> = LazyLock::new(|| {
            FunctionSignature::new(
                "atan2",
                vec![
                    ParameterInfo::required("y", TypeInfo::Real),
                    ParameterInfo::required("x", TypeInfo::Real),
                ],
                TypeInfo::Float,
            )
        });
        &SIG
    }

    fn documentation(&self) -> &str {
        "Arc tangent of y/x in radians, using the signs of both to pick the quadrant."
    }

    fn evaluate(&self, args: &[Value], _context: &EvaluationContext) -> FunctionResult<Value> {
        Ok(Value::Float(real_at(args, 0).atan2(real_at(args, 1))))
    }
}

/// hypot(*coordinates) - Euclidean norm
pub struct HypotFunction;

impl MathFunction for HypotFunction {
    fn name(&self) -> &str {
        "hypot"
    }
    fn human_friendly_name(&self) -> &str {
        "Euclidean Norm"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: LazyLock<FunctionSignature> = LazyLock::new(|| {
            FunctionSignature::variadic(
                "hypot",
                vec![ParameterInfo::optional("coordinate", TypeInfo::Real)],
                TypeInfo::Float,
            )
        });
        &SIG
    }

    fn documentation(&self) -> &str {
        "Euclidean distance from the origin to the point given by the coordinates."
    }

    fn evaluate(&self, args: &[Value], _context: &EvaluationContext) -> FunctionResult<Value> {
        let coordinates: Vec<f64> = (0..args.len()).map(|i| real_at(args, i)).collect();
        let norm = coordinates.iter().fold(0.0, |acc: f64, x| acc.hypot(*x));
        check_result(self.name(), &coordinates, norm, OnInfinite::Allow).map(Value::Float)
    }
}
