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

//! Hyperbolic functions and their inverses

use crate::registry::function::FunctionRegistry;
use crate::registry::functions::real::{OnInfinite, RealFunction};

/// Register the hyperbolic functions
pub fn register(registry: &mut FunctionRegistry) {
    registry.register(RealFunction::new(
        "sinh",
        "Hyperbolic Sine",
        "Hyperbolic sine of x.",
        f64::sinh,
        OnInfinite::Overflow,
    ));
    registry.register(RealFunction::new(
        "cosh",
        "Hyperbolic Cosine",
        "Hyperbolic cosine of x.",
        f64::cosh,
        OnInfinite::Overflow,
    ));
    registry.register(RealFunction::new(
        "tanh",
        "Hyperbolic Tangent",
        "Hyperbolic tangent of x.",
        f64::tanh,
        OnInfinite::Domain,
    ));
    registry.register(RealFunction::new(
        "asinh",
        "Inverse Hyperbolic Sine",
        "Inverse hyperbolic sine of x.",
        f64::asinh,
        OnInfinite::Domain,
    ));
    registry.register(RealFunction::new(
        "acosh",
        "Inverse Hyperbolic Cosine",
        "Inverse hyperbolic cosine of x; x >= 1.",
        f64::acosh,
        OnInfinite::Domain,
    ));
    registry.register(RealFunction::new(
        "atanh",
        "Inverse Hyperbolic Tangent",
        "Inverse hyperbolic tangent of x; |x| < 1.",
        f64::atanh,
        OnInfinite::Domain,
    ));
}
