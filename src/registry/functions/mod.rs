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

//! Whitelisted math functions, grouped by family

pub mod basic;
pub mod exponential;
pub mod hyperbolic;
pub mod number_theory;
pub mod real;
pub mod rounding;
pub mod trigonometric;

pub use basic::{
    AbsFunction, FloatFunction, IntFunction, MaxFunction, MinFunction, PowFunction,
    RoundFunction, round_to_digits,
};
pub use exponential::LogFunction;
pub use number_theory::{
    CopysignFunction, FactorialFunction, FmodFunction, GcdFunction, LcmFunction,
};
pub use real::{OnInfinite, RealFunction};
pub use rounding::{CeilFunction, FloorFunction, TruncFunction};
pub use trigonometric::{Atan2Function, HypotFunction};

use crate::model::Value;
use crate::registry::function::FunctionRegistry;
use num_bigint::BigInt;

/// Register every whitelisted function
pub fn register_all(registry: &mut FunctionRegistry) {
    basic::register(registry);
    rounding::register(registry);
    exponential::register(registry);
    trigonometric::register(registry);
    hyperbolic::register(registry);
    number_theory::register(registry);
}

/// Real view of a validated argument
pub(crate) fn real_at(args: &[Value], index: usize) -> f64 {
    args.get(index)
        .and_then(Value::as_real)
        .unwrap_or(f64::NAN)
}

/// Exact integer view of a validated integral argument
pub(crate) fn integral_at(args: &[Value], index: usize) -> BigInt {
    args.get(index)
        .and_then(Value::to_integral_bigint)
        .unwrap_or_default()
}
