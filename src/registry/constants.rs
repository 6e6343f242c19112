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

//! Named constants available to expressions

use crate::model::Value;
use serde::Serialize;
use std::f64::consts;

/// A named constant
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Constant {
    /// Identifier used in expressions
    pub name: &'static str,
    /// Constant value
    pub value: f64,
    /// Short description
    pub description: &'static str,
}

/// Every constant, in listing order
pub const CONSTANTS: [Constant; 5] = [
    Constant {
        name: "pi",
        value: consts::PI,
        description: "Ratio of a circle's circumference to its diameter",
    },
    Constant {
        name: "e",
        value: consts::E,
        description: "Base of the natural logarithm",
    },
    Constant {
        name: "tau",
        value: consts::TAU,
        description: "Ratio of a circle's circumference to its radius (2 pi)",
    },
    Constant {
        name: "inf",
        value: f64::INFINITY,
        description: "Positive infinity",
    },
    Constant {
        name: "nan",
        value: f64::NAN,
        description: "Not a number",
    },
];

/// Value of the constant called `name`
pub fn lookup_constant(name: &str) -> Option<Value> {
    CONSTANTS
        .iter()
        .find(|constant| constant.name == name)
        .map(|constant| Value::Float(constant.value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(lookup_constant("tau"), Some(Value::Float(2.0 * consts::PI)));
        assert_eq!(lookup_constant("inf"), Some(Value::Float(f64::INFINITY)));
        assert!(matches!(lookup_constant("nan"), Some(Value::Float(x)) if x.is_nan()));
        assert_eq!(lookup_constant("PI"), None);
    }
}
