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

//! Whitelisted function trait and registry

use crate::model::value::bigint_to_f64;
use crate::model::{ArithmeticError, TypeInfo, Value};
use crate::registry::functions;
use crate::registry::signature::FunctionSignature;
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use thiserror::Error;

/// Result type for function operations
pub type FunctionResult<T> = Result<T, FunctionError>;

/// Function evaluation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FunctionError {
    /// Invalid number of arguments
    #[error("Function '{name}' expects {min}-{} arguments, got {actual}", max.map_or("∞".to_string(), |n| n.to_string()))]
    InvalidArity {
        /// Function name
        name: String,
        /// Minimum arguments
        min: usize,
        /// Maximum arguments (None for unlimited)
        max: Option<usize>,
        /// Actual arguments provided
        actual: usize,
    },

    /// Invalid argument type
    #[error("Function '{name}' argument {index} expects {expected}, got {actual}")]
    InvalidArgumentType {
        /// Function name
        name: String,
        /// Argument index
        index: usize,
        /// Expected type
        expected: String,
        /// Actual type
        actual: String,
    },

    /// Argument outside the mathematical domain of the function
    #[error("Function '{name}' domain error: {message}")]
    Domain {
        /// Function name
        name: String,
        /// Error message
        message: String,
    },

    /// Result too large to represent
    #[error("Function '{name}' result out of range")]
    Overflow {
        /// Function name
        name: String,
    },

    /// Operator failure inside a function (`pow`, `log` with base 1)
    #[error("Function '{name}' failed: {source}")]
    Arithmetic {
        /// Function name
        name: String,
        /// Underlying operator error
        #[source]
        source: ArithmeticError,
    },
}

impl FunctionError {
    /// Domain error for `name`
    pub fn domain(name: &str, message: impl Into<String>) -> Self {
        FunctionError::Domain {
            name: name.to_string(),
            message: message.into(),
        }
    }

    /// Overflow error for `name`
    pub fn overflow(name: &str) -> Self {
        FunctionError::Overflow {
            name: name.to_string(),
        }
    }

    /// Wrap an operator error raised while evaluating `name`
    pub fn arithmetic(name: &str, source: ArithmeticError) -> Self {
        FunctionError::Arithmetic {
            name: name.to_string(),
            source,
        }
    }
}

/// Limits a function may consult while evaluating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationContext {
    /// Largest argument accepted by `factorial`
    pub max_factorial_argument: u64,
}

impl Default for EvaluationContext {
    fn default() -> Self {
        Self {
            max_factorial_argument: 170,
        }
    }
}

/// A whitelisted math function
///
/// Implementations are pure: the result depends only on the arguments.
pub trait MathFunction: Send + Sync {
    /// Name the function is called by in expressions
    fn name(&self) -> &str;

    /// Human-friendly name for listings
    fn human_friendly_name(&self) -> &str;

    /// Function signature
    fn signature(&self) -> &FunctionSignature;

    /// Evaluate with arguments that already passed [`validate_args`]
    ///
    /// [`validate_args`]: MathFunction::validate_args
    fn evaluate(&self, args: &[Value], context: &EvaluationContext) -> FunctionResult<Value>;

    /// Get function documentation
    fn documentation(&self) -> &str {
        ""
    }

    /// Validate arguments before evaluation (both arity and types)
    fn validate_args(&self, args: &[Value]) -> FunctionResult<()> {
        let sig = self.signature();
        if !sig.accepts_arity(args.len()) {
            return Err(FunctionError::InvalidArity {
                name: self.name().to_string(),
                min: sig.min_arity,
                max: sig.max_arity,
                actual: args.len(),
            });
        }

        for (i, arg) in args.iter().enumerate() {
            if let Some(param) = sig.parameter_for(i) {
                if !arg.conforms_to(param.param_type) {
                    return Err(FunctionError::InvalidArgumentType {
                        name: self.name().to_string(),
                        index: i,
                        expected: param.param_type.to_string(),
                        actual: arg.type_name().to_string(),
                    });
                }
                // Real parameters are read as floats, which huge integers overflow
                if param.param_type == TypeInfo::Real
                    && matches!(arg, Value::BigInteger(i) if bigint_to_f64(i).is_infinite())
                {
                    return Err(FunctionError::overflow(self.name()));
                }
            }
        }

        Ok(())
    }

    /// Validate then evaluate
    fn call(&self, args: &[Value], context: &EvaluationContext) -> FunctionResult<Value> {
        self.validate_args(args)?;
        self.evaluate(args, context)
    }
}

/// Registry of whitelisted functions, iterable in registration order
#[derive(Default)]
pub struct FunctionRegistry {
    functions: FxHashMap<String, Arc<dyn MathFunction>>,
    order: Vec<String>,
}

impl std::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.order)
            .finish()
    }
}

impl FunctionRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every whitelisted function
    pub fn standard() -> Self {
        let mut registry = Self::new();
        functions::register_all(&mut registry);
        registry
    }

    /// Register a function, replacing any previous one with the same name
    pub fn register<F: MathFunction + 'static>(&mut self, function: F) {
        let name = function.name().to_string();
        if self
            .functions
            .insert(name.clone(), Arc::new(function))
            .is_none()
        {
            self.order.push(name);
        }
    }

    /// Look up a function by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn MathFunction>> {
        self.functions.get(name)
    }

    /// Whether a function is registered
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Number of registered functions
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Functions in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn MathFunction>> {
        self.order.iter().filter_map(|name| self.functions.get(name))
    }
}

static STANDARD_REGISTRY: Lazy<FunctionRegistry> = Lazy::new(FunctionRegistry::standard);

/// Shared registry of whitelisted functions
pub fn standard_registry() -> &'static FunctionRegistry {
    &STANDARD_REGISTRY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_contents() {
        let registry = standard_registry();
        for name in [
            "abs", "round", "int", "float", "min", "max", "pow", "ceil", "floor", "sqrt",
            "exp", "log", "log10", "log2", "sin", "cos", "tan", "asin", "acos", "atan",
            "sinh", "cosh", "tanh", "asinh", "acosh", "atanh", "degrees", "radians",
            "factorial", "gcd", "lcm",
        ] {
            assert!(registry.contains(name), "missing {name}");
        }
        for name in ["eval", "exec", "open", "globals", "getattr", "type", "a", "pi"] {
            assert!(!registry.contains(name), "unexpected {name}");
        }
        assert_eq!(registry.iter().count(), registry.len());
    }

    #[test]
    fn test_validate_args() {
        let sqrt = standard_registry().get("sqrt").unwrap();
        assert!(matches!(
            sqrt.validate_args(&[]),
            Err(FunctionError::InvalidArity { actual: 0, .. })
        ));
        assert!(matches!(
            sqrt.validate_args(&[Value::Float(1.0), Value::Float(2.0)]),
            Err(FunctionError::InvalidArity { actual: 2, .. })
        ));
        assert!(matches!(
            sqrt.validate_args(&[Value::Complex(crate::model::Complex::new(0.0, 1.0))]),
            Err(FunctionError::InvalidArgumentType { index: 0, .. })
        ));
        assert!(sqrt.validate_args(&[Value::Integer(4)]).is_ok());

        let big = |exponent: u32| Value::from_bigint(num_bigint::BigInt::from(10u8).pow(exponent));
        assert!(sqrt.validate_args(&[big(30)]).is_ok());
        assert!(matches!(
            sqrt.validate_args(&[big(400)]),
            Err(FunctionError::Overflow { .. })
        ));
    }

    #[test]
    fn test_register_keeps_order() {
        let mut registry = FunctionRegistry::new();
        functions::register_all(&mut registry);
        let first = registry.iter().next().map(|f| f.name().to_string());
        assert_eq!(first.as_deref(), Some("abs"));
        let count = registry.len();
        functions::register_all(&mut registry);
        assert_eq!(registry.len(), count);
    }
}
