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

//! Evaluation namespace: the closed set of names an expression can see

use crate::model::Value;
use crate::registry::{FunctionRegistry, MathFunction, lookup_constant, standard_registry};
use std::sync::Arc;

/// What a name resolves to
#[derive(Clone)]
pub enum Binding<'a> {
    /// Operand or constant
    Value(Value),
    /// Whitelisted function
    Function(&'a Arc<dyn MathFunction>),
}

impl std::fmt::Debug for Binding<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Binding::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Binding::Function(function) => f.debug_tuple("Function").field(&function.name()).finish(),
        }
    }
}

/// Names visible to one evaluation
///
/// The operands `a`, `b` and `c` are bound as floats and shadow constants,
/// which in turn shadow functions. Nothing can be added after construction.
#[derive(Debug, Clone, Copy)]
pub struct Namespace<'a> {
    operands: [f64; 3],
    functions: &'a FunctionRegistry,
}

/// Names of the bound operands
pub const OPERAND_NAMES: [&str; 3] = ["a", "b", "c"];

impl Namespace<'static> {
    /// Namespace over the standard whitelist
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self::with_registry(a, b, c, standard_registry())
    }
}

impl<'a> Namespace<'a> {
    /// Namespace over a custom function registry
    pub fn with_registry(a: f64, b: f64, c: f64, functions: &'a FunctionRegistry) -> Self {
        Self {
            operands: [a, b, c],
            functions,
        }
    }

    /// Resolve a name
    pub fn lookup(&self, name: &str) -> Option<Binding<'a>> {
        if let Some(index) = OPERAND_NAMES.iter().position(|operand| *operand == name) {
            return Some(Binding::Value(Value::Float(self.operands[index])));
        }
        if let Some(value) = lookup_constant(name) {
            return Some(Binding::Value(value));
        }
        self.functions.get(name).map(Binding::Function)
    }

    /// Whether `name` resolves
    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }
}
