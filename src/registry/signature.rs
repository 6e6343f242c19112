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

//! Function signatures for arity and argument checking

use crate::model::TypeInfo;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Function signature used for arity and argument type validation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionSignature {
    /// Function name
    pub name: String,
    /// Parameter types; for variadic functions the last entry repeats
    pub parameters: Vec<ParameterInfo>,
    /// Return type
    pub return_type: TypeInfo,
    /// Minimum number of arguments
    pub min_arity: usize,
    /// Maximum number of arguments (None for variadic)
    pub max_arity: Option<usize>,
}

/// Parameter information for functions
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParameterInfo {
    /// Parameter name
    pub name: String,
    /// Parameter type
    pub param_type: TypeInfo,
    /// Whether this parameter is optional
    pub optional: bool,
}

impl FunctionSignature {
    /// Create a new function signature
    pub fn new(
        name: impl Into<String>,
        parameters: Vec<ParameterInfo>,
        return_type: TypeInfo,
    ) -> Self {
        let required_params = parameters.iter().filter(|p| !p.optional).count();
        let max_arity = Some(parameters.len());

        Self {
            name: name.into(),
            parameters,
            return_type,
            min_arity: required_params,
            max_arity,
        }
    }

    /// Create a variadic function signature
    pub fn variadic(
        name: impl Into<String>,
        parameters: Vec<ParameterInfo>,
        return_type: TypeInfo,
    ) -> Self {
        let required_params = parameters.iter().filter(|p| !p.optional).count();

        Self {
            name: name.into(),
            parameters,
            return_type,
            min_arity: required_params,
            max_arity: None,
        }
    }

    /// Whether `count` arguments are accepted
    pub fn accepts_arity(&self, count: usize) -> bool {
        count >= self.min_arity && self.max_arity.is_none_or(|max| count <= max)
    }

    /// Parameter describing the argument at `index`
    ///
    /// Arguments past the declared parameters of a variadic function are
    /// described by the last parameter.
    pub fn parameter_for(&self, index: usize) -> Option<&ParameterInfo> {
        match self.parameters.get(index) {
            Some(param) => Some(param),
            None if self.max_arity.is_none() => self.parameters.last(),
            None => None,
        }
    }
}

impl ParameterInfo {
    /// Create a required parameter
    pub fn required(name: impl Into<String>, param_type: TypeInfo) -> Self {
        Self {
            name: name.into(),
            param_type,
            optional: false,
        }
    }

    /// Create an optional parameter
    pub fn optional(name: impl Into<String>, param_type: TypeInfo) -> Self {
        Self {
            name: name.into(),
            param_type,
            optional: true,
        }
    }
}

impl fmt::Display for FunctionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, param) in self.parameters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", param.name, param.param_type)?;
            if param.optional {
                write!(f, "?")?;
            }
        }
        if self.max_arity.is_none() {
            write!(f, ", ...")?;
        }
        write!(f, ") -> {}", self.return_type)
    }
}
