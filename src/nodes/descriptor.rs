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

//! Serialisable node schemas

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category every node in this package is listed under
pub const NODE_CATEGORY: &str = "popo-utility";

/// Kind of an input field, with its widget metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "UPPERCASE")]
pub enum InputKind {
    /// Image tensor; only its shape is read
    Image,
    /// Bounded real number
    Float {
        /// Initial value
        default: f64,
        /// Smallest accepted value
        min: f64,
        /// Largest accepted value
        max: f64,
        /// Widget increment
        step: f64,
    },
    /// Free text
    String {
        /// Initial value
        default: String,
        /// Whether the widget spans several lines
        multiline: bool,
    },
}

/// Named input of a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputField {
    /// Input name
    pub name: String,
    /// Kind and widget metadata
    #[serde(flatten)]
    pub kind: InputKind,
}

impl InputField {
    /// Image input
    pub fn image(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: InputKind::Image,
        }
    }

    /// Float input
    pub fn float(name: impl Into<String>, default: f64, min: f64, max: f64, step: f64) -> Self {
        Self {
            name: name.into(),
            kind: InputKind::Float {
                default,
                min,
                max,
                step,
            },
        }
    }

    /// Single-line string input
    pub fn string(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: InputKind::String {
                default: default.into(),
                multiline: false,
            },
        }
    }
}

/// Kind of an output slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OutputKind {
    /// Integer
    Int,
    /// Float
    Float,
    /// String
    String,
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputKind::Int => "INT",
            OutputKind::Float => "FLOAT",
            OutputKind::String => "STRING",
        })
    }
}

/// Named output slot of a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputField {
    /// Output name
    pub name: String,
    /// Output kind
    pub kind: OutputKind,
}

impl OutputField {
    /// Create an output slot
    pub fn new(name: impl Into<String>, kind: OutputKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Everything a host needs to present and invoke a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    /// Registration key
    pub class_name: String,
    /// Name shown to users
    pub display_name: String,
    /// Menu category
    pub category: String,
    /// One-line description
    pub description: String,
    /// Entry-point function name
    pub function: String,
    /// Inputs in declaration order
    pub inputs: Vec<InputField>,
    /// Outputs in return order
    pub outputs: Vec<OutputField>,
}

impl NodeDescriptor {
    /// Descriptor in the package category with no fields yet
    pub fn new(
        class_name: impl Into<String>,
        display_name: impl Into<String>,
        function: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            display_name: display_name.into(),
            category: NODE_CATEGORY.to_string(),
            description: description.into(),
            function: function.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Append an input
    pub fn input(mut self, field: InputField) -> Self {
        self.inputs.push(field);
        self
    }

    /// Append an output
    pub fn output(mut self, name: impl Into<String>, kind: OutputKind) -> Self {
        self.outputs.push(OutputField::new(name, kind));
        self
    }

    /// Input declared under `name`
    pub fn find_input(&self, name: &str) -> Option<&InputField> {
        self.inputs.iter().find(|field| field.name == name)
    }

    /// Output kinds in return order
    pub fn return_types(&self) -> Vec<OutputKind> {
        self.outputs.iter().map(|output| output.kind).collect()
    }

    /// Output names in return order
    pub fn return_names(&self) -> Vec<&str> {
        self.outputs.iter().map(|output| output.name.as_str()).collect()
    }
}
