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

//! Values passed into and out of nodes

use super::error::{NodeError, NodeResult};
use super::image::ImageShape;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A value on a node socket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeValue {
    /// Integer
    Int(i64),
    /// Float
    Float(f64),
    /// Text
    String(String),
    /// Image, described by its shape
    Image(ImageShape),
}

impl NodeValue {
    /// Socket kind name
    pub fn kind_name(&self) -> &'static str {
        match self {
            NodeValue::Int(_) => "INT",
            NodeValue::Float(_) => "FLOAT",
            NodeValue::String(_) => "STRING",
            NodeValue::Image(_) => "IMAGE",
        }
    }
}

impl fmt::Display for NodeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeValue::Int(i) => write!(f, "{i}"),
            NodeValue::Float(x) => write!(f, "{x:?}"),
            NodeValue::String(s) => write!(f, "{s:?}"),
            NodeValue::Image(shape) => write!(f, "{shape}"),
        }
    }
}

impl From<i64> for NodeValue {
    fn from(value: i64) -> Self {
        NodeValue::Int(value)
    }
}

impl From<f64> for NodeValue {
    fn from(value: f64) -> Self {
        NodeValue::Float(value)
    }
}

impl From<&str> for NodeValue {
    fn from(value: &str) -> Self {
        NodeValue::String(value.to_string())
    }
}

impl From<String> for NodeValue {
    fn from(value: String) -> Self {
        NodeValue::String(value)
    }
}

impl From<ImageShape> for NodeValue {
    fn from(value: ImageShape) -> Self {
        NodeValue::Image(value)
    }
}

/// Named inputs of one invocation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeInputs {
    values: FxHashMap<String, NodeValue>,
}

impl NodeInputs {
    /// No inputs
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an input
    pub fn with(mut self, name: impl Into<String>, value: impl Into<NodeValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add or replace an input
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<NodeValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Raw input value
    pub fn get(&self, name: &str) -> Option<&NodeValue> {
        self.values.get(name)
    }

    fn require(&self, node: &str, name: &str) -> NodeResult<&NodeValue> {
        self.values.get(name).ok_or_else(|| NodeError::MissingInput {
            node: node.to_string(),
            input: name.to_string(),
        })
    }

    fn mismatch(node: &str, name: &str, expected: &'static str, actual: &NodeValue) -> NodeError {
        NodeError::InputType {
            node: node.to_string(),
            input: name.to_string(),
            expected,
            actual: actual.kind_name(),
        }
    }

    /// Float input; integers are widened
    pub fn float(&self, node: &str, name: &str) -> NodeResult<f64> {
        match self.require(node, name)? {
            NodeValue::Float(x) => Ok(*x),
            NodeValue::Int(i) => Ok(*i as f64),
            other => Err(Self::mismatch(node, name, "FLOAT", other)),
        }
    }

    /// String input
    pub fn string(&self, node: &str, name: &str) -> NodeResult<&str> {
        match self.require(node, name)? {
            NodeValue::String(s) => Ok(s),
            other => Err(Self::mismatch(node, name, "STRING", other)),
        }
    }

    /// Image input
    pub fn image(&self, node: &str, name: &str) -> NodeResult<&ImageShape> {
        match self.require(node, name)? {
            NodeValue::Image(shape) => Ok(shape),
            other => Err(Self::mismatch(node, name, "IMAGE", other)),
        }
    }
}

/// Outputs of one invocation, in return order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeOutputs(Vec<NodeValue>);

impl NodeOutputs {
    /// Wrap values in return order
    pub fn new(values: Vec<NodeValue>) -> Self {
        Self(values)
    }

    /// Values in return order
    pub fn values(&self) -> &[NodeValue] {
        &self.0
    }

    /// Value at `index`
    pub fn get(&self, index: usize) -> Option<&NodeValue> {
        self.0.get(index)
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no values
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<NodeValue> for NodeOutputs {
    fn from_iter<I: IntoIterator<Item = NodeValue>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_getters() {
        let inputs = NodeInputs::new()
            .with("a", 2i64)
            .with("expression", "a + 1")
            .with("image", ImageShape::new(vec![1, 64, 32, 3]));
        assert_eq!(inputs.float("N", "a"), Ok(2.0));
        assert_eq!(inputs.string("N", "expression"), Ok("a + 1"));
        assert!(inputs.image("N", "image").is_ok());
        assert_eq!(
            inputs.float("N", "missing"),
            Err(NodeError::MissingInput {
                node: "N".to_string(),
                input: "missing".to_string()
            })
        );
        assert_eq!(
            inputs.image("N", "a"),
            Err(NodeError::InputType {
                node: "N".to_string(),
                input: "a".to_string(),
                expected: "IMAGE",
                actual: "INT"
            })
        );
    }

    #[test]
    fn test_outputs_json() {
        let outputs: NodeOutputs = [NodeValue::Int(4), NodeValue::Float(4.0)].into_iter().collect();
        assert_eq!(serde_json::to_string(&outputs).unwrap(), "[4,4.0]");
        assert_eq!(outputs.len(), 2);
    }
}
