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

//! Registry of the package's nodes

use super::descriptor::NodeDescriptor;
use super::error::{NodeError, NodeResult};
use super::image::{PopoImageAspectRatioNode, PopoImageDimensionsNode, PopoImageSizeNode};
use super::math::PopoMathExpressionNode;
use super::value::{NodeInputs, NodeOutputs};
use super::Node;
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Nodes keyed by class name, kept in registration order
#[derive(Default, Clone)]
pub struct NodeRegistry {
    nodes: Vec<Arc<dyn Node>>,
    index: FxHashMap<String, usize>,
}

impl NodeRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the four package nodes
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(PopoImageSizeNode);
        registry.register(PopoImageDimensionsNode);
        registry.register(PopoImageAspectRatioNode);
        registry.register(PopoMathExpressionNode::new());
        registry
    }

    /// Register a node, replacing any node with the same class name
    pub fn register(&mut self, node: impl Node + 'static) {
        let node: Arc<dyn Node> = Arc::new(node);
        let class_name = node.class_name().to_string();
        match self.index.get(&class_name) {
            Some(&slot) => self.nodes[slot] = node,
            None => {
                self.index.insert(class_name, self.nodes.len());
                self.nodes.push(node);
            }
        }
    }

    /// Node registered under `class_name`
    pub fn get(&self, class_name: &str) -> Option<&Arc<dyn Node>> {
        self.index.get(class_name).map(|&slot| &self.nodes[slot])
    }

    /// Display name of the node registered under `class_name`
    pub fn display_name(&self, class_name: &str) -> Option<&str> {
        self.get(class_name)
            .map(|node| node.descriptor().display_name.as_str())
    }

    /// `(class_name, display_name)` pairs in registration order
    pub fn display_name_mappings(&self) -> Vec<(&str, &str)> {
        self.iter()
            .map(|node| {
                let descriptor = node.descriptor();
                (descriptor.class_name.as_str(), descriptor.display_name.as_str())
            })
            .collect()
    }

    /// Nodes in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Node>> {
        self.nodes.iter()
    }

    /// Descriptors in registration order
    pub fn descriptors(&self) -> Vec<&NodeDescriptor> {
        self.iter().map(|node| node.descriptor()).collect()
    }

    /// Number of registered nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no node is registered
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Invoke the node registered under `class_name`
    pub fn invoke(&self, class_name: &str, inputs: &NodeInputs) -> NodeResult<NodeOutputs> {
        let node = self.get(class_name).ok_or_else(|| NodeError::UnknownNode {
            class_name: class_name.to_string(),
        })?;
        log::debug!("Invoking node {class_name}");
        node.invoke(inputs)
    }
}

impl std::fmt::Debug for NodeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRegistry")
            .field("nodes", &self.index.keys().collect::<Vec<_>>())
            .finish()
    }
}

static STANDARD_NODE_REGISTRY: Lazy<NodeRegistry> = Lazy::new(NodeRegistry::standard);

/// Shared registry of the package nodes
pub fn standard_node_registry() -> &'static NodeRegistry {
    &STANDARD_NODE_REGISTRY
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{ImageShape, NodeValue};

    #[test]
    fn test_standard_mappings() {
        let registry = standard_node_registry();
        assert_eq!(registry.len(), 4);
        assert_eq!(
            registry.display_name_mappings(),
            vec![
                ("PopoImageSizeNode", "Popo Image Size"),
                ("PopoImageDimensionsNode", "Popo Image Dimensions"),
                ("PopoImageAspectRatioNode", "Popo Image Aspect Ratio"),
                ("PopoMathExpressionNode", "Popo Math Expression"),
            ]
        );
        assert!(
            registry
                .descriptors()
                .iter()
                .all(|descriptor| descriptor.category == "popo-utility")
        );
    }

    #[test]
    fn test_invoke_by_class_name() {
        let registry = standard_node_registry();
        let inputs = NodeInputs::new().with("image", ImageShape::new([1, 512, 768, 3]));
        let outputs = registry.invoke("PopoImageSizeNode", &inputs).unwrap();
        assert_eq!(outputs.values(), &[NodeValue::Int(768), NodeValue::Int(512)]);

        assert_eq!(
            registry.invoke("PopoBlurNode", &inputs),
            Err(NodeError::UnknownNode {
                class_name: "PopoBlurNode".to_string()
            })
        );
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = NodeRegistry::standard();
        registry.register(PopoMathExpressionNode::new());
        assert_eq!(registry.len(), 4);
        assert_eq!(
            registry.display_name("PopoMathExpressionNode"),
            Some("Popo Math Expression")
        );
    }
}
