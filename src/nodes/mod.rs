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

//! Workflow nodes of the `popo-utility` package
//!
//! Each node publishes a [`NodeDescriptor`] (inputs, outputs, display name and
//! entry point) and can be invoked with named [`NodeInputs`]. The
//! [`NodeRegistry`] maps class names to nodes the way a workflow host expects.

pub mod descriptor;
pub mod error;
pub mod image;
pub mod math;
pub mod registry;
pub mod value;

pub use descriptor::{InputField, InputKind, NODE_CATEGORY, NodeDescriptor, OutputField, OutputKind};
pub use error::{NodeError, NodeResult};
pub use image::{
    COMMON_RATIOS, INVALID_RATIO_NAME, ImageDimensions, ImageShape, PopoImageAspectRatioNode,
    PopoImageDimensionsNode, PopoImageSizeNode, RATIO_TOLERANCE, ratio_name,
};
pub use math::PopoMathExpressionNode;
pub use registry::{NodeRegistry, standard_node_registry};
pub use value::{NodeInputs, NodeOutputs, NodeValue};

/// A node a workflow host can present and invoke
pub trait Node: Send + Sync {
    /// Static description of the node
    fn descriptor(&self) -> &NodeDescriptor;

    /// Run the node on named inputs
    fn invoke(&self, inputs: &NodeInputs) -> NodeResult<NodeOutputs>;

    /// Registration key
    fn class_name(&self) -> &str {
        &self.descriptor().class_name
    }
}
