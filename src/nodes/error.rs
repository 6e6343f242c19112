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

//! Node error types

use thiserror::Error;

/// Result type for node invocation
pub type NodeResult<T> = Result<T, NodeError>;

/// Errors raised while invoking nodes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    /// Required input not supplied
    #[error("node '{node}' is missing input '{input}'")]
    MissingInput {
        /// Node class name
        node: String,
        /// Input name
        input: String,
    },

    /// Input supplied with the wrong kind
    #[error("node '{node}' input '{input}' expects {expected}, got {actual}")]
    InputType {
        /// Node class name
        node: String,
        /// Input name
        input: String,
        /// Expected kind
        expected: &'static str,
        /// Supplied kind
        actual: &'static str,
    },

    /// No node registered under the class name
    #[error("unknown node class '{class_name}'")]
    UnknownNode {
        /// Requested class name
        class_name: String,
    },
}
