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

//! Evaluator configuration

use crate::evaluator::DEFAULT_MAX_EVALUATION_DEPTH;
use crate::parser::DEFAULT_MAX_DEPTH;
use crate::registry::EvaluationContext;
use serde::{Deserialize, Serialize};

/// Limits and caching behaviour of a [`MathExpressionEngine`]
///
/// [`MathExpressionEngine`]: crate::engine::MathExpressionEngine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Longest accepted source, in bytes
    pub max_expression_length: usize,

    /// Deepest accepted parenthesis/operator nesting while parsing
    pub max_nesting_depth: usize,

    /// Deepest expression tree the interpreter walks
    pub max_evaluation_depth: usize,

    /// Largest argument accepted by `factorial`
    pub max_factorial_argument: u64,

    /// Number of parsed expressions kept; 0 disables the cache
    pub cache_capacity: usize,
}

impl EvaluatorConfig {
    /// Tighter limits for untrusted, interactive input
    pub fn strict() -> Self {
        Self {
            max_expression_length: 512,
            max_nesting_depth: 32,
            max_evaluation_depth: 128,
            max_factorial_argument: 20,
            cache_capacity: 128,
        }
    }

    /// Default limits without the parse cache
    pub fn no_cache() -> Self {
        Self {
            cache_capacity: 0,
            ..Self::default()
        }
    }

    /// Parse a JSON document; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Set the source length limit
    pub fn with_max_expression_length(mut self, max_expression_length: usize) -> Self {
        self.max_expression_length = max_expression_length;
        self
    }

    /// Set the parser nesting limit
    pub fn with_max_nesting_depth(mut self, max_nesting_depth: usize) -> Self {
        self.max_nesting_depth = max_nesting_depth;
        self
    }

    /// Set the interpreter depth limit
    pub fn with_max_evaluation_depth(mut self, max_evaluation_depth: usize) -> Self {
        self.max_evaluation_depth = max_evaluation_depth;
        self
    }

    /// Set the `factorial` argument limit
    pub fn with_max_factorial_argument(mut self, max_factorial_argument: u64) -> Self {
        self.max_factorial_argument = max_factorial_argument;
        self
    }

    /// Set the parse cache capacity
    pub fn with_cache_capacity(mut self, cache_capacity: usize) -> Self {
        self.cache_capacity = cache_capacity;
        self
    }

    /// Function context derived from these limits
    pub fn evaluation_context(&self) -> EvaluationContext {
        EvaluationContext {
            max_factorial_argument: self.max_factorial_argument,
        }
    }
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            max_expression_length: 4096,
            max_nesting_depth: DEFAULT_MAX_DEPTH,
            max_evaluation_depth: DEFAULT_MAX_EVALUATION_DEPTH,
            max_factorial_argument: 170,
            cache_capacity: 256,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default() {
        let config = EvaluatorConfig::default();
        assert_eq!(config.max_expression_length, 4096);
        assert_eq!(config.max_nesting_depth, 200);
        assert_eq!(config.max_factorial_argument, 170);
        assert_eq!(config.evaluation_context(), EvaluationContext::default());
    }

    #[test]
    fn test_presets_and_builders() {
        assert_eq!(EvaluatorConfig::no_cache().cache_capacity, 0);
        assert!(EvaluatorConfig::strict().max_nesting_depth < EvaluatorConfig::default().max_nesting_depth);

        let config = EvaluatorConfig::default()
            .with_max_expression_length(64)
            .with_cache_capacity(4)
            .with_max_factorial_argument(10);
        assert_eq!(config.max_expression_length, 64);
        assert_eq!(config.cache_capacity, 4);
        assert_eq!(config.evaluation_context().max_factorial_argument, 10);
    }

    #[test]
    fn test_json() {
        let config = EvaluatorConfig::from_json_str(r#"{"cache_capacity": 0, "max_nesting_depth": 50}"#)
            .unwrap();
        assert_eq!(
            config,
            EvaluatorConfig::default()
                .with_cache_capacity(0)
                .with_max_nesting_depth(50)
        );

        let round_trip = serde_json::to_string(&EvaluatorConfig::strict()).unwrap();
        assert_eq!(
            EvaluatorConfig::from_json_str(&round_trip).unwrap(),
            EvaluatorConfig::strict()
        );
        assert!(EvaluatorConfig::from_json_str("{\"cache_capacity\": -1}").is_err());
    }
}
