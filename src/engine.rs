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

//! Math expression engine - the main entry point for evaluation

use crate::ast::ExpressionNode;
use crate::config::EvaluatorConfig;
use crate::error::{ExpressionError, Result};
use crate::evaluator::{ExpressionResult, Interpreter, Namespace, normalize};
use crate::model::Value;
use crate::parser::parse_with_max_depth;
use crate::screening::{DenyList, standard_deny_list};
use lru::LruCache;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Longest expression prefix written to the log
const LOG_PREVIEW_CHARS: usize = 120;

/// Screens, parses and evaluates math expressions
///
/// Parsed expressions are kept in an LRU cache keyed by source text. The
/// cache only holds immutable trees and never changes a result; every
/// evaluation still builds its own namespace.
pub struct MathExpressionEngine {
    config: EvaluatorConfig,
    deny_list: DenyList,
    expression_cache: Option<Mutex<LruCache<String, Arc<ExpressionNode>>>>,
}

impl std::fmt::Debug for MathExpressionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MathExpressionEngine")
            .field("config", &self.config)
            .field("deny_rules", &self.deny_list.rules().len())
            .field("cached_expressions", &self.cached_expressions())
            .finish()
    }
}

impl Default for MathExpressionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MathExpressionEngine {
    /// Engine with the default configuration
    pub fn new() -> Self {
        Self::with_config(EvaluatorConfig::default())
    }

    /// Engine with a custom configuration
    pub fn with_config(config: EvaluatorConfig) -> Self {
        let expression_cache =
            NonZeroUsize::new(config.cache_capacity).map(|capacity| Mutex::new(LruCache::new(capacity)));
        Self {
            config,
            deny_list: standard_deny_list().clone(),
            expression_cache,
        }
    }

    /// Replace the deny list
    pub fn with_deny_list(mut self, deny_list: DenyList) -> Self {
        self.deny_list = deny_list;
        self.clear_cache();
        self
    }

    /// Active configuration
    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Active deny list
    pub fn deny_list(&self) -> &DenyList {
        &self.deny_list
    }

    /// Number of parsed expressions currently cached
    pub fn cached_expressions(&self) -> usize {
        self.expression_cache
            .as_ref()
            .map_or(0, |cache| cache.lock().len())
    }

    /// Drop every cached expression
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.expression_cache {
            cache.lock().clear();
        }
    }

    /// Length and deny-list checks applied before parsing
    pub fn screen(&self, expression: &str) -> Result<()> {
        if expression.len() > self.config.max_expression_length {
            return Err(ExpressionError::TooLong {
                length: expression.len(),
                max_length: self.config.max_expression_length,
            });
        }
        self.deny_list.check(expression)?;
        Ok(())
    }

    /// Screen and parse `expression`, using the cache when possible
    pub fn compile(&self, expression: &str) -> Result<Arc<ExpressionNode>> {
        if let Some(cache) = &self.expression_cache {
            if let Some(ast) = cache.lock().get(expression) {
                log::debug!("expression cache hit for {:?}", preview(expression));
                return Ok(Arc::clone(ast));
            }
        }

        self.screen(expression)?;
        let ast = Arc::new(parse_with_max_depth(
            expression,
            self.config.max_nesting_depth,
        )?);
        log::trace!("parsed {:?} as {}", preview(expression), ast);

        if let Some(cache) = &self.expression_cache {
            cache.lock().put(expression.to_string(), Arc::clone(&ast));
            log::debug!("cached parsed expression {:?}", preview(expression));
        }
        Ok(ast)
    }

    /// Evaluate to the raw value, before normalisation
    pub fn evaluate_value(&self, a: f64, b: f64, c: f64, expression: &str) -> Result<Value> {
        let ast = self.compile(expression)?;
        let mut interpreter = Interpreter::with_limits(
            Namespace::new(a, b, c),
            self.config.evaluation_context(),
            self.config.max_evaluation_depth,
        );
        Ok(interpreter.evaluate(&ast)?)
    }

    /// Evaluate and normalise, reporting failures
    pub fn try_evaluate(&self, a: f64, b: f64, c: f64, expression: &str) -> Result<ExpressionResult> {
        let value = self.evaluate_value(a, b, c, expression)?;
        Ok(normalize(value)?)
    }

    /// Evaluate and normalise; every failure yields `(0, 0.0)`
    pub fn evaluate(&self, a: f64, b: f64, c: f64, expression: &str) -> ExpressionResult {
        match self.try_evaluate(a, b, c, expression) {
            Ok(result) => result,
            Err(err) => {
                match &err {
                    ExpressionError::TooLong { .. } | ExpressionError::Screening(_) => {
                        log::warn!("math expression {:?} rejected: {}", preview(expression), err)
                    }
                    _ => log::warn!(
                        "math expression {:?} failed with a={a}, b={b}, c={c}: {}",
                        preview(expression),
                        err
                    ),
                }
                ExpressionResult::ZERO
            }
        }
    }
}

fn preview(expression: &str) -> &str {
    match expression.char_indices().nth(LOG_PREVIEW_CHARS) {
        Some((end, _)) => &expression[..end],
        None => expression,
    }
}

static DEFAULT_ENGINE: Lazy<MathExpressionEngine> = Lazy::new(MathExpressionEngine::new);

/// Shared engine with the default configuration
pub fn default_engine() -> &'static MathExpressionEngine {
    &DEFAULT_ENGINE
}

/// Evaluate `expression` with `a`, `b` and `c` bound, returning `(int, float)`
///
/// Never fails: rejected or failing expressions yield `(0, 0.0)` and are
/// logged at warn level.
pub fn evaluate(a: f64, b: f64, c: f64, expression: &str) -> (i64, f64) {
    default_engine().evaluate(a, b, c, expression).into_pair()
}

/// Fallible counterpart of [`evaluate`]
pub fn try_evaluate(a: f64, b: f64, c: f64, expression: &str) -> Result<ExpressionResult> {
    default_engine().try_evaluate(a, b, c, expression)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;
    use crate::screening::DenyRule;

    #[test]
    fn test_basic_evaluation() {
        assert_eq!(evaluate(10.0, 5.0, 3.0, "a + b + c"), (18, 18.0));
        assert_eq!(evaluate(20.0, 4.0, 2.0, "a / b / c"), (2, 2.5));
        assert_eq!(evaluate(16.0, 0.0, 0.0, "sqrt(a)"), (4, 4.0));
    }

    #[test]
    fn test_failures_yield_zero() {
        assert_eq!(evaluate(10.0, 0.0, 0.0, "a / b"), (0, 0.0));
        assert_eq!(evaluate(1.0, 2.0, 3.0, "import os"), (0, 0.0));
        assert_eq!(evaluate(1.0, 2.0, 3.0, "a +"), (0, 0.0));
    }

    #[test]
    fn test_error_categories() {
        let err = try_evaluate(1.0, 2.0, 3.0, "eval('1+1')").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::RejectedSyntax);
        let err = try_evaluate(1.0, 2.0, 3.0, "a +* b").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::EvaluationError);
    }

    #[test]
    fn test_length_limit() {
        let engine =
            MathExpressionEngine::with_config(EvaluatorConfig::default().with_max_expression_length(8));
        assert!(matches!(
            engine.try_evaluate(0.0, 0.0, 0.0, "1 + 2 + 3 + 4"),
            Err(ExpressionError::TooLong { length: 13, max_length: 8 })
        ));
        assert_eq!(engine.evaluate(0.0, 0.0, 0.0, "1 + 2"), ExpressionResult::from_float(3.0));
    }

    #[test]
    fn test_cache() {
        let engine = MathExpressionEngine::with_config(EvaluatorConfig::default().with_cache_capacity(2));
        engine.evaluate(1.0, 0.0, 0.0, "a + 1");
        engine.evaluate(2.0, 0.0, 0.0, "a + 1");
        assert_eq!(engine.cached_expressions(), 1);
        engine.evaluate(1.0, 0.0, 0.0, "a + 2");
        engine.evaluate(1.0, 0.0, 0.0, "a + 3");
        assert_eq!(engine.cached_expressions(), 2);
        assert_eq!(engine.evaluate(5.0, 0.0, 0.0, "a + 1"), ExpressionResult::from_float(6.0));

        let uncached = MathExpressionEngine::with_config(EvaluatorConfig::no_cache());
        uncached.evaluate(1.0, 0.0, 0.0, "a + 1");
        assert_eq!(uncached.cached_expressions(), 0);
    }

    #[test]
    fn test_custom_deny_list() {
        let engine = MathExpressionEngine::new().with_deny_list(
            DenyList::new(vec![DenyRule::new("factorial", "cost", r"\bfactorial\s*\(")]).unwrap(),
        );
        assert!(matches!(
            engine.try_evaluate(5.0, 0.0, 0.0, "factorial(a)"),
            Err(ExpressionError::Screening(_))
        ));
        assert_eq!(engine.evaluate(5.0, 0.0, 0.0, "a * 2"), ExpressionResult::from_float(10.0));
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let long = "é".repeat(200);
        assert_eq!(preview(&long).chars().count(), LOG_PREVIEW_CHARS);
        assert_eq!(preview("a + b"), "a + b");
    }
}
