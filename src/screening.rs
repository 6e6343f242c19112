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

//! Textual pre-check that refuses expressions containing dangerous syntax
//!
//! The restricted grammar already rejects everything listed here; the deny
//! list runs first so that such expressions are refused (and logged) by the
//! rule they match rather than as plain syntax errors.

use once_cell::sync::Lazy;
use regex::{RegexSet, RegexSetBuilder};
use serde::Serialize;
use thiserror::Error;

/// Screening errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScreeningError {
    /// Expression matched a deny rule
    #[error("expression rejected by deny rule '{rule}' ({category})")]
    Rejected {
        /// Rule name
        rule: String,
        /// Rule category
        category: String,
        /// Regular expression that matched
        pattern: String,
    },
}

/// A named deny pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DenyRule {
    /// Rule name
    pub name: String,
    /// What the rule guards against
    pub category: String,
    /// Regular expression, matched case-insensitively
    pub pattern: String,
}

impl DenyRule {
    /// Create a rule
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        pattern: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            pattern: pattern.into(),
        }
    }

    fn call(name: &str, category: &str) -> Self {
        Self::new(name, category, format!(r"\b{name}\s*\("))
    }
}

fn standard_rules() -> Vec<DenyRule> {
    let mut rules = vec![
        DenyRule::new("import", "module import", r"\bimport\b"),
        DenyRule::new("dunder", "dunder identifier", r"__.*__"),
    ];
    let calls: [(&str, &[&str]); 5] = [
        ("code execution", &["eval", "exec"]),
        ("file access", &["open", "file"]),
        ("interactive input", &["input", "raw_input"]),
        ("dynamic compilation", &["compile"]),
        (
            "reflection",
            &[
                "globals",
                "locals",
                "vars",
                "dir",
                "getattr",
                "setattr",
                "hasattr",
                "delattr",
                "type",
                "isinstance",
                "issubclass",
                "classmethod",
                "staticmethod",
                "property",
                "super",
            ],
        ),
    ];
    for (category, names) in calls {
        rules.extend(names.iter().map(|name| DenyRule::call(name, category)));
    }
    rules
}

/// Compiled set of deny rules
#[derive(Debug, Clone)]
pub struct DenyList {
    rules: Vec<DenyRule>,
    set: RegexSet,
}

impl DenyList {
    /// Compile `rules`
    pub fn new(rules: Vec<DenyRule>) -> Result<Self, regex::Error> {
        let set = RegexSetBuilder::new(rules.iter().map(|rule| rule.pattern.as_str()))
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()?;
        Ok(Self { rules, set })
    }

    /// Rules in match priority order
    pub fn rules(&self) -> &[DenyRule] {
        &self.rules
    }

    /// First rule matching `expression`, if any
    pub fn find_match(&self, expression: &str) -> Option<&DenyRule> {
        self.set
            .matches(expression)
            .iter()
            .next()
            .and_then(|index| self.rules.get(index))
    }

    /// Refuse `expression` if any rule matches
    pub fn check(&self, expression: &str) -> Result<(), ScreeningError> {
        match self.find_match(expression) {
            Some(rule) => Err(ScreeningError::Rejected {
                rule: rule.name.clone(),
                category: rule.category.clone(),
                pattern: rule.pattern.clone(),
            }),
            None => Ok(()),
        }
    }
}

static STANDARD_DENY_LIST: Lazy<DenyList> = Lazy::new(|| {
    DenyList::new(standard_rules()).expect("built-in deny patterns are valid regular expressions")
});

/// Shared deny list with the built-in rules
pub fn standard_deny_list() -> &'static DenyList {
    &STANDARD_DENY_LIST
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("import os", "import")]
    #[case("IMPORT os", "import")]
    #[case("__import__('os')", "dunder")]
    #[case("a.__class__", "dunder")]
    #[case("eval('1+1')", "eval")]
    #[case("exec ('print(1)')", "exec")]
    #[case("open('file.txt')", "open")]
    #[case("Globals()", "globals")]
    #[case("locals()", "locals")]
    #[case("getattr(a, 'x')", "getattr")]
    #[case("type(a)", "type")]
    #[case("super()", "super")]
    #[case("raw_input()", "raw_input")]
    fn test_rejects(#[case] expression: &str, #[case] rule: &str) {
        match standard_deny_list().check(expression) {
            Err(ScreeningError::Rejected { rule: matched, .. }) => assert_eq!(matched, rule),
            Ok(()) => panic!("{expression} was not rejected"),
        }
    }

    #[rstest]
    #[case("a + b + c")]
    #[case("sqrt(a*a + b*b)")]
    #[case("max(a, b, c)")]
    #[case("a_b + important")]
    #[case("typed + 1")]
    fn test_accepts(#[case] expression: &str) {
        assert_eq!(standard_deny_list().check(expression), Ok(()));
    }

    #[test]
    fn test_custom_rules() {
        let list = DenyList::new(vec![DenyRule::new("power", "cost", r"\*\*")]).unwrap();
        assert!(list.check("2 ** 8").is_err());
        assert!(list.check("2 * 8").is_ok());
        assert!(DenyList::new(vec![DenyRule::new("bad", "x", "(")]).is_err());
    }

    #[test]
    fn test_rule_inventory() {
        let names: Vec<&str> = standard_deny_list()
            .rules()
            .iter()
            .map(|rule| rule.name.as_str())
            .collect();
        assert_eq!(names.len(), 24);
        assert_eq!(&names[..3], &["import", "dunder", "eval"]);
    }
}
