//! The append-only list of rules learned during one run.
//!
//! Learned patterns are anchored, escaped literals, so two learned rules with
//! the same pattern were learned from the same merchant text. The list keeps a
//! set of the patterns it holds and refuses to append one twice.
//!
//! The driver never relies on that refusal: a merchant that already produced a
//! learned rule resolves against it in the matcher and is not learned again.
//! The set is the backstop for callers that push without matching first.

use super::CompiledRule;
use crate::{Result, Rule};
use std::collections::HashSet;

/// Rules learned so far in a run, in learning order.
#[derive(Debug, Clone, Default)]
pub struct LearnedRules {
    rules: Vec<CompiledRule>,
    seen: HashSet<String>,
}

impl LearnedRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `rule` unless a rule with the same pattern is already present.
    ///
    /// Returns whether the rule was appended.
    pub fn push(&mut self, rule: Rule) -> Result<bool> {
        if self.seen.contains(&rule.pattern) {
            tracing::warn!(pattern = %rule.pattern, "ignoring duplicate learned rule");
            return Ok(false);
        }

        let compiled = CompiledRule::new(rule, 0)?;
        self.seen.insert(compiled.rule.pattern.clone());
        self.rules.push(compiled);
        Ok(true)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompiledRule> {
        self.rules.iter()
    }

    /// The learned rules, in learning order.
    pub fn rules(&self) -> Vec<Rule> {
        self.rules.iter().map(|r| r.rule.clone()).collect()
    }

    pub fn into_rules(self) -> Vec<Rule> {
        self.rules.into_iter().map(|r| r.rule).collect()
    }
}
