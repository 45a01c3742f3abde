//! Rule compilation.
//!
//! This module holds the *static* side of the engine: the compiled form of the
//! loaded rules. Loading is split into two phases:
//!
//! 1. **Parse rows** (`ruleset.rs`): strip comments, split fields, produce
//!    `(line, Rule)` pairs.
//! 2. **Compile** (this module): compile every pattern up front so an invalid
//!    pattern fails the load before any transaction is matched, and build the
//!    prefilter (`trigger.rs`).
//!
//! ## Invariants
//!
//! - A rule's position in `RuleSet::rules` is its tie-break rank. Nothing in
//!   this module reorders rules.
//! - `Prefilter` indices are positions in `RuleSet::rules`. The two must stay
//!   aligned.

use super::trigger::Prefilter;
use crate::{Error, Result, Rule};
use regex::Regex;

/// A rule paired with its compiled pattern.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub rule: Rule,
    pub regex: Regex,
    /// 1-based source line, or 0 for learned rules.
    pub line: usize,
}

impl CompiledRule {
    /// Compile `rule`, reporting `line` on failure.
    pub fn new(rule: Rule, line: usize) -> Result<Self> {
        let regex = Regex::new(&rule.pattern).map_err(|source| Error::InvalidPattern {
            line,
            pattern: rule.pattern.clone(),
            source,
        })?;
        Ok(CompiledRule { rule, regex, line })
    }

    pub fn category(&self) -> &str {
        &self.rule.category
    }

    pub fn pattern(&self) -> &str {
        &self.rule.pattern
    }
}

/// The loaded, ordered, immutable rule set.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
    prefilter: Prefilter,
}

impl RuleSet {
    /// Compile `(line, rule)` pairs in order.
    ///
    /// Fails on the first pattern that does not compile.
    pub fn compile(rules: impl IntoIterator<Item = (usize, Rule)>) -> Result<Self> {
        let rules = rules.into_iter().map(|(line, rule)| CompiledRule::new(rule, line)).collect::<Result<Vec<_>>>()?;
        let prefilter = Prefilter::build(rules.iter().map(CompiledRule::pattern));

        tracing::info!(rules = rules.len(), prefilter = prefilter.is_enabled(), "compiled rule set");

        Ok(RuleSet { rules, prefilter })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CompiledRule> {
        self.rules.get(index)
    }

    /// Rules in load order.
    pub fn iter(&self) -> impl Iterator<Item = &CompiledRule> {
        self.rules.iter()
    }

    pub(crate) fn prefilter(&self) -> &Prefilter {
        &self.prefilter
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for rule in &self.rules {
            if !seen.contains(&rule.category()) {
                seen.push(rule.category());
            }
        }
        seen
    }

    /// Patterns grouped by category.
    ///
    /// Categories appear in first-seen order; patterns within a category keep
    /// insertion order.
    pub fn by_category(&self) -> Vec<(&str, Vec<&str>)> {
        let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();
        for rule in &self.rules {
            match groups.iter_mut().find(|(category, _)| *category == rule.category()) {
                Some((_, patterns)) => patterns.push(rule.pattern()),
                None => groups.push((rule.category(), vec![rule.pattern()])),
            }
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(rules: &[(&str, &str)]) -> Vec<(usize, Rule)> {
        rules.iter().enumerate().map(|(i, (c, p))| (i + 1, Rule::new(*c, *p))).collect()
    }

    #[test]
    fn compile_keeps_load_order() {
        let set = RuleSet::compile(numbered(&[("b", "x"), ("a", "y"), ("b", "z")])).unwrap();

        let order: Vec<&str> = set.iter().map(CompiledRule::pattern).collect();
        assert_eq!(order, vec!["x", "y", "z"]);
        assert_eq!(set.get(2).unwrap().line, 3);
    }

    #[test]
    fn compile_reports_invalid_pattern_line() {
        let err = RuleSet::compile(numbered(&[("ok", "fine"), ("bad", "(unclosed")])).unwrap_err();

        match err {
            Error::InvalidPattern { line, pattern, .. } => {
                assert_eq!(line, 2);
                assert_eq!(pattern, "(unclosed");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn groups_patterns_by_category_in_first_seen_order() {
        let set = RuleSet::compile(numbered(&[("food", "cafe"), ("fuel", "bp"), ("food", "deli")])).unwrap();

        assert_eq!(set.by_category(), vec![("food", vec!["cafe", "deli"]), ("fuel", vec!["bp"])]);
        assert_eq!(set.categories(), vec!["food", "fuel"]);
    }
}
