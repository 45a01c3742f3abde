//! Prefilter scanning (candidate selection).
//!
//! Before the matcher asks each loaded rule for its match span, the merchant
//! text is scanned once with a `RegexSet` built from every loaded pattern. The
//! set reports which patterns match *anywhere* in the text, which is exactly
//! the condition under which a rule can take part in resolution, so the
//! matcher only computes spans for those.
//!
//! ## Design notes
//!
//! - Candidates come back in ascending rule order, so tie-breaking is not
//!   affected by the prefilter.
//! - The set can fail to build even when every pattern compiled on its own
//!   (the combined program may exceed the engine's size limit). In that case the
//!   prefilter is disabled and every rule is a candidate.
//! - Learned rules are never part of the set; they grow during a run and are
//!   checked directly by the matcher.

use regex::RegexSet;

/// Combined pattern set for the loaded rules.
#[derive(Debug, Clone, Default)]
pub struct Prefilter {
    set: Option<RegexSet>,
}

impl Prefilter {
    /// Build a prefilter over `patterns`, in rule order.
    pub fn build<'a>(patterns: impl IntoIterator<Item = &'a str>) -> Self {
        match RegexSet::new(patterns) {
            Ok(set) => Prefilter { set: Some(set) },
            Err(err) => {
                tracing::warn!("prefilter disabled, falling back to scanning every rule: {err}");
                Prefilter { set: None }
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.set.is_some()
    }

    /// Indices of the rules (out of `rule_count`) that may match `text`, ascending.
    pub fn scan(&self, text: &str, rule_count: usize) -> Vec<usize> {
        match &self.set {
            Some(set) => set.matches(text).into_iter().collect(),
            None => (0..rule_count).collect(),
        }
    }
}
