//! Run metrics.
//!
//! Counters collected by a `Session` while it processes transactions. They are
//! cheap (a handful of integers plus one counter per loaded rule) and always
//! on; the CLI renders them with `--summary`.

use std::time::Duration;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunMetrics {
    /// Total elapsed time for the run.
    pub total: Duration,
    /// Transactions processed.
    pub transactions: usize,
    /// Transactions resolved by a loaded rule.
    pub resolved_loaded: usize,
    /// Transactions resolved by a rule learned earlier in the run.
    pub resolved_learned: usize,
    /// Transactions no rule matched.
    pub unresolved: usize,
    /// Rules learned (one per distinct unresolved merchant).
    pub learned: usize,
    /// Winning-match count per loaded rule, aligned with the rule set.
    pub rule_hits: Vec<usize>,
}

impl RunMetrics {
    pub(crate) fn for_rules(rule_count: usize) -> Self {
        RunMetrics { rule_hits: vec![0; rule_count], ..Default::default() }
    }

    pub fn resolved(&self) -> usize {
        self.resolved_loaded + self.resolved_learned
    }

    /// Indices of loaded rules that never won a match.
    pub fn unused_rules(&self) -> Vec<usize> {
        self.rule_hits.iter().enumerate().filter(|(_, hits)| **hits == 0).map(|(i, _)| i).collect()
    }

    /// The `n` loaded rules with the most hits, most hits first, ties in rule order.
    pub fn top_rules(&self, n: usize) -> Vec<(usize, usize)> {
        let mut ranked: Vec<(usize, usize)> =
            self.rule_hits.iter().copied().enumerate().filter(|(_, hits)| *hits > 0).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.truncate(n);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_rules_orders_by_hits_then_rule_order() {
        let metrics = RunMetrics { rule_hits: vec![2, 0, 5, 2], ..Default::default() };

        assert_eq!(metrics.top_rules(3), vec![(2, 5), (0, 2), (3, 2)]);
        assert_eq!(metrics.unused_rules(), vec![1]);
    }
}
