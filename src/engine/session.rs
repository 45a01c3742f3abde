//! Per-run driver state.
//!
//! A `Session` owns everything that changes during a run (the learned rules,
//! the metrics, the prompter) and borrows everything that does not (the loaded
//! rules, the options). `api::run` feeds it one transaction at a time.
//!
//! ```text
//! Transaction ── match_merchant(rules, learned) ──┬─ Resolved   -> category replaced
//!                                                 │               (+ history field)
//!                                                 └─ Unresolved -> prompt (optional)
//!                                                                 learn + push
//!                                                                 emitted unchanged
//! ```

use super::{LearnedRules, RuleLearner, RuleSet, RunMetrics, match_merchant};
use crate::{MatchResult, Options, Prompter, Result, RuleOrigin, Transaction};
use std::time::Instant;

/// A processed transaction ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Emitted {
    pub transaction: Transaction,
    /// Original category, present only for resolved rows in history mode.
    pub history: Option<String>,
}

impl Emitted {
    pub fn to_row(&self, delimiter: char) -> String {
        let mut row = self.transaction.to_row(delimiter);
        if let Some(history) = &self.history {
            row.push(delimiter);
            row.push_str(history);
        }
        row
    }
}

pub(crate) struct Session<'a, P> {
    rules: &'a RuleSet,
    options: &'a Options,
    learner: RuleLearner,
    learned: LearnedRules,
    prompter: P,
    metrics: RunMetrics,
    started: Instant,
}

impl<'a, P: Prompter> Session<'a, P> {
    pub fn new(rules: &'a RuleSet, options: &'a Options, prompter: P) -> Self {
        Session {
            rules,
            options,
            learner: RuleLearner::new(options.sentinel_category.clone(), [options.comment_marker, options.delimiter]),
            learned: LearnedRules::new(),
            prompter,
            metrics: RunMetrics::for_rules(rules.len()),
            started: Instant::now(),
        }
    }

    /// Classify one transaction, learning a rule if nothing matches.
    pub fn process(&mut self, mut transaction: Transaction) -> Result<Emitted> {
        self.metrics.transactions += 1;

        match match_merchant(&transaction.merchant, self.rules, &self.learned) {
            MatchResult::Resolved { category, length, origin, index, .. } => {
                tracing::debug!(merchant = %transaction.merchant, %category, length, ?origin, index, "resolved");

                match origin {
                    RuleOrigin::Loaded => {
                        self.metrics.resolved_loaded += 1;
                        if let Some(hits) = self.metrics.rule_hits.get_mut(index) {
                            *hits += 1;
                        }
                    }
                    RuleOrigin::Learned => self.metrics.resolved_learned += 1,
                }

                let original = std::mem::replace(&mut transaction.category, category);
                let history = self.options.include_history.then(|| {
                    if original.is_empty() { self.options.empty_history_label.clone() } else { original }
                });

                Ok(Emitted { transaction, history })
            }
            MatchResult::Unresolved => {
                self.metrics.unresolved += 1;

                let categories = self.rules.categories();
                let selection = self.prompter.select(&transaction.merchant, &categories)?;
                if let Some(chosen) = selection.and_then(|i| categories.get(i)) {
                    // The learned rule keeps the sentinel; the choice is only reported.
                    tracing::info!(merchant = %transaction.merchant, chosen, "category selected (not applied)");
                }

                let rule = self.learner.learn(&transaction.merchant);
                tracing::debug!(merchant = %transaction.merchant, pattern = %rule.pattern, "unresolved, learning rule");
                if self.learned.push(rule)? {
                    self.metrics.learned += 1;
                }

                Ok(Emitted { transaction, history: None })
            }
        }
    }

    pub fn finish(mut self) -> (LearnedRules, RunMetrics) {
        self.metrics.total = self.started.elapsed();
        (self.learned, self.metrics)
    }
}
