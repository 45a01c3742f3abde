#[macro_use]
mod macros;
mod api;
mod engine;
mod error;
mod prompt;
mod ruleset;
mod transaction;

#[cfg(test)]
mod tests;

pub use api::{Options, RunReport, classify, load_rules, load_rules_from_path, load_rules_from_reader, run};
pub use engine::{
    CompiledRule, DEFAULT_SENTINEL, LearnedRules, RuleLearner, RuleSet, RunMetrics, exact_pattern, match_merchant,
};
pub use error::{Error, Result};
pub use prompt::{NoPrompt, Prompter, TerminalPrompter};
pub use transaction::Transaction;

// --- Core types ---------------------------------------------------------------

/// A categorization rule: a category label and the regex pattern that selects it.
///
/// Loaded patterns are unanchored and searched anywhere in the merchant text.
/// Learned patterns are anchored literals (see [`RuleLearner`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    pub category: String,
    pub pattern: String,
}

impl Rule {
    pub fn new(category: impl Into<String>, pattern: impl Into<String>) -> Self {
        Rule { category: category.into(), pattern: pattern.into() }
    }
}

/// Where the rule behind a resolution came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleOrigin {
    /// Loaded from the rule file, in file order.
    Loaded,
    /// Synthesized earlier in the same run.
    Learned,
}

/// Byte offsets of a match inside the merchant text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Start byte index (inclusive).
    pub start: usize,
    /// End byte index (exclusive).
    pub end: usize,
}

/// Outcome of matching one merchant text against the rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    Resolved {
        category: String,
        /// Length of the matched substring in characters.
        length: usize,
        span: Span,
        origin: RuleOrigin,
        /// Index of the winning rule within its origin (loaded or learned list).
        index: usize,
    },
    Unresolved,
}

impl MatchResult {
    pub fn category(&self) -> Option<&str> {
        match self {
            MatchResult::Resolved { category, .. } => Some(category),
            MatchResult::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, MatchResult::Resolved { .. })
    }
}
