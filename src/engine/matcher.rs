//! Longest-match resolution.
//!
//! This is the operational core of the engine. For one merchant text:
//!
//! - Ask the prefilter which loaded rules can match at all (`trigger.rs`).
//! - Compute the leftmost match of each candidate, then of every learned rule.
//! - Keep the match with the greatest length; on equal lengths keep the one
//!   seen first.
//!
//! ```text
//! rules:    [A: "foo", B: "foobar", C: ".*"]   learned: [interactive: "^x$"]
//! text:     "foobar store"
//!
//! A  0..3   len 3
//! B  0..6   len 6   <- best so far
//! C  0..12  len 12  <- winner
//! ```
//!
//! Length is counted in characters of the matched substring, not bytes, so a
//! non-ASCII merchant name does not outrank an ASCII one of the same visible
//! length.
//!
//! Matching is search-anywhere: a pattern does not have to match at the start
//! of the text, and the span reported is that of the leftmost match.

use super::{LearnedRules, RuleSet};
use crate::{MatchResult, RuleOrigin, Span};

/// Best match found so far while scanning rules.
struct Candidate<'r> {
    category: &'r str,
    length: usize,
    span: Span,
    origin: RuleOrigin,
    index: usize,
}

/// Resolve `text` against `rules` followed by `learned`.
///
/// Pure: the same arguments always give the same result.
pub fn match_merchant(text: &str, rules: &RuleSet, learned: &LearnedRules) -> MatchResult {
    let loaded = rules
        .prefilter()
        .scan(text, rules.len())
        .into_iter()
        .filter_map(|index| rules.get(index).map(|rule| (RuleOrigin::Loaded, index, rule)));
    let learned = learned.iter().enumerate().map(|(index, rule)| (RuleOrigin::Learned, index, rule));

    let mut best: Option<Candidate> = None;

    for (origin, index, rule) in loaded.chain(learned) {
        let Some(m) = rule.regex.find(text) else {
            continue;
        };
        let length = m.as_str().chars().count();

        tracing::trace!(
            category = rule.category(),
            pattern = rule.pattern(),
            ?origin,
            start = m.start(),
            end = m.end(),
            length,
            "rule matched"
        );

        // Strictly greater: an equal length never displaces an earlier rule.
        if best.as_ref().is_none_or(|b| length > b.length) {
            best = Some(Candidate {
                category: rule.category(),
                length,
                span: Span { start: m.start(), end: m.end() },
                origin,
                index,
            });
        }
    }

    match best {
        Some(c) => MatchResult::Resolved {
            category: c.category.to_string(),
            length: c.length,
            span: c.span,
            origin: c.origin,
            index: c.index,
        },
        None => MatchResult::Unresolved,
    }
}
