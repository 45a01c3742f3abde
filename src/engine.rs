//! Matching and learning engine.
//!
//! This module is the entry point for the categorization core. It is split
//! into focused submodules under `src/engine/` while keeping public paths
//! stable (for example `crate::engine::RuleSet` and `crate::engine::match_merchant`).
//!
//! ## How the parts work together
//!
//! ```text
//! rule rows ── ruleset::load ──┐
//!                              │  RuleSet::compile          (compiled_rules.rs)
//!                              │   - compile each pattern
//!                              │   - build Prefilter         (trigger.rs)
//!                              v
//! merchant ── Prefilter::scan ─┼─ candidate loaded rules (ascending order)
//!                              v
//!                    match_merchant (matcher.rs)
//!                      - loaded candidates, then learned rules
//!                      - longest span wins, first seen on ties
//!                              │
//!               ┌──────────────┴──────────────┐
//!            Resolved                     Unresolved
//!                                             │
//!                                  RuleLearner::learn (learner.rs)
//!                                             │
//!                                  LearnedRules::push (dedup.rs)
//! ```
//!
//! `Session` (session.rs) drives that loop over a stream of transactions and
//! keeps `RunMetrics` (metrics.rs).
//!
//! ## Invariants
//!
//! - Rule order is data: the loaded rules keep file order and learned rules
//!   keep learning order. Ties are broken by that order alone.
//! - The loaded `RuleSet` is never mutated after loading. Learned rules live in
//!   a separate append-only list owned by the session.
//!
//! ## Debugging
//!
//! Run with `RUST_LOG=spendsort=trace` to see every rule evaluation.

#[path = "engine/compiled_rules.rs"]
mod compiled_rules;
#[path = "engine/dedup.rs"]
mod dedup;
#[path = "engine/learner.rs"]
mod learner;
#[path = "engine/matcher.rs"]
mod matcher;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/session.rs"]
mod session;
#[path = "engine/trigger.rs"]
mod trigger;

pub use compiled_rules::{CompiledRule, RuleSet};
pub use dedup::LearnedRules;
pub use learner::{DEFAULT_SENTINEL, RuleLearner, exact_pattern};
pub use matcher::match_merchant;
pub use metrics::RunMetrics;
pub(crate) use session::Session;
