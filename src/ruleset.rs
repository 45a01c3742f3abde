//! Rule file loading.
//!
//! A rule row is one of:
//!
//! ```text
//! <blank>                          skipped
//! # a comment                      skipped (marker must be the first character)
//! groceries, FOODMART|SUPERVALUE   category, pattern
//! fuel, \bBP\b # trailing note     comment cut off before the split
//! ```
//!
//! The comment is always cut before the row is split into fields, so a
//! delimiter inside a trailing comment never counts as a field separator.
//! Patterns are compiled here, so a bad pattern fails the load before any
//! transaction is matched.

use crate::engine::RuleSet;
use crate::{Error, Options, Result, Rule};
use std::io::BufRead;

/// Parse one rule row. `Ok(None)` for blank and comment rows.
pub(crate) fn parse_row(row: &str, line: usize, options: &Options) -> Result<Option<Rule>> {
    if row.trim().is_empty() || row.starts_with(options.comment_marker) {
        return Ok(None);
    }

    let body = row.split(options.comment_marker).next().unwrap_or_default().trim();
    let fields: Vec<&str> = body.split(options.delimiter).map(str::trim).collect();

    match fields.as_slice() {
        [category, pattern] if !category.is_empty() => Ok(Some(Rule::new(*category, *pattern))),
        _ => Err(Error::MalformedRule { line, row: row.to_string() }),
    }
}

/// Load a rule set from rule rows, in order.
pub(crate) fn load<I, S>(rows: I, options: &Options) -> Result<RuleSet>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut rules = Vec::new();
    for (i, row) in rows.into_iter().enumerate() {
        if let Some(rule) = parse_row(row.as_ref(), i + 1, options)? {
            rules.push((i + 1, rule));
        }
    }
    RuleSet::compile(rules)
}

pub(crate) fn load_reader<R: BufRead>(reader: R, options: &Options) -> Result<RuleSet> {
    let rows = reader.lines().collect::<std::io::Result<Vec<String>>>()?;
    load(rows, options)
}

/// Render a learned rule as a rule row: `category, pattern # note`.
pub(crate) fn format_learned(rule: &Rule, options: &Options) -> String {
    format!(
        "{}{} {} {} {}",
        rule.category, options.delimiter, rule.pattern, options.comment_marker, options.learned_rule_note
    )
}
