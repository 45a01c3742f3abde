//! Exact-match rule synthesis for unmatched merchants.

use crate::Rule;

/// Category given to every learned rule until someone relabels it.
pub const DEFAULT_SENTINEL: &str = "interactive";

/// Builds exact-match rules tagged with a sentinel category.
#[derive(Debug, Clone)]
pub struct RuleLearner {
    sentinel: String,
    reserved: Vec<char>,
}

impl Default for RuleLearner {
    fn default() -> Self {
        RuleLearner::new(DEFAULT_SENTINEL, ['#', ','])
    }
}

impl RuleLearner {
    /// `reserved` holds the characters the rule loader treats specially (the
    /// comment marker and field delimiter). Learned patterns never contain them
    /// literally, so a persisted rule reads back unchanged.
    pub fn new(sentinel: impl Into<String>, reserved: impl IntoIterator<Item = char>) -> Self {
        RuleLearner { sentinel: sentinel.into(), reserved: reserved.into_iter().collect() }
    }

    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    /// A rule matching `merchant` exactly and nothing else.
    pub fn learn(&self, merchant: &str) -> Rule {
        Rule::new(self.sentinel.clone(), exact_pattern(merchant, &self.reserved))
    }
}

/// `^escaped$` for `text`. Characters in `reserved` are written as `\xNN` or
/// `\x{N}` escapes instead of literally.
pub fn exact_pattern(text: &str, reserved: &[char]) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('^');
    for c in text.chars() {
        if reserved.contains(&c) {
            pattern.push_str(&hex_escape(c));
        } else {
            pattern.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
        }
    }
    pattern.push('$');
    pattern
}

fn hex_escape(c: char) -> String {
    let code = c as u32;
    if code <= 0xFF { format!("\\x{code:02X}") } else { format!("\\x{{{code:X}}}") }
}
