//! Asking a human about unmatched merchants.
//!
//! When a merchant matches no rule, the session hands it to a [`Prompter`]
//! together with the known categories. The terminal prompter renders a
//! numbered menu and reads a choice. The choice is reported back but the
//! learned rule keeps the sentinel category.

use crate::Result;
use std::io::{BufRead, Write};

/// Source of a category choice for an unmatched merchant.
pub trait Prompter {
    /// Return the chosen index into `categories`, or `None` for no choice.
    fn select(&mut self, merchant: &str, categories: &[&str]) -> Result<Option<usize>>;
}

/// Never asks; every merchant gets no choice.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPrompt;

impl Prompter for NoPrompt {
    fn select(&mut self, _merchant: &str, _categories: &[&str]) -> Result<Option<usize>> {
        Ok(None)
    }
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn select(&mut self, merchant: &str, categories: &[&str]) -> Result<Option<usize>> {
        (**self).select(merchant, categories)
    }
}

/// Numbered-menu prompt over any reader/writer pair (stdin/stderr in the CLI).
///
/// ```text
/// No rule matches: "BOOKS R US"
///   [1] groceries
///   [2] fuel
/// Category (number, blank to skip):
/// ```
#[derive(Debug)]
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        TerminalPrompter { input, output }
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn select(&mut self, merchant: &str, categories: &[&str]) -> Result<Option<usize>> {
        writeln!(self.output, "No rule matches: \"{merchant}\"")?;
        for (i, category) in categories.iter().enumerate() {
            writeln!(self.output, "  [{}] {}", i + 1, category)?;
        }
        write!(self.output, "Category (number, blank to skip): ")?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Ok(None);
        }

        Ok(parse_selection(&answer, categories.len()))
    }
}

/// A 1-based menu number within `1..=count`, as a 0-based index.
fn parse_selection(answer: &str, count: usize) -> Option<usize> {
    let caps = regex!(r"^\s*(\d+)\s*$").captures(answer)?;
    let n: usize = caps[1].parse().ok()?;
    (1..=count).contains(&n).then(|| n - 1)
}
