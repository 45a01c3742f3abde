use crate::engine::{self, LearnedRules, RuleSet, RunMetrics};
use crate::transaction::read_transactions;
use crate::{MatchResult, Prompter, Result, Rule, ruleset};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// Options that affect loading, learning and output formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Starts a comment in rule rows. Default `#`.
    pub comment_marker: char,
    /// Field separator in rule and transaction rows. Default `,`.
    pub delimiter: char,
    /// Category given to learned rules. Default `interactive`.
    pub sentinel_category: String,
    /// Append the original category as a fifth field on resolved rows.
    pub include_history: bool,
    /// History value written when the original category was empty. Default `Empty`.
    pub empty_history_label: String,
    /// Trailing comment on learned rule rows. Default `added interactively`.
    pub learned_rule_note: String,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            comment_marker: '#',
            delimiter: ',',
            sentinel_category: engine::DEFAULT_SENTINEL.to_string(),
            include_history: false,
            empty_history_label: "Empty".to_string(),
            learned_rule_note: "added interactively".to_string(),
        }
    }
}

/// Result of [`run`].
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Rules learned during the run, in learning order.
    pub learned: Vec<Rule>,
    pub metrics: RunMetrics,
    learned_rows: Vec<String>,
}

impl RunReport {
    /// Learned rules rendered as rule rows (`category, pattern # note`).
    pub fn learned_rows(&self) -> &[String] {
        &self.learned_rows
    }

    /// Write the learned rule rows to `out`, one per line.
    pub fn write_learned<W: Write>(&self, mut out: W) -> Result<()> {
        for row in &self.learned_rows {
            writeln!(out, "{row}")?;
        }
        out.flush()?;
        Ok(())
    }
}

/// Load a rule set from rule rows.
///
/// # Example
/// ```
/// use spendsort::{Options, load_rules};
///
/// let rules = load_rules("# comment\ngroceries, FOODMART\n", &Options::default()).unwrap();
/// assert_eq!(rules.len(), 1);
/// ```
pub fn load_rules(text: &str, options: &Options) -> Result<RuleSet> {
    ruleset::load(text.lines(), options)
}

pub fn load_rules_from_reader<R: BufRead>(reader: R, options: &Options) -> Result<RuleSet> {
    ruleset::load_reader(reader, options)
}

pub fn load_rules_from_path(path: impl AsRef<Path>, options: &Options) -> Result<RuleSet> {
    let file = File::open(path.as_ref())?;
    tracing::info!(path = %path.as_ref().display(), "loading rules");
    load_rules_from_reader(BufReader::new(file), options)
}

/// Match one merchant text against `rules` alone.
///
/// # Example
/// ```
/// use spendsort::{Options, classify, load_rules};
///
/// let rules = load_rules("misc, MART\ngroceries, FOODMART", &Options::default()).unwrap();
/// assert_eq!(classify("FOODMART 22", &rules).category(), Some("groceries"));
/// ```
pub fn classify(merchant: &str, rules: &RuleSet) -> MatchResult {
    engine::match_merchant(merchant, rules, &LearnedRules::new())
}

/// Classify every transaction row in `transactions` and write the output rows
/// to `out` as they are produced.
///
/// Stops at the first malformed row or I/O failure; rows already written stay
/// written.
pub fn run<R, W, P>(rules: &RuleSet, transactions: R, mut out: W, options: &Options, prompter: P) -> Result<RunReport>
where
    R: BufRead,
    W: Write,
    P: Prompter,
{
    let mut session = engine::Session::new(rules, options, prompter);

    for transaction in read_transactions(transactions, options.delimiter) {
        let emitted = session.process(transaction?)?;
        writeln!(out, "{}", emitted.to_row(options.delimiter))?;
    }
    out.flush()?;

    let (learned, metrics) = session.finish();
    let learned = learned.into_rules();
    let learned_rows = learned.iter().map(|rule| ruleset::format_learned(rule, options)).collect();

    tracing::info!(
        transactions = metrics.transactions,
        resolved = metrics.resolved(),
        unresolved = metrics.unresolved,
        learned = metrics.learned,
        elapsed = ?metrics.total,
        "run finished"
    );

    Ok(RunReport { learned, metrics, learned_rows })
}
