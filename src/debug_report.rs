use spendsort::{RuleSet, RunReport};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

const TOP_RULES: usize = 5;

/// Print a run summary to stderr (stdout carries the rows).
pub fn print_run(rules: &RuleSet, report: &RunReport, color: bool) {
    let palette = ansi::Palette::new(color);
    let metrics = &report.metrics;

    eprintln!("\n{}", palette.bold(palette.paint(format!("⚙  Rules: {}", rules.len()), ansi::CYAN)));

    eprintln!("\n{}", palette.paint("━━━ Transactions ━━━", ansi::GRAY));
    eprintln!(
        "  {} {}  │  {} {}  │  {} {}",
        palette.dim("processed:"),
        palette.paint(metrics.transactions.to_string(), ansi::BLUE),
        palette.dim("resolved:"),
        palette.paint(
            format!("{} ({} by learned rules)", metrics.resolved(), metrics.resolved_learned),
            ansi::GREEN
        ),
        palette.dim("unresolved:"),
        if metrics.unresolved > 0 {
            palette.paint(metrics.unresolved.to_string(), ansi::YELLOW)
        } else {
            palette.dim("0")
        },
    );

    eprintln!("\n{}", palette.paint("━━━ Rules ━━━", ansi::GRAY));
    let top = metrics.top_rules(TOP_RULES);
    if top.is_empty() {
        eprintln!("{}", palette.dim("  No rule matched"));
    }
    for (index, hits) in top {
        let Some(rule) = rules.get(index) else { continue };
        eprintln!(
            "  {} {} {} {}  {}",
            palette.paint(format!("line {:>4}", rule.line), ansi::GRAY),
            palette.bold(palette.paint(rule.category(), ansi::GREEN)),
            palette.dim("│"),
            palette.paint(rule.pattern(), ansi::CYAN),
            palette.paint(format!("{hits} hits"), ansi::YELLOW),
        );
    }
    let unused = metrics.unused_rules().len();
    if unused > 0 {
        eprintln!("  {}", palette.dim(format!("{unused} rules never won a match")));
    }

    if !report.learned.is_empty() {
        eprintln!("\n{}", palette.paint("━━━ Learned ━━━", ansi::GRAY));
        for row in report.learned_rows().iter().take(TOP_RULES) {
            eprintln!("  {}", palette.paint(row, ansi::YELLOW));
        }
        if report.learned.len() > TOP_RULES {
            eprintln!("  {}", palette.dim(format!("... +{} more", report.learned.len() - TOP_RULES)));
        }
    }

    eprintln!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    eprintln!("  Total: {}", palette.paint(format!("{:?}", metrics.total), ansi::GREEN));
    eprintln!();
}
