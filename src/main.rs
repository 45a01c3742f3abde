mod debug_report;

use clap::{Args, Parser, Subcommand};
use spendsort::{NoPrompt, Options, RuleSet, TerminalPrompter, load_rules_from_path, run};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, IsTerminal};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Categorize transactions with regex rules, learning exact-match rules for
/// merchants no rule matches.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print a run summary to stderr.
    #[arg(long, global = true)]
    summary: bool,

    /// Force ANSI color in the summary.
    #[arg(long, global = true, conflicts_with = "no_color")]
    color: bool,

    /// Disable ANSI color in the summary.
    #[arg(long, global = true)]
    no_color: bool,

    /// Log resolution details to stderr (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the classified transaction rows to stdout.
    Apply {
        #[command(flatten)]
        inputs: Inputs,

        /// Append the original category as a fifth field on resolved rows.
        #[arg(long)]
        history: bool,

        /// Also write the rules learned from unmatched merchants to FILE.
        #[arg(long, value_name = "FILE")]
        learned: Option<PathBuf>,
    },
    /// Write rules for merchants no rule matches to stdout.
    Learn {
        #[command(flatten)]
        inputs: Inputs,

        /// Ask for a category for every new unmatched merchant (on stderr/stdin).
        #[arg(short, long)]
        interactive: bool,
    },
}

#[derive(Args, Debug)]
struct Inputs {
    /// Rule file with `category, pattern` rows.
    rules: PathBuf,

    /// Transaction file with `date, merchant, category, amount` rows.
    transactions: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if let Err(err) = execute(&cli) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn setup_logging(verbose: bool) {
    let default = if verbose { "spendsort=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn execute(cli: &Cli) -> Result<(), String> {
    let (rules, report) = match &cli.command {
        Command::Apply { inputs, history, learned } => {
            let options = Options { include_history: *history, ..Options::default() };
            let rules = load(&inputs.rules, &options)?;
            let transactions = open(&inputs.transactions)?;
            let stdout = BufWriter::new(io::stdout().lock());

            let report =
                run(&rules, transactions, stdout, &options, NoPrompt).map_err(|err| context(&inputs.transactions, err))?;

            if let Some(path) = learned {
                let file = File::create(path).map_err(|err| context(path, err))?;
                report.write_learned(BufWriter::new(file)).map_err(|err| context(path, err))?;
            }
            (rules, report)
        }
        Command::Learn { inputs, interactive } => {
            let options = Options::default();
            let rules = load(&inputs.rules, &options)?;
            let transactions = open(&inputs.transactions)?;

            let report = if *interactive {
                let prompter = TerminalPrompter::new(io::stdin().lock(), io::stderr());
                run(&rules, transactions, io::sink(), &options, prompter)
            } else {
                run(&rules, transactions, io::sink(), &options, NoPrompt)
            }
            .map_err(|err| context(&inputs.transactions, err))?;

            report.write_learned(io::stdout().lock()).map_err(|err| format!("error: writing learned rules: {err}"))?;
            (rules, report)
        }
    };

    if cli.summary {
        debug_report::print_run(&rules, &report, color_enabled(cli));
    }
    Ok(())
}

fn load(path: &Path, options: &Options) -> Result<RuleSet, String> {
    load_rules_from_path(path, options).map_err(|err| context(path, err))
}

fn open(path: &Path) -> Result<BufReader<File>, String> {
    File::open(path).map(BufReader::new).map_err(|err| context(path, err))
}

fn context(path: &Path, err: impl std::fmt::Display) -> String {
    format!("error: {}: {err}", path.display())
}

fn color_enabled(cli: &Cli) -> bool {
    if cli.color {
        true
    } else if cli.no_color {
        false
    } else {
        io::stderr().is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn apply_accepts_history_and_learned_file() {
        let cli = Cli::try_parse_from(["spendsort", "apply", "r.rules", "t.csv", "--history", "--learned", "new.rules"])
            .unwrap();

        match cli.command {
            Command::Apply { inputs, history, learned } => {
                assert_eq!(inputs.rules, PathBuf::from("r.rules"));
                assert_eq!(inputs.transactions, PathBuf::from("t.csv"));
                assert!(history);
                assert_eq!(learned, Some(PathBuf::from("new.rules")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from(["spendsort", "learn", "r", "t", "-i", "--summary", "--no-color"]).unwrap();

        assert!(cli.summary);
        assert!(!color_enabled(&cli));
        assert!(matches!(cli.command, Command::Learn { interactive: true, .. }));
    }

    #[test]
    fn color_flags_conflict() {
        assert!(Cli::try_parse_from(["spendsort", "--color", "--no-color", "learn", "r", "t"]).is_err());
    }

    #[test]
    fn missing_transactions_file_is_an_argument_error() {
        assert!(Cli::try_parse_from(["spendsort", "apply", "r.rules"]).is_err());
    }
}
