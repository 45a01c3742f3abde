//! Crate error type.
//!
//! Every input defect is fatal: the batch stops at the first bad row and the
//! error names the offending line.

/// The errors that may occur while loading rules or classifying transactions.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A rule row did not split into exactly two fields (category, pattern)
    /// after comment stripping, or its category was empty.
    #[error("malformed rule on line {line}: \"{row}\" (expected `category, pattern`)")]
    MalformedRule { line: usize, row: String },

    /// A transaction row had fewer than the four required fields.
    #[error("malformed transaction on line {line}: \"{row}\" (expected `date, merchant, category, amount`)")]
    MalformedTransaction { line: usize, row: String },

    /// A rule pattern failed to compile.
    ///
    /// `line` is 0 for rules learned during a run.
    #[error("invalid pattern \"{pattern}\" on line {line}: {source}")]
    InvalidPattern {
        line: usize,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Reading input, writing output or prompting failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
