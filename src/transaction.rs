//! Transaction rows.
//!
//! A row is `date, merchant, category, amount`. It is split on the delimiter
//! into at most four fields, so the amount keeps any further delimiters it
//! contains. Every field is trimmed.

use crate::{Error, Result};
use std::io::BufRead;

/// One transaction record. `category` is empty when the row is unclassified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub date: String,
    pub merchant: String,
    pub category: String,
    pub amount: String,
}

impl Transaction {
    pub fn new(
        date: impl Into<String>,
        merchant: impl Into<String>,
        category: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Transaction { date: date.into(), merchant: merchant.into(), category: category.into(), amount: amount.into() }
    }

    /// Parse `row`, reporting `line` (1-based) on failure.
    pub fn parse(row: &str, line: usize, delimiter: char) -> Result<Self> {
        let fields: Vec<&str> = row.splitn(4, delimiter).map(str::trim).collect();
        match fields.as_slice() {
            [date, merchant, category, amount] => Ok(Transaction::new(*date, *merchant, *category, *amount)),
            _ => Err(Error::MalformedTransaction { line, row: row.to_string() }),
        }
    }

    pub fn to_row(&self, delimiter: char) -> String {
        [self.date.as_str(), self.merchant.as_str(), self.category.as_str(), self.amount.as_str()]
            .join(delimiter.to_string().as_str())
    }
}

/// Iterate over the transactions in `reader`, one per line.
///
/// Yields an error (and should not be resumed) at the first unreadable or
/// malformed row.
pub(crate) fn read_transactions<R: BufRead>(reader: R, delimiter: char) -> impl Iterator<Item = Result<Transaction>> {
    reader.lines().enumerate().map(move |(i, line)| {
        let line = line?;
        Transaction::parse(&line, i + 1, delimiter)
    })
}
