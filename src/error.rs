//! # Errors
//!
//! Fatal error taxonomy for the analysis pipeline: bad input, not enough
//! data to define a statistic, or a value outside a computation's domain.
//! Every variant aborts the run; there is no partial-results mode.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
  /// The source table has no rows or no symbol columns.
  #[error("price table is empty")]
  EmptyTable,

  /// A symbol column's length disagrees with the date index.
  #[error("column '{symbol}' has {len} closes for {rows} dates")]
  RaggedColumn {
    symbol: String,
    len: usize,
    rows: usize,
  },

  /// Correlation and quartile binning are degenerate below two symbols.
  #[error("only {survivors} of {requested} symbols survived cleaning, need at least 2")]
  TooFewSymbols { survivors: usize, requested: usize },

  /// Volatility is undefined below two return observations.
  #[error("symbol '{symbol}' has {count} log returns, need at least 2 for volatility")]
  TooFewReturns { symbol: String, count: usize },

  /// Four non-degenerate quartile bins need four distinct volatility values.
  #[error("{distinct} distinct volatility values across symbols, need at least 4 for quartile binning")]
  DegenerateQuartiles { distinct: usize },

  /// Log returns and baseline normalization are undefined at or below zero.
  #[error("non-positive close {close} for '{symbol}' on {date}")]
  NonPositiveClose {
    symbol: String,
    date: NaiveDate,
    close: f64,
  },
}
