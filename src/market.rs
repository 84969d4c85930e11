//! # Market Data
//!
//! Wide daily price table: one date index, one nullable close column per
//! symbol. The Yahoo Finance fetcher behind the `yahoo` feature produces
//! this table; the cleaning and reshape stages consume it.

use chrono::NaiveDate;
use impl_new_derive::ImplNew;

use crate::error::AnalysisError;

#[cfg(feature = "yahoo")]
pub mod yahoo;

/// One symbol's close series over the table's date index.
#[derive(ImplNew, Clone, Debug, PartialEq)]
pub struct PriceColumn {
  /// Ticker symbol.
  pub symbol: String,
  /// Daily closes, `None` where the source had no observation.
  pub closes: Vec<Option<f64>>,
}

impl PriceColumn {
  /// Count of missing closes in this column.
  #[must_use]
  pub fn missing(&self) -> usize {
    self.closes.iter().filter(|c| c.is_none()).count()
  }
}

/// Daily closes for a symbol universe over a shared ascending date index.
#[derive(Clone, Debug, PartialEq)]
pub struct PriceTable {
  /// Trading dates, ascending.
  pub dates: Vec<NaiveDate>,
  /// One close column per symbol, each as long as `dates`.
  pub columns: Vec<PriceColumn>,
}

impl PriceTable {
  /// Build a table, rejecting columns whose length disagrees with the
  /// date index.
  pub fn new(dates: Vec<NaiveDate>, columns: Vec<PriceColumn>) -> Result<Self, AnalysisError> {
    for col in &columns {
      if col.closes.len() != dates.len() {
        return Err(AnalysisError::RaggedColumn {
          symbol: col.symbol.clone(),
          len: col.closes.len(),
          rows: dates.len(),
        });
      }
    }
    Ok(Self { dates, columns })
  }

  #[must_use]
  pub fn n_rows(&self) -> usize {
    self.dates.len()
  }

  #[must_use]
  pub fn n_symbols(&self) -> usize {
    self.columns.len()
  }

  /// Symbols in column order.
  #[must_use]
  pub fn symbols(&self) -> Vec<&str> {
    self.columns.iter().map(|c| c.symbol.as_str()).collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, day).unwrap()
  }

  #[test]
  fn new_rejects_ragged_columns() {
    let dates = vec![d(2), d(3)];
    let col = PriceColumn::new("AAA".to_string(), vec![Some(1.0)]);
    let err = PriceTable::new(dates, vec![col]).unwrap_err();

    assert_eq!(
      err,
      AnalysisError::RaggedColumn {
        symbol: "AAA".to_string(),
        len: 1,
        rows: 2,
      }
    );
  }

  #[test]
  fn missing_counts_nones() {
    let col = PriceColumn::new("AAA".to_string(), vec![None, Some(1.0), None, Some(2.0)]);
    assert_eq!(col.missing(), 2);
  }
}
