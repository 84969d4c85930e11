//! # Transformer
//!
//! Wide to long reshape with two derived columns per symbol: closes
//! rescaled to a baseline of 100 at the symbol's first present row, and
//! daily log returns against the immediately preceding present row. Both
//! are computed date-ascending within each symbol; rows with no close
//! (leading gaps that survived cleaning) are omitted.

use chrono::NaiveDate;

use crate::error::AnalysisError;
use crate::market::PriceTable;

/// One (date, symbol) row of the long table.
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
  pub date: NaiveDate,
  pub symbol: String,
  pub close: f64,
  /// Close rescaled so the symbol's first row is exactly 100.
  pub normalized: f64,
  /// `None` on each symbol's first row.
  pub log_return: Option<f64>,
}

/// Reshape a cleaned table into date-major long form.
///
/// A present close that is not strictly positive is an error: the log
/// return and the baseline ratio are undefined there, and a quiet NaN
/// would corrupt every downstream aggregate.
pub fn to_observations(table: &PriceTable) -> Result<Vec<Observation>, AnalysisError> {
  let mut per_column: Vec<Vec<Option<Observation>>> = Vec::with_capacity(table.columns.len());
  for col in &table.columns {
    let mut rows = Vec::with_capacity(col.closes.len());
    let mut baseline: Option<f64> = None;
    let mut prev_close: Option<f64> = None;

    for (date, close) in table.dates.iter().zip(&col.closes) {
      let Some(close) = *close else {
        rows.push(None);
        continue;
      };
      if close <= 0.0 {
        return Err(AnalysisError::NonPositiveClose {
          symbol: col.symbol.clone(),
          date: *date,
          close,
        });
      }

      let base = *baseline.get_or_insert(close);
      rows.push(Some(Observation {
        date: *date,
        symbol: col.symbol.clone(),
        close,
        normalized: 100.0 * close / base,
        log_return: prev_close.map(|prev| (close / prev).ln()),
      }));
      prev_close = Some(close);
    }
    per_column.push(rows);
  }

  // Emit date-major, mirroring the stacked long frame.
  let mut observations = Vec::new();
  for row in 0..table.dates.len() {
    for col in &mut per_column {
      if let Some(obs) = col[row].take() {
        observations.push(obs);
      }
    }
  }

  Ok(observations)
}
