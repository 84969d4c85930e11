//! # Cleaner
//!
//! Forward-fill per symbol, then drop symbols whose residual missing
//! count exceeds the threshold. The threshold is evaluated on the filled
//! table, so only gaps with no prior observation can trigger a drop.

use tracing::debug;

use crate::error::AnalysisError;
use crate::market::PriceColumn;
use crate::market::PriceTable;

/// Replace each missing close with the nearest preceding close of the
/// same symbol. Leading gaps have no preceding value and stay missing.
#[must_use]
pub fn forward_fill(table: &PriceTable) -> PriceTable {
  let columns = table
    .columns
    .iter()
    .map(|col| {
      let mut last = None;
      let closes = col
        .closes
        .iter()
        .map(|close| {
          if close.is_some() {
            last = *close;
          }
          last
        })
        .collect();
      PriceColumn::new(col.symbol.clone(), closes)
    })
    .collect();

  PriceTable {
    dates: table.dates.clone(),
    columns,
  }
}

/// Drop columns whose missing count exceeds `threshold` of the row count.
#[must_use]
pub fn drop_sparse(table: PriceTable, threshold: f64) -> PriceTable {
  let limit = table.n_rows() as f64 * threshold;
  let (kept, dropped): (Vec<_>, Vec<_>) = table
    .columns
    .into_iter()
    .partition(|col| col.missing() as f64 <= limit);

  for col in &dropped {
    debug!(
      symbol = col.symbol.as_str(),
      missing = col.missing(),
      "dropped sparse symbol"
    );
  }

  PriceTable {
    dates: table.dates,
    columns: kept,
  }
}

/// Forward-fill, then drop sparse symbols; at least two must survive for
/// the correlation and quartile stages to be meaningful.
pub fn clean(table: PriceTable, threshold: f64) -> Result<PriceTable, AnalysisError> {
  if table.n_rows() == 0 || table.n_symbols() == 0 {
    return Err(AnalysisError::EmptyTable);
  }

  let requested = table.n_symbols();
  let cleaned = drop_sparse(forward_fill(&table), threshold);
  if cleaned.n_symbols() < 2 {
    return Err(AnalysisError::TooFewSymbols {
      survivors: cleaned.n_symbols(),
      requested,
    });
  }

  Ok(cleaned)
}
