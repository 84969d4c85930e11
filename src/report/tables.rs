//! # Tables
//!
//! Console summaries: annualized volatility per symbol, the correlation
//! matrix and the worst single-day drops.

use prettytable::row;
use prettytable::Cell;
use prettytable::Row;
use prettytable::Table;

use crate::risk::correlation::CorrelationMatrix;
use crate::risk::volatility::VolatilityEstimate;
use crate::risk::volatility::WorstDrop;

fn coefficient(value: f64) -> String {
  if value.is_nan() {
    "n/a".to_string()
  } else {
    format!("{value:.6}")
  }
}

/// Symbol / annualized volatility, one row per symbol.
#[must_use]
pub fn volatility_table(estimates: &[VolatilityEstimate]) -> Table {
  let mut table = Table::new();
  table.add_row(row!["Symbol", "Annualized Volatility"]);
  for estimate in estimates {
    table.add_row(row![estimate.symbol, format!("{:.6}", estimate.value)]);
  }
  table
}

/// Square correlation table with symbol headers; undefined cells print
/// as "n/a".
#[must_use]
pub fn correlation_table(matrix: &CorrelationMatrix) -> Table {
  let mut table = Table::new();

  let mut header = vec![Cell::new("")];
  header.extend(matrix.symbols.iter().map(|symbol| Cell::new(symbol)));
  table.add_row(Row::new(header));

  for (i, symbol) in matrix.symbols.iter().enumerate() {
    let mut cells = vec![Cell::new(symbol)];
    cells.extend(
      (0..matrix.symbols.len()).map(|j| Cell::new(&coefficient(matrix.values[[i, j]]))),
    );
    table.add_row(Row::new(cells));
  }
  table
}

/// Symbol / date / log return of each symbol's worst day.
#[must_use]
pub fn worst_drop_table(drops: &[WorstDrop]) -> Table {
  let mut table = Table::new();
  table.add_row(row!["Symbol", "Date", "Log Return"]);
  for drop in drops {
    table.add_row(row![
      drop.symbol,
      drop.date.to_string(),
      format!("{:.6}", drop.log_return)
    ]);
  }
  table
}
