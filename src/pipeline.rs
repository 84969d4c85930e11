//! # Pipeline
//!
//! One analysis run, top to bottom: clean the raw table, reshape to long
//! form, derive the risk statistics, assign quartiles and backtest the
//! quartile baskets. Each stage consumes the previous stage's complete
//! output and returns a new immutable value; [`run`] threads them
//! together.

pub mod clean;
pub mod transform;

pub use clean::clean;
pub use clean::drop_sparse;
pub use clean::forward_fill;
pub use transform::to_observations;
pub use transform::Observation;

use tracing::info;

use crate::error::AnalysisError;
use crate::market::PriceTable;
use crate::risk::backtest::backtest_equal_weight;
use crate::risk::backtest::QuartilePortfolio;
use crate::risk::correlation::correlation_matrix;
use crate::risk::correlation::CorrelationMatrix;
use crate::risk::quartile::assign_quartiles;
use crate::risk::quartile::QuartileAssignment;
use crate::risk::volatility::annualized_volatility;
use crate::risk::volatility::rolling_volatility;
use crate::risk::volatility::worst_drops;
use crate::risk::volatility::RollingSeries;
use crate::risk::volatility::VolatilityEstimate;
use crate::risk::volatility::WorstDrop;

/// Tunables for one analysis run.
#[derive(Clone, Debug)]
pub struct AnalysisConfig {
  /// Missing-data fraction above which a symbol is dropped after
  /// forward-fill.
  pub missing_threshold: f64,
  /// Trading days per year used for annualization.
  pub trading_days: f64,
  /// Window length, in return observations, for rolling volatility.
  pub rolling_window: usize,
}

impl Default for AnalysisConfig {
  fn default() -> Self {
    Self {
      missing_threshold: 0.05,
      trading_days: 252.0,
      rolling_window: 30,
    }
  }
}

/// Everything the reporting layer consumes.
#[derive(Clone, Debug)]
pub struct AnalysisReport {
  pub observations: Vec<Observation>,
  pub volatility: Vec<VolatilityEstimate>,
  pub rolling: Vec<RollingSeries>,
  pub correlation: CorrelationMatrix,
  pub worst_drops: Vec<WorstDrop>,
  pub quartiles: QuartileAssignment,
  pub portfolios: Vec<QuartilePortfolio>,
}

/// Run the full pipeline over a raw price table.
pub fn run(table: PriceTable, config: &AnalysisConfig) -> Result<AnalysisReport, AnalysisError> {
  let cleaned = clean(table, config.missing_threshold)?;
  info!(
    symbols = cleaned.n_symbols(),
    rows = cleaned.n_rows(),
    "cleaned price table"
  );

  let observations = to_observations(&cleaned)?;
  info!(rows = observations.len(), "reshaped to long form");

  let volatility = annualized_volatility(&observations, config.trading_days)?;
  let rolling = rolling_volatility(&observations, config.rolling_window, config.trading_days);
  let correlation = correlation_matrix(&observations);
  let drops = worst_drops(&observations);
  let quartiles = assign_quartiles(&observations, &volatility)?;
  let portfolios = backtest_equal_weight(&observations, &quartiles);
  info!(quartiles = portfolios.len(), "backtested quartile portfolios");

  Ok(AnalysisReport {
    observations,
    volatility,
    rolling,
    correlation,
    worst_drops: drops,
    quartiles,
    portfolios,
  })
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;
  use crate::market::PriceColumn;
  use crate::risk::quartile::RiskQuartile;

  fn dates(n: u32) -> Vec<NaiveDate> {
    (1..=n)
      .map(|day| NaiveDate::from_ymd_opt(2023, 3, day).unwrap())
      .collect()
  }

  fn column(symbol: &str, closes: &[f64]) -> PriceColumn {
    PriceColumn::new(symbol.to_string(), closes.iter().map(|c| Some(*c)).collect())
  }

  fn universe() -> PriceTable {
    // Four symbols with strictly increasing return dispersion.
    PriceTable::new(
      dates(5),
      vec![
        column("AAA", &[100.0, 101.0, 102.0, 103.0, 104.0]),
        column("BBB", &[100.0, 103.0, 100.0, 103.0, 100.0]),
        column("CCC", &[100.0, 108.0, 97.0, 109.0, 96.0]),
        column("DDD", &[100.0, 120.0, 85.0, 125.0, 80.0]),
      ],
    )
    .unwrap()
  }

  #[test]
  fn default_config_matches_daily_equity_conventions() {
    let config = AnalysisConfig::default();

    assert_eq!(config.missing_threshold, 0.05);
    assert_eq!(config.trading_days, 252.0);
    assert_eq!(config.rolling_window, 30);
  }

  #[test]
  fn run_produces_a_full_report() {
    let config = AnalysisConfig {
      rolling_window: 2,
      ..AnalysisConfig::default()
    };
    let report = run(universe(), &config).unwrap();

    assert_eq!(report.observations.len(), 20);
    assert_eq!(report.volatility.len(), 4);
    assert_eq!(report.rolling.len(), 4);
    assert_eq!(report.correlation.symbols.len(), 4);
    assert_eq!(report.worst_drops.len(), 4);
    assert_eq!(report.portfolios.len(), 4);

    // Dispersion ordering carries through to the quartile labels.
    let labels: Vec<RiskQuartile> = report
      .quartiles
      .by_symbol
      .iter()
      .map(|(_, quartile)| *quartile)
      .collect();
    assert_eq!(
      labels,
      vec![
        RiskQuartile::Q1,
        RiskQuartile::Q2,
        RiskQuartile::Q3,
        RiskQuartile::Q4
      ]
    );

    // Each basket compounds from 1.
    for portfolio in &report.portfolios {
      assert_eq!(portfolio.dates.len(), 4);
      assert!((portfolio.cumulative[0] - (1.0 + portfolio.returns[0])).abs() < 1e-12);
    }
  }

  #[test]
  fn run_rejects_an_empty_table() {
    let table = PriceTable::new(Vec::new(), Vec::new()).unwrap();
    let err = run(table, &AnalysisConfig::default()).unwrap_err();

    assert_eq!(err, AnalysisError::EmptyTable);
  }
}
