//! # Volatility
//!
//! $$
//! \sigma_{\text{ann}} = \sqrt{\tfrac{1}{n-1}\sum_t (r_t - \bar r)^2}
//! \cdot \sqrt{252}
//! $$
//!
//! Annualized and rolling volatility of daily log returns, and the worst
//! single-day drop per symbol.

use chrono::NaiveDate;
use statrs::statistics::Statistics;

use crate::error::AnalysisError;
use crate::pipeline::transform::Observation;

/// Annualized volatility of one symbol's daily log returns.
#[derive(Clone, Debug)]
pub struct VolatilityEstimate {
  pub symbol: String,
  pub value: f64,
}

/// Date and size of one symbol's single worst daily log return.
#[derive(Clone, Debug)]
pub struct WorstDrop {
  pub symbol: String,
  pub date: NaiveDate,
  pub log_return: f64,
}

/// Rolling annualized volatility points for one symbol.
#[derive(Clone, Debug)]
pub struct RollingSeries {
  pub symbol: String,
  pub dates: Vec<NaiveDate>,
  pub values: Vec<f64>,
}

/// Defined log returns per symbol, in first-appearance order. The long
/// table is date-major, so each symbol's returns come out date-ascending.
fn returns_by_symbol(observations: &[Observation]) -> Vec<(String, Vec<(NaiveDate, f64)>)> {
  let mut series: Vec<(String, Vec<(NaiveDate, f64)>)> = Vec::new();
  for obs in observations {
    let idx = match series.iter().position(|(symbol, _)| symbol == &obs.symbol) {
      Some(idx) => idx,
      None => {
        series.push((obs.symbol.clone(), Vec::new()));
        series.len() - 1
      }
    };
    if let Some(log_return) = obs.log_return {
      series[idx].1.push((obs.date, log_return));
    }
  }
  series
}

/// Sample standard deviation of each symbol's log returns, scaled by the
/// square root of `trading_days`. Fewer than two returns for any symbol
/// leaves its volatility undefined and fails the run.
pub fn annualized_volatility(
  observations: &[Observation],
  trading_days: f64,
) -> Result<Vec<VolatilityEstimate>, AnalysisError> {
  let mut estimates = Vec::new();
  for (symbol, returns) in returns_by_symbol(observations) {
    if returns.len() < 2 {
      return Err(AnalysisError::TooFewReturns {
        symbol,
        count: returns.len(),
      });
    }
    let value = returns.iter().map(|(_, r)| *r).std_dev() * trading_days.sqrt();
    estimates.push(VolatilityEstimate { symbol, value });
  }
  Ok(estimates)
}

/// Rolling sample standard deviation over `window` consecutive log
/// returns, annualized. Defined from the `window`-th return onward; a
/// window below 2 yields no series.
#[must_use]
pub fn rolling_volatility(
  observations: &[Observation],
  window: usize,
  trading_days: f64,
) -> Vec<RollingSeries> {
  if window < 2 {
    return Vec::new();
  }

  returns_by_symbol(observations)
    .into_iter()
    .map(|(symbol, returns)| {
      let mut dates = Vec::new();
      let mut values = Vec::new();
      for end in window..=returns.len() {
        let slice = &returns[end - window..end];
        dates.push(slice[window - 1].0);
        values.push(slice.iter().map(|(_, r)| *r).std_dev() * trading_days.sqrt());
      }
      RollingSeries {
        symbol,
        dates,
        values,
      }
    })
    .collect()
}

/// Minimum log return per symbol; earlier rows win ties.
#[must_use]
pub fn worst_drops(observations: &[Observation]) -> Vec<WorstDrop> {
  let mut drops: Vec<WorstDrop> = Vec::new();
  for obs in observations {
    let Some(log_return) = obs.log_return else {
      continue;
    };
    match drops.iter_mut().find(|d| d.symbol == obs.symbol) {
      Some(worst) if log_return < worst.log_return => {
        worst.date = obs.date;
        worst.log_return = log_return;
      }
      Some(_) => {}
      None => drops.push(WorstDrop {
        symbol: obs.symbol.clone(),
        date: obs.date,
        log_return,
      }),
    }
  }
  drops
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;

  use super::*;
  use crate::market::PriceColumn;
  use crate::market::PriceTable;
  use crate::pipeline::transform::to_observations;

  fn observations(closes: &[(&str, Vec<f64>)]) -> Vec<Observation> {
    let n = closes[0].1.len() as u32;
    let dates = (1..=n)
      .map(|day| NaiveDate::from_ymd_opt(2023, 1, day).unwrap())
      .collect();
    let columns = closes
      .iter()
      .map(|(symbol, series)| {
        PriceColumn::new(
          symbol.to_string(),
          series.iter().map(|close| Some(*close)).collect(),
        )
      })
      .collect();
    to_observations(&PriceTable::new(dates, columns).unwrap()).unwrap()
  }

  #[test]
  fn volatility_matches_a_hand_computation() {
    // Returns ln(1.1) and ln(1.2): std-dev of two points is |a - b| / sqrt(2).
    let obs = observations(&[("AAA", vec![100.0, 110.0, 132.0])]);
    let estimates = annualized_volatility(&obs, 252.0).unwrap();

    let expected = (1.2_f64.ln() - 1.1_f64.ln()).abs() / 2.0_f64.sqrt() * 252.0_f64.sqrt();
    assert_eq!(estimates.len(), 1);
    assert_abs_diff_eq!(estimates[0].value, expected, epsilon = 1e-12);
  }

  #[test]
  fn volatility_is_invariant_under_uniform_price_scaling() {
    let base = observations(&[("AAA", vec![100.0, 104.0, 99.0, 107.0])]);
    let scaled = observations(&[("AAA", vec![300.0, 312.0, 297.0, 321.0])]);

    let v1 = annualized_volatility(&base, 252.0).unwrap()[0].value;
    let v2 = annualized_volatility(&scaled, 252.0).unwrap()[0].value;
    assert_abs_diff_eq!(v1, v2, epsilon = 1e-12);
  }

  #[test]
  fn a_single_return_is_not_enough() {
    let obs = observations(&[("AAA", vec![100.0, 101.0])]);
    let err = annualized_volatility(&obs, 252.0).unwrap_err();

    assert_eq!(
      err,
      AnalysisError::TooFewReturns {
        symbol: "AAA".to_string(),
        count: 1,
      }
    );
  }

  #[test]
  fn worst_drop_finds_the_minimum_return() {
    let obs = observations(&[
      ("AAA", vec![100.0, 110.0, 121.0]),
      ("BBB", vec![200.0, 100.0, 150.0]),
    ]);

    let drops = worst_drops(&obs);
    assert_eq!(drops.len(), 2);
    assert_eq!(drops[1].symbol, "BBB");
    assert_eq!(drops[1].date, NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());
    assert_abs_diff_eq!(drops[1].log_return, 0.5_f64.ln(), epsilon = 1e-12);
  }

  #[test]
  fn worst_drop_ties_keep_the_first_occurrence() {
    // Identical drops on days 2 and 4; the day-2 row wins.
    let obs = observations(&[("AAA", vec![100.0, 50.0, 100.0, 50.0, 50.0])]);

    let drops = worst_drops(&obs);
    assert_eq!(drops[0].date, NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());
  }

  #[test]
  fn rolling_volatility_starts_at_the_window_th_return() {
    let obs = observations(&[("AAA", vec![100.0, 110.0, 132.0, 145.2])]);
    let series = rolling_volatility(&obs, 2, 252.0);

    assert_eq!(series.len(), 1);
    assert_eq!(series[0].dates.len(), 2);
    assert_eq!(
      series[0].dates[0],
      NaiveDate::from_ymd_opt(2023, 1, 3).unwrap()
    );

    let expected = (1.2_f64.ln() - 1.1_f64.ln()).abs() / 2.0_f64.sqrt() * 252.0_f64.sqrt();
    assert_abs_diff_eq!(series[0].values[0], expected, epsilon = 1e-12);
  }
}
