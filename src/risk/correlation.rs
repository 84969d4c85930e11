//! # Correlation
//!
//! $$
//! \rho_{ij} = \frac{\sum_t (x_t-\bar x)(y_t-\bar y)}
//!                  {\sqrt{\sum_t (x_t-\bar x)^2 \sum_t (y_t-\bar y)^2}}
//! $$
//!
//! Pairwise Pearson correlation of daily log returns, computed over the
//! dates where both symbols have a defined return. NaN marks cells with
//! no defined value: fewer than two common observations, or a
//! zero-variance series.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use ndarray::Array2;

use crate::pipeline::transform::Observation;

/// Symmetric symbol-by-symbol correlation matrix.
#[derive(Clone, Debug)]
pub struct CorrelationMatrix {
  /// Symbols in first-appearance order; row/column i belongs to
  /// `symbols[i]`.
  pub symbols: Vec<String>,
  /// Pearson coefficients, NaN where undefined.
  pub values: Array2<f64>,
}

fn pearson(pairs: &[(f64, f64)]) -> f64 {
  let n = pairs.len();
  if n < 2 {
    return f64::NAN;
  }

  let mx = pairs.iter().map(|(x, _)| x).sum::<f64>() / n as f64;
  let my = pairs.iter().map(|(_, y)| y).sum::<f64>() / n as f64;

  let mut cov = 0.0;
  let mut sx = 0.0;
  let mut sy = 0.0;
  for (x, y) in pairs {
    let dx = x - mx;
    let dy = y - my;
    cov += dx * dy;
    sx += dx * dx;
    sy += dy * dy;
  }

  let denom = (sx * sy).sqrt();
  if denom < 1e-15 {
    f64::NAN
  } else {
    (cov / denom).clamp(-1.0, 1.0)
  }
}

/// Build the pairwise-complete correlation matrix of log returns.
///
/// The diagonal falls out of the same computation: exactly 1.0 for a
/// symbol with nonzero return variance, NaN otherwise.
#[must_use]
pub fn correlation_matrix(observations: &[Observation]) -> CorrelationMatrix {
  let mut series: Vec<(String, BTreeMap<NaiveDate, f64>)> = Vec::new();
  for obs in observations {
    let idx = match series.iter().position(|(symbol, _)| symbol == &obs.symbol) {
      Some(idx) => idx,
      None => {
        series.push((obs.symbol.clone(), BTreeMap::new()));
        series.len() - 1
      }
    };
    if let Some(log_return) = obs.log_return {
      series[idx].1.insert(obs.date, log_return);
    }
  }

  let n = series.len();
  let mut values = Array2::from_elem((n, n), f64::NAN);
  for i in 0..n {
    for j in i..n {
      let pairs: Vec<(f64, f64)> = series[i]
        .1
        .iter()
        .filter_map(|(date, x)| series[j].1.get(date).map(|y| (*x, *y)))
        .collect();
      let rho = pearson(&pairs);
      values[[i, j]] = rho;
      values[[j, i]] = rho;
    }
  }

  CorrelationMatrix {
    symbols: series.into_iter().map(|(symbol, _)| symbol).collect(),
    values,
  }
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
  fn matrix_is_symmetric_with_unit_diagonal() {
    let obs = observations(&[
      ("AAA", vec![100.0, 104.0, 99.0, 108.0]),
      ("BBB", vec![50.0, 49.0, 53.0, 52.0]),
    ]);

    let matrix = correlation_matrix(&obs);
    assert_eq!(matrix.symbols, vec!["AAA", "BBB"]);
    assert_abs_diff_eq!(matrix.values[[0, 0]], 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(matrix.values[[1, 1]], 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(
      matrix.values[[0, 1]],
      matrix.values[[1, 0]],
      epsilon = 1e-15
    );
  }

  #[test]
  fn proportional_moves_correlate_perfectly() {
    // BBB is AAA at double scale: identical log returns.
    let obs = observations(&[
      ("AAA", vec![100.0, 110.0, 99.0, 105.0]),
      ("BBB", vec![200.0, 220.0, 198.0, 210.0]),
    ]);

    let matrix = correlation_matrix(&obs);
    assert_abs_diff_eq!(matrix.values[[0, 1]], 1.0, epsilon = 1e-12);
  }

  #[test]
  fn mirrored_moves_correlate_negatively() {
    let obs = observations(&[
      ("AAA", vec![100.0, 110.0, 100.0, 110.0]),
      ("BBB", vec![100.0, 100.0 / 1.1, 100.0, 100.0 / 1.1]),
    ]);

    let matrix = correlation_matrix(&obs);
    assert_abs_diff_eq!(matrix.values[[0, 1]], -1.0, epsilon = 1e-12);
  }

  #[test]
  fn zero_variance_yields_nan_everywhere() {
    let obs = observations(&[
      ("FLAT", vec![100.0, 100.0, 100.0, 100.0]),
      ("AAA", vec![100.0, 104.0, 99.0, 108.0]),
    ]);

    let matrix = correlation_matrix(&obs);
    assert!(matrix.values[[0, 0]].is_nan());
    assert!(matrix.values[[0, 1]].is_nan());
    assert!(matrix.values[[1, 0]].is_nan());
    assert_abs_diff_eq!(matrix.values[[1, 1]], 1.0, epsilon = 1e-12);
  }
}
