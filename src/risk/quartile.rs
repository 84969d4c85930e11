//! # Risk Quartiles
//!
//! Volatility-quartile labels per symbol. Edges are the 25/50/75th
//! linear-interpolation percentiles of the per-row volatility column:
//! each long-table row carries its symbol's annualized volatility, so
//! symbols with more rows weigh more. Bins are lower-edge inclusive
//! except the first. Fewer than four distinct volatility values cannot
//! form four non-degenerate bins and fails the run rather than silently
//! collapsing the bin count.

use std::cmp::Ordering;
use std::fmt;

use impl_new_derive::ImplNew;

use crate::error::AnalysisError;
use crate::pipeline::transform::Observation;
use crate::risk::volatility::VolatilityEstimate;

/// Volatility quartile label, lowest risk first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskQuartile {
  Q1,
  Q2,
  Q3,
  Q4,
}

impl fmt::Display for RiskQuartile {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RiskQuartile::Q1 => write!(f, "Q1 (Lowest Risk)"),
      RiskQuartile::Q2 => write!(f, "Q2"),
      RiskQuartile::Q3 => write!(f, "Q3"),
      RiskQuartile::Q4 => write!(f, "Q4 (Highest Risk)"),
    }
  }
}

/// Quartile boundaries of the per-row volatility distribution.
#[derive(ImplNew, Clone, Copy, Debug)]
pub struct QuartileEdges {
  pub p25: f64,
  pub p50: f64,
  pub p75: f64,
}

impl QuartileEdges {
  /// Lower-edge-inclusive bin assignment, open-ended first bin.
  #[must_use]
  pub fn classify(&self, volatility: f64) -> RiskQuartile {
    if volatility < self.p25 {
      RiskQuartile::Q1
    } else if volatility < self.p50 {
      RiskQuartile::Q2
    } else if volatility < self.p75 {
      RiskQuartile::Q3
    } else {
      RiskQuartile::Q4
    }
  }
}

/// Per-symbol quartile labels plus the edges they were derived from.
#[derive(Clone, Debug)]
pub struct QuartileAssignment {
  pub edges: QuartileEdges,
  /// (symbol, label) in the volatility table's order.
  pub by_symbol: Vec<(String, RiskQuartile)>,
}

/// Linear-interpolation percentile of a sorted, non-empty slice,
/// `q` in [0, 1].
fn percentile(sorted: &[f64], q: f64) -> f64 {
  let rank = q * (sorted.len() - 1) as f64;
  let lo = rank.floor() as usize;
  let hi = rank.ceil() as usize;
  sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
}

fn total_cmp(a: &f64, b: &f64) -> Ordering {
  a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

/// Bin every symbol into a volatility quartile.
pub fn assign_quartiles(
  observations: &[Observation],
  volatility: &[VolatilityEstimate],
) -> Result<QuartileAssignment, AnalysisError> {
  let mut distinct: Vec<f64> = volatility.iter().map(|est| est.value).collect();
  distinct.sort_by(total_cmp);
  distinct.dedup();
  if distinct.len() < 4 {
    return Err(AnalysisError::DegenerateQuartiles {
      distinct: distinct.len(),
    });
  }

  // One entry per long-table row, each carrying its symbol's volatility.
  let mut per_row: Vec<f64> = Vec::with_capacity(observations.len());
  for obs in observations {
    if let Some(est) = volatility.iter().find(|est| est.symbol == obs.symbol) {
      per_row.push(est.value);
    }
  }
  if per_row.is_empty() {
    return Err(AnalysisError::DegenerateQuartiles { distinct: 0 });
  }
  per_row.sort_by(total_cmp);

  let edges = QuartileEdges::new(
    percentile(&per_row, 0.25),
    percentile(&per_row, 0.50),
    percentile(&per_row, 0.75),
  );
  let by_symbol = volatility
    .iter()
    .map(|est| (est.symbol.clone(), edges.classify(est.value)))
    .collect();

  Ok(QuartileAssignment { edges, by_symbol })
}
