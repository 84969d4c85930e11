//! # Quartile Backtest
//!
//! $$
//! R_{q,t} = \frac{1}{k}\cdot\frac{1}{|M_q(t)|}\sum_{s \in M_q(t)} r_{s,t},
//! \qquad C_{q,t} = \prod_{u \le t} (1 + R_{q,u})
//! $$
//!
//! Equal-weight basket per quartile: at each date the unweighted mean of
//! the members' defined log returns, divided again by the number of
//! distinct quartile labels present (k, the same scalar for every
//! quartile). Cumulative series compound from 1. Dates where no member
//! has a defined return are omitted, so each series starts at the first
//! date with one.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::pipeline::transform::Observation;
use crate::risk::quartile::QuartileAssignment;
use crate::risk::quartile::RiskQuartile;

/// Return and cumulative-return series for one quartile basket.
#[derive(Clone, Debug)]
pub struct QuartilePortfolio {
  pub quartile: RiskQuartile,
  /// Member symbols, in assignment order.
  pub members: Vec<String>,
  /// Dates with at least one defined member return, ascending.
  pub dates: Vec<NaiveDate>,
  /// Mean member log return per date, divided by the distinct-quartile
  /// count.
  pub returns: Vec<f64>,
  /// Running product of (1 + return), seeded at 1 before the first date.
  pub cumulative: Vec<f64>,
}

/// Backtest one equal-weight basket per distinct quartile label present.
#[must_use]
pub fn backtest_equal_weight(
  observations: &[Observation],
  assignment: &QuartileAssignment,
) -> Vec<QuartilePortfolio> {
  let mut labels: Vec<RiskQuartile> = assignment
    .by_symbol
    .iter()
    .map(|(_, quartile)| *quartile)
    .collect();
  labels.sort();
  labels.dedup();
  let divisor = labels.len() as f64;

  labels
    .into_iter()
    .map(|quartile| {
      let members: Vec<String> = assignment
        .by_symbol
        .iter()
        .filter(|(_, label)| *label == quartile)
        .map(|(symbol, _)| symbol.clone())
        .collect();

      let mut by_date: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
      for obs in observations {
        if !members.iter().any(|member| member == &obs.symbol) {
          continue;
        }
        if let Some(log_return) = obs.log_return {
          by_date.entry(obs.date).or_default().push(log_return);
        }
      }

      let mut dates = Vec::with_capacity(by_date.len());
      let mut returns = Vec::with_capacity(by_date.len());
      let mut cumulative = Vec::with_capacity(by_date.len());
      let mut compounded = 1.0;
      for (date, member_returns) in by_date {
        let mean = member_returns.iter().sum::<f64>() / member_returns.len() as f64;
        let value = mean / divisor;
        compounded *= 1.0 + value;
        dates.push(date);
        returns.push(value);
        cumulative.push(compounded);
      }

      QuartilePortfolio {
        quartile,
        members,
        dates,
        returns,
        cumulative,
      }
    })
    .collect()
}
