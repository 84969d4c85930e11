//! # Charts
//!
//! Plotly line charts: normalized prices per symbol, cumulative basket
//! performance per quartile, rolling volatility per symbol.

use plotly::common::Mode;
use plotly::layout::Axis;
use plotly::Layout;
use plotly::Plot;
use plotly::Scatter;

use crate::pipeline::transform::Observation;
use crate::risk::backtest::QuartilePortfolio;
use crate::risk::volatility::RollingSeries;

fn line_chart(title: &str, y_label: &str) -> Plot {
  let mut plot = Plot::new();
  plot.set_layout(
    Layout::new()
      .title(title)
      .x_axis(Axis::new().title("Date"))
      .y_axis(Axis::new().title(y_label)),
  );
  plot
}

/// Per-symbol (dates, values) series in first-appearance order.
fn series_by_symbol(
  observations: &[Observation],
  value: impl Fn(&Observation) -> f64,
) -> Vec<(String, Vec<String>, Vec<f64>)> {
  let mut series: Vec<(String, Vec<String>, Vec<f64>)> = Vec::new();
  for obs in observations {
    let idx = match series.iter().position(|(symbol, _, _)| symbol == &obs.symbol) {
      Some(idx) => idx,
      None => {
        series.push((obs.symbol.clone(), Vec::new(), Vec::new()));
        series.len() - 1
      }
    };
    series[idx].1.push(obs.date.to_string());
    series[idx].2.push(value(obs));
  }
  series
}

/// One trace per symbol of baseline-100 normalized closes.
#[must_use]
pub fn normalized_prices(observations: &[Observation]) -> Plot {
  let mut plot = line_chart("Normalized Price Performance (Base = 100)", "Normalized Price");
  for (symbol, dates, values) in series_by_symbol(observations, |obs| obs.normalized) {
    let trace = Scatter::new(dates, values)
      .mode(Mode::Lines)
      .name(symbol.as_str());
    plot.add_trace(trace);
  }
  plot
}

/// One trace per quartile of cumulative compounded basket returns.
#[must_use]
pub fn cumulative_quartile_returns(portfolios: &[QuartilePortfolio]) -> Plot {
  let mut plot = line_chart(
    "Equal-Weight Portfolio Performance by Risk Quartile",
    "Cumulative Returns",
  );
  for portfolio in portfolios {
    let dates: Vec<String> = portfolio.dates.iter().map(|date| date.to_string()).collect();
    let label = portfolio.quartile.to_string();
    let trace = Scatter::new(dates, portfolio.cumulative.clone())
      .mode(Mode::Lines)
      .name(label.as_str());
    plot.add_trace(trace);
  }
  plot
}

/// One trace per symbol of rolling annualized volatility.
#[must_use]
pub fn rolling_volatility_chart(series: &[RollingSeries], window: usize) -> Plot {
  let title = format!("Rolling {window}-Day Annualized Volatility");
  let mut plot = line_chart(&title, "Annualized Volatility");
  for entry in series {
    let dates: Vec<String> = entry.dates.iter().map(|date| date.to_string()).collect();
    let trace = Scatter::new(dates, entry.values.clone())
      .mode(Mode::Lines)
      .name(entry.symbol.as_str());
    plot.add_trace(trace);
  }
  plot
}
