//! # Yahoo Finance Fetcher
//!
//! Thin blocking wrapper over `yahoo_finance_api`: one quote-history
//! request per symbol, assembled into a [`PriceTable`] over the union of
//! returned trading dates.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use anyhow::Context;
use anyhow::Result;
use chrono::DateTime;
use chrono::NaiveDate;
use indicatif::ProgressBar;
use time::OffsetDateTime;
use tracing::debug;
use yahoo_finance_api::YahooConnector;

use super::PriceColumn;
use super::PriceTable;

/// Fetch daily closes for `symbols` over `[start, end]`.
///
/// Each symbol is requested exactly once; a failed request or an entirely
/// empty result is fatal. Dates present for one symbol but missing for
/// another become `None` cells in the missing symbol's column.
pub fn fetch_daily_closes(
  symbols: &[String],
  start: OffsetDateTime,
  end: OffsetDateTime,
) -> Result<PriceTable> {
  let provider = YahooConnector::new().context("failed to construct Yahoo Finance client")?;
  let bar = ProgressBar::new(symbols.len() as u64);

  let mut per_symbol: Vec<(String, BTreeMap<NaiveDate, f64>)> = Vec::with_capacity(symbols.len());
  for symbol in symbols {
    bar.set_message(symbol.clone());
    let response = tokio_test::block_on(provider.get_quote_history(symbol, start, end))
      .with_context(|| {
        format!(
          "quote history request failed for '{symbol}' ({} to {})",
          start.date(),
          end.date()
        )
      })?;
    let quotes = response
      .quotes()
      .with_context(|| format!("malformed quote payload for '{symbol}'"))?;
    debug!(symbol = symbol.as_str(), quotes = quotes.len(), "fetched quote history");

    let mut closes = BTreeMap::new();
    for quote in &quotes {
      if let Some(ts) = DateTime::from_timestamp(quote.timestamp as i64, 0) {
        closes.insert(ts.date_naive(), quote.close);
      }
    }
    per_symbol.push((symbol.clone(), closes));
    bar.inc(1);
  }
  bar.finish_and_clear();

  let dates: Vec<NaiveDate> = per_symbol
    .iter()
    .flat_map(|(_, closes)| closes.keys().copied())
    .collect::<BTreeSet<_>>()
    .into_iter()
    .collect();
  if dates.is_empty() {
    anyhow::bail!(
      "no quotes returned for any of {symbols:?} between {} and {}",
      start.date(),
      end.date()
    );
  }

  let columns = per_symbol
    .into_iter()
    .map(|(symbol, closes)| {
      let series = dates.iter().map(|date| closes.get(date).copied()).collect();
      PriceColumn::new(symbol, series)
    })
    .collect();

  Ok(PriceTable::new(dates, columns)?)
}
