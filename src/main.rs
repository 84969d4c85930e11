use anyhow::Result;
use time::Date;
use time::Month;
use tracing::info;
use tracing_subscriber::EnvFilter;

use volrisk::market::yahoo::fetch_daily_closes;
use volrisk::pipeline;
use volrisk::pipeline::AnalysisConfig;
use volrisk::report;

const DEFAULT_SYMBOLS: [&str; 4] = ["AAPL", "MSFT", "GOOGL", "AMZN"];

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "volrisk=info".into()))
    .init();

  let args: Vec<String> = std::env::args().skip(1).collect();
  let symbols: Vec<String> = if args.is_empty() {
    DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect()
  } else {
    args
  };

  let start = Date::from_calendar_date(2020, Month::January, 1)?
    .midnight()
    .assume_utc();
  let end = Date::from_calendar_date(2023, Month::December, 31)?
    .midnight()
    .assume_utc();
  info!(?symbols, %start, %end, "fetching daily closes");

  let table = fetch_daily_closes(&symbols, start, end)?;
  let config = AnalysisConfig::default();
  let analysis = pipeline::run(table, &config)?;

  println!("\nAnnualized Volatility by Symbol:");
  report::volatility_table(&analysis.volatility).printstd();
  println!("\nCorrelation Matrix:");
  report::correlation_table(&analysis.correlation).printstd();
  println!("\nWorst Daily Drops:");
  report::worst_drop_table(&analysis.worst_drops).printstd();

  let normalized = report::normalized_prices(&analysis.observations);
  normalized.write_html("normalized_prices.html");
  normalized.show();

  let performance = report::cumulative_quartile_returns(&analysis.portfolios);
  performance.write_html("quartile_performance.html");
  performance.show();

  let rolling = report::rolling_volatility_chart(&analysis.rolling, config.rolling_window);
  rolling.write_html("rolling_volatility.html");
  rolling.show();

  Ok(())
}
