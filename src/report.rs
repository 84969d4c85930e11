//! # Reporting
//!
//! Chart and table builders over the analysis outputs. Builders return
//! `plotly::Plot` and `prettytable::Table` values; the caller decides
//! whether to show, write or print them.

pub mod plots;
pub mod tables;

pub use plots::cumulative_quartile_returns;
pub use plots::normalized_prices;
pub use plots::rolling_volatility_chart;
pub use tables::correlation_table;
pub use tables::volatility_table;
pub use tables::worst_drop_table;
