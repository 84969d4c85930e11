//! # Risk
//!
//! $$
//! \sigma_{\text{ann}} = \operatorname{std}(r)\sqrt{252}
//! $$
//!
//! Aggregation passes over the long table: annualized and rolling
//! volatility, pairwise correlation, worst single-day drops, quartile
//! assignment and the equal-weight quartile backtest.

pub mod backtest;
pub mod correlation;
pub mod quartile;
pub mod volatility;

pub use backtest::backtest_equal_weight;
pub use backtest::QuartilePortfolio;
pub use correlation::correlation_matrix;
pub use correlation::CorrelationMatrix;
pub use quartile::assign_quartiles;
pub use quartile::QuartileAssignment;
pub use quartile::QuartileEdges;
pub use quartile::RiskQuartile;
pub use volatility::annualized_volatility;
pub use volatility::rolling_volatility;
pub use volatility::worst_drops;
pub use volatility::RollingSeries;
pub use volatility::VolatilityEstimate;
pub use volatility::WorstDrop;
