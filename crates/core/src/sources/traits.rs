use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::metric::PriceSnapshot;
use crate::models::series::RawSeriesPoint;
use crate::sources::alternative_me::SentimentSeries;

/// Trait abstraction over the six external feeds the aggregator needs.
///
/// The HTTP implementation (`HttpFeeds`) talks to the real APIs; tests
/// inject fakes. If an upstream API changes, only its client module is
/// touched — the pipeline never sees a native shape.
///
/// All series results are normalized to **oldest-first** order.
#[async_trait]
pub trait MarketFeeds: Send + Sync {
    /// Latest spot price in USD and BRL.
    async fn spot_price(&self) -> Result<PriceSnapshot, CoreError>;

    /// Fear & Greed index readings for the last `days` days.
    async fn sentiment(&self, days: usize) -> Result<SentimentSeries, CoreError>;

    /// Network hash rate chart (native unit TH/s) for the last `days` days.
    async fn hash_rate(&self, days: usize) -> Result<Vec<RawSeriesPoint>, CoreError>;

    /// Daily market price chart covering at least `min_days` days.
    async fn market_price(&self, min_days: usize) -> Result<Vec<RawSeriesPoint>, CoreError>;

    /// Daily mining revenue chart covering at least `min_days` days.
    async fn miners_revenue(&self, min_days: usize) -> Result<Vec<RawSeriesPoint>, CoreError>;

    /// Daily confirmed-transaction counts for the last `days` days.
    async fn transaction_count(&self, days: usize) -> Result<Vec<RawSeriesPoint>, CoreError>;
}
