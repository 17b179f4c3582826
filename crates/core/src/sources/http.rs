use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::metric::PriceSnapshot;
use crate::models::series::RawSeriesPoint;
use crate::sources::alternative_me::{AlternativeMeSource, SentimentSeries};
use crate::sources::blockchain_info::{
    BlockchainChartsSource, HASH_RATE_CHART, MARKET_PRICE_CHART, MINERS_REVENUE_CHART,
    TX_COUNT_CHART,
};
use crate::sources::coingecko::CoinGeckoSource;
use crate::sources::traits::MarketFeeds;

/// The production `MarketFeeds` implementation: one client per upstream
/// API, each already normalizing its native shape and ordering.
pub struct HttpFeeds {
    coingecko: CoinGeckoSource,
    alternative_me: AlternativeMeSource,
    charts: BlockchainChartsSource,
}

impl HttpFeeds {
    pub fn new() -> Self {
        Self {
            coingecko: CoinGeckoSource::new(),
            alternative_me: AlternativeMeSource::new(),
            charts: BlockchainChartsSource::new(),
        }
    }
}

impl Default for HttpFeeds {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketFeeds for HttpFeeds {
    async fn spot_price(&self) -> Result<PriceSnapshot, CoreError> {
        self.coingecko.spot_price().await
    }

    async fn sentiment(&self, days: usize) -> Result<SentimentSeries, CoreError> {
        self.alternative_me.sentiment(days).await
    }

    async fn hash_rate(&self, days: usize) -> Result<Vec<RawSeriesPoint>, CoreError> {
        self.charts.chart(HASH_RATE_CHART, days).await
    }

    async fn market_price(&self, min_days: usize) -> Result<Vec<RawSeriesPoint>, CoreError> {
        self.charts.chart(MARKET_PRICE_CHART, min_days).await
    }

    async fn miners_revenue(&self, min_days: usize) -> Result<Vec<RawSeriesPoint>, CoreError> {
        self.charts.chart(MINERS_REVENUE_CHART, min_days).await
    }

    async fn transaction_count(&self, days: usize) -> Result<Vec<RawSeriesPoint>, CoreError> {
        self.charts.chart(TX_COUNT_CHART, days).await
    }
}
