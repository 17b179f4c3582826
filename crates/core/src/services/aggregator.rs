use std::sync::Arc;

use tracing::{info, warn};

use crate::errors::CoreError;
use crate::models::metric::{DashboardSnapshot, Metric};
use crate::models::series::RawSeriesPoint;
use crate::services::series::{align, derive_ratio};
use crate::sources::traits::MarketFeeds;

/// Display history length for every metric chart, in days.
pub const HISTORY_WINDOW: usize = 30;

/// Rolling-average window for the Mayer Multiple, in days.
pub const MAYER_WINDOW: usize = 200;

/// Rolling-average window for the Puell Multiple, in days.
pub const PUELL_WINDOW: usize = 365;

/// Hash rate arrives in TH/s; displayed in EH/s.
const TH_PER_EH: f64 = 1_000_000.0;

/// Transaction counts are displayed in thousands.
const TX_PER_THOUSAND: f64 = 1_000.0;

/// Orchestrates one fetch-and-derive cycle: concurrent fan-out over all
/// six feeds, strict join, per-metric derivation and unit conversion,
/// snapshot assembly.
///
/// All-or-nothing by design: if any required source is unusable the
/// whole cycle fails — a missing ratio would otherwise render as a
/// misleading zero. The service is stateless across cycles; each call
/// owns and discards its own intermediate series.
pub struct AggregatorService {
    feeds: Arc<dyn MarketFeeds>,
}

impl AggregatorService {
    pub fn new(feeds: Arc<dyn MarketFeeds>) -> Self {
        Self { feeds }
    }

    /// Run one aggregation cycle.
    ///
    /// Any fetch or derivation failure is wrapped in
    /// `AggregationFailed` with the triggering error as cause.
    pub async fn aggregate(&self) -> Result<DashboardSnapshot, CoreError> {
        match self.run_cycle().await {
            Ok(snapshot) => {
                info!(metrics = snapshot.metrics.len(), "aggregation cycle complete");
                Ok(snapshot)
            }
            Err(e) => {
                warn!(error = %e, "aggregation cycle failed");
                Err(CoreError::AggregationFailed(Box::new(e)))
            }
        }
    }

    async fn run_cycle(&self) -> Result<DashboardSnapshot, CoreError> {
        // Fan out all six fetches and join on every one of them. The
        // first error wins and the sibling futures are dropped; no
        // derivation starts before the join completes.
        let (price, sentiment, hash_rate, market_price, miners_revenue, tx_count) = tokio::try_join!(
            self.feeds.spot_price(),
            self.feeds.sentiment(HISTORY_WINDOW),
            self.feeds.hash_rate(HISTORY_WINDOW),
            self.feeds.market_price(MAYER_WINDOW + HISTORY_WINDOW - 1),
            self.feeds.miners_revenue(PUELL_WINDOW + HISTORY_WINDOW - 1),
            self.feeds.transaction_count(HISTORY_WINDOW),
        )?;

        // Fear & Greed: latest reading plus the feed's classification.
        let sentiment_now = latest_value("sentiment-index", &sentiment.points)?;
        let fear_greed = Metric {
            name: "Fear & Greed Index".to_string(),
            current_value: format!("{sentiment_now:.0}"),
            description: sentiment.classification,
            tooltip: "Measures market sentiment. 0 is extreme fear, 100 is extreme greed."
                .to_string(),
            history: Some(align(&sentiment.points, HISTORY_WINDOW)),
        };

        // Hash rate: TH/s → EH/s.
        let hash_rate_ehs = convert_series(&hash_rate, TH_PER_EH);
        let hash_rate_now = latest_value("hash-rate", &hash_rate_ehs)?;
        let hash_rate_metric = Metric {
            name: "Hash Rate".to_string(),
            current_value: format!("{hash_rate_now:.2} EH/s"),
            description: "Network computing power".to_string(),
            tooltip: "A rising hash rate indicates a strong, secure network with more miners participating."
                .to_string(),
            history: Some(align(&hash_rate_ehs, HISTORY_WINDOW)),
        };

        // Mayer Multiple: price over its 200-day rolling average.
        let mayer = derive_ratio(&market_price, MAYER_WINDOW, HISTORY_WINDOW)?;
        let mayer_metric = Metric {
            name: "Mayer Multiple".to_string(),
            current_value: format!("{:.2}", mayer.latest),
            description: "Price / 200-day moving average".to_string(),
            tooltip: "Multiple of the current price over its 200-day moving average. Above 2.4 has historically signaled overheating."
                .to_string(),
            history: Some(mayer.history),
        };

        // Puell Multiple: daily mining revenue over its 365-day average.
        let puell = derive_ratio(&miners_revenue, PUELL_WINDOW, HISTORY_WINDOW)?;
        let puell_metric = Metric {
            name: "Puell Multiple".to_string(),
            current_value: format!("{:.2}", puell.latest),
            description: "Daily issuance / 365-day average".to_string(),
            tooltip: "Daily mining revenue relative to its 365-day moving average. Above 4 suggests a top, below 0.5 a bottom."
                .to_string(),
            history: Some(puell.history),
        };

        // Transactions: raw counts → thousands per day.
        let tx_thousands = convert_series(&tx_count, TX_PER_THOUSAND);
        let tx_now = latest_value("n-transactions", &tx_thousands)?;
        let tx_metric = Metric {
            name: "Daily Transactions".to_string(),
            current_value: format!("{tx_now:.2}k"),
            description: "Confirmed transactions per day".to_string(),
            tooltip: "On-chain transaction throughput, in thousands per day.".to_string(),
            history: Some(align(&tx_thousands, HISTORY_WINDOW)),
        };

        Ok(DashboardSnapshot {
            price,
            metrics: vec![
                fear_greed,
                hash_rate_metric,
                mayer_metric,
                puell_metric,
                tx_metric,
            ],
        })
    }
}

/// Divide every value in a series by `divisor`, keeping labels.
fn convert_series(points: &[RawSeriesPoint], divisor: f64) -> Vec<RawSeriesPoint> {
    points
        .iter()
        .map(|p| RawSeriesPoint {
            label: p.label.clone(),
            value: p.value / divisor,
        })
        .collect()
}

/// Most recent value of an oldest-first series. An empty series means
/// the source was unusable after parsing.
fn latest_value(source: &str, points: &[RawSeriesPoint]) -> Result<f64, CoreError> {
    points
        .last()
        .map(|p| p.value)
        .ok_or_else(|| CoreError::SourceUnavailable {
            source: source.to_string(),
            reason: "empty series".to_string(),
        })
}
