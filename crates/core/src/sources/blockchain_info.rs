use reqwest::Client;
use serde::Deserialize;

use crate::errors::CoreError;
use crate::models::series::RawSeriesPoint;
use crate::sources::fetch::{build_client, fetch_body};

const BASE_URL: &str = "https://api.blockchain.info/charts";

// Chart names double as feed names for failure attribution.
pub const HASH_RATE_CHART: &str = "hash-rate";
pub const MARKET_PRICE_CHART: &str = "market-price";
pub const MINERS_REVENUE_CHART: &str = "miners-revenue";
pub const TX_COUNT_CHART: &str = "n-transactions";

/// blockchain.info charts client for the daily on-chain series.
///
/// - **Free**: No API key required.
/// - **Endpoint**: `/charts/{name}?timespan=…&format=json&sampled=false`
/// - **Shape**: `{ "values": [ { "x": unix_seconds, "y": value } ] }`
///
/// Chart units are native: hash rate in TH/s, revenue in USD,
/// transaction counts raw. Unit conversion is the aggregator's job.
pub struct BlockchainChartsSource {
    client: Client,
}

impl BlockchainChartsSource {
    pub fn new() -> Self {
        Self {
            client: build_client(),
        }
    }

    /// Fetch one daily chart spanning the last `days` days, oldest-first.
    pub async fn chart(&self, chart: &str, days: usize) -> Result<Vec<RawSeriesPoint>, CoreError> {
        let url = format!("{BASE_URL}/{chart}?timespan={days}days&format=json&sampled=false");
        let body = fetch_body(&self.client, chart, &url).await?;
        parse_chart(chart, &body)
    }
}

impl Default for BlockchainChartsSource {
    fn default() -> Self {
        Self::new()
    }
}

// ── blockchain.info API response types ──────────────────────────────

#[derive(Deserialize)]
struct ChartResponse {
    values: Vec<ChartValue>,
}

#[derive(Deserialize)]
struct ChartValue {
    /// Unix timestamp in seconds.
    x: i64,
    y: f64,
}

/// Parse a chart payload into oldest-first `RawSeriesPoint`s.
///
/// The API documents ascending order but we sort by timestamp anyway
/// rather than depend on it. An empty chart is an error.
pub fn parse_chart(chart: &str, body: &str) -> Result<Vec<RawSeriesPoint>, CoreError> {
    let mut resp: ChartResponse =
        serde_json::from_str(body).map_err(|e| CoreError::SourceUnavailable {
            source: chart.to_string(),
            reason: format!("unparseable payload: {e}"),
        })?;

    if resp.values.is_empty() {
        return Err(CoreError::SourceUnavailable {
            source: chart.to_string(),
            reason: "empty values array".to_string(),
        });
    }

    resp.values.sort_by_key(|v| v.x);

    let points = resp
        .values
        .iter()
        .filter_map(|v| {
            let label = chrono::DateTime::from_timestamp(v.x, 0)?
                .date_naive()
                .to_string();
            Some(RawSeriesPoint { label, value: v.y })
        })
        .collect();

    Ok(points)
}
