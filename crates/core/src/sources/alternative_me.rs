use reqwest::Client;
use serde::Deserialize;

use crate::errors::CoreError;
use crate::models::series::RawSeriesPoint;
use crate::sources::fetch::{build_client, fetch_body};

const BASE_URL: &str = "https://api.alternative.me";

/// Feed name used for failure attribution.
pub const SOURCE: &str = "sentiment-index";

/// alternative.me client for the Fear & Greed index.
///
/// - **Free**: No API key required.
/// - **Endpoint**: `/fng/?limit=N&format=json`
///
/// The feed delivers entries most-recent-first with stringly-typed
/// values; this module normalizes both.
pub struct AlternativeMeSource {
    client: Client,
}

/// A normalized sentiment series plus the label the feed attaches to
/// the latest reading (e.g., "Greed").
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentSeries {
    /// Readings in oldest-first order.
    pub points: Vec<RawSeriesPoint>,
    /// Classification of the most recent reading.
    pub classification: String,
}

impl AlternativeMeSource {
    pub fn new() -> Self {
        Self {
            client: build_client(),
        }
    }

    /// Fetch the last `days` index readings, oldest-first.
    pub async fn sentiment(&self, days: usize) -> Result<SentimentSeries, CoreError> {
        let url = format!("{BASE_URL}/fng/?limit={days}&format=json");
        let body = fetch_body(&self.client, SOURCE, &url).await?;
        parse_sentiment(&body)
    }
}

impl Default for AlternativeMeSource {
    fn default() -> Self {
        Self::new()
    }
}

// ── alternative.me API response types ───────────────────────────────

#[derive(Deserialize)]
struct FngResponse {
    data: Vec<FngEntry>,
}

#[derive(Deserialize)]
struct FngEntry {
    value: String,
    value_classification: String,
    timestamp: String,
}

/// Parse the `/fng/` payload and normalize it to oldest-first order.
///
/// Entries whose value or timestamp fails to parse are skipped; an
/// entirely empty payload is an error, since the metric would have no
/// current reading.
pub fn parse_sentiment(body: &str) -> Result<SentimentSeries, CoreError> {
    let resp: FngResponse =
        serde_json::from_str(body).map_err(|e| CoreError::SourceUnavailable {
            source: SOURCE.to_string(),
            reason: format!("unparseable payload: {e}"),
        })?;

    // First entry is the most recent reading.
    let classification = resp
        .data
        .first()
        .map(|e| e.value_classification.clone())
        .ok_or_else(|| CoreError::SourceUnavailable {
            source: SOURCE.to_string(),
            reason: "empty data array".to_string(),
        })?;

    let mut points: Vec<RawSeriesPoint> = resp
        .data
        .iter()
        .filter_map(|e| {
            let value: f64 = e.value.parse().ok()?;
            let ts: i64 = e.timestamp.parse().ok()?;
            let label = chrono::DateTime::from_timestamp(ts, 0)?
                .date_naive()
                .to_string();
            Some(RawSeriesPoint { label, value })
        })
        .collect();

    // Normalize most-recent-first → oldest-first.
    points.reverse();

    Ok(SentimentSeries {
        points,
        classification,
    })
}
