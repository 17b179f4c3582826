use reqwest::Client;
use serde::Deserialize;

use crate::errors::CoreError;
use crate::models::metric::PriceSnapshot;
use crate::sources::fetch::{build_client, fetch_body};

const BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Feed name used for failure attribution.
pub const SOURCE: &str = "spot-price";

/// CoinGecko client for the Bitcoin spot price.
///
/// - **Free**: No API key required at this endpoint.
/// - **Endpoint**: `/simple/price?ids=bitcoin&vs_currencies=usd,brl`
pub struct CoinGeckoSource {
    client: Client,
}

impl CoinGeckoSource {
    pub fn new() -> Self {
        Self {
            client: build_client(),
        }
    }

    /// Fetch the latest spot price in both display currencies.
    pub async fn spot_price(&self) -> Result<PriceSnapshot, CoreError> {
        let url = format!("{BASE_URL}/simple/price?ids=bitcoin&vs_currencies=usd,brl");
        let body = fetch_body(&self.client, SOURCE, &url).await?;
        parse_spot_price(&body)
    }
}

impl Default for CoinGeckoSource {
    fn default() -> Self {
        Self::new()
    }
}

// ── CoinGecko API response types ────────────────────────────────────

#[derive(Deserialize)]
struct SimplePriceResponse {
    bitcoin: PricePair,
}

#[derive(Deserialize)]
struct PricePair {
    usd: f64,
    brl: f64,
}

/// Parse the `/simple/price` payload into a `PriceSnapshot`.
pub fn parse_spot_price(body: &str) -> Result<PriceSnapshot, CoreError> {
    let resp: SimplePriceResponse =
        serde_json::from_str(body).map_err(|e| CoreError::SourceUnavailable {
            source: SOURCE.to_string(),
            reason: format!("unparseable payload: {e}"),
        })?;

    Ok(PriceSnapshot {
        usd: resp.bitcoin.usd,
        brl: resp.bitcoin.brl,
    })
}
