pub mod errors;
pub mod models;
pub mod services;
pub mod sources;

use std::sync::Arc;

use errors::CoreError;
use models::advisory::Advisory;
use models::metric::DashboardSnapshot;
use services::advisory::AdvisoryService;
use services::aggregator::AggregatorService;
use sources::http::HttpFeeds;
use sources::traits::MarketFeeds;

/// Configuration for the dashboard facade.
///
/// The advisory collaborator is optional: without an API key the data
/// pipeline works normally and `request_advisory` reports
/// `AdvisoryUnavailable`.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// API key for the advisory endpoint, if enabled.
    pub advisory_api_key: Option<String>,

    /// Advisory model name.
    pub advisory_model: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            advisory_api_key: None,
            advisory_model: services::advisory::DEFAULT_MODEL.to_string(),
        }
    }
}

/// Main entry point for the Bitcoin on-chain dashboard core.
///
/// One `fetch_dashboard()` call is one bounded fetch-and-derive cycle;
/// there is no state carried between cycles, so a caller-level
/// "refresh" is simply calling it again. The advisory path is
/// independent: its failure never invalidates a snapshot already
/// produced, and vice versa.
#[must_use]
pub struct BtcDashboard {
    aggregator: AggregatorService,
    advisory: Option<AdvisoryService>,
}

impl std::fmt::Debug for BtcDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BtcDashboard")
            .field("advisory_enabled", &self.advisory.is_some())
            .finish()
    }
}

impl BtcDashboard {
    /// Dashboard over the real HTTP feeds, advisory disabled.
    pub fn new() -> Self {
        Self::with_config(DashboardConfig::default())
    }

    /// Dashboard over the real HTTP feeds with explicit configuration.
    pub fn with_config(config: DashboardConfig) -> Self {
        Self::build(Arc::new(HttpFeeds::new()), config)
    }

    /// Dashboard over injected feeds (tests, offline replay).
    pub fn with_feeds(feeds: Arc<dyn MarketFeeds>, config: DashboardConfig) -> Self {
        Self::build(feeds, config)
    }

    /// Run one aggregation cycle and return the finished snapshot.
    ///
    /// All six sources are fetched concurrently; if any is unusable the
    /// whole call fails with `AggregationFailed` and no snapshot is
    /// produced.
    pub async fn fetch_dashboard(&self) -> Result<DashboardSnapshot, CoreError> {
        self.aggregator.aggregate().await
    }

    /// Ask the advisory collaborator for a recommendation on an
    /// already-produced snapshot.
    pub async fn request_advisory(
        &self,
        snapshot: &DashboardSnapshot,
    ) -> Result<Advisory, CoreError> {
        match &self.advisory {
            Some(service) => service.analyze(snapshot).await,
            None => Err(CoreError::AdvisoryUnavailable(
                "no API key configured".to_string(),
            )),
        }
    }

    /// Whether an advisory API key was configured.
    #[must_use]
    pub fn has_advisory(&self) -> bool {
        self.advisory.is_some()
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(feeds: Arc<dyn MarketFeeds>, config: DashboardConfig) -> Self {
        let advisory = config
            .advisory_api_key
            .map(|key| AdvisoryService::with_model(key, config.advisory_model));

        Self {
            aggregator: AggregatorService::new(feeds),
            advisory,
        }
    }
}

impl Default for BtcDashboard {
    fn default() -> Self {
        Self::new()
    }
}
