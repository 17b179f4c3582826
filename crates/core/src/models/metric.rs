use serde::{Deserialize, Serialize};

use super::series::AlignedSeries;

/// The latest spot price in both display currencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    pub usd: f64,
    pub brl: f64,
}

/// One dashboard metric, fully formatted for display.
///
/// The core computes all the numbers — the frontend only renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    /// Display name (e.g., "Mayer Multiple").
    pub name: String,

    /// Pre-formatted current value, unit included where relevant
    /// (e.g., "500.00 EH/s", "1.29").
    pub current_value: String,

    /// Short description shown under the value.
    pub description: String,

    /// Longer explanation for the metric's tooltip.
    pub tooltip: String,

    /// Fixed-length history for the metric's chart, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<AlignedSeries>,
}

/// The root artifact of one aggregation cycle.
///
/// Created and fully populated within a single `aggregate()` call and
/// owned exclusively by the caller afterwards; the next cycle replaces
/// it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub price: PriceSnapshot,
    pub metrics: Vec<Metric>,
}
