use serde::{Deserialize, Serialize};

/// One observation as delivered by an external feed, after shape
/// normalization but before alignment.
///
/// Feed-specific parsers produce these in **oldest-first** order; the
/// rest of the pipeline relies on that and never sees a native shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSeriesPoint {
    /// Source-native timestamp label (e.g., "2025-08-14").
    pub label: String,
    pub value: f64,
}

impl RawSeriesPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// One point of a display-ready series: the source label where a real
/// observation exists, a `D-{offset}` placeholder where the aligner
/// padded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

/// A chronologically ordered, fixed-length series ready for chart
/// rendering. Always exactly the requested window length.
pub type AlignedSeries = Vec<SeriesPoint>;
