use std::fmt;

/// Unified error type for the entire btc-dashboard-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// `Display` and `Error` are implemented by hand: the `source` field of
/// `SourceUnavailable` is the feed *name* (a plain `String`), which
/// `derive(thiserror::Error)` would wrongly treat as the error source.
#[derive(Debug)]
pub enum CoreError {
    // ── Feeds / Network ─────────────────────────────────────────────
    /// "Source unavailable ({source}): {reason}"
    SourceUnavailable {
        source: String,
        reason: String,
    },

    // ── Derivation ──────────────────────────────────────────────────
    /// "Insufficient history: need {required} points, got {available}"
    InsufficientHistory {
        required: usize,
        available: usize,
    },

    // ── Aggregation boundary ────────────────────────────────────────
    /// "Aggregation failed: {0}"
    AggregationFailed(Box<CoreError>),

    // ── Advisory collaborator ───────────────────────────────────────
    /// "Advisory unavailable: {0}"
    AdvisoryUnavailable(String),

    /// "Advisory reply malformed: {0}"
    AdvisoryMalformed(String),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::SourceUnavailable { source, reason } => {
                write!(f, "Source unavailable ({source}): {reason}")
            }
            CoreError::InsufficientHistory {
                required,
                available,
            } => {
                write!(f, "Insufficient history: need {required} points, got {available}")
            }
            CoreError::AggregationFailed(cause) => {
                write!(f, "Aggregation failed: {cause}")
            }
            CoreError::AdvisoryUnavailable(reason) => {
                write!(f, "Advisory unavailable: {reason}")
            }
            CoreError::AdvisoryMalformed(reason) => {
                write!(f, "Advisory reply malformed: {reason}")
            }
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CoreError::AggregationFailed(cause) => Some(cause.as_ref()),
            _ => None,
        }
    }
}

impl CoreError {
    /// Build a `SourceUnavailable` from a reqwest error, attributing it
    /// to the named feed.
    ///
    /// The message is sanitized: query parameters are stripped from any
    /// embedded URL so API keys never leak into error text.
    pub fn source_unavailable(source: &str, e: &reqwest::Error) -> Self {
        CoreError::SourceUnavailable {
            source: source.to_string(),
            reason: sanitize_reqwest(e),
        }
    }
}

/// Strip query parameters from a reqwest error message. reqwest errors
/// often contain full URLs, and those can carry API keys.
pub(crate) fn sanitize_reqwest(e: &reqwest::Error) -> String {
    let msg = e.to_string();
    if let Some(idx) = msg.find('?') {
        format!("{}?<query redacted>", &msg[..idx])
    } else {
        msg
    }
}
