use serde::{Deserialize, Serialize};

/// Closed classification returned by the advisory collaborator.
///
/// The external model replies with free text; anything that is not an
/// exact known value maps to `Error` — we never trust the external
/// string verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Buy,
    Sell,
    Hold,
    Error,
}

impl Recommendation {
    /// Map an external classification string into the closed enum.
    /// Matching is case-insensitive; unrecognized values become `Error`.
    pub fn from_external(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Recommendation::Buy,
            "SELL" => Recommendation::Sell,
            "HOLD" => Recommendation::Hold,
            _ => Recommendation::Error,
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Recommendation::Buy => write!(f, "BUY"),
            Recommendation::Sell => write!(f, "SELL"),
            Recommendation::Hold => write!(f, "HOLD"),
            Recommendation::Error => write!(f, "ERROR"),
        }
    }
}

/// The advisory collaborator's answer for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    pub recommendation: Recommendation,
    pub justification: String,
}
