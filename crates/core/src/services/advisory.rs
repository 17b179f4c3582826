use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{sanitize_reqwest, CoreError};
use crate::models::advisory::{Advisory, Recommendation};
use crate::models::metric::DashboardSnapshot;
use crate::sources::fetch::build_client;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Default model for the advisory call.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// External advisory collaborator: sends a finished snapshot to a
/// Gemini-style `generateContent` endpoint and maps the reply into a
/// closed `Advisory`.
///
/// The service never validates the model's reasoning, only that the
/// reply is structurally well-formed. A failure here is reported
/// independently and never invalidates the snapshot itself.
pub struct AdvisoryService {
    client: Client,
    api_key: String,
    model: String,
}

impl AdvisoryService {
    pub fn new(api_key: String) -> Self {
        Self::with_model(api_key, DEFAULT_MODEL)
    }

    pub fn with_model(api_key: String, model: impl Into<String>) -> Self {
        Self {
            client: build_client(),
            api_key,
            model: model.into(),
        }
    }

    /// Request a recommendation for one snapshot.
    ///
    /// Transport failures, non-success statuses, and empty candidate
    /// lists are `AdvisoryUnavailable`; a reply that arrives but does
    /// not contain the two required fields is `AdvisoryMalformed`.
    pub async fn analyze(&self, snapshot: &DashboardSnapshot) -> Result<Advisory, CoreError> {
        let prompt = build_prompt(snapshot);
        debug!(model = %self.model, "requesting advisory");

        let url = format!("{BASE_URL}/{}:generateContent?key={}", self.model, self.api_key);
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let resp = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| CoreError::AdvisoryUnavailable(sanitize_reqwest(&e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::AdvisoryUnavailable(format!(
                "HTTP status {status}"
            )));
        }

        let reply: GenerateContentResponse = resp
            .json()
            .await
            .map_err(|e| CoreError::AdvisoryUnavailable(sanitize_reqwest(&e)))?;

        let text = reply
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .ok_or_else(|| CoreError::AdvisoryUnavailable("empty reply".to_string()))?;

        parse_reply(&text)
    }
}

/// Build the analysis prompt from the snapshot: price pair plus one
/// `name: value (tooltip)` line per metric.
pub fn build_prompt(snapshot: &DashboardSnapshot) -> String {
    let mut summary = String::new();
    for m in &snapshot.metrics {
        summary.push_str(&format!(
            "- {}: {} ({})\n",
            m.name, m.current_value, m.tooltip
        ));
    }

    format!(
        "You are a cryptocurrency analyst specialized in Bitcoin on-chain data. \
Provide a short-term investment recommendation based on the following metrics.\n\n\
Current metrics:\n\
- Bitcoin price (USD): ${:.2}\n\
- Bitcoin price (BRL): R${:.2}\n\
{summary}\n\
Based only on the data above, decide whether the current market suggests \
an opportunity to BUY, SELL, or HOLD Bitcoin.\n\n\
Reply strictly as a JSON object with two keys:\n\
1. \"recommendation\": a single string, one of \"BUY\", \"SELL\", or \"HOLD\".\n\
2. \"justification\": a concise paragraph (2-3 sentences) explaining your \
reasoning from the interaction of the metrics.\n\n\
Your reply MUST be the JSON object only, with no markdown formatting (such \
as ```json) and no other text.",
        snapshot.price.usd, snapshot.price.brl
    )
}

/// Parse the model's reply text into an `Advisory`.
///
/// The model may wrap its JSON in markdown fences despite instructions;
/// both ```json and bare ``` fences are stripped. A missing field or
/// unparseable body is `AdvisoryMalformed`; an unrecognized
/// classification maps to `Recommendation::Error` rather than failing.
pub fn parse_reply(text: &str) -> Result<Advisory, CoreError> {
    let body = strip_fences(text.trim());

    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| CoreError::AdvisoryMalformed(format!("invalid JSON: {e}")))?;

    let recommendation = value
        .get("recommendation")
        .and_then(|v| v.as_str())
        .ok_or_else(|| {
            CoreError::AdvisoryMalformed("missing 'recommendation' field".to_string())
        })?;

    let justification = value
        .get("justification")
        .and_then(|v| v.as_str())
        .ok_or_else(|| {
            CoreError::AdvisoryMalformed("missing 'justification' field".to_string())
        })?;

    Ok(Advisory {
        recommendation: Recommendation::from_external(recommendation),
        justification: justification.to_string(),
    })
}

fn strip_fences(text: &str) -> &str {
    if let Some(rest) = text.strip_prefix("```json") {
        rest.strip_suffix("```").unwrap_or(rest).trim()
    } else if let Some(rest) = text.strip_prefix("```") {
        rest.strip_suffix("```").unwrap_or(rest).trim()
    } else {
        text
    }
}

// ── generateContent wire types ──────────────────────────────────────

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: String,
}
