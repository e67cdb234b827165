use anyhow::{Context, Result};
use rand::Rng;
use reqwest::Client;
use shared::{
    domain::{FetchOutcome, UserRecord},
    error::FetchError,
    protocol::ApiEnvelope,
};
use tracing::{debug, warn};

pub const DEFAULT_API_URL: &str = "https://randomuser.me/api/";

/// Success draw threshold: `r > 0.66` yields the fetched record.
const SUCCESS_THRESHOLD: f64 = 0.66;
/// Empty draw threshold: `0.33 < r <= 0.66` yields no record.
const EMPTY_THRESHOLD: f64 = 0.33;
/// Failure code reported for the simulated-failure draw (`r <= 0.33`).
const SIMULATED_FAILURE_STATUS: i32 = 404;

/// Source of the uniform draw that decides how a well-formed response is
/// classified. Production uses the thread RNG; tests supply fixed draws.
pub trait OutcomeClassifier: Send + Sync {
    /// One uniform value in `[0, 1)`.
    fn draw(&self) -> f64;
}

pub struct ThreadRngClassifier;

impl OutcomeClassifier for ThreadRngClassifier {
    fn draw(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Maps a draw and the decoded result list onto the fetch outcome.
///
/// The draw deliberately simulates empty and failed responses so every view
/// state stays reachable against the live endpoint. A success draw with no
/// record behind it degrades to `Empty`, matching how the missing record
/// renders.
pub fn classify(draw: f64, results: Vec<UserRecord>) -> FetchOutcome {
    if draw > SUCCESS_THRESHOLD {
        match results.into_iter().next() {
            Some(record) => FetchOutcome::Success(record),
            None => FetchOutcome::Empty,
        }
    } else if draw > EMPTY_THRESHOLD {
        FetchOutcome::Empty
    } else {
        FetchOutcome::Failed(SIMULATED_FAILURE_STATUS)
    }
}

pub struct RandomUserClient {
    http: Client,
    api_url: String,
    classifier: Box<dyn OutcomeClassifier>,
}

impl RandomUserClient {
    pub fn new(api_url: impl Into<String>, classifier: impl OutcomeClassifier + 'static) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.into(),
            classifier: Box::new(classifier),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_API_URL, ThreadRngClassifier)
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Performs one GET against the endpoint and resolves it to an outcome.
    ///
    /// Total over all failure modes: non-200 statuses, malformed bodies and
    /// transport errors all surface as `FetchOutcome::Failed`, so callers
    /// match on a single tagged variant. No retries, no timeout, no
    /// cancellation; each invocation is one independent request.
    pub async fn fetch_random_user(&self) -> FetchOutcome {
        match self.query_endpoint().await {
            Ok(results) => {
                let draw = self.classifier.draw();
                let outcome = classify(draw, results);
                debug!(draw, ?outcome, "fetch resolved");
                outcome
            }
            Err(err) => {
                warn!("fetch failed: {err}");
                FetchOutcome::Failed(err.failure_code())
            }
        }
    }

    async fn query_endpoint(&self) -> Result<Vec<UserRecord>, FetchError> {
        let response = self
            .http
            .get(&self.api_url)
            .send()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        let envelope: ApiEnvelope = serde_json::from_slice(&body)
            .map_err(|err| FetchError::Parse(err.to_string()))?;

        // Only the first record is ever rendered.
        Ok(envelope
            .results
            .into_iter()
            .take(1)
            .map(UserRecord::from)
            .collect())
    }

    /// Downloads the portrait behind a record's picture URL as raw bytes.
    /// Decoding is the caller's concern.
    pub async fn fetch_portrait(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("failed to request portrait from {url}"))?
            .error_for_status()
            .with_context(|| format!("portrait endpoint rejected {url}"))?;

        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("failed to read portrait body from {url}"))?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests;
