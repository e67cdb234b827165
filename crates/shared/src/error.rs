use thiserror::Error;

/// Failure modes of the fetch operation, before they collapse into the
/// numeric code carried by `FetchOutcome::Failed`.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("endpoint returned status {0}")]
    Status(u16),
    #[error("malformed response body: {0}")]
    Parse(String),
    #[error("request failed: {0}")]
    Transport(String),
}

impl FetchError {
    /// Numeric code shown to the view layer. Non-200 statuses keep their
    /// status code; everything else is -1.
    pub fn failure_code(&self) -> i32 {
        match self {
            FetchError::Status(status) => i32::from(*status),
            FetchError::Parse(_) | FetchError::Transport(_) => -1,
        }
    }
}
