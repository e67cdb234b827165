use serde::{Deserialize, Serialize};

/// A person record as consumed by the UI, flattened from the wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub name_first: String,
    pub name_last: String,
    pub email: String,
    pub picture_url: Option<String>,
}

impl UserRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name_first, self.name_last)
    }
}

/// Resolution of a single fetch. `Failed` carries the HTTP status for non-200
/// responses, 404 for the simulated failure draw, and -1 for parse/transport
/// errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum FetchOutcome {
    Success(UserRecord),
    Empty,
    Failed(i32),
}
