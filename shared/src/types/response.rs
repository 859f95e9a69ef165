//! API response types shared across server crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error body serialized on failed requests
///
/// `error` is a stable machine-readable code; `message` is for humans.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}
