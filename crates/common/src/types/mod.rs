use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Error payload returned by the JSON surface for any failed request.
/// Shape: timestamp, numeric HTTP status, short reason, underlying message.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorBody {
    pub timestamp: String,
    pub status: u16,
    pub error: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(status: u16, error: &str, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            status,
            error: error.to_string(),
            message: message.into(),
        }
    }
}
