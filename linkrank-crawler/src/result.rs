use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Outcome of fetching a single seed URL. A failed fetch still produces a
/// record, with `body` unset and `error` describing what went wrong.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageFetch {
    pub url: String,
    pub status_code: u16,
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    pub response_time: Duration,
    pub body: Option<String>,
    pub error: Option<String>,
}

impl PageFetch {
    pub fn new(url: String) -> Self {
        Self {
            url,
            status_code: 0,
            content_type: None,
            content_length: None,
            response_time: Duration::from_secs(0),
            body: None,
            error: None,
        }
    }

    pub fn with_error(url: String, error: String) -> Self {
        Self {
            url,
            status_code: 0,
            content_type: None,
            content_length: None,
            response_time: Duration::from_secs(0),
            body: None,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.body.is_some()
    }
}
