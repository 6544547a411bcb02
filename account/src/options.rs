use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Per request fetch options.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FetchOptions {
    /// Requested batch size, backend default if unset.
    pub count: Option<u32>,
    /// Per fetch timeout in milliseconds, unbounded if unset.
    pub timeout_ms: Option<u64>,
}

impl FetchOptions {
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}
