//! Deployment profiles for the remote collection endpoint.

use std::time::Duration;

/// Connection profile for one deployment of the remote endpoint.
///
/// Host, per-request timeout, and retry budget are deployment configuration,
/// not core logic; the two stock profiles mirror the development and
/// production environments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiProfile {
    /// Base URL without the resource path.
    pub base_url: String,
    /// Per-request timeout applied by the HTTP client.
    pub timeout: Duration,
    /// Additional attempts allowed for idempotent reads.
    pub retry_attempts: u32,
}

impl ApiProfile {
    /// Local development profile: long timeout, generous retry budget.
    pub fn development() -> Self {
        Self {
            base_url: "http://localhost:3002".to_string(),
            timeout: Duration::from_secs(10),
            retry_attempts: 3,
        }
    }

    /// Production profile: tight timeout, two retries.
    pub fn production() -> Self {
        Self {
            base_url: "https://api.yourdomain.com".to_string(),
            timeout: Duration::from_secs(5),
            retry_attempts: 2,
        }
    }
}

impl Default for ApiProfile {
    fn default() -> Self {
        Self::development()
    }
}
