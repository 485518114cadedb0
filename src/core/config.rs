//! Serializable logger configuration
//!
//! Holds the plain-data part of the setup (endpoint, credentials, labels,
//! initial MDC). Collaborators such as the receiver, transport, time source
//! and host lifecycle are attached on [`LoggerBuilder`](super::LoggerBuilder).

use super::error::{LoggerError, Result};
use crate::transport::StreamLabels;
use serde::{Deserialize, Serialize};

/// Grafana Cloud EU ingestion endpoint
pub const DEFAULT_LOKI_URL: &str = "https://logs-prod-eu-west-0.grafana.net";

/// Configuration for a [`Logger`](super::Logger)
///
/// # Example
///
/// ```
/// use loki_batch_logger::LoggerConfig;
///
/// let config = LoggerConfig::from_json(r#"{
///     "stream": {"app": "svc"},
///     "tenant_id": "team-a",
///     "mdc": [["region", "eu"]]
/// }"#).unwrap();
///
/// assert_eq!(config.url, "https://logs-prod-eu-west-0.grafana.net");
/// assert_eq!(config.mdc, vec![("region".to_string(), "eu".to_string())]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Base URL; the push path is appended at flush time
    pub url: String,
    /// Sent verbatim as `Authorization: Basic <secret>`
    pub secret: Option<String>,
    /// Sent as `X-Scope-OrgID`
    pub tenant_id: Option<String>,
    pub stream: StreamLabels,
    /// Initial MDC fields, in render order
    pub mdc: Vec<(String, String)>,
    /// Applied by the default HTTP transport only
    pub request_timeout_ms: Option<u64>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_LOKI_URL.to_string(),
            secret: None,
            tenant_id: None,
            stream: StreamLabels::new(),
            mdc: Vec::new(),
            request_timeout_ms: None,
        }
    }
}

impl LoggerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check values that would otherwise only fail at the first flush
    pub fn validate(&self) -> Result<()> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(LoggerError::config(
                "LoggerConfig",
                format!("url must start with http:// or https://, got '{}'", self.url),
            ));
        }
        if let Some(ref secret) = self.secret {
            check_header_value("Authorization", secret)?;
        }
        if let Some(ref tenant_id) = self.tenant_id {
            check_header_value("X-Scope-OrgID", tenant_id)?;
        }
        Ok(())
    }
}

fn check_header_value(name: &str, value: &str) -> Result<()> {
    if value.chars().any(|c| c.is_control()) {
        return Err(LoggerError::header(name, "contains control characters"));
    }
    Ok(())
}
