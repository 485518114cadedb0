//! Loki push API body
//!
//! ```text
//! {"streams":[{"stream":{"app":"svc"},"values":[["<ns>","<line>"],...]}]}
//! ```

use crate::core::LogEntry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Labels identifying the log stream, fixed for a logger's lifetime
pub type StreamLabels = BTreeMap<String, String>;

/// Path appended to the configured base URL
pub const PUSH_PATH: &str = "/loki/api/v1/push";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushRequest {
    pub streams: Vec<PushStream>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushStream {
    pub stream: StreamLabels,
    /// `(timestamp in nanoseconds as a decimal string, rendered line)`
    pub values: Vec<(String, String)>,
}

impl PushRequest {
    /// One stream carrying every entry, in order, behind the same MDC prefix
    pub fn from_entries(labels: &StreamLabels, mdc_prefix: &str, entries: &[LogEntry]) -> Self {
        let values = entries
            .iter()
            .map(|entry| (entry.timestamp_nanos.to_string(), entry.render(mdc_prefix)))
            .collect();

        Self {
            streams: vec![PushStream {
                stream: labels.clone(),
                values,
            }],
        }
    }

    pub fn line_count(&self) -> usize {
        self.streams.iter().map(|s| s.values.len()).sum()
    }
}

/// Join the base URL and [`PUSH_PATH`] without doubling the slash
pub fn push_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), PUSH_PATH)
}
