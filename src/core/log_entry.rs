//! Log entry structure

use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};

/// One buffered log line awaiting the next flush
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp_nanos: u64,
    pub level: LogLevel,
    /// Message text with any error detail already appended
    pub message: String,
}

impl LogEntry {
    pub fn new(timestamp_nanos: u64, level: LogLevel, message: String) -> Self {
        Self {
            timestamp_nanos,
            level,
            message,
        }
    }

    /// Render the line shipped to Loki: `<mdc prefix>level=<level> <message>`
    pub fn render(&self, mdc_prefix: &str) -> String {
        let mut line =
            String::with_capacity(mdc_prefix.len() + self.message.len() + 16);
        line.push_str(mdc_prefix);
        line.push_str("level=");
        line.push_str(self.level.to_str());
        line.push(' ');
        line.push_str(&self.message);
        line
    }
}
