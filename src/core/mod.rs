//! Core logger types and traits

pub mod clock;
pub mod config;
pub mod error;
pub mod error_format;
pub mod host;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod mdc;
pub mod metrics;
pub mod receiver;

pub use clock::{wall_clock_nanos, Clock, TimeSource};
pub use config::{LoggerConfig, DEFAULT_LOKI_URL};
pub use error::{LoggerError, Result};
pub use error_format::format_error;
pub use host::{HostLifecycle, TokioSpawn, WaitUntil};
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder, EMPTY_FLUSH_MESSAGE};
pub use mdc::{Mdc, MdcGuard};
pub use metrics::LoggerMetrics;
pub use receiver::LogReceiver;
