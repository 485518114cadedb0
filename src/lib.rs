//! # Loki Batch Logger
//!
//! A buffering structured logger that ships its lines to a Loki push
//! endpoint in one request per flush.
//!
//! ## Features
//!
//! - **Mapped Diagnostic Context**: ordered `key=value` fields prefixed to every line
//! - **Batching**: entries stay in memory until `flush`, then go out as one POST
//! - **Serverless Friendly**: deliveries can be handed to a host `waitUntil` hook
//! - **Never Fails the Caller**: delivery errors are reported locally and dropped

pub mod core;
pub mod macros;
pub mod receivers;
pub mod transport;

pub mod prelude {
    pub use crate::receivers::{ConsoleReceiver, NullReceiver};
    pub use crate::core::{
        format_error, HostLifecycle, LogEntry, LogLevel, LogReceiver, Logger, LoggerBuilder,
        LoggerConfig, LoggerError, LoggerMetrics, Mdc, MdcGuard, Result, TokioSpawn, WaitUntil,
    };
    pub use crate::transport::{
        HttpTransport, StreamLabels, Transport, TransportRequest, TransportResponse,
    };
}

pub use receivers::{ConsoleReceiver, NullReceiver};
pub use core::{
    format_error, wall_clock_nanos, Clock, HostLifecycle, LogEntry, LogLevel, LogReceiver,
    Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Mdc, MdcGuard, Result,
    TimeSource, TokioSpawn, WaitUntil, DEFAULT_LOKI_URL, EMPTY_FLUSH_MESSAGE,
};
pub use transport::{
    HttpTransport, PushRequest, PushStream, StreamLabels, Transport, TransportRequest,
    TransportResponse,
};
