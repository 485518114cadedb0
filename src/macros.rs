//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`. The levels that
//! accept an error take it before the format string, separated by `;`.
//!
//! # Examples
//!
//! ```
//! use loki_batch_logger::prelude::*;
//! use loki_batch_logger::{info, warn};
//!
//! let logger = Logger::builder().receiver(NullReceiver).build().unwrap();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // With an error
//! let err = std::io::Error::new(std::io::ErrorKind::TimedOut, "timeout");
//! warn!(logger, err = &err; "Upstream {} slow", "billing");
//! assert_eq!(logger.pending_entries()[2].message, "Upstream billing slow timeout");
//! ```

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use loki_batch_logger::prelude::*;
/// # let logger = Logger::builder().receiver(NullReceiver).build().unwrap();
/// use loki_batch_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, err = $err:expr; $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+), Some($err))
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+), None)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use loki_batch_logger::prelude::*;
/// # let logger = Logger::builder().receiver(NullReceiver).build().unwrap();
/// use loki_batch_logger::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use loki_batch_logger::prelude::*;
/// # let logger = Logger::builder().receiver(NullReceiver).build().unwrap();
/// use loki_batch_logger::warn;
/// warn!(logger, "Low disk space");
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use loki_batch_logger::prelude::*;
/// # let logger = Logger::builder().receiver(NullReceiver).build().unwrap();
/// use loki_batch_logger::error;
/// let err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
/// error!(logger, "Failed to connect to database");
/// error!(logger, err = &err; "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
///
/// # Examples
///
/// ```
/// # use loki_batch_logger::prelude::*;
/// # let logger = Logger::builder().receiver(NullReceiver).build().unwrap();
/// use loki_batch_logger::fatal;
/// fatal!(logger, "Critical system failure");
/// fatal!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
