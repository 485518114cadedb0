//! Main logger implementation
//!
//! The logger keeps every entry in memory until [`Logger::flush`] ships the
//! whole buffer as one Loki push request. Each entry is also forwarded to a
//! local [`LogReceiver`] the moment it is logged.

use super::{
    clock::{Clock, TimeSource},
    config::LoggerConfig,
    error::{LoggerError, Result},
    error_format::format_error,
    host::{HostLifecycle, WaitUntil},
    log_entry::LogEntry,
    log_level::LogLevel,
    mdc::{Mdc, MdcGuard},
    metrics::LoggerMetrics,
    receiver::LogReceiver,
};
use crate::receivers::ConsoleReceiver;
use crate::transport::{
    push_url, HttpTransport, PushRequest, StreamLabels, Transport, TransportRequest,
};
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use parking_lot::Mutex;
use std::error::Error;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

/// Debug note sent to the receiver when a flush finds nothing to send
pub const EMPTY_FLUSH_MESSAGE: &str = "logger has no messages to flush";

pub struct Logger {
    buffer: Mutex<Vec<LogEntry>>,
    mdc: Arc<Mutex<Mdc>>,
    stream: StreamLabels,
    push_url: String,
    secret: Option<String>,
    tenant_id: Option<String>,
    clock: Clock,
    receiver: Arc<dyn LogReceiver>,
    transport: Arc<dyn Transport>,
    host: HostLifecycle,
    /// Metrics for observability (captured lines, batches, failures)
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Build a logger from configuration with the default collaborators
    pub fn new(config: LoggerConfig) -> Result<Self> {
        LoggerBuilder::from_config(config).build()
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use loki_batch_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .url("http://localhost:3100")
    ///     .stream_label("app", "svc")
    ///     .receiver(NullReceiver)
    ///     .build()
    ///     .unwrap();
    /// assert!(logger.is_empty());
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn mdc_set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.mdc.lock().set(key, value);
    }

    pub fn mdc_delete(&self, key: &str) {
        self.mdc.lock().delete(key);
    }

    pub fn mdc_get(&self, key: &str) -> Option<String> {
        self.mdc.lock().get(key).map(str::to_string)
    }

    /// Rendered MDC prefix, `key=value ` per field
    pub fn mdc_format_string(&self) -> String {
        self.mdc.lock().format_prefix()
    }

    /// Set an MDC field for as long as the returned guard lives
    #[must_use = "the field is removed as soon as the guard is dropped"]
    pub fn mdc_scope(&self, key: impl Into<String>, value: impl Into<String>) -> MdcGuard {
        let key = key.into();
        self.mdc.lock().set(key.clone(), value);
        MdcGuard::new(Arc::clone(&self.mdc), key)
    }

    /// Capture one entry and forward it to the receiver
    ///
    /// A present `error` is appended to the message as `" " + format_error(error)`.
    pub fn log(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        error: Option<&(dyn Error + 'static)>,
    ) {
        let mut message = message.into();
        if let Some(error) = error {
            message.push(' ');
            message.push_str(&format_error(error));
        }

        let forwarded = self.mdc_format_string() + &message;

        {
            // Timestamp under the buffer lock so buffer order matches timestamp order
            let mut buffer = self.buffer.lock();
            let timestamp = self.clock.now_nanos();
            buffer.push(LogEntry::new(timestamp, level, message));
        }
        self.metrics.record_logged();

        match level {
            LogLevel::Info => self.receiver.info(&forwarded),
            LogLevel::Warn => self.receiver.warn(&forwarded, error),
            LogLevel::Error | LogLevel::Fatal => self.receiver.error(&forwarded, error),
        }
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message, None);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>, error: Option<&(dyn Error + 'static)>) {
        self.log(LogLevel::Warn, message, error);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>, error: Option<&(dyn Error + 'static)>) {
        self.log(LogLevel::Error, message, error);
    }

    #[inline]
    pub fn fatal(&self, message: impl Into<String>, error: Option<&(dyn Error + 'static)>) {
        self.log(LogLevel::Fatal, message, error);
    }

    /// Ship every buffered entry as one push request
    ///
    /// The buffer is emptied before the first suspension point, so entries
    /// logged while delivery is in flight go into the next batch. Delivery
    /// failures are reported to the receiver and never returned.
    ///
    /// With [`HostLifecycle::WaitUntil`] the delivery is registered with the
    /// host and this resolves once registration does; otherwise it resolves
    /// when delivery finishes.
    pub async fn flush(&self) {
        let Some(entries) = self.take_entries() else {
            self.metrics.record_empty_flush();
            self.receiver.debug(EMPTY_FLUSH_MESSAGE);
            return;
        };

        let request = self.build_request(&entries);
        self.metrics.record_batch(entries.len());
        let delivery = self.delivery(request, entries.len());
        self.host.complete(delivery).await;
    }

    /// Swap the buffer out in a single step
    fn take_entries(&self) -> Option<Vec<LogEntry>> {
        let mut buffer = self.buffer.lock();
        if buffer.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut *buffer))
    }

    fn build_request(&self, entries: &[LogEntry]) -> Result<TransportRequest> {
        let mdc_prefix = self.mdc_format_string();
        let body = PushRequest::from_entries(&self.stream, &mdc_prefix, entries);

        let mut request = TransportRequest::post(&self.push_url, serde_json::to_string(&body)?)
            .with_header("Content-Type", "application/json");
        if let Some(ref secret) = self.secret {
            request = request.with_header("Authorization", format!("Basic {}", secret));
        }
        if let Some(ref tenant_id) = self.tenant_id {
            request = request.with_header("X-Scope-OrgID", tenant_id.as_str());
        }
        Ok(request)
    }

    /// Owned delivery task; reports its outcome to the receiver
    fn delivery(&self, request: Result<TransportRequest>, lines: usize) -> BoxFuture<'static, ()> {
        let transport = Arc::clone(&self.transport);
        let receiver = Arc::clone(&self.receiver);
        let metrics = Arc::clone(&self.metrics);

        Box::pin(async move {
            let outcome = match request {
                Ok(request) => AssertUnwindSafe(transport.send(request))
                    .catch_unwind()
                    .await
                    .unwrap_or_else(|panic_info| {
                        let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                            s.to_string()
                        } else if let Some(s) = panic_info.downcast_ref::<String>() {
                            s.clone()
                        } else {
                            "Unknown panic".to_string()
                        };
                        Err(LoggerError::transport(format!(
                            "transport panicked: {}",
                            panic_msg
                        )))
                    }),
                Err(e) => Err(e),
            };

            match outcome {
                Ok(response) if response.is_success() => {
                    receiver.info(&response.to_string());
                }
                Ok(response) => {
                    metrics.record_delivery_failure();
                    receiver.warn(
                        &format!("push of {} log lines was rejected: {}", lines, response),
                        None,
                    );
                }
                Err(e) => {
                    metrics.record_delivery_failure();
                    receiver.error(
                        &format!("failed to push {} log lines: {}", lines, e),
                        None,
                    );
                }
            }
        })
    }

    /// Number of entries waiting for the next flush
    pub fn len(&self) -> usize {
        self.buffer.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }

    /// Copy of the buffered entries, oldest first
    pub fn pending_entries(&self) -> Vec<LogEntry> {
        self.buffer.lock().clone()
    }

    pub fn stream(&self) -> &StreamLabels {
        &self.stream
    }

    pub fn push_url(&self) -> &str {
        &self.push_url
    }

    pub fn host_lifecycle(&self) -> &HostLifecycle {
        &self.host
    }

    /// Get the logger metrics for detailed observability
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        let pending = self.buffer.get_mut().len();
        if pending > 0 {
            self.receiver.warn(
                &format!(
                    "logger dropped with {} unflushed log lines; they will not be delivered",
                    pending
                ),
                None,
            );
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use loki_batch_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .url("https://logs-prod-eu-west-0.grafana.net")
///     .secret("dXNlcjpwYXNz")
///     .tenant_id("team-a")
///     .stream_label("app", "svc")
///     .mdc("region", "eu")
///     .time_source(|count| 1_700_000_000_000 * 1_000_000 + count)
///     .build()
///     .unwrap();
///
/// assert_eq!(logger.mdc_format_string(), "region=eu ");
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    receiver: Option<Arc<dyn LogReceiver>>,
    transport: Option<Arc<dyn Transport>>,
    time_source: Option<TimeSource>,
    host: HostLifecycle,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::from_config(LoggerConfig::default())
    }

    pub fn from_config(config: LoggerConfig) -> Self {
        Self {
            config,
            receiver: None,
            transport: None,
            time_source: None,
            host: HostLifecycle::None,
        }
    }

    /// Base URL of the Loki endpoint
    #[must_use = "builder methods return a new value"]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.config.url = url.into();
        self
    }

    /// Shared secret sent verbatim as `Authorization: Basic <secret>`
    #[must_use = "builder methods return a new value"]
    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.config.secret = Some(secret.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn tenant_id(mut self, tenant_id: impl Into<String>) -> Self {
        self.config.tenant_id = Some(tenant_id.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn stream_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.stream.insert(key.into(), value.into());
        self
    }

    /// Replace all stream labels
    #[must_use = "builder methods return a new value"]
    pub fn stream(mut self, labels: StreamLabels) -> Self {
        self.config.stream = labels;
        self
    }

    /// Add an initial MDC field
    #[must_use = "builder methods return a new value"]
    pub fn mdc(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.mdc.push((key.into(), value.into()));
        self
    }

    /// Timeout for the default HTTP transport
    #[must_use = "builder methods return a new value"]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    /// Local receiver; defaults to [`ConsoleReceiver`]
    #[must_use = "builder methods return a new value"]
    pub fn receiver<R: LogReceiver + 'static>(mut self, receiver: R) -> Self {
        self.receiver = Some(Arc::new(receiver));
        self
    }

    /// Share a receiver the caller keeps a handle to
    #[must_use = "builder methods return a new value"]
    pub fn shared_receiver(mut self, receiver: Arc<dyn LogReceiver>) -> Self {
        self.receiver = Some(receiver);
        self
    }

    /// Transport; defaults to [`HttpTransport`]
    #[must_use = "builder methods return a new value"]
    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn shared_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Time source called with the per-logger call counter, returning nanoseconds
    #[must_use = "builder methods return a new value"]
    pub fn time_source<F>(mut self, source: F) -> Self
    where
        F: Fn(u64) -> u64 + Send + Sync + 'static,
    {
        self.time_source = Some(Arc::new(source));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn host_lifecycle(mut self, host: HostLifecycle) -> Self {
        self.host = host;
        self
    }

    /// Register deliveries with a host "keep running after response" hook
    #[must_use = "builder methods return a new value"]
    pub fn wait_until<W: WaitUntil + 'static>(mut self, hook: W) -> Self {
        self.host = HostLifecycle::wait_until(hook);
        self
    }

    /// Build the Logger
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is not http(s) or the secret or tenant
    /// cannot be sent as a header value.
    pub fn build(self) -> Result<Logger> {
        self.config.validate()?;

        let LoggerConfig {
            url,
            secret,
            tenant_id,
            stream,
            mdc,
            request_timeout_ms,
        } = self.config;

        let transport = self.transport.unwrap_or_else(|| {
            let mut transport = HttpTransport::new();
            if let Some(ms) = request_timeout_ms {
                transport = transport.with_timeout(Duration::from_millis(ms));
            }
            Arc::new(transport)
        });
        let receiver = self
            .receiver
            .unwrap_or_else(|| Arc::new(ConsoleReceiver::new()));
        let clock = match self.time_source {
            Some(source) => Clock::new(source),
            None => Clock::default(),
        };

        Ok(Logger {
            buffer: Mutex::new(Vec::new()),
            mdc: Arc::new(Mutex::new(mdc.into_iter().collect())),
            stream,
            push_url: push_url(&url),
            secret,
            tenant_id,
            clock,
            receiver,
            transport,
            host: self.host,
            metrics: Arc::new(LoggerMetrics::new()),
        })
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
