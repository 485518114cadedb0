//! Shared test doubles for the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use loki_batch_logger::prelude::*;
use parking_lot::Mutex;
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Notify;

/// Receiver that records `(channel, message, had_error)` tuples
#[derive(Default)]
pub struct RecordingReceiver {
    lines: Mutex<Vec<(&'static str, String, bool)>>,
}

impl RecordingReceiver {
    pub fn lines(&self) -> Vec<(&'static str, String, bool)> {
        self.lines.lock().clone()
    }

    pub fn messages_on(&self, channel: &str) -> Vec<String> {
        self.lines
            .lock()
            .iter()
            .filter(|(c, _, _)| *c == channel)
            .map(|(_, m, _)| m.clone())
            .collect()
    }

    fn push(&self, channel: &'static str, message: &str, had_error: bool) {
        self.lines.lock().push((channel, message.to_string(), had_error));
    }
}

impl LogReceiver for RecordingReceiver {
    fn debug(&self, message: &str) {
        self.push("debug", message, false);
    }
    fn info(&self, message: &str) {
        self.push("info", message, false);
    }
    fn warn(&self, message: &str, error: Option<&(dyn Error + 'static)>) {
        self.push("warn", message, error.is_some());
    }
    fn error(&self, message: &str, error: Option<&(dyn Error + 'static)>) {
        self.push("error", message, error.is_some());
    }
}

/// Transport that records every request and answers 204
#[derive(Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<TransportRequest>>,
}

impl RecordingTransport {
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().clone()
    }

    /// Parsed `values` of the n-th request
    pub fn values(&self, n: usize) -> Vec<(String, String)> {
        let body = &self.requests.lock()[n].body;
        let parsed: loki_batch_logger::PushRequest =
            serde_json::from_str(body).expect("push body is valid JSON");
        parsed.streams[0].values.clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        self.requests.lock().push(request);
        Ok(TransportResponse::new(204, ""))
    }
}

/// Transport that always fails
pub struct FailingTransport;

#[async_trait]
impl Transport for FailingTransport {
    async fn send(&self, _request: TransportRequest) -> Result<TransportResponse> {
        Err(LoggerError::transport("connection reset by peer"))
    }
}

/// Transport that parks every request until released
#[derive(Default)]
pub struct GatedTransport {
    pub started: Notify,
    pub release: Notify,
    pub inner: RecordingTransport,
}

#[async_trait]
impl Transport for GatedTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        self.started.notify_one();
        self.release.notified().await;
        self.inner.send(request).await
    }
}

/// Minimal error value with a fixed message
#[derive(Debug)]
pub struct TestError(pub &'static str);

impl fmt::Display for TestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Error for TestError {}

pub fn frozen_clock(millis: u64) -> impl Fn(u64) -> u64 + Send + Sync + 'static {
    move |count| millis * 1_000_000 + count
}

pub fn logger_with(
    receiver: Arc<RecordingReceiver>,
    transport: Arc<dyn Transport>,
) -> Logger {
    Logger::builder()
        .url("http://loki.local:3100")
        .stream_label("app", "svc")
        .shared_receiver(receiver)
        .shared_transport(transport)
        .build()
        .expect("valid logger config")
}
