//! HTTP transport backed by reqwest

use super::{Transport, TransportRequest, TransportResponse};
use crate::core::{LoggerError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use std::time::Duration;

/// Default transport: one reqwest call per flushed batch
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout: None,
        }
    }

    /// Reuse an existing client (connection pool, proxy, TLS settings)
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            timeout: None,
        }
    }

    /// Per-request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn header_map(headers: &[(String, String)]) -> Result<HeaderMap> {
        let mut map = HeaderMap::with_capacity(headers.len());
        for (name, value) in headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| LoggerError::header(name.as_str(), e.to_string()))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| LoggerError::header(name.as_str(), e.to_string()))?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|e| LoggerError::transport(format!("invalid method '{}': {}", request.method, e)))?;
        let headers = Self::header_map(&request.headers)?;

        let mut builder = self
            .client
            .request(method, &request.url)
            .headers(headers)
            .body(request.body);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(TransportResponse::new(status, body))
    }
}
