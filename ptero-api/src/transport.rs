//! Blocking HTTP transport.
//!
//! The connection only ever needs one primitive: a GET with headers and a
//! timeout that yields a status and body. [`Transport`] is that seam;
//! [`HttpTransport`] implements it on top of `reqwest::blocking`.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use ptero_core::config::PanelConfig;
use ptero_core::constants;
use ptero_core::error::{PteroError, PteroResult};

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the panel answered 200. Any other status, including other
    /// 2xx codes, is a failure for every operation in this crate.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// A blocking GET primitive.
///
/// `Err` is reserved for transport-level failures (connect, TLS, timeout,
/// reading the body). Any status the panel returns is `Ok`.
pub trait Transport: Send + Sync {
    fn get(
        &self,
        url: &str,
        headers: &[(String, String)],
        timeout: Duration,
    ) -> PteroResult<HttpResponse>;
}

/// [`Transport`] backed by a pooled `reqwest::blocking::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    inner: Client,
}

impl HttpTransport {
    /// Build the HTTP client from panel configuration.
    pub fn new(config: &PanelConfig) -> PteroResult<Self> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(constants::CONNECT_TIMEOUT_SECS))
            .pool_max_idle_per_host(2)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(format!("{}/{}", constants::APP_NAME, constants::APP_VERSION));

        // Self-hosted panels frequently run on self-signed certificates
        if config.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let inner = builder
            .build()
            .map_err(|e| PteroError::Http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { inner })
    }

    /// Classify a reqwest error into a PteroError variant.
    fn classify_error(e: reqwest::Error) -> PteroError {
        if e.is_timeout() {
            PteroError::Timeout(e.to_string())
        } else if e.is_connect() {
            PteroError::Http(format!("connection failed: {e}"))
        } else {
            PteroError::Http(e.to_string())
        }
    }
}

impl Transport for HttpTransport {
    fn get(
        &self,
        url: &str,
        headers: &[(String, String)],
        timeout: Duration,
    ) -> PteroResult<HttpResponse> {
        debug!("GET {url}");

        let mut builder = self.inner.get(url).timeout(timeout);
        for (key, value) in headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        let response = builder.send().map_err(Self::classify_error)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(Self::classify_error)?;

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_200_is_ok() {
        assert!(HttpResponse::new(200, "{}").is_ok());
        assert!(!HttpResponse::new(204, "").is_ok());
        assert!(!HttpResponse::new(403, "forbidden").is_ok());
    }

    #[test]
    fn test_build_with_invalid_certs() {
        let mut config = PanelConfig::new("https://panel.test", "key");
        config.accept_invalid_certs = true;
        assert!(HttpTransport::new(&config).is_ok());
    }
}
