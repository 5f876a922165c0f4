//! Panel connection and API key classification.
//!
//! A key is opaque: the only way to learn which API surface it unlocks is to
//! try each one. [`Connection::connect`] probes the application (admin) API
//! first and the client API second, and freezes the outcome into the
//! connection's [`ApiMode`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use ptero_core::config::{AppConfig, PanelConfig};
use ptero_core::constants::paths;
use ptero_core::error::{PteroError, PteroResult};
use ptero_core::logging::{LogSink, TracingLog};

use crate::transport::{HttpResponse, HttpTransport, Transport};

/// Which API surface a key was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiMode {
    /// Neither probe returned 200, or a probe failed in transit.
    Unknown,
    /// Application API key.
    Admin,
    /// Account (client) API key.
    Client,
}

impl ApiMode {
    pub fn is_detected(&self) -> bool {
        !matches!(self, ApiMode::Unknown)
    }

    /// The surface requests should target, if the key was classified.
    pub fn surface(&self) -> Option<Surface> {
        match self {
            ApiMode::Admin => Some(Surface::Admin),
            ApiMode::Client => Some(Surface::Client),
            ApiMode::Unknown => None,
        }
    }
}

impl fmt::Display for ApiMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiMode::Unknown => write!(f, "unknown"),
            ApiMode::Admin => write!(f, "admin"),
            ApiMode::Client => write!(f, "client"),
        }
    }
}

/// A classified API surface. Unlike [`ApiMode`] there is no unknown case,
/// so anything holding a `Surface` can build requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    Admin,
    Client,
}

impl Surface {
    pub fn mode(&self) -> ApiMode {
        match self {
            Surface::Admin => ApiMode::Admin,
            Surface::Client => ApiMode::Client,
        }
    }

    /// Root path of the paginated server listing.
    pub fn list_path(&self) -> &'static str {
        match self {
            Surface::Admin => paths::ADMIN_SERVERS,
            Surface::Client => paths::CLIENT_ROOT,
        }
    }

    /// Root path under which single servers are fetched.
    pub fn detail_root(&self) -> &'static str {
        match self {
            Surface::Admin => paths::ADMIN_SERVERS,
            Surface::Client => paths::CLIENT_SERVERS,
        }
    }

    /// Only the application API filters by name server-side.
    pub fn supports_name_filter(&self) -> bool {
        matches!(self, Surface::Admin)
    }
}

/// A connection to one panel with a classified key.
///
/// Built once by [`Connection::connect`], which runs detection before
/// returning. Nothing about the connection changes afterwards.
pub struct Connection {
    panel_url: String,
    mode: ApiMode,
    headers: Vec<(String, String)>,
    request_timeout: Duration,
    debug: bool,
    transport: Arc<dyn Transport>,
    log: Arc<dyn LogSink>,
}

impl Connection {
    /// Connect over HTTP, logging through `tracing`.
    pub fn from_config(config: &PanelConfig) -> PteroResult<Self> {
        config.validate()?;
        let transport = HttpTransport::new(config)?;
        Ok(Self::connect(config, Arc::new(transport), Arc::new(TracingLog)))
    }

    /// Build a connection and classify its key.
    ///
    /// Always returns a connection. A key that could not be classified
    /// yields [`ApiMode::Unknown`], and every operation on it returns its
    /// empty result without issuing requests.
    pub fn connect(
        config: &PanelConfig,
        transport: Arc<dyn Transport>,
        log: Arc<dyn LogSink>,
    ) -> Self {
        let undetected = Self {
            panel_url: AppConfig::sanitize_panel_url(&config.url),
            mode: ApiMode::Unknown,
            headers: build_headers(&config.api_key, &config.custom_headers),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            debug: config.debug,
            transport,
            log,
        };

        let mode = undetected.detect(Duration::from_secs(config.probe_timeout_secs));
        Self { mode, ..undetected }
    }

    /// Probe admin, then client.
    ///
    /// A non-200 admin answer falls through to the client probe, but a
    /// transport failure on either probe ends detection as `Unknown`.
    fn detect(&self, timeout: Duration) -> ApiMode {
        let admin = match self.probe("Admin", paths::ADMIN_PROBE, timeout) {
            Ok(resp) => resp,
            Err(e) => {
                self.log.warning(&format!("Admin API check failed: {e}"));
                return ApiMode::Unknown;
            }
        };
        if admin.is_ok() {
            self.log.info("Logging in using static token");
            self.log.info("Admin API key detected.");
            return ApiMode::Admin;
        }

        let client = match self.probe("Client", paths::CLIENT_ROOT, timeout) {
            Ok(resp) => resp,
            Err(e) => {
                self.log.warning(&format!("Client API check failed: {e}"));
                return ApiMode::Unknown;
            }
        };
        if client.is_ok() {
            self.log.info("Logging in using static token");
            self.log.info("Client API key detected.");
            return ApiMode::Client;
        }

        self.log.error("Invalid API key or insufficient permissions.");
        ApiMode::Unknown
    }

    fn probe(&self, label: &str, path: &str, timeout: Duration) -> PteroResult<HttpResponse> {
        let start = Instant::now();
        let resp = self.transport.get(&self.url(path), &self.headers, timeout)?;
        if self.debug {
            self.log.debug(&format!(
                "{label} API check took {:.2} seconds",
                start.elapsed().as_secs_f64()
            ));
        }
        Ok(resp)
    }

    pub fn panel_url(&self) -> &str {
        &self.panel_url
    }

    pub fn mode(&self) -> ApiMode {
        self.mode
    }

    pub fn is_detected(&self) -> bool {
        self.mode.is_detected()
    }

    /// Headers sent with every request. Includes the bearer token.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn debug_enabled(&self) -> bool {
        self.debug
    }

    pub fn log(&self) -> &dyn LogSink {
        self.log.as_ref()
    }

    /// Absolute URL for a panel path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.panel_url)
    }

    /// GET `path` with the request timeout. Non-200 answers become
    /// `ServerError` carrying the status and body.
    pub(crate) fn get_ok(&self, path: &str) -> PteroResult<String> {
        let resp = self
            .transport
            .get(&self.url(path), &self.headers, self.request_timeout)?;
        if !resp.is_ok() {
            return Err(PteroError::ServerError {
                status: resp.status,
                message: resp.body,
            });
        }
        Ok(resp.body)
    }

    /// GET `path` and deserialize the body.
    pub(crate) fn get_json<T: DeserializeOwned>(&self, path: &str) -> PteroResult<T> {
        let body = self.get_ok(path)?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Log a failed request. Panel refusals are warnings with status and
    /// body. Transport failures and unreadable bodies are errors.
    pub(crate) fn report(&self, refused: &str, failed: &str, err: &PteroError) {
        match err {
            PteroError::ServerError { status, message } => {
                self.log.warning(&format!("{refused}: {status} - {message}"));
            }
            e if e.is_transport() => self.log.error(&format!("{failed}: {e}")),
            e => self.log.error(&format!("{failed}: unreadable response: {e}")),
        }
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header_names: Vec<&str> = self.headers.iter().map(|(k, _)| k.as_str()).collect();
        f.debug_struct("Connection")
            .field("panel_url", &self.panel_url)
            .field("api_key", &"********")
            .field("mode", &self.mode)
            .field("headers", &header_names)
            .field("request_timeout", &self.request_timeout)
            .field("debug", &self.debug)
            .finish()
    }
}

/// The three mandatory headers, followed by any configured extras.
fn build_headers(api_key: &str, custom: &HashMap<String, String>) -> Vec<(String, String)> {
    let mut headers = vec![
        ("Authorization".to_string(), format!("Bearer {api_key}")),
        ("Accept".to_string(), "application/json".to_string()),
        ("Content-Type".to_string(), "application/json".to_string()),
    ];

    let mut extras: Vec<_> = custom
        .iter()
        .filter(|(k, _)| {
            !headers
                .iter()
                .any(|(existing, _)| existing.eq_ignore_ascii_case(k))
        })
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    extras.sort();
    headers.extend(extras);
    headers
}
