//! Error types shared by the ptero crates.
//!
//! Every failure category is unified into a single `PteroError` enum with
//! conversions from the underlying library errors.

use thiserror::Error;

/// Convenience type alias for Results using PteroError.
pub type PteroResult<T> = Result<T, PteroError>;

/// Unified error type.
#[derive(Error, Debug)]
pub enum PteroError {
    // -- Configuration errors --
    /// Failed to load or parse configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A required configuration value is missing.
    #[error("missing configuration: {0}")]
    MissingConfig(String),

    // -- Network errors --
    /// HTTP request failed before a response was received.
    #[error("http error: {0}")]
    Http(String),

    /// HTTP request timed out.
    #[error("request timeout: {0}")]
    Timeout(String),

    /// The panel answered with a status other than 200.
    #[error("server error (status {status}): {message}")]
    ServerError {
        /// HTTP status code.
        status: u16,
        /// Response body as returned by the panel.
        message: String,
    },

    /// Neither panel API accepted the key.
    #[error("API key was not accepted by the application or client API")]
    Unclassified,

    // -- File/IO errors --
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl PteroError {
    /// Whether this error came from the transport rather than from the panel.
    pub fn is_transport(&self) -> bool {
        matches!(self, PteroError::Http(_) | PteroError::Timeout(_))
    }
}

impl From<serde_json::Error> for PteroError {
    fn from(e: serde_json::Error) -> Self {
        PteroError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for PteroError {
    fn from(e: toml::de::Error) -> Self {
        PteroError::Config(e.to_string())
    }
}
