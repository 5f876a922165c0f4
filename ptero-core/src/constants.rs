//! Application-wide constants.

/// Application name.
pub const APP_NAME: &str = "ptero";

/// Application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Directory name used under the platform config/data dirs.
pub const APP_DIR_NAME: &str = "ptero";

/// Timeout for each capability probe, in seconds.
pub const PROBE_TIMEOUT_SECS: u64 = 5;

/// Timeout for list and detail requests, in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Connect timeout applied to the underlying HTTP client, in seconds.
pub const CONNECT_TIMEOUT_SECS: u64 = 5;

/// Environment variable the CLI reads the API key from.
pub const API_KEY_ENV: &str = "PTERO_API_KEY";

/// Panel REST paths.
pub mod paths {
    /// Admin probe. Only application (admin) keys can list users.
    pub const ADMIN_PROBE: &str = "/api/application/users";
    /// Client probe and client server listing share this path.
    pub const CLIENT_ROOT: &str = "/api/client";
    /// Admin server listing and detail root.
    pub const ADMIN_SERVERS: &str = "/api/application/servers";
    /// Client server detail root.
    pub const CLIENT_SERVERS: &str = "/api/client/servers";
}
