//! CLI command implementations.

pub mod config;
pub mod detect;
pub mod servers;

use ptero_api::Connection;
use ptero_core::config::AppConfig;
use ptero_core::error::{PteroError, PteroResult};

/// Connect to the configured panel and require a classified key.
pub fn connect(config: &AppConfig) -> PteroResult<Connection> {
    let conn = Connection::from_config(&config.panel)?;
    if !conn.is_detected() {
        return Err(PteroError::Unclassified);
    }
    Ok(conn)
}

/// Mask all but the first few characters of a secret.
pub fn mask(secret: &str) -> String {
    if secret.is_empty() {
        return String::new();
    }
    let visible: String = secret.chars().take(5).collect();
    format!("{visible}********")
}

/// Truncate a string to a maximum length, appending an ellipsis if truncated.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    } else {
        s.chars().take(max_len).collect()
    }
}

/// Render an optional value, or a dash when absent.
pub fn or_dash<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask() {
        assert_eq!(mask("ptla_abcdef123"), "ptla_********");
        assert_eq!(mask(""), "");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer server name", 10), "a longe...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(Some(3)), "3");
        assert_eq!(or_dash::<i64>(None), "-");
    }
}
