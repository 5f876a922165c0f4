//! Platform detection and per-OS directory lookup.

use std::path::PathBuf;
use crate::constants::APP_DIR_NAME;
use crate::error::{PteroError, PteroResult};

/// Detected operating system platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
}

impl Platform {
    /// Detect the current platform at compile time.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Linux
        }
    }

    /// Get the platform-specific data directory (log files live here).
    ///
    /// - Windows: `%APPDATA%/ptero`
    /// - macOS: `~/Library/Application Support/ptero`
    /// - Linux: `~/.local/share/ptero`
    pub fn data_dir() -> PteroResult<PathBuf> {
        let base = dirs::data_dir()
            .ok_or_else(|| PteroError::Config("could not determine data directory".into()))?;
        Ok(base.join(APP_DIR_NAME))
    }

    /// Get the platform-specific configuration directory.
    ///
    /// - Windows: `%APPDATA%/ptero`
    /// - macOS: `~/Library/Application Support/ptero`
    /// - Linux: `~/.config/ptero`
    pub fn config_dir() -> PteroResult<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| PteroError::Config("could not determine config directory".into()))?;
        Ok(base.join(APP_DIR_NAME))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Platform::Windows => "Windows",
            Platform::MacOs => "macOS",
            Platform::Linux => "Linux",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
