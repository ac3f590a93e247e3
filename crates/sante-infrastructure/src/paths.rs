//! Unified path management for sante configuration files.
//!
//! This ensures consistency across all platforms (Linux, macOS, Windows).

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for sante.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/sante/             # Config directory
/// ├── credentials.json         # Email, identity, token pair
/// ├── flags.toml               # Persistent application flags
/// └── pending/                 # Daily reports awaiting submission
///     └── <uuid>.json
/// ```
pub struct SantePaths;

impl SantePaths {
    /// Returns the sante configuration directory.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("sante"))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Path to the credentials file.
    pub fn credentials_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("credentials.json"))
    }

    /// Path to the persistent flags file.
    pub fn flags_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("flags.toml"))
    }

    /// Directory holding daily reports that are not submitted yet.
    pub fn pending_dir() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("pending"))
    }
}
