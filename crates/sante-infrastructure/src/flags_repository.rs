//! Persistent flags in `flags.toml`.
//!
//! Reads and writes the flags through an in-memory cache to avoid repeated
//! file I/O; every setter saves the full struct atomically.

use std::fs;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::NaiveTime;
use tokio::sync::Mutex;

use sante_core::error::Result;
use sante_core::state::{AppFlags, FlagsRepository};

use crate::atomic_file::write_atomic;
use crate::paths::SantePaths;

/// Flags repository backed by a TOML file.
pub struct TomlFlagsRepository {
    path: PathBuf,
    cache: Mutex<AppFlags>,
}

impl TomlFlagsRepository {
    /// Opens the repository at the default path, loading any existing file.
    pub fn new() -> Result<Self> {
        let path = SantePaths::flags_file()
            .map_err(|err| sante_core::SanteError::io(err.to_string()))?;
        Self::with_path(path)
    }

    /// Opens the repository at a custom path (tests).
    pub fn with_path(path: PathBuf) -> Result<Self> {
        let cache = Self::load(&path)?;
        Ok(Self {
            path,
            cache: Mutex::new(cache),
        })
    }

    fn load(path: &PathBuf) -> Result<AppFlags> {
        if !path.exists() {
            return Ok(AppFlags::default());
        }
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(AppFlags::default());
        }
        Ok(toml::from_str(&content)?)
    }

    async fn update<F>(&self, apply: F) -> Result<()>
    where
        F: FnOnce(&mut AppFlags),
    {
        let mut cache = self.cache.lock().await;
        apply(&mut cache);
        let content = toml::to_string_pretty(&*cache)?;
        write_atomic(&self.path, content.as_bytes())
    }
}

#[async_trait]
impl FlagsRepository for TomlFlagsRepository {
    async fn flags(&self) -> Result<AppFlags> {
        Ok(self.cache.lock().await.clone())
    }

    async fn set_initial_values_filled(&self, filled: bool) -> Result<()> {
        self.update(|flags| flags.initial_values_filled = filled)
            .await
    }

    async fn set_onboarding_was_shown(&self, shown: bool) -> Result<()> {
        self.update(|flags| flags.onboarding_was_shown = shown)
            .await
    }

    async fn set_reminder(&self, hour: Option<NaiveTime>, id: Option<String>) -> Result<()> {
        self.update(|flags| {
            flags.hour_for_notification = hour;
            flags.daily_notification_id = id;
        })
        .await
    }
}
