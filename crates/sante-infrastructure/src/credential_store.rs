//! File-backed credential storage.
//!
//! Stands in for the device keychain: a plaintext JSON file under the
//! config directory, cached in memory behind a mutex. The file should carry
//! restrictive permissions (e.g. 600); encryption is out of scope here.

use std::fs;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;

use sante_core::error::Result;
use sante_core::session::{CredentialStore, Credentials, TokenPair};

use crate::atomic_file::write_atomic;
use crate::paths::SantePaths;

/// Credential storage in `credentials.json`.
pub struct FileCredentialStore {
    path: PathBuf,
    cache: Mutex<Credentials>,
}

impl FileCredentialStore {
    /// Opens the store at the default path, loading any existing file.
    pub fn new() -> Result<Self> {
        let path = SantePaths::credentials_file()
            .map_err(|err| sante_core::SanteError::io(err.to_string()))?;
        Self::with_path(path)
    }

    /// Opens the store at a custom path (tests).
    pub fn with_path(path: PathBuf) -> Result<Self> {
        let cache = Self::load(&path)?;
        Ok(Self {
            path,
            cache: Mutex::new(cache),
        })
    }

    fn load(path: &PathBuf) -> Result<Credentials> {
        if !path.exists() {
            return Ok(Credentials::default());
        }
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Credentials::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    async fn update<F>(&self, apply: F) -> Result<()>
    where
        F: FnOnce(&mut Credentials),
    {
        let mut cache = self.cache.lock().await;
        apply(&mut cache);
        let content = serde_json::to_vec_pretty(&*cache)?;
        write_atomic(&self.path, &content)
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn credentials(&self) -> Credentials {
        self.cache.lock().await.clone()
    }

    async fn set_email(&self, email: String) -> Result<()> {
        self.update(|credentials| credentials.email = Some(email))
            .await
    }

    async fn set_identity(&self, name: String, firstname: String) -> Result<()> {
        self.update(|credentials| {
            credentials.name = Some(name);
            credentials.firstname = Some(firstname);
        })
        .await
    }

    async fn set_tokens(&self, tokens: TokenPair) -> Result<()> {
        self.update(|credentials| {
            credentials.access_token = Some(tokens.access_token);
            credentials.refresh_token = Some(tokens.refresh_token);
        })
        .await
    }

    async fn clear(&self) -> Result<()> {
        self.update(|credentials| *credentials = Credentials::default())
            .await
    }
}
