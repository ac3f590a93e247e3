//! Process-wide authentication state and its storage port.
//!
//! The concrete store is an external collaborator (a keychain on device, a
//! file in tests and on the desktop); the core only sees this interface.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Everything the app persists about the signed-in user.
///
/// Tokens are absent until a registration/login exchange succeeds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: Option<String>,
    pub name: Option<String>,
    pub firstname: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

/// The token pair returned by a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Secure, durable credential storage.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// A snapshot of everything currently stored.
    async fn credentials(&self) -> Credentials;

    async fn email(&self) -> Option<String> {
        self.credentials().await.email
    }

    async fn access_token(&self) -> Option<String> {
        self.credentials().await.access_token
    }

    async fn set_email(&self, email: String) -> Result<()>;

    /// Stores the user's name as collected during onboarding.
    async fn set_identity(&self, name: String, firstname: String) -> Result<()>;

    /// Stores a fresh token pair, replacing any previous one.
    async fn set_tokens(&self, tokens: TokenPair) -> Result<()>;

    /// Wipes every stored credential (logout or irrecoverable auth failure).
    async fn clear(&self) -> Result<()>;

    /// Token presence is what "logged in" means.
    async fn is_logged_in(&self) -> bool {
        self.access_token().await.is_some()
    }
}
