//! Low-level REST client for the check-in backend.

use std::sync::Arc;

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use sante_core::error::{Result, SanteError};
use sante_core::session::CredentialStore;

const DEFAULT_BASE_URL: &str = "https://api.sante-app.fr/public/api";

/// REST client carrying the shared HTTP connection pool and the credential
/// store the bearer token is read from.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    credentials: Arc<dyn CredentialStore>,
}

impl ApiClient {
    /// Creates a client against the production base URL.
    pub fn new(credentials: Arc<dyn CredentialStore>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, credentials)
    }

    /// Creates a client against a custom base URL (staging, tests).
    pub fn with_base_url(base_url: impl Into<String>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        }
    }

    pub(crate) fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.request(Method::GET, endpoint, Option::<&()>::None)
            .await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T> {
        self.request(Method::POST, endpoint, Some(body)).await
    }

    pub(crate) async fn delete(&self, endpoint: &str) -> Result<()> {
        let response = self.send(Method::DELETE, endpoint, Option::<&()>::None).await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::map_http_error(status, response.text().await.ok()))
        }
    }

    async fn request<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let response = self.send(method, endpoint, body).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Self::map_http_error(status, response.text().await.ok()));
        }

        response.json::<T>().await.map_err(|err| {
            SanteError::Serialization {
                format: "JSON".to_string(),
                message: format!("failed to decode response from '{}': {}", endpoint, err),
            }
        })
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!(%method, %url, "api request");

        let mut request = self
            .client
            .request(method, &url)
            .header("content-type", "application/json");
        if let Some(token) = self.credentials.access_token().await {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        request
            .send()
            .await
            .map_err(|err| SanteError::network(format!("request to '{}' failed: {}", url, err)))
    }

    fn map_http_error(status: StatusCode, body: Option<String>) -> SanteError {
        if status == StatusCode::UNAUTHORIZED {
            return SanteError::AuthExpired;
        }
        let message = match body {
            Some(text) => extract_server_message(&text).unwrap_or(text),
            None => "no response body".to_string(),
        };
        SanteError::server(status.as_u16(), message)
    }
}

/// Pulls a human-readable message out of an error body, if there is one.
fn extract_server_message(body: &str) -> Option<String> {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: String,
    }
    serde_json::from_str::<ErrorBody>(body)
        .map(|wrapper| wrapper.message)
        .ok()
}
