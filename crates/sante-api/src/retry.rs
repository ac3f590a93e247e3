//! Single-shot token refresh on authentication expiry.

use std::future::Future;

use async_trait::async_trait;

use sante_core::error::Result;
use sante_core::gateway::{AnswerSheet, BackendGateway};
use sante_core::report::DailyMetricsReport;
use sante_core::session::TokenPair;
use sante_core::user::{BasicUser, CurrentUserProfile};

/// Decorates a gateway with the auth-retry policy.
///
/// When a call fails with `AuthExpired`, exactly one re-registration is
/// attempted and the original call is retried once. A second `AuthExpired`
/// is surfaced to the caller as terminal; there is never a third attempt.
/// `register` itself passes through undecorated.
pub struct AuthRetryGateway<G> {
    inner: G,
}

impl<G: BackendGateway> AuthRetryGateway<G> {
    pub fn new(inner: G) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }

    async fn with_refresh<'a, T, F, Fut>(&'a self, call: F) -> Result<T>
    where
        F: Fn(&'a G) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        match call(&self.inner).await {
            Err(err) if err.is_auth_expired() => {
                tracing::info!("access token rejected, refreshing once");
                self.inner.register().await?;
                call(&self.inner).await
            }
            other => other,
        }
    }
}

#[async_trait]
impl<G: BackendGateway> BackendGateway for AuthRetryGateway<G> {
    async fn register(&self) -> Result<TokenPair> {
        self.inner.register().await
    }

    async fn post_initial_answers(&self, answers: &AnswerSheet) -> Result<CurrentUserProfile> {
        self.with_refresh(|gateway| gateway.post_initial_answers(answers))
            .await
    }

    async fn post_metric(&self, report: &DailyMetricsReport) -> Result<CurrentUserProfile> {
        self.with_refresh(|gateway| gateway.post_metric(report))
            .await
    }

    async fn retrieve_user(&self) -> Result<CurrentUserProfile> {
        self.with_refresh(|gateway| gateway.retrieve_user()).await
    }

    async fn retrieve_friends(&self) -> Result<Vec<BasicUser>> {
        self.with_refresh(|gateway| gateway.retrieve_friends()).await
    }

    async fn delete_friend(&self, id: i64) -> Result<()> {
        self.with_refresh(move |gateway| gateway.delete_friend(id))
            .await
    }
}
