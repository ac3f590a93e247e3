//! [`BackendGateway`] implementation over the REST client.

use async_trait::async_trait;

use sante_core::error::{Result, SanteError};
use sante_core::gateway::{AnswerSheet, BackendGateway};
use sante_core::report::DailyMetricsReport;
use sante_core::session::{CredentialStore, TokenPair};
use sante_core::user::{BasicUser, CurrentUserProfile};

use crate::client::ApiClient;
use crate::wire::{
    BasicUserDto, CurrentUserDto, MetricReportBody, RegisterRequest, RegisterResponse,
};

#[async_trait]
impl BackendGateway for ApiClient {
    async fn register(&self) -> Result<TokenPair> {
        let email = self
            .credentials()
            .email()
            .await
            .ok_or(SanteError::MissingEmail)?;

        let response: RegisterResponse = self
            .post_json("auth/register", &RegisterRequest { username: email })
            .await?;
        let tokens: TokenPair = response.into();

        // persist immediately so the next request carries the fresh token
        self.credentials().set_tokens(tokens.clone()).await?;
        tracing::info!("registered and stored fresh tokens");
        Ok(tokens)
    }

    async fn post_initial_answers(&self, answers: &AnswerSheet) -> Result<CurrentUserProfile> {
        let user: CurrentUserDto = self.post_json("report/initial", answers).await?;
        Ok(user.into_domain())
    }

    async fn post_metric(&self, report: &DailyMetricsReport) -> Result<CurrentUserProfile> {
        let body = MetricReportBody::from(report);
        let user: CurrentUserDto = self.post_json("report/metric", &body).await?;
        Ok(user.into_domain())
    }

    async fn retrieve_user(&self) -> Result<CurrentUserProfile> {
        let user: CurrentUserDto = self.get_json("user/current").await?;
        Ok(user.into_domain())
    }

    async fn retrieve_friends(&self) -> Result<Vec<BasicUser>> {
        let friends: Vec<BasicUserDto> = self.get_json("friend/listing").await?;
        Ok(friends.into_iter().map(BasicUserDto::into_domain).collect())
    }

    async fn delete_friend(&self, id: i64) -> Result<()> {
        self.delete(&format!("friend/{}", id)).await
    }
}
