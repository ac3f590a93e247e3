//! Backend gateway port.
//!
//! The complete operation surface of the check-in backend. Implementations
//! attach a bearer token when one is present; an authentication-expired
//! failure surfaces as [`SanteError::AuthExpired`](crate::SanteError) so the
//! retry policy can recover it.

use async_trait::async_trait;

use crate::error::Result;
use crate::report::DailyMetricsReport;
use crate::session::TokenPair;
use crate::user::{BasicUser, CurrentUserProfile};

/// The `{questionKey: answerToken}` payload of the initial questionnaire,
/// in catalog order.
pub type AnswerSheet = serde_json::Map<String, serde_json::Value>;

#[async_trait]
pub trait BackendGateway: Send + Sync {
    /// Exchanges the locally known email for a fresh token pair.
    ///
    /// # Errors
    ///
    /// Fails with `MissingEmail` when no email is available locally.
    async fn register(&self) -> Result<TokenPair>;

    /// Submits the one-time initial profile answers.
    async fn post_initial_answers(&self, answers: &AnswerSheet) -> Result<CurrentUserProfile>;

    /// Submits one daily metrics report.
    async fn post_metric(&self, report: &DailyMetricsReport) -> Result<CurrentUserProfile>;

    /// Fetches the signed-in user with their report history.
    async fn retrieve_user(&self) -> Result<CurrentUserProfile>;

    /// Fetches the friend list.
    async fn retrieve_friends(&self) -> Result<Vec<BasicUser>>;

    /// Removes a friend.
    async fn delete_friend(&self, id: i64) -> Result<()>;
}
