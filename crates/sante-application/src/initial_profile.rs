//! Submission of the one-time initial profile questionnaire.

use std::sync::Arc;

use sante_core::answer::AnswerSet;
use sante_core::catalog::Catalog;
use sante_core::error::Result;
use sante_core::gateway::BackendGateway;
use sante_core::state::FlagsRepository;
use sante_core::user::CurrentUserProfile;

/// Serializes a completed initial-profile answer set and delivers it.
///
/// On success the persistent `initial_values_filled` flag is set so the
/// flow never re-triggers. On failure the answer set is deliberately left
/// untouched: whether to retry or abandon is the caller's decision.
pub struct InitialProfileSubmitter {
    gateway: Arc<dyn BackendGateway>,
    flags: Arc<dyn FlagsRepository>,
    catalog: Catalog,
}

impl InitialProfileSubmitter {
    pub fn new(gateway: Arc<dyn BackendGateway>, flags: Arc<dyn FlagsRepository>) -> Self {
        Self {
            gateway,
            flags,
            catalog: Catalog::initial_profile(),
        }
    }

    /// Whether the initial flow still needs to run.
    pub async fn is_needed(&self) -> Result<bool> {
        Ok(!self.flags.flags().await?.initial_values_filled)
    }

    /// Posts the answers and marks the questionnaire as filled.
    pub async fn submit(&self, answers: &AnswerSet) -> Result<CurrentUserProfile> {
        let sheet = answers.wire_map(&self.catalog)?;
        let user = self.gateway.post_initial_answers(&sheet).await?;
        self.flags.set_initial_values_filled(true).await?;
        tracing::info!("initial profile submitted");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveTime;
    use sante_core::answer::AnswerValue;
    use sante_core::error::SanteError;
    use sante_core::gateway::AnswerSheet;
    use sante_core::report::DailyMetricsReport;
    use sante_core::session::TokenPair;
    use sante_core::state::AppFlags;
    use sante_core::user::{BasicUser, UserProfile};
    use std::sync::Mutex;

    struct MockGateway {
        fail: bool,
        received: Mutex<Option<AnswerSheet>>,
    }

    #[async_trait]
    impl BackendGateway for MockGateway {
        async fn register(&self) -> Result<TokenPair> {
            unimplemented!()
        }
        async fn post_initial_answers(&self, answers: &AnswerSheet) -> Result<CurrentUserProfile> {
            if self.fail {
                return Err(SanteError::server(500, "unavailable"));
            }
            *self.received.lock().unwrap() = Some(answers.clone());
            Ok(CurrentUserProfile {
                profile: UserProfile {
                    id: 1,
                    name: "Test".to_string(),
                    firstname: "User".to_string(),
                    birthdate: None,
                    postal_code: None,
                    history: Vec::new(),
                },
                shared_users: Vec::new(),
            })
        }
        async fn post_metric(&self, _: &DailyMetricsReport) -> Result<CurrentUserProfile> {
            unimplemented!()
        }
        async fn retrieve_user(&self) -> Result<CurrentUserProfile> {
            unimplemented!()
        }
        async fn retrieve_friends(&self) -> Result<Vec<BasicUser>> {
            unimplemented!()
        }
        async fn delete_friend(&self, _: i64) -> Result<()> {
            unimplemented!()
        }
    }

    struct MockFlags {
        flags: Mutex<AppFlags>,
    }

    #[async_trait]
    impl FlagsRepository for MockFlags {
        async fn flags(&self) -> Result<AppFlags> {
            Ok(self.flags.lock().unwrap().clone())
        }
        async fn set_initial_values_filled(&self, filled: bool) -> Result<()> {
            self.flags.lock().unwrap().initial_values_filled = filled;
            Ok(())
        }
        async fn set_onboarding_was_shown(&self, _: bool) -> Result<()> {
            Ok(())
        }
        async fn set_reminder(&self, _: Option<NaiveTime>, _: Option<String>) -> Result<()> {
            Ok(())
        }
    }

    fn completed_answers() -> AnswerSet {
        let mut answers = AnswerSet::new();
        for question in Catalog::initial_profile().questions() {
            let value = match question.numeric() {
                Some(range) => AnswerValue::Number(range.default_value()),
                None => AnswerValue::No,
            };
            answers.record(question.id(), value);
        }
        answers
    }

    #[tokio::test]
    async fn test_success_sets_the_filled_flag() {
        let gateway = Arc::new(MockGateway {
            fail: false,
            received: Mutex::new(None),
        });
        let flags = Arc::new(MockFlags {
            flags: Mutex::new(AppFlags::default()),
        });
        let submitter = InitialProfileSubmitter::new(gateway.clone(), flags.clone());

        assert!(submitter.is_needed().await.unwrap());
        submitter.submit(&completed_answers()).await.unwrap();
        assert!(!submitter.is_needed().await.unwrap());

        // the payload is the catalog-ordered token map
        let received = gateway.received.lock().unwrap();
        let sheet = received.as_ref().unwrap();
        assert_eq!(sheet.len(), 21);
        assert_eq!(sheet.keys().next().map(String::as_str), Some("fever"));
        assert_eq!(sheet.get("age").and_then(|v| v.as_str()), Some("value-30"));
    }

    #[tokio::test]
    async fn test_failure_leaves_flag_and_answers_intact() {
        let gateway = Arc::new(MockGateway {
            fail: true,
            received: Mutex::new(None),
        });
        let flags = Arc::new(MockFlags {
            flags: Mutex::new(AppFlags::default()),
        });
        let submitter = InitialProfileSubmitter::new(gateway, flags.clone());

        let answers = completed_answers();
        let err = submitter.submit(&answers).await.unwrap_err();
        assert!(err.is_retryable());
        assert!(!flags.flags.lock().unwrap().initial_values_filled);
        // the caller can retry with the same set
        assert_eq!(answers.len(), 21);
    }
}
