//! Composition root: wires storage, the REST gateway, and the use cases.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use sante_api::{ApiClient, AuthRetryGateway};
use sante_application::{
    DailyReportPipeline, FriendsUsecase, InitialProfileSubmitter, LaunchInstructor,
    ProfileUsecase, ReminderSettings,
};
use sante_core::gateway::BackendGateway;
use sante_core::location::{AccuracyTier, AuthorizationState, Coordinates, LocationError, LocationService};
use sante_core::session::CredentialStore;
use sante_core::state::FlagsRepository;
use sante_infrastructure::{DirReportCache, FileCredentialStore, TomlFlagsRepository};

/// A terminal has no positioning hardware; every lookup is undetermined.
/// The pipeline then submits without coordinates, as designed.
struct TerminalLocation;

#[async_trait]
impl LocationService for TerminalLocation {
    fn authorization(&self) -> AuthorizationState {
        AuthorizationState::Undetermined
    }

    async fn locate(&self, _: AccuracyTier) -> std::result::Result<Coordinates, LocationError> {
        Err(LocationError::Unavailable)
    }
}

pub struct AppContext {
    pub credentials: Arc<dyn CredentialStore>,
    pub flags: Arc<dyn FlagsRepository>,
    pub gateway: Arc<dyn BackendGateway>,
}

impl AppContext {
    pub fn init(api_url: Option<String>) -> Result<Self> {
        let credentials: Arc<dyn CredentialStore> = Arc::new(FileCredentialStore::new()?);
        let flags: Arc<dyn FlagsRepository> = Arc::new(TomlFlagsRepository::new()?);

        let client = match api_url {
            Some(url) => ApiClient::with_base_url(url, credentials.clone()),
            None => ApiClient::new(credentials.clone()),
        };
        let gateway: Arc<dyn BackendGateway> = Arc::new(AuthRetryGateway::new(client));

        Ok(Self {
            credentials,
            flags,
            gateway,
        })
    }

    pub fn launch_instructor(&self) -> LaunchInstructor {
        LaunchInstructor::new(self.flags.clone(), self.credentials.clone())
    }

    pub fn initial_profile_submitter(&self) -> InitialProfileSubmitter {
        InitialProfileSubmitter::new(self.gateway.clone(), self.flags.clone())
    }

    pub fn daily_report_pipeline(&self) -> Result<DailyReportPipeline> {
        Ok(DailyReportPipeline::new(
            self.gateway.clone(),
            Arc::new(TerminalLocation),
            Arc::new(DirReportCache::new()?),
        ))
    }

    pub fn profile_usecase(&self) -> ProfileUsecase {
        ProfileUsecase::new(self.gateway.clone(), self.credentials.clone())
    }

    pub fn friends_usecase(&self) -> FriendsUsecase {
        FriendsUsecase::new(self.gateway.clone())
    }

    pub fn reminder_settings(&self) -> ReminderSettings {
        ReminderSettings::new(self.flags.clone())
    }
}
