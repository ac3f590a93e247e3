//! Launch routing.
//!
//! Decides which surface to present on startup from the persistent flags
//! and the stored credentials.

use std::sync::Arc;

use sante_core::error::Result;
use sante_core::session::CredentialStore;
use sante_core::state::FlagsRepository;

/// Where the app should land after launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchDestination {
    /// First run: show the onboarding screens.
    Onboarding,
    /// Onboarding seen but nobody is signed in.
    Login,
    /// Signed in but the one-time questionnaire was never completed.
    InitialProfile,
    Main,
}

pub struct LaunchInstructor {
    flags: Arc<dyn FlagsRepository>,
    credentials: Arc<dyn CredentialStore>,
}

impl LaunchInstructor {
    pub fn new(flags: Arc<dyn FlagsRepository>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self { flags, credentials }
    }

    /// Resolves the launch destination.
    pub async fn configure(&self) -> Result<LaunchDestination> {
        let flags = self.flags.flags().await?;
        if !flags.onboarding_was_shown {
            return Ok(LaunchDestination::Onboarding);
        }
        if !self.credentials.is_logged_in().await {
            return Ok(LaunchDestination::Login);
        }
        if !flags.initial_values_filled {
            return Ok(LaunchDestination::InitialProfile);
        }
        Ok(LaunchDestination::Main)
    }

    /// Marks onboarding as dismissed.
    pub async fn onboarding_dismissed(&self) -> Result<()> {
        self.flags.set_onboarding_was_shown(true).await
    }
}
