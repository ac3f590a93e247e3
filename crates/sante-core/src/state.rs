//! Persistent application flags.
//!
//! Simple key-value state read by the surrounding app logic: whether the
//! initial questionnaire was already filled, whether onboarding was shown,
//! and the daily reminder settings.

use async_trait::async_trait;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Application flags that persist across restarts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppFlags {
    /// Set once the initial profile answers were accepted by the backend;
    /// gates the initial flow from ever re-triggering.
    pub initial_values_filled: bool,

    /// Set when the onboarding screens were dismissed.
    pub onboarding_was_shown: bool,

    /// Hour of the daily check-in reminder, if one is scheduled.
    pub hour_for_notification: Option<NaiveTime>,

    /// Identifier of the scheduled reminder, for cancellation.
    pub daily_notification_id: Option<String>,
}

/// Repository for the persistent flags.
#[async_trait]
pub trait FlagsRepository: Send + Sync {
    /// A snapshot of the current flags.
    async fn flags(&self) -> Result<AppFlags>;

    async fn set_initial_values_filled(&self, filled: bool) -> Result<()>;

    async fn set_onboarding_was_shown(&self, shown: bool) -> Result<()>;

    /// Stores the reminder hour and scheduled-notification id together;
    /// `None` clears both.
    async fn set_reminder(&self, hour: Option<NaiveTime>, id: Option<String>) -> Result<()>;
}
