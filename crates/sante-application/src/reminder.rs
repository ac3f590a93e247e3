//! Daily reminder settings.
//!
//! Only the persistent state lives here: the hour the user picked and the
//! identifier of the scheduled notification. Actually scheduling the OS
//! notification is the platform shell's job.

use std::sync::Arc;

use chrono::NaiveTime;

use sante_core::error::Result;
use sante_core::state::FlagsRepository;

pub struct ReminderSettings {
    flags: Arc<dyn FlagsRepository>,
}

impl ReminderSettings {
    pub fn new(flags: Arc<dyn FlagsRepository>) -> Self {
        Self { flags }
    }

    /// Stores the reminder hour under a fresh notification id and returns
    /// the id for the scheduler.
    pub async fn set_reminder(&self, hour: NaiveTime) -> Result<String> {
        let id = uuid::Uuid::new_v4().to_string();
        self.flags
            .set_reminder(Some(hour), Some(id.clone()))
            .await?;
        tracing::info!(%hour, %id, "daily reminder updated");
        Ok(id)
    }

    pub async fn clear_reminder(&self) -> Result<()> {
        self.flags.set_reminder(None, None).await
    }

    /// The currently scheduled reminder, if any.
    pub async fn current(&self) -> Result<Option<(NaiveTime, String)>> {
        let flags = self.flags.flags().await?;
        Ok(flags
            .hour_for_notification
            .zip(flags.daily_notification_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use sante_core::state::AppFlags;
    use std::sync::Mutex;

    struct MockFlags {
        flags: Mutex<AppFlags>,
    }

    #[async_trait]
    impl FlagsRepository for MockFlags {
        async fn flags(&self) -> Result<AppFlags> {
            Ok(self.flags.lock().unwrap().clone())
        }
        async fn set_initial_values_filled(&self, _: bool) -> Result<()> {
            Ok(())
        }
        async fn set_onboarding_was_shown(&self, _: bool) -> Result<()> {
            Ok(())
        }
        async fn set_reminder(&self, hour: Option<NaiveTime>, id: Option<String>) -> Result<()> {
            let mut flags = self.flags.lock().unwrap();
            flags.hour_for_notification = hour;
            flags.daily_notification_id = id;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_set_and_clear_reminder() {
        let settings = ReminderSettings::new(Arc::new(MockFlags {
            flags: Mutex::new(AppFlags::default()),
        }));
        assert!(settings.current().await.unwrap().is_none());

        let hour = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let id = settings.set_reminder(hour).await.unwrap();
        let (stored_hour, stored_id) = settings.current().await.unwrap().unwrap();
        assert_eq!(stored_hour, hour);
        assert_eq!(stored_id, id);

        settings.clear_reminder().await.unwrap();
        assert!(settings.current().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_each_update_gets_a_fresh_id() {
        let settings = ReminderSettings::new(Arc::new(MockFlags {
            flags: Mutex::new(AppFlags::default()),
        }));
        let hour = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        let first = settings.set_reminder(hour).await.unwrap();
        let second = settings.set_reminder(hour).await.unwrap();
        assert_ne!(first, second);
    }
}
