//! Use cases wiring the flow controller, the gateway, and local storage.

pub mod daily_report;
pub mod friends;
pub mod initial_profile;
pub mod launch;
pub mod profile;
pub mod reminder;

pub use daily_report::DailyReportPipeline;
pub use friends::FriendsUsecase;
pub use initial_profile::InitialProfileSubmitter;
pub use launch::{LaunchDestination, LaunchInstructor};
pub use profile::ProfileUsecase;
pub use reminder::ReminderSettings;
