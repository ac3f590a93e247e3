//! User domain models: the current user, their report history, and friends.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::report::Metric;

/// One past daily report, as returned in the user's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    pub recorded_at: Option<DateTime<Utc>>,
    pub values: Vec<Metric>,
}

/// A user profile as the backend exposes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub firstname: String,
    pub birthdate: Option<NaiveDate>,
    pub postal_code: Option<String>,
    pub history: Vec<MetricsRecord>,
}

/// The signed-in user: their own profile plus the profiles shared with them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUserProfile {
    pub profile: UserProfile,
    pub shared_users: Vec<UserProfile>,
}

/// The minimal view of another user in friend listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicUser {
    pub id: i64,
    pub name: String,
    pub firstname: String,
}
