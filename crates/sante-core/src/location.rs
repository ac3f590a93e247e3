//! Device location port.
//!
//! Location is best-effort context for daily reports: a missing position is
//! an expected outcome, never a submission blocker.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// OS-level location authorization, as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationState {
    /// The user has not been asked yet.
    Undetermined,
    Available,
    Denied,
    Restricted,
}

impl AuthorizationState {
    /// Whether a lookup is worth attempting at all.
    pub fn allows_lookup(&self) -> bool {
        matches!(self, AuthorizationState::Available)
    }
}

/// Requested positioning accuracy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccuracyTier {
    /// Hundred-meter class; enough for area-level reporting.
    Coarse,
    Fine,
}

/// A device position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Why a lookup produced no position. These are expected outcomes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    #[error("no position available")]
    Unavailable,
    #[error("location access denied")]
    Denied,
    #[error("location lookup timed out")]
    Timeout,
}

/// Single-shot, asynchronous position lookup.
#[async_trait]
pub trait LocationService: Send + Sync {
    /// Current authorization, checked before any lookup.
    fn authorization(&self) -> AuthorizationState;

    /// Attempts one position fix at the requested accuracy.
    async fn locate(&self, accuracy: AccuracyTier) -> std::result::Result<Coordinates, LocationError>;
}
