//! The daily-metrics submission pipeline.
//!
//! Builds the report from a completed swipe flow, attaches the device
//! position when it arrives within the bound, and posts the report. A
//! failed post parks the report in the local cache; `flush_pending` drains
//! the cache later.

use std::sync::Arc;
use std::time::Duration;

use sante_core::answer::AnswerSet;
use sante_core::error::Result;
use sante_core::gateway::BackendGateway;
use sante_core::location::{AccuracyTier, Coordinates, LocationService};
use sante_core::report::DailyMetricsReport;
use sante_core::user::CurrentUserProfile;
use sante_infrastructure::DirReportCache;

const DEFAULT_LOCATION_TIMEOUT: Duration = Duration::from_secs(5);

pub struct DailyReportPipeline {
    gateway: Arc<dyn BackendGateway>,
    location: Arc<dyn LocationService>,
    cache: Arc<DirReportCache>,
    location_timeout: Duration,
}

impl DailyReportPipeline {
    pub fn new(
        gateway: Arc<dyn BackendGateway>,
        location: Arc<dyn LocationService>,
        cache: Arc<DirReportCache>,
    ) -> Self {
        Self {
            gateway,
            location,
            cache,
            location_timeout: DEFAULT_LOCATION_TIMEOUT,
        }
    }

    /// Overrides the location bound (tests, low-power mode).
    pub fn with_location_timeout(mut self, timeout: Duration) -> Self {
        self.location_timeout = timeout;
        self
    }

    /// Builds and submits the report for a completed daily flow.
    ///
    /// The position lookup is strictly best-effort: denied or undetermined
    /// authorization, a lookup error, or the timeout all lead to submission
    /// without coordinates, never to blocking the report.
    ///
    /// On a failed post the report is cached for a later
    /// [`flush_pending`](Self::flush_pending) and the error is surfaced.
    pub async fn submit(&self, answers: &AnswerSet) -> Result<CurrentUserProfile> {
        let mut report = DailyMetricsReport::from_answers(answers)?;

        if let Some(position) = self.acquire_position().await {
            // at most once, before any transmission attempt
            report.attach_coordinates(position)?;
        }

        match self.gateway.post_metric(&report).await {
            Ok(user) => Ok(user),
            Err(err) => {
                match self.cache.store(&report) {
                    Ok(id) => tracing::warn!(%err, cache_id = %id, "daily report cached after failed post"),
                    Err(cache_err) => {
                        tracing::error!(%err, %cache_err, "failed to cache unsent daily report")
                    }
                }
                Err(err)
            }
        }
    }

    /// Retries every cached report, oldest first.
    ///
    /// Stops at the first failure so a dead backend is hit once, not once
    /// per report; already-submitted entries stay removed. Returns how many
    /// reports went through.
    pub async fn flush_pending(&self) -> Result<usize> {
        let pending = self.cache.list()?;
        let mut sent = 0;
        for entry in pending {
            if let Err(err) = self.gateway.post_metric(&entry.report).await {
                tracing::warn!(%err, cache_id = %entry.id, "pending report still undeliverable");
                return Err(err);
            }
            self.cache.remove(&entry.id)?;
            sent += 1;
        }
        Ok(sent)
    }

    async fn acquire_position(&self) -> Option<Coordinates> {
        if !self.location.authorization().allows_lookup() {
            tracing::debug!(
                state = ?self.location.authorization(),
                "skipping location lookup"
            );
            return None;
        }

        match tokio::time::timeout(
            self.location_timeout,
            self.location.locate(AccuracyTier::Coarse),
        )
        .await
        {
            Ok(Ok(position)) => Some(position),
            Ok(Err(err)) => {
                tracing::debug!(%err, "location lookup failed, submitting without position");
                None
            }
            Err(_) => {
                tracing::debug!("location lookup timed out, submitting without position");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use sante_core::answer::AnswerValue;
    use sante_core::error::SanteError;
    use sante_core::gateway::AnswerSheet;
    use sante_core::location::{AuthorizationState, LocationError};
    use sante_core::session::TokenPair;
    use sante_core::user::{BasicUser, UserProfile};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tempfile::TempDir;

    struct MockGateway {
        failures: AtomicUsize,
        posted: Mutex<Vec<DailyMetricsReport>>,
    }

    impl MockGateway {
        fn failing(count: usize) -> Self {
            Self {
                failures: AtomicUsize::new(count),
                posted: Mutex::new(Vec::new()),
            }
        }

        fn profile() -> CurrentUserProfile {
            CurrentUserProfile {
                profile: UserProfile {
                    id: 1,
                    name: "Test".to_string(),
                    firstname: "User".to_string(),
                    birthdate: None,
                    postal_code: None,
                    history: Vec::new(),
                },
                shared_users: Vec::new(),
            }
        }
    }

    #[async_trait]
    impl BackendGateway for MockGateway {
        async fn register(&self) -> Result<TokenPair> {
            unimplemented!()
        }
        async fn post_initial_answers(&self, _: &AnswerSheet) -> Result<CurrentUserProfile> {
            unimplemented!()
        }
        async fn post_metric(&self, report: &DailyMetricsReport) -> Result<CurrentUserProfile> {
            let remaining = self.failures.load(Ordering::SeqCst);
            if remaining > 0 {
                self.failures.store(remaining - 1, Ordering::SeqCst);
                return Err(SanteError::network("connection refused"));
            }
            self.posted.lock().unwrap().push(report.clone());
            Ok(Self::profile())
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

    enum LocationBehavior {
        Resolve(Coordinates),
        Fail(LocationError),
        Hang,
    }

    struct MockLocation {
        authorization: AuthorizationState,
        behavior: LocationBehavior,
    }

    #[async_trait]
    impl LocationService for MockLocation {
        fn authorization(&self) -> AuthorizationState {
            self.authorization
        }

        async fn locate(
            &self,
            _: AccuracyTier,
        ) -> std::result::Result<Coordinates, LocationError> {
            match &self.behavior {
                LocationBehavior::Resolve(position) => Ok(*position),
                LocationBehavior::Fail(err) => Err(err.clone()),
                LocationBehavior::Hang => {
                    // far beyond any bound; only reachable in paused-time tests
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Err(LocationError::Timeout)
                }
            }
        }
    }

    fn completed_answers() -> AnswerSet {
        let mut answers = AnswerSet::new();
        for key in [
            "hasdrippingnose",
            "hascough",
            "hasfever",
            "hasthroatsoreness",
            "hasbreatingissues",
        ] {
            answers.record(key, AnswerValue::No);
        }
        answers
    }

    fn pipeline(
        gateway: Arc<MockGateway>,
        location: MockLocation,
        dir: &TempDir,
    ) -> DailyReportPipeline {
        DailyReportPipeline::new(
            gateway,
            Arc::new(location),
            Arc::new(DirReportCache::with_dir(dir.path().join("pending"))),
        )
    }

    #[tokio::test]
    async fn test_position_is_attached_when_available() {
        let dir = TempDir::new().unwrap();
        let gateway = Arc::new(MockGateway::failing(0));
        let position = Coordinates {
            latitude: 48.39,
            longitude: -4.486,
        };
        let pipeline = pipeline(
            gateway.clone(),
            MockLocation {
                authorization: AuthorizationState::Available,
                behavior: LocationBehavior::Resolve(position),
            },
            &dir,
        );

        pipeline.submit(&completed_answers()).await.unwrap();
        let posted = gateway.posted.lock().unwrap();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].coordinates(), Some(position));
    }

    #[tokio::test]
    async fn test_denied_authorization_submits_without_position() {
        let dir = TempDir::new().unwrap();
        let gateway = Arc::new(MockGateway::failing(0));
        let pipeline = pipeline(
            gateway.clone(),
            MockLocation {
                authorization: AuthorizationState::Denied,
                behavior: LocationBehavior::Resolve(Coordinates {
                    latitude: 0.0,
                    longitude: 0.0,
                }),
            },
            &dir,
        );

        pipeline.submit(&completed_answers()).await.unwrap();
        assert!(gateway.posted.lock().unwrap()[0].coordinates().is_none());
    }

    #[tokio::test]
    async fn test_undetermined_authorization_submits_without_position() {
        let dir = TempDir::new().unwrap();
        let gateway = Arc::new(MockGateway::failing(0));
        let pipeline = pipeline(
            gateway.clone(),
            MockLocation {
                authorization: AuthorizationState::Undetermined,
                behavior: LocationBehavior::Fail(LocationError::Unavailable),
            },
            &dir,
        );

        pipeline.submit(&completed_answers()).await.unwrap();
        assert!(gateway.posted.lock().unwrap()[0].coordinates().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_lookup_is_bounded_by_the_timeout() {
        let dir = TempDir::new().unwrap();
        let gateway = Arc::new(MockGateway::failing(0));
        let pipeline = pipeline(
            gateway.clone(),
            MockLocation {
                authorization: AuthorizationState::Available,
                behavior: LocationBehavior::Hang,
            },
            &dir,
        )
        .with_location_timeout(Duration::from_millis(100));

        pipeline.submit(&completed_answers()).await.unwrap();
        assert!(gateway.posted.lock().unwrap()[0].coordinates().is_none());
    }

    #[tokio::test]
    async fn test_failed_post_parks_the_report() {
        let dir = TempDir::new().unwrap();
        let gateway = Arc::new(MockGateway::failing(1));
        let cache = Arc::new(DirReportCache::with_dir(dir.path().join("pending")));
        let pipeline = DailyReportPipeline::new(
            gateway.clone(),
            Arc::new(MockLocation {
                authorization: AuthorizationState::Denied,
                behavior: LocationBehavior::Fail(LocationError::Denied),
            }),
            cache.clone(),
        );

        let err = pipeline.submit(&completed_answers()).await.unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(cache.list().unwrap().len(), 1);

        // the backend is reachable again: the cached report drains
        let sent = pipeline.flush_pending().await.unwrap();
        assert_eq!(sent, 1);
        assert!(cache.list().unwrap().is_empty());
        assert_eq!(gateway.posted.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_flush_stops_at_first_failure() {
        let dir = TempDir::new().unwrap();
        let cache = Arc::new(DirReportCache::with_dir(dir.path().join("pending")));
        let report = DailyMetricsReport::from_answers(&completed_answers()).unwrap();
        cache.store(&report).unwrap();
        cache.store(&report).unwrap();

        let gateway = Arc::new(MockGateway::failing(usize::MAX));
        let pipeline = DailyReportPipeline::new(
            gateway,
            Arc::new(MockLocation {
                authorization: AuthorizationState::Denied,
                behavior: LocationBehavior::Fail(LocationError::Denied),
            }),
            cache.clone(),
        );

        assert!(pipeline.flush_pending().await.is_err());
        // nothing was removed
        assert_eq!(cache.list().unwrap().len(), 2);
    }
}
