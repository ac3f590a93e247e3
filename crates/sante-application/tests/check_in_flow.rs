//! End-to-end coverage of the two collection flows, from first input to
//! delivered payload, against stub collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use sante_application::{DailyReportPipeline, InitialProfileSubmitter};
use sante_core::answer::{AnswerChoice, AnswerSet, AnswerValue};
use sante_core::catalog::Catalog;
use sante_core::error::Result;
use sante_core::flow::{FlowController, FlowInput, FlowProgress, SwipeDirection};
use sante_core::gateway::{AnswerSheet, BackendGateway};
use sante_core::location::{
    AccuracyTier, AuthorizationState, Coordinates, LocationError, LocationService,
};
use sante_core::report::DailyMetricsReport;
use sante_core::session::TokenPair;
use sante_core::state::{AppFlags, FlagsRepository};
use sante_core::user::{BasicUser, CurrentUserProfile, UserProfile};
use sante_infrastructure::DirReportCache;

#[derive(Default)]
struct RecordingGateway {
    sheets: Mutex<Vec<AnswerSheet>>,
    reports: Mutex<Vec<DailyMetricsReport>>,
}

impl RecordingGateway {
    fn profile() -> CurrentUserProfile {
        CurrentUserProfile {
            profile: UserProfile {
                id: 1,
                name: "Tonnelier".to_string(),
                firstname: "Jerome".to_string(),
                birthdate: None,
                postal_code: None,
                history: Vec::new(),
            },
            shared_users: Vec::new(),
        }
    }
}

#[async_trait]
impl BackendGateway for RecordingGateway {
    async fn register(&self) -> Result<TokenPair> {
        Ok(TokenPair {
            access_token: "tok".to_string(),
            refresh_token: "ref".to_string(),
        })
    }

    async fn post_initial_answers(&self, answers: &AnswerSheet) -> Result<CurrentUserProfile> {
        self.sheets.lock().unwrap().push(answers.clone());
        Ok(Self::profile())
    }

    async fn post_metric(&self, report: &DailyMetricsReport) -> Result<CurrentUserProfile> {
        self.reports.lock().unwrap().push(report.clone());
        Ok(Self::profile())
    }

    async fn retrieve_user(&self) -> Result<CurrentUserProfile> {
        Ok(Self::profile())
    }

    async fn retrieve_friends(&self) -> Result<Vec<BasicUser>> {
        Ok(Vec::new())
    }

    async fn delete_friend(&self, _: i64) -> Result<()> {
        Ok(())
    }
}

struct MemoryFlags {
    flags: Mutex<AppFlags>,
    writes: AtomicUsize,
}

impl MemoryFlags {
    fn new() -> Self {
        Self {
            flags: Mutex::new(AppFlags::default()),
            writes: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl FlagsRepository for MemoryFlags {
    async fn flags(&self) -> Result<AppFlags> {
        Ok(self.flags.lock().unwrap().clone())
    }
    async fn set_initial_values_filled(&self, filled: bool) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.flags.lock().unwrap().initial_values_filled = filled;
        Ok(())
    }
    async fn set_onboarding_was_shown(&self, shown: bool) -> Result<()> {
        self.flags.lock().unwrap().onboarding_was_shown = shown;
        Ok(())
    }
    async fn set_reminder(
        &self,
        hour: Option<chrono::NaiveTime>,
        id: Option<String>,
    ) -> Result<()> {
        let mut flags = self.flags.lock().unwrap();
        flags.hour_for_notification = hour;
        flags.daily_notification_id = id;
        Ok(())
    }
}

struct FixedLocation(Coordinates);

#[async_trait]
impl LocationService for FixedLocation {
    fn authorization(&self) -> AuthorizationState {
        AuthorizationState::Available
    }
    async fn locate(&self, _: AccuracyTier) -> std::result::Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

#[tokio::test]
async fn initial_questionnaire_end_to_end() {
    let catalog = Catalog::initial_profile();
    let mut flow = FlowController::new(catalog);
    flow.start().unwrap();

    // answer like a cautious user: refuse where allowed, defaults elsewhere
    loop {
        let question = flow.current_question().unwrap();
        let input = if let Some(range) = question.numeric() {
            FlowInput::Picker {
                index: range.default_index(),
            }
        } else if question.buttons().contains(&AnswerChoice::NotApplicable) {
            FlowInput::Choice(AnswerChoice::NotApplicable)
        } else if question.buttons().contains(&AnswerChoice::RatherNotAnswer) {
            FlowInput::Choice(AnswerChoice::RatherNotAnswer)
        } else {
            FlowInput::Choice(AnswerChoice::No)
        };
        if let FlowProgress::Completed = flow.submit_answer(input).unwrap() {
            break;
        }
    }

    let answers = flow.take_answers().unwrap();
    let gateway = Arc::new(RecordingGateway::default());
    let flags = Arc::new(MemoryFlags::new());
    let submitter = InitialProfileSubmitter::new(gateway.clone(), flags.clone());

    submitter.submit(&answers).await.unwrap();

    let sheets = gateway.sheets.lock().unwrap();
    let sheet = &sheets[0];
    assert_eq!(sheet.len(), 21);
    assert_eq!(sheet.get("pregnant").and_then(|v| v.as_str()), Some("notApplicable"));
    assert_eq!(sheet.get("postalCode").and_then(|v| v.as_str()), Some("ratherNotAnswer"));
    assert_eq!(sheet.get("age").and_then(|v| v.as_str()), Some("value-30"));
    assert_eq!(sheet.get("height").and_then(|v| v.as_str()), Some("value-150"));
    assert_eq!(sheet.get("weight").and_then(|v| v.as_str()), Some("value-60"));

    // the wire tokens resolve back to the recorded values
    let restored = AnswerSet::from_wire_map(&Catalog::initial_profile(), sheet).unwrap();
    assert_eq!(restored.get("pregnant"), Some(&AnswerValue::NotApplicable));
    assert_eq!(restored.get("age"), Some(&AnswerValue::Number(30)));

    assert!(flags.flags().await.unwrap().initial_values_filled);
    assert_eq!(flags.writes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn daily_check_in_end_to_end_with_undo() {
    let mut flow = FlowController::with_undo(Catalog::daily_metrics());
    flow.start().unwrap();

    // swipe yes on the first card, then change your mind
    flow.submit_answer(SwipeDirection::Right.as_input()).unwrap();
    flow.undo_last().unwrap().unwrap();
    flow.submit_answer(SwipeDirection::Left.as_input()).unwrap();

    // cough yes, everything else no
    flow.submit_answer(SwipeDirection::Right.as_input()).unwrap();
    flow.submit_answer(SwipeDirection::Left.as_input()).unwrap();
    flow.submit_answer(SwipeDirection::Left.as_input()).unwrap();
    flow.submit_answer(SwipeDirection::Left.as_input()).unwrap();

    let answers = flow.take_answers().unwrap();
    let gateway = Arc::new(RecordingGateway::default());
    let dir = TempDir::new().unwrap();
    let position = Coordinates {
        latitude: 48.39,
        longitude: -4.486,
    };
    let pipeline = DailyReportPipeline::new(
        gateway.clone(),
        Arc::new(FixedLocation(position)),
        Arc::new(DirReportCache::with_dir(dir.path().join("pending"))),
    );

    pipeline.submit(&answers).await.unwrap();

    let reports = gateway.reports.lock().unwrap();
    let report = &reports[0];
    let values: Vec<bool> = report.answers().iter().map(|m| m.value).collect();
    // the undone yes on the first card ended up as a no
    assert_eq!(values, vec![false, true, false, false, false]);
    assert_eq!(report.coordinates(), Some(position));
}
