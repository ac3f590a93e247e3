//! Wire models for the check-in backend.
//!
//! The backend speaks snake_case JSON with a few legacy field names
//! (`lastname`, `cp`, `datas`) that are mapped to the domain models here
//! rather than leaking into the rest of the app.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use sante_core::catalog::MetricKind;
use sante_core::report::{DailyMetricsReport, Metric};
use sante_core::session::TokenPair;
use sante_core::user::{BasicUser, CurrentUserProfile, MetricsRecord, UserProfile};

const BIRTHDATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Serialize)]
pub(crate) struct RegisterRequest {
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RegisterResponse {
    pub token: String,
    pub refresh_token: String,
}

impl From<RegisterResponse> for TokenPair {
    fn from(response: RegisterResponse) -> Self {
        TokenPair {
            access_token: response.token,
            refresh_token: response.refresh_token,
        }
    }
}

/// One historical report entry in a user payload.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct MetricsRecordDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub hasdrippingnose: bool,
    #[serde(default)]
    pub hascough: bool,
    #[serde(default)]
    pub hasfever: bool,
    #[serde(default)]
    pub hasthroatsoreness: bool,
    #[serde(default)]
    pub hasbreatingissues: bool,
}

impl MetricsRecordDto {
    fn value_of(&self, kind: MetricKind) -> bool {
        match kind {
            MetricKind::DrippingNose => self.hasdrippingnose,
            MetricKind::Cough => self.hascough,
            MetricKind::Fever => self.hasfever,
            MetricKind::ThroatSoreness => self.hasthroatsoreness,
            MetricKind::BreathingIssues => self.hasbreatingissues,
        }
    }

    pub fn into_domain(self) -> MetricsRecord {
        MetricsRecord {
            recorded_at: self.date,
            values: MetricKind::iter()
                .map(|kind| Metric {
                    kind,
                    value: self.value_of(kind),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserDto {
    pub id: i64,
    #[serde(rename = "lastname")]
    pub name: String,
    pub firstname: String,
    #[serde(default)]
    pub birthdate: Option<String>,
    #[serde(default)]
    pub cp: Option<String>,
    #[serde(default)]
    pub datas: Vec<MetricsRecordDto>,
}

impl UserDto {
    pub fn into_domain(self) -> UserProfile {
        // a malformed birthdate is dropped rather than failing the whole
        // payload; the profile screen treats it as not provided
        let birthdate = self
            .birthdate
            .as_deref()
            .and_then(|raw| NaiveDate::parse_from_str(raw, BIRTHDATE_FORMAT).ok());
        UserProfile {
            id: self.id,
            name: self.name,
            firstname: self.firstname,
            birthdate,
            postal_code: self.cp,
            history: self.datas.into_iter().map(MetricsRecordDto::into_domain).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentUserDto {
    #[serde(flatten)]
    pub user: UserDto,
    #[serde(default, rename = "sharedUsers")]
    pub shared_users: Vec<UserDto>,
}

impl CurrentUserDto {
    pub fn into_domain(self) -> CurrentUserProfile {
        CurrentUserProfile {
            profile: self.user.into_domain(),
            shared_users: self
                .shared_users
                .into_iter()
                .map(UserDto::into_domain)
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BasicUserDto {
    pub id: i64,
    #[serde(rename = "lastname")]
    pub name: String,
    pub firstname: String,
}

impl BasicUserDto {
    pub fn into_domain(self) -> BasicUser {
        BasicUser {
            id: self.id,
            name: self.name,
            firstname: self.firstname,
        }
    }
}

/// The daily report as posted: five metric booleans, RFC 3339 capture date,
/// optional position.
#[derive(Debug, Serialize)]
pub(crate) struct MetricReportBody {
    pub hasdrippingnose: bool,
    pub hascough: bool,
    pub hasfever: bool,
    pub hasthroatsoreness: bool,
    pub hasbreatingissues: bool,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl From<&DailyMetricsReport> for MetricReportBody {
    fn from(report: &DailyMetricsReport) -> Self {
        let value_of = |kind: MetricKind| {
            report
                .answers()
                .iter()
                .find(|metric| metric.kind == kind)
                .map(|metric| metric.value)
                .unwrap_or(false)
        };
        Self {
            hasdrippingnose: value_of(MetricKind::DrippingNose),
            hascough: value_of(MetricKind::Cough),
            hasfever: value_of(MetricKind::Fever),
            hasthroatsoreness: value_of(MetricKind::ThroatSoreness),
            hasbreatingissues: value_of(MetricKind::BreathingIssues),
            date: report.timestamp().to_rfc3339(),
            latitude: report.coordinates().map(|c| c.latitude),
            longitude: report.coordinates().map(|c| c.longitude),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sante_core::answer::{AnswerSet, AnswerValue};
    use sante_core::location::Coordinates;

    #[test]
    fn test_register_response_decodes_snake_case() {
        let response: RegisterResponse =
            serde_json::from_str(r#"{"token":"abc","refresh_token":"def"}"#).unwrap();
        let tokens: TokenPair = response.into();
        assert_eq!(tokens.access_token, "abc");
        assert_eq!(tokens.refresh_token, "def");
    }

    #[test]
    fn test_user_payload_decodes_legacy_field_names() {
        let json = r#"{
            "id": 7,
            "lastname": "Tonnelier",
            "firstname": "Jerome",
            "birthdate": "1980-03-28",
            "cp": "29200",
            "datas": [
                {"date": "2020-04-02T09:30:00Z", "hasfever": true, "hascough": false}
            ],
            "sharedUsers": [
                {"id": 8, "lastname": "Durand", "firstname": "Anne", "birthdate": "1985-01-02"}
            ]
        }"#;
        let dto: CurrentUserDto = serde_json::from_str(json).unwrap();
        let user = dto.into_domain();

        assert_eq!(user.profile.id, 7);
        assert_eq!(user.profile.name, "Tonnelier");
        assert_eq!(user.profile.postal_code.as_deref(), Some("29200"));
        assert_eq!(
            user.profile.birthdate,
            NaiveDate::from_ymd_opt(1980, 3, 28)
        );
        assert_eq!(user.profile.history.len(), 1);
        let record = &user.profile.history[0];
        assert!(record.recorded_at.is_some());
        assert_eq!(record.values.len(), 5);
        assert!(record.values.iter().any(|m| m.kind == MetricKind::Fever && m.value));
        assert_eq!(user.shared_users.len(), 1);
        assert_eq!(user.shared_users[0].name, "Durand");
    }

    #[test]
    fn test_malformed_birthdate_is_dropped() {
        let json = r#"{"id": 1, "lastname": "X", "firstname": "Y", "birthdate": "28/03/1980"}"#;
        let dto: UserDto = serde_json::from_str(json).unwrap();
        assert!(dto.into_domain().birthdate.is_none());
    }

    #[test]
    fn test_metric_report_body_serialization() {
        let mut answers = AnswerSet::new();
        answers.record("hasdrippingnose", AnswerValue::No);
        answers.record("hascough", AnswerValue::Yes);
        answers.record("hasfever", AnswerValue::No);
        answers.record("hasthroatsoreness", AnswerValue::No);
        answers.record("hasbreatingissues", AnswerValue::Yes);
        let mut report = DailyMetricsReport::from_answers(&answers).unwrap();

        // without coordinates, the position fields are omitted entirely
        let body = serde_json::to_value(MetricReportBody::from(&report)).unwrap();
        assert_eq!(body["hascough"], true);
        assert_eq!(body["hasdrippingnose"], false);
        assert!(body.get("latitude").is_none());
        assert!(body["date"].as_str().unwrap().contains('T'));

        report
            .attach_coordinates(Coordinates {
                latitude: 48.39,
                longitude: -4.486,
            })
            .unwrap();
        let body = serde_json::to_value(MetricReportBody::from(&report)).unwrap();
        assert_eq!(body["latitude"], 48.39);
        assert_eq!(body["longitude"], -4.486);
    }
}
