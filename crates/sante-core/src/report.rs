//! The daily metrics report, the terminal object of the swipe flow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::answer::{AnswerSet, AnswerValue};
use crate::catalog::MetricKind;
use crate::error::{Result, SanteError};
use crate::location::Coordinates;

/// One answered daily metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub kind: MetricKind,
    pub value: bool,
}

/// A completed daily check-in, ready for submission.
///
/// The capture timestamp is set once, when the report is built from a
/// completed flow. Coordinates are optional context attached afterwards by
/// the location service, at most once, and always before transmission is
/// attempted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyMetricsReport {
    answers: Vec<Metric>,
    timestamp: DateTime<Utc>,
    coordinates: Option<Coordinates>,
}

impl DailyMetricsReport {
    /// Builds a report from a completed daily-metrics answer set.
    ///
    /// # Errors
    ///
    /// Returns an internal error if any of the five metrics is missing or
    /// holds a non-binary answer; neither can happen when the flow
    /// controller completed normally.
    pub fn from_answers(answers: &AnswerSet) -> Result<Self> {
        let mut collected = Vec::with_capacity(5);
        for kind in MetricKind::iter() {
            let value = match answers.get(kind.wire_key()) {
                Some(AnswerValue::Yes) => true,
                Some(AnswerValue::No) => false,
                Some(other) => {
                    return Err(SanteError::internal(format!(
                        "metric '{}' holds non-binary answer {:?}",
                        kind.wire_key(),
                        other
                    )));
                }
                None => {
                    return Err(SanteError::internal(format!(
                        "metric '{}' missing from completed flow",
                        kind.wire_key()
                    )));
                }
            };
            collected.push(Metric { kind, value });
        }

        Ok(Self {
            answers: collected,
            timestamp: Utc::now(),
            coordinates: None,
        })
    }

    /// The five metrics in catalog order.
    pub fn answers(&self) -> &[Metric] {
        &self.answers
    }

    /// Capture time, fixed at completion.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    /// Attaches the device position. Valid at most once.
    pub fn attach_coordinates(&mut self, coordinates: Coordinates) -> Result<()> {
        if self.coordinates.is_some() {
            return Err(SanteError::internal(
                "coordinates already attached to this report",
            ));
        }
        self.coordinates = Some(coordinates);
        Ok(())
    }
}
