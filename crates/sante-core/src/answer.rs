//! Answer shapes and the keyed answer accumulator.
//!
//! An [`AnswerChoice`] is what the presentation layer offers (a button, a
//! swipe direction); an [`AnswerValue`] is what gets recorded once raw input
//! has been validated against the current question's domain. Values
//! serialize with a self-describing field-name tag, never positional
//! integer codes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::catalog::Catalog;
use crate::error::{Result, SanteError};

/// An input affordance offered for a question.
///
/// The default set is `[Yes, No]`; specific questions widen it with one of
/// the qualified refusals, or narrow it to a single `Continue` that hands
/// collection over to a numeric picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnswerChoice {
    Yes,
    No,
    DontKnow,
    NotApplicable,
    RatherNotAnswer,
    Continue,
}

impl AnswerChoice {
    /// The label key used when presenting this choice.
    pub fn label(&self) -> &'static str {
        match self {
            AnswerChoice::Yes => "yes",
            AnswerChoice::No => "no",
            AnswerChoice::DontKnow => "don't know",
            AnswerChoice::NotApplicable => "not applicable",
            AnswerChoice::RatherNotAnswer => "rather not answer",
            AnswerChoice::Continue => "continue",
        }
    }
}

/// A validated answer recorded for one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum AnswerValue {
    Yes,
    No,
    DontKnow,
    NotApplicable,
    RatherNotAnswer,
    Number(i64),
}

impl AnswerValue {
    /// The fixed wire token for this answer shape.
    ///
    /// Numeric answers encode as `value-<n>`.
    pub fn token(&self) -> String {
        match self {
            AnswerValue::Yes => "yes".to_string(),
            AnswerValue::No => "no".to_string(),
            AnswerValue::DontKnow => "dontKnow".to_string(),
            AnswerValue::NotApplicable => "notApplicable".to_string(),
            AnswerValue::RatherNotAnswer => "ratherNotAnswer".to_string(),
            AnswerValue::Number(n) => format!("value-{}", n),
        }
    }

    /// Resolves a wire token back to the answer value it encodes.
    ///
    /// # Errors
    ///
    /// Returns a wire serialization error for unknown tokens or a malformed
    /// `value-<n>` suffix.
    pub fn from_token(token: &str) -> Result<Self> {
        match token {
            "yes" => Ok(AnswerValue::Yes),
            "no" => Ok(AnswerValue::No),
            "dontKnow" => Ok(AnswerValue::DontKnow),
            "notApplicable" => Ok(AnswerValue::NotApplicable),
            "ratherNotAnswer" => Ok(AnswerValue::RatherNotAnswer),
            other => match other.strip_prefix("value-") {
                Some(raw) => raw
                    .parse::<i64>()
                    .map(AnswerValue::Number)
                    .map_err(|_| SanteError::wire(format!("malformed numeric token '{}'", other))),
                None => Err(SanteError::wire(format!("unknown answer token '{}'", other))),
            },
        }
    }
}

/// The mutable accumulator mapping question id to the answer given for it.
///
/// Owned exclusively by one in-flight flow controller; created empty when a
/// flow starts and discarded after submission or cancellation. Insertion
/// order is irrelevant for storage — submission order always comes from the
/// catalog, via [`AnswerSet::to_ordered`].
#[derive(Debug, Clone, Default)]
pub struct AnswerSet {
    answers: HashMap<String, AnswerValue>,
}

impl AnswerSet {
    /// Creates an empty answer set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an answer, overwriting any prior answer for the same id.
    pub fn record(&mut self, question_id: impl Into<String>, value: AnswerValue) {
        self.answers.insert(question_id.into(), value);
    }

    /// Removes the answer for a question (the undo path).
    pub fn remove(&mut self, question_id: &str) -> Option<AnswerValue> {
        self.answers.remove(question_id)
    }

    /// Returns the recorded answer for a question, if any.
    pub fn get(&self, question_id: &str) -> Option<&AnswerValue> {
        self.answers.get(question_id)
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.answers.contains_key(question_id)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Discards every recorded answer.
    pub fn clear(&mut self) {
        self.answers.clear();
    }

    /// Produces the answers in catalog order.
    ///
    /// A question with no recorded answer is an internal-consistency error:
    /// it cannot happen when a flow controller completed normally.
    pub fn to_ordered(&self, catalog: &Catalog) -> Result<Vec<(&'static str, AnswerValue)>> {
        catalog
            .questions()
            .iter()
            .map(|question| {
                self.answers
                    .get(question.id())
                    .copied()
                    .map(|value| (question.id(), value))
                    .ok_or_else(|| {
                        SanteError::internal(format!(
                            "answer set has no answer for question '{}'",
                            question.id()
                        ))
                    })
            })
            .collect()
    }

    /// Serializes the set to its `{questionKey: answerToken}` wire mapping,
    /// in catalog order.
    pub fn wire_map(&self, catalog: &Catalog) -> Result<serde_json::Map<String, serde_json::Value>> {
        let mut map = serde_json::Map::new();
        for (id, value) in self.to_ordered(catalog)? {
            map.insert(id.to_string(), serde_json::Value::String(value.token()));
        }
        Ok(map)
    }

    /// Re-resolves a wire mapping against the catalog into an answer set.
    ///
    /// # Errors
    ///
    /// Fails on keys the catalog does not know, non-string values, or
    /// unknown answer tokens.
    pub fn from_wire_map(
        catalog: &Catalog,
        map: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Self> {
        let mut set = AnswerSet::new();
        for (key, raw) in map {
            let question = catalog
                .question_by_id(key)
                .ok_or_else(|| SanteError::wire(format!("unknown question key '{}'", key)))?;
            let token = raw
                .as_str()
                .ok_or_else(|| SanteError::wire(format!("non-string token for '{}'", key)))?;
            set.record(question.id(), AnswerValue::from_token(token)?);
        }
        Ok(set)
    }
}
