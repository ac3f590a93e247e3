//! The answer-collection flow state machine.
//!
//! A [`FlowController`] drives a single end-to-end pass through one catalog,
//! one question at a time, collecting exactly one answer per question. The
//! button-driven initial questionnaire and the swipe-driven daily cards are
//! the same machine with different input adapters in front of it; the only
//! structural difference is that swipe flows are built with undo enabled.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::answer::{AnswerChoice, AnswerSet, AnswerValue};
use crate::catalog::{Catalog, Question};
use crate::error::{Result, SanteError};

const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Where a flow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    NotStarted,
    /// Waiting for an answer to the question at this catalog index.
    AwaitingAnswer(usize),
    Completed,
    Cancelled,
}

impl FlowState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, FlowState::Completed | FlowState::Cancelled)
    }
}

/// Raw input forwarded by a presentation adapter.
///
/// Button and swipe adapters submit a [`AnswerChoice`]; the numeric picker
/// submits the selected row index, which the controller translates to the
/// question's concrete value before storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowInput {
    Choice(AnswerChoice),
    Picker { index: usize },
}

/// Discrete events emitted to flow observers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FlowEvent {
    AnswerRecorded {
        question_id: String,
        value: AnswerValue,
    },
    FlowCompleted,
    FlowCancelled,
}

/// What a successful `submit_answer` led to.
#[derive(Debug)]
pub enum FlowProgress<'a> {
    /// The flow advanced; present this question next.
    Next(&'a Question),
    /// The last question was answered; the flow is complete.
    Completed,
}

/// Drives one traversal of a catalog, from `start()` to completion or
/// cancellation.
///
/// The controller owns its [`AnswerSet`] exclusively and processes one
/// input at a time; callers must not issue a new `submit_answer` before the
/// previous one returned.
pub struct FlowController {
    catalog: Catalog,
    answers: AnswerSet,
    state: FlowState,
    undo_enabled: bool,
    events: broadcast::Sender<FlowEvent>,
}

impl FlowController {
    /// Creates a button-driven flow over the given catalog.
    pub fn new(catalog: Catalog) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            catalog,
            answers: AnswerSet::new(),
            state: FlowState::NotStarted,
            undo_enabled: false,
            events,
        }
    }

    /// Creates a swipe-driven flow: identical machine, undo enabled.
    pub fn with_undo(catalog: Catalog) -> Self {
        Self {
            undo_enabled: true,
            ..Self::new(catalog)
        }
    }

    /// Subscribes an observer to this flow's events.
    pub fn subscribe(&self) -> broadcast::Receiver<FlowEvent> {
        self.events.subscribe()
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The answers recorded so far.
    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    /// The question awaiting an answer, if the flow is mid-traversal.
    pub fn current_question(&self) -> Option<&Question> {
        match self.state {
            FlowState::AwaitingAnswer(index) => self.catalog.question_at(index),
            _ => None,
        }
    }

    /// Starts the flow and returns the first question to present.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the flow was already started or the
    /// catalog is empty.
    pub fn start(&mut self) -> Result<&Question> {
        if self.state != FlowState::NotStarted {
            return Err(SanteError::internal("flow already started"));
        }
        if self.catalog.is_empty() {
            return Err(SanteError::internal("cannot start a flow over an empty catalog"));
        }
        self.state = FlowState::AwaitingAnswer(0);
        Ok(&self.catalog.questions()[0])
    }

    /// Validates raw input against the current question's domain, records
    /// the resulting answer, and advances the machine.
    ///
    /// Out-of-domain input must never occur when the presentation layer only
    /// offers buttons derived from the question's declared domain, but it is
    /// still rejected defensively: the error leaves state and answers
    /// untouched.
    pub fn submit_answer(&mut self, input: FlowInput) -> Result<FlowProgress<'_>> {
        let index = match self.state {
            FlowState::AwaitingAnswer(index) => index,
            FlowState::NotStarted => {
                return Err(SanteError::internal("flow not started"));
            }
            state => {
                return Err(SanteError::internal(format!(
                    "cannot submit an answer in state {:?}",
                    state
                )));
            }
        };

        // index is always valid while awaiting an answer
        let question = &self.catalog.questions()[index];
        let value = match Self::resolve_input(question, input) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(question = question.id(), %err, "rejected out-of-domain input");
                return Err(err);
            }
        };

        self.answers.record(question.id(), value);
        let _ = self.events.send(FlowEvent::AnswerRecorded {
            question_id: question.id().to_string(),
            value,
        });

        if index + 1 < self.catalog.len() {
            self.state = FlowState::AwaitingAnswer(index + 1);
            Ok(FlowProgress::Next(&self.catalog.questions()[index + 1]))
        } else {
            self.state = FlowState::Completed;
            let _ = self.events.send(FlowEvent::FlowCompleted);
            Ok(FlowProgress::Completed)
        }
    }

    /// Cancels the flow; the answer set is discarded, never submitted.
    pub fn cancel(&mut self) -> Result<()> {
        if self.state.is_terminal() {
            return Err(SanteError::internal("flow already finished"));
        }
        self.state = FlowState::Cancelled;
        self.answers.clear();
        let _ = self.events.send(FlowEvent::FlowCancelled);
        Ok(())
    }

    /// Rolls the machine back one step, removing the answer recorded for the
    /// previous question. Exists only on swipe flows.
    ///
    /// At the first question this is a no-op and returns `None`; otherwise
    /// the question to re-present is returned.
    pub fn undo_last(&mut self) -> Result<Option<&Question>> {
        if !self.undo_enabled {
            return Err(SanteError::internal("undo is not available on this flow"));
        }
        let index = match self.state {
            FlowState::AwaitingAnswer(index) => index,
            state => {
                return Err(SanteError::internal(format!(
                    "cannot undo in state {:?}",
                    state
                )));
            }
        };
        if index == 0 {
            return Ok(None);
        }

        let previous = &self.catalog.questions()[index - 1];
        self.answers.remove(previous.id());
        self.state = FlowState::AwaitingAnswer(index - 1);
        Ok(Some(previous))
    }

    /// Hands the completed answer set to the caller for submission.
    ///
    /// # Errors
    ///
    /// Returns an internal error unless the flow is `Completed`.
    pub fn take_answers(&mut self) -> Result<AnswerSet> {
        if self.state != FlowState::Completed {
            return Err(SanteError::internal(
                "answers can only be taken from a completed flow",
            ));
        }
        Ok(std::mem::take(&mut self.answers))
    }

    fn resolve_input(question: &Question, input: FlowInput) -> Result<AnswerValue> {
        if let Some(range) = question.numeric() {
            // Numeric questions are reached via the single Continue button;
            // the only valid input is the picker's selected row.
            return match input {
                FlowInput::Picker { index } => range.value_at(index).map(AnswerValue::Number).ok_or_else(|| {
                    SanteError::invalid_answer(
                        question.id(),
                        format!("picker index {} out of range 0..{}", index, range.len()),
                    )
                }),
                FlowInput::Choice(choice) => Err(SanteError::invalid_answer(
                    question.id(),
                    format!("expected a picker selection, got button {:?}", choice),
                )),
            };
        }

        let choice = match input {
            FlowInput::Choice(choice) => choice,
            FlowInput::Picker { .. } => {
                return Err(SanteError::invalid_answer(
                    question.id(),
                    "picker input on a non-numeric question",
                ));
            }
        };
        if !question.buttons().contains(&choice) {
            return Err(SanteError::invalid_answer(
                question.id(),
                format!("button {:?} is not offered for this question", choice),
            ));
        }

        match choice {
            AnswerChoice::Yes => Ok(AnswerValue::Yes),
            AnswerChoice::No => Ok(AnswerValue::No),
            AnswerChoice::DontKnow => Ok(AnswerValue::DontKnow),
            AnswerChoice::NotApplicable => Ok(AnswerValue::NotApplicable),
            AnswerChoice::RatherNotAnswer => Ok(AnswerValue::RatherNotAnswer),
            // Continue never appears in a non-numeric button set
            AnswerChoice::Continue => Err(SanteError::invalid_answer(
                question.id(),
                "Continue outside a numeric question",
            )),
        }
    }
}

/// Swipe directions accepted by the daily-metrics adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    /// The flow input a swipe translates to: left is No, right is Yes.
    pub fn as_input(self) -> FlowInput {
        match self {
            SwipeDirection::Left => FlowInput::Choice(AnswerChoice::No),
            SwipeDirection::Right => FlowInput::Choice(AnswerChoice::Yes),
        }
    }
}
