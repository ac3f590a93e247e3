//! Static question catalogs.
//!
//! Two fixed, ordered catalogs exist: the one-time initial profile
//! questionnaire and the five daily symptom metrics. Catalogs are defined at
//! process start and never mutated.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::answer::AnswerChoice;
use crate::error::{Result, SanteError};

/// One topic of the initial profile questionnaire, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum ProfileTopic {
    Fever,
    Cough,
    Taste,
    ThroatSoreness,
    Diarrhea,
    Tired,
    EatDrink,
    BreathingIssues,
    Age,
    Height,
    Weight,
    HeartDisease,
    Diabetes,
    Cancer,
    BreathingIllness,
    Kidney,
    Liver,
    Pregnant,
    Immunodefense,
    Immunosuppressant,
    PostalCode,
}

impl ProfileTopic {
    /// Stable wire key, unique within the catalog.
    pub fn key(&self) -> &'static str {
        match self {
            ProfileTopic::Fever => "fever",
            ProfileTopic::Cough => "cough",
            ProfileTopic::Taste => "taste",
            ProfileTopic::ThroatSoreness => "throatSoreness",
            ProfileTopic::Diarrhea => "diarrhea",
            ProfileTopic::Tired => "tired",
            ProfileTopic::EatDrink => "eatDrink",
            ProfileTopic::BreathingIssues => "breathingIssues",
            ProfileTopic::Age => "age",
            ProfileTopic::Height => "height",
            ProfileTopic::Weight => "weight",
            ProfileTopic::HeartDisease => "heartDisease",
            // historical backend spellings, kept verbatim
            ProfileTopic::Diabetes => "diabetese",
            ProfileTopic::Cancer => "cancer",
            ProfileTopic::BreathingIllness => "breathingIllness",
            ProfileTopic::Kidney => "kidney",
            ProfileTopic::Liver => "liver",
            ProfileTopic::Pregnant => "pregnant",
            ProfileTopic::Immunodefense => "immunodefense",
            ProfileTopic::Immunosuppressant => "immunosupressant",
            ProfileTopic::PostalCode => "postalCode",
        }
    }

    /// The prompt shown for this topic.
    pub fn prompt(&self) -> &'static str {
        match self {
            ProfileTopic::Fever => "Have you had a fever in the last few days?",
            ProfileTopic::Cough => "Do you have a persistent cough?",
            ProfileTopic::Taste => "Have you noticed a loss of taste or smell?",
            ProfileTopic::ThroatSoreness => "Do you have a sore throat?",
            ProfileTopic::Diarrhea => "Have you had diarrhea recently?",
            ProfileTopic::Tired => "Do you feel unusually tired?",
            ProfileTopic::EatDrink => "Are you able to eat and drink normally?",
            ProfileTopic::BreathingIssues => "Do you have difficulty breathing?",
            ProfileTopic::Age => "How old are you?",
            ProfileTopic::Height => "How tall are you?",
            ProfileTopic::Weight => "How much do you weigh?",
            ProfileTopic::HeartDisease => "Do you suffer from heart disease?",
            ProfileTopic::Diabetes => "Do you suffer from diabetes?",
            ProfileTopic::Cancer => "Are you being treated for cancer?",
            ProfileTopic::BreathingIllness => "Do you have a chronic respiratory illness?",
            ProfileTopic::Kidney => "Do you have a kidney condition?",
            ProfileTopic::Liver => "Do you have a liver condition?",
            ProfileTopic::Pregnant => "Are you pregnant?",
            ProfileTopic::Immunodefense => "Do you have an immune deficiency?",
            ProfileTopic::Immunosuppressant => "Are you taking immunosuppressant medication?",
            ProfileTopic::PostalCode => "May we record your postal code area?",
        }
    }

    /// The answer buttons applicable to this topic.
    ///
    /// Default is `[Yes, No]`; a few topics widen the set, and the numeric
    /// topics collapse to a single `Continue` that triggers the picker.
    pub fn answer_buttons(&self) -> Vec<AnswerChoice> {
        if self.numeric_range().is_some() {
            return vec![AnswerChoice::Continue];
        }
        let mut buttons = vec![AnswerChoice::Yes, AnswerChoice::No];
        match self {
            ProfileTopic::PostalCode => buttons.push(AnswerChoice::RatherNotAnswer),
            ProfileTopic::Pregnant => buttons.push(AnswerChoice::NotApplicable),
            ProfileTopic::HeartDisease
            | ProfileTopic::Immunodefense
            | ProfileTopic::Immunosuppressant => buttons.push(AnswerChoice::DontKnow),
            _ => (),
        }
        buttons
    }

    /// The picker range for numeric topics, `None` for yes/no topics.
    pub fn numeric_range(&self) -> Option<NumericRange> {
        match self {
            ProfileTopic::Age => Some(NumericRange::new(1, 110, 30, "ans")),
            ProfileTopic::Weight => Some(NumericRange::new(1, 150, 60, "kgs")),
            ProfileTopic::Height => Some(NumericRange::new(1, 240, 150, "cm")),
            _ => None,
        }
    }
}

/// One of the five fixed daily symptom metrics, in card order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricKind {
    DrippingNose,
    Cough,
    Fever,
    ThroatSoreness,
    BreathingIssues,
}

impl MetricKind {
    /// The backend field name for this metric.
    ///
    /// `hasbreatingissues` is what the backend actually expects; do not fix
    /// the spelling.
    pub fn wire_key(&self) -> &'static str {
        match self {
            MetricKind::DrippingNose => "hasdrippingnose",
            MetricKind::Cough => "hascough",
            MetricKind::Fever => "hasfever",
            MetricKind::ThroatSoreness => "hasthroatsoreness",
            MetricKind::BreathingIssues => "hasbreatingissues",
        }
    }

    /// Resolves a backend field name to its metric.
    pub fn from_wire(key: &str) -> Result<Self> {
        MetricKind::iter()
            .find(|kind| kind.wire_key() == key)
            .ok_or_else(|| SanteError::wire(format!("unknown metric key '{}'", key)))
    }

    /// The prompt shown on this metric's card.
    pub fn prompt(&self) -> &'static str {
        match self {
            MetricKind::DrippingNose => "Do you have a dripping nose today?",
            MetricKind::Cough => "Are you coughing today?",
            MetricKind::Fever => "Do you have a fever today?",
            MetricKind::ThroatSoreness => "Is your throat sore today?",
            MetricKind::BreathingIssues => "Is breathing difficult today?",
        }
    }
}

/// An inclusive numeric picker range with a default selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericRange {
    min: i64,
    max: i64,
    default_value: i64,
    unit: &'static str,
}

impl NumericRange {
    fn new(min: i64, max: i64, default_value: i64, unit: &'static str) -> Self {
        debug_assert!(min <= default_value && default_value <= max);
        Self {
            min,
            max,
            default_value,
            unit,
        }
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn default_value(&self) -> i64 {
        self.default_value
    }

    /// Unit label shown next to picker values.
    pub fn unit(&self) -> &'static str {
        self.unit
    }

    /// Number of selectable values.
    pub fn len(&self) -> usize {
        (self.max - self.min + 1) as usize
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// The concrete value at a picker index, if the index is in range.
    ///
    /// Picker input is an index into the range, never the value itself:
    /// index 29 of the 1..=110 age range is 30.
    pub fn value_at(&self, index: usize) -> Option<i64> {
        if index < self.len() {
            Some(self.min + index as i64)
        } else {
            None
        }
    }

    /// The picker index preselected when the question is presented.
    pub fn default_index(&self) -> usize {
        (self.default_value - self.min) as usize
    }
}

/// One immutable catalog entry.
#[derive(Debug, Clone)]
pub struct Question {
    id: &'static str,
    prompt: &'static str,
    buttons: Vec<AnswerChoice>,
    numeric: Option<NumericRange>,
}

impl Question {
    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn prompt(&self) -> &'static str {
        self.prompt
    }

    /// The answer buttons derived from this question's domain.
    pub fn buttons(&self) -> &[AnswerChoice] {
        &self.buttons
    }

    pub fn numeric(&self) -> Option<&NumericRange> {
        self.numeric.as_ref()
    }
}

/// A fixed ordered list of questions for one flow type.
#[derive(Debug, Clone)]
pub struct Catalog {
    questions: Vec<Question>,
}

impl Catalog {
    /// The one-time initial profile questionnaire.
    pub fn initial_profile() -> Self {
        let questions = ProfileTopic::iter()
            .map(|topic| Question {
                id: topic.key(),
                prompt: topic.prompt(),
                buttons: topic.answer_buttons(),
                numeric: topic.numeric_range(),
            })
            .collect();
        Self { questions }
    }

    /// The five daily symptom questions, answered by swipe.
    pub fn daily_metrics() -> Self {
        let questions = MetricKind::iter()
            .map(|kind| Question {
                id: kind.wire_key(),
                prompt: kind.prompt(),
                buttons: vec![AnswerChoice::Yes, AnswerChoice::No],
                numeric: None,
            })
            .collect();
        Self { questions }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn question_at(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn question_by_id(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}
