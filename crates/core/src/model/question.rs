use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

use crate::model::ids::QuestionId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuestionError {
    #[error("question {0} has no answer options")]
    NoOptions(QuestionId),

    #[error("question {0} has no correct option key")]
    MissingCorrect(QuestionId),

    #[error("question {id} marks `{key}` as correct but has no such option")]
    UnknownCorrect { id: QuestionId, key: String },
}

/// A quiz question: scored multiple choice, or unscored free text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawQuestion")]
pub enum Question {
    MultipleChoice(ChoiceQuestion),
    Essay(EssayQuestion),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceQuestion {
    pub id: QuestionId,
    pub text: String,
    /// Option key → label, in display order.
    pub options: IndexMap<String, String>,
    pub correct: String,
    pub hint: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EssayQuestion {
    pub id: QuestionId,
    pub text: String,
    pub suggestion: String,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> &QuestionId {
        match self {
            Question::MultipleChoice(q) => &q.id,
            Question::Essay(q) => &q.id,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Question::MultipleChoice(q) => &q.text,
            Question::Essay(q) => &q.text,
        }
    }

    #[must_use]
    pub fn is_scored(&self) -> bool {
        matches!(self, Question::MultipleChoice(_))
    }
}

impl ChoiceQuestion {
    #[must_use]
    pub fn is_correct(&self, key: &str) -> bool {
        self.correct == key
    }
}

#[derive(Deserialize)]
struct RawQuestion {
    id: QuestionId,
    text: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    options: Option<IndexMap<String, String>>,
    #[serde(default)]
    correct: Option<String>,
    #[serde(default)]
    hint: Option<String>,
    #[serde(default)]
    suggestion: Option<String>,
}

impl TryFrom<RawQuestion> for Question {
    type Error = QuestionError;

    fn try_from(raw: RawQuestion) -> Result<Self, Self::Error> {
        if raw.kind.as_deref() == Some("essay") {
            return Ok(Question::Essay(EssayQuestion {
                id: raw.id,
                text: raw.text,
                suggestion: raw.suggestion.unwrap_or_default(),
            }));
        }

        // Everything that is not an essay is graded as multiple choice.
        let options = raw.options.unwrap_or_default();
        if options.is_empty() {
            return Err(QuestionError::NoOptions(raw.id));
        }
        let correct = raw
            .correct
            .ok_or_else(|| QuestionError::MissingCorrect(raw.id.clone()))?;
        if !options.contains_key(&correct) {
            return Err(QuestionError::UnknownCorrect {
                id: raw.id,
                key: correct,
            });
        }

        Ok(Question::MultipleChoice(ChoiceQuestion {
            id: raw.id,
            text: raw.text,
            options,
            correct,
            hint: raw.hint.unwrap_or_default(),
        }))
    }
}
