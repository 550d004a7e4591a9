use learn_core::grading::{GradeReport, Verdict};
use learn_core::model::{Question, QuestionId, Quiz};

pub const PASSED_MESSAGE: &str = "Perfect score! You have passed the quiz.";

/// Display shape of one quiz question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuestionVm {
    Choice {
        id: QuestionId,
        text: String,
        /// (option key, label) in file order.
        options: Vec<(String, String)>,
    },
    Essay {
        id: QuestionId,
        text: String,
        suggestion: String,
    },
}

impl QuestionVm {
    #[must_use]
    pub fn id(&self) -> &QuestionId {
        match self {
            Self::Choice { id, .. } | Self::Essay { id, .. } => id,
        }
    }
}

#[must_use]
pub fn map_questions(quiz: &Quiz) -> Vec<QuestionVm> {
    quiz.questions
        .iter()
        .map(|question| match question {
            Question::MultipleChoice(q) => QuestionVm::Choice {
                id: q.id.clone(),
                text: q.text.clone(),
                options: q
                    .options
                    .iter()
                    .map(|(key, label)| (key.to_owned(), label.clone()))
                    .collect(),
            },
            Question::Essay(q) => QuestionVm::Essay {
                id: q.id.clone(),
                text: q.text.clone(),
                suggestion: q.suggestion.clone(),
            },
        })
        .collect()
}

#[must_use]
pub fn score_line(report: &GradeReport) -> String {
    format!("Your score: {} / {}", report.score, report.total)
}

#[must_use]
pub fn feedback_class(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Correct => "question-feedback correct-answer",
        Verdict::Incorrect | Verdict::Unanswered => "question-feedback incorrect-answer",
    }
}
