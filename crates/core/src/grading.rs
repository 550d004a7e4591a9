//! Quiz scoring and the pass decision.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::model::{Question, QuestionId, Quiz};

/// Recorded in place of an answer for skipped multiple-choice questions.
pub const UNANSWERED: &str = "unanswered";

/// The learner's selections and typed answers for one attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    choices: HashMap<QuestionId, String>,
    essays: HashMap<QuestionId, String>,
}

impl AnswerSheet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select an option key; replaces any earlier selection.
    pub fn select(&mut self, question: QuestionId, key: impl Into<String>) {
        self.choices.insert(question, key.into());
    }

    pub fn write_essay(&mut self, question: QuestionId, text: impl Into<String>) {
        self.essays.insert(question, text.into());
    }

    #[must_use]
    pub fn choice(&self, question: &QuestionId) -> Option<&str> {
        self.choices.get(question).map(String::as_str)
    }

    #[must_use]
    pub fn essay(&self, question: &QuestionId) -> Option<&str> {
        self.essays.get(question).map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
    Unanswered,
}

/// Per-question feedback shown under each multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionFeedback {
    pub question: QuestionId,
    pub verdict: Verdict,
    pub hint: String,
}

impl QuestionFeedback {
    #[must_use]
    pub fn headline(&self) -> &'static str {
        match self.verdict {
            Verdict::Correct => "Correct!",
            Verdict::Incorrect => "Incorrect.",
            Verdict::Unanswered => "Please select an answer.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailReason {
    /// Some lesson is not marked complete. Reported ahead of the score.
    IncompleteLessons,
    /// A multiple-choice question was wrong or skipped.
    ImperfectScore,
}

impl FailReason {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            FailReason::IncompleteLessons => {
                "You need to complete all lessons before generating your certificate."
            }
            FailReason::ImperfectScore => {
                "You need a perfect score to proceed. Please review your answers and try again."
            }
        }
    }

    /// Shorter text for the toast.
    #[must_use]
    pub fn toast(self) -> &'static str {
        match self {
            FailReason::IncompleteLessons => "Please complete all lessons first.",
            FailReason::ImperfectScore => "You need a perfect score to proceed. Please try again.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeOutcome {
    Passed,
    Failed(FailReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeReport {
    /// Correct multiple-choice answers.
    pub score: u32,
    /// Multiple-choice questions; essays are never scored.
    pub total: u32,
    pub all_answered: bool,
    pub feedback: Vec<QuestionFeedback>,
    /// Every question in quiz order, essays verbatim.
    pub answers: IndexMap<String, String>,
    pub outcome: GradeOutcome,
}

impl GradeReport {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.outcome == GradeOutcome::Passed
    }

    #[must_use]
    pub fn feedback_for(&self, question: &QuestionId) -> Option<&QuestionFeedback> {
        self.feedback.iter().find(|f| &f.question == question)
    }
}

/// Score `sheet` against `quiz`.
///
/// Passing needs a perfect score with every multiple-choice question answered
/// and every lesson already complete. Essay content never affects the result.
#[must_use]
pub fn grade(quiz: &Quiz, sheet: &AnswerSheet, lessons_complete: bool) -> GradeReport {
    let mut score = 0_u32;
    let mut total = 0_u32;
    let mut all_answered = true;
    let mut feedback = Vec::new();
    let mut answers = IndexMap::new();

    for question in &quiz.questions {
        match question {
            Question::MultipleChoice(q) => {
                total += 1;
                let verdict = match sheet.choice(&q.id) {
                    Some(key) => {
                        answers.insert(q.id.as_str().to_owned(), key.to_owned());
                        if q.is_correct(key) {
                            score += 1;
                            Verdict::Correct
                        } else {
                            Verdict::Incorrect
                        }
                    }
                    None => {
                        answers.insert(q.id.as_str().to_owned(), UNANSWERED.to_owned());
                        all_answered = false;
                        Verdict::Unanswered
                    }
                };
                feedback.push(QuestionFeedback {
                    question: q.id.clone(),
                    verdict,
                    hint: q.hint.clone(),
                });
            }
            Question::Essay(q) => {
                let text = sheet.essay(&q.id).unwrap_or_default();
                answers.insert(q.id.as_str().to_owned(), text.to_owned());
            }
        }
    }

    let outcome = if score == total && all_answered && lessons_complete {
        GradeOutcome::Passed
    } else if !lessons_complete {
        GradeOutcome::Failed(FailReason::IncompleteLessons)
    } else {
        GradeOutcome::Failed(FailReason::ImperfectScore)
    };

    GradeReport {
        score,
        total,
        all_answered,
        feedback,
        answers,
        outcome,
    }
}
