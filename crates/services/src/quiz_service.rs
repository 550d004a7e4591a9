use std::sync::Arc;

use tokio::task::JoinHandle;

use learn_core::grading::{AnswerSheet, GradeOutcome, GradeReport, grade};
use learn_core::model::{AttemptSummary, CompletionRecord, Course};
use storage::repository::{CompletionRepository, LearnerRepository};

use crate::Clock;
use crate::error::QuizServiceError;
use crate::progress_service::ProgressStore;
use crate::submit::{SubmissionReport, Submitter};

/// Result of one graded attempt.
pub struct QuizAttempt {
    pub report: GradeReport,
    /// Set only for passing attempts.
    pub record: Option<CompletionRecord>,
    /// Background relay of `record`; resolves once the transports settle.
    pub submission: Option<JoinHandle<SubmissionReport>>,
}

impl QuizAttempt {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.report.passed()
    }
}

/// Grades quiz attempts and records passing ones.
#[derive(Clone)]
pub struct QuizService {
    clock: Clock,
    completions: CompletionRepository,
    learner: LearnerRepository,
    submitter: Arc<Submitter>,
}

impl QuizService {
    #[must_use]
    pub fn new(
        clock: Clock,
        completions: CompletionRepository,
        learner: LearnerRepository,
        submitter: Arc<Submitter>,
    ) -> Self {
        Self {
            clock,
            completions,
            learner,
            submitter,
        }
    }

    /// Grade `sheet` against the course quiz.
    ///
    /// A passing attempt appends one completion record to local history, marks
    /// the quiz complete, and hands the record to the submitter in the
    /// background. A failing attempt writes nothing.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError` if progress or history cannot be written.
    pub async fn submit_attempt(
        &self,
        course: &Course,
        progress: &mut ProgressStore,
        sheet: &AnswerSheet,
    ) -> Result<QuizAttempt, QuizServiceError> {
        let report = grade(course.quiz(), sheet, progress.all_lessons_complete());

        if let GradeOutcome::Failed(reason) = report.outcome {
            tracing::info!(
                course_id = %course.id(),
                score = report.score,
                total = report.total,
                ?reason,
                "quiz attempt failed, not recorded"
            );
            return Ok(QuizAttempt {
                report,
                record: None,
                submission: None,
            });
        }

        let learner = self.learner.load().await?.unwrap_or_default();
        let record = CompletionRecord::passed(
            &learner,
            AttemptSummary {
                course_id: course.id().clone(),
                course_title: course.title().to_owned(),
                score: report.score,
                total_questions: report.total,
                answers: report.answers.clone(),
            },
            self.clock.now(),
        );
        self.completions.append(&record).await?;
        // The quiz only counts as complete once its record is in history.
        progress.mark_complete(&course.quiz().id).await?;
        tracing::info!(
            course_id = %record.course_id,
            score = record.score,
            total = record.total_questions,
            "completion recorded"
        );

        let submitter = Arc::clone(&self.submitter);
        let relayed = record.clone();
        let submission = tokio::spawn(async move { submitter.submit(&relayed).await });

        Ok(QuizAttempt {
            report,
            record: Some(record),
            submission: Some(submission),
        })
    }

    /// Every recorded completion, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if the history cannot be read.
    pub async fn history(&self) -> Result<Vec<CompletionRecord>, QuizServiceError> {
        Ok(self.completions.history().await?)
    }
}
