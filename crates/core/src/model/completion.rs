use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::ids::CourseId;
use crate::model::learner::Learner;

/// Snapshot written once per passing quiz attempt.
///
/// Records are appended to the local history and relayed outward; nothing in
/// the system mutates or deletes them afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRecord {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub congregation: String,
    #[serde(default)]
    pub user_code: String,
    pub course_id: CourseId,
    #[serde(default)]
    pub course_title: String,
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub total_questions: u32,
    #[serde(default)]
    pub percentage: u32,
    #[serde(default)]
    pub passed: bool,
    /// Question id → chosen option key, essay text, or `unanswered`.
    #[serde(default)]
    pub answers: IndexMap<String, String>,
    pub completion_time: DateTime<Utc>,
}

/// Inputs for a completion record that come from the graded attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptSummary {
    pub course_id: CourseId,
    pub course_title: String,
    pub score: u32,
    pub total_questions: u32,
    pub answers: IndexMap<String, String>,
}

impl CompletionRecord {
    /// Build the record for a passing attempt at `now`.
    #[must_use]
    pub fn passed(learner: &Learner, attempt: AttemptSummary, now: DateTime<Utc>) -> Self {
        Self {
            timestamp: now,
            first_name: learner.first_name.clone(),
            last_name: learner.last_name.clone(),
            congregation: learner.congregation.clone(),
            user_code: learner.user_code.clone(),
            percentage: percentage(attempt.score, attempt.total_questions),
            course_id: attempt.course_id,
            course_title: attempt.course_title,
            score: attempt.score,
            total_questions: attempt.total_questions,
            passed: true,
            answers: attempt.answers,
            completion_time: now,
        }
    }
}

/// `score / total` as a rounded percentage; a quiz with nothing to score is 0%.
#[must_use]
pub fn percentage(score: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let pct = (f64::from(score) / f64::from(total) * 100.0).round();
    // score <= total in every caller, so this stays within 0..=100
    pct.clamp(0.0, 100.0) as u32
}
