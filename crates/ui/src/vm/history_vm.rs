use learn_core::model::CompletionRecord;

use crate::vm::time_fmt::format_datetime;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryRowVm {
    pub course: String,
    pub score: String,
    pub percentage: String,
    pub completed_at_str: String,
}

impl From<&CompletionRecord> for HistoryRowVm {
    fn from(record: &CompletionRecord) -> Self {
        let course = if record.course_title.is_empty() {
            record.course_id.to_string()
        } else {
            record.course_title.clone()
        };
        Self {
            course,
            score: format!("{}/{}", record.score, record.total_questions),
            percentage: format!("{}%", record.percentage),
            completed_at_str: format_datetime(record.timestamp),
        }
    }
}

/// Newest first.
#[must_use]
pub fn map_history_rows(records: &[CompletionRecord]) -> Vec<HistoryRowVm> {
    records.iter().rev().map(HistoryRowVm::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use learn_core::model::{AttemptSummary, CourseId, Learner};
    use learn_core::time::fixed_now;

    #[test]
    fn rows_are_newest_first_with_labels() {
        let learner = Learner::new("Jane", "", "", "").unwrap();
        let record = |id: &str, title: &str| {
            CompletionRecord::passed(
                &learner,
                AttemptSummary {
                    course_id: CourseId::new(id),
                    course_title: title.into(),
                    score: 4,
                    total_questions: 4,
                    answers: Default::default(),
                },
                fixed_now(),
            )
        };

        let rows = map_history_rows(&[record("a", "First"), record("b", "")]);

        assert_eq!(rows[0].course, "b");
        assert_eq!(rows[1].course, "First");
        assert_eq!(rows[1].score, "4/4");
        assert_eq!(rows[1].percentage, "100%");
        assert_eq!(rows[1].completed_at_str, "2023-11-14 22:13 UTC");
    }
}
