//! One-row CSV rendering of a completion record.

use chrono::{DateTime, Utc};

use indexmap::IndexMap;

use crate::model::CompletionRecord;

pub const CSV_HEADER: &str =
    "Timestamp,FirstName,LastName,Congregation,UserCode,CourseID,Score,TotalQuestions,Percentage,Answers";

/// Header line, newline, data row.
#[must_use]
pub fn completion_csv(record: &CompletionRecord) -> String {
    format!("{CSV_HEADER}\n{}", completion_row(record))
}

/// The data row alone. Free-text fields are always quoted.
#[must_use]
pub fn completion_row(record: &CompletionRecord) -> String {
    [
        format_timestamp(record.timestamp),
        quoted(&record.first_name),
        quoted(&record.last_name),
        quoted(&record.congregation),
        quoted(&record.user_code),
        bare(record.course_id.as_str()),
        record.score.to_string(),
        record.total_questions.to_string(),
        record.percentage.to_string(),
        quoted(&format_answers(&record.answers)),
    ]
    .join(",")
}

/// `completion-<courseId>-<userCode>.csv`
#[must_use]
pub fn export_file_name(record: &CompletionRecord) -> String {
    format!(
        "completion-{}-{}.csv",
        sanitize_file_part(record.course_id.as_str()),
        sanitize_file_part(&record.user_code)
    )
}

/// `MM/DD/YYYY HH:MM`, 24-hour, UTC.
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%m/%d/%Y %H:%M").to_string()
}

/// `Q<id>: <value>` pairs joined by `; `.
#[must_use]
pub fn format_answers(answers: &IndexMap<String, String>) -> String {
    if answers.is_empty() {
        return "No answers".to_owned();
    }
    answers
        .iter()
        .map(|(question, answer)| format!("Q{question}: {answer}"))
        .collect::<Vec<_>>()
        .join("; ")
}

fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn bare(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        quoted(value)
    } else {
        value.to_owned()
    }
}

fn sanitize_file_part(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "unknown".to_owned()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AttemptSummary, CourseId, Learner};
    use crate::time::fixed_now;

    /// Split one CSV line on commas outside quotes, unescaping `""`.
    fn split_row(line: &str) -> Vec<String> {
        let mut fields = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;
        let mut chars = line.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '"' if in_quotes && chars.peek() == Some(&'"') => {
                    current.push('"');
                    chars.next();
                }
                '"' => in_quotes = !in_quotes,
                ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
                _ => current.push(c),
            }
        }
        fields.push(current);
        fields
    }

    fn record(first_name: &str, user_code: &str) -> CompletionRecord {
        let learner = Learner::new(first_name, "Doe, Jr.", "North \"Hill\"", user_code).unwrap();
        let attempt = AttemptSummary {
            course_id: CourseId::new("tour-guiding"),
            course_title: "Tour Guiding".into(),
            score: 3,
            total_questions: 3,
            answers: [
                ("q1".to_string(), "a".to_string()),
                ("q2".to_string(), "b".to_string()),
                ("q3".to_string(), "I liked it, a lot".to_string()),
            ]
            .into_iter()
            .collect(),
        };
        CompletionRecord::passed(&learner, attempt, fixed_now())
    }

    #[test]
    fn header_and_single_row() {
        let csv = completion_csv(&record("Jane", "U1"));
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], CSV_HEADER);
    }

    #[test]
    fn row_parses_back_to_score_and_total() {
        let csv = completion_csv(&record("Jane", "U1"));
        let row = csv.lines().nth(1).unwrap();
        let fields = split_row(row);
        assert_eq!(fields.len(), 10);
        assert_eq!(fields[1], "Jane");
        assert_eq!(fields[2], "Doe, Jr.");
        assert_eq!(fields[3], "North \"Hill\"");
        assert_eq!(fields[4], "U1");
        assert_eq!(fields[5], "tour-guiding");
        assert_eq!(fields[6].parse::<u32>().unwrap(), 3);
        assert_eq!(fields[7].parse::<u32>().unwrap(), 3);
        assert_eq!(fields[8], "100");
        assert_eq!(fields[9], "Qq1: a; Qq2: b; Qq3: I liked it, a lot");
    }

    #[test]
    fn timestamp_is_us_style_24_hour() {
        // fixed_now() is 2023-11-14T22:13:20Z
        assert_eq!(format_timestamp(fixed_now()), "11/14/2023 22:13");
    }

    #[test]
    fn empty_answers_render_placeholder() {
        assert_eq!(format_answers(&IndexMap::new()), "No answers");
    }

    #[test]
    fn file_name_uses_course_and_user_code() {
        assert_eq!(
            export_file_name(&record("Jane", "U1")),
            "completion-tour-guiding-U1.csv"
        );
        assert_eq!(
            export_file_name(&record("Jane", "a/b")),
            "completion-tour-guiding-a_b.csv"
        );
    }
}
