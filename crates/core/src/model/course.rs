use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

use crate::model::content::ContentItem;
use crate::model::ids::{CourseId, EntryId};
use crate::model::question::Question;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CourseError {
    #[error("course title cannot be empty")]
    EmptyTitle,

    #[error("course has no lessons")]
    NoLessons,

    #[error("entry id `{0}` is used more than once")]
    DuplicateEntry(EntryId),

    #[error("question id `{0}` is used more than once")]
    DuplicateQuestion(String),
}

//
// ─── COURSE FILE SHAPE ─────────────────────────────────────────────────────────
//

/// A course data file exactly as it is stored next to the manifest.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseFile {
    pub course_title: String,
    pub modules: Vec<Module>,
    pub quiz: Quiz,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub module_title: String,
    pub lessons: Vec<Lesson>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Lesson {
    pub id: EntryId,
    pub title: String,
    #[serde(default)]
    pub content: Vec<ContentItem>,
}

impl Lesson {
    /// Lessons without their own action block get a default one appended
    /// when rendered, so every lesson can be marked complete.
    #[must_use]
    pub fn has_action_block(&self) -> bool {
        self.content.iter().any(ContentItem::is_actions)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Quiz {
    pub id: EntryId,
    pub title: String,
    pub questions: Vec<Question>,
}

impl Quiz {
    /// Number of questions that count towards the score.
    #[must_use]
    pub fn scored_count(&self) -> u32 {
        let count = self.questions.iter().filter(|q| q.is_scored()).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }
}

//
// ─── VALIDATED COURSE ──────────────────────────────────────────────────────────
//

/// A loaded, read-only course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    id: CourseId,
    title: String,
    modules: Vec<Module>,
    quiz: Quiz,
}

impl Course {
    /// Validate a parsed course file and attach the manifest id to it.
    ///
    /// # Errors
    ///
    /// Returns `CourseError` for an empty title, a course without lessons,
    /// or ids that are not unique.
    pub fn from_file(id: CourseId, file: CourseFile) -> Result<Self, CourseError> {
        if file.course_title.trim().is_empty() {
            return Err(CourseError::EmptyTitle);
        }

        let mut seen = HashSet::new();
        for lesson in file.modules.iter().flat_map(|m| m.lessons.iter()) {
            if !seen.insert(lesson.id.clone()) {
                return Err(CourseError::DuplicateEntry(lesson.id.clone()));
            }
        }
        if seen.is_empty() {
            return Err(CourseError::NoLessons);
        }
        if seen.contains(&file.quiz.id) {
            return Err(CourseError::DuplicateEntry(file.quiz.id.clone()));
        }

        let mut questions = HashSet::new();
        for q in &file.quiz.questions {
            if !questions.insert(q.id().clone()) {
                return Err(CourseError::DuplicateQuestion(q.id().to_string()));
            }
        }

        Ok(Self {
            id,
            title: file.course_title,
            modules: file.modules,
            quiz: file.quiz,
        })
    }

    #[must_use]
    pub fn id(&self) -> &CourseId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    #[must_use]
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    /// All lessons in sequence order, across modules.
    pub fn lessons(&self) -> impl Iterator<Item = &Lesson> {
        self.modules.iter().flat_map(|m| m.lessons.iter())
    }

    #[must_use]
    pub fn lesson(&self, id: &EntryId) -> Option<&Lesson> {
        self.lessons().find(|l| &l.id == id)
    }

    /// Title of a lesson or of the quiz.
    #[must_use]
    pub fn entry_title(&self, id: &EntryId) -> Option<&str> {
        if id == &self.quiz.id {
            return Some(&self.quiz.title);
        }
        self.lesson(id).map(|l| l.title.as_str())
    }

    /// The navigation order used by the progress rules.
    #[must_use]
    pub fn outline(&self) -> CourseOutline {
        CourseOutline::new(
            self.lessons().map(|l| l.id.clone()).collect(),
            self.quiz.id.clone(),
        )
    }
}

/// Lesson sequence plus quiz id; everything the progress rules need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseOutline {
    lessons: Vec<EntryId>,
    quiz: EntryId,
}

impl CourseOutline {
    #[must_use]
    pub fn new(lessons: Vec<EntryId>, quiz: EntryId) -> Self {
        Self { lessons, quiz }
    }

    #[must_use]
    pub fn lessons(&self) -> &[EntryId] {
        &self.lessons
    }

    #[must_use]
    pub fn quiz(&self) -> &EntryId {
        &self.quiz
    }

    #[must_use]
    pub fn lesson_position(&self, id: &EntryId) -> Option<usize> {
        self.lessons.iter().position(|l| l == id)
    }

    /// Lessons plus the quiz.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.lessons.len() + 1
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
