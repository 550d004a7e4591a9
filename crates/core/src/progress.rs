//! Sequential unlock rules over a course outline and a completed set.

use serde::{Deserialize, Serialize};

use crate::model::{CourseOutline, EntryId};

/// Completed lesson/quiz identifiers for one course, in completion order.
///
/// Set semantics: inserting an id twice keeps one copy. There is no removal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<EntryId>", into = "Vec<EntryId>")]
pub struct CompletedSet {
    ids: Vec<EntryId>,
}

impl CompletedSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, id: &EntryId) -> bool {
        self.ids.contains(id)
    }

    /// Returns `true` if the id was not already present.
    pub fn insert(&mut self, id: EntryId) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntryId> {
        self.ids.iter()
    }
}

impl From<Vec<EntryId>> for CompletedSet {
    fn from(ids: Vec<EntryId>) -> Self {
        let mut set = Self::new();
        for id in ids {
            set.insert(id);
        }
        set
    }
}

impl From<CompletedSet> for Vec<EntryId> {
    fn from(set: CompletedSet) -> Self {
        set.ids
    }
}

/// Navigation state of one outline entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryState {
    pub id: EntryId,
    pub unlocked: bool,
    pub completed: bool,
}

/// Read-only view of the unlock rules for one course.
#[derive(Debug, Clone, Copy)]
pub struct ProgressTracker<'a> {
    outline: &'a CourseOutline,
    completed: &'a CompletedSet,
}

impl<'a> ProgressTracker<'a> {
    #[must_use]
    pub fn new(outline: &'a CourseOutline, completed: &'a CompletedSet) -> Self {
        Self { outline, completed }
    }

    #[must_use]
    pub fn is_complete(&self, id: &EntryId) -> bool {
        self.completed.contains(id)
    }

    /// Lesson 0 is always open; lesson i opens once lesson i-1 is complete;
    /// the quiz opens once every lesson is complete. Unknown ids stay locked.
    #[must_use]
    pub fn is_unlocked(&self, id: &EntryId) -> bool {
        if id == self.outline.quiz() {
            return self.all_lessons_complete();
        }
        match self.outline.lesson_position(id) {
            Some(0) => true,
            Some(i) => self.completed.contains(&self.outline.lessons()[i - 1]),
            None => false,
        }
    }

    #[must_use]
    pub fn all_lessons_complete(&self) -> bool {
        self.outline
            .lessons()
            .iter()
            .all(|id| self.completed.contains(id))
    }

    /// Completed entries of this outline. Ids left over from an older
    /// version of the course file are not counted.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed
            .iter()
            .filter(|id| *id == self.outline.quiz() || self.outline.lesson_position(id).is_some())
            .count()
    }

    /// `completed / (lessons + 1) * 100`, unrounded.
    #[must_use]
    pub fn percent_exact(&self) -> f64 {
        let total = self.outline.entry_count() as f64;
        (self.completed_count() as f64 / total * 100.0).clamp(0.0, 100.0)
    }

    /// Percentage rounded for display, `0..=100`.
    #[must_use]
    pub fn percent_complete(&self) -> u8 {
        // clamped above, the cast cannot truncate
        self.percent_exact().round() as u8
    }

    /// The entry that follows `id` in navigation order, if it is open.
    #[must_use]
    pub fn next_unlocked_after(&self, id: &EntryId) -> Option<EntryId> {
        let pos = self.outline.lesson_position(id)?;
        let next = self
            .outline
            .lessons()
            .get(pos + 1)
            .unwrap_or_else(|| self.outline.quiz());
        self.is_unlocked(next).then(|| next.clone())
    }

    /// First entry a learner can open, used by "Start Now".
    #[must_use]
    pub fn first_unlocked(&self) -> Option<EntryId> {
        self.outline
            .lessons()
            .iter()
            .chain(std::iter::once(self.outline.quiz()))
            .find(|id| self.is_unlocked(id))
            .cloned()
    }

    /// Lessons in order, then the quiz.
    #[must_use]
    pub fn entry_states(&self) -> Vec<EntryState> {
        self.outline
            .lessons()
            .iter()
            .chain(std::iter::once(self.outline.quiz()))
            .map(|id| EntryState {
                id: id.clone(),
                unlocked: self.is_unlocked(id),
                completed: self.is_complete(id),
            })
            .collect()
    }
}
