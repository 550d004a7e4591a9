use learn_core::model::{Course, CourseId, CourseOutline, EntryId};
use learn_core::progress::{CompletedSet, EntryState, ProgressTracker};
use storage::repository::ProgressRepository;

use crate::error::ProgressError;

/// Completion state for one course, backed by the progress repository.
///
/// Writes reload the stored set first and save the whole array back.
#[derive(Clone)]
pub struct ProgressStore {
    course_id: CourseId,
    outline: CourseOutline,
    completed: CompletedSet,
    repo: ProgressRepository,
}

impl ProgressStore {
    /// Load the saved progress for `course`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the stored set cannot be read.
    pub async fn open(repo: ProgressRepository, course: &Course) -> Result<Self, ProgressError> {
        let completed = repo.load(course.id()).await?;
        Ok(Self {
            course_id: course.id().clone(),
            outline: course.outline(),
            completed,
            repo,
        })
    }

    #[must_use]
    pub fn course_id(&self) -> &CourseId {
        &self.course_id
    }

    #[must_use]
    pub fn outline(&self) -> &CourseOutline {
        &self.outline
    }

    #[must_use]
    pub fn completed(&self) -> &CompletedSet {
        &self.completed
    }

    #[must_use]
    pub fn tracker(&self) -> ProgressTracker<'_> {
        ProgressTracker::new(&self.outline, &self.completed)
    }

    #[must_use]
    pub fn is_unlocked(&self, id: &EntryId) -> bool {
        self.tracker().is_unlocked(id)
    }

    #[must_use]
    pub fn is_complete(&self, id: &EntryId) -> bool {
        self.completed.contains(id)
    }

    #[must_use]
    pub fn all_lessons_complete(&self) -> bool {
        self.tracker().all_lessons_complete()
    }

    #[must_use]
    pub fn percent_complete(&self) -> u8 {
        self.tracker().percent_complete()
    }

    #[must_use]
    pub fn entry_states(&self) -> Vec<EntryState> {
        self.tracker().entry_states()
    }

    #[must_use]
    pub fn next_unlocked_after(&self, id: &EntryId) -> Option<EntryId> {
        self.tracker().next_unlocked_after(id)
    }

    /// Record `id` as completed. Completing an entry twice is a no-op.
    ///
    /// Returns whether the entry was newly completed.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::UnknownEntry` for ids outside this course and
    /// `ProgressError::Storage` if the set cannot be read or written.
    pub async fn mark_complete(&mut self, id: &EntryId) -> Result<bool, ProgressError> {
        let known = id == self.outline.quiz() || self.outline.lesson_position(id).is_some();
        if !known {
            return Err(ProgressError::UnknownEntry(id.clone()));
        }

        let mut completed = self.repo.load(&self.course_id).await?;
        let inserted = completed.insert(id.clone());
        if inserted {
            self.repo.save(&self.course_id, &completed).await?;
            tracing::debug!(course_id = %self.course_id, entry = %id, "entry completed");
        }
        self.completed = completed;
        Ok(inserted)
    }
}
