use learn_core::model::{CourseId, Learner};
use storage::repository::LearnerRepository;

use crate::error::LearnerServiceError;

/// Course opened when nothing else was chosen.
pub const DEFAULT_COURSE_ID: &str = "tour-guiding";

/// Onboarding and the active-course selection.
#[derive(Clone)]
pub struct LearnerService {
    learner: LearnerRepository,
}

impl LearnerService {
    #[must_use]
    pub fn new(learner: LearnerRepository) -> Self {
        Self { learner }
    }

    /// The onboarded learner, if any.
    ///
    /// # Errors
    ///
    /// Returns `LearnerServiceError::Storage` if identity fields cannot be read.
    pub async fn current_learner(&self) -> Result<Option<Learner>, LearnerServiceError> {
        Ok(self.learner.load().await?)
    }

    /// Save identity fields and make `course` the active course.
    ///
    /// # Errors
    ///
    /// Returns `LearnerServiceError::Learner` when the first name is blank and
    /// `LearnerServiceError::Storage` if a field cannot be written.
    pub async fn onboard(
        &self,
        first_name: &str,
        last_name: &str,
        congregation: &str,
        user_code: &str,
        course: &CourseId,
    ) -> Result<Learner, LearnerServiceError> {
        let learner = Learner::new(first_name, last_name, congregation, user_code)?;
        self.learner.save(&learner).await?;
        self.learner.set_current_course(course).await?;
        tracing::info!(course_id = %course, "learner onboarded");
        Ok(learner)
    }

    /// The stored active course, falling back to `tour-guiding`.
    ///
    /// # Errors
    ///
    /// Returns `LearnerServiceError::Storage` if the value cannot be read.
    pub async fn current_course(&self) -> Result<CourseId, LearnerServiceError> {
        Ok(self
            .learner
            .current_course()
            .await?
            .unwrap_or_else(|| CourseId::new(DEFAULT_COURSE_ID)))
    }

    /// # Errors
    ///
    /// Returns `LearnerServiceError::Storage` if the value cannot be written.
    pub async fn select_course(&self, course: &CourseId) -> Result<(), LearnerServiceError> {
        Ok(self.learner.set_current_course(course).await?)
    }
}
