use learn_core::model::{CourseId, CourseManifest, Learner};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseOptionVm {
    pub id: CourseId,
    pub label: String,
    pub description: Option<String>,
}

#[must_use]
pub fn map_course_options(manifest: &CourseManifest) -> Vec<CourseOptionVm> {
    manifest
        .courses
        .iter()
        .map(|entry| CourseOptionVm {
            id: entry.id.clone(),
            label: entry.display_title().to_owned(),
            description: entry.description.clone(),
        })
        .collect()
}

/// Onboarding inputs, prefilled from any stored identity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OnboardingForm {
    pub first_name: String,
    pub last_name: String,
    pub congregation: String,
    pub user_code: String,
    pub course_id: String,
}

impl OnboardingForm {
    #[must_use]
    pub fn prefilled(learner: Option<&Learner>, course: &CourseId) -> Self {
        let learner = learner.cloned().unwrap_or_default();
        Self {
            first_name: learner.first_name,
            last_name: learner.last_name,
            congregation: learner.congregation,
            user_code: learner.user_code,
            course_id: course.to_string(),
        }
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.first_name.trim().is_empty() && !self.course_id.trim().is_empty()
    }
}
