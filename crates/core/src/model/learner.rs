use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LearnerError {
    #[error("first name is required")]
    MissingFirstName,
}

/// Identity fields captured at onboarding and copied into completion records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Learner {
    pub first_name: String,
    pub last_name: String,
    pub congregation: String,
    pub user_code: String,
}

impl Learner {
    /// Build a learner from form input, trimming every field.
    ///
    /// # Errors
    ///
    /// Returns `LearnerError::MissingFirstName` when the first name is blank;
    /// the course page treats a learner without one as not onboarded.
    pub fn new(
        first_name: &str,
        last_name: &str,
        congregation: &str,
        user_code: &str,
    ) -> Result<Self, LearnerError> {
        let first_name = first_name.trim();
        if first_name.is_empty() {
            return Err(LearnerError::MissingFirstName);
        }
        Ok(Self {
            first_name: first_name.to_owned(),
            last_name: last_name.trim().to_owned(),
            congregation: congregation.trim().to_owned(),
            user_code: user_code.trim().to_owned(),
        })
    }
}
