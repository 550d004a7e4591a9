use std::sync::Arc;

use serde::de::DeserializeOwned;

use learn_core::model::{Course, CourseFile, CourseId, CourseManifest};

use crate::course_source::CourseSource;
use crate::error::{CatalogError, SourceError};

/// Location of the manifest below the source root.
pub const MANIFEST_PATH: &str = "data/courses.json";

/// Resolves course ids to validated, read-only courses.
#[derive(Clone)]
pub struct CatalogService {
    source: Arc<dyn CourseSource>,
}

impl CatalogService {
    #[must_use]
    pub fn new(source: Arc<dyn CourseSource>) -> Self {
        Self { source }
    }

    /// Fetch and parse the course manifest.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ManifestUnavailable` if the manifest cannot be read
    /// and `CatalogError::Malformed` if it is not a manifest.
    pub async fn load_manifest(&self) -> Result<CourseManifest, CatalogError> {
        let bytes = self
            .source
            .read(MANIFEST_PATH)
            .await
            .map_err(|err| {
                tracing::warn!(source = %self.source.describe(), error = %err, "manifest unavailable");
                CatalogError::ManifestUnavailable(err)
            })?;
        parse(MANIFEST_PATH, &bytes)
    }

    /// Resolve `course_id` through the manifest and load its data file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::CourseNotFound` when the manifest has no such id,
    /// `CatalogError::CourseUnavailable` when the data file cannot be read,
    /// `CatalogError::Malformed` for invalid JSON, and `CatalogError::Invalid`
    /// when the course fails validation.
    pub async fn load_course(&self, course_id: &CourseId) -> Result<Course, CatalogError> {
        let manifest = self.load_manifest().await?;
        let entry = manifest
            .find(course_id)
            .ok_or_else(|| CatalogError::CourseNotFound(course_id.clone()))?;

        let bytes = self
            .source
            .read(&entry.data_file)
            .await
            .map_err(|err: SourceError| {
                tracing::warn!(course_id = %course_id, data_file = %entry.data_file, error = %err, "course data unavailable");
                CatalogError::CourseUnavailable(err)
            })?;
        let file: CourseFile = parse(&entry.data_file, &bytes)?;
        let course = Course::from_file(course_id.clone(), file)?;

        tracing::debug!(
            course_id = %course_id,
            lessons = course.lessons().count(),
            questions = course.quiz().questions.len(),
            "course loaded"
        );
        Ok(course)
    }
}

fn parse<T: DeserializeOwned>(path: &str, bytes: &[u8]) -> Result<T, CatalogError> {
    serde_json::from_slice(bytes).map_err(|err| CatalogError::Malformed {
        path: path.to_owned(),
        reason: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course_source::FileSource;
    use learn_core::model::CourseError;

    const MANIFEST: &str = r#"{"courses":[
        {"id":"tour","title":"Tour","dataFile":"data/tour.json"},
        {"id":"broken","dataFile":"data/broken.json"},
        {"id":"dupes","dataFile":"data/dupes.json"},
        {"id":"ghost","dataFile":"data/ghost.json"}
    ]}"#;

    const TOUR: &str = r#"{
        "courseTitle": "Tour",
        "modules": [{"moduleTitle": "M1", "lessons": [
            {"id": "l1", "title": "One", "content": [{"type": "text", "data": "hi"}]}
        ]}],
        "quiz": {"id": "quiz", "title": "Final", "questions": [
            {"id": "q1", "text": "?", "type": "multiple-choice",
             "options": {"a": "A", "b": "B"}, "correct": "a", "hint": "A"}
        ]}
    }"#;

    const DUPES: &str = r#"{
        "courseTitle": "Dupes",
        "modules": [{"moduleTitle": "M1", "lessons": [
            {"id": "l1", "title": "One", "content": []},
            {"id": "l1", "title": "Again", "content": []}
        ]}],
        "quiz": {"id": "quiz", "title": "Final", "questions": []}
    }"#;

    fn catalog() -> (tempfile::TempDir, CatalogService) {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        std::fs::create_dir_all(&data).unwrap();
        std::fs::write(data.join("courses.json"), MANIFEST).unwrap();
        std::fs::write(data.join("tour.json"), TOUR).unwrap();
        std::fs::write(data.join("broken.json"), "{ not json").unwrap();
        std::fs::write(data.join("dupes.json"), DUPES).unwrap();
        let service = CatalogService::new(Arc::new(FileSource::new(dir.path())));
        (dir, service)
    }

    #[tokio::test]
    async fn loads_course_through_manifest() {
        let (_dir, service) = catalog();
        let course = service.load_course(&CourseId::new("tour")).await.unwrap();
        assert_eq!(course.title(), "Tour");
        assert_eq!(course.lessons().count(), 1);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let (_dir, service) = catalog();
        let err = service
            .load_course(&CourseId::new("nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::CourseNotFound(_)));
        assert_eq!(err.to_string(), "Course not found");
    }

    #[tokio::test]
    async fn missing_data_file_is_unavailable() {
        let (_dir, service) = catalog();
        let err = service
            .load_course(&CourseId::new("ghost"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::CourseUnavailable(_)));
    }

    #[tokio::test]
    async fn malformed_and_invalid_files_fail_to_load() {
        let (_dir, service) = catalog();
        assert!(matches!(
            service.load_course(&CourseId::new("broken")).await,
            Err(CatalogError::Malformed { .. })
        ));
        assert!(matches!(
            service.load_course(&CourseId::new("dupes")).await,
            Err(CatalogError::Invalid(CourseError::DuplicateEntry(_)))
        ));
    }

    #[tokio::test]
    async fn missing_manifest_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let service = CatalogService::new(Arc::new(FileSource::new(dir.path())));
        assert!(matches!(
            service.load_manifest().await,
            Err(CatalogError::ManifestUnavailable(_))
        ));
    }
}
