//! Shared error types for the services crate.

use thiserror::Error;

use learn_core::model::{CourseError, CourseId, EntryId};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Failure to read a file from a course source.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("reading {path} failed: {reason}")]
    Io { path: String, reason: String },
    #[error("invalid location {0}")]
    InvalidPath(String),
    #[error("request for {path} failed with status {status}")]
    HttpStatus {
        path: String,
        status: reqwest::StatusCode,
    },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `CatalogService`. Every variant is fatal to the course view.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("Failed to load course list")]
    ManifestUnavailable(#[source] SourceError),
    #[error("Course not found")]
    CourseNotFound(CourseId),
    #[error("Failed to load course data")]
    CourseUnavailable(#[source] SourceError),
    #[error("{path} is not valid course JSON: {reason}")]
    Malformed { path: String, reason: String },
    #[error(transparent)]
    Invalid(#[from] CourseError),
}

/// Errors emitted by `ProgressStore`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("`{0}` is not part of this course")]
    UnknownEntry(EntryId),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ExportService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    #[error("No completion data found. Please complete a course first.")]
    NoCompletion,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `LearnerService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LearnerServiceError {
    #[error(transparent)]
    Learner(#[from] learn_core::model::LearnerError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Source(#[from] SourceError),
}
