#![forbid(unsafe_code)]

pub mod app_services;
pub mod catalog_service;
pub mod course_source;
pub mod error;
pub mod export_service;
pub mod learner_service;
pub mod progress_service;
pub mod quiz_service;
pub mod submit;

pub use learn_core::Clock;

pub use app_services::AppServices;
pub use catalog_service::CatalogService;
pub use course_source::{CourseSource, FileSource, HttpSource};
pub use error::{
    AppServicesError, CatalogError, ExportError, LearnerServiceError, ProgressError,
    QuizServiceError, SourceError,
};
pub use export_service::{ExportOutcome, ExportService};
pub use learner_service::{DEFAULT_COURSE_ID, LearnerService};
pub use progress_service::ProgressStore;
pub use quiz_service::{QuizAttempt, QuizService};
pub use submit::{SubmissionReport, SubmitConfig, Submitter, TransportKind};
