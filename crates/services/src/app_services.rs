use std::path::{Path, PathBuf};
use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::catalog_service::CatalogService;
use crate::course_source::{CourseSource, FileSource, HttpSource};
use crate::error::AppServicesError;
use crate::export_service::ExportService;
use crate::learner_service::LearnerService;
use crate::quiz_service::QuizService;
use crate::submit::{SubmitConfig, Submitter};

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    storage: Storage,
    export_dir: PathBuf,
    catalog: Arc<CatalogService>,
    learner: Arc<LearnerService>,
    quiz: Arc<QuizService>,
    export: Arc<ExportService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// `catalog` is a directory or an `http(s)://` base URL.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails or the catalog
    /// location is not usable.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        catalog: &str,
        export_dir: PathBuf,
        submit: Option<SubmitConfig>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let source = course_source(catalog)?;
        tracing::info!(catalog = %source.describe(), submission = submit.is_some(), "services ready");
        Ok(Self::from_parts(
            storage,
            clock,
            source,
            export_dir,
            Submitter::from_config(submit.as_ref()),
        ))
    }

    #[must_use]
    pub fn from_parts(
        storage: Storage,
        clock: Clock,
        source: Arc<dyn CourseSource>,
        export_dir: PathBuf,
        submitter: Submitter,
    ) -> Self {
        let catalog = Arc::new(CatalogService::new(source));
        let learner = Arc::new(LearnerService::new(storage.learner.clone()));
        let quiz = Arc::new(QuizService::new(
            clock,
            storage.completions.clone(),
            storage.learner.clone(),
            Arc::new(submitter),
        ));
        let export = Arc::new(ExportService::new(storage.completions.clone()));
        Self {
            storage,
            export_dir,
            catalog,
            learner,
            quiz,
            export,
        }
    }

    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    #[must_use]
    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn learner(&self) -> Arc<LearnerService> {
        Arc::clone(&self.learner)
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }

    #[must_use]
    pub fn export(&self) -> Arc<ExportService> {
        Arc::clone(&self.export)
    }
}

/// Pick the source for a catalog location.
///
/// # Errors
///
/// Returns `AppServicesError::Source` for a malformed base URL.
pub fn course_source(location: &str) -> Result<Arc<dyn CourseSource>, AppServicesError> {
    let trimmed = location.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        return Ok(Arc::new(HttpSource::new(trimmed)?));
    }
    Ok(Arc::new(FileSource::new(trimmed)))
}
