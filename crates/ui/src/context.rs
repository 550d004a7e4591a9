use std::path::PathBuf;
use std::sync::Arc;

use services::{CatalogService, ExportService, LearnerService, QuizService};
use storage::repository::ProgressRepository;

pub trait UiApp: Send + Sync {
    fn catalog(&self) -> Arc<CatalogService>;
    fn learner(&self) -> Arc<LearnerService>;
    fn quiz(&self) -> Arc<QuizService>;
    fn export(&self) -> Arc<ExportService>;

    fn progress_repository(&self) -> ProgressRepository;
    fn export_dir(&self) -> PathBuf;
}

#[derive(Clone)]
pub struct AppContext {
    catalog: Arc<CatalogService>,
    learner: Arc<LearnerService>,
    quiz: Arc<QuizService>,
    export: Arc<ExportService>,
    progress: ProgressRepository,
    export_dir: PathBuf,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            catalog: app.catalog(),
            learner: app.learner(),
            quiz: app.quiz(),
            export: app.export(),
            progress: app.progress_repository(),
            export_dir: app.export_dir(),
        }
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

    #[must_use]
    pub fn progress_repository(&self) -> ProgressRepository {
        self.progress.clone()
    }

    #[must_use]
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone()
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
