use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use learn_core::time::fixed_clock;
use services::{
    AppServices, CatalogService, CourseSource, ExportService, LearnerService, QuizService,
    SourceError, Submitter,
};
use storage::repository::{ProgressRepository, Storage};

use crate::context::{UiApp, build_app_context};
use crate::views::{CourseView, HistoryView, StartView};

pub const MANIFEST: &str = r#"{"courses": [
    {"id": "tour-guiding", "title": "Tour Guiding", "dataFile": "data/tour-guiding.json"},
    {"id": "first-aid", "title": "First Aid", "dataFile": "data/first-aid.json"}
]}"#;

const TOUR_COURSE: &str = r#"{
    "courseTitle": "Tour Guiding",
    "modules": [
        {"moduleTitle": "Getting Started", "lessons": [
            {"id": "lesson-1", "title": "Meeting the Group", "content": [
                {"type": "text", "data": "Greet everyone by name."},
                {"type": "list", "data": ["Smile", "Count heads"]},
                {"type": "tip", "data": {"summary": "Remember", "details": "Bring water."}}
            ]},
            {"id": "lesson-2", "title": "The Route", "content": [
                {"type": "actions", "data": {"download": {"url": "files/route.pdf", "text": "Route Map"}}}
            ]}
        ]}
    ],
    "quiz": {"id": "final-quiz", "title": "Final Quiz", "questions": [
        {"id": "q1", "text": "Who do you greet first?", "type": "multiple-choice",
         "options": {"a": "Everyone", "b": "Nobody"}, "correct": "a", "hint": "Be welcoming."},
        {"id": "q2", "text": "Describe your opening.", "type": "essay", "suggestion": "Say hello."}
    ]}
}"#;

/// Course files served from memory.
struct StaticSource {
    files: HashMap<String, Vec<u8>>,
}

impl StaticSource {
    fn with_files(files: &[(&str, &str)]) -> Self {
        Self {
            files: files
                .iter()
                .map(|(path, body)| ((*path).to_owned(), body.as_bytes().to_vec()))
                .collect(),
        }
    }
}

#[async_trait::async_trait]
impl CourseSource for StaticSource {
    fn describe(&self) -> String {
        "static".to_owned()
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>, SourceError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(path.to_owned()))
    }
}

struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn catalog(&self) -> Arc<CatalogService> {
        self.services.catalog()
    }

    fn learner(&self) -> Arc<LearnerService> {
        self.services.learner()
    }

    fn quiz(&self) -> Arc<QuizService> {
        self.services.quiz()
    }

    fn export(&self) -> Arc<ExportService> {
        self.services.export()
    }

    fn progress_repository(&self) -> ProgressRepository {
        self.services.storage().progress.clone()
    }

    fn export_dir(&self) -> PathBuf {
        self.services.export_dir().to_path_buf()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Start,
    Course,
    History,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Start => rsx! { StartView {} },
        ViewKind::Course => rsx! { CourseView {} },
        ViewKind::History => rsx! { HistoryView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        for _ in 0..4 {
            let _ = tokio::time::timeout(
                std::time::Duration::from_millis(50),
                self.dom.wait_for_work(),
            )
            .await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Harness over the default fixture catalog.
pub fn setup_view_harness(view: ViewKind, storage: Storage) -> ViewHarness {
    setup_view_harness_with_files(
        view,
        storage,
        &[
            ("data/courses.json", MANIFEST),
            ("data/tour-guiding.json", TOUR_COURSE),
        ],
    )
}

pub fn setup_view_harness_with_files(
    view: ViewKind,
    storage: Storage,
    files: &[(&str, &str)],
) -> ViewHarness {
    let services = AppServices::from_parts(
        storage,
        fixed_clock(),
        Arc::new(StaticSource::with_files(files)),
        std::env::temp_dir(),
        Submitter::disabled(),
    );
    let app = Arc::new(TestApp { services });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });
    ViewHarness { dom }
}
