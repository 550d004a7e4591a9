mod certificate;
mod content;
mod quiz;

use std::sync::Arc;
use std::time::Duration;

use dioxus::prelude::*;

use learn_core::model::{Course, EntryId};
use services::ProgressStore;

use crate::context::AppContext;
use crate::views::{OnboardingPanel, ToastHost, Toaster, ViewError, ViewState, use_toaster, view_state_from_resource};
use crate::vm::{
    NavEntryVm, Panel, completion_notice, map_course_nav, open_entry, progress_label, start_panel,
};
use content::LessonPanel;
use quiz::QuizPanel;

/// Pause between the completion toast and opening the next entry.
const ADVANCE_DELAY: Duration = Duration::from_secs(2);

const LOAD_SUPPORT_TEXT: &str = "An error occurred while loading the course. Please check the console or contact support.";

#[derive(Clone, Debug, PartialEq)]
struct CourseData {
    course: Arc<Course>,
    first_name: String,
}

/// Signals shared by every panel of the player.
#[derive(Clone, Copy, PartialEq)]
pub struct CourseSession {
    progress: Signal<Option<ProgressStore>>,
    panel: Signal<Panel>,
    toaster: Toaster,
}

impl CourseSession {
    /// Current progress, subscribing the caller to changes.
    fn progress(&self) -> Option<ProgressStore> {
        self.progress.read().clone()
    }

    fn snapshot(&self) -> Option<ProgressStore> {
        self.progress.peek().clone()
    }

    fn store(mut self, store: ProgressStore) {
        self.progress.set(Some(store));
    }

    fn panel(&self) -> Panel {
        self.panel.read().clone()
    }

    fn open(mut self, panel: Panel) {
        self.panel.set(panel);
    }
}

#[component]
pub fn CourseView() -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();
    let learner = ctx.learner();
    let repo = ctx.progress_repository();
    let mut progress = use_signal(|| None::<ProgressStore>);
    let panel = use_signal(|| Panel::Welcome);
    let toaster = use_toaster();
    let session = CourseSession {
        progress,
        panel,
        toaster,
    };

    let resource = use_resource(move || {
        let catalog = catalog.clone();
        let learner = learner.clone();
        let repo = repo.clone();
        async move {
            let Some(current) = learner
                .current_learner()
                .await
                .map_err(|_| ViewError::Unknown)?
            else {
                return Ok(None);
            };
            let course_id = learner
                .current_course()
                .await
                .map_err(|_| ViewError::Unknown)?;
            let course = catalog
                .load_course(&course_id)
                .await
                .map_err(|err| ViewError::from_catalog(&err))?;
            let store = ProgressStore::open(repo, &course)
                .await
                .map_err(|_| ViewError::Unknown)?;
            progress.set(Some(store));
            Ok::<_, ViewError>(Some(CourseData {
                course: Arc::new(course),
                first_name: current.first_name,
            }))
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page course-page",
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "content-panel active error-panel",
                        h2 { "Error: {err.message()}" }
                        p { "{LOAD_SUPPORT_TEXT}" }
                    }
                },
                ViewState::Ready(None) => rsx! {
                    div { class: "content-panel active",
                        p { "Please tell us who you are before starting a course." }
                        OnboardingPanel {
                            on_done: move |()| {
                                let mut resource = resource;
                                resource.restart();
                            },
                        }
                    }
                },
                ViewState::Ready(Some(data)) => rsx! {
                    CoursePlayer {
                        course: data.course,
                        first_name: data.first_name,
                        session,
                    }
                },
            }
            ToastHost { toaster }
        }
    }
}

#[component]
fn CoursePlayer(course: Arc<Course>, first_name: String, session: CourseSession) -> Element {
    let Some(store) = session.progress() else {
        return rsx! {
            p { "Loading..." }
        };
    };
    let sections = map_course_nav(&course, store.tracker());
    let percent = store.percent_complete();
    let panel = session.panel();
    let active = match &panel {
        Panel::Entry(id) => Some(id.clone()),
        Panel::Welcome => None,
    };

    let body = match panel {
        Panel::Welcome => rsx! {
            WelcomePanel { title: course.title().to_owned(), session }
        },
        Panel::Entry(id) if id == course.quiz().id => rsx! {
            QuizPanel { key: "{id}", course: Arc::clone(&course), session }
        },
        Panel::Entry(id) => match course.lesson(&id) {
            Some(lesson) => {
                let completed = store.is_complete(&id);
                let lesson = lesson.clone();
                let course = Arc::clone(&course);
                rsx! {
                    LessonPanel {
                        key: "{id}",
                        lesson,
                        completed,
                        on_complete: move |()| complete_lesson(Arc::clone(&course), id.clone(), session),
                    }
                }
            }
            None => rsx! {},
        },
    };

    rsx! {
        div { class: "course-layout",
            nav { class: "course-nav",
                h2 { class: "course-title", "{course.title()}" }
                div { class: "progress-container",
                    div { class: "progress-bar", style: "width: {percent}%;" }
                    span { class: "progress-text", "{progress_label(percent)}" }
                }
                ul { class: "nav-list",
                    for section in sections.iter() {
                        li { class: "module-title", "{section.title}" }
                        for entry in section.entries.iter() {
                            NavLink {
                                key: "{entry.id}",
                                active: active.as_ref() == Some(&entry.id),
                                entry: entry.clone(),
                                session,
                            }
                        }
                    }
                }
            }
            section { class: "content-area",
                p { class: "welcome-line", "Welcome, {first_name}!" }
                {body}
            }
        }
    }
}

#[component]
fn NavLink(entry: NavEntryVm, active: bool, session: CourseSession) -> Element {
    let id = entry.id.clone();
    let onclick = move |evt: MouseEvent| {
        evt.prevent_default();
        let Some(store) = session.snapshot() else {
            return;
        };
        match open_entry(store.tracker(), &id) {
            Ok(panel) => session.open(panel),
            Err(toast) => session.toaster.show(toast),
        }
    };

    rsx! {
        li {
            a { href: "#", class: entry.class(active), onclick,
                span { class: if entry.completed { "status-icon completed" } else { "status-icon" } }
                span { class: "lesson-title", "{entry.title}" }
            }
        }
    }
}

#[component]
fn WelcomePanel(title: String, session: CourseSession) -> Element {
    rsx! {
        div { id: "welcome", class: "content-panel active",
            h2 { "Welcome to {title}" }
            p { "Select a lesson from the navigation menu to begin your learning journey." }
            button {
                id: "start-now-btn",
                class: "button",
                r#type: "button",
                onclick: move |_| {
                    if let Some(store) = session.snapshot() {
                        session.open(start_panel(store.tracker()));
                    }
                },
                "Start Now"
            }
        }
    }
}

fn complete_lesson(course: Arc<Course>, lesson: EntryId, session: CourseSession) {
    let Some(mut store) = session.snapshot() else {
        return;
    };
    spawn(async move {
        if let Err(err) = store.mark_complete(&lesson).await {
            tracing::error!(error = %err, lesson = %lesson, "lesson progress not saved");
            session.toaster.show(ViewError::Unknown.message());
            return;
        }
        let (notice, next) = completion_notice(&course, store.tracker(), &lesson);
        session.store(store);
        session.toaster.show(notice);
        if let Some(next) = next {
            tokio::time::sleep(ADVANCE_DELAY).await;
            session.open(Panel::Entry(next));
        }
    });
}
