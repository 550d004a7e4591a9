use dioxus::prelude::*;
use dioxus_router::use_navigator;
use learn_core::model::CourseId;
use services::LearnerServiceError;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{CourseOptionVm, OnboardingForm, map_course_options};

#[derive(Clone, Debug, PartialEq)]
struct StartData {
    options: Vec<CourseOptionVm>,
    form: OnboardingForm,
}

#[component]
pub fn StartView() -> Element {
    let navigator = use_navigator();

    rsx! {
        div { class: "page start-page",
            header { class: "view-header",
                h2 { class: "view-title", "Welcome" }
                p { class: "view-subtitle", "Tell us who you are and pick a course to begin." }
            }
            div { class: "view-divider" }
            OnboardingPanel {
                on_done: move |()| {
                    let _ = navigator.push(Route::Course {});
                },
            }
        }
    }
}

/// Identity and course form. `on_done` runs once the learner is stored.
#[component]
pub fn OnboardingPanel(on_done: EventHandler<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();
    let learner = ctx.learner();
    let mut form = use_signal(OnboardingForm::default);
    let mut form_error = use_signal(|| None::<String>);

    let learner_for_resource = learner.clone();
    let resource = use_resource(move || {
        let catalog = catalog.clone();
        let learner = learner_for_resource.clone();
        let mut form = form;
        async move {
            let manifest = catalog
                .load_manifest()
                .await
                .map_err(|err| ViewError::from_catalog(&err))?;
            let current = learner
                .current_learner()
                .await
                .map_err(|_| ViewError::Unknown)?;
            let course = learner
                .current_course()
                .await
                .map_err(|_| ViewError::Unknown)?;
            let prefilled = OnboardingForm::prefilled(current.as_ref(), &course);
            form.set(prefilled.clone());
            Ok::<_, ViewError>(StartData {
                options: map_course_options(&manifest),
                form: prefilled,
            })
        }
    });

    let state = view_state_from_resource(&resource);
    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let learner = learner.clone();
        let values = form();
        if !values.can_submit() {
            form_error.set(Some("Please enter your first name and choose a course.".into()));
            return;
        }
        spawn(async move {
            let result = learner
                .onboard(
                    &values.first_name,
                    &values.last_name,
                    &values.congregation,
                    &values.user_code,
                    &CourseId::new(values.course_id.trim()),
                )
                .await;
            match result {
                Ok(_) => {
                    form_error.set(None);
                    on_done.call(());
                }
                Err(LearnerServiceError::Learner(err)) => form_error.set(Some(err.to_string())),
                Err(_) => form_error.set(Some(ViewError::Unknown.message())),
            }
        });
    };

    rsx! {
        div { class: "onboarding",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    h3 { "Error: {err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
                ViewState::Ready(data) => rsx! {
                    form { class: "start-form", onsubmit: on_submit,
                        label { r#for: "first-name", "First Name" }
                        input {
                            id: "first-name",
                            r#type: "text",
                            required: true,
                            value: "{form.read().first_name}",
                            oninput: move |evt| form.write().first_name = evt.value(),
                        }
                        label { r#for: "last-name", "Last Name" }
                        input {
                            id: "last-name",
                            r#type: "text",
                            value: "{form.read().last_name}",
                            oninput: move |evt| form.write().last_name = evt.value(),
                        }
                        label { r#for: "congregation", "Congregation" }
                        input {
                            id: "congregation",
                            r#type: "text",
                            value: "{form.read().congregation}",
                            oninput: move |evt| form.write().congregation = evt.value(),
                        }
                        label { r#for: "user-code", "User Code" }
                        input {
                            id: "user-code",
                            r#type: "text",
                            value: "{form.read().user_code}",
                            oninput: move |evt| form.write().user_code = evt.value(),
                        }
                        label { r#for: "course-choice", "Course" }
                        select {
                            id: "course-choice",
                            value: "{form.read().course_id}",
                            onchange: move |evt| form.write().course_id = evt.value(),
                            for option in data.options.iter() {
                                option {
                                    key: "{option.id}",
                                    value: "{option.id}",
                                    selected: option.id.as_str() == data.form.course_id,
                                    "{option.label}"
                                }
                            }
                        }
                        if let Some(message) = form_error() {
                            p { class: "error-message", "{message}" }
                        }
                        button { class: "button", r#type: "submit", "Start Learning" }
                    }
                },
            }
        }
    }
}
