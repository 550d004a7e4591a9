use std::sync::Arc;

use dioxus::prelude::*;

use learn_core::grading::{AnswerSheet, GradeOutcome, GradeReport, QuestionFeedback};
use learn_core::model::{Course, QuestionId};

use super::CourseSession;
use super::certificate::CertificateSection;
use crate::context::AppContext;
use crate::views::ViewError;
use crate::vm::{
    PASSED_MESSAGE, QuestionVm, SubmissionStatus, feedback_class, map_questions, score_line,
};

const SAVING_TOAST: &str = "Perfect score! Saving your results...";

#[component]
pub fn QuizPanel(course: Arc<Course>, session: CourseSession) -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_service = ctx.quiz();
    let sheet = use_signal(AnswerSheet::new);
    let mut report = use_signal(|| None::<GradeReport>);
    let mut status = use_signal(|| None::<SubmissionStatus>);
    let mut busy = use_signal(|| false);

    let quiz = course.quiz().clone();
    let questions = map_questions(&quiz);
    let already_passed = session
        .progress()
        .is_some_and(|store| store.is_complete(&quiz.id));

    let on_submit = {
        let course = Arc::clone(&course);
        move |evt: FormEvent| {
            evt.prevent_default();
            if busy() {
                return;
            }
            let Some(mut store) = session.snapshot() else {
                return;
            };
            let quiz_service = Arc::clone(&quiz_service);
            let course = Arc::clone(&course);
            let answers = sheet.peek().clone();
            busy.set(true);
            spawn(async move {
                match quiz_service.submit_attempt(&course, &mut store, &answers).await {
                    Ok(attempt) => {
                        let outcome = attempt.report.outcome;
                        report.set(Some(attempt.report));
                        match outcome {
                            GradeOutcome::Failed(reason) => {
                                status.set(None);
                                session.toaster.show(reason.toast());
                            }
                            GradeOutcome::Passed => {
                                session.store(store);
                                status.set(Some(SubmissionStatus::Saving));
                                session.toaster.show(SAVING_TOAST);
                                if let Some(handle) = attempt.submission {
                                    let settled = match handle.await {
                                        Ok(submission) => SubmissionStatus::from_report(&submission),
                                        Err(err) => {
                                            tracing::error!(error = %err, "submission task ended abnormally");
                                            SubmissionStatus::LocalOnly
                                        }
                                    };
                                    status.set(Some(settled));
                                    if let Some(text) = settled.toast() {
                                        session.toaster.show(text);
                                    }
                                }
                            }
                        }
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "quiz attempt could not be recorded");
                        session.toaster.show(ViewError::Unknown.message());
                    }
                }
                busy.set(false);
            });
        }
    };

    let graded = report.read().clone();
    let feedback_for = |id: &QuestionId| {
        graded
            .as_ref()
            .and_then(|report| report.feedback_for(id).cloned())
    };
    let results = graded.as_ref().map(|report| {
        let (class, message) = match report.outcome {
            GradeOutcome::Passed => ("success-message", PASSED_MESSAGE),
            GradeOutcome::Failed(reason) => ("error-message", reason.message()),
        };
        (score_line(report), class, message)
    });
    let certificate = status().or_else(|| already_passed.then_some(SubmissionStatus::Recorded));

    rsx! {
        div { id: "{quiz.id}", class: "content-panel active",
            h2 { "{quiz.title}" }
            form { id: "quiz-form", onsubmit: on_submit,
                for question in questions.iter() {
                    QuestionItem {
                        key: "{question.id()}",
                        question: question.clone(),
                        sheet,
                        feedback: feedback_for(question.id()),
                    }
                }
                button {
                    class: "button",
                    r#type: "submit",
                    disabled: busy(),
                    "Submit & Grade Quiz"
                }
            }
            div { id: "quiz-results",
                if let Some((line, class, message)) = results {
                    p { "{line}" }
                    p { class, "{message}" }
                }
            }
            if let Some(status) = certificate {
                CertificateSection { status, toaster: session.toaster }
            }
        }
    }
}

#[component]
fn QuestionItem(
    question: QuestionVm,
    sheet: Signal<AnswerSheet>,
    feedback: Option<QuestionFeedback>,
) -> Element {
    let mut sheet = sheet;
    let mut revealed = use_signal(|| false);

    match question {
        QuestionVm::Choice { id, text, options } => {
            let selected = sheet.read().choice(&id).map(str::to_owned);
            rsx! {
                div { class: "quiz-question", id: "{id}-container",
                    p {
                        strong { "{text}" }
                    }
                    for (key, label) in options {
                        ChoiceOption {
                            key: "{key}",
                            question: id.clone(),
                            checked: selected.as_deref() == Some(key.as_str()),
                            option_key: key.clone(),
                            label,
                            sheet,
                        }
                    }
                    FeedbackLine { feedback }
                }
            }
        }
        QuestionVm::Essay {
            id,
            text,
            suggestion,
        } => {
            let value = sheet.read().essay(&id).unwrap_or_default().to_owned();
            let input_id = id.clone();
            rsx! {
                div { class: "quiz-question", id: "{id}-container",
                    p {
                        strong { "{text}" }
                    }
                    textarea {
                        id: "essay-{id}",
                        rows: "4",
                        placeholder: "Type your answer here...",
                        value: "{value}",
                        oninput: move |evt| sheet.write().write_essay(input_id.clone(), evt.value()),
                    }
                    button {
                        class: "button-secondary reveal-btn",
                        r#type: "button",
                        onclick: move |_| {
                            let shown = revealed();
                            revealed.set(!shown);
                        },
                        "Reveal Suggested Answer"
                    }
                    if revealed() {
                        div { id: "suggestion-{id}", class: "tip-box", "{suggestion}" }
                    }
                    FeedbackLine { feedback }
                }
            }
        }
    }
}

#[component]
fn ChoiceOption(
    question: QuestionId,
    option_key: String,
    label: String,
    checked: bool,
    sheet: Signal<AnswerSheet>,
) -> Element {
    let mut sheet = sheet;
    let name = question.to_string();
    let value = option_key.clone();

    rsx! {
        label {
            input {
                r#type: "radio",
                name: "{name}",
                value: "{value}",
                checked,
                onchange: move |_| sheet.write().select(question.clone(), option_key.clone()),
            }
            " {label}"
        }
        br {}
    }
}

#[component]
fn FeedbackLine(feedback: Option<QuestionFeedback>) -> Element {
    match feedback {
        Some(feedback) => rsx! {
            div { class: feedback_class(feedback.verdict),
                "{feedback.headline()} "
                span { class: "hint-text", "{feedback.hint}" }
            }
        },
        None => rsx! {
            div { class: "question-feedback" }
        },
    }
}
