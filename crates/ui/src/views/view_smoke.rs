use learn_core::model::{AttemptSummary, CompletionRecord, CourseId, EntryId, Learner};
use learn_core::progress::CompletedSet;
use learn_core::time::fixed_now;
use storage::repository::Storage;

use super::test_harness::{
    MANIFEST, ViewKind, setup_view_harness, setup_view_harness_with_files,
};

async fn onboarded(course: &str) -> Storage {
    let storage = Storage::in_memory();
    let learner = Learner::new("Jane", "Doe", "North", "U1").unwrap();
    storage.learner.save(&learner).await.expect("save learner");
    storage
        .learner
        .set_current_course(&CourseId::new(course))
        .await
        .expect("set course");
    storage
}

#[tokio::test(flavor = "current_thread")]
async fn course_view_smoke_renders_navigation_and_welcome() {
    let storage = onboarded("tour-guiding").await;
    let mut harness = setup_view_harness(ViewKind::Course, storage);
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Welcome to Tour Guiding"), "missing welcome in {html}");
    assert!(html.contains("Welcome, Jane!"), "missing learner name in {html}");
    assert!(html.contains("Start Now"), "missing start button in {html}");
    assert!(html.contains("Getting Started"), "missing module title in {html}");
    assert!(html.contains("Final Assessment"), "missing quiz section in {html}");
    assert!(html.contains("0%"), "missing progress in {html}");
    assert!(
        html.contains("lesson-link disabled"),
        "later entries should be locked in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn course_view_smoke_reflects_saved_progress() {
    let storage = onboarded("tour-guiding").await;
    let mut done = CompletedSet::new();
    assert!(done.insert(EntryId::new("lesson-1")));
    storage
        .progress
        .save(&CourseId::new("tour-guiding"), &done)
        .await
        .expect("save progress");

    let mut harness = setup_view_harness(ViewKind::Course, storage);
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("33%"), "missing progress in {html}");
    assert!(
        html.contains("status-icon completed"),
        "missing completed marker in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn course_view_smoke_reports_unknown_course() {
    let storage = onboarded("no-such-course").await;
    let mut harness = setup_view_harness(ViewKind::Course, storage);
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Error: Course not found"), "missing error in {html}");
    assert!(html.contains("contact support"), "missing support text in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn course_view_smoke_reports_missing_data_file() {
    let storage = onboarded("first-aid").await;
    let mut harness = setup_view_harness_with_files(
        ViewKind::Course,
        storage,
        &[("data/courses.json", MANIFEST)],
    );
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(
        html.contains("Error: Failed to load course data"),
        "missing error in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn course_view_smoke_asks_new_learner_to_onboard() {
    let mut harness = setup_view_harness(ViewKind::Course, Storage::in_memory());
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(
        html.contains("Please tell us who you are"),
        "missing onboarding prompt in {html}"
    );
    assert!(html.contains("first-name"), "missing onboarding form in {html}");
    assert!(html.contains("Start Learning"), "missing submit in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn start_view_smoke_lists_courses_and_prefills_identity() {
    let storage = onboarded("tour-guiding").await;
    let mut harness = setup_view_harness(ViewKind::Start, storage);
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Tour Guiding"), "missing course option in {html}");
    assert!(html.contains("First Aid"), "missing course option in {html}");
    assert!(html.contains("Jane"), "missing prefilled name in {html}");
    assert!(html.contains("Start Learning"), "missing submit in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn history_view_smoke_renders_completions() {
    let storage = Storage::in_memory();
    let learner = Learner::new("Jane", "Doe", "North", "U1").unwrap();
    let record = CompletionRecord::passed(
        &learner,
        AttemptSummary {
            course_id: CourseId::new("tour-guiding"),
            course_title: "Tour Guiding".into(),
            score: 1,
            total_questions: 1,
            answers: [("q1".to_owned(), "a".to_owned())].into_iter().collect(),
        },
        fixed_now(),
    );
    storage
        .completions
        .append(&record)
        .await
        .expect("append completion");

    let mut harness = setup_view_harness(ViewKind::History, storage);
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Tour Guiding"), "missing course in {html}");
    assert!(html.contains("1/1"), "missing score in {html}");
    assert!(html.contains("100%"), "missing percentage in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn history_view_smoke_renders_empty_state() {
    let mut harness = setup_view_harness(ViewKind::History, Storage::in_memory());
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(
        html.contains("No completed courses yet."),
        "missing empty state in {html}"
    );
}
