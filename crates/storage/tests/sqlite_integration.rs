use learn_core::model::{AttemptSummary, CompletionRecord, CourseId, EntryId, Learner};
use learn_core::progress::CompletedSet;
use learn_core::time::fixed_now;
use storage::repository::{KeyValueStore, Storage};
use storage::sqlite::SqliteRepository;

#[tokio::test]
async fn sqlite_kv_overwrites_values() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");
    // second run is a no-op
    repo.migrate().await.expect("migrate again");

    assert_eq!(repo.get("missing").await.unwrap(), None);
    repo.set("lmsCurrentCourse", "tour").await.unwrap();
    repo.set("lmsCurrentCourse", "first-aid").await.unwrap();
    assert_eq!(
        repo.get("lmsCurrentCourse").await.unwrap().as_deref(),
        Some("first-aid")
    );
}

#[tokio::test]
async fn sqlite_storage_round_trips_progress_and_completions() {
    let storage = Storage::sqlite("sqlite:file:memdb_storage?mode=memory&cache=shared")
        .await
        .expect("storage");
    let course = CourseId::new("tour");

    let mut set = CompletedSet::new();
    set.insert(EntryId::new("l1"));
    set.insert(EntryId::new("l2"));
    storage.progress.save(&course, &set).await.unwrap();
    assert_eq!(storage.progress.load(&course).await.unwrap(), set);

    let learner = Learner::new("Jane", "Doe", "North", "U1").unwrap();
    storage.learner.save(&learner).await.unwrap();
    let record = CompletionRecord::passed(
        &learner,
        AttemptSummary {
            course_id: course.clone(),
            course_title: "Tour".into(),
            score: 3,
            total_questions: 3,
            answers: [("q1".to_string(), "a".to_string())].into_iter().collect(),
        },
        fixed_now(),
    );
    storage.completions.append(&record).await.unwrap();

    assert_eq!(storage.completions.history().await.unwrap(), vec![record.clone()]);
    assert_eq!(storage.completions.latest().await.unwrap(), Some(record));
    assert_eq!(storage.learner.load().await.unwrap(), Some(learner));
}
