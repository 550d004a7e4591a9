use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use learn_core::grading::AnswerSheet;
use learn_core::model::{CourseId, EntryId, QuestionId};
use learn_core::time::fixed_now;
use reqwest::Url;
use services::submit::{SubmitConfig, Submitter, TransportKind};
use services::{AppServices, Clock, ExportOutcome, FileSource, ProgressStore, SubmissionReport};
use storage::repository::Storage;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

const MANIFEST: &str = r#"{"courses":[{"id":"tour-guiding","title":"Tour Guiding","dataFile":"data/tour-guiding.json"}]}"#;

const COURSE: &str = r#"{
    "courseTitle": "Tour Guiding",
    "modules": [
        {"moduleTitle": "Basics", "lessons": [
            {"id": "welcome", "title": "Welcome", "content": [
                {"type": "text", "data": "Hello"},
                {"type": "tip", "data": {"summary": "Tip", "details": "Smile"}}
            ]},
            {"id": "routes", "title": "Routes", "content": [
                {"type": "list", "data": ["North", "South"]},
                {"type": "actions", "data": {"download": {"url": "https://example.org/map.pdf", "text": "Map"}}}
            ]}
        ]}
    ],
    "quiz": {"id": "final", "title": "Final Assessment", "questions": [
        {"id": "1", "text": "Best route?", "type": "multiple-choice",
         "options": {"a": "North", "b": "South"}, "correct": "a", "hint": "Lesson 2"},
        {"id": "2", "text": "Describe a tour", "type": "essay", "suggestion": "Start at the gate"}
    ]}
}"#;

struct Captured {
    head: String,
    body: String,
}

/// Minimal HTTP sink that records each request and answers 500.
async fn capture_server() -> (Url, mpsc::UnboundedReceiver<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let tx = tx.clone();
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 4096];
                loop {
                    let n = socket.read(&mut chunk).await.unwrap_or(0);
                    if n == 0 {
                        break;
                    }
                    buf.extend_from_slice(&chunk[..n]);
                    let text = String::from_utf8_lossy(&buf);
                    if let Some(end) = text.find("\r\n\r\n") {
                        let head = text[..end].to_string();
                        let length = head
                            .lines()
                            .find_map(|l| {
                                let (name, value) = l.split_once(':')?;
                                name.eq_ignore_ascii_case("content-length")
                                    .then(|| value.trim().parse::<usize>().ok())?
                            })
                            .unwrap_or(0);
                        if buf.len() >= end + 4 + length {
                            let body = String::from_utf8_lossy(&buf[end + 4..end + 4 + length])
                                .to_string();
                            let _ = tx.send(Captured { head, body });
                            break;
                        }
                    }
                }
                let _ = socket
                    .write_all(
                        b"HTTP/1.1 500 Internal Server Error\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
                    )
                    .await;
            });
        }
    });
    (Url::parse(&format!("http://{addr}/exec")).unwrap(), rx)
}

fn write_catalog(root: &Path) {
    let data = root.join("data");
    std::fs::create_dir_all(&data).unwrap();
    std::fs::write(data.join("courses.json"), MANIFEST).unwrap();
    std::fs::write(data.join("tour-guiding.json"), COURSE).unwrap();
}

fn services(root: &Path, export_dir: &Path, submitter: Submitter) -> AppServices {
    AppServices::from_parts(
        Storage::in_memory(),
        Clock::fixed(fixed_now()),
        Arc::new(FileSource::new(root)),
        export_dir.to_path_buf(),
        submitter,
    )
}

fn perfect_sheet() -> AnswerSheet {
    let mut sheet = AnswerSheet::new();
    sheet.select(QuestionId::new("1"), "a");
    sheet.write_essay(QuestionId::new("2"), "Gate, then museum");
    sheet
}

#[tokio::test]
async fn full_course_pass_records_relays_and_exports() {
    let catalog_dir = tempfile::tempdir().unwrap();
    let export_dir = tempfile::tempdir().unwrap();
    write_catalog(catalog_dir.path());
    let (endpoint, mut requests) = capture_server().await;
    let app = services(
        catalog_dir.path(),
        export_dir.path(),
        Submitter::from_config(Some(&SubmitConfig::new(endpoint))),
    );

    app.learner()
        .onboard("Jane", "Doe", "North", "U1", &CourseId::new("tour-guiding"))
        .await
        .unwrap();
    let course_id = app.learner().current_course().await.unwrap();
    let course = app.catalog().load_course(&course_id).await.unwrap();
    let mut progress = ProgressStore::open(app.storage().progress.clone(), &course)
        .await
        .unwrap();

    assert!(!progress.is_unlocked(&EntryId::new("final")));
    progress.mark_complete(&EntryId::new("welcome")).await.unwrap();
    progress.mark_complete(&EntryId::new("routes")).await.unwrap();
    assert_eq!(progress.percent_complete(), 67);

    let attempt = app
        .quiz()
        .submit_attempt(&course, &mut progress, &perfect_sheet())
        .await
        .unwrap();
    assert!(attempt.passed());
    assert_eq!(progress.percent_complete(), 100);

    // A 500 still counts: the opaque post never looks at the status.
    let report = attempt.submission.unwrap().await.unwrap();
    assert_eq!(report, SubmissionReport::Delivered(TransportKind::OpaquePost));
    let request = requests.recv().await.unwrap();
    assert!(request.head.to_ascii_lowercase().contains("content-type: application/json"));
    let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body["firstName"], "Jane");
    assert_eq!(body["courseId"], "tour-guiding");
    assert_eq!(body["score"], 1);
    assert_eq!(body["answers"]["2"], "Gate, then museum");

    let outcome = app.export().export_latest(app.export_dir()).await.unwrap();
    let ExportOutcome::Saved { path, csv } = outcome else {
        panic!("expected saved export");
    };
    assert!(path.ends_with("completion-tour-guiding-U1.csv"));
    let row = csv.lines().nth(1).unwrap();
    assert!(row.starts_with("11/14/2023 22:13,\"Jane\",\"Doe\""));
    assert!(row.contains("\"Q1: a; Q2: Gate, then museum\""));
}

#[tokio::test]
async fn unreachable_endpoint_falls_back_to_form_post() {
    // Bind and drop to get a port with nothing listening.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut config = SubmitConfig::new(Url::parse(&format!("http://{addr}/exec")).unwrap());
    config.form_settle = Duration::from_millis(20);

    let catalog_dir = tempfile::tempdir().unwrap();
    write_catalog(catalog_dir.path());
    let app = services(
        catalog_dir.path(),
        catalog_dir.path(),
        Submitter::from_config(Some(&config)),
    );
    let course = app
        .catalog()
        .load_course(&CourseId::new("tour-guiding"))
        .await
        .unwrap();
    let mut progress = ProgressStore::open(app.storage().progress.clone(), &course)
        .await
        .unwrap();
    progress.mark_complete(&EntryId::new("welcome")).await.unwrap();
    progress.mark_complete(&EntryId::new("routes")).await.unwrap();

    let attempt = app
        .quiz()
        .submit_attempt(&course, &mut progress, &perfect_sheet())
        .await
        .unwrap();

    let report = attempt.submission.unwrap().await.unwrap();
    assert_eq!(report, SubmissionReport::Delivered(TransportKind::FormPost));
    // Learner never onboarded: record still written with empty identity.
    let history = app.quiz().history().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].first_name, "");
}

/// Accepts connections and reads requests but never answers.
async fn silent_server() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            tokio::spawn(async move {
                let mut chunk = [0u8; 4096];
                while socket.read(&mut chunk).await.unwrap_or(0) > 0 {}
            });
        }
    });
    Url::parse(&format!("http://{addr}/exec")).unwrap()
}

#[tokio::test]
async fn silent_endpoint_times_out_and_falls_back() {
    let mut config = SubmitConfig::new(silent_server().await);
    config.form_settle = Duration::from_millis(20);
    config.attempt_timeout = Duration::from_millis(200);
    let submitter = Submitter::from_config(Some(&config));

    let catalog_dir = tempfile::tempdir().unwrap();
    write_catalog(catalog_dir.path());
    let app = services(catalog_dir.path(), catalog_dir.path(), submitter);
    let course = app
        .catalog()
        .load_course(&CourseId::new("tour-guiding"))
        .await
        .unwrap();
    let mut progress = ProgressStore::open(app.storage().progress.clone(), &course)
        .await
        .unwrap();
    progress.mark_complete(&EntryId::new("welcome")).await.unwrap();
    progress.mark_complete(&EntryId::new("routes")).await.unwrap();

    let attempt = app
        .quiz()
        .submit_attempt(&course, &mut progress, &perfect_sheet())
        .await
        .unwrap();

    let report = tokio::time::timeout(Duration::from_secs(10), attempt.submission.unwrap())
        .await
        .expect("submission settles against a silent endpoint")
        .unwrap();
    assert_eq!(report, SubmissionReport::Delivered(TransportKind::FormPost));
}

#[tokio::test]
async fn failed_attempt_leaves_history_empty() {
    let catalog_dir = tempfile::tempdir().unwrap();
    write_catalog(catalog_dir.path());
    let app = services(catalog_dir.path(), catalog_dir.path(), Submitter::disabled());
    let course = app
        .catalog()
        .load_course(&CourseId::new("tour-guiding"))
        .await
        .unwrap();
    let mut progress = ProgressStore::open(app.storage().progress.clone(), &course)
        .await
        .unwrap();

    let attempt = app
        .quiz()
        .submit_attempt(&course, &mut progress, &perfect_sheet())
        .await
        .unwrap();

    assert!(!attempt.passed());
    assert!(app.quiz().history().await.unwrap().is_empty());
    assert!(app.export().export_latest(catalog_dir.path()).await.is_err());
}
