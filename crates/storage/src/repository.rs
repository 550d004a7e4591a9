use async_trait::async_trait;
use learn_core::model::{CompletionRecord, CourseId, Learner};
use learn_core::progress::CompletedSet;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Flat string key/value storage, read and rewritten one whole value at a time.
///
/// This is the only storage seam: every typed repository below is a view over
/// a handful of well-known keys.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Well-known keys. Names match what earlier browser builds wrote, so exported
/// local storage can be imported as-is.
pub mod keys {
    use learn_core::model::CourseId;

    pub const CURRENT_COURSE: &str = "lmsCurrentCourse";
    pub const FIRST_NAME: &str = "lmsUserFirstName";
    pub const LAST_NAME: &str = "lmsUserLastName";
    pub const CONGREGATION: &str = "lmsUserCongregation";
    pub const USER_CODE: &str = "lmsUserCode";
    pub const HISTORY: &str = "allQuizResults";
    pub const LATEST_COMPLETION: &str = "latestCompletion";

    /// Course-scoped progress key, e.g. `lmsProgress_tour-guiding`.
    #[must_use]
    pub fn progress(course: &CourseId) -> String {
        format!("lmsProgress_{course}")
    }
}

/// Simple in-memory store for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

async fn read_json<T: DeserializeOwned>(
    kv: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = kv.get(key).await? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| StorageError::Serialization(format!("{key}: {e}")))
}

async fn write_json<T: Serialize + ?Sized>(
    kv: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)
        .map_err(|e| StorageError::Serialization(format!("{key}: {e}")))?;
    kv.set(key, &raw).await
}

//
// ─── PROGRESS ─────────────────────────────────────────────────────────────────
//

/// Per-course completed sets, stored as JSON arrays.
#[derive(Clone)]
pub struct ProgressRepository {
    kv: Arc<dyn KeyValueStore>,
}

impl ProgressRepository {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Load the completed set for `course`; empty when nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failure or a value that is not an id array.
    pub async fn load(&self, course: &CourseId) -> Result<CompletedSet, StorageError> {
        let set = read_json(self.kv.as_ref(), &keys::progress(course)).await?;
        Ok(set.unwrap_or_default())
    }

    /// Overwrite the completed set for `course`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be written.
    pub async fn save(&self, course: &CourseId, set: &CompletedSet) -> Result<(), StorageError> {
        write_json(self.kv.as_ref(), &keys::progress(course), set).await
    }
}

//
// ─── COMPLETIONS ──────────────────────────────────────────────────────────────
//

/// Local history of passing attempts plus the latest snapshot used for export.
#[derive(Clone)]
pub struct CompletionRepository {
    kv: Arc<dyn KeyValueStore>,
}

impl CompletionRepository {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Append `record` to the history and make it the latest snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the history cannot be read or either key
    /// cannot be written.
    pub async fn append(&self, record: &CompletionRecord) -> Result<(), StorageError> {
        let mut history = self.history().await?;
        history.push(record.clone());
        write_json(self.kv.as_ref(), keys::HISTORY, &history).await?;
        write_json(self.kv.as_ref(), keys::LATEST_COMPLETION, record).await
    }

    /// All recorded completions, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failure or a malformed history value.
    pub async fn history(&self) -> Result<Vec<CompletionRecord>, StorageError> {
        let history = read_json(self.kv.as_ref(), keys::HISTORY).await?;
        Ok(history.unwrap_or_default())
    }

    /// The most recent snapshot. A stored value without a `timestamp` counts
    /// as no completion.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failure or a timestamped value that
    /// does not parse.
    pub async fn latest(&self) -> Result<Option<CompletionRecord>, StorageError> {
        let Some(value) =
            read_json::<serde_json::Value>(self.kv.as_ref(), keys::LATEST_COMPLETION).await?
        else {
            return Ok(None);
        };
        if value.get("timestamp").is_none_or(serde_json::Value::is_null) {
            return Ok(None);
        }
        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| StorageError::Serialization(format!("{}: {e}", keys::LATEST_COMPLETION)))
    }
}

//
// ─── LEARNER ──────────────────────────────────────────────────────────────────
//

/// Identity fields and the active course, one plain string per key.
#[derive(Clone)]
pub struct LearnerRepository {
    kv: Arc<dyn KeyValueStore>,
}

impl LearnerRepository {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// The onboarded learner, or `None` when no first name is stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    pub async fn load(&self) -> Result<Option<Learner>, StorageError> {
        let first_name = self.kv.get(keys::FIRST_NAME).await?.unwrap_or_default();
        if first_name.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(Learner {
            first_name,
            last_name: self.kv.get(keys::LAST_NAME).await?.unwrap_or_default(),
            congregation: self.kv.get(keys::CONGREGATION).await?.unwrap_or_default(),
            user_code: self.kv.get(keys::USER_CODE).await?.unwrap_or_default(),
        }))
    }

    /// # Errors
    ///
    /// Returns `StorageError` if any field cannot be written.
    pub async fn save(&self, learner: &Learner) -> Result<(), StorageError> {
        self.kv.set(keys::FIRST_NAME, &learner.first_name).await?;
        self.kv.set(keys::LAST_NAME, &learner.last_name).await?;
        self.kv.set(keys::CONGREGATION, &learner.congregation).await?;
        self.kv.set(keys::USER_CODE, &learner.user_code).await
    }

    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    pub async fn current_course(&self) -> Result<Option<CourseId>, StorageError> {
        let raw = self.kv.get(keys::CURRENT_COURSE).await?;
        Ok(raw
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .map(CourseId::new))
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be written.
    pub async fn set_current_course(&self, course: &CourseId) -> Result<(), StorageError> {
        self.kv.set(keys::CURRENT_COURSE, course.as_str()).await
    }
}

//
// ─── AGGREGATE ────────────────────────────────────────────────────────────────
//

/// Typed repositories sharing one key/value backend.
#[derive(Clone)]
pub struct Storage {
    pub kv: Arc<dyn KeyValueStore>,
    pub progress: ProgressRepository,
    pub completions: CompletionRepository,
    pub learner: LearnerRepository,
}

impl Storage {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            progress: ProgressRepository::new(Arc::clone(&kv)),
            completions: CompletionRepository::new(Arc::clone(&kv)),
            learner: LearnerRepository::new(Arc::clone(&kv)),
            kv,
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryStore::new()))
    }
}
