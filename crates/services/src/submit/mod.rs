//! Best-effort relay of completion records to a results endpoint.
//!
//! Transports are tried in order and the first apparent success wins. None of
//! them can confirm that the endpoint accepted the record; local history is the
//! only durable copy.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use indexmap::IndexMap;
use learn_core::model::CompletionRecord;

mod beacon;
mod config;
mod form;
mod opaque;

pub use beacon::{BEACON_BODY_LIMIT, BeaconTransport};
pub use config::{DEFAULT_ATTEMPT_TIMEOUT, SubmitConfig};
pub use form::{DEFAULT_FORM_SETTLE, FormPostTransport};
pub use opaque::OpaquePostTransport;

//
// ─── PAYLOAD ───────────────────────────────────────────────────────────────────
//

/// Fields sent to the results endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetPayload {
    pub first_name: String,
    pub last_name: String,
    pub congregation: String,
    pub user_code: String,
    pub course_id: String,
    pub score: u32,
    pub total_questions: u32,
    pub percentage: u32,
    pub answers: IndexMap<String, String>,
}

impl From<&CompletionRecord> for SheetPayload {
    fn from(record: &CompletionRecord) -> Self {
        Self {
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            congregation: record.congregation.clone(),
            user_code: record.user_code.clone(),
            course_id: record.course_id.to_string(),
            score: record.score,
            total_questions: record.total_questions,
            percentage: record.percentage,
            answers: record.answers.clone(),
        }
    }
}

impl SheetPayload {
    /// Flat name/value pairs for form-encoded transports, in payload order.
    /// Nested values are sent as JSON text.
    #[must_use]
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let answers = serde_json::to_string(&self.answers).unwrap_or_else(|_| "{}".to_owned());
        vec![
            ("firstName", self.first_name.clone()),
            ("lastName", self.last_name.clone()),
            ("congregation", self.congregation.clone()),
            ("userCode", self.user_code.clone()),
            ("courseId", self.course_id.clone()),
            ("score", self.score.to_string()),
            ("totalQuestions", self.total_questions.to_string()),
            ("percentage", self.percentage.to_string()),
            ("answers", answers),
        ]
    }
}

//
// ─── TRANSPORTS ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportKind {
    OpaquePost,
    FormPost,
    Beacon,
}

impl TransportKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::OpaquePost => "opaque-post",
            Self::FormPost => "form-post",
            Self::Beacon => "beacon",
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a transport believes happened. `Sent` is never an acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportOutcome {
    Sent,
    Failed(String),
}

#[async_trait]
pub trait Transport: Send + Sync {
    fn kind(&self) -> TransportKind;

    async fn attempt(&self, payload: &SheetPayload) -> TransportOutcome;
}

//
// ─── SUBMITTER ─────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionReport {
    /// A transport reported apparent success.
    Delivered(TransportKind),
    /// Every transport failed, or none is configured.
    LocalOnly {
        failures: Vec<(TransportKind, String)>,
    },
}

impl SubmissionReport {
    #[must_use]
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered(_))
    }
}

/// Ordered fallback chain. No retries and no backoff.
///
/// Each attempt is bounded by `attempt_timeout`; an attempt that runs past it
/// counts as failed and the next transport is tried.
#[derive(Clone)]
pub struct Submitter {
    transports: Vec<Arc<dyn Transport>>,
    attempt_timeout: Duration,
}

impl Default for Submitter {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Submitter {
    #[must_use]
    pub fn new(transports: Vec<Arc<dyn Transport>>) -> Self {
        Self {
            transports,
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    /// A submitter with no transports; every submission stays local.
    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }

    /// The standard chain: opaque POST, form POST, beacon.
    #[must_use]
    pub fn from_config(config: Option<&SubmitConfig>) -> Self {
        let Some(config) = config else {
            return Self::disabled();
        };
        let client = reqwest::Client::builder()
            .timeout(config.attempt_timeout)
            .build()
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "results client setup failed, using defaults");
                reqwest::Client::new()
            });
        let transports: Vec<Arc<dyn Transport>> = vec![
            Arc::new(OpaquePostTransport::new(
                client.clone(),
                config.endpoint.clone(),
            )),
            Arc::new(FormPostTransport::new(
                client.clone(),
                config.endpoint.clone(),
                config.form_settle,
            )),
            Arc::new(BeaconTransport::new(client, config.endpoint.clone())),
        ];
        Self::new(transports).with_attempt_timeout(config.attempt_timeout)
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.transports.is_empty()
    }

    /// Relay `record`, stopping at the first transport that reports `Sent`.
    pub async fn submit(&self, record: &CompletionRecord) -> SubmissionReport {
        let payload = SheetPayload::from(record);
        let mut failures = Vec::new();
        for transport in &self.transports {
            let kind = transport.kind();
            let outcome = tokio::time::timeout(self.attempt_timeout, transport.attempt(&payload))
                .await
                .unwrap_or_else(|_| {
                    TransportOutcome::Failed(format!(
                        "no answer within {} ms",
                        self.attempt_timeout.as_millis()
                    ))
                });
            match outcome {
                TransportOutcome::Sent => {
                    tracing::info!(transport = %kind, course_id = %payload.course_id, "completion relayed");
                    return SubmissionReport::Delivered(kind);
                }
                TransportOutcome::Failed(reason) => {
                    tracing::warn!(transport = %kind, %reason, "transport failed, trying next");
                    failures.push((kind, reason));
                }
            }
        }
        if self.transports.is_empty() {
            tracing::debug!("no results endpoint configured, keeping completion local");
        } else {
            tracing::warn!(course_id = %payload.course_id, "all transports failed, completion kept locally");
        }
        SubmissionReport::LocalOnly { failures }
    }
}
