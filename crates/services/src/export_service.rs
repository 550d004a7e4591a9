use std::path::{Path, PathBuf};

use learn_core::export::{completion_csv, export_file_name};
use learn_core::model::CompletionRecord;
use storage::repository::CompletionRepository;

use crate::error::ExportError;

/// Where an export ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Saved { path: PathBuf, csv: String },
    /// The file could not be written; the CSV is handed back for manual copy.
    Manual { csv: String, reason: String },
}

impl ExportOutcome {
    #[must_use]
    pub fn csv(&self) -> &str {
        match self {
            Self::Saved { csv, .. } | Self::Manual { csv, .. } => csv,
        }
    }
}

/// Writes the latest completion as a one-row CSV file.
#[derive(Clone)]
pub struct ExportService {
    completions: CompletionRepository,
}

impl ExportService {
    #[must_use]
    pub fn new(completions: CompletionRepository) -> Self {
        Self { completions }
    }

    /// The latest completion snapshot, if any.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::NoCompletion` when nothing has been recorded and
    /// `ExportError::Storage` if the snapshot cannot be read.
    pub async fn latest(&self) -> Result<CompletionRecord, ExportError> {
        self.completions
            .latest()
            .await?
            .ok_or(ExportError::NoCompletion)
    }

    /// Write the latest completion to `dir`.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::NoCompletion` when there is nothing to export.
    /// A failed write is not an error; it yields `ExportOutcome::Manual`.
    pub async fn export_latest(&self, dir: &Path) -> Result<ExportOutcome, ExportError> {
        let record = self.latest().await?;
        let csv = completion_csv(&record);
        let path = dir.join(export_file_name(&record));

        match tokio::fs::write(&path, csv.as_bytes()).await {
            Ok(()) => {
                tracing::info!(path = %path.display(), "completion exported");
                Ok(ExportOutcome::Saved { path, csv })
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "export write failed, offering manual copy");
                Ok(ExportOutcome::Manual {
                    csv,
                    reason: err.to_string(),
                })
            }
        }
    }
}
