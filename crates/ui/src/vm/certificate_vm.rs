use std::path::PathBuf;

use services::SubmissionReport;

/// Relay state shown in the certificate section after a pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmissionStatus {
    Saving,
    Saved,
    LocalOnly,
    /// Passed in an earlier visit; the relay outcome was not kept.
    Recorded,
}

impl SubmissionStatus {
    #[must_use]
    pub fn from_report(report: &SubmissionReport) -> Self {
        if report.is_delivered() {
            Self::Saved
        } else {
            Self::LocalOnly
        }
    }

    #[must_use]
    pub fn heading(self) -> &'static str {
        match self {
            Self::Saving | Self::Recorded => "Congratulations!",
            Self::Saved => "Congratulations! ✅",
            Self::LocalOnly => "Congratulations! ⚠️",
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Saving => "Saving your completion data...",
            Self::Recorded => "You have already passed this quiz. Your results are stored on this device.",
            Self::Saved => {
                "You have completed all lessons and passed the quiz! Your results have been saved to the central database."
            }
            Self::LocalOnly => {
                "You have completed the course! (Offline mode - please export your data as backup)"
            }
        }
    }

    /// Toast raised once the relay settles; `None` while still saving.
    #[must_use]
    pub fn toast(self) -> Option<&'static str> {
        match self {
            Self::Saving | Self::Recorded => None,
            Self::Saved => Some("✅ Completion data saved successfully!"),
            Self::LocalOnly => Some("⚠️ Failed to save to the results sheet. Using local storage backup."),
        }
    }

    #[must_use]
    pub fn export_label(self) -> &'static str {
        match self {
            Self::LocalOnly => "Export My Data",
            Self::Saving | Self::Saved | Self::Recorded => "Export Backup Copy",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExportState {
    #[default]
    Idle,
    Saved(PathBuf),
    /// The file could not be written; shown in a read-only text area.
    Manual(String),
}
