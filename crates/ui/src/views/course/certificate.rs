use dioxus::prelude::*;

use services::{ExportError, ExportOutcome};

use crate::context::AppContext;
use crate::views::scripts::write_clipboard_text;
use crate::views::{Toaster, ViewError};
use crate::vm::{ExportState, SubmissionStatus};

#[component]
pub fn CertificateSection(status: SubmissionStatus, toaster: Toaster) -> Element {
    let ctx = use_context::<AppContext>();
    let export = ctx.export();
    let export_dir = ctx.export_dir();
    let mut export_state = use_signal(ExportState::default);
    let mut exporting = use_signal(|| false);

    let on_export = move |_| {
        if exporting() {
            return;
        }
        let export = export.clone();
        let dir = export_dir.clone();
        exporting.set(true);
        spawn(async move {
            match export.export_latest(&dir).await {
                Ok(ExportOutcome::Saved { path, .. }) => {
                    toaster.show(format!("Completion data exported to {}", path.display()));
                    export_state.set(ExportState::Saved(path));
                }
                Ok(ExportOutcome::Manual { csv, reason }) => {
                    tracing::warn!(%reason, "export file not written, offering manual copy");
                    toaster.show("Could not save the file. Copy the data below instead.");
                    export_state.set(ExportState::Manual(csv));
                }
                Err(ExportError::NoCompletion) => {
                    toaster.show(ExportError::NoCompletion.to_string());
                }
                Err(err) => {
                    tracing::error!(error = %err, "export failed");
                    toaster.show(ViewError::Unknown.message());
                }
            }
            exporting.set(false);
        });
    };

    let state = export_state.read().clone();

    rsx! {
        div { id: "certificate-section", class: "certificate-section",
            h3 { "{status.heading()}" }
            p { "{status.message()}" }
            div { class: "action-buttons",
                button {
                    id: "export-completion",
                    class: "button-secondary",
                    r#type: "button",
                    disabled: status == SubmissionStatus::Saving || exporting(),
                    onclick: on_export,
                    "{status.export_label()}"
                }
            }
            match state {
                ExportState::Idle => rsx! {},
                ExportState::Saved(path) => rsx! {
                    p { class: "export-path", "Saved to {path.display()}" }
                },
                ExportState::Manual(csv) => rsx! {
                    ManualExport { csv, toaster }
                },
            }
        }
    }
}

/// Fallback when the file could not be written: the CSV in a read-only
/// text area with a copy button.
#[component]
fn ManualExport(csv: String, toaster: Toaster) -> Element {
    let text = csv.clone();
    let on_copy = move |_| {
        let text = text.clone();
        spawn(async move {
            if write_clipboard_text(&text).await {
                toaster.show("Copied to clipboard!");
            } else {
                toaster.show("Copy failed. Select the text and copy it manually.");
            }
        });
    };

    rsx! {
        div { class: "manual-export",
            p { "Copy this data and keep it somewhere safe:" }
            textarea {
                id: "manual-export-text",
                readonly: true,
                rows: "6",
                value: "{csv}",
            }
            button {
                class: "button",
                r#type: "button",
                onclick: on_copy,
                "Copy to Clipboard"
            }
        }
    }
}
