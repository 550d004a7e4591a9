use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{HistoryRowVm, map_history_rows};

#[derive(Clone, Debug, PartialEq)]
struct HistoryData {
    rows: Vec<HistoryRowVm>,
}

#[component]
pub fn HistoryView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz = ctx.quiz();

    let resource = use_resource(move || {
        let quiz = quiz.clone();
        async move {
            let records = quiz.history().await.map_err(|_| ViewError::Unknown)?;
            Ok::<_, ViewError>(HistoryData {
                rows: map_history_rows(&records),
            })
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "History" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    if data.rows.is_empty() {
                        p { "No completed courses yet." }
                    } else {
                        ul { class: "history-list",
                            for row in data.rows {
                                HistoryRow { row }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn HistoryRow(row: HistoryRowVm) -> Element {
    rsx! {
        li {
            span { class: "history-course", "{row.course}" }
            span { class: "history-date", "{row.completed_at_str}" }
            p { "Score: {row.score} | {row.percentage}" }
        }
    }
}
