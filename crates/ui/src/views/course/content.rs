use dioxus::prelude::*;

use learn_core::model::{ActionBlock, ContentItem, Lesson, TipBox};

/// One lesson: its items in file order, plus a default action row when the
/// lesson has none of its own.
#[component]
pub fn LessonPanel(lesson: Lesson, completed: bool, on_complete: EventHandler<()>) -> Element {
    let needs_default_actions = !lesson.has_action_block();

    rsx! {
        div { id: "{lesson.id}", class: "content-panel active",
            h2 { "{lesson.title}" }
            for (index, item) in lesson.content.iter().enumerate() {
                ContentItemView {
                    key: "{index}",
                    item: item.clone(),
                    completed,
                    on_complete,
                }
            }
            if needs_default_actions {
                ActionsItem {
                    block: ActionBlock::default(),
                    completed,
                    on_complete,
                }
            }
        }
    }
}

#[component]
fn ContentItemView(item: ContentItem, completed: bool, on_complete: EventHandler<()>) -> Element {
    match item {
        ContentItem::Text(text) => rsx! {
            TextItem { text }
        },
        ContentItem::List(items) => rsx! {
            ListItem { items }
        },
        ContentItem::Video(src) => rsx! {
            VideoItem { src }
        },
        ContentItem::Tip(tip) => rsx! {
            TipItem { tip }
        },
        ContentItem::Actions(block) => rsx! {
            ActionsItem { block, completed, on_complete }
        },
        ContentItem::Unsupported(kind) => {
            tracing::debug!(kind = %kind, "skipping unsupported content item");
            rsx! {}
        }
    }
}

#[component]
fn TextItem(text: String) -> Element {
    rsx! {
        p { "{text}" }
    }
}

#[component]
fn ListItem(items: Vec<String>) -> Element {
    rsx! {
        ul {
            for (index, item) in items.iter().enumerate() {
                li { key: "{index}", "{item}" }
            }
        }
    }
}

#[component]
fn VideoItem(src: String) -> Element {
    rsx! {
        div { class: "video-container",
            iframe {
                src: "{src}",
                title: "Lesson video",
                allow: "autoplay; encrypted-media; picture-in-picture; fullscreen",
            }
        }
    }
}

#[component]
fn TipItem(tip: TipBox) -> Element {
    rsx! {
        details { class: "tip-box",
            summary { "{tip.summary}" }
            div { "{tip.details}" }
        }
    }
}

#[component]
fn ActionsItem(block: ActionBlock, completed: bool, on_complete: EventHandler<()>) -> Element {
    rsx! {
        div { class: "action-buttons",
            if let Some(download) = block.download.as_ref() {
                a {
                    class: "button-secondary",
                    href: "{download.url}",
                    download: "",
                    "{download.text}"
                }
            } else {
                span {}
            }
            button {
                class: if completed { "button complete-btn completed" } else { "button complete-btn" },
                r#type: "button",
                onclick: move |_| on_complete.call(()),
                "Mark as Complete"
            }
        }
    }
}
