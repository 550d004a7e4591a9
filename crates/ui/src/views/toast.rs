use std::time::Duration;

use dioxus::prelude::*;

pub const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Single-slot toast. A newer message replaces the current one and restarts
/// its timer.
#[derive(Clone, Copy, PartialEq)]
pub struct Toaster {
    message: Signal<Option<String>>,
    generation: Signal<u64>,
}

impl Toaster {
    pub fn show(mut self, text: impl Into<String>) {
        let current = *self.generation.peek() + 1;
        self.generation.set(current);
        self.message.set(Some(text.into()));

        let mut message = self.message;
        let generation = self.generation;
        spawn(async move {
            tokio::time::sleep(TOAST_DURATION).await;
            if *generation.peek() == current {
                message.set(None);
            }
        });
    }

    #[must_use]
    pub fn current(&self) -> Option<String> {
        self.message.read().clone()
    }
}

pub fn use_toaster() -> Toaster {
    let message = use_signal(|| None::<String>);
    let generation = use_signal(|| 0_u64);
    Toaster {
        message,
        generation,
    }
}

#[component]
pub fn ToastHost(toaster: Toaster) -> Element {
    rsx! {
        if let Some(text) = toaster.current() {
            div { id: "toast-notification", class: "show", role: "status", "{text}" }
        }
    }
}
