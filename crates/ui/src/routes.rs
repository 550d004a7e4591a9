use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{CourseView, HistoryView, StartView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", CourseView)] Course {},
        #[route("/start", StartView)] Start {},
        #[route("/history", HistoryView)] History {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "Learn" }
            ul {
                li { Link { to: Route::Course {}, "My Course" } }
                li { Link { to: Route::History {}, "History" } }
                li { Link { to: Route::Start {}, "Change Course" } }
            }
        }
    }
}
