mod course;
mod history;
mod scripts;
mod start;
mod state;
mod toast;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use course::CourseView;
pub use history::HistoryView;
pub use start::{OnboardingPanel, StartView};
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use toast::{ToastHost, Toaster, use_toaster};
