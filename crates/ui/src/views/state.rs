use dioxus::prelude::*;

use services::CatalogError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    /// The course or its manifest could not be loaded. Fatal to the course view.
    Load(String),
}

impl ViewError {
    #[must_use]
    pub fn from_catalog(err: &CatalogError) -> Self {
        tracing::error!(error = %err, "course load failed");
        Self::Load(err.to_string())
    }

    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Unknown => "Something went wrong. Please try again.".to_owned(),
            Self::Load(reason) => reason.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(err.clone()),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
