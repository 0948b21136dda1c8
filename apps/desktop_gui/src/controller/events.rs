//! Surface updates flowing from the backend worker to the egui thread.

use shared::domain::ResultsView;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    ErrorShown(String),
    ErrorHidden,
    ResultsReplaced(ResultsView),
    ResultsShown,
    ResultsHidden,
    ViewerOpened { target: String, url: String },
}
