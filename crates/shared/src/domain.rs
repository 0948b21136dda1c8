use serde::{Deserialize, Serialize};

use crate::protocol::SearchResultDocument;

/// The effective term of a search. Empty input is replaced by the placeholder;
/// nothing else is validated or normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchTerm(pub String);

impl SearchTerm {
    pub fn resolve(input: &str, placeholder: &str) -> Self {
        if input.is_empty() {
            Self(placeholder.to_string())
        } else {
            Self(input.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One rendered result heading. The title is plain text, never markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultLink {
    pub title: String,
    pub url: String,
}

impl From<SearchResultDocument> for ResultLink {
    fn from(document: SearchResultDocument) -> Self {
        Self {
            title: document.title,
            url: document.url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum ResultsView {
    /// Loading placeholder shown while a request is outstanding.
    Searching(String),
    NoResults(String),
    Documents(Vec<ResultLink>),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "payload", rename_all = "snake_case")]
pub enum UiState {
    #[default]
    Idle,
    Searching,
    Results(ResultsView),
    Error(String),
}

impl UiState {
    pub fn is_searching(&self) -> bool {
        matches!(self, UiState::Searching)
    }

    pub fn error_visible(&self) -> bool {
        matches!(self, UiState::Error(_))
    }

    pub fn results_visible(&self) -> bool {
        matches!(self, UiState::Searching | UiState::Results(_))
    }
}
