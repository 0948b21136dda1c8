use thiserror::Error;

/// The single failure outcome of a search request: it did not produce usable data.
#[derive(Debug, Clone, PartialEq, Eq, Default, Error)]
#[error("{}", .reason.as_deref().unwrap_or("search request failed"))]
pub struct SearchFailure {
    pub reason: Option<String>,
}

impl SearchFailure {
    pub fn new() -> Self {
        Self { reason: None }
    }

    pub fn with_reason(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self {
            reason: (!reason.trim().is_empty()).then_some(reason),
        }
    }

    /// The reported reason, or `fallback` when the request gave none.
    pub fn message_or(&self, fallback: impl Into<String>) -> String {
        match &self.reason {
            Some(reason) => reason.clone(),
            None => fallback.into(),
        }
    }
}
