use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client};
use shared::{
    domain::{ResultsView, SearchTerm},
    error::SearchFailure,
    protocol::SearchResponse,
};
use tracing::debug;

pub mod controller;
pub mod i18n;
pub mod readiness;
pub mod settings;

pub use controller::{ControllerConfig, SearchController, DEFAULT_VIEWER_TARGET};
pub use i18n::{Catalog, Localizer, Translate};
pub use readiness::Readiness;

/// Builds the request URL by appending the term to the base endpoint.
///
/// The term is inserted as-is. Callers that need percent-encoding must encode
/// the term before it reaches the controller.
pub fn build_request_url(base_url: &str, term: &SearchTerm) -> String {
    format!("{base_url}{}", term.as_str())
}

/// A single GET against the search endpoint with two terminal outcomes.
///
/// `Ok(None)` means the request completed but the body carried no usable data
/// (absent, `null` or unparseable).
#[async_trait]
pub trait SearchApi: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Option<SearchResponse>, SearchFailure>;
}

pub struct MissingSearchApi;

#[async_trait]
impl SearchApi for MissingSearchApi {
    async fn fetch(&self, _url: &str) -> Result<Option<SearchResponse>, SearchFailure> {
        Err(SearchFailure::new())
    }
}

pub struct HttpSearchApi {
    http: Client,
}

impl HttpSearchApi {
    pub fn new(request_timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(request_timeout).build()?;
        Ok(Self { http })
    }

    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl SearchApi for HttpSearchApi {
    async fn fetch(&self, url: &str) -> Result<Option<SearchResponse>, SearchFailure> {
        let res = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| SearchFailure::with_reason(err.to_string()))?
            .error_for_status()
            .map_err(|err| SearchFailure::with_reason(err.to_string()))?;
        let body = res
            .bytes()
            .await
            .map_err(|err| SearchFailure::with_reason(err.to_string()))?;

        let parsed = SearchResponse::from_body(&body);
        if parsed.is_none() {
            debug!(url, bytes = body.len(), "search: response body carried no usable data");
        }
        Ok(parsed)
    }
}

/// The display surface the controller drives: an input field, an error region
/// and a results region.
pub trait UiBinding: Send + Sync {
    fn input_value(&self) -> String;
    fn input_placeholder(&self) -> String;
    fn show_error(&self, message: &str);
    fn hide_error(&self);
    fn set_results(&self, view: &ResultsView);
    fn show_results(&self);
    fn hide_results(&self);
}

/// Opens external URLs in a named, reusable surface separate from the main one.
pub trait SecondaryViewer: Send + Sync {
    fn open(&self, target: &str, url: &str) -> Result<()>;
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
