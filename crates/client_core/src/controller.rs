//! Search request lifecycle: supersede-on-submit, loading, results and error states.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use anyhow::Result;
use shared::{
    domain::{ResultLink, ResultsView, SearchTerm, UiState},
    error::SearchFailure,
    protocol::SearchResponse,
};
use tokio::{
    sync::{watch, Mutex},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::{
    build_request_url,
    i18n::{Translate, SEARCHING, SEARCHING_ERROR, SEARCH_NO_RESULTS},
    readiness::Readiness,
    SearchApi, SecondaryViewer, UiBinding,
};

pub const DEFAULT_VIEWER_TARGET: &str = "docsearch-viewer";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    pub base_url: String,
    pub viewer_target: String,
}

impl ControllerConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            viewer_target: DEFAULT_VIEWER_TARGET.to_string(),
        }
    }
}

struct InFlightSearch {
    generation: u64,
    task: JoinHandle<()>,
}

pub struct SearchController {
    api: Arc<dyn SearchApi>,
    ui: Arc<dyn UiBinding>,
    strings: Arc<dyn Translate>,
    viewer: Arc<dyn SecondaryViewer>,
    config: ControllerConfig,
    generation: AtomicU64,
    inflight: Mutex<Option<InFlightSearch>>,
    state: watch::Sender<UiState>,
}

impl SearchController {
    pub fn new(
        api: Arc<dyn SearchApi>,
        ui: Arc<dyn UiBinding>,
        strings: Arc<dyn Translate>,
        viewer: Arc<dyn SecondaryViewer>,
        config: ControllerConfig,
    ) -> Arc<Self> {
        let (state, _) = watch::channel(UiState::Idle);
        Arc::new(Self {
            api,
            ui,
            strings,
            viewer,
            config,
            generation: AtomicU64::new(0),
            inflight: Mutex::new(None),
            state,
        })
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn state(&self) -> UiState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.state.subscribe()
    }

    /// Waits until no search is outstanding and returns the resulting state.
    pub async fn settled(&self) -> UiState {
        let mut rx = self.state.subscribe();
        let settled = match rx.wait_for(|state| !state.is_searching()).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        };
        settled
    }

    /// Runs one search for the current input, superseding any outstanding one.
    pub async fn search(self: &Arc<Self>) {
        let term = SearchTerm::resolve(&self.ui.input_value(), &self.ui.input_placeholder());
        let url = build_request_url(&self.config.base_url, &term);

        let mut inflight = self.inflight.lock().await;
        if let Some(previous) = inflight.take() {
            debug!(
                generation = previous.generation,
                "search: aborting superseded request"
            );
            previous.task.abort();
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.enter_searching();
        debug!(generation, url = %url, "search: request issued");

        let controller = Arc::clone(self);
        let task = tokio::spawn(async move {
            let outcome = controller.api.fetch(&url).await;
            controller.complete(generation, outcome).await;
        });
        *inflight = Some(InFlightSearch { generation, task });
    }

    /// Spawns a task that runs a single search once `readiness` fires.
    pub fn run_when_ready(self: &Arc<Self>, readiness: Readiness) -> JoinHandle<()> {
        let controller = Arc::clone(self);
        tokio::spawn(async move {
            readiness.wait().await;
            controller.search().await;
        })
    }

    /// Link activation never navigates the main surface; the target opens in
    /// the shared secondary viewer instead.
    pub fn open_link(&self, link: &ResultLink) -> Result<()> {
        debug!(viewer = %self.config.viewer_target, url = %link.url, "search: opening result");
        self.viewer.open(&self.config.viewer_target, &link.url)
    }

    async fn complete(
        &self,
        generation: u64,
        outcome: std::result::Result<Option<SearchResponse>, SearchFailure>,
    ) {
        let mut inflight = self.inflight.lock().await;
        let current = self.generation.load(Ordering::SeqCst);
        if generation != current {
            debug!(generation, current, "search: discarding stale completion");
            return;
        }
        *inflight = None;

        match outcome {
            Ok(Some(response)) => {
                let view = self.results_view(response);
                info!(generation, "search: completed");
                self.enter_results(view);
            }
            Ok(None) => {
                warn!(generation, "search: response carried no usable data");
                self.enter_error(self.strings.translate(SEARCHING_ERROR));
            }
            Err(failure) => {
                warn!(generation, "search: request failed: {failure}");
                self.enter_error(failure.message_or(self.strings.translate(SEARCHING_ERROR)));
            }
        }
    }

    fn results_view(&self, response: SearchResponse) -> ResultsView {
        if response.documents.is_empty() {
            ResultsView::NoResults(self.strings.translate(SEARCH_NO_RESULTS))
        } else {
            ResultsView::Documents(response.documents.into_iter().map(Into::into).collect())
        }
    }

    fn enter_searching(&self) {
        self.ui.hide_error();
        self.ui
            .set_results(&ResultsView::Searching(self.strings.translate(SEARCHING)));
        self.ui.show_results();
        self.state.send_replace(UiState::Searching);
    }

    fn enter_results(&self, view: ResultsView) {
        self.ui.hide_error();
        self.ui.set_results(&view);
        self.ui.show_results();
        self.state.send_replace(UiState::Results(view));
    }

    fn enter_error(&self, message: String) {
        self.ui.hide_results();
        self.ui.show_error(&message);
        self.state.send_replace(UiState::Error(message));
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
