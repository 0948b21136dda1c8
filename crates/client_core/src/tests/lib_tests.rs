use super::*;

use std::sync::{Arc, Mutex};

use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use shared::{domain::UiState, protocol::SearchResultDocument};
use tokio::net::TcpListener;

#[derive(Debug, Deserialize)]
struct SearchQuery {
    q: String,
}

async fn search_handler(Query(query): Query<SearchQuery>) -> Json<Value> {
    if query.q == "nothing" {
        return Json(json!({ "documents": [] }));
    }
    Json(json!({
        "documents": [
            { "title": format!("{} guide", query.q), "url": format!("http://docs.test/{}", query.q) },
            { "title": "Index", "url": "http://docs.test/" }
        ]
    }))
}

async fn spawn_search_server() -> String {
    let app = Router::new()
        .route("/search", get(search_handler))
        .route("/null", get(|| async { "null" }))
        .route("/html", get(|| async { "<html>maintenance</html>" }))
        .route(
            "/broken",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}")
}

fn api() -> HttpSearchApi {
    HttpSearchApi::new(Duration::from_secs(5)).expect("client")
}

#[test]
fn request_url_appends_term_without_encoding() {
    let term = SearchTerm("two words&more".to_string());
    assert_eq!(
        build_request_url("http://docs.test/search?q=", &term),
        "http://docs.test/search?q=two words&more"
    );
}

#[tokio::test]
async fn fetch_parses_documents() {
    let base = spawn_search_server().await;
    let response = api()
        .fetch(&format!("{base}/search?q=tokio"))
        .await
        .expect("fetch")
        .expect("usable body");

    assert_eq!(
        response.documents,
        vec![
            SearchResultDocument {
                title: "tokio guide".into(),
                url: "http://docs.test/tokio".into(),
            },
            SearchResultDocument {
                title: "Index".into(),
                url: "http://docs.test/".into(),
            },
        ]
    );
}

#[tokio::test]
async fn fetch_treats_null_and_non_json_bodies_as_unusable() {
    let base = spawn_search_server().await;
    assert_eq!(api().fetch(&format!("{base}/null")).await, Ok(None));
    assert_eq!(api().fetch(&format!("{base}/html")).await, Ok(None));
}

#[tokio::test]
async fn fetch_reports_error_status_as_failure_with_reason() {
    let base = spawn_search_server().await;
    let failure = api()
        .fetch(&format!("{base}/broken"))
        .await
        .expect_err("500 must fail");
    let reason = failure.reason.expect("reason");
    assert!(reason.contains("500"), "{reason}");
}

#[tokio::test]
async fn fetch_reports_connection_failure_with_reason() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let failure = api()
        .fetch(&format!("http://{addr}/search?q=x"))
        .await
        .expect_err("nothing listening");
    assert!(failure.reason.is_some());
}

#[tokio::test]
async fn missing_api_fails_without_reason() {
    assert_eq!(
        MissingSearchApi.fetch("http://docs.test/").await,
        Err(SearchFailure::new())
    );
}

struct FixedInput {
    value: String,
    results: Mutex<Vec<ResultsView>>,
}

impl UiBinding for FixedInput {
    fn input_value(&self) -> String {
        self.value.clone()
    }

    fn input_placeholder(&self) -> String {
        "nothing".to_string()
    }

    fn show_error(&self, _message: &str) {}

    fn hide_error(&self) {}

    fn set_results(&self, view: &ResultsView) {
        self.results.lock().expect("results").push(view.clone());
    }

    fn show_results(&self) {}

    fn hide_results(&self) {}
}

struct NoViewer;

impl SecondaryViewer for NoViewer {
    fn open(&self, _target: &str, _url: &str) -> Result<()> {
        Ok(())
    }
}

async fn run_controller(base: &str, input: &str) -> (UiState, Vec<ResultsView>) {
    let ui = Arc::new(FixedInput {
        value: input.to_string(),
        results: Mutex::new(Vec::new()),
    });
    let controller = SearchController::new(
        Arc::new(api()),
        ui.clone(),
        Arc::new(Catalog::default()),
        Arc::new(NoViewer),
        ControllerConfig::new(format!("{base}/search?q=")),
    );
    controller.search().await;
    let state = tokio::time::timeout(Duration::from_secs(5), controller.settled())
        .await
        .expect("settled");
    let rendered = ui.results.lock().expect("results").clone();
    (state, rendered)
}

#[tokio::test]
async fn controller_renders_http_results() {
    let base = spawn_search_server().await;
    let (state, rendered) = run_controller(&base, "serde").await;

    let UiState::Results(ResultsView::Documents(links)) = state else {
        panic!("expected documents");
    };
    assert_eq!(links.len(), 2);
    assert_eq!(links[0].title, "serde guide");
    assert_eq!(rendered.first(), Some(&ResultsView::Searching("Searching...".into())));
}

#[tokio::test]
async fn controller_renders_no_results_for_placeholder_term() {
    let base = spawn_search_server().await;
    let (state, _) = run_controller(&base, "").await;
    assert_eq!(
        state,
        UiState::Results(ResultsView::NoResults("No results found".into()))
    );
}
