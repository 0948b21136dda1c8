use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{settings::load_settings, HttpSearchApi, Localizer, SearchController};
use map_integration::{
    DirectionsResponse, LatLng, MapConfig, MapType, MapWidget, RouteOptions, StaticRouteProvider,
    Waypoint,
};
use shared::domain::{ResultsView, UiState};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod terminal;

use terminal::{TerminalUi, TerminalViewer};

#[derive(Parser, Debug)]
#[command(name = "docsearch", about = "Search the documentation index from a terminal")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one search; an omitted term uses the configured placeholder.
    Search {
        term: Option<String>,
        #[arg(long)]
        base_url: Option<String>,
        /// Open the Nth result (1-based) in the viewer.
        #[arg(long)]
        open: Option<usize>,
    },
    /// Render the turn-by-turn narrative of a saved directions response.
    Narrative {
        #[arg(long)]
        route_file: PathBuf,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        html: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let mut settings = load_settings()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Search {
            term,
            base_url,
            open,
        } => {
            if let Some(base_url) = base_url {
                settings.base_url = base_url;
                settings.validate()?;
            }
            info!(base_url = %settings.base_url, "docsearch: starting search");

            let localizer = Arc::new(Localizer::new());
            let controller = SearchController::new(
                Arc::new(HttpSearchApi::new(settings.request_timeout())?),
                Arc::new(TerminalUi::new(term, settings.placeholder_term.clone())),
                localizer.clone(),
                Arc::new(TerminalViewer),
                settings.controller_config(),
            );

            let first_search = controller.run_when_ready(localizer.readiness());
            localizer.load_from(settings.locale_path.clone()).await;
            first_search.await.context("initial search task failed")?;

            let state = controller.settled().await;
            info!(outcome = outcome_label(&state), "docsearch: search settled");
            match &state {
                UiState::Results(ResultsView::Documents(links)) => {
                    if let Some(position) = open {
                        debug!(position, results = links.len(), "docsearch: opening result");
                        let link = position
                            .checked_sub(1)
                            .and_then(|idx| links.get(idx))
                            .ok_or_else(|| {
                                anyhow!("--open {position} is out of range (1..={})", links.len())
                            })?;
                        controller.open_link(link)?;
                    }
                }
                UiState::Results(_) if open.is_some() => {
                    warn!("docsearch: --open ignored, the search returned no documents");
                }
                _ => {}
            }
            return Ok(search_exit_code(&state));
        }
        Command::Narrative {
            route_file,
            from,
            to,
            html,
        } => {
            debug!(path = %route_file.display(), "docsearch: loading directions response");
            let raw = tokio::fs::read_to_string(&route_file)
                .await
                .with_context(|| format!("failed to read '{}'", route_file.display()))?;
            let response = DirectionsResponse::from_json(&raw).with_context(|| {
                format!("'{}' is not a directions response", route_file.display())
            })?;

            let widget = MapWidget::new(
                MapConfig::new("terminal", 7, LatLng { lat: 0.0, lng: 0.0 }, MapType::Map),
                Arc::new(StaticRouteProvider::new(response.route)),
            );
            let table = widget
                .show_route(
                    &[Waypoint::Address(from), Waypoint::Address(to)],
                    &RouteOptions::default(),
                )
                .await?;
            info!(rows = table.rows.len(), "docsearch: narrative ready");

            if html {
                print!("{}", table.to_html());
            } else {
                print!("{}", table.to_text());
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn outcome_label(state: &UiState) -> &'static str {
    match state {
        UiState::Results(ResultsView::Documents(_)) => "documents",
        UiState::Results(_) => "no_results",
        UiState::Error(_) => "error",
        UiState::Idle | UiState::Searching => "pending",
    }
}

/// The terminal binding has already printed the error text, so a failed
/// search only changes the exit status.
fn search_exit_code(state: &UiState) -> ExitCode {
    match state {
        UiState::Error(_) => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    }
}
