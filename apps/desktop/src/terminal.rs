//! Terminal rendition of the search surface.

use std::sync::Mutex;

use anyhow::Result;
use client_core::{SecondaryViewer, UiBinding};
use shared::domain::ResultsView;

pub struct TerminalUi {
    input: String,
    placeholder: String,
    last_results: Mutex<Option<ResultsView>>,
}

impl TerminalUi {
    pub fn new(input: Option<String>, placeholder: String) -> Self {
        Self {
            input: input.unwrap_or_default(),
            placeholder,
            last_results: Mutex::new(None),
        }
    }
}

pub fn format_results(view: &ResultsView) -> String {
    match view {
        ResultsView::Searching(text) | ResultsView::NoResults(text) => text.clone(),
        ResultsView::Documents(links) => links
            .iter()
            .enumerate()
            .map(|(idx, link)| format!("{:>3}. {}\n     {}", idx + 1, link.title, link.url))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

impl UiBinding for TerminalUi {
    fn input_value(&self) -> String {
        self.input.clone()
    }

    fn input_placeholder(&self) -> String {
        self.placeholder.clone()
    }

    fn show_error(&self, message: &str) {
        eprintln!("error: {message}");
    }

    fn hide_error(&self) {}

    fn set_results(&self, view: &ResultsView) {
        let mut last = self
            .last_results
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *last = Some(view.clone());
    }

    fn show_results(&self) {
        let last = self
            .last_results
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(view) = last.as_ref() {
            println!("{}", format_results(view));
        }
    }

    fn hide_results(&self) {}
}

/// A terminal cannot host a second window; the chosen link is announced with
/// the viewer name so it can be piped elsewhere.
pub struct TerminalViewer;

impl SecondaryViewer for TerminalViewer {
    fn open(&self, target: &str, url: &str) -> Result<()> {
        println!("[{target}] {url}");
        Ok(())
    }
}
