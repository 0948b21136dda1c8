//! `UiBinding` and `SecondaryViewer` implementations that forward to the egui thread.

use std::sync::Mutex;

use anyhow::{anyhow, Result};
use client_core::{SecondaryViewer, UiBinding};
use crossbeam_channel::Sender;
use shared::domain::ResultsView;

use crate::controller::events::UiEvent;

pub struct ChannelUi {
    input: Mutex<String>,
    placeholder: String,
    ui_tx: Sender<UiEvent>,
}

impl ChannelUi {
    pub fn new(placeholder: String, ui_tx: Sender<UiEvent>) -> Self {
        Self {
            input: Mutex::new(String::new()),
            placeholder,
            ui_tx,
        }
    }

    /// Mirrors the text field contents as of the submit that is being handled.
    pub fn set_input(&self, value: String) {
        *self.input.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = value;
    }

    fn emit(&self, event: UiEvent) {
        if self.ui_tx.try_send(event).is_err() {
            tracing::warn!("ui event queue unavailable; dropping surface update");
        }
    }
}

impl UiBinding for ChannelUi {
    fn input_value(&self) -> String {
        self.input
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn input_placeholder(&self) -> String {
        self.placeholder.clone()
    }

    fn show_error(&self, message: &str) {
        self.emit(UiEvent::ErrorShown(message.to_string()));
    }

    fn hide_error(&self) {
        self.emit(UiEvent::ErrorHidden);
    }

    fn set_results(&self, view: &ResultsView) {
        self.emit(UiEvent::ResultsReplaced(view.clone()));
    }

    fn show_results(&self) {
        self.emit(UiEvent::ResultsShown);
    }

    fn hide_results(&self) {
        self.emit(UiEvent::ResultsHidden);
    }
}

pub struct ChannelViewer {
    ui_tx: Sender<UiEvent>,
}

impl ChannelViewer {
    pub fn new(ui_tx: Sender<UiEvent>) -> Self {
        Self { ui_tx }
    }
}

impl SecondaryViewer for ChannelViewer {
    fn open(&self, target: &str, url: &str) -> Result<()> {
        self.ui_tx
            .try_send(UiEvent::ViewerOpened {
                target: target.to_string(),
                url: url.to_string(),
            })
            .map_err(|err| anyhow!("viewer surface unavailable: {err}"))
    }
}
