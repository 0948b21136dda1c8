//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{settings::Settings, HttpSearchApi, Localizer, SearchController};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::{
    binding::{ChannelUi, ChannelViewer},
    commands::BackendCommand,
};
use crate::controller::events::UiEvent;

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: Settings) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::ErrorShown(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let api = match HttpSearchApi::new(settings.request_timeout()) {
                Ok(api) => api,
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::ErrorShown(format!(
                        "backend worker startup failure: {err}"
                    )));
                    tracing::error!("failed to build http client: {err:#}");
                    return;
                }
            };

            let binding = Arc::new(ChannelUi::new(
                settings.placeholder_term.clone(),
                ui_tx.clone(),
            ));
            let localizer = Arc::new(Localizer::new());
            let controller = SearchController::new(
                Arc::new(api),
                binding.clone(),
                localizer.clone(),
                Arc::new(ChannelViewer::new(ui_tx.clone())),
                settings.controller_config(),
            );

            controller.run_when_ready(localizer.readiness());
            {
                let localizer = Arc::clone(&localizer);
                let locale_path = settings.locale_path.clone();
                tokio::spawn(async move { localizer.load_from(locale_path).await });
            }
            tracing::info!(base_url = %settings.base_url, "backend worker ready");

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Search { term } => {
                        binding.set_input(term);
                        controller.search().await;
                    }
                    BackendCommand::OpenLink { link } => {
                        if let Err(err) = controller.open_link(&link) {
                            tracing::warn!("failed to open result link: {err:#}");
                        }
                    }
                }
            }
            tracing::debug!("ui command queue closed; backend worker exiting");
        });
    });
}
