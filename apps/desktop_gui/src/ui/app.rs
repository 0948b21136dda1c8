use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{ResultLink, ResultsView};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::UiEvent, orchestration::dispatch_backend_command, reducer::SurfaceState,
};

const MAX_EVENTS_PER_FRAME: usize = 256;

pub struct DocSearchApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    input: String,
    placeholder: String,
    surface: SurfaceState,
    viewer_open: bool,
    status: String,
}

impl DocSearchApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        placeholder: String,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            input: String::new(),
            placeholder,
            surface: SurfaceState::default(),
            viewer_open: false,
            status: String::new(),
        }
    }

    fn process_ui_events(&mut self, ctx: &egui::Context) {
        for event in self.ui_rx.try_iter().take(MAX_EVENTS_PER_FRAME) {
            if let Some(url) = self.surface.apply(event) {
                self.viewer_open = true;
                ctx.open_url(egui::OpenUrl::new_tab(url));
            }
        }
    }

    fn submit(&mut self) {
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Search {
                term: self.input.clone(),
            },
            &mut self.status,
        );
    }

    fn show_search_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("search_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            let mut submitted = false;
            ui.horizontal(|ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.input)
                        .hint_text(self.placeholder.as_str())
                        .desired_width(ui.available_width() - 90.0),
                );
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submitted = true;
                }
                if ui.button("Search").clicked() {
                    submitted = true;
                }
            });
            if submitted {
                self.submit();
            }
            if !self.status.is_empty() {
                ui.small(self.status.as_str());
            }
            ui.add_space(6.0);
        });
    }

    fn show_regions(&mut self, ctx: &egui::Context) {
        let mut clicked: Option<ResultLink> = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.surface.error_visible {
                ui.colored_label(ui.visuals().error_fg_color, self.surface.error_text.as_str());
            }
            if !self.surface.results_visible {
                return;
            }
            egui::ScrollArea::vertical().show(ui, |ui| match &self.surface.results {
                Some(ResultsView::Searching(text)) | Some(ResultsView::NoResults(text)) => {
                    ui.label(text.as_str());
                }
                Some(ResultsView::Documents(links)) => {
                    for link in links {
                        // Titles are rendered as plain text, never as markup.
                        let response = ui
                            .link(egui::RichText::new(link.title.as_str()).heading())
                            .on_hover_text(link.url.as_str());
                        if response.clicked() {
                            clicked = Some(link.clone());
                        }
                    }
                }
                None => {}
            });
        });

        if let Some(link) = clicked {
            dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::OpenLink { link },
                &mut self.status,
            );
        }
    }

    fn show_viewer(&mut self, ctx: &egui::Context) {
        let Some(viewer) = self.surface.viewer.clone() else {
            return;
        };
        egui::Window::new(viewer.target.as_str())
            .id(egui::Id::new(("viewer", viewer.target.as_str())))
            .open(&mut self.viewer_open)
            .default_width(420.0)
            .show(ctx, |ui| {
                ui.label("Opened in your browser:");
                ui.hyperlink(viewer.url.as_str());
            });
    }
}

impl eframe::App for DocSearchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events(ctx);

        self.show_search_bar(ctx);
        self.show_regions(ctx);
        self.show_viewer(ctx);

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
