use eframe::egui::{self, Margin, RichText, ScrollArea, Ui};

use crate::color;
use crate::events::{EventSource, HandlerRegistry, UiEvent, UploadedFile};
use crate::figure::PlotId;
use crate::state::AppState;
use crate::ui::{panels, plot, tooltip};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
    handlers: HandlerRegistry,
}

impl DashboardApp {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            handlers: HandlerRegistry::with_defaults(),
        }
    }

    fn emit(&mut self, source: EventSource, event: UiEvent) {
        self.handlers.emit(&mut self.state, source, event);
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut uploads = dropped_files(ctx);
        let mut hovers: Vec<(PlotId, UiEvent)> = Vec::new();

        // ---- Top panel: title ----
        egui::TopBottomPanel::top("header")
            .frame(page_frame())
            .show(ctx, |ui| panels::header(ui));

        // ---- Left side panel: upload ----
        egui::SidePanel::left("upload_panel")
            .default_width(260.0)
            .resizable(true)
            .frame(page_frame())
            .show(ctx, |ui| {
                uploads.extend(panels::upload_panel(ui, &mut self.state));
            });

        // ---- Central panel: 2×2 metric grid ----
        egui::CentralPanel::default()
            .frame(page_frame())
            .show(ctx, |ui| {
                ScrollArea::both().auto_shrink([false, false]).show(ui, |ui: &mut Ui| {
                    for pair in self.state.figures.chunks(2) {
                        ui.horizontal(|ui: &mut Ui| {
                            for figure in pair {
                                let hovered = panels::card(ui, |ui: &mut Ui| {
                                    ui.vertical_centered(|ui: &mut Ui| {
                                        ui.heading(RichText::new(&figure.title).color(color::TEXT));
                                    });
                                    plot::metric_plot(ui, figure, &self.state.config.figure)
                                });
                                // Only changes are delivered ("clear on unhover" included).
                                if hovered.as_ref() != self.state.hover_of(figure.plot) {
                                    hovers.push((figure.plot, UiEvent::Hover(hovered)));
                                }
                            }
                        });
                        ui.add_space(20.0);
                    }
                });
            });

        for (plot, event) in hovers {
            self.emit(EventSource::Plot(plot), event);
        }
        for file in uploads {
            self.emit(EventSource::Upload, UiEvent::Upload(file));
        }

        tooltip::show(ctx, &self.state.tooltip, &self.state.config);
    }
}

fn page_frame() -> egui::Frame {
    egui::Frame::default()
        .fill(color::BACKGROUND)
        .inner_margin(Margin::same(16))
}

/// Files dropped on the window count as uploads.
fn dropped_files(ctx: &egui::Context) -> Vec<UploadedFile> {
    let dropped = ctx.input(|i| i.raw.dropped_files.clone());
    dropped
        .into_iter()
        .filter_map(|file| {
            if let Some(bytes) = file.bytes {
                return Some(UploadedFile {
                    name: file.name,
                    bytes: bytes.to_vec(),
                });
            }
            let path = file.path?;
            match std::fs::read(&path) {
                Ok(bytes) => Some(UploadedFile {
                    name: panels::file_name(&path),
                    bytes,
                }),
                Err(e) => {
                    log::error!("Failed to read dropped file {}: {e}", path.display());
                    None
                }
            }
        })
        .collect()
}
