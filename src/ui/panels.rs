use eframe::egui::{self, Margin, RichText, Ui};

use crate::color;
use crate::events::UploadedFile;
use crate::state::AppState;

/// White card container used by every dashboard block.
pub fn card<R>(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui) -> R) -> R {
    egui::Frame::default()
        .fill(color::CARD)
        .inner_margin(Margin::same(20))
        .show(ui, add_contents)
        .inner
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

pub fn header(ui: &mut Ui) {
    card(ui, |ui: &mut Ui| {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label(
                RichText::new("Normative Modeling Evaluation Metrics Viz")
                    .size(28.0)
                    .strong()
                    .color(color::TEXT),
            );
        });
    });
}

// ---------------------------------------------------------------------------
// Upload panel (left)
// ---------------------------------------------------------------------------

/// Render the upload card. Returns the chosen file, if the user picked one
/// this frame.
pub fn upload_panel(ui: &mut Ui, state: &mut AppState) -> Option<UploadedFile> {
    card(ui, |ui: &mut Ui| {
        ui.label(
            RichText::new(
                "Upload a CSV file to visualize different normative modeling evaluation metrics.",
            )
            .size(16.0)
            .color(color::TEXT),
        );
        ui.add_space(10.0);

        let button = egui::Button::new(
            RichText::new("Upload CSV").size(16.0).color(egui::Color32::WHITE),
        )
        .fill(color::PRIMARY);
        let picked = if ui.add(button).clicked() {
            open_file_dialog(state)
        } else {
            None
        };

        ui.add_space(10.0);
        ui.separator();
        if state.table.is_empty() {
            ui.label("The loaded table has no rows.");
        } else {
            ui.label(format!("{} ROIs loaded", state.table.len()));
        }
        ui.label(RichText::new(&state.source_name).small().weak());

        if let Some(msg) = &state.status_message {
            ui.add_space(6.0);
            ui.label(RichText::new(msg).color(egui::Color32::RED));
        }
        picked
    })
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) -> Option<UploadedFile> {
    let path = rfd::FileDialog::new()
        .set_title("Upload evaluation metrics")
        .add_filter("CSV", &["csv"])
        .pick_file()?;

    match std::fs::read(&path) {
        Ok(bytes) => Some(UploadedFile {
            name: file_name(&path),
            bytes,
        }),
        Err(e) => {
            log::error!("Failed to read {}: {e}", path.display());
            state.status_message = Some(format!("Error: reading {}: {e}", path.display()));
            None
        }
    }
}

pub fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
