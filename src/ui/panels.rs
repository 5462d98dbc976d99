use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::reader::{SPREADSHEET_EXTENSIONS, SUPPORTED_EXTENSIONS};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Side panel – point list
// ---------------------------------------------------------------------------

/// Render the list of points (all of them after a load, the picked one after a click).
pub fn side_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Nearest point");
    ui.separator();

    if !state.index().is_ready() {
        ui.label("No data loaded.");
        return;
    }

    let listing = &state.scene().listing;
    if listing.is_empty() {
        ui.label("Nothing selected.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::remainder())
        .body(|body| {
            body.rows(18.0, listing.len(), |mut row| {
                let line = &listing[row.index()];
                row.col(|ui: &mut Ui| {
                    ui.label(line);
                });
            });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        let sample_label = format!("Load {}", state.config.sample_path.display());
        if ui.button(sample_label).clicked() {
            // Failures are reported through the status message.
            let _ = state.load_sample();
        }
        if ui.button("Open file…").clicked() {
            open_file_dialog(state);
        }

        ui.separator();

        if let Some(source) = &state.source {
            ui.label(format!(
                "{} points from {}",
                state.index().points().len(),
                source.display()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open tabular data")
        .add_filter("Supported files", SUPPORTED_EXTENSIONS)
        .add_filter("Spreadsheets", SPREADSHEET_EXTENSIONS)
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        let _ = state.load_from(&path);
    }
}
