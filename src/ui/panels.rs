use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::loader::SPREADSHEET_EXTENSIONS;
use crate::state::AppState;
use crate::views::Selection;

// ---------------------------------------------------------------------------
// Left side panel – page selector and upload
// ---------------------------------------------------------------------------

/// Render the left navigation panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Analisis dan Prediksi Penjualan");
    ui.separator();

    ui.strong("Pilih Halaman");
    egui::ComboBox::from_id_salt("page_select")
        .selected_text(state.selection.label())
        .show_ui(ui, |ui: &mut Ui| {
            for selection in Selection::ALL {
                if ui
                    .selectable_label(state.selection == selection, selection.label())
                    .clicked()
                {
                    state.select_page(selection);
                }
            }
        });
    ui.separator();

    ui.strong("Upload file dataset (XLSX)");
    if ui.button("Browse…").clicked() {
        open_file_dialog(state);
    }
    match &state.source_name {
        Some(name) if state.dataset.is_some() => {
            ui.label(name);
        }
        _ => {
            ui.label("No dataset loaded.");
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} rows × {} columns",
                ds.len(),
                ds.columns().len()
            ));
        }

        if let Some(err) = &state.load_error {
            ui.separator();
            ui.label(RichText::new(format!("Error: {}", err.message)).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open sales dataset")
        .add_filter("Excel", &["xlsx"])
        .add_filter("Spreadsheets", SPREADSHEET_EXTENSIONS)
        .add_filter("Other tables", &["csv", "json", "parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
