use eframe::egui::{self, Color32, Grid, RichText, ScrollArea, Ui};

use crate::data::describe::Description;
use crate::error::ViewError;
use crate::state::AppState;
use crate::ui::charts;
use crate::views::explore::ExplorationReport;
use crate::views::modeling::ModelReport;
use crate::views::{self, Page};

// ---------------------------------------------------------------------------
// Central panel – routed page
// ---------------------------------------------------------------------------

/// Route the session state and render the resulting page.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    match views::route(state) {
        Page::UploadPrompt => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Upload a dataset to begin  (File → Open…)");
            });
        }
        Page::LoadFailed(err) => {
            ui.heading("Dataset");
            error_banner(ui, &err.to_string());
        }
        Page::Home => home(ui),
        Page::Explore(report) => {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| explore(ui, state, &report));
        }
        Page::Model(result) => modeling(ui, &result),
        Page::Predict => predict(ui, state),
    }
}

fn home(ui: &mut Ui) {
    ui.heading("Selamat Datang!");
    ui.label("Gunakan aplikasi ini untuk menganalisis data penjualan dan membuat prediksi.");
}

fn error_banner(ui: &mut Ui, message: &str) {
    ui.label(RichText::new(message).color(Color32::RED));
}

fn fmt_num(v: f64) -> String {
    format!("{v:.4}")
}

// ---------------------------------------------------------------------------
// Eksplorasi Data
// ---------------------------------------------------------------------------

fn explore(ui: &mut Ui, state: &mut AppState, report: &ExplorationReport) {
    ui.heading("Eksplorasi Data");

    ui.add_space(6.0);
    ui.strong("Data");
    ScrollArea::horizontal().id_salt("head_scroll").show(ui, |ui: &mut Ui| {
        Grid::new("head_grid").striped(true).show(ui, |ui: &mut Ui| {
            for name in &report.column_names {
                ui.strong(name);
            }
            ui.end_row();
            for row in &report.head {
                for cell in row {
                    ui.label(cell.to_string());
                }
                ui.end_row();
            }
        });
    });

    ui.add_space(6.0);
    ui.strong("Informasi Dataset");
    ui.label(format!(
        "{} entries, {} columns",
        report.n_rows,
        report.column_names.len()
    ));
    Grid::new("info_grid").striped(true).show(ui, |ui: &mut Ui| {
        for header in ["#", "Column", "Non-Null Count", "Dtype"] {
            ui.strong(header);
        }
        ui.end_row();
        for (i, col) in report.info.iter().enumerate() {
            ui.label(i.to_string());
            ui.label(&col.name);
            ui.label(format!("{} non-null", col.non_null));
            ui.label(col.dtype.to_string());
            ui.end_row();
        }
    });

    ui.add_space(6.0);
    ui.strong("Statistik Deskriptif");
    ScrollArea::horizontal().id_salt("describe_scroll").show(ui, |ui: &mut Ui| {
        describe_grid(ui, &report.description);
    });

    ui.add_space(6.0);
    ui.strong("Cek Missing Values");
    Grid::new("null_grid").striped(true).show(ui, |ui: &mut Ui| {
        for (name, count) in &report.null_counts {
            ui.label(name);
            ui.label(count.to_string());
            ui.end_row();
        }
    });

    ui.add_space(6.0);
    ui.strong("Visualisasi Data");
    let Some(chart) = &report.chart else {
        ui.label("Dataset has no columns.");
        return;
    };
    egui::ComboBox::from_label("Pilih Kolom untuk Visualisasi")
        .selected_text(&chart.column)
        .show_ui(ui, |ui: &mut Ui| {
            for col in &report.column_names {
                if ui.selectable_label(chart.column == *col, col).clicked() {
                    state.select_column(col.clone());
                }
            }
        });
    charts::column_charts(ui, chart);
}

/// Statistics as rows, columns as grid columns.
fn describe_grid(ui: &mut Ui, description: &Description) {
    Grid::new("describe_grid").striped(true).show(ui, |ui: &mut Ui| match description {
        Description::Numeric(stats) => {
            ui.label("");
            for s in stats {
                ui.strong(&s.column);
            }
            ui.end_row();
            let rows: [(&str, fn(&crate::data::describe::NumericSummary) -> String); 8] = [
                ("count", |s| s.count.to_string()),
                ("mean", |s| fmt_num(s.mean)),
                ("std", |s| s.std.map_or_else(|| "NaN".to_string(), fmt_num)),
                ("min", |s| fmt_num(s.min)),
                ("25%", |s| fmt_num(s.q25)),
                ("50%", |s| fmt_num(s.median)),
                ("75%", |s| fmt_num(s.q75)),
                ("max", |s| fmt_num(s.max)),
            ];
            for (label, value) in rows {
                ui.strong(label);
                for s in stats {
                    ui.label(value(s));
                }
                ui.end_row();
            }
        }
        Description::Categorical(stats) => {
            ui.label("");
            for s in stats {
                ui.strong(&s.column);
            }
            ui.end_row();
            ui.strong("count");
            for s in stats {
                ui.label(s.count.to_string());
            }
            ui.end_row();
            ui.strong("unique");
            for s in stats {
                ui.label(s.unique.to_string());
            }
            ui.end_row();
            ui.strong("top");
            for s in stats {
                ui.label(s.top.as_ref().map_or_else(|| "NaN".to_string(), |v| v.to_string()));
            }
            ui.end_row();
            ui.strong("freq");
            for s in stats {
                ui.label(s.freq.to_string());
            }
            ui.end_row();
        }
    });
}

// ---------------------------------------------------------------------------
// Pemodelan
// ---------------------------------------------------------------------------

fn modeling(ui: &mut Ui, result: &Result<ModelReport, ViewError>) {
    ui.heading("Pemodelan Data");
    let report = match result {
        Ok(report) => report,
        Err(e) => {
            error_banner(ui, &e.to_string());
            return;
        }
    };

    let coefs: Vec<String> = report.coefficients.iter().map(|&c| fmt_num(c)).collect();
    ui.label(format!("Koefisien Model: [{}]", coefs.join(", ")));
    Grid::new("coef_grid").striped(true).show(ui, |ui: &mut Ui| {
        for (name, coef) in report.feature_names.iter().zip(&report.coefficients) {
            ui.label(name);
            ui.label(fmt_num(*coef));
            ui.end_row();
        }
    });
    ui.label(format!("Intercept Model: {}", fmt_num(report.intercept)));
    ui.label(format!("Akurasi Model (R²): {}", fmt_num(report.r2)));
    ui.weak(format!(
        "{} training rows, {} held-out rows",
        report.n_train, report.n_test
    ));
}

// ---------------------------------------------------------------------------
// Prediksi
// ---------------------------------------------------------------------------

/// `"curah_hujan"` → `"Curah Hujan"`.
fn input_label(feature: &str) -> String {
    feature
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn predict(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Prediksi Penjualan Optimal");

    let labels: Vec<String> = state.config.feature_columns.iter().map(|f| input_label(f)).collect();
    Grid::new("predict_inputs").show(ui, |ui: &mut Ui| {
        for (label, value) in labels.iter().zip(state.inputs.values.iter_mut()) {
            ui.label(format!("Masukkan {label}"));
            ui.add(egui::DragValue::new(value).speed(1.0));
            ui.end_row();
        }
    });

    if ui.button("Prediksi").clicked() {
        state.submit_prediction();
    }

    match &state.prediction {
        Some(Ok(p)) => {
            ui.label(
                RichText::new(format!("Hasil Prediksi Penjualan: {} pcs", fmt_num(p.value)))
                    .color(Color32::DARK_GREEN)
                    .strong(),
            );
        }
        Some(Err(e)) => error_banner(ui, &e.to_string()),
        None => {}
    }
}
