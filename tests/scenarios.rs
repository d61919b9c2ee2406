//! End-to-end scenarios: file -> dataset -> routed views.

use std::collections::BTreeSet;

use sales_dashboard::config::DashboardConfig;
use sales_dashboard::data::loader::{load_bytes, load_file};
use sales_dashboard::data::model::{CellValue, Column, Dataset};
use sales_dashboard::error::ViewError;
use sales_dashboard::regression::{feature_names, train_test_split};
use sales_dashboard::state::AppState;
use sales_dashboard::views::modeling::model;
use sales_dashboard::views::predict::{PredictionInput, predict};
use sales_dashboard::views::{Page, Selection, route};

const HARI: [f64; 10] = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 0.0, 1.0, 2.0];
const TANGGAL: [f64; 10] = [1.0, 4.0, 9.0, 16.0, 25.0, 3.0, 8.0, 13.0, 20.0, 27.0];
const KEGIATAN: [f64; 10] = [1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0];
const CURAH_HUJAN: [f64; 10] = [0.0, 12.5, 3.0, 0.0, 40.0, 7.5, 1.0, 22.0, 0.0, 5.0];

fn column(name: &str, values: &[f64]) -> Column {
    Column::new(name, values.iter().map(|&v| CellValue::Float(v)).collect())
}

/// Ten rows with `Penjualan (pcs) = 2·hari + 3·tanggal`.
fn scenario_a() -> Dataset {
    let target: Vec<f64> = HARI
        .iter()
        .zip(TANGGAL)
        .map(|(h, t)| 2.0 * h + 3.0 * t)
        .collect();
    Dataset::from_columns(vec![
        column("hari", &HARI),
        column("tanggal", &TANGGAL),
        column("kegiatan", &KEGIATAN),
        column("curah_hujan", &CURAH_HUJAN),
        column("Penjualan (pcs)", &target),
    ])
    .expect("valid dataset")
}

fn without_target() -> Dataset {
    Dataset::from_columns(vec![
        column("hari", &HARI),
        column("tanggal", &TANGGAL),
        column("kegiatan", &KEGIATAN),
        column("curah_hujan", &CURAH_HUJAN),
    ])
    .expect("valid dataset")
}

#[test]
fn scenario_a_recovers_coefficients() {
    let report = model(&scenario_a(), &DashboardConfig::default()).expect("model report");

    let expected = [2.0, 3.0, 0.0, 0.0];
    assert_eq!(report.coefficients.len(), 4);
    for (got, want) in report.coefficients.iter().zip(expected) {
        assert!((got - want).abs() < 1e-6, "coefficients {:?}", report.coefficients);
    }
    assert!(report.intercept.abs() < 1e-6);
    assert!((report.r2 - 1.0).abs() < 1e-9, "R² {}", report.r2);
    assert_eq!((report.n_train, report.n_test), (8, 2));
}

#[test]
fn scenario_b_missing_target_is_surfaced() {
    let config = DashboardConfig::default();
    let ds = without_target();

    let err = predict(&ds, &PredictionInput::from_config(&config), &config).unwrap_err();
    assert_eq!(err.to_string(), "column 'Penjualan (pcs)' not found");

    let mut state = AppState::default();
    state.set_dataset(ds, "no_target.xlsx");
    state.select_page(Selection::Predict);
    state.submit_prediction();
    assert!(matches!(
        state.prediction,
        Some(Err(ViewError::ColumnMissing { .. }))
    ));

    state.select_page(Selection::Model);
    assert!(matches!(route(&state), Page::Model(Err(ViewError::ColumnMissing { .. }))));
}

#[test]
fn scenario_c_blob_upload_renders_no_view() {
    let blob: Vec<u8> = (0u8..=255).cycle().take(4096).collect();
    assert!(load_bytes(&blob, "xlsx").is_err());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("upload.xlsx");
    std::fs::write(&path, &blob).unwrap();

    let mut state = AppState::default();
    state.load_path(&path);
    for selection in Selection::ALL {
        state.select_page(selection);
        assert!(matches!(route(&state), Page::LoadFailed(_)));
    }
}

#[test]
fn split_sizes_match_rounded_fraction() {
    for n in [3usize, 7, 10, 12, 13, 99, 250] {
        let split = train_test_split(n, 0.2, 4).unwrap();
        assert_eq!(split.test.len(), (0.2 * n as f64).round() as usize);
        let all: BTreeSet<usize> = split.train.iter().chain(&split.test).copied().collect();
        assert_eq!(all.len(), n);
        assert_eq!(split.train.len() + split.test.len(), n);
    }
}

#[test]
fn feature_columns_keep_relative_order() {
    let ds = scenario_a();
    let names = feature_names(&ds, "Penjualan (pcs)").unwrap();
    assert_eq!(names.len(), ds.columns().len() - 1);
    assert_eq!(names, ["hari", "tanggal", "kegiatan", "curah_hujan"]);
}

#[test]
fn prediction_is_deterministic_and_exact_on_linear_data() {
    let config = DashboardConfig::default();
    let ds = scenario_a();
    let inputs = PredictionInput {
        values: vec![3.0, 10.0, 1.0, 5.0],
    };
    let first = predict(&ds, &inputs, &config).unwrap();
    let second = predict(&ds, &inputs, &config).unwrap();
    assert_eq!(first, second);
    assert!((first.value - 36.0).abs() < 1e-6);
    assert_eq!(first.n_rows, 10);
}

#[test]
fn csv_upload_flows_through_every_page() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sales.csv");
    let mut text = String::from("hari,tanggal,kegiatan,curah_hujan,Penjualan (pcs)\n");
    for i in 0..10 {
        let y = 2.0 * HARI[i] + 3.0 * TANGGAL[i];
        text.push_str(&format!(
            "{},{},{},{},{}\n",
            HARI[i], TANGGAL[i], KEGIATAN[i], CURAH_HUJAN[i], y
        ));
    }
    std::fs::write(&path, text).unwrap();
    assert_eq!(load_file(&path).unwrap().len(), 10);

    let mut state = AppState::default();
    state.load_path(&path);
    assert_eq!(route(&state), Page::Home);

    state.select_page(Selection::Explore);
    let Page::Explore(report) = route(&state) else {
        panic!("expected exploration page");
    };
    assert_eq!(report.head.len(), 5);
    assert_eq!(report.chart.as_ref().map(|c| c.column.as_str()), Some("hari"));

    state.select_page(Selection::Model);
    let Page::Model(Ok(modeled)) = route(&state) else {
        panic!("expected model report");
    };
    assert!((modeled.r2 - 1.0).abs() < 1e-9);

    state.select_page(Selection::Predict);
    state.submit_prediction();
    let Some(Ok(prediction)) = &state.prediction else {
        panic!("expected prediction");
    };
    // defaults: hari 0, tanggal 1, kegiatan 1, curah_hujan 0
    assert!((prediction.value - 3.0).abs() < 1e-6);
}

#[test]
fn xlsx_upload_with_boolean_activity_flows_through_every_page() {
    use rust_xlsxwriter::Workbook;

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, name) in ["hari", "tanggal", "kegiatan", "curah_hujan", "Penjualan (pcs)"]
        .into_iter()
        .enumerate()
    {
        sheet.write_string(0, col as u16, name).unwrap();
    }
    for i in 0..10 {
        let row = i as u32 + 1;
        let y = 2.0 * HARI[i] + 3.0 * TANGGAL[i] + 4.0 * KEGIATAN[i];
        sheet.write_number(row, 0, HARI[i]).unwrap();
        sheet.write_number(row, 1, TANGGAL[i]).unwrap();
        sheet.write_boolean(row, 2, KEGIATAN[i] == 1.0).unwrap();
        sheet.write_number(row, 3, CURAH_HUJAN[i]).unwrap();
        sheet.write_number(row, 4, y).unwrap();
    }
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("penjualan.xlsx");
    workbook.save(&path).unwrap();

    let mut state = AppState::default();
    state.load_path(&path);
    assert!(state.load_error.is_none(), "{:?}", state.load_error);
    assert_eq!(state.source_name.as_deref(), Some("penjualan.xlsx"));
    assert_eq!(route(&state), Page::Home);

    state.select_page(Selection::Explore);
    let Page::Explore(report) = route(&state) else {
        panic!("expected exploration page");
    };
    assert_eq!(report.n_rows, 10);
    assert_eq!(
        report.column_names,
        ["hari", "tanggal", "kegiatan", "curah_hujan", "Penjualan (pcs)"]
    );
    assert_eq!(report.head[0][2], CellValue::Bool(true));

    state.select_page(Selection::Model);
    let Page::Model(Ok(modeled)) = route(&state) else {
        panic!("expected model report");
    };
    assert!((modeled.r2 - 1.0).abs() < 1e-9, "R² {}", modeled.r2);

    state.select_page(Selection::Predict);
    state.inputs.values = vec![3.0, 10.0, 1.0, 5.0];
    state.submit_prediction();
    let Some(Ok(prediction)) = &state.prediction else {
        panic!("expected prediction, got {:?}", state.prediction);
    };
    assert!((prediction.value - 40.0).abs() < 1e-6);
}
