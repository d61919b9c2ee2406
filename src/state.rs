use std::path::Path;

use crate::config::DashboardConfig;
use crate::data::loader;
use crate::data::model::Dataset;
use crate::error::{LoadError, ViewError};
use crate::views::Selection;
use crate::views::modeling::{self, ModelReport};
use crate::views::predict::{self, Prediction, PredictionInput};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full session state, independent of rendering. Views read it through
/// [`crate::views::route`] on every frame.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded dataset (None until user loads a file).
    pub dataset: Option<Dataset>,

    /// File name of the loaded dataset, for the top bar.
    pub source_name: Option<String>,

    /// Failure of the most recent upload.
    pub load_error: Option<LoadError>,

    /// Sidebar page.
    pub selection: Selection,

    /// Column charted on the exploration page.
    pub selected_column: Option<String>,

    /// Prediction form fields.
    pub inputs: PredictionInput,

    /// Outcome of the last "Prediksi" submit.
    pub prediction: Option<Result<Prediction, ViewError>>,

    /// Fit for the modeling page, computed once per dataset.
    model_report: Option<Result<ModelReport, ViewError>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DashboardConfig::default())
    }
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            inputs: PredictionInput::from_config(&config),
            config,
            dataset: None,
            source_name: None,
            load_error: None,
            selection: Selection::default(),
            selected_column: None,
            prediction: None,
            model_report: None,
        }
    }

    /// Ingest a newly loaded dataset; the chart column resets to the first column.
    pub fn set_dataset(&mut self, dataset: Dataset, source_name: &str) {
        self.selected_column = dataset.column_names().first().map(|c| c.to_string());
        self.dataset = Some(dataset);
        self.source_name = Some(source_name.to_string());
        self.load_error = None;
        self.prediction = None;
        self.model_report = None;
        self.refresh_model_report();
    }

    /// A failed upload replaces whatever was loaded before.
    pub fn set_load_error(&mut self, err: LoadError) {
        self.dataset = None;
        self.selected_column = None;
        self.prediction = None;
        self.model_report = None;
        self.load_error = Some(err);
    }

    /// Load `path` and record the outcome.
    pub fn load_path(&mut self, path: &Path) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        match loader::load_file(path) {
            Ok(dataset) => self.set_dataset(dataset, &name),
            Err(e) => self.set_load_error(e),
        }
    }

    pub fn select_page(&mut self, selection: Selection) {
        if self.selection != selection {
            self.selection = selection;
            self.prediction = None;
            self.refresh_model_report();
        }
    }

    /// Cached modeling outcome, present once the modeling page has been opened
    /// for the current dataset.
    pub fn model_report(&self) -> Option<&Result<ModelReport, ViewError>> {
        self.model_report.as_ref()
    }

    fn refresh_model_report(&mut self) {
        if self.selection != Selection::Model || self.model_report.is_some() {
            return;
        }
        let Some(dataset) = &self.dataset else {
            return;
        };
        let report = modeling::model(dataset, &self.config);
        match &report {
            Ok(r) => log::info!(
                "Fitted {} features on {} rows, R² {:.4} on {} held-out rows",
                r.feature_names.len(),
                r.n_train,
                r.r2,
                r.n_test
            ),
            Err(e) => log::warn!("Modeling failed: {e}"),
        }
        self.model_report = Some(report);
    }

    pub fn select_column(&mut self, column: String) {
        self.selected_column = Some(column);
    }

    /// Run the prediction view for the current inputs.
    pub fn submit_prediction(&mut self) {
        let Some(dataset) = &self.dataset else {
            return;
        };
        let outcome = predict::predict(dataset, &self.inputs, &self.config);
        match &outcome {
            Ok(p) => log::info!(
                "Predicted {:.3} from inputs {:?} ({} rows)",
                p.value,
                self.inputs.values,
                p.n_rows
            ),
            Err(e) => log::warn!("Prediction failed: {e}"),
        }
        self.prediction = Some(outcome);
    }
}
