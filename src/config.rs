//! Dashboard settings.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

/// Settings that shape the modeling and prediction views.
///
/// Every field is optional in the JSON file; missing fields keep their default.
///
/// # Defaults
///
/// | Field             | Default                                        |
/// |-------------------|------------------------------------------------|
/// | `target_column`   | `"Penjualan (pcs)"`                            |
/// | `feature_columns` | `["hari", "tanggal", "kegiatan", "curah_hujan"]` |
/// | `test_fraction`   | 0.2                                            |
/// | `split_seed`      | 4                                              |
/// | `head_rows`       | 5                                              |
/// | `default_inputs`  | `[0, 1, 1, 0]`                                 |
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Column predicted by the model. Matched exactly, case-sensitive.
    pub target_column: String,
    /// Expected feature order for prediction inputs, in normalised form.
    pub feature_columns: Vec<String>,
    /// Share of rows held out by the modeling view.
    pub test_fraction: f64,
    /// Seed of the train/test shuffle.
    pub split_seed: u64,
    /// Rows shown in the data preview.
    pub head_rows: usize,
    /// Initial values of the prediction input fields.
    pub default_inputs: Vec<f64>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            target_column: "Penjualan (pcs)".to_string(),
            feature_columns: ["hari", "tanggal", "kegiatan", "curah_hujan"]
                .map(String::from)
                .to_vec(),
            test_fraction: 0.2,
            split_seed: 4,
            head_rows: 5,
            default_inputs: vec![0.0, 1.0, 1.0, 0.0],
        }
    }
}

impl DashboardConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the views cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            bail!("test_fraction must be in (0, 1), got {}", self.test_fraction);
        }
        if self.target_column.is_empty() {
            bail!("target_column must not be empty");
        }
        if self.default_inputs.len() != self.feature_columns.len() {
            bail!(
                "default_inputs has {} values for {} feature columns",
                self.default_inputs.len(),
                self.feature_columns.len()
            );
        }
        Ok(())
    }
}
