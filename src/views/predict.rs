use crate::config::DashboardConfig;
use crate::data::model::Dataset;
use crate::error::ViewError;
use crate::regression::{Design, LinearRegression, feature_names};

/// User-entered feature values, positionally matching `feature_columns`.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionInput {
    pub values: Vec<f64>,
}

impl PredictionInput {
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            values: config.default_inputs.clone(),
        }
    }
}

/// Point prediction from a model fitted on every row.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub value: f64,
    pub n_rows: usize,
}

/// Lower-case a header, drop a trailing unit in parentheses, and join words
/// with `_`: `"Curah Hujan (mm)"` becomes `"curah_hujan"`.
pub fn normalize_column_name(name: &str) -> String {
    let trimmed = name.trim();
    let base = match (trimmed.rfind('('), trimmed.ends_with(')')) {
        (Some(open), true) if open > 0 => &trimmed[..open],
        _ => trimmed,
    };
    base.split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Fail unless the dataset's feature columns are exactly `expected`, in order.
pub fn validate_feature_layout(found: &[String], expected: &[String]) -> Result<(), ViewError> {
    let matches = found.len() == expected.len()
        && found
            .iter()
            .zip(expected)
            .all(|(f, e)| normalize_column_name(f) == normalize_column_name(e));
    if matches {
        Ok(())
    } else {
        Err(ViewError::FeatureLayout {
            expected: expected.to_vec(),
            found: found.to_vec(),
        })
    }
}

/// Fit on the whole dataset (no hold-out) and predict one row from `inputs`.
pub fn predict(
    dataset: &Dataset,
    inputs: &PredictionInput,
    config: &DashboardConfig,
) -> Result<Prediction, ViewError> {
    let found = feature_names(dataset, &config.target_column)?;
    validate_feature_layout(&found, &config.feature_columns)?;
    if inputs.values.len() != found.len() {
        return Err(ViewError::FeatureLayout {
            expected: config.feature_columns.clone(),
            found,
        });
    }

    let design = Design::from_dataset(dataset, &config.target_column)?;
    let fitted = LinearRegression::fit(&design.x, &design.y)?;
    let value = fitted.predict_row(&inputs.values);
    Ok(Prediction {
        value,
        n_rows: design.n_rows(),
    })
}
