use crate::config::DashboardConfig;
use crate::data::model::Dataset;
use crate::error::ViewError;
use crate::regression::{Design, LinearRegression, train_test_split};

/// Hold-out evaluation of an OLS fit.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelReport {
    pub feature_names: Vec<String>,
    /// One per feature, same order as `feature_names`.
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    /// R² on the held-out rows.
    pub r2: f64,
    pub n_train: usize,
    pub n_test: usize,
}

/// Split the dataset, fit on the training rows and score on the held-out rows.
pub fn model(dataset: &Dataset, config: &DashboardConfig) -> Result<ModelReport, ViewError> {
    let design = Design::from_dataset(dataset, &config.target_column)?;
    let split = train_test_split(design.n_rows(), config.test_fraction, config.split_seed)?;

    let (x_train, y_train) = design.select_rows(&split.train);
    let (x_test, y_test) = design.select_rows(&split.test);

    let fitted = LinearRegression::fit(&x_train, &y_train)?;
    let r2 = fitted.score(&x_test, &y_test);
    log::debug!(
        "model view: {} features, {} train / {} test rows, R² {r2:.4}",
        design.feature_names.len(),
        split.train.len(),
        split.test.len()
    );

    Ok(ModelReport {
        coefficients: fitted.coefficients().to_vec(),
        intercept: fitted.intercept(),
        r2,
        n_train: split.train.len(),
        n_test: split.test.len(),
        feature_names: design.feature_names,
    })
}
