//! Typed failures surfaced to the user.

/// The uploaded file could not be turned into a dataset.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("failed to read dataset: {message}")]
pub struct LoadError {
    /// Full cause chain of the underlying failure.
    pub message: String,
}

impl LoadError {
    /// Flatten an `anyhow` chain into a displayable message.
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        Self {
            message: format!("{err:#}"),
        }
    }
}

/// Failures raised while building the modeling or prediction views.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ViewError {
    /// Returned when the target column is not in the dataset.
    #[error("column '{column}' not found")]
    ColumnMissing {
        /// Exact name that was looked up.
        column: String,
    },

    /// Returned when the feature columns do not line up with the prediction inputs.
    #[error("feature columns {found:?} do not match the expected order {expected:?}")]
    FeatureLayout {
        /// Configured feature order.
        expected: Vec<String>,
        /// Feature columns present in the dataset.
        found: Vec<String>,
    },

    /// Returned when a feature or target cell is empty or not a number.
    #[error("column '{column}' has a non-numeric value at row {row}")]
    NonNumericCell {
        /// Offending column.
        column: String,
        /// Zero-based data row.
        row: usize,
    },

    /// Returned when the dataset is too small for the requested fit.
    #[error("dataset has {rows} rows, at least {needed} required")]
    TooFewRows {
        /// Rows available.
        rows: usize,
        /// Rows required.
        needed: usize,
    },

    /// Returned when the least-squares solve itself fails.
    #[error("least-squares solve failed: {reason}")]
    Solver {
        /// Reason reported by the linear algebra backend.
        reason: String,
    },
}
