use nalgebra::{DMatrix, DVector};

use crate::data::model::{CellValue, Dataset};
use crate::error::ViewError;

// ---------------------------------------------------------------------------
// Feature matrix / target vector
// ---------------------------------------------------------------------------

/// Numeric feature matrix and target vector derived from a dataset.
#[derive(Debug, Clone)]
pub struct Design {
    /// Feature column names, in dataset order (target removed).
    pub feature_names: Vec<String>,
    /// rows × features
    pub x: DMatrix<f64>,
    pub y: DVector<f64>,
}

/// Names of every column except `target`, keeping their relative order.
pub fn feature_names(dataset: &Dataset, target: &str) -> Result<Vec<String>, ViewError> {
    if !dataset.has_column(target) {
        return Err(ViewError::ColumnMissing {
            column: target.to_string(),
        });
    }
    Ok(dataset
        .column_names()
        .into_iter()
        .filter(|name| *name != target)
        .map(str::to_string)
        .collect())
}

/// Regression view of a cell: numbers as-is, booleans as 0/1.
fn regressor_value(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Bool(b) => Some(f64::from(u8::from(*b))),
        other => other.as_f64(),
    }
}

impl Design {
    /// Split `dataset` into features and the `target` column. Every cell used
    /// must be a finite number.
    pub fn from_dataset(dataset: &Dataset, target: &str) -> Result<Self, ViewError> {
        let feature_names = feature_names(dataset, target)?;
        let n = dataset.len();

        let numeric = |name: &str| -> Result<Vec<f64>, ViewError> {
            let column = dataset.column(name).ok_or_else(|| ViewError::ColumnMissing {
                column: name.to_string(),
            })?;
            column
                .values
                .iter()
                .enumerate()
                .map(|(row, cell)| {
                    regressor_value(cell)
                        .filter(|v| v.is_finite())
                        .ok_or_else(|| ViewError::NonNumericCell {
                            column: name.to_string(),
                            row,
                        })
                })
                .collect()
        };

        let y = DVector::from_vec(numeric(target)?);
        let columns = feature_names
            .iter()
            .map(|name| numeric(name))
            .collect::<Result<Vec<_>, _>>()?;
        let x = DMatrix::from_fn(n, columns.len(), |r, c| columns[c][r]);

        Ok(Self {
            feature_names,
            x,
            y,
        })
    }

    pub fn n_rows(&self) -> usize {
        self.x.nrows()
    }

    /// Features and targets restricted to `rows`, in the given order.
    pub fn select_rows(&self, rows: &[usize]) -> (DMatrix<f64>, DVector<f64>) {
        (self.x.select_rows(rows), self.y.select_rows(rows))
    }
}
