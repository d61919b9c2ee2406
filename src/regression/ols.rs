use nalgebra::{DMatrix, DVector};

use crate::error::ViewError;

// ---------------------------------------------------------------------------
// Ordinary least squares
// ---------------------------------------------------------------------------

/// Linear model `y = x · coefficients + intercept` fitted by ordinary least squares.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegression {
    coefficients: DVector<f64>,
    intercept: f64,
}

impl LinearRegression {
    /// Fit on `x` (rows × features) and `y`.
    ///
    /// Features and target are centred so the intercept drops out of the
    /// solve; the centred system is solved through an SVD pseudo-inverse, so
    /// rank-deficient inputs still get the minimum-norm solution.
    pub fn fit(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<Self, ViewError> {
        let (n, p) = x.shape();
        if n == 0 || y.len() != n {
            return Err(ViewError::TooFewRows { rows: n, needed: 1 });
        }

        let y_mean = y.mean();
        if p == 0 {
            return Ok(Self {
                coefficients: DVector::zeros(0),
                intercept: y_mean,
            });
        }

        let x_mean = DVector::from_iterator(p, x.column_iter().map(|c| c.mean()));
        let mut xc = x.clone();
        for (j, mut col) in xc.column_iter_mut().enumerate() {
            col.add_scalar_mut(-x_mean[j]);
        }
        let yc = y.add_scalar(-y_mean);

        let svd = xc.svd(true, true);
        let max_sv = svd.singular_values.max();
        let eps = max_sv * f64::EPSILON * n.max(p) as f64;
        let coefficients = svd.solve(&yc, eps).map_err(|reason| ViewError::Solver {
            reason: reason.to_string(),
        })?;
        let intercept = y_mean - x_mean.dot(&coefficients);

        log::debug!("OLS fit on {n}x{p}: intercept {intercept}, max singular value {max_sv}");
        Ok(Self {
            coefficients,
            intercept,
        })
    }

    pub fn coefficients(&self) -> &[f64] {
        self.coefficients.as_slice()
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn predict(&self, x: &DMatrix<f64>) -> DVector<f64> {
        (x * &self.coefficients).add_scalar(self.intercept)
    }

    /// Predict a single row given in feature order.
    pub fn predict_row(&self, row: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(row)
                .map(|(c, v)| c * v)
                .sum::<f64>()
    }

    /// Coefficient of determination on `(x, y)`.
    pub fn score(&self, x: &DMatrix<f64>, y: &DVector<f64>) -> f64 {
        r2_score(y, &self.predict(x))
    }
}

/// `R² = 1 − SS_res / SS_tot`. A constant target scores 1.0 when predicted
/// exactly and 0.0 otherwise.
pub fn r2_score(y_true: &DVector<f64>, y_pred: &DVector<f64>) -> f64 {
    let mean = y_true.mean();
    let ss_tot: f64 = y_true.iter().map(|v| (v - mean).powi(2)).sum();
    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p).powi(2))
        .sum();
    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn recovers_exact_linear_relation() {
        // y = 1.5 + 2 a - 0.5 b
        let x = DMatrix::from_row_slice(5, 2, &[
            0.0, 1.0, //
            1.0, 3.0, //
            2.0, 2.0, //
            3.0, 7.0, //
            4.0, 5.0,
        ]);
        let y = DVector::from_iterator(5, x.row_iter().map(|r| 1.5 + 2.0 * r[0] - 0.5 * r[1]));
        let model = LinearRegression::fit(&x, &y).unwrap();
        assert_close(model.coefficients()[0], 2.0);
        assert_close(model.coefficients()[1], -0.5);
        assert_close(model.intercept(), 1.5);
        assert_close(model.predict_row(&[10.0, 2.0]), 20.5);
        assert_close(model.score(&x, &y), 1.0);
    }

    #[test]
    fn constant_feature_gets_zero_weight() {
        let x = DMatrix::from_row_slice(4, 2, &[1.0, 7.0, 2.0, 7.0, 3.0, 7.0, 4.0, 7.0]);
        let y = DVector::from_vec(vec![3.0, 5.0, 7.0, 9.0]);
        let model = LinearRegression::fit(&x, &y).unwrap();
        assert_close(model.coefficients()[0], 2.0);
        assert_close(model.coefficients()[1], 0.0);
        assert_close(model.intercept(), 1.0);
    }

    #[test]
    fn least_squares_on_noisy_line() {
        let x = DMatrix::from_column_slice(4, 1, &[0.0, 1.0, 2.0, 3.0]);
        let y = DVector::from_vec(vec![1.0, 2.0, 2.0, 4.0]);
        let model = LinearRegression::fit(&x, &y).unwrap();
        assert_close(model.coefficients()[0], 0.9);
        assert_close(model.intercept(), 0.9);
    }

    #[test]
    fn no_features_predicts_the_mean() {
        let x = DMatrix::<f64>::zeros(3, 0);
        let y = DVector::from_vec(vec![1.0, 2.0, 6.0]);
        let model = LinearRegression::fit(&x, &y).unwrap();
        assert!(model.coefficients().is_empty());
        assert_close(model.predict_row(&[]), 3.0);
    }

    #[test]
    fn r2_handles_constant_targets() {
        let y = DVector::from_vec(vec![2.0, 2.0]);
        assert_eq!(r2_score(&y, &y), 1.0);
        assert_eq!(r2_score(&y, &DVector::from_vec(vec![2.0, 3.0])), 0.0);
        let y = DVector::from_vec(vec![1.0, 2.0, 3.0]);
        assert_close(r2_score(&y, &DVector::from_vec(vec![2.0, 2.0, 2.0])), 0.0);
    }

    #[test]
    fn empty_input_is_rejected() {
        let x = DMatrix::<f64>::zeros(0, 2);
        let y = DVector::<f64>::zeros(0);
        assert!(matches!(
            LinearRegression::fit(&x, &y),
            Err(ViewError::TooFewRows { rows: 0, .. })
        ));
    }
}
