//! Regression quality metrics.

use linfa::metrics::SingleTargetRegression;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Holdout metrics of a regression model.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegressionMetrics {
    /// Mean absolute error.
    pub mae: f64,
    /// Root mean squared error.
    pub rmse: f64,
    /// Coefficient of determination.
    pub r2: f64,
}

impl RegressionMetrics {
    /// Computes the metrics of the predictions against the actual values.
    ///
    /// If the actual values have zero variance, R² is 1 for perfect predictions and 0 otherwise.
    pub fn compute(actual: &Array1<f64>, predicted: &Array1<f64>) -> Result<Self> {
        if actual.is_empty() {
            return Err(Error::EmptyDataset("no rows to evaluate".to_string()));
        }
        if actual.len() != predicted.len() {
            return Err(Error::EmptyDataset(format!(
                "{} actual values but {} predictions",
                actual.len(),
                predicted.len()
            )));
        }
        let mae = predicted.mean_absolute_error(actual)?;
        let mse = predicted.mean_squared_error(actual)?;
        let constant = actual.iter().all(|a| *a == actual[0]);
        let r2 = match constant {
            true if mse == 0. => 1.,
            true => 0.,
            false => predicted.r2(actual)?,
        };
        Ok(Self {
            mae,
            rmse: mse.sqrt(),
            r2,
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1};

    use super::*;

    #[test]
    fn known_values() {
        let metrics = RegressionMetrics::compute(&array![1., 2., 3., 4.], &array![2., 3., 4., 5.]).unwrap();
        assert_abs_diff_eq!(metrics.mae, 1., epsilon = 1e-12);
        assert_abs_diff_eq!(metrics.rmse, 1., epsilon = 1e-12);
        // squared error sum 4, variance sum 5
        assert_abs_diff_eq!(metrics.r2, 0.2, epsilon = 1e-9);
    }

    #[test]
    fn perfect_and_constant() {
        let metrics = RegressionMetrics::compute(&array![2., 5.], &array![2., 5.]).unwrap();
        assert_abs_diff_eq!(metrics.mae, 0.);
        assert_abs_diff_eq!(metrics.rmse, 0.);
        assert_abs_diff_eq!(metrics.r2, 1., epsilon = 1e-9);
        assert_eq!(RegressionMetrics::compute(&array![3., 3.], &array![3., 3.]).unwrap().r2, 1.);
        assert_eq!(RegressionMetrics::compute(&array![3., 3.], &array![3., 4.]).unwrap().r2, 0.);
        assert!(RegressionMetrics::compute(&Array1::zeros(0), &Array1::zeros(0)).is_err());
        assert!(RegressionMetrics::compute(&array![1.], &Array1::zeros(0)).is_err());
    }
}
