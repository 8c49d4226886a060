//! Learner interface.

use linfa::DatasetBase;
use ndarray::{Array1, Array2};

use crate::error::Result;

/// Feature matrix with one target per row.
pub type Samples = DatasetBase<Array2<f64>, Array1<f64>>;

/// A regression learner mapping feature vectors to a numeric target.
pub trait Regressor {
    /// Fits the learner on the samples.
    fn fit(&mut self, samples: &Samples) -> Result<()>;

    /// Predicts the target of each row of the feature matrix.
    fn predict(&self, records: &Array2<f64>) -> Result<Array1<f64>>;
}
