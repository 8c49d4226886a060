//! Random forest of regression trees.

use std::fmt;

use log::debug;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::{RandomForestRegressor, RandomForestRegressorParameters};
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::error::{Error, Result};
use crate::regressor::{Regressor, Samples};

type Forest = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Number of features examined at each split.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxFeatures {
    /// All features.
    All,
    /// Square root of the number of features.
    Sqrt,
    /// Binary logarithm of the number of features.
    Log2,
    /// Fixed number of features.
    Count(usize),
}

impl MaxFeatures {
    /// Resolves the number of examined features for the given total, at least one.
    pub fn resolve(&self, n_features: usize) -> usize {
        let count = match self {
            MaxFeatures::All => n_features,
            MaxFeatures::Sqrt => (n_features as f64).sqrt() as usize,
            MaxFeatures::Log2 => (n_features as f64).log2() as usize,
            MaxFeatures::Count(count) => *count,
        };
        count.clamp(1, n_features.max(1))
    }
}

/// Random forest settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestConfig {
    /// Number of trees.
    pub n_estimators: usize,
    /// Number of features examined at each split.
    pub max_features: MaxFeatures,
    /// Minimum number of samples in a leaf.
    pub min_samples_leaf: usize,
    /// Minimum number of samples in a node to be split.
    pub min_samples_split: usize,
    /// Maximum depth of the trees.
    pub max_depth: Option<u16>,
    /// Random generator seed.
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_estimators: 300,
            max_features: MaxFeatures::Sqrt,
            min_samples_leaf: 5,
            min_samples_split: 10,
            max_depth: None,
            seed: 42,
        }
    }
}

impl ForestConfig {
    /// Checks the settings.
    pub fn validate(&self) -> Result<()> {
        if self.n_estimators == 0 {
            return Err(Error::InvalidConfig("n_estimators must be positive".to_string()));
        }
        if self.min_samples_leaf == 0 {
            return Err(Error::InvalidConfig("min_samples_leaf must be positive".to_string()));
        }
        if self.min_samples_split < 2 {
            return Err(Error::InvalidConfig("min_samples_split must be at least 2".to_string()));
        }
        if let MaxFeatures::Count(0) = self.max_features {
            return Err(Error::InvalidConfig("max_features must be positive".to_string()));
        }
        if let Some(0) = self.max_depth {
            return Err(Error::InvalidConfig("max_depth must be positive".to_string()));
        }
        Ok(())
    }

    fn parameters(&self, n_features: usize) -> RandomForestRegressorParameters {
        let parameters = RandomForestRegressorParameters::default()
            .with_n_trees(self.n_estimators)
            .with_m(self.max_features.resolve(n_features))
            .with_min_samples_leaf(self.min_samples_leaf)
            .with_min_samples_split(self.min_samples_split)
            .with_seed(self.seed);
        match self.max_depth {
            Some(depth) => parameters.with_max_depth(depth),
            None => parameters,
        }
    }
}

/// Ensemble of bootstrapped regression trees predicting the mean of their predictions.
#[derive(Serialize, Deserialize)]
pub struct RandomForest {
    config: ForestConfig,
    n_features: usize,
    forest: Option<Forest>,
}

impl RandomForest {
    /// Creates an unfitted forest.
    pub fn new(config: ForestConfig) -> Self {
        Self {
            config,
            n_features: 0,
            forest: None,
        }
    }

    /// Returns the settings.
    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    /// Checks whether the forest is fitted.
    pub fn is_fitted(&self) -> bool {
        self.forest.is_some()
    }
}

impl fmt::Debug for RandomForest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomForest")
            .field("config", &self.config)
            .field("n_features", &self.n_features)
            .field("fitted", &self.is_fitted())
            .finish()
    }
}

fn dense_matrix(records: &Array2<f64>) -> DenseMatrix<f64> {
    let rows: Vec<Vec<f64>> = records.outer_iter().map(|row| row.to_vec()).collect();
    DenseMatrix::from_2d_vec(&rows)
}

impl Regressor for RandomForest {
    fn fit(&mut self, samples: &Samples) -> Result<()> {
        self.config.validate()?;
        let (n_rows, n_features) = samples.records.dim();
        if n_rows == 0 || n_features == 0 {
            return Err(Error::EmptyDataset("no rows to fit".to_string()));
        }
        if samples.targets.len() != n_rows {
            return Err(Error::EmptyDataset(format!(
                "{} rows but {} targets",
                n_rows,
                samples.targets.len()
            )));
        }

        let x = dense_matrix(&samples.records);
        let y = samples.targets.to_vec();
        let forest = RandomForestRegressor::fit(&x, &y, self.config.parameters(n_features))
            .map_err(|e| Error::Learner(e.to_string()))?;
        debug!(
            "Fitted {} trees on {} rows with {} features",
            self.config.n_estimators, n_rows, n_features
        );

        self.n_features = n_features;
        self.forest = Some(forest);
        Ok(())
    }

    fn predict(&self, records: &Array2<f64>) -> Result<Array1<f64>> {
        let forest = self.forest.as_ref().ok_or(Error::NotFitted)?;
        if records.ncols() != self.n_features {
            return Err(Error::FeatureMismatch {
                expected: self.n_features,
                found: records.ncols(),
            });
        }
        if records.nrows() == 0 {
            return Ok(Array1::zeros(0));
        }
        let predictions = forest
            .predict(&dense_matrix(records))
            .map_err(|e| Error::Learner(e.to_string()))?;
        Ok(Array1::from_vec(predictions))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use linfa::DatasetBase;
    use ndarray::{array, Array1, Array2};

    use super::*;

    fn small_config(seed: u64) -> ForestConfig {
        ForestConfig {
            n_estimators: 25,
            max_features: MaxFeatures::All,
            min_samples_leaf: 1,
            min_samples_split: 2,
            seed,
            ..Default::default()
        }
    }

    fn linear_samples() -> Samples {
        let records = Array2::from_shape_fn((200, 3), |(i, j)| match j {
            0 => (i % 20) as f64,
            1 => (i / 20) as f64,
            _ => 1.,
        });
        let targets: Array1<f64> = records.outer_iter().map(|row| 3. * row[0] + 0.1 * row[1]).collect();
        DatasetBase::new(records, targets)
    }

    #[test]
    fn max_features() {
        assert_eq!(MaxFeatures::All.resolve(9), 9);
        assert_eq!(MaxFeatures::Sqrt.resolve(9), 3);
        assert_eq!(MaxFeatures::Log2.resolve(9), 3);
        assert_eq!(MaxFeatures::Count(20).resolve(9), 9);
        assert_eq!(MaxFeatures::Sqrt.resolve(1), 1);
    }

    #[test]
    fn fits_and_predicts() {
        let mut forest = RandomForest::new(small_config(42));
        assert!(!forest.is_fitted());
        forest.fit(&linear_samples()).unwrap();
        assert!(forest.is_fitted());
        assert_eq!(forest.config().n_estimators, 25);

        let predictions = forest.predict(&array![[10., 5., 1.], [2., 0., 1.]]).unwrap();
        assert_abs_diff_eq!(predictions[0], 30.5, epsilon = 3.);
        assert_abs_diff_eq!(predictions[1], 6., epsilon = 3.);
    }

    #[test]
    fn same_seed_same_forest() {
        let samples = linear_samples();
        let mut first = RandomForest::new(small_config(7));
        let mut second = RandomForest::new(small_config(7));
        first.fit(&samples).unwrap();
        second.fit(&samples).unwrap();
        assert_eq!(
            first.predict(&samples.records).unwrap(),
            second.predict(&samples.records).unwrap()
        );
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn rejects_bad_input() {
        let mut forest = RandomForest::new(small_config(1));
        let empty = DatasetBase::new(Array2::<f64>::zeros((0, 2)), Array1::<f64>::zeros(0));
        assert!(matches!(forest.fit(&empty), Err(Error::EmptyDataset(_))));
        assert!(matches!(forest.predict(&array![[1.]]), Err(Error::NotFitted)));

        let ragged = DatasetBase::new(array![[1., 2.], [2., 3.]], array![1.]);
        assert!(matches!(forest.fit(&ragged), Err(Error::EmptyDataset(_))));

        forest.fit(&DatasetBase::new(array![[1., 2.], [2., 3.], [3., 5.]], array![1., 2., 3.])).unwrap();
        assert!(matches!(
            forest.predict(&array![[1.]]),
            Err(Error::FeatureMismatch { expected: 2, found: 1 })
        ));

        let mut forest = RandomForest::new(ForestConfig {
            n_estimators: 0,
            ..Default::default()
        });
        assert!(matches!(forest.fit(&linear_samples()), Err(Error::InvalidConfig(_))));
    }
}
