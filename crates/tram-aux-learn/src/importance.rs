//! Permutation feature importances.

use linfa::metrics::SingleTargetRegression;
use ndarray::Axis;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg64;

use crate::error::{Error, Result};
use crate::regressor::{Regressor, Samples};

/// Computes the importance of each feature as the increase of the mean squared error after
/// shuffling its column.
///
/// Increases below zero count as zero. Importances are normalized to sum to 1, or are all zero if
/// no feature affects the error.
pub fn permutation_importances<M: Regressor + ?Sized>(model: &M, samples: &Samples, seed: u64) -> Result<Vec<f64>> {
    if samples.records.nrows() == 0 {
        return Err(Error::EmptyDataset("no rows to permute".to_string()));
    }
    let baseline = model.predict(&samples.records)?.mean_squared_error(&samples.targets)?;

    let mut rng = Pcg64::seed_from_u64(seed);
    let mut increases = Vec::with_capacity(samples.records.ncols());
    for (i, column) in samples.records.axis_iter(Axis(1)).enumerate() {
        let mut values = column.to_vec();
        values.shuffle(&mut rng);
        let mut permuted = samples.records.clone();
        permuted
            .column_mut(i)
            .iter_mut()
            .zip(values)
            .for_each(|(cell, value)| *cell = value);
        let error = model.predict(&permuted)?.mean_squared_error(&samples.targets)?;
        increases.push((error - baseline).max(0.));
    }

    let total: f64 = increases.iter().sum();
    if total > 0. {
        increases.iter_mut().for_each(|x| *x /= total);
    }
    Ok(increases)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use linfa::DatasetBase;
    use ndarray::{Array1, Array2};

    use super::*;
    use crate::forest::{ForestConfig, MaxFeatures, RandomForest};

    #[test]
    fn informative_feature_dominates() {
        let records = Array2::from_shape_fn((150, 3), |(i, j)| match j {
            0 => (i % 15) as f64,
            1 => ((i * 7) % 11) as f64,
            _ => 2.,
        });
        let targets: Array1<f64> = records.column(0).mapv(|x| 4. * x);
        let samples = DatasetBase::new(records, targets);

        let mut forest = RandomForest::new(ForestConfig {
            n_estimators: 20,
            max_features: MaxFeatures::All,
            min_samples_leaf: 1,
            min_samples_split: 2,
            ..Default::default()
        });
        forest.fit(&samples).unwrap();

        let importances = permutation_importances(&forest, &samples, 3).unwrap();
        assert_eq!(importances.len(), 3);
        assert_abs_diff_eq!(importances.iter().sum::<f64>(), 1., epsilon = 1e-9);
        assert!(importances[0] > importances[1]);
        assert_eq!(importances[2], 0.);
        assert_eq!(importances, permutation_importances(&forest, &samples, 3).unwrap());
    }

    #[test]
    fn unfitted_model() {
        let samples = DatasetBase::new(Array2::zeros((2, 1)), Array1::zeros(2));
        let forest = RandomForest::new(ForestConfig::default());
        assert!(matches!(
            permutation_importances(&forest, &samples, 0),
            Err(Error::NotFitted)
        ));
    }
}
