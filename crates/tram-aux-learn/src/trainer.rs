//! Training of the savings model.

use std::fs::File;
use std::path::Path;

use linfa::DatasetBase;
use log::{debug, info, warn};
use ndarray::Array1;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

use tram_aux_energy::{DatasetRecord, EnergyModelConfig};

use crate::error::{Error, Result};
use crate::features::{FeatureTransform, TripFeatures};
use crate::forest::{ForestConfig, RandomForest};
use crate::importance::permutation_importances;
use crate::metrics::RegressionMetrics;
use crate::model::SavingsModel;
use crate::regressor::Regressor;

/// Training settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Share of the usable rows held out for evaluation.
    pub test_fraction: f64,
    /// Seed of the holdout shuffle.
    pub split_seed: u64,
    /// Random forest settings.
    pub forest: ForestConfig,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            split_seed: 42,
            forest: ForestConfig::default(),
        }
    }
}

impl TrainingConfig {
    /// Checks the settings.
    pub fn validate(&self) -> Result<()> {
        if !(self.test_fraction > 0. && self.test_fraction < 1.) {
            return Err(Error::InvalidConfig(format!(
                "test_fraction must be in (0, 1), got {}",
                self.test_fraction
            )));
        }
        self.forest.validate()
    }

    /// Loads the settings from a YAML file.
    pub fn from_yaml(path: &Path) -> Result<Self> {
        let config: Self = serde_yaml::from_reader(File::open(path)?)?;
        config.validate()?;
        Ok(config)
    }
}

/// Outcome of a training run.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainingReport {
    /// Holdout metrics.
    pub metrics: RegressionMetrics,
    /// Number of rows used for fitting.
    pub train_rows: usize,
    /// Number of held out rows.
    pub test_rows: usize,
    /// Number of rows without a usable target.
    pub skipped_rows: usize,
    /// Feature names with their importances, most important first.
    pub feature_importances: Vec<(String, f64)>,
}

/// Fits the savings model on dataset records and evaluates it on a holdout part.
pub struct Trainer {
    config: TrainingConfig,
    transform: FeatureTransform,
}

impl Trainer {
    /// Creates a trainer using the trip feature transform.
    pub fn new(config: TrainingConfig) -> Self {
        Self::with_transform(config, FeatureTransform::trip_features())
    }

    /// Creates a trainer using a custom feature transform.
    pub fn with_transform(config: TrainingConfig, transform: FeatureTransform) -> Self {
        Self { config, transform }
    }

    /// Trains the model on the records.
    ///
    /// `energy` is the energy model config the records were generated with, it is stored in the
    /// model so predictions can be compared with the exact values of the same model.
    pub fn train(&self, records: &[DatasetRecord], energy: &EnergyModelConfig) -> Result<(SavingsModel, TrainingReport)> {
        self.config.validate()?;

        let usable: Vec<&DatasetRecord> = records
            .iter()
            .filter(|r| r.pct_savings.map_or(false, f64::is_finite))
            .collect();
        let skipped_rows = records.len() - usable.len();
        if skipped_rows > 0 {
            debug!("Skipped {} rows with undefined savings", skipped_rows);
        }
        if usable.len() < 2 {
            return Err(Error::EmptyDataset(format!(
                "{} of {} rows have defined savings",
                usable.len(),
                records.len()
            )));
        }

        let capacity = usable[0].capacity;
        if usable.iter().any(|r| r.capacity != capacity) {
            warn!("Dataset mixes vehicle capacities, using {} for predictions", capacity);
        }

        let features: Vec<TripFeatures> = usable.iter().map(|r| TripFeatures::from(*r)).collect();
        let x = self.transform.matrix(&features)?;
        let y: Array1<f64> = usable.iter().filter_map(|r| r.pct_savings).collect();
        let (train, test) = DatasetBase::new(x, y)
            .shuffle(&mut Pcg64::seed_from_u64(self.config.split_seed))
            .split_with_ratio((1. - self.config.test_fraction) as f32);
        if train.targets.is_empty() || test.targets.is_empty() {
            return Err(Error::EmptyDataset(format!(
                "{} usable rows cannot be split with test fraction {}",
                usable.len(),
                self.config.test_fraction
            )));
        }
        info!(
            "Training on {} rows, holding out {} rows",
            train.targets.len(),
            test.targets.len()
        );

        let mut forest = RandomForest::new(self.config.forest.clone());
        forest.fit(&train)?;
        let metrics = RegressionMetrics::compute(&test.targets, &forest.predict(&test.records)?)?;
        info!(
            "Holdout MAE = {:.3}, RMSE = {:.3}, R2 = {:.3}",
            metrics.mae, metrics.rmse, metrics.r2
        );

        let importances = permutation_importances(&forest, &test, self.config.split_seed)?;
        let mut feature_importances: Vec<(String, f64)> =
            self.transform.output_names().into_iter().zip(importances).collect();
        feature_importances.sort_by(|a, b| b.1.total_cmp(&a.1));

        let report = TrainingReport {
            metrics,
            train_rows: train.targets.len(),
            test_rows: test.targets.len(),
            skipped_rows,
            feature_importances,
        };
        let model = SavingsModel::new(capacity, energy.clone(), self.transform.clone(), forest);
        Ok((model, report))
    }
}
