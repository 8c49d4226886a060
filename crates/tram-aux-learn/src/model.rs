//! Persisted savings model.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use tram_aux_energy::EnergyModelConfig;

use crate::error::{Error, Result};
use crate::features::{FeatureSource, FeatureTransform};
use crate::forest::RandomForest;
use crate::regressor::Regressor;

/// Fitted pipeline together with the setup of the data it was trained on.
#[derive(Debug, Serialize, Deserialize)]
pub struct SavingsModel {
    capacity: u32,
    energy: EnergyModelConfig,
    transform: FeatureTransform,
    forest: RandomForest,
}

impl SavingsModel {
    /// Creates a model from its parts.
    pub fn new(capacity: u32, energy: EnergyModelConfig, transform: FeatureTransform, forest: RandomForest) -> Self {
        Self {
            capacity,
            energy,
            transform,
            forest,
        }
    }

    /// Vehicle capacity of the training trips.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Energy model config of the training trips.
    pub fn energy(&self) -> &EnergyModelConfig {
        &self.energy
    }

    /// Fitted forest.
    pub fn forest(&self) -> &RandomForest {
        &self.forest
    }

    /// Predicts the savings percentage of a trip.
    pub fn predict<S: FeatureSource>(&self, source: &S) -> Result<f64> {
        let features = self.transform.matrix(std::slice::from_ref(source))?;
        let predictions = self.forest.predict(&features)?;
        predictions.first().copied().ok_or(Error::NotFitted)
    }

    /// Writes the model as JSON, creating the parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        serde_json::to_writer(BufWriter::new(File::create(path)?), self)?;
        info!("Saved model to {}", path.display());
        Ok(())
    }

    /// Reads a model written by [`SavingsModel::save`].
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::MissingModel(path.to_path_buf()));
        }
        let model: Self = serde_json::from_reader(BufReader::new(File::open(path)?))?;
        if !model.forest.is_fitted() {
            return Err(Error::NotFitted);
        }
        Ok(model)
    }
}
