//! Simulation config.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::energy::EnergyModelConfig;
use crate::error::{Error, Result};
use crate::sampler::SamplerConfig;

/// Dataset generation settings. Implements `Default`, so a YAML file only needs to list
/// the fields that differ from the reference setup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Random generator seed.
    pub seed: u64,
    /// Number of generated trips.
    pub trips: usize,
    /// Vehicle capacity (passengers).
    pub capacity: u32,
    /// Trip condition distributions.
    pub sampler: SamplerConfig,
    /// Energy model coefficients.
    pub energy: EnergyModelConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 7,
            trips: 5000,
            capacity: 200,
            sampler: SamplerConfig::default(),
            energy: EnergyModelConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Checks the config values which are not checked when building the sampler.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::InvalidConfig("capacity must be positive".to_string()));
        }
        self.energy.validate()
    }

    /// Loads the config from a YAML file.
    pub fn from_yaml(path: &Path) -> Result<Self> {
        let config: Self = serde_yaml::from_reader(File::open(path)?)?;
        config.validate()?;
        Ok(config)
    }
}
