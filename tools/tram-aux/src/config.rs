use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use tram_aux_energy::SimulationConfig;
use tram_aux_learn::TrainingConfig;

use crate::error::Result;

/// Settings of all stages, every section may be omitted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub simulation: SimulationConfig,
    pub training: TrainingConfig,
}

impl ExperimentConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => serde_yaml::from_reader(File::open(path)?)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.simulation.validate()?;
        self.training.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_sections() {
        let config: ExperimentConfig =
            serde_yaml::from_str("simulation:\n  trips: 100\ntraining:\n  forest:\n    n_estimators: 50\n").unwrap();
        assert_eq!(config.simulation.trips, 100);
        assert_eq!(config.simulation.seed, 7);
        assert_eq!(config.training.forest.n_estimators, 50);
        assert_eq!(config.training.test_fraction, 0.2);
        assert!(config.validate().is_ok());
    }
}
