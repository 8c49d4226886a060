#![allow(dead_code)]

use tram_aux_energy::{generate_dataset, DatasetRecord, SimulationConfig};
use tram_aux_learn::{ForestConfig, TrainingConfig};

pub fn records(trips: usize, seed: u64) -> Vec<DatasetRecord> {
    let config = SimulationConfig {
        trips,
        seed,
        ..Default::default()
    };
    generate_dataset(&config).unwrap().records()
}

pub fn training_config(n_estimators: usize) -> TrainingConfig {
    TrainingConfig {
        forest: ForestConfig {
            n_estimators,
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir()
        .join(format!("tram-aux-learn-{}", std::process::id()))
        .join(name)
}
