//! Synthetic auxiliary energy model of a tram.
//!
//! Trips are sampled from statistical distributions of their conditions (season, hour, duration,
//! outside temperature, passengers) and evaluated by a deterministic energy model under two control
//! policies of the auxiliary subsystems (lighting, ventilation, HVAC):
//!
//! - the fixed policy draws constant or worst-case power regardless of conditions,
//! - the sensor policy scales power with occupancy, daylight and outside temperature.
//!
//! The resulting rows form a dataset which is written as a CSV table and used to train
//! a model predicting the savings of the sensor policy.

#![warn(missing_docs)]

pub mod config;
pub mod dataset;
pub mod energy;
pub mod error;
pub mod power;
pub mod sampler;
pub mod trip;

pub use config::SimulationConfig;
pub use dataset::{
    generate_dataset, load_records, read_records, Dataset, DatasetBuilder, DatasetRecord, DatasetRow, DatasetSummary,
};
pub use energy::{savings_pct, ControlPolicy, EnergyBreakdown, EnergyModel, EnergyModelConfig, TripEnergy};
pub use error::{Error, Result};
pub use sampler::{SamplerConfig, TripSampler};
pub use trip::{Season, TripConditions};
