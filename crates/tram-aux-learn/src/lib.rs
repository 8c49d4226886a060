//! Learning the savings of the sensor policy from trip conditions.
//!
//! The pipeline has two independent stages:
//!
//! - a declarative [`FeatureTransform`](features::FeatureTransform) turning trip conditions into
//!   a numeric feature vector (one-hot encoding of categorical columns, passthrough of numeric ones),
//! - a learner implementing [`Regressor`](regressor::Regressor), by default a random forest of
//!   regression trees backed by `smartcore`.
//!
//! Samples, the holdout split and the regression metrics use `linfa` datasets over `ndarray`.
//!
//! The fitted pipeline is persisted as a [`SavingsModel`](model::SavingsModel) and used by the
//! [`Predictor`](predictor::Predictor), which reports the learned prediction next to the exact value
//! computed by the energy model.

#![warn(missing_docs)]

pub mod error;
pub mod features;
pub mod forest;
pub mod importance;
pub mod metrics;
pub mod model;
pub mod predictor;
pub mod regressor;
pub mod trainer;

pub use error::{Error, Result};
pub use features::{FeatureTransform, TripFeatures};
pub use forest::{ForestConfig, MaxFeatures, RandomForest};
pub use metrics::RegressionMetrics;
pub use model::SavingsModel;
pub use predictor::{Predictor, SavingsComparison};
pub use regressor::{Regressor, Samples};
pub use trainer::{Trainer, TrainingConfig, TrainingReport};
