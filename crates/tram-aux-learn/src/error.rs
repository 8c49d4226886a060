//! Error type of the learning crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while training, persisting or using the savings model.
#[derive(Debug, Error)]
pub enum Error {
    /// No model artifact was found, the model has to be trained first.
    #[error("model not found at {}: train the model first", .0.display())]
    MissingModel(PathBuf),

    /// The dataset has too few rows with a defined target.
    #[error("not enough usable rows to train: {0}")]
    EmptyDataset(String),

    /// A feature vector has an unexpected length.
    #[error("expected {expected} features, got {found}")]
    FeatureMismatch {
        /// Number of features the model was fitted on.
        expected: usize,
        /// Number of features provided.
        found: usize,
    },

    /// The feature source has no value for a column of the transform.
    #[error("missing value of feature `{0}`")]
    MissingFeature(String),

    /// The model is used before being fitted.
    #[error("model is not fitted")]
    NotFitted,

    /// The learner failed to fit or predict.
    #[error("learner failure: {0}")]
    Learner(String),

    /// Failure while evaluating the predictions.
    #[error(transparent)]
    Linfa(#[from] linfa::Error),

    /// Training settings are invalid.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Failure of the energy model or the dataset I/O.
    #[error(transparent)]
    Energy(#[from] tram_aux_energy::Error),

    /// File system failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Malformed model artifact.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Malformed YAML config.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
