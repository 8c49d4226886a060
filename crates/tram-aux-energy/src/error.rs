//! Error type of the energy model crate.

use thiserror::Error;

/// Errors raised while building trips, loading configs or reading and writing datasets.
#[derive(Debug, Error)]
pub enum Error {
    /// The season name is not one of `winter`, `spring`, `summer`, `autumn`.
    #[error("unknown season `{0}` (expected one of winter, spring, summer, autumn)")]
    UnknownSeason(String),

    /// Trip conditions are outside of the domain accepted by the energy model.
    #[error("invalid trip conditions: {0}")]
    InvalidTrip(String),

    /// Configuration values are inconsistent or physically meaningless.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// File system failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Malformed dataset table.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Malformed YAML config.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
