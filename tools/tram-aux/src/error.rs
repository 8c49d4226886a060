use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Energy(#[from] tram_aux_energy::Error),

    #[error(transparent)]
    Learn(#[from] tram_aux_learn::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid answer `{answer}` to \"{question}\": {reason}")]
    InvalidInput {
        question: String,
        answer: String,
        reason: String,
    },

    #[error("input closed before {0} was entered")]
    InputClosed(String),
}

pub type Result<T> = std::result::Result<T, Error>;
