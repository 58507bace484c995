use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid weights: {reason}")]
    InvalidWeights { reason: &'static str },

    #[error("Stage '{stage}' requires {what} to be generated first")]
    MissingInput {
        stage: &'static str,
        what: &'static str,
    },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type GenResult<T> = Result<T, GenError>;
