use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VitalsError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid sample: {0}")]
    InvalidSample(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
