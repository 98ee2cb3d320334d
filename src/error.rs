//! Error handling for the ATS engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtsEngineError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Keyword catalog error: {0}")]
    Catalog(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AtsEngineError>;
