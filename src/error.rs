//! Error types for the order board service

use thiserror::Error;

/// Order board service errors
#[derive(Error, Debug)]
pub enum OrderBoardError {
    #[error("Invalid order: {0}")]
    Validation(String),

    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Metrics error: {0}")]
    Metrics(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for OrderBoardError {
    fn from(err: serde_json::Error) -> Self {
        OrderBoardError::SerializationError(err.to_string())
    }
}

impl From<config::ConfigError> for OrderBoardError {
    fn from(err: config::ConfigError) -> Self {
        OrderBoardError::ConfigError(err.to_string())
    }
}

impl From<prometheus::Error> for OrderBoardError {
    fn from(err: prometheus::Error) -> Self {
        OrderBoardError::Metrics(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OrderBoardError>;
