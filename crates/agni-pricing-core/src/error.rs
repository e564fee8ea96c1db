use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgniError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for AgniError {
    fn from(e: serde_json::Error) -> Self {
        AgniError::SerializationError(e.to_string())
    }
}

impl From<serde_yaml::Error> for AgniError {
    fn from(e: serde_yaml::Error) -> Self {
        AgniError::ConfigError(e.to_string())
    }
}
