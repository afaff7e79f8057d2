use thiserror::Error;

#[derive(Debug, Error)]
pub enum FactoringError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for FactoringError {
    fn from(e: serde_json::Error) -> Self {
        FactoringError::SerializationError(e.to_string())
    }
}
