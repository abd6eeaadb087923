use thiserror::Error;

#[derive(Debug, Error)]
pub enum MortgageMixError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Rate fetch failed: {0}")]
    RateFetch(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for MortgageMixError {
    fn from(e: serde_json::Error) -> Self {
        MortgageMixError::SerializationError(e.to_string())
    }
}

#[cfg(feature = "fetch")]
impl From<reqwest::Error> for MortgageMixError {
    fn from(e: reqwest::Error) -> Self {
        MortgageMixError::RateFetch(e.to_string())
    }
}
