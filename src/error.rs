use thiserror::Error;
use uuid::Uuid;

/// Main error type for the planner
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid trip request: {0}")]
    InvalidRequest(String),

    #[error("Generation request failed: {0}")]
    Transport(String),

    #[error("Generation request timed out after {0}s")]
    Timeout(u64),

    #[error("Malformed generation response: {0}")]
    MalformedResponse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Travel plan not found: {0}")]
    PlanNotFound(Uuid),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PlannerError>;

impl PlannerError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PlannerError::Transport(_) | PlannerError::Timeout(_) | PlannerError::Io(_)
        )
    }

    /// Whether the generation workflow answers this error with the synthetic plan
    pub fn falls_back(&self) -> bool {
        matches!(
            self,
            PlannerError::Transport(_)
                | PlannerError::Timeout(_)
                | PlannerError::MalformedResponse(_)
                | PlannerError::Serialization(_)
                | PlannerError::Validation(_)
        )
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            PlannerError::Config(_) => "CONFIG_ERROR",
            PlannerError::InvalidRequest(_) => "INVALID_REQUEST",
            PlannerError::Transport(_) => "TRANSPORT_ERROR",
            PlannerError::Timeout(_) => "TIMEOUT_ERROR",
            PlannerError::MalformedResponse(_) => "MALFORMED_RESPONSE",
            PlannerError::Serialization(_) => "SERIALIZATION_ERROR",
            PlannerError::Validation(_) => "VALIDATION_ERROR",
            PlannerError::Catalog(_) => "CATALOG_ERROR",
            PlannerError::Io(_) => "IO_ERROR",
            PlannerError::PlanNotFound(_) => "PLAN_NOT_FOUND",
        }
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
                "retryable": self.is_retryable()
            }
        })
    }
}
