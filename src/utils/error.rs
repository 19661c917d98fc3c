use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NumeraError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid date '{value}': expected a real calendar date in DD/MM/YYYY format")]
    InvalidDate { value: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Analysis generation failed: {message}")]
    GenerationError { message: String },

    #[error("Rate limit reached ({scope}), resets at {resets_at}")]
    RateLimited {
        scope: String,
        resets_at: DateTime<Utc>,
    },
}

pub type Result<T> = std::result::Result<T, NumeraError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Network,
    Generation,
    Throttling,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl NumeraError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            NumeraError::ApiError(_) => ErrorCategory::Network,
            NumeraError::IoError(_) => ErrorCategory::Internal,
            NumeraError::SerializationError(_) => ErrorCategory::Generation,
            NumeraError::ConfigValidationError { .. }
            | NumeraError::InvalidConfigValueError { .. }
            | NumeraError::MissingConfigError { .. } => ErrorCategory::Configuration,
            NumeraError::InvalidDate { .. } | NumeraError::ValidationError { .. } => {
                ErrorCategory::Input
            }
            NumeraError::GenerationError { .. } => ErrorCategory::Generation,
            NumeraError::RateLimited { .. } => ErrorCategory::Throttling,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            NumeraError::InvalidDate { .. } | NumeraError::ValidationError { .. } => {
                ErrorSeverity::Low
            }
            NumeraError::RateLimited { .. } => ErrorSeverity::Medium,
            NumeraError::ApiError(_)
            | NumeraError::GenerationError { .. }
            | NumeraError::SerializationError(_) => ErrorSeverity::High,
            NumeraError::ConfigValidationError { .. }
            | NumeraError::InvalidConfigValueError { .. }
            | NumeraError::MissingConfigError { .. }
            | NumeraError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            NumeraError::ApiError(_) => {
                "Could not reach the analysis service. Check your network connection.".to_string()
            }
            NumeraError::InvalidDate { value } => {
                format!("'{}' is not a valid birth date. Use DD/MM/YYYY.", value)
            }
            NumeraError::ValidationError { message } => message.clone(),
            NumeraError::RateLimited { scope, .. } => {
                format!("Usage limit reached ({}). Please try again later.", scope)
            }
            NumeraError::MissingConfigError { field } => {
                format!("Missing configuration: {}", field)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self.category() {
            ErrorCategory::Input => {
                "Check the submitted name and birth date, then retry.".to_string()
            }
            ErrorCategory::Configuration => {
                "Review the configuration file and environment variables (OPENAI_API_KEY in particular).".to_string()
            }
            ErrorCategory::Network => {
                "Verify connectivity to the generation endpoint and retry.".to_string()
            }
            ErrorCategory::Generation => {
                "Retry the study; the generation service returned an unusable response.".to_string()
            }
            ErrorCategory::Throttling => "Wait for the limit window to reset.".to_string(),
            ErrorCategory::Internal => "Inspect the logs for details.".to_string(),
        }
    }
}
