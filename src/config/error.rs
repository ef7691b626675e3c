//! Configuration Error Types

use thiserror::Error;

/// Configuration-related errors with detailed context
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// A source could not be read or parsed
    #[error("Failed to load configuration from '{origin}': {error}")]
    LoadError { origin: String, error: String },

    /// Merged sources do not match the expected shape
    #[error("Failed to deserialize configuration: {error}")]
    DeserializationError { error: String },

    /// Invalid configuration value
    #[error("Invalid value '{value}' for field '{field}': {context}")]
    InvalidValue {
        field: String,
        value: String,
        context: String,
    },
}

impl ConfigurationError {
    pub fn load_error(origin: impl Into<String>, error: impl std::fmt::Display) -> Self {
        Self::LoadError {
            origin: origin.into(),
            error: error.to_string(),
        }
    }

    pub fn deserialization_error(error: impl std::fmt::Display) -> Self {
        Self::DeserializationError {
            error: error.to_string(),
        }
    }

    pub fn invalid_value(field: impl Into<String>, value: impl Into<String>, context: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            context: context.into(),
        }
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigurationError>;
