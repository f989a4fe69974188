//! Core error types for goaltrack-core.
//!
//! This module defines the error hierarchy using thiserror. Store and oracle
//! failures are kept apart because they are handled differently: a failed
//! store call is surfaced to the caller, a failed oracle call is recovered
//! by the deterministic ranking fallback.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for goaltrack-core.
///
/// Planning only ever fails on the store or on a bad request; oracle and
/// configuration failures are handled where they occur.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Task store errors
    #[error("Task store error: {0}")]
    Store(#[from] StoreError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Errors raised by a task store (Notion, local file).
#[derive(Error, Debug)]
pub enum StoreError {
    /// Credentials or location missing
    #[error("{store} is not configured: {message}")]
    NotConfigured { store: String, message: String },

    /// The credential was rejected
    #[error("Invalid API token. Check your integration token.")]
    Unauthorized,

    /// Database missing or not shared with the integration
    #[error("Database not found: {message}. Check the database ID and make sure the database is shared with the integration.")]
    NotFound { message: String },

    /// Provider returned an error response
    #[error("Error {status}: {message}")]
    Api { status: u16, message: String },

    /// Transport failure
    #[error("Request error: {0}")]
    Request(String),

    /// The bounded request timeout elapsed
    #[error("Request timed out")]
    Timeout,

    /// Response could not be decoded
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// Local file store IO failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            StoreError::Timeout
        } else if err.is_decode() {
            StoreError::Malformed(err.to_string())
        } else {
            StoreError::Request(err.to_string())
        }
    }
}

/// Errors raised by a ranking oracle.
#[derive(Error, Debug)]
pub enum OracleError {
    /// No oracle is available (missing key or disabled)
    #[error("Ranking oracle not configured: {0}")]
    NotConfigured(String),

    /// Transport failure
    #[error("Request error: {0}")]
    Request(String),

    /// The bounded request timeout elapsed
    #[error("Request timed out")]
    Timeout,

    /// Provider returned an error response
    #[error("Error {status}: {message}")]
    Api { status: u16, message: String },

    /// Provider answered without any text
    #[error("Empty response from ranking oracle")]
    EmptyResponse,
}

impl From<reqwest::Error> for OracleError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            OracleError::Timeout
        } else {
            OracleError::Request(err.to_string())
        }
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown dot-path key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Home/config directory unavailable
    #[error("Config directory unavailable: {0}")]
    DirUnavailable(String),
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Invalid clock range
    #[error("Invalid time range for '{field}': end ({end}) must be after start ({start})")]
    InvalidTimeRange {
        field: String,
        start: chrono::NaiveTime,
        end: chrono::NaiveTime,
    },

    /// Numeric value outside its allowed range
    #[error("Invalid value for '{field}': {value} is outside {min}..={max}")]
    OutOfRange {
        field: String,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<ValidationError> for ConfigError {
    fn from(err: ValidationError) -> Self {
        let key = match &err {
            ValidationError::InvalidTimeRange { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidValue { field, .. } => field.clone(),
        };
        ConfigError::InvalidValue {
            key,
            message: err.to_string(),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_and_validation_errors_convert() {
        let err: CoreError = StoreError::Unauthorized.into();
        assert!(matches!(err, CoreError::Store(StoreError::Unauthorized)));
        assert!(err.to_string().starts_with("Task store error: Invalid API token"));

        let err: CoreError = ValidationError::InvalidValue {
            field: "activity".into(),
            message: "must not be empty".into(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Validation error: Invalid value for 'activity': must not be empty"
        );
    }

    #[test]
    fn validation_error_names_config_key() {
        let err: ConfigError = ValidationError::OutOfRange {
            field: "scheduling.default_duration".into(),
            value: 5,
            min: 15,
            max: 180,
        }
        .into();
        match err {
            ConfigError::InvalidValue { key, message } => {
                assert_eq!(key, "scheduling.default_duration");
                assert!(message.contains("5 is outside 15..=180"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
