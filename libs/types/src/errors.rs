//! Error types for configuration validation and collaborator faults
//!
//! Configuration errors are reported per field so an authoring surface can
//! attach them to the offending input. Collaborator errors carry enough
//! context to be logged where they are swallowed or propagated.

use thiserror::Error;

/// Author-time problem with a single configuration field
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A required field was left blank
    #[error("Configuration field '{field}' is required")]
    MissingField { field: &'static str },

    /// Tolerance did not parse as an integer of at least 1
    #[error("Failures before allow must be a positive integer, got '{value}'")]
    InvalidTolerance { value: String },
}

impl ConfigurationError {
    /// Name of the configuration field the error belongs to
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field } => *field,
            Self::InvalidTolerance { .. } => "tolerance",
        }
    }
}

/// Every field error found while validating one handler configuration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid handler configuration: {}", summarize(.0))]
pub struct ConfigurationErrors(pub Vec<ConfigurationError>);

impl ConfigurationErrors {
    pub fn errors(&self) -> &[ConfigurationError] {
        &self.0
    }

    /// First error reported against `field`, if any
    pub fn for_field(&self, field: &str) -> Option<&ConfigurationError> {
        self.0.iter().find(|e| e.field() == field)
    }
}

fn summarize(errors: &[ConfigurationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Retry-state store failure
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Backing store could not be reached
    #[error("Retry state store unavailable: {reason}")]
    Unavailable { reason: String },

    /// Stored record could not be decoded
    #[error("Retry state for {key} is corrupted: {reason}")]
    Corrupted { key: String, reason: String },
}

/// Geolocation lookup failure
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeolocationError {
    /// Provider could not resolve the requester's address
    #[error("Country lookup failed: {reason}")]
    LookupFailed { reason: String },

    /// Request carried no usable network address
    #[error("No client address available for country lookup")]
    MissingAddress,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_attribution() {
        let missing = ConfigurationError::MissingField { field: "country_field" };
        assert_eq!(missing.field(), "country_field");
        assert!(missing.to_string().contains("country_field"));

        let tolerance = ConfigurationError::InvalidTolerance { value: "abc".to_string() };
        assert_eq!(tolerance.field(), "tolerance");
        assert!(tolerance.to_string().contains("'abc'"));
    }

    #[test]
    fn test_errors_summary() {
        let errors = ConfigurationErrors(vec![
            ConfigurationError::MissingField { field: "country_field" },
            ConfigurationError::InvalidTolerance { value: "0".to_string() },
        ]);
        let display = errors.to_string();
        assert!(display.starts_with("Invalid handler configuration"));
        assert!(display.contains("country_field"));
        assert!(display.contains("'0'"));
        assert!(errors.for_field("tolerance").is_some());
        assert!(errors.for_field("result_field").is_none());
    }
}
