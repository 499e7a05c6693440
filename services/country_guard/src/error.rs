//! Guard error types

use guard_types::{ConfigurationErrors, GeolocationError};
use thiserror::Error;

/// Faults that abort a Validate or Commit call
///
/// Rejections are not errors; they are returned as
/// [`guard_types::ValidationOutcome::Rejected`].
#[derive(Debug, Error)]
pub enum GuardError {
    #[error("Geolocation error: {0}")]
    Geolocation(#[from] GeolocationError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationErrors),
}

pub type GuardResult<T> = Result<T, GuardError>;
