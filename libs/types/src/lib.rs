//! # Country Guard Types
//!
//! Shared type system for the country guard: the declared and inferred
//! country names, the per-actor retry state, validation outcomes and the
//! error taxonomy used by the configuration layer and the validator.
//!
//! ## Integration Points
//!
//! - **Configuration**: `guard-config` reports author-time problems as
//!   [`ConfigurationError`]
//! - **Validator**: `country-guard` produces [`ValidationOutcome`] values and
//!   persists [`RetryState`] records under a [`RetryStateKey`]
//! - **Collaborators**: geolocators and retry-state stores report faults as
//!   [`GeolocationError`] and [`StoreError`]

pub mod country;
pub mod errors;
pub mod outcome;
pub mod retry_state;

pub use country::CountryName;
pub use errors::{ConfigurationError, ConfigurationErrors, GeolocationError, StoreError};
pub use outcome::{AcceptReason, FieldError, RejectReason, ValidationOutcome};
pub use retry_state::{RetryState, RetryStateKey};
