//! Collaborator Traits
//!
//! Capabilities the validator is composed from. Implementations live with the
//! host application: a geolocation provider, a session-scoped key-value store
//! and the submission record being processed.

use guard_types::{CountryName, GeolocationError, RetryState, RetryStateKey, StoreError};
use serde_json::Value;

/// Infers the requester's country from the in-flight request
pub trait Geolocator {
    /// Country for the current request's network address
    fn country_name(&self) -> Result<CountryName, GeolocationError>;
}

/// Session-scoped storage for retry state
///
/// Each key holds one complete [`RetryState`] record so the country and its
/// failure counter are always written together.
pub trait RetryStateStore {
    fn get(&self, key: &RetryStateKey) -> Result<Option<RetryState>, StoreError>;

    fn set(&self, key: &RetryStateKey, state: RetryState) -> Result<(), StoreError>;

    fn delete(&self, key: &RetryStateKey) -> Result<(), StoreError>;
}

/// Submission being validated and committed
pub trait SubmissionRecord {
    /// Field value, `None` when the record has no such field
    fn field(&self, key: &str) -> Option<&Value>;

    fn set_field(&mut self, key: &str, value: Value);

    /// Free-text notes, empty when none were written
    fn notes(&self) -> &str;

    fn set_notes(&mut self, notes: String);
}
