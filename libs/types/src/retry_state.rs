//! Per-actor retry state
//!
//! Tracks the current streak of consecutive rejections for one declared
//! country. The country and the counter always travel together as a single
//! record so a store can never hold one without the other.

use crate::country::CountryName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Streak of consecutive mismatches for a single declared country
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryState {
    /// Last declared country that was rejected
    pub previous_country: CountryName,
    /// Consecutive rejections recorded for `previous_country`
    pub previous_failures: u32,
}

impl RetryState {
    /// State after the first rejection of `country`.
    pub fn first_failure(country: CountryName) -> Self {
        Self {
            previous_country: country,
            previous_failures: 1,
        }
    }

    /// True when the streak belongs to `country`.
    pub fn is_streak_for(&self, country: &CountryName) -> bool {
        &self.previous_country == country
    }

    /// Failure count the next mismatch for the same country would reach.
    pub fn next_failures(&self) -> u32 {
        self.previous_failures.saturating_add(1)
    }

    /// Same streak with an updated counter.
    pub fn with_failures(&self, failures: u32) -> Self {
        Self {
            previous_country: self.previous_country.clone(),
            previous_failures: failures,
        }
    }
}

/// Composite key scoping retry state to one handler on one form for one actor
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RetryStateKey {
    pub form_id: String,
    pub handler_id: String,
    /// Session or user identifier of the submitting actor
    pub actor_id: String,
}

impl RetryStateKey {
    pub fn new(
        form_id: impl Into<String>,
        handler_id: impl Into<String>,
        actor_id: impl Into<String>,
    ) -> Self {
        Self {
            form_id: form_id.into(),
            handler_id: handler_id.into(),
            actor_id: actor_id.into(),
        }
    }
}

impl fmt::Display for RetryStateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.form_id, self.handler_id, self.actor_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streak_progression() {
        let state = RetryState::first_failure(CountryName::from("France"));
        assert_eq!(state.previous_failures, 1);
        assert!(state.is_streak_for(&CountryName::from("France")));
        assert!(!state.is_streak_for(&CountryName::from("Spain")));

        let next = state.with_failures(state.next_failures());
        assert_eq!(next.previous_failures, 2);
        assert_eq!(next.previous_country, state.previous_country);
    }

    #[test]
    fn test_counter_saturates() {
        let state = RetryState {
            previous_country: CountryName::from("France"),
            previous_failures: u32::MAX,
        };
        assert_eq!(state.next_failures(), u32::MAX);
    }

    #[test]
    fn test_key_display() {
        let key = RetryStateKey::new("contact", "validate_country", "session-42");
        assert_eq!(key.to_string(), "contact/validate_country/session-42");
    }
}
