//! Country names as declared by users and inferred by geolocation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A country name as it appears in a submission or a geolocation result.
///
/// Comparison is exact and case-sensitive: `"France"` and `"france"` are
/// different countries. No normalization is applied on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryName(String);

impl CountryName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when no country was supplied at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CountryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CountryName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for CountryName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl PartialEq<str> for CountryName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CountryName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_is_case_sensitive() {
        assert_ne!(CountryName::from("France"), CountryName::from("france"));
        assert_eq!(CountryName::from("France"), CountryName::new(String::from("France")));
        assert!(CountryName::from("France") == "France");
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert!(CountryName::default().is_empty());
        assert!(CountryName::from("").is_empty());
        // Whitespace is a value, not an absence
        assert!(!CountryName::from(" ").is_empty());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&CountryName::from("Germany")).unwrap();
        assert_eq!(json, "\"Germany\"");
        let back: CountryName = serde_json::from_str(&json).unwrap();
        assert_eq!(back.as_str(), "Germany");
    }
}
