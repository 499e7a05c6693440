//! Handler Configuration Module
//!
//! Author-facing settings for one country guard handler and their
//! validation into an immutable [`HandlerConfig`]. Settings arrive loosely
//! typed (a tolerance typed into a form may be a number or a string); every
//! field is checked and all problems are reported together.

use crate::defaults::{COUNTRY_PLACEHOLDER, DEFAULT_FAILURE_MESSAGE, DEFAULT_TOLERANCE};
use guard_types::{ConfigurationError, ConfigurationErrors, CountryName};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use tracing::{debug, warn};

/// Tolerance value as entered by an author
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawTolerance {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl From<u32> for RawTolerance {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<&str> for RawTolerance {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl fmt::Display for RawTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Text(v) => f.write_str(v),
        }
    }
}

/// Number of consecutive same-country mismatches permitted, always ≥ 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tolerance(NonZeroU32);

impl Tolerance {
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Parse an author-supplied value. Surrounding whitespace is ignored;
    /// anything that is not an integer in `1..=u32::MAX` is rejected.
    pub fn parse(raw: &RawTolerance) -> Result<Self, ConfigurationError> {
        let invalid = || ConfigurationError::InvalidTolerance {
            value: raw.to_string(),
        };
        let value = match raw {
            RawTolerance::Integer(v) => *v,
            RawTolerance::Float(_) => return Err(invalid()),
            RawTolerance::Text(text) => text.trim().parse::<i64>().map_err(|_| invalid())?,
        };
        u32::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or_else(invalid)
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self(NonZeroU32::new(DEFAULT_TOLERANCE).unwrap_or(NonZeroU32::MIN))
    }
}

impl fmt::Display for Tolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unvalidated handler settings, as entered by a form author
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct HandlerSettings {
    /// Field key holding the declared country
    pub country_field: Option<String>,

    /// Field key receiving the mismatch flag on commit
    pub result_field: Option<String>,

    /// Message shown on mismatch, `%value` is the inferred country
    pub failure_message_template: Option<String>,

    /// Repeat failures required before a mismatching country is allowed
    pub tolerance: Option<RawTolerance>,
}

impl HandlerSettings {
    /// Settings for a handler validating `country_field`, everything else default
    pub fn for_field(country_field: impl Into<String>) -> Self {
        Self {
            country_field: Some(country_field.into()),
            ..Self::default()
        }
    }

    pub fn with_result_field(mut self, field: impl Into<String>) -> Self {
        self.result_field = Some(field.into());
        self
    }

    pub fn with_failure_message(mut self, template: impl Into<String>) -> Self {
        self.failure_message_template = Some(template.into());
        self
    }

    pub fn with_tolerance(mut self, tolerance: impl Into<RawTolerance>) -> Self {
        self.tolerance = Some(tolerance.into());
        self
    }

    /// Parse a single handler block from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Check every field and build the immutable configuration.
    ///
    /// All field errors are collected so an authoring surface can show them
    /// at once.
    pub fn validate(&self) -> Result<HandlerConfig, ConfigurationErrors> {
        let mut errors = Vec::new();

        let country_field = non_blank(self.country_field.as_deref());
        if country_field.is_none() {
            errors.push(ConfigurationError::MissingField {
                field: "country_field",
            });
        }

        let failure_message_template = match self.failure_message_template.as_deref() {
            None => Some(DEFAULT_FAILURE_MESSAGE.to_string()),
            Some(template) if template.trim().is_empty() => {
                errors.push(ConfigurationError::MissingField {
                    field: "failure_message_template",
                });
                None
            }
            Some(template) => Some(template.to_string()),
        };

        let tolerance = match &self.tolerance {
            None => Some(Tolerance::default()),
            Some(raw) => match Tolerance::parse(raw) {
                Ok(tolerance) => Some(tolerance),
                Err(e) => {
                    errors.push(e);
                    None
                }
            },
        };

        match (country_field, failure_message_template, tolerance) {
            (Some(country_field), Some(failure_message_template), Some(tolerance))
                if errors.is_empty() =>
            {
                if !failure_message_template.contains(COUNTRY_PLACEHOLDER) {
                    warn!(
                        "Failure message for field '{}' has no {} placeholder",
                        country_field, COUNTRY_PLACEHOLDER
                    );
                }
                let config = HandlerConfig {
                    country_field,
                    result_field: non_blank(self.result_field.as_deref()),
                    failure_message_template,
                    tolerance,
                };
                debug!("Validated handler configuration: {:?}", config);
                Ok(config)
            }
            _ => Err(ConfigurationErrors(errors)),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Validated, immutable configuration for one handler instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    country_field: String,
    result_field: Option<String>,
    failure_message_template: String,
    tolerance: Tolerance,
}

impl HandlerConfig {
    pub fn country_field(&self) -> &str {
        &self.country_field
    }

    /// Field receiving the mismatch flag, `None` when flag writing is off
    pub fn result_field(&self) -> Option<&str> {
        self.result_field.as_deref()
    }

    pub fn failure_message_template(&self) -> &str {
        &self.failure_message_template
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// Render the failure message for `inferred`
    pub fn failure_message(&self, inferred: &CountryName) -> String {
        self.failure_message_template
            .replace(COUNTRY_PLACEHOLDER, inferred.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let config = HandlerSettings::for_field("country").validate().unwrap();

        assert_eq!(config.country_field(), "country");
        assert_eq!(config.result_field(), None);
        assert_eq!(config.failure_message_template(), DEFAULT_FAILURE_MESSAGE);
        assert_eq!(config.tolerance().get(), 1);
    }

    #[test]
    fn test_tolerance_accepts_positive_integers() {
        let accepted = [
            RawTolerance::from(1u32),
            RawTolerance::from(5u32),
            RawTolerance::from(" 7 "),
        ];
        for raw in accepted {
            let config = HandlerSettings::for_field("country")
                .with_tolerance(raw.clone())
                .validate();
            assert!(config.is_ok(), "tolerance {:?} should be accepted", raw);
        }
    }

    #[test]
    fn test_tolerance_rejects_zero_negative_and_text() {
        let rejected = [
            RawTolerance::from(0u32),
            RawTolerance::Integer(-3),
            RawTolerance::from("abc"),
            RawTolerance::from("0"),
            RawTolerance::from(""),
            RawTolerance::Float(1.5),
            RawTolerance::Integer(i64::from(u32::MAX) + 1),
        ];

        for raw in rejected {
            let errors = HandlerSettings::for_field("country")
                .with_tolerance(raw.clone())
                .validate()
                .unwrap_err();
            let error = errors.for_field("tolerance").unwrap();
            assert!(
                matches!(error, ConfigurationError::InvalidTolerance { .. }),
                "tolerance {:?} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_missing_country_field() {
        for settings in [
            HandlerSettings::default(),
            HandlerSettings::for_field("   "),
        ] {
            let errors = settings.validate().unwrap_err();
            assert_eq!(
                errors.for_field("country_field"),
                Some(&ConfigurationError::MissingField { field: "country_field" })
            );
        }
    }

    #[test]
    fn test_all_errors_reported_together() {
        let errors = HandlerSettings::default()
            .with_failure_message("")
            .with_tolerance("abc")
            .validate()
            .unwrap_err();

        assert_eq!(errors.errors().len(), 3);
        assert!(errors.for_field("country_field").is_some());
        assert!(errors.for_field("failure_message_template").is_some());
        assert!(errors.for_field("tolerance").is_some());
    }

    #[test]
    fn test_blank_result_field_disables_flag() {
        let config = HandlerSettings::for_field("country")
            .with_result_field("  ")
            .validate()
            .unwrap();
        assert_eq!(config.result_field(), None);

        let config = HandlerSettings::for_field("country")
            .with_result_field("country_mismatch")
            .validate()
            .unwrap();
        assert_eq!(config.result_field(), Some("country_mismatch"));
    }

    #[test]
    fn test_failure_message_substitution() {
        let config = HandlerSettings::for_field("country").validate().unwrap();
        assert_eq!(
            config.failure_message(&CountryName::from("Germany")),
            "Are you sure you are not from Germany."
        );

        let config = HandlerSettings::for_field("country")
            .with_failure_message("Location check failed (we see %value)")
            .validate()
            .unwrap();
        assert_eq!(
            config.failure_message(&CountryName::from("Japan")),
            "Location check failed (we see Japan)"
        );

        // No placeholder is allowed, the template is used verbatim
        let config = HandlerSettings::for_field("country")
            .with_failure_message("Please check your country.")
            .validate()
            .unwrap();
        assert_eq!(
            config.failure_message(&CountryName::from("Japan")),
            "Please check your country."
        );
    }

    #[test]
    fn test_from_toml_str() {
        let settings = HandlerSettings::from_toml_str(
            r#"
country_field = "country"
result_field = "country_mismatch"
tolerance = "3"
"#,
        )
        .unwrap();

        let config = settings.validate().unwrap();
        assert_eq!(config.tolerance().get(), 3);
        assert_eq!(config.result_field(), Some("country_mismatch"));
    }
}
