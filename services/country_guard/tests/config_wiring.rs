//! Configuration file to running validator

use country_guard::{
    AttemptContext, CountryMatchValidator, CountryName, FlagStatus, InMemoryRetryStore,
    RetryStateKey, StaticGeolocator, Submission, SubmissionRecord,
};
use guard_config::GuardConfig;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_validator_from_config_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("country_guard.toml");
    fs::write(
        &path,
        r#"
[handlers.contact]
country_field = "country"
result_field = "country_mismatch"
failure_message_template = "Are you really outside %value?"
tolerance = "1"
"#,
    )
    .unwrap();

    let config = GuardConfig::load(Some(&path), None).unwrap();
    let validator = CountryMatchValidator::new(config.handler("contact").unwrap());

    let store = InMemoryRetryStore::new();
    let geolocator = StaticGeolocator::new("Ireland");
    let ctx = AttemptContext::new(
        RetryStateKey::new("contact", "contact", "visitor"),
        &geolocator,
        &store,
    );
    let declared = CountryName::from("Iceland");

    let first = validator.validate(&ctx, &declared).unwrap();
    assert_eq!(
        first.field_error().unwrap().message,
        "Are you really outside Ireland?"
    );
    assert!(validator.validate(&ctx, &declared).unwrap().is_accepted());

    let mut record = Submission::new().with_field("country_mismatch", 0);
    let report = validator.commit(&ctx, &mut record, &declared).unwrap();
    assert_eq!(report.flag, FlagStatus::Written);
    assert_eq!(record.field("country_mismatch"), Some(&Value::Bool(true)));
}

#[test]
fn test_invalid_tolerance_in_file_is_a_configuration_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("country_guard.toml");
    fs::write(
        &path,
        r#"
[handlers.contact]
country_field = "country"
tolerance = "abc"
"#,
    )
    .unwrap();

    let config = GuardConfig::load(Some(&path), None).unwrap();
    let err = config.handler("contact").unwrap_err();
    assert!(format!("{:#}", err).contains("Failures before allow must be a positive integer"));
}
