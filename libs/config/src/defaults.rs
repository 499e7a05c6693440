//! Handler defaults and user-facing message constants
//!
//! Values used when an author leaves an optional setting unset, plus the
//! fixed strings the validator writes onto forms and submissions.

/// Placeholder replaced by the inferred country in failure messages
pub const COUNTRY_PLACEHOLDER: &str = "%value";

/// Failure message used when the author does not provide one
pub const DEFAULT_FAILURE_MESSAGE: &str = "Are you sure you are not from %value.";

/// Consecutive same-country mismatches allowed before auto-acceptance
pub const DEFAULT_TOLERANCE: u32 = 1;

/// Field error shown when no country was declared
pub const COUNTRY_REQUIRED_MESSAGE: &str = "Country field required.";

/// Submission note prefix written when the result field is missing
pub const STATUS_NOTE_PREFIX: &str = " Failed to set validation status: ";

/// Note suffixes for the validation status that could not be stored
pub mod status_note {
    pub const FAILED: &str = "Failed";
    pub const SUCCEEDED: &str = "Succeeded";
}

/// Loader defaults
pub mod loader {
    /// Prefix for environment variable overrides (`COUNTRY_GUARD__...`)
    pub const ENV_PREFIX: &str = "COUNTRY_GUARD";

    /// Separator between nested keys in environment variable names
    pub const ENV_SEPARATOR: &str = "__";

    /// Directory, relative to the base file, holding per-environment overlays
    pub const ENVIRONMENTS_DIR: &str = "environments";

    /// Base configuration file used when none is given
    pub const DEFAULT_CONFIG_PATH: &str = "config/country_guard.toml";
}
