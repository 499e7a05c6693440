//! Guard Configuration Loading
//!
//! Loads handler settings for a deployment from TOML files with
//! environment-specific overrides. Sources are layered in order: base file,
//! `environments/<env>.toml` next to the base file, then environment
//! variables prefixed with `COUNTRY_GUARD`.

use crate::defaults::loader::{DEFAULT_CONFIG_PATH, ENVIRONMENTS_DIR, ENV_PREFIX, ENV_SEPARATOR};
use crate::handler::{HandlerConfig, HandlerSettings};
use anyhow::{anyhow, Context, Result};
use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Main guard configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct GuardConfig {
    /// Logging settings for binaries embedding the guard
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Handler settings keyed by handler id
    #[serde(default)]
    pub handlers: HashMap<String, HandlerSettings>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl GuardConfig {
    /// Load configuration from files with environment overrides
    pub fn load(base_path: Option<&Path>, environment: Option<&str>) -> Result<Self> {
        Self::load_with_prefix(base_path, environment, ENV_PREFIX)
    }

    /// Same as [`GuardConfig::load`] with a custom environment variable prefix
    pub fn load_with_prefix(
        base_path: Option<&Path>,
        environment: Option<&str>,
        env_prefix: &str,
    ) -> Result<Self> {
        let base = base_path.unwrap_or(Path::new(DEFAULT_CONFIG_PATH));

        let mut builder = Config::builder().add_source(File::from(base).required(true));

        if let Some(env) = environment {
            let env_file = environment_overlay_path(base, env);

            if env_file.exists() {
                info!("Loading environment config: {:?}", env_file);
                builder = builder.add_source(File::from(env_file));
            } else {
                warn!("Environment config not found: {:?}", env_file);
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(env_prefix)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        );

        let config = builder
            .build()
            .with_context(|| format!("Failed to build configuration from {:?}", base))?;

        let loaded: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        debug!(
            "Loaded {} handler(s) from {:?}",
            loaded.handlers.len(),
            base
        );
        Ok(loaded)
    }

    /// Raw settings for a handler.
    ///
    /// Keys read through the `config` crate are lowercased, so an id that is
    /// not found as given is retried in lowercase.
    pub fn settings(&self, handler_id: &str) -> Option<&HandlerSettings> {
        self.handlers
            .get(handler_id)
            .or_else(|| self.handlers.get(&handler_id.to_lowercase()))
    }

    /// Validated configuration for a handler
    pub fn handler(&self, handler_id: &str) -> Result<HandlerConfig> {
        let settings = self
            .settings(handler_id)
            .ok_or_else(|| anyhow!("Handler '{}' is not configured", handler_id))?;

        settings
            .validate()
            .with_context(|| format!("Handler '{}' has invalid settings", handler_id))
    }

    /// Handler ids in sorted order
    pub fn handler_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.handlers.keys().cloned().collect();
        ids.sort();
        ids
    }
}

/// Convenience function to load configuration from an explicit file
pub fn load_config(path: &Path, environment: Option<&str>) -> Result<GuardConfig> {
    GuardConfig::load(Some(path), environment)
}

/// Path of the overlay file for `environment` relative to `base`
pub fn environment_overlay_path(base: &Path, environment: &str) -> PathBuf {
    base.parent()
        .unwrap_or(Path::new("."))
        .join(ENVIRONMENTS_DIR)
        .join(format!("{}.toml", environment))
}
