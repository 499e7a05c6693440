//! # Country Guard Configuration
//!
//! Configuration management and defaults for country guard handlers.
//!
//! ## Features
//!
//! - **Defaults**: fallback failure message, default tolerance and the fixed
//!   strings written onto forms and submissions
//! - **Handler Settings**: author-facing settings validated into an
//!   immutable [`HandlerConfig`] with per-field errors
//! - **Loading**: TOML files with environment overlays and `COUNTRY_GUARD__*`
//!   environment variable overrides
//!
//! ## Usage
//!
//! ```rust
//! use guard_config::HandlerSettings;
//!
//! let config = HandlerSettings::for_field("country")
//!     .with_result_field("country_mismatch")
//!     .with_tolerance(3u32)
//!     .validate()
//!     .expect("valid settings");
//!
//! assert_eq!(config.tolerance().get(), 3);
//! ```

pub mod defaults;
pub mod handler;
pub mod loader;

pub use handler::{HandlerConfig, HandlerSettings, RawTolerance, Tolerance};
pub use loader::{load_config, GuardConfig, LoggingConfig};
