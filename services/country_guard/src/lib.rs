//! # Country Guard - Declared vs. Geolocated Country Checks
//!
//! ## Purpose
//!
//! Guards form submissions by comparing the country a user declares with the
//! country inferred from their network address. Mismatches are rejected with
//! a retryable field error; an actor who insists on the same country more
//! times than the configured tolerance is let through.
//!
//! ## Integration Points
//!
//! - **Geolocation**: any [`Geolocator`] implementation for the current request
//! - **Retry State**: any [`RetryStateStore`] scoped per form, handler and actor
//! - **Submissions**: any [`SubmissionRecord`] receiving the mismatch flag
//! - **Configuration**: [`guard_config::HandlerConfig`] per handler instance
//!
//! ## Architecture Role
//!
//! ```text
//! Form Submit → [Validate] → rejected? → re-prompt user ─┐
//!                   ↑                                    │
//!                   └──────────── resubmit ──────────────┘
//!                   ↓ accepted
//!               [Commit] → mismatch flag / note → retry state cleared
//! ```

pub mod error;
pub mod geolocation;
pub mod locks;
pub mod store;
pub mod submission;
pub mod traits;
pub mod validator;

pub use error::{GuardError, GuardResult};
pub use geolocation::StaticGeolocator;
pub use locks::ActorLocks;
pub use store::{InMemoryRetryStore, RetryStateSlot};
pub use submission::Submission;
pub use traits::{Geolocator, RetryStateStore, SubmissionRecord};
pub use validator::{
    decide, AttemptContext, CommitReport, CountryMatchValidator, Decision, FlagStatus,
    StateTransition,
};

// Re-export shared types for convenience
pub use guard_types::{
    AcceptReason, CountryName, FieldError, RejectReason, RetryState, RetryStateKey,
    ValidationOutcome,
};
