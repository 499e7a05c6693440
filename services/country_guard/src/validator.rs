//! # Country-Match Validator
//!
//! Two-phase guard run around a form submission:
//!
//! - **Validate** compares the declared country with the geolocated one and
//!   either accepts or rejects. Repeated rejections of the same declared
//!   country are counted per actor; once the count passes the configured
//!   tolerance the country is let through.
//! - **Commit** runs after the submission was accepted. It optionally writes
//!   a mismatch flag onto the record and always clears the actor's retry
//!   state so the next attempt chain starts fresh.
//!
//! The state machine itself is [`decide`], a pure function of the declared
//! and inferred countries and the prior state. The validator wraps it with
//! geolocation and store access.

use crate::error::{GuardError, GuardResult};
use crate::store::RetryStateSlot;
use crate::traits::{Geolocator, RetryStateStore, SubmissionRecord};
use guard_config::defaults::{status_note, COUNTRY_REQUIRED_MESSAGE, STATUS_NOTE_PREFIX};
use guard_config::{HandlerConfig, HandlerSettings};
use guard_types::{
    AcceptReason, CountryName, RejectReason, RetryState, RetryStateKey, ValidationOutcome,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info};

/// What a decision does to the stored retry state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateTransition {
    /// Leave whatever is stored untouched
    Keep,
    /// Replace the stored state
    Write(RetryState),
}

/// Outcome of one mismatch check plus the state change it requires
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub outcome: ValidationOutcome,
    pub transition: StateTransition,
}

/// Decide a non-empty declared country against the inferred one.
///
/// `state` is a read-only snapshot of the actor's retry state. Accepting
/// never touches the state, including acceptance by exhausted tolerance.
pub fn decide(
    config: &HandlerConfig,
    declared: &CountryName,
    inferred: &CountryName,
    state: Option<&RetryState>,
) -> Decision {
    if declared == inferred {
        return Decision {
            outcome: ValidationOutcome::accepted(AcceptReason::CountryMatch),
            transition: StateTransition::Keep,
        };
    }

    let next = match state {
        Some(previous) if previous.is_streak_for(declared) => {
            // Streak already at the tolerance: this attempt would be failure T+1
            if previous.previous_failures >= config.tolerance().get() {
                return Decision {
                    outcome: ValidationOutcome::accepted(AcceptReason::ToleranceExhausted),
                    transition: StateTransition::Keep,
                };
            }
            previous.with_failures(previous.next_failures())
        }
        // New streak, either first mismatch or a different country than last time
        _ => RetryState::first_failure(declared.clone()),
    };

    let outcome = ValidationOutcome::rejected(
        config.country_field(),
        config.failure_message(inferred),
        RejectReason::CountryMismatch {
            inferred: inferred.clone(),
            failures: next.previous_failures,
        },
    );

    Decision {
        outcome,
        transition: StateTransition::Write(next),
    }
}

/// Collaborators for one submission attempt
pub struct AttemptContext<'a> {
    pub key: RetryStateKey,
    pub geolocator: &'a dyn Geolocator,
    pub store: &'a dyn RetryStateStore,
}

impl<'a> AttemptContext<'a> {
    pub fn new(
        key: RetryStateKey,
        geolocator: &'a dyn Geolocator,
        store: &'a dyn RetryStateStore,
    ) -> Self {
        Self {
            key,
            geolocator,
            store,
        }
    }

    fn slot(&self) -> RetryStateSlot<'_> {
        RetryStateSlot::new(self.store, &self.key)
    }
}

/// How Commit handled the result flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagStatus {
    /// No result field configured
    Disabled,
    /// Flag written onto the record
    Written,
    /// Result field missing from the record, status recorded as a note
    NoteAppended,
}

/// Summary of a Commit call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitReport {
    pub flag: FlagStatus,
    /// Whether declared and inferred differed; `None` when not computed
    pub mismatch: Option<bool>,
}

/// Country-match guard for one handler instance
#[derive(Debug, Clone)]
pub struct CountryMatchValidator {
    config: HandlerConfig,
}

impl CountryMatchValidator {
    pub fn new(config: HandlerConfig) -> Self {
        Self { config }
    }

    /// Build from unvalidated author settings
    pub fn from_settings(settings: &HandlerSettings) -> GuardResult<Self> {
        Ok(Self::new(settings.validate()?))
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    /// Validate one submission attempt.
    ///
    /// An empty declared country is rejected straight away without
    /// geolocating or touching retry state. Geolocation faults propagate.
    pub fn validate(
        &self,
        ctx: &AttemptContext<'_>,
        declared: &CountryName,
    ) -> GuardResult<ValidationOutcome> {
        if declared.is_empty() {
            debug!("No country declared for {}", ctx.key);
            return Ok(ValidationOutcome::rejected(
                self.config.country_field(),
                COUNTRY_REQUIRED_MESSAGE,
                RejectReason::CountryRequired,
            ));
        }

        let inferred = ctx.geolocator.country_name()?;
        let slot = ctx.slot();
        let previous = slot.load();

        let Decision {
            outcome,
            transition,
        } = decide(&self.config, declared, &inferred, previous.as_ref());

        if let StateTransition::Write(next) = transition {
            debug!(
                "Country mismatch for {}: declared {}, inferred {}, failures {}/{}",
                ctx.key,
                declared,
                inferred,
                next.previous_failures,
                self.config.tolerance()
            );
            slot.save(next);
        } else if let ValidationOutcome::Accepted { reason } = &outcome {
            match reason {
                AcceptReason::CountryMatch => {
                    debug!("Country {} confirmed for {}", declared, ctx.key)
                }
                AcceptReason::ToleranceExhausted => info!(
                    "Allowing {} for {} after {} rejected attempts (inferred {})",
                    declared,
                    ctx.key,
                    self.config.tolerance(),
                    inferred
                ),
            }
        }

        Ok(outcome)
    }

    /// Finalize an accepted submission.
    ///
    /// Retry state is cleared even when geolocation fails while computing
    /// the flag; the geolocation fault is still returned.
    pub fn commit(
        &self,
        ctx: &AttemptContext<'_>,
        record: &mut dyn SubmissionRecord,
        declared: &CountryName,
    ) -> GuardResult<CommitReport> {
        let report = self.write_flag(ctx, record, declared);
        ctx.slot().clear();
        debug!("Cleared retry state for {}", ctx.key);
        report
    }

    fn write_flag(
        &self,
        ctx: &AttemptContext<'_>,
        record: &mut dyn SubmissionRecord,
        declared: &CountryName,
    ) -> GuardResult<CommitReport> {
        let Some(result_field) = self.config.result_field() else {
            return Ok(CommitReport {
                flag: FlagStatus::Disabled,
                mismatch: None,
            });
        };

        let inferred = ctx.geolocator.country_name().map_err(GuardError::from)?;
        let mismatch = declared != &inferred;

        // A null value counts as absent
        let present = record
            .field(result_field)
            .is_some_and(|value| !value.is_null());

        if present {
            record.set_field(result_field, Value::Bool(mismatch));
            return Ok(CommitReport {
                flag: FlagStatus::Written,
                mismatch: Some(mismatch),
            });
        }

        error!(
            "Failed to set validation status {}, not present on submission",
            result_field
        );
        let mut notes = record.notes().to_string();
        notes.push_str(STATUS_NOTE_PREFIX);
        notes.push_str(if mismatch {
            status_note::FAILED
        } else {
            status_note::SUCCEEDED
        });
        record.set_notes(notes);

        Ok(CommitReport {
            flag: FlagStatus::NoteAppended,
            mismatch: Some(mismatch),
        })
    }
}
