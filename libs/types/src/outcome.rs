//! Validation outcomes
//!
//! Result of one Validate call. Rejections are ordinary values, not errors:
//! they are shown to the user against a form field and the user may resubmit.

use crate::country::CountryName;
use serde::{Deserialize, Serialize};

/// Why a submission was let through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcceptReason {
    /// Declared country equals the inferred country
    CountryMatch,
    /// Same declared country was rejected more times than the tolerance allows
    ToleranceExhausted,
}

/// Why a submission was turned away
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum RejectReason {
    /// No country was declared
    CountryRequired,
    /// Declared country differs from the inferred one
    CountryMismatch {
        inferred: CountryName,
        /// Failures recorded for the declared country after this rejection
        failures: u32,
    },
}

/// User-visible error attached to a form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub reason: RejectReason,
}

/// Outcome of validating one submission attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum ValidationOutcome {
    Accepted { reason: AcceptReason },
    Rejected { error: FieldError },
}

impl ValidationOutcome {
    pub fn accepted(reason: AcceptReason) -> Self {
        Self::Accepted { reason }
    }

    pub fn rejected(
        field: impl Into<String>,
        message: impl Into<String>,
        reason: RejectReason,
    ) -> Self {
        Self::Rejected {
            error: FieldError {
                field: field.into(),
                message: message.into(),
                reason,
            },
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    pub fn is_rejected(&self) -> bool {
        !self.is_accepted()
    }

    /// Field error to show the user, if any
    pub fn field_error(&self) -> Option<&FieldError> {
        match self {
            Self::Accepted { .. } => None,
            Self::Rejected { error } => Some(error),
        }
    }
}
