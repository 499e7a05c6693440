//! In-memory submission record
//!
//! Plain field map plus notes, for hosts without their own record type and
//! for tests.

use crate::traits::SubmissionRecord;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub data: Map<String, Value>,
    #[serde(default)]
    pub notes: String,
}

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record with `key` present, holding `value`
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

impl SubmissionRecord for Submission {
    fn field(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    fn set_field(&mut self, key: &str, value: Value) {
        self.data.insert(key.to_string(), value);
    }

    fn notes(&self) -> &str {
        &self.notes
    }

    fn set_notes(&mut self, notes: String) {
        self.notes = notes;
    }
}
