pub mod group;
pub mod lesson;
pub mod schedule;
pub mod statistics;
pub mod student;
pub mod subject;
pub mod teacher;
pub mod time_slot;

use serde::{Deserialize, Serialize};

use crate::errors::{CollegeError, CollegeResult};

/// Body returned by successful deletes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

impl DeleteResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub(crate) fn require_text(field: &str, value: &str) -> CollegeResult<()> {
    if value.trim().is_empty() {
        return Err(CollegeError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Optional text with empty strings folded into `None`.
pub(crate) fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}
