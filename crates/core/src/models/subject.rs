use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{non_empty, require_text};
use crate::{errors::CollegeResult, patch::Patch};

pub const SUBJECT_NOT_FOUND: &str = "Subject not found";
pub const SUBJECT_NOT_SPECIFIED: &str = "Subject not specified";
pub const SUBJECT_CODE_UNAVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: Uuid,
    pub name: String,
    /// Curriculum code, e.g. "ОН 3.1". Unique across subjects.
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Subject {
    pub fn new(request: &CreateSubjectRequest, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::nil(),
            name: request.name.clone(),
            code: request.code.clone(),
            description: non_empty(request.description.as_deref()),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSubjectRequest {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateSubjectRequest {
    pub fn validate(&self) -> CollegeResult<()> {
        require_text("name", &self.name)?;
        require_text("code", &self.code)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSubjectRequest {
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub code: Patch<String>,
    #[serde(default)]
    pub description: Patch<String>,
}

/// Subject embedded into schedule and lesson responses.
///
/// Always present on those responses: when the referenced subject cannot be
/// loaded a placeholder takes its place so clients never see a missing field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    pub code: String,
}

impl SubjectSummary {
    /// Placeholder for a reference whose subject no longer resolves.
    pub fn not_found(id: Uuid) -> Self {
        Self {
            id: Some(id),
            name: SUBJECT_NOT_FOUND.to_string(),
            code: SUBJECT_CODE_UNAVAILABLE.to_string(),
        }
    }

    /// Placeholder for a record that carries no subject reference at all.
    pub fn not_specified() -> Self {
        Self {
            id: None,
            name: SUBJECT_NOT_SPECIFIED.to_string(),
            code: SUBJECT_CODE_UNAVAILABLE.to_string(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.code == SUBJECT_CODE_UNAVAILABLE
            && (self.name == SUBJECT_NOT_FOUND || self.name == SUBJECT_NOT_SPECIFIED)
    }
}

impl From<Subject> for SubjectSummary {
    fn from(subject: Subject) -> Self {
        Self {
            id: Some(subject.id),
            name: subject.name,
            code: subject.code,
        }
    }
}
