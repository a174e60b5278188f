use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{require_text, schedule::ScheduleView};
use crate::{errors::CollegeResult, patch::Patch};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: Uuid,
    pub iin: String,
    pub first_name: String,
    pub last_name: String,
    /// Names of the subjects taught. Free text, not subject references.
    #[serde(default)]
    pub subjects: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Teacher {
    pub fn new(request: &CreateTeacherRequest, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::nil(),
            iin: request.iin.clone(),
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            subjects: request.subjects.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTeacherRequest {
    pub iin: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub subjects: Vec<String>,
}

impl CreateTeacherRequest {
    pub fn validate(&self) -> CollegeResult<()> {
        require_text("iin", &self.iin)?;
        require_text("first_name", &self.first_name)?;
        require_text("last_name", &self.last_name)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTeacherRequest {
    #[serde(default)]
    pub iin: Patch<String>,
    #[serde(default)]
    pub first_name: Patch<String>,
    #[serde(default)]
    pub last_name: Patch<String>,
    /// `null` empties the list.
    #[serde(default)]
    pub subjects: Patch<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherSummary {
    pub id: Uuid,
    pub iin: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<Teacher> for TeacherSummary {
    fn from(teacher: Teacher) -> Self {
        Self {
            id: teacher.id,
            iin: teacher.iin,
            first_name: teacher.first_name,
            last_name: teacher.last_name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherScheduleResponse {
    pub teacher: Teacher,
    pub schedules: Vec<ScheduleView>,
}
