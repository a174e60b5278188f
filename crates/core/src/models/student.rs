use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{group::GroupSummary, require_text, schedule::ScheduleView};
use crate::{errors::CollegeResult, patch::Patch};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: Uuid,
    /// National identification number, used by students to look up their timetable.
    pub iin: String,
    pub first_name: String,
    pub last_name: String,
    pub group_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    pub fn new(request: &CreateStudentRequest, group_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::nil(),
            iin: request.iin.clone(),
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            group_id,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStudentRequest {
    pub iin: String,
    pub first_name: String,
    pub last_name: String,
    pub group_id: String,
}

impl CreateStudentRequest {
    pub fn validate(&self) -> CollegeResult<()> {
        require_text("iin", &self.iin)?;
        require_text("first_name", &self.first_name)?;
        require_text("last_name", &self.last_name)?;
        require_text("group_id", &self.group_id)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStudentRequest {
    #[serde(default)]
    pub iin: Patch<String>,
    #[serde(default)]
    pub first_name: Patch<String>,
    #[serde(default)]
    pub last_name: Patch<String>,
    #[serde(default)]
    pub group_id: Patch<String>,
}

/// Student with its group attached when the group still exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentView {
    #[serde(flatten)]
    pub student: Student,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentScheduleResponse {
    pub student: Student,
    pub schedules: Vec<ScheduleView>,
}
