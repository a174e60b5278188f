use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    group::GroupSummary, non_empty, require_text, subject::SubjectSummary, teacher::TeacherSummary,
};
use crate::{
    calendar::require_time,
    errors::{CollegeError, CollegeResult},
    patch::Patch,
    shift::is_valid_shift,
};

/// A recurring weekly timetable entry, not tied to any calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: Uuid,
    pub group_id: Uuid,
    pub teacher_id: Uuid,
    /// Older records may lack a subject; hydration substitutes a placeholder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<Uuid>,
    pub room: String,
    /// 1 = Monday .. 7 = Sunday
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    pub shift: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Identifiers of a schedule's references, parsed and verified by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleRefs {
    pub group_id: Uuid,
    pub teacher_id: Uuid,
    pub subject_id: Uuid,
}

impl Schedule {
    pub fn new(request: &CreateScheduleRequest, refs: ScheduleRefs, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::nil(),
            group_id: refs.group_id,
            teacher_id: refs.teacher_id,
            subject_id: Some(refs.subject_id),
            room: request.room.clone(),
            day_of_week: request.day_of_week,
            start_time: request.start_time.clone(),
            end_time: request.end_time.clone(),
            shift: request.shift,
            description: non_empty(request.description.as_deref()),
            created_at: now,
            updated_at: now,
        }
    }
}

pub fn validate_day_of_week(day: u8) -> CollegeResult<()> {
    if !(1..=7).contains(&day) {
        return Err(CollegeError::Validation(
            "day_of_week must be between 1 and 7".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_schedule_shift(shift: u8) -> CollegeResult<()> {
    if !is_valid_shift(shift) {
        return Err(CollegeError::Validation("shift must be 1 or 2".to_string()));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateScheduleRequest {
    pub group_id: String,
    pub teacher_id: String,
    pub subject_id: String,
    pub room: String,
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    pub shift: u8,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateScheduleRequest {
    pub fn validate(&self) -> CollegeResult<()> {
        require_text("group_id", &self.group_id)?;
        require_text("teacher_id", &self.teacher_id)?;
        require_text("subject_id", &self.subject_id)?;
        require_text("room", &self.room)?;
        validate_day_of_week(self.day_of_week)?;
        require_time("start_time", &self.start_time)?;
        require_time("end_time", &self.end_time)?;
        validate_schedule_shift(self.shift)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateScheduleRequest {
    #[serde(default)]
    pub group_id: Patch<String>,
    #[serde(default)]
    pub teacher_id: Patch<String>,
    #[serde(default)]
    pub subject_id: Patch<String>,
    #[serde(default)]
    pub room: Patch<String>,
    #[serde(default)]
    pub day_of_week: Patch<u8>,
    #[serde(default)]
    pub start_time: Patch<String>,
    #[serde(default)]
    pub end_time: Patch<String>,
    #[serde(default)]
    pub shift: Patch<u8>,
    #[serde(default)]
    pub description: Patch<String>,
}

/// Schedule with its references resolved for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleView {
    #[serde(flatten)]
    pub schedule: Schedule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher: Option<TeacherSummary>,
    pub subject: SubjectSummary,
}
