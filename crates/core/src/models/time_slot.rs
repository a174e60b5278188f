use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::non_empty;
use crate::{
    calendar::require_time,
    errors::{CollegeError, CollegeResult},
    patch::Patch,
    shift::is_valid_shift,
};

/// A reusable period definition offered to the timetable builder.
///
/// Slots are not referenced by id; a lesson "uses" a slot when its start and
/// end time strings are identical to the slot's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: Uuid,
    pub start_time: String,
    pub end_time: String,
    pub shift: u8,
    pub label: String,
    #[serde(default)]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TimeSlot {
    pub fn new(request: &CreateTimeSlotRequest, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::nil(),
            start_time: request.start_time.clone(),
            end_time: request.end_time.clone(),
            shift: request.shift,
            label: non_empty(request.label.as_deref())
                .unwrap_or_else(|| default_label(&request.start_time, &request.end_time)),
            is_active: request.is_active,
            created_at: now,
            updated_at: now,
        }
    }
}

/// "12:40-14:00"
pub fn default_label(start_time: &str, end_time: &str) -> String {
    format!("{start_time}-{end_time}")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTimeSlotRequest {
    pub start_time: String,
    pub end_time: String,
    pub shift: u8,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

impl CreateTimeSlotRequest {
    pub fn validate(&self) -> CollegeResult<()> {
        require_time("start_time", &self.start_time)?;
        require_time("end_time", &self.end_time)?;
        if !is_valid_shift(self.shift) {
            return Err(CollegeError::Validation("shift must be 1 or 2".to_string()));
        }
        Ok(())
    }
}

/// Partial time slot update. Changing either time regenerates the label,
/// overriding any label sent in the same request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTimeSlotRequest {
    #[serde(default)]
    pub start_time: Patch<String>,
    #[serde(default)]
    pub end_time: Patch<String>,
    #[serde(default)]
    pub shift: Patch<u8>,
    #[serde(default)]
    pub label: Patch<String>,
    #[serde(default)]
    pub is_active: Patch<bool>,
}

/// Query string accepted by the time slot listing; unparseable values are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeSlotListQuery {
    pub shift: Option<String>,
    pub is_active: Option<String>,
}
