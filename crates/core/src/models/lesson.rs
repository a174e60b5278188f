use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    group::GroupSummary, non_empty, require_text, subject::SubjectSummary, teacher::TeacherSummary,
};
use crate::{
    calendar::{require_date, require_time, start_of_day},
    errors::{CollegeError, CollegeResult},
    patch::Patch,
    shift::{determine_shift, is_valid_shift, UNDETERMINED_SHIFT},
};

/// A concrete calendar occurrence.
///
/// A lesson without a `date` is "available": a template waiting to be placed
/// on the calendar. The date attribute is left out of the stored document
/// entirely in that case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: Uuid,
    pub group_id: Uuid,
    pub teacher_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<Uuid>,
    pub room: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    /// 0 when neither supplied nor derivable.
    #[serde(default)]
    pub shift: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Identifiers of a lesson's references, parsed by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LessonRefs {
    pub group_id: Uuid,
    pub teacher_id: Uuid,
    pub subject_id: Uuid,
}

impl Lesson {
    /// Builds a lesson from a validated request.
    pub fn new(request: &CreateLessonRequest, refs: LessonRefs, now: DateTime<Utc>) -> CollegeResult<Self> {
        let date = match non_empty(request.date.as_deref()) {
            Some(date) => Some(start_of_day(require_date("date", &date)?)),
            None => None,
        };
        let start_time = non_empty(request.start_time.as_deref());
        let shift = lesson_shift(start_time.as_deref(), request.shift).unwrap_or(UNDETERMINED_SHIFT);

        Ok(Self {
            id: Uuid::nil(),
            group_id: refs.group_id,
            teacher_id: refs.teacher_id,
            subject_id: Some(refs.subject_id),
            room: request.room.clone(),
            date,
            start_time,
            end_time: non_empty(request.end_time.as_deref()),
            shift,
            description: non_empty(request.description.as_deref()),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_available(&self) -> bool {
        self.date.is_none()
    }

    pub fn calendar_date(&self) -> Option<NaiveDate> {
        self.date.map(|date| date.date_naive())
    }
}

/// Shift to write for a lesson.
///
/// An explicit shift greater than zero wins. Otherwise the shift is derived
/// from the start time being written. `None` means the write does not touch
/// the shift.
pub fn lesson_shift(start_time: Option<&str>, explicit: Option<u8>) -> Option<u8> {
    match explicit.filter(|shift| *shift > 0) {
        Some(shift) => Some(shift),
        None => start_time.map(determine_shift),
    }
}

/// Rejects explicit shifts other than 1 or 2. Zero reads as "not supplied".
pub fn validate_lesson_shift(shift: Option<u8>) -> CollegeResult<()> {
    match shift {
        Some(shift) if shift > 0 && !is_valid_shift(shift) => Err(CollegeError::Validation(
            "shift must be 1 or 2".to_string(),
        )),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLessonRequest {
    pub group_id: String,
    pub teacher_id: String,
    pub subject_id: String,
    pub room: String,
    /// "YYYY-MM-DD"; omitted for an available lesson.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    /// Overrides the shift derived from `start_time`.
    #[serde(default)]
    pub shift: Option<u8>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateLessonRequest {
    pub fn validate(&self) -> CollegeResult<()> {
        require_text("group_id", &self.group_id)?;
        require_text("teacher_id", &self.teacher_id)?;
        require_text("subject_id", &self.subject_id)?;
        require_text("room", &self.room)?;
        if let Some(date) = non_empty(self.date.as_deref()) {
            require_date("date", &date)?;
        }
        if let Some(start) = non_empty(self.start_time.as_deref()) {
            require_time("start_time", &start)?;
        }
        if let Some(end) = non_empty(self.end_time.as_deref()) {
            require_time("end_time", &end)?;
        }
        validate_lesson_shift(self.shift)
    }
}

/// Partial lesson update.
///
/// `date: null` unschedules the lesson, returning it to the available pool.
/// Setting `start_time` re-derives the shift unless `shift` is also given.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateLessonRequest {
    #[serde(default)]
    pub group_id: Patch<String>,
    #[serde(default)]
    pub teacher_id: Patch<String>,
    #[serde(default)]
    pub subject_id: Patch<String>,
    #[serde(default)]
    pub room: Patch<String>,
    #[serde(default)]
    pub date: Patch<String>,
    #[serde(default)]
    pub start_time: Patch<String>,
    #[serde(default)]
    pub end_time: Patch<String>,
    #[serde(default)]
    pub shift: Patch<u8>,
    #[serde(default)]
    pub description: Patch<String>,
}

/// Lesson with its references resolved for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonView {
    #[serde(flatten)]
    pub lesson: Lesson,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher: Option<TeacherSummary>,
    pub subject: SubjectSummary,
}

/// Query string accepted by the lesson listing.
///
/// Every field is optional and kept raw: values that fail to parse are
/// ignored rather than rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LessonListQuery {
    pub date: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub group_id: Option<String>,
    pub teacher_id: Option<String>,
    pub shift: Option<String>,
}
