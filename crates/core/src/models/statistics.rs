use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Day names indexed by `day_of_week - 1`.
pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Number of entries in each top-N ranking.
pub const TOP_LIMIT: usize = 10;

/// Default statistics window, in days back from today.
pub const DEFAULT_PERIOD_DAYS: i64 = 30;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatisticsQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub group_id: Option<String>,
    pub teacher_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsPeriod {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftCounts {
    pub first_shift: u64,
    pub second_shift: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayOfWeekCount {
    pub day_of_week: u8,
    pub name: String,
    pub count: u64,
}

/// One row of a top-N ranking. `name` is omitted when the teacher or group
/// it points at no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub id: Uuid,
    pub count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonStatistics {
    pub period: StatisticsPeriod,
    /// Lessons matching the filter, including those with an undetermined shift.
    pub total_lessons: u64,
    pub by_shift: ShiftCounts,
    pub by_day_of_week: Vec<DayOfWeekCount>,
    pub top_teachers: Vec<RankedEntry>,
    pub top_groups: Vec<RankedEntry>,
}
