//! # Shift Classification
//!
//! The college runs two daily sessions. A lesson's shift is derived from its
//! start time using fixed minute-of-day bands:
//!
//! - first shift: 08:00 to 12:30 (minutes 480..=750)
//! - second shift: 12:40 to 17:00 (minutes 760..=1020)
//!
//! Anything outside those bands, including the ten-minute gap between them,
//! is undetermined.

use std::ops::RangeInclusive;

/// Shift code for a start time that falls in neither band.
pub const UNDETERMINED_SHIFT: u8 = 0;
pub const FIRST_SHIFT: u8 = 1;
pub const SECOND_SHIFT: u8 = 2;

const FIRST_SHIFT_MINUTES: RangeInclusive<i64> = 480..=750;
const SECOND_SHIFT_MINUTES: RangeInclusive<i64> = 760..=1020;

/// Maps an `"HH:MM"` start time to a shift code.
///
/// Never fails: malformed input (wrong number of parts, non-numeric parts,
/// empty string) yields [`UNDETERMINED_SHIFT`].
///
/// # Example
///
/// ```
/// use college_core::shift::determine_shift;
///
/// assert_eq!(determine_shift("08:00"), 1);
/// assert_eq!(determine_shift("12:40"), 2);
/// assert_eq!(determine_shift("12:35"), 0);
/// ```
pub fn determine_shift(start_time: &str) -> u8 {
    let Some((hour, minute)) = start_time.split_once(':') else {
        return UNDETERMINED_SHIFT;
    };

    let (Ok(hour), Ok(minute)) = (hour.parse::<i64>(), minute.parse::<i64>()) else {
        return UNDETERMINED_SHIFT;
    };

    let total_minutes = hour.saturating_mul(60).saturating_add(minute);

    if FIRST_SHIFT_MINUTES.contains(&total_minutes) {
        FIRST_SHIFT
    } else if SECOND_SHIFT_MINUTES.contains(&total_minutes) {
        SECOND_SHIFT
    } else {
        UNDETERMINED_SHIFT
    }
}

/// Returns true for the two shift codes a caller may set explicitly.
pub fn is_valid_shift(shift: u8) -> bool {
    shift == FIRST_SHIFT || shift == SECOND_SHIFT
}
