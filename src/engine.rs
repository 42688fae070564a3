//! Field arithmetic.
//!
//! Every field is handled by a [`FieldRule`]. Fields that carry calendar
//! system specific meaning get their own rule; all others use
//! [`CivilTime`], which forwards to the canonical clock and resynchronizes
//! the cached triple afterwards.

use crate::consts::{DAYS_IN_WEEK, FIRST_MONTH, MIN_DAY, MONTHS_IN_YEAR};
use crate::derived;
use crate::types::{Field, YearMonthDay};
use crate::{Calendar, Error};

/// Strategy implementing get/set/add/roll for one field.
///
/// Every method either fails without having touched the calendar's
/// synchronization, or leaves the calendar synchronized.
pub(crate) trait FieldRule: Sync {
    fn get(&self, cal: &Calendar, field: Field) -> Result<i32, Error> {
        cal.clock.get_raw(field)
    }

    fn set(&self, cal: &mut Calendar, field: Field, value: i32) -> Result<(), Error> {
        cal.check_range(field, value)?;
        cal.raw_mut().set_raw(field, value)?;
        cal.invalidate();
        Ok(())
    }

    fn add(&self, cal: &mut Calendar, field: Field, amount: i32) -> Result<(), Error> {
        cal.raw_mut().add_raw(field, amount)?;
        cal.invalidate();
        Ok(())
    }

    fn roll(&self, cal: &mut Calendar, field: Field, amount: i32) -> Result<(), Error> {
        cal.raw_mut().roll_raw(field, amount)?;
        cal.invalidate();
        Ok(())
    }

    fn actual_maximum(&self, cal: &Calendar, field: Field) -> Result<i32, Error> {
        Ok(cal.maximum(field))
    }
}

struct CivilTime;
struct Year;
struct Month;
struct WeekOfYear;
struct WeekOfMonth;
struct DayOfMonth;
struct DayOfYear;
struct DayOfWeek;
struct DayOfWeekInMonth;

/// Rules indexed by field code.
static RULES: [&dyn FieldRule; Field::COUNT] = [
    &CivilTime,        // ERA
    &Year,             // YEAR
    &Month,            // MONTH
    &WeekOfYear,       // WEEK_OF_YEAR
    &WeekOfMonth,      // WEEK_OF_MONTH
    &DayOfMonth,       // DAY_OF_MONTH
    &DayOfYear,        // DAY_OF_YEAR
    &DayOfWeek,        // DAY_OF_WEEK
    &DayOfWeekInMonth, // DAY_OF_WEEK_IN_MONTH
    &CivilTime,        // AM_PM
    &CivilTime,        // HOUR
    &CivilTime,        // HOUR_OF_DAY
    &CivilTime,        // MINUTE
    &CivilTime,        // SECOND
    &CivilTime,        // MILLISECOND
];

pub(crate) fn rule_for(field: Field) -> &'static dyn FieldRule {
    RULES[field as usize]
}

impl FieldRule for CivilTime {}

/// Moves the cached day to the nearest bound, then lets `add` carry the
/// overflow into the neighboring fields. Only for fields whose bound step
/// leaves the other fields alone.
fn set_with_overflow(
    cal: &mut Calendar,
    field: Field,
    value: i32,
    adopt_bound: impl Fn(&mut Calendar, i32) -> Result<(), Error>,
) -> Result<(), Error> {
    let min = cal.actual_minimum(field);
    let max = cal.actual_maximum(field)?;
    if value < min {
        debug!("{field}={value} below {min}, cascading {}", value - min);
        adopt_bound(cal, min)?;
        cal.add_unchecked(field, value - min)
    } else if value > max {
        debug!("{field}={value} above {max}, cascading {}", value - max);
        adopt_bound(cal, max)?;
        cal.add_unchecked(field, value - max)
    } else {
        adopt_bound(cal, value)
    }
}

fn clamp_day(cal: &Calendar, year: i32, month: i32, day: i32) -> YearMonthDay {
    YearMonthDay::new(year, month, day.min(cal.system().month_length(year, month)))
}

/// Checks a target year against the system's range. `year` is wide so an
/// overflowing target is still reported faithfully.
fn checked_year(cal: &Calendar, year: i64) -> Result<i32, Error> {
    let min = cal.minimum(Field::Year);
    let max = cal.maximum(Field::Year);
    i32::try_from(year)
        .ok()
        .filter(|y| (min..=max).contains(y))
        .ok_or_else(|| Error::InvalidArgument {
            field: Field::Year,
            value: i32::try_from(year).unwrap_or(if year < 0 { i32::MIN } else { i32::MAX }),
            min,
            max,
        })
}

impl FieldRule for Year {
    fn get(&self, cal: &Calendar, _field: Field) -> Result<i32, Error> {
        Ok(cal.cached.year)
    }

    fn set(&self, cal: &mut Calendar, field: Field, value: i32) -> Result<(), Error> {
        cal.check_range(field, value)?;
        let date = clamp_day(cal, value, cal.cached.month, cal.cached.day);
        cal.adopt(date)
    }

    fn add(&self, cal: &mut Calendar, _field: Field, amount: i32) -> Result<(), Error> {
        let year = checked_year(cal, i64::from(cal.cached.year) + i64::from(amount))?;
        let date = clamp_day(cal, year, cal.cached.month, cal.cached.day);
        cal.adopt(date)
    }

    // A year has no higher field to protect, so rolling is adding.
    fn roll(&self, cal: &mut Calendar, field: Field, amount: i32) -> Result<(), Error> {
        self.add(cal, field, amount)
    }
}

impl FieldRule for Month {
    fn get(&self, cal: &Calendar, _field: Field) -> Result<i32, Error> {
        Ok(cal.cached.month)
    }

    // Out-of-range months cascade in one step so the day is clamped only
    // against the month finally reached.
    fn set(&self, cal: &mut Calendar, field: Field, value: i32) -> Result<(), Error> {
        if (cal.minimum(field)..=cal.maximum(field)).contains(&value) {
            let date = clamp_day(cal, cal.cached.year, value, cal.cached.day);
            return cal.adopt(date);
        }
        debug!("{field}={value} out of range, cascading from {}", cal.cached.month);
        self.add(cal, field, value.saturating_sub(cal.cached.month))
    }

    fn add(&self, cal: &mut Calendar, _field: Field, amount: i32) -> Result<(), Error> {
        let total = i64::from(cal.cached.month) + i64::from(amount);
        let months = i64::from(MONTHS_IN_YEAR);
        let year = checked_year(cal, i64::from(cal.cached.year) + total.div_euclid(months))?;
        // rem_euclid by 12 always fits
        let month = i32::try_from(total.rem_euclid(months)).unwrap_or(FIRST_MONTH);
        let date = clamp_day(cal, year, month, cal.cached.day);
        cal.adopt(date)
    }

    fn roll(&self, cal: &mut Calendar, _field: Field, amount: i32) -> Result<(), Error> {
        let month = (cal.cached.month + amount.rem_euclid(MONTHS_IN_YEAR)) % MONTHS_IN_YEAR;
        let date = clamp_day(cal, cal.cached.year, month, cal.cached.day);
        cal.adopt(date)
    }
}

impl FieldRule for DayOfMonth {
    fn get(&self, cal: &Calendar, _field: Field) -> Result<i32, Error> {
        Ok(cal.cached.day)
    }

    fn set(&self, cal: &mut Calendar, field: Field, value: i32) -> Result<(), Error> {
        set_with_overflow(cal, field, value, |cal, day| {
            let date = YearMonthDay { day, ..cal.cached };
            cal.adopt(date)
        })
    }

    fn roll(&self, cal: &mut Calendar, _field: Field, amount: i32) -> Result<(), Error> {
        let length = cal.month_length();
        let day = (cal.cached.day - MIN_DAY + amount.rem_euclid(length)) % length + MIN_DAY;
        let date = YearMonthDay { day, ..cal.cached };
        cal.adopt(date)
    }

    fn actual_maximum(&self, cal: &Calendar, _field: Field) -> Result<i32, Error> {
        Ok(cal.month_length())
    }
}

impl FieldRule for DayOfYear {
    fn get(&self, cal: &Calendar, _field: Field) -> Result<i32, Error> {
        Ok(derived::day_of_year(cal.system(), cal.cached))
    }

    fn set(&self, cal: &mut Calendar, field: Field, value: i32) -> Result<(), Error> {
        set_with_overflow(cal, field, value, |cal, day_of_year| {
            let date = cal.system().from_day_of_year(cal.cached.year, day_of_year)?;
            cal.adopt(date)
        })
    }

    fn roll(&self, cal: &mut Calendar, field: Field, amount: i32) -> Result<(), Error> {
        let length = cal.year_length();
        let current = self.get(cal, field)?;
        let day_of_year = (current - 1 + amount.rem_euclid(length)) % length + 1;
        let date = cal.system().from_day_of_year(cal.cached.year, day_of_year)?;
        cal.adopt(date)
    }

    fn actual_maximum(&self, cal: &Calendar, _field: Field) -> Result<i32, Error> {
        Ok(cal.year_length())
    }
}

impl FieldRule for DayOfWeek {
    fn roll(&self, cal: &mut Calendar, _field: Field, amount: i32) -> Result<(), Error> {
        if amount % DAYS_IN_WEEK == 0 {
            return Ok(());
        }
        let offset = cal.weekday_offset(cal.cached)?;
        let target = (offset + amount.rem_euclid(DAYS_IN_WEEK)) % DAYS_IN_WEEK;
        let date = cal.system().shift_by_days(cal.cached, target - offset)?;
        cal.adopt(date)
    }
}

/// Moves to week `week` of the period of `length` days starting at
/// `period_start`, keeping the current weekday.
///
/// The first and last weeks can be partial. When the weekday is missing
/// from the target week the date is clamped to the period's first or last
/// day, so the week number always reads back as `week`.
fn set_week(
    cal: &mut Calendar,
    period_start: YearMonthDay,
    length: i32,
    week: i32,
) -> Result<(), Error> {
    let anchor = cal.weekday_offset(period_start)?;
    let offset = cal.weekday_offset(cal.cached)?;
    let delta = derived::days_into_week(week, anchor, offset).clamp(0, length - 1);
    let date = cal.system().shift_by_days(period_start, delta)?;
    cal.adopt(date)
}

/// Ordinal (day of year or of month) reached when rolling the week of
/// `ordinal` by `amount` weeks inside a period of `length` days.
///
/// Each week index maps to a day seven days from its neighbor, clamped into
/// the period, so the first and last weeks land on the period's bounds.
fn roll_week(week: i32, weeks: i32, ordinal: i32, length: i32, amount: i32) -> i32 {
    let count = usize::try_from(weeks).unwrap_or_default();
    let current = usize::try_from(week - 1).unwrap_or_default();
    let mut starts = vec![ordinal; count];
    for i in current + 1..count {
        starts[i] = (starts[i - 1] + DAYS_IN_WEEK).min(length);
    }
    for i in (0..current).rev() {
        starts[i] = (starts[i + 1] - DAYS_IN_WEEK).max(MIN_DAY);
    }
    debug!("week table {starts:?}, current week {week}");

    let target = (week - 1 + amount.rem_euclid(weeks)) % weeks;
    starts
        .get(usize::try_from(target).unwrap_or_default())
        .copied()
        .unwrap_or(ordinal)
}

impl FieldRule for WeekOfYear {
    fn get(&self, cal: &Calendar, _field: Field) -> Result<i32, Error> {
        cal.week_of_year(cal.cached)
    }

    fn set(&self, cal: &mut Calendar, field: Field, value: i32) -> Result<(), Error> {
        cal.check_range(field, value)?;
        let length = cal.year_length();
        set_week(cal, YearMonthDay::first_of_year(cal.cached.year), length, value)
    }

    fn roll(&self, cal: &mut Calendar, field: Field, amount: i32) -> Result<(), Error> {
        let week = self.get(cal, field)?;
        let weeks = self.actual_maximum(cal, field)?;
        let ordinal = derived::day_of_year(cal.system(), cal.cached);
        let day_of_year = roll_week(week, weeks, ordinal, cal.year_length(), amount);
        let date = cal.system().from_day_of_year(cal.cached.year, day_of_year)?;
        cal.adopt(date)
    }

    fn actual_maximum(&self, cal: &Calendar, _field: Field) -> Result<i32, Error> {
        let last = cal.system().from_day_of_year(cal.cached.year, cal.year_length())?;
        cal.week_of_year(last)
    }
}

impl FieldRule for WeekOfMonth {
    fn get(&self, cal: &Calendar, _field: Field) -> Result<i32, Error> {
        cal.week_of_month(cal.cached)
    }

    fn set(&self, cal: &mut Calendar, field: Field, value: i32) -> Result<(), Error> {
        cal.check_range(field, value)?;
        let length = cal.month_length();
        set_week(cal, cal.cached.first_of_month(), length, value)
    }

    fn roll(&self, cal: &mut Calendar, field: Field, amount: i32) -> Result<(), Error> {
        let week = self.get(cal, field)?;
        let weeks = self.actual_maximum(cal, field)?;
        let day = roll_week(week, weeks, cal.cached.day, cal.month_length(), amount);
        let date = YearMonthDay { day, ..cal.cached };
        cal.adopt(date)
    }

    fn actual_maximum(&self, cal: &Calendar, _field: Field) -> Result<i32, Error> {
        let last = YearMonthDay {
            day: cal.month_length(),
            ..cal.cached
        };
        cal.week_of_month(last)
    }
}

impl FieldRule for DayOfWeekInMonth {
    fn get(&self, cal: &Calendar, _field: Field) -> Result<i32, Error> {
        Ok(derived::day_of_week_in_month(cal.cached.day))
    }

    /// Positive values count occurrences of the current weekday from the
    /// start of the month, negative values from its end, and zero means the
    /// occurrence just before the month starts.
    ///
    /// Values beyond the number of times the current weekday occurs in the
    /// month are rejected.
    fn set(&self, cal: &mut Calendar, field: Field, value: i32) -> Result<(), Error> {
        let max = occurrences(cal.cached.day, cal.month_length());
        if !(-max..=max).contains(&value) {
            return Err(Error::InvalidArgument {
                field,
                value,
                min: -max,
                max,
            });
        }

        let offset = cal.weekday_offset(cal.cached)?;
        let (base, delta) = match value {
            1.. => {
                let current = self.get(cal, field)?;
                (cal.cached, (value - current) * DAYS_IN_WEEK)
            }
            0 => {
                let first = cal.cached.first_of_month();
                let mut delta = offset - cal.weekday_offset(first)?;
                if delta >= 0 {
                    delta -= DAYS_IN_WEEK;
                }
                (first, delta)
            }
            _ => {
                let last = YearMonthDay {
                    day: cal.month_length(),
                    ..cal.cached
                };
                let mut delta = offset - cal.weekday_offset(last)?;
                if delta > 0 {
                    delta -= DAYS_IN_WEEK;
                }
                (last, delta + DAYS_IN_WEEK * (value + 1))
            }
        };
        let date = cal.system().shift_by_days(base, delta)?;
        cal.adopt(date)
    }

    fn roll(&self, cal: &mut Calendar, _field: Field, amount: i32) -> Result<(), Error> {
        // Days sharing the current weekday: first, first + 7, ... up to the
        // end of the month.
        let count = occurrences(cal.cached.day, cal.month_length());
        let first = first_occurrence(cal.cached.day);
        let index = (cal.cached.day - first) / DAYS_IN_WEEK;
        let target = (index + amount.rem_euclid(count)) % count;
        let date = YearMonthDay {
            day: first + target * DAYS_IN_WEEK,
            ..cal.cached
        };
        cal.adopt(date)
    }

    fn actual_maximum(&self, cal: &Calendar, _field: Field) -> Result<i32, Error> {
        Ok(derived::day_of_week_in_month(cal.month_length()))
    }
}

/// Earliest day of the month sharing the weekday of `day`.
const fn first_occurrence(day: i32) -> i32 {
    (day - MIN_DAY) % DAYS_IN_WEEK + MIN_DAY
}

/// Number of days in a month of `length` days sharing the weekday of `day`.
const fn occurrences(day: i32, length: i32) -> i32 {
    (length - first_occurrence(day)) / DAYS_IN_WEEK + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_table_is_indexed_by_code() {
        assert_eq!(RULES.len(), Field::ALL.len());
        for field in Field::ALL {
            // Dispatch must not panic for any field.
            let _ = rule_for(field);
        }
    }

    #[test]
    fn test_roll_week_wraps_forward_and_back() {
        // 31 day month, current day 10 in week 2 of 5
        assert_eq!(roll_week(2, 5, 10, 31, 1), 17);
        assert_eq!(roll_week(2, 5, 10, 31, 3), 31);
        assert_eq!(roll_week(2, 5, 10, 31, -1), 3);
        assert_eq!(roll_week(2, 5, 10, 31, 4), 3);
        assert_eq!(roll_week(2, 5, 10, 31, 5), 10);
    }

    #[test]
    fn test_occurrences_of_weekday() {
        // 29 day month: days 1 and 8 occur five times only when day 29 exists
        assert_eq!(occurrences(1, 29), 5);
        assert_eq!(occurrences(3, 29), 4);
        assert_eq!(occurrences(24, 29), 4);
        assert_eq!(occurrences(3, 31), 5);
        assert_eq!(occurrences(4, 31), 4);
        assert_eq!(first_occurrence(24), 3);
    }

    #[test]
    fn test_roll_week_clamps_to_period() {
        // Day 2 in week 2 of 6: week 1 would start at day -5
        assert_eq!(roll_week(2, 6, 2, 30, -1), 1);
        // Day 29 in week 5 of 6: week 6 would start at day 36
        assert_eq!(roll_week(5, 6, 29, 30, 1), 30);
    }
}
