//! Week, day-of-year and weekday-in-month numbers derived from a date triple.
//!
//! Weeks are numbered from 1, anchored at the first day of the year or
//! month: week 1 runs up to the day before the first `first_day_of_week`,
//! and every later week starts on `first_day_of_week`.

use crate::clock::CanonicalClock;
use crate::consts::{DAYS_IN_WEEK, MIN_DAY};
use crate::system::CalendarSystem;
use crate::types::{Weekday, YearMonthDay};
use crate::Error;

/// Weekday of a date of any calendar system.
///
/// # Errors
/// Returns an error if `date` is not valid in `system`.
pub fn weekday(system: &dyn CalendarSystem, date: YearMonthDay) -> Result<Weekday, Error> {
    CanonicalClock::weekday_of(system.to_canonical(date)?)
}

/// Position of the weekday of `date` inside its week, in `0..7`.
///
/// # Errors
/// Returns an error if `date` is not valid in `system`.
pub fn weekday_offset(
    system: &dyn CalendarSystem,
    date: YearMonthDay,
    first_day_of_week: Weekday,
) -> Result<i32, Error> {
    Ok(weekday(system, date)?.offset_from(first_day_of_week))
}

/// # Errors
/// Returns an error if `date` is not valid in `system`.
pub fn week_of_year(
    system: &dyn CalendarSystem,
    date: YearMonthDay,
    first_day_of_week: Weekday,
) -> Result<i32, Error> {
    let anchor = weekday_offset(system, YearMonthDay::first_of_year(date.year), first_day_of_week)?;
    Ok(week_number(anchor, system.day_of_year(date)))
}

/// # Errors
/// Returns an error if `date` is not valid in `system`.
pub fn week_of_month(
    system: &dyn CalendarSystem,
    date: YearMonthDay,
    first_day_of_week: Weekday,
) -> Result<i32, Error> {
    let anchor = weekday_offset(system, date.first_of_month(), first_day_of_week)?;
    Ok(week_number(anchor, date.day))
}

pub fn day_of_year(system: &dyn CalendarSystem, date: YearMonthDay) -> i32 {
    system.day_of_year(date)
}

/// Days 1-7 are the first occurrence of their weekday, 8-14 the second, and
/// so on.
pub const fn day_of_week_in_month(day: i32) -> i32 {
    (day - MIN_DAY) / DAYS_IN_WEEK + 1
}

/// Week containing the `ordinal`-th day of a period whose first day sits at
/// `anchor` inside its week.
const fn week_number(anchor: i32, ordinal: i32) -> i32 {
    1 + (anchor + ordinal - 1) / DAYS_IN_WEEK
}

/// Days from the anchor of a period to the day with weekday offset
/// `offset` in week `week`. Inverse of the week numbering above.
pub const fn days_into_week(week: i32, anchor: i32, offset: i32) -> i32 {
    (week - 1) * DAYS_IN_WEEK + (offset - anchor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::civil::Civil;
    use crate::persian::Persian;

    #[test]
    fn test_day_of_week_in_month_buckets() {
        let cases = [(1, 1), (7, 1), (8, 2), (14, 2), (15, 3), (21, 3), (22, 4), (28, 4), (29, 5), (31, 5)];
        for (day, bucket) in cases {
            assert_eq!(day_of_week_in_month(day), bucket, "day {day}");
        }
    }

    #[test]
    fn test_week_of_year_persian() {
        // 1 Farvardin 1400 is a Sunday; weeks start on Saturday
        let first = Weekday::Saturday;
        assert_eq!(week_of_year(&Persian, YearMonthDay::new(1400, 0, 1), first).unwrap(), 1);
        assert_eq!(week_of_year(&Persian, YearMonthDay::new(1400, 0, 6), first).unwrap(), 1);
        assert_eq!(week_of_year(&Persian, YearMonthDay::new(1400, 0, 7), first).unwrap(), 2);
        assert_eq!(week_of_year(&Persian, YearMonthDay::new(1400, 11, 29), first).unwrap(), 53);
    }

    #[test]
    fn test_week_of_month_civil() {
        // March 2021 starts on a Monday
        let first = Weekday::Sunday;
        assert_eq!(week_of_month(&Civil, YearMonthDay::new(2021, 2, 1), first).unwrap(), 1);
        assert_eq!(week_of_month(&Civil, YearMonthDay::new(2021, 2, 6), first).unwrap(), 1);
        assert_eq!(week_of_month(&Civil, YearMonthDay::new(2021, 2, 7), first).unwrap(), 2);
        assert_eq!(week_of_month(&Civil, YearMonthDay::new(2021, 2, 31), first).unwrap(), 5);

        let first = Weekday::Monday;
        assert_eq!(week_of_month(&Civil, YearMonthDay::new(2021, 2, 31), first).unwrap(), 5);
        assert_eq!(week_of_month(&Civil, YearMonthDay::new(2021, 2, 29), first).unwrap(), 5);
        assert_eq!(week_of_month(&Civil, YearMonthDay::new(2021, 2, 28), first).unwrap(), 4);
    }

    #[test]
    fn test_days_into_week_inverts_week_number() {
        for anchor in 0..DAYS_IN_WEEK {
            for ordinal in 1..=31 {
                let week = week_number(anchor, ordinal);
                let offset = (anchor + ordinal - 1) % DAYS_IN_WEEK;
                assert_eq!(days_into_week(week, anchor, offset), ordinal - 1);
            }
        }
    }

    #[test]
    fn test_weekday_across_systems() {
        let civil = weekday(&Civil, YearMonthDay::new(2021, 2, 21)).unwrap();
        let persian = weekday(&Persian, YearMonthDay::new(1400, 0, 1)).unwrap();
        assert_eq!(civil, Weekday::Sunday);
        assert_eq!(persian, civil);
    }
}
