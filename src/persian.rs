//! The solar hijri (Persian) calendar.
//!
//! Uses the arithmetic 33 year cycle: eight leap years per cycle, a year
//! being leap when `(25 * year + 11) mod 33 < 8`. The first six months have
//! 31 days, the next five 30, and Esfand has 29 days (30 in leap years).

use crate::consts::{
    LAST_MONTH, PERSIAN_CYCLE_LEAPS, PERSIAN_CYCLE_YEARS, PERSIAN_EPOCH_JULIAN_DAY,
    UNIX_EPOCH_JULIAN_DAY,
};
use crate::range::RangeTable;
use crate::system::CalendarSystem;
use crate::types::{CalendarKind, Field};

/// Epoch day of 1 Farvardin 1
const EPOCH: i32 = PERSIAN_EPOCH_JULIAN_DAY - UNIX_EPOCH_JULIAN_DAY;
/// Days in one 33 year cycle
const CYCLE_DAYS: i64 = 365 * PERSIAN_CYCLE_YEARS as i64 + PERSIAN_CYCLE_LEAPS as i64;
/// Months with 31 days, all at the start of the year
const LONG_MONTHS: i32 = 6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Persian;

static RANGES: RangeTable = RangeTable {
    minimum: &[
        (Field::Year, 1),
        (Field::Month, 0),
        (Field::WeekOfYear, 1),
        (Field::WeekOfMonth, 1),
        (Field::DayOfMonth, 1),
        (Field::DayOfYear, 1),
        (Field::DayOfWeek, 1),
        (Field::DayOfWeekInMonth, 1),
    ],
    maximum: &[
        (Field::Year, 9377),
        (Field::Month, 11),
        (Field::WeekOfYear, 54),
        (Field::WeekOfMonth, 6),
        (Field::DayOfMonth, 31),
        (Field::DayOfYear, 366),
        (Field::DayOfWeek, 7),
        (Field::DayOfWeekInMonth, 5),
    ],
    least_maximum: &[
        (Field::Year, 9377),
        (Field::Month, 11),
        (Field::WeekOfYear, 53),
        (Field::WeekOfMonth, 5),
        (Field::DayOfMonth, 29),
        (Field::DayOfYear, 365),
        (Field::DayOfWeek, 7),
        (Field::DayOfWeekInMonth, 5),
    ],
};

impl CalendarSystem for Persian {
    fn kind(&self) -> CalendarKind {
        CalendarKind::Persian
    }

    fn is_leap_year(&self, year: i32) -> bool {
        (25 * year + 11).rem_euclid(PERSIAN_CYCLE_YEARS) < PERSIAN_CYCLE_LEAPS
    }

    fn month_length(&self, year: i32, month: i32) -> i32 {
        if month < LONG_MONTHS {
            31
        } else if month < LAST_MONTH || self.is_leap_year(year) {
            30
        } else {
            29
        }
    }

    fn days_before_month(&self, _year: i32, month: i32) -> i32 {
        if month <= LONG_MONTHS {
            31 * month
        } else {
            31 * LONG_MONTHS + 30 * (month - LONG_MONTHS)
        }
    }

    fn first_epoch_day(&self, year: i32) -> i32 {
        EPOCH + 365 * (year - 1) + (PERSIAN_CYCLE_LEAPS * year + 21).div_euclid(PERSIAN_CYCLE_YEARS)
    }

    fn estimate_year(&self, epoch_day: i32) -> i32 {
        let elapsed = i64::from(epoch_day) - i64::from(EPOCH);
        let years = (i64::from(PERSIAN_CYCLE_YEARS) * elapsed + 3).div_euclid(CYCLE_DAYS);
        i32::try_from(years + 1).unwrap_or(i32::MAX)
    }

    fn ranges(&self) -> &'static RangeTable {
        &RANGES
    }

    fn unsupported_fields(&self) -> &'static [Field] {
        &[Field::Era]
    }
}
