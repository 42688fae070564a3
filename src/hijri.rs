//! The lunar hijri calendar, tabular (civil) variant.
//!
//! Months alternate between 30 and 29 days, starting with 30. Eleven years
//! of every 30 year cycle are leap, adding a 30th day to Dhu al-Hijjah.

use crate::consts::{
    HIJRI_COMMON_YEAR_DAYS, HIJRI_CYCLE_LEAPS, HIJRI_CYCLE_YEARS, HIJRI_EPOCH_JULIAN_DAY,
    LAST_MONTH, UNIX_EPOCH_JULIAN_DAY,
};
use crate::range::RangeTable;
use crate::system::CalendarSystem;
use crate::types::{CalendarKind, Field};

/// Epoch day of 1 Muharram 1
const EPOCH: i32 = HIJRI_EPOCH_JULIAN_DAY - UNIX_EPOCH_JULIAN_DAY;
/// Days in one 30 year cycle
const CYCLE_DAYS: i64 =
    HIJRI_COMMON_YEAR_DAYS as i64 * HIJRI_CYCLE_YEARS as i64 + HIJRI_CYCLE_LEAPS as i64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hijri;

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
        (Field::Year, 9665),
        (Field::Month, 11),
        (Field::WeekOfYear, 52),
        (Field::WeekOfMonth, 6),
        (Field::DayOfMonth, 30),
        (Field::DayOfYear, 355),
        (Field::DayOfWeek, 7),
        (Field::DayOfWeekInMonth, 5),
    ],
    least_maximum: &[
        (Field::Year, 9665),
        (Field::Month, 11),
        (Field::WeekOfYear, 51),
        (Field::WeekOfMonth, 5),
        (Field::DayOfMonth, 29),
        (Field::DayOfYear, 354),
        (Field::DayOfWeek, 7),
        (Field::DayOfWeekInMonth, 5),
    ],
};

impl CalendarSystem for Hijri {
    fn kind(&self) -> CalendarKind {
        CalendarKind::Hijri
    }

    fn is_leap_year(&self, year: i32) -> bool {
        (14 + HIJRI_CYCLE_LEAPS * year).rem_euclid(HIJRI_CYCLE_YEARS) < HIJRI_CYCLE_LEAPS
    }

    fn month_length(&self, year: i32, month: i32) -> i32 {
        if month % 2 == 0 || (month == LAST_MONTH && self.is_leap_year(year)) {
            30
        } else {
            29
        }
    }

    fn days_before_month(&self, _year: i32, month: i32) -> i32 {
        // ceil(29.5 * month)
        (59 * month + 1) / 2
    }

    fn first_epoch_day(&self, year: i32) -> i32 {
        EPOCH
            + HIJRI_COMMON_YEAR_DAYS * (year - 1)
            + (3 + HIJRI_CYCLE_LEAPS * year).div_euclid(HIJRI_CYCLE_YEARS)
    }

    fn estimate_year(&self, epoch_day: i32) -> i32 {
        let elapsed = i64::from(epoch_day) - i64::from(EPOCH);
        let years = (i64::from(HIJRI_CYCLE_YEARS) * elapsed + 10_646).div_euclid(CYCLE_DAYS);
        i32::try_from(years).unwrap_or(i32::MAX)
    }

    fn ranges(&self) -> &'static RangeTable {
        &RANGES
    }

    fn unsupported_fields(&self) -> &'static [Field] {
        &[Field::Era]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::sum_of_months;
    use crate::types::YearMonthDay;

    #[test]
    fn test_leap_years() {
        let leaps: Vec<i32> = (1440..1450).filter(|&y| Hijri.is_leap_year(y)).collect();
        assert_eq!(leaps, vec![1442, 1445, 1447]);
    }

    #[test]
    fn test_month_lengths() {
        assert_eq!(Hijri.month_length(1444, 0), 30);
        assert_eq!(Hijri.month_length(1444, 1), 29);
        assert_eq!(Hijri.month_length(1444, 11), 29);
        assert_eq!(Hijri.month_length(1445, 11), 30);
    }

    #[test]
    fn test_year_length_matches_months() {
        for year in 1420..1480 {
            assert_eq!(Hijri.year_length(year), sum_of_months(&Hijri, year), "{year}");
            assert_eq!(
                Hijri.year_length(year),
                Hijri.first_epoch_day(year + 1) - Hijri.first_epoch_day(year),
                "{year}"
            );
        }
    }

    #[test]
    fn test_known_conversions() {
        // 1 Ramadan 1442 and 1 Muharram 1445
        let ramadan = YearMonthDay::new(1442, 8, 1);
        assert_eq!(Hijri.to_canonical(ramadan).unwrap(), YearMonthDay::new(2021, 3, 13));
        let new_year = YearMonthDay::new(2023, 6, 19);
        assert_eq!(Hijri.from_canonical(new_year).unwrap(), YearMonthDay::new(1445, 0, 1));
    }

    #[test]
    fn test_round_trip_every_day_of_a_cycle() {
        let start = Hijri.first_epoch_day(1430);
        let end = Hijri.first_epoch_day(1460);
        for epoch_day in start..end {
            let date = Hijri.from_epoch_day(epoch_day);
            assert_eq!(Hijri.to_epoch_day(date).unwrap(), epoch_day, "{date}");
            let canonical = Hijri.to_canonical(date).unwrap();
            assert_eq!(Hijri.from_canonical(canonical).unwrap(), date);
        }
    }

    #[test]
    fn test_day_of_year() {
        assert_eq!(Hijri.day_of_year(YearMonthDay::new(1445, 11, 30)), 355);
        assert_eq!(
            Hijri.from_day_of_year(1445, 60).unwrap(),
            YearMonthDay::new(1445, 2, 1)
        );
        assert!(Hijri.from_day_of_year(1444, 355).is_err());
    }
}
