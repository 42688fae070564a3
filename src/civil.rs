use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LAST_MONTH,
    LEAP_YEAR_CYCLE,
};
use crate::range::RangeTable;
use crate::system::CalendarSystem;
use crate::types::{CalendarKind, Field};

/// Days in one 400 year Gregorian cycle
const DAYS_PER_CYCLE: i64 = 146_097;
/// Days from 0000-03-01 to 1970-01-01
const DAYS_TO_UNIX_EPOCH: i32 = 719_468;

/// The proleptic Gregorian calendar. Its conversions are the identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Civil;

static RANGES: RangeTable = RangeTable {
    minimum: &[
        (Field::Era, 1),
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
        (Field::Era, 1),
        (Field::Year, 9999),
        (Field::Month, 11),
        (Field::WeekOfYear, 54),
        (Field::WeekOfMonth, 6),
        (Field::DayOfMonth, 31),
        (Field::DayOfYear, 366),
        (Field::DayOfWeek, 7),
        (Field::DayOfWeekInMonth, 5),
    ],
    least_maximum: &[
        (Field::Era, 1),
        (Field::Year, 9999),
        (Field::Month, 11),
        (Field::WeekOfYear, 53),
        (Field::WeekOfMonth, 4),
        (Field::DayOfMonth, 28),
        (Field::DayOfYear, 365),
        (Field::DayOfWeek, 7),
        (Field::DayOfWeekInMonth, 4),
    ],
};

pub const fn is_leap_year(year: i32) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

/// Days in a zero-based month; zero for a month outside `0..12`.
pub const fn days_in_month(year: i32, month: i32) -> i32 {
    if month == FEBRUARY && is_leap_year(year) {
        return FEBRUARY_DAYS_LEAP;
    }
    match month {
        #[allow(clippy::cast_sign_loss)]
        0..=LAST_MONTH => DAYS_IN_MONTH[month as usize],
        _ => 0,
    }
}

/// Days since 1970-01-01 of a Gregorian date with a zero-based month.
///
/// The year is shifted to start in March so the leap day falls last.
pub const fn days_from_civil(year: i32, month: i32, day: i32) -> i32 {
    let month = month + 1;
    let year = if month <= 2 { year - 1 } else { year };
    let era = year.div_euclid(GREGORIAN_CYCLE);
    let year_of_era = year - era * GREGORIAN_CYCLE;
    let shifted_month = if month > 2 { month - 3 } else { month + 9 };
    let day_of_shifted_year = (153 * shifted_month + 2) / 5 + day - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_shifted_year;
    era * DAYS_PER_CYCLE as i32 + day_of_era - DAYS_TO_UNIX_EPOCH
}

impl CalendarSystem for Civil {
    fn kind(&self) -> CalendarKind {
        CalendarKind::Civil
    }

    fn is_leap_year(&self, year: i32) -> bool {
        is_leap_year(year)
    }

    fn month_length(&self, year: i32, month: i32) -> i32 {
        days_in_month(year, month)
    }

    fn days_before_month(&self, year: i32, month: i32) -> i32 {
        (0..month).map(|m| days_in_month(year, m)).sum()
    }

    fn first_epoch_day(&self, year: i32) -> i32 {
        days_from_civil(year, 0, 1)
    }

    fn estimate_year(&self, epoch_day: i32) -> i32 {
        let years = (i64::from(epoch_day) * i64::from(GREGORIAN_CYCLE)).div_euclid(DAYS_PER_CYCLE);
        // |epoch_day| is bounded well below i32::MAX / 400 * 146097
        i32::try_from(years + 1970).unwrap_or(i32::MAX)
    }

    fn ranges(&self) -> &'static RangeTable {
        &RANGES
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::sum_of_months;
    use crate::types::YearMonthDay;

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year: i32,
            is_leap: bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year: 2024,
                is_leap: true,
                description: "divisible by 4",
            },
            TestCase {
                year: 2023,
                is_leap: false,
                description: "not divisible by 4",
            },
            TestCase {
                year: 1900,
                is_leap: false,
                description: "century not divisible by 400",
            },
            TestCase {
                year: 2100,
                is_leap: false,
                description: "century not divisible by 400",
            },
            TestCase {
                year: 2000,
                is_leap: true,
                description: "divisible by 400",
            },
            TestCase {
                year: 2400,
                is_leap: true,
                description: "divisible by 400",
            },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.year),
                case.is_leap,
                "Year {} ({})",
                case.year,
                case.description,
            );
        }
    }

    #[test]
    fn test_days_in_month() {
        let expected = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for (month, days) in (0..12).zip(expected) {
            assert_eq!(days_in_month(2023, month), days, "Month {month}");
        }
        assert_eq!(days_in_month(2024, FEBRUARY), 29);
        assert_eq!(days_in_month(1900, FEBRUARY), 28);
        assert_eq!(days_in_month(2023, 12), 0);
        assert_eq!(days_in_month(2023, -1), 0);
        assert_eq!(Civil.month_length(2024, 12), 0);
        assert!(Civil.validate(YearMonthDay::new(2024, 12, 1)).is_err());
    }

    #[test]
    fn test_days_from_civil_known_dates() {
        assert_eq!(days_from_civil(1970, 0, 1), 0);
        assert_eq!(days_from_civil(1969, 11, 31), -1);
        assert_eq!(days_from_civil(2000, 2, 1), 11_017);
        assert_eq!(days_from_civil(2021, 2, 21), 18_707);
    }

    #[test]
    fn test_year_length_matches_months() {
        for year in [1900, 2000, 2023, 2024] {
            assert_eq!(Civil.year_length(year), sum_of_months(&Civil, year));
        }
        assert_eq!(Civil.year_length(2024), 366);
        assert_eq!(Civil.year_length(2023), 365);
    }

    #[test]
    fn test_epoch_day_round_trip() {
        for epoch_day in (-719_162..2_932_896).step_by(997) {
            let date = Civil.from_epoch_day(epoch_day);
            assert_eq!(Civil.to_epoch_day(date).unwrap(), epoch_day, "{date}");
        }
    }

    #[test]
    fn test_canonical_is_identity() {
        let date = YearMonthDay::new(2021, 2, 21);
        assert_eq!(Civil.to_canonical(date).unwrap(), date);
        assert_eq!(Civil.from_canonical(date).unwrap(), date);
    }

    #[test]
    fn test_day_of_year_round_trip() {
        let date = YearMonthDay::new(2024, 11, 31);
        assert_eq!(Civil.day_of_year(date), 366);
        assert_eq!(Civil.from_day_of_year(2024, 366).unwrap(), date);
        assert_eq!(Civil.from_day_of_year(2024, 60).unwrap(), YearMonthDay::new(2024, 1, 29));
        assert!(Civil.from_day_of_year(2023, 366).is_err());
        assert!(Civil.from_day_of_year(2023, 0).is_err());
    }

    #[test]
    fn test_validate_rejects_invalid_triples() {
        assert!(Civil.validate(YearMonthDay::new(2023, 1, 29)).is_err());
        assert!(Civil.validate(YearMonthDay::new(2023, 12, 1)).is_err());
        assert!(Civil.validate(YearMonthDay::new(2023, 0, 0)).is_err());
        assert!(Civil.validate(YearMonthDay::new(2024, 1, 29)).is_ok());
    }

    #[test]
    fn test_shift_by_days_crosses_year() {
        let date = YearMonthDay::new(2023, 11, 31);
        assert_eq!(Civil.shift_by_days(date, 1).unwrap(), YearMonthDay::new(2024, 0, 1));
        assert_eq!(Civil.shift_by_days(date, -365).unwrap(), YearMonthDay::new(2022, 11, 31));
    }
}
