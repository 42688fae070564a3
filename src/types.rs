use crate::consts::{DAYS_IN_WEEK, FIRST_MONTH, MIN_DAY};
use crate::prelude::*;
use crate::Error;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// A calendar field, numbered like the classic calendar API field codes.
///
/// Only `Year..=DayOfWeekInMonth` carry calendar-system specific logic; the
/// remaining fields are answered by the canonical civil clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum Field {
    #[display(fmt = "ERA")]
    Era = 0,
    #[display(fmt = "YEAR")]
    Year = 1,
    #[display(fmt = "MONTH")]
    Month = 2,
    #[display(fmt = "WEEK_OF_YEAR")]
    WeekOfYear = 3,
    #[display(fmt = "WEEK_OF_MONTH")]
    WeekOfMonth = 4,
    #[display(fmt = "DAY_OF_MONTH")]
    DayOfMonth = 5,
    #[display(fmt = "DAY_OF_YEAR")]
    DayOfYear = 6,
    #[display(fmt = "DAY_OF_WEEK")]
    DayOfWeek = 7,
    #[display(fmt = "DAY_OF_WEEK_IN_MONTH")]
    DayOfWeekInMonth = 8,
    #[display(fmt = "AM_PM")]
    AmPm = 9,
    #[display(fmt = "HOUR")]
    Hour = 10,
    #[display(fmt = "HOUR_OF_DAY")]
    HourOfDay = 11,
    #[display(fmt = "MINUTE")]
    Minute = 12,
    #[display(fmt = "SECOND")]
    Second = 13,
    #[display(fmt = "MILLISECOND")]
    Millisecond = 14,
}

impl Field {
    /// Number of supported fields
    pub const COUNT: usize = 15;

    /// Every supported field, in code order
    pub const ALL: [Self; Self::COUNT] = [
        Self::Era,
        Self::Year,
        Self::Month,
        Self::WeekOfYear,
        Self::WeekOfMonth,
        Self::DayOfMonth,
        Self::DayOfYear,
        Self::DayOfWeek,
        Self::DayOfWeekInMonth,
        Self::AmPm,
        Self::Hour,
        Self::HourOfDay,
        Self::Minute,
        Self::Second,
        Self::Millisecond,
    ];

    /// Returns the numeric field code
    #[inline]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Returns true for the time-of-day fields (`AmPm..=Millisecond`)
    pub const fn is_time_of_day(self) -> bool {
        self.code() >= Self::AmPm.code()
    }
}

impl TryFrom<i32> for Field {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        usize::try_from(code)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or(Error::InvalidField(code))
    }
}

impl From<Field> for i32 {
    fn from(field: Field) -> Self {
        field.code()
    }
}

/// Day of the week, coded Sunday=1 through Saturday=7.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Sunday = 1,
    Monday = 2,
    Tuesday = 3,
    Wednesday = 4,
    Thursday = 5,
    Friday = 6,
    Saturday = 7,
}

impl Weekday {
    const ALL: [Self; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// Creates a weekday from its code
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` if the code is outside `1..=7`.
    pub fn from_code(code: i32) -> Result<Self, Error> {
        code.checked_sub(1)
            .and_then(|index| usize::try_from(index).ok())
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or(Error::InvalidArgument {
                field: Field::DayOfWeek,
                value: code,
                min: Self::Sunday.code(),
                max: Self::Saturday.code(),
            })
    }

    /// Returns the weekday code (Sunday=1 .. Saturday=7)
    #[inline]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Position of this weekday inside a week that starts on `first`, in `0..7`.
    #[inline]
    pub const fn offset_from(self, first: Self) -> i32 {
        (self.code() - first.code()).rem_euclid(DAYS_IN_WEEK)
    }
}

impl From<jiff::civil::Weekday> for Weekday {
    fn from(weekday: jiff::civil::Weekday) -> Self {
        Self::ALL[usize::from(weekday.to_sunday_zero_offset().unsigned_abs())]
    }
}

/// A (year, month, day) triple in some calendar system.
///
/// `month` is zero-based (`0..=11`) and `day` is one-based.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "{:04}-{:02}-{:02}", year, "month + 1", day)]
pub struct YearMonthDay {
    pub year: i32,
    pub month: i32,
    pub day: i32,
}

impl YearMonthDay {
    pub const fn new(year: i32, month: i32, day: i32) -> Self {
        Self { year, month, day }
    }

    /// First day of the given year
    pub const fn first_of_year(year: i32) -> Self {
        Self::new(year, FIRST_MONTH, MIN_DAY)
    }

    /// First day of the month this date falls in
    pub const fn first_of_month(self) -> Self {
        Self::new(self.year, self.month, MIN_DAY)
    }
}

impl From<(i32, i32, i32)> for YearMonthDay {
    fn from((year, month, day): (i32, i32, i32)) -> Self {
        Self::new(year, month, day)
    }
}

impl From<YearMonthDay> for (i32, i32, i32) {
    fn from(date: YearMonthDay) -> Self {
        (date.year, date.month, date.day)
    }
}

/// The calendar systems this crate can derive from the canonical date.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CalendarKind {
    /// Proleptic Gregorian
    #[default]
    #[display(fmt = "civil")]
    Civil,
    /// Solar hijri
    #[display(fmt = "persian")]
    Persian,
    /// Lunar hijri (tabular)
    #[display(fmt = "hijri")]
    Hijri,
}

impl CalendarKind {
    /// Short lowercase name, as used in configuration
    pub const fn name(self) -> &'static str {
        match self {
            Self::Civil => "civil",
            Self::Persian => "persian",
            Self::Hijri => "hijri",
        }
    }

    /// The week start customary for this calendar system
    pub const fn default_first_day_of_week(self) -> Weekday {
        match self {
            Self::Civil => Weekday::Sunday,
            Self::Persian | Self::Hijri => Weekday::Saturday,
        }
    }
}
