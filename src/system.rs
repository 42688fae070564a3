//! Calendar system rules.
//!
//! Every calendar system is a set of pure functions over (year, month, day)
//! triples. Systems are tied together through the epoch day, the number of
//! days since 1970-01-01, so converting to and from the canonical Gregorian
//! date is a pair of epoch day conversions.

use crate::civil::Civil;
use crate::consts::{FIRST_MONTH, LAST_MONTH, MAX_ABS_EPOCH_DAY, MAX_ABS_YEAR, MIN_DAY};
use crate::hijri::Hijri;
use crate::persian::Persian;
use crate::range::RangeTable;
use crate::types::{CalendarKind, Field, YearMonthDay};
use crate::Error;

/// Pure rules of one calendar system.
///
/// Implementors describe the shape of their years; the conversions, day of
/// year arithmetic and day shifting are provided on top of that.
pub trait CalendarSystem: Sync {
    fn kind(&self) -> CalendarKind;

    fn is_leap_year(&self, year: i32) -> bool;

    /// Number of days in `month` (zero-based) of `year`.
    fn month_length(&self, year: i32, month: i32) -> i32;

    /// Number of days in the months of `year` preceding `month`.
    fn days_before_month(&self, year: i32, month: i32) -> i32;

    /// Epoch day of the first day of `year`.
    fn first_epoch_day(&self, year: i32) -> i32;

    /// A year close to the one containing `epoch_day`. Off by one is fine.
    fn estimate_year(&self, epoch_day: i32) -> i32;

    fn ranges(&self) -> &'static RangeTable;

    /// Fields that have no meaning in this calendar system.
    fn unsupported_fields(&self) -> &'static [Field] {
        &[]
    }

    fn year_length(&self, year: i32) -> i32 {
        self.days_before_month(year, LAST_MONTH) + self.month_length(year, LAST_MONTH)
    }

    /// Checks that `date` is a structurally valid triple of this system.
    ///
    /// # Errors
    /// Returns `Error::ConversionFailure` for a month outside `0..=11`, a day
    /// outside the month, or a year too far out to convert.
    fn validate(&self, date: YearMonthDay) -> Result<(), Error> {
        let valid = (-MAX_ABS_YEAR..=MAX_ABS_YEAR).contains(&date.year)
            && (FIRST_MONTH..=LAST_MONTH).contains(&date.month)
            && (MIN_DAY..=self.month_length(date.year, date.month)).contains(&date.day);
        if valid {
            Ok(())
        } else {
            Err(Error::ConversionFailure {
                system: self.kind().name(),
                date,
            })
        }
    }

    /// # Errors
    /// Returns `Error::ConversionFailure` if `date` is not valid in this system.
    fn to_epoch_day(&self, date: YearMonthDay) -> Result<i32, Error> {
        self.validate(date)?;
        Ok(self.first_epoch_day(date.year) + self.days_before_month(date.year, date.month)
            + date.day
            - 1)
    }

    fn from_epoch_day(&self, epoch_day: i32) -> YearMonthDay {
        let mut year = self.estimate_year(epoch_day);
        while self.first_epoch_day(year + 1) <= epoch_day {
            year += 1;
        }
        while self.first_epoch_day(year) > epoch_day {
            year -= 1;
        }
        self.locate(year, epoch_day - self.first_epoch_day(year) + 1)
    }

    /// Converts a date of this system to the canonical Gregorian date.
    ///
    /// # Errors
    /// Returns `Error::ConversionFailure` if `date` is not valid in this system.
    fn to_canonical(&self, date: YearMonthDay) -> Result<YearMonthDay, Error> {
        Ok(Civil.from_epoch_day(self.to_epoch_day(date)?))
    }

    /// Converts a canonical Gregorian date to a date of this system.
    ///
    /// # Errors
    /// Returns `Error::ConversionFailure` if `canonical` is not a valid
    /// Gregorian date.
    fn from_canonical(&self, canonical: YearMonthDay) -> Result<YearMonthDay, Error> {
        Ok(self.from_epoch_day(Civil.to_epoch_day(canonical)?))
    }

    /// One-based ordinal of `date` within its year.
    fn day_of_year(&self, date: YearMonthDay) -> i32 {
        self.days_before_month(date.year, date.month) + date.day
    }

    /// Inverse of [`CalendarSystem::day_of_year`].
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` if `day_of_year` is outside the year.
    fn from_day_of_year(&self, year: i32, day_of_year: i32) -> Result<YearMonthDay, Error> {
        let length = self.year_length(year);
        if !(1..=length).contains(&day_of_year) {
            return Err(Error::OutOfRange {
                year,
                day_of_year,
                length,
            });
        }
        Ok(self.locate(year, day_of_year))
    }

    /// The date `delta` days away from `date`, crossing month and year
    /// boundaries as needed.
    ///
    /// # Errors
    /// Returns `Error::ConversionFailure` if `date` is invalid or the result
    /// leaves the representable range.
    fn shift_by_days(&self, date: YearMonthDay, delta: i32) -> Result<YearMonthDay, Error> {
        let shifted = self
            .to_epoch_day(date)?
            .checked_add(delta)
            .filter(|day| (-MAX_ABS_EPOCH_DAY..=MAX_ABS_EPOCH_DAY).contains(day))
            .ok_or(Error::ConversionFailure {
                system: self.kind().name(),
                date,
            })?;
        Ok(self.from_epoch_day(shifted))
    }

    /// Resolves an in-range day of year to a triple.
    #[doc(hidden)]
    fn locate(&self, year: i32, day_of_year: i32) -> YearMonthDay {
        let mut month = FIRST_MONTH;
        while month < LAST_MONTH && self.days_before_month(year, month + 1) < day_of_year {
            month += 1;
        }
        YearMonthDay::new(year, month, day_of_year - self.days_before_month(year, month))
    }
}

impl CalendarKind {
    /// The rules of this calendar system
    pub fn system(self) -> &'static dyn CalendarSystem {
        match self {
            Self::Civil => &Civil,
            Self::Persian => &Persian,
            Self::Hijri => &Hijri,
        }
    }
}

/// Sum of all month lengths; used to cross-check `year_length` in tests.
#[cfg(test)]
pub(crate) fn sum_of_months(system: &dyn CalendarSystem, year: i32) -> i32 {
    (0..crate::consts::MONTHS_IN_YEAR)
        .map(|month| system.month_length(year, month))
        .sum()
}
