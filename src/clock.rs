//! The canonical civil clock.
//!
//! Holds the authoritative Gregorian date and time of day. Calendar systems
//! never store an instant of their own; they derive it from this clock.

use jiff::civil::{Date, DateTime, Time};
use jiff::{Span, Zoned};

use crate::civil::Civil;
use crate::derived;
use crate::range::civil_time_default;
use crate::system::CalendarSystem;
use crate::types::{CalendarKind, Field, Weekday, YearMonthDay};
use crate::Error;

const NANOS_PER_MILLI: i32 = 1_000_000;
const HOURS_PER_HALF_DAY: i32 = 12;

/// Gregorian date and time of day, plus the first day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalClock {
    datetime: DateTime,
    first_day_of_week: Weekday,
}

impl CanonicalClock {
    pub const fn new(datetime: DateTime, first_day_of_week: Weekday) -> Self {
        Self {
            datetime,
            first_day_of_week,
        }
    }

    /// The current wall-clock time in the system time zone
    pub fn now(first_day_of_week: Weekday) -> Self {
        Self::new(Zoned::now().datetime(), first_day_of_week)
    }

    pub const fn datetime(&self) -> DateTime {
        self.datetime
    }

    /// The Gregorian date, with a zero-based month
    pub fn date(&self) -> YearMonthDay {
        YearMonthDay::new(
            i32::from(self.datetime.year()),
            i32::from(self.datetime.month()) - 1,
            i32::from(self.datetime.day()),
        )
    }

    pub const fn first_day_of_week(&self) -> Weekday {
        self.first_day_of_week
    }

    pub const fn set_first_day_of_week(&mut self, first_day_of_week: Weekday) {
        self.first_day_of_week = first_day_of_week;
    }

    pub fn weekday(&self) -> Weekday {
        self.datetime.weekday().into()
    }

    /// Weekday of a Gregorian date, independent of any calendar system.
    ///
    /// # Errors
    /// Returns an error if `date` is not a valid Gregorian date.
    pub fn weekday_of(date: YearMonthDay) -> Result<Weekday, Error> {
        Ok(to_jiff_date(date)?.weekday().into())
    }

    /// Replaces the date, keeping the time of day.
    ///
    /// # Errors
    /// Returns an error if `date` is not a valid Gregorian date.
    pub fn set_date(&mut self, date: YearMonthDay) -> Result<(), Error> {
        self.datetime = DateTime::from_parts(to_jiff_date(date)?, self.datetime.time());
        Ok(())
    }

    /// Reads a field with its Gregorian meaning.
    ///
    /// # Errors
    /// Returns an error only if a derived week field cannot be computed.
    pub fn get_raw(&self, field: Field) -> Result<i32, Error> {
        let dt = self.datetime;
        let hour = i32::from(dt.hour());
        Ok(match field {
            Field::Era => i32::from(dt.year() >= 1),
            Field::Year => i32::from(dt.year()),
            Field::Month => i32::from(dt.month()) - 1,
            Field::DayOfMonth => i32::from(dt.day()),
            Field::DayOfYear => i32::from(dt.day_of_year()),
            Field::DayOfWeek => self.weekday().code(),
            Field::WeekOfYear => derived::week_of_year(&Civil, self.date(), self.first_day_of_week)?,
            Field::WeekOfMonth => {
                derived::week_of_month(&Civil, self.date(), self.first_day_of_week)?
            }
            Field::DayOfWeekInMonth => derived::day_of_week_in_month(i32::from(dt.day())),
            Field::AmPm => hour / HOURS_PER_HALF_DAY,
            Field::Hour => hour % HOURS_PER_HALF_DAY,
            Field::HourOfDay => hour,
            Field::Minute => i32::from(dt.minute()),
            Field::Second => i32::from(dt.second()),
            Field::Millisecond => i32::from(dt.millisecond()),
        })
    }

    /// Writes a field with its Gregorian meaning.
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` for a value outside the field's civil
    /// range, `Error::NotImplemented` for the week fields, or a civil error if
    /// the resulting date does not exist.
    pub fn set_raw(&mut self, field: Field, value: i32) -> Result<(), Error> {
        let date = self.date();
        let hour = i32::from(self.datetime.hour());
        match field {
            Field::Era => {
                check_civil_range(field, value)?;
                if value != self.get_raw(Field::Era)? {
                    self.set_date(YearMonthDay::new(1 - date.year, date.month, date.day))?;
                }
            }
            Field::Year => self.set_date(YearMonthDay::new(value, date.month, date.day))?,
            Field::Month => self.set_date(YearMonthDay::new(date.year, value, date.day))?,
            Field::DayOfMonth => self.set_date(YearMonthDay::new(date.year, date.month, value))?,
            Field::DayOfYear => self.set_date(Civil.from_day_of_year(date.year, value)?)?,
            Field::DayOfWeek => {
                let target = Weekday::from_code(value)?.offset_from(self.first_day_of_week);
                let current = self.weekday().offset_from(self.first_day_of_week);
                self.set_date(Civil.shift_by_days(date, target - current)?)?;
            }
            Field::AmPm => {
                check_civil_range(field, value)?;
                self.set_time(hour % HOURS_PER_HALF_DAY + value * HOURS_PER_HALF_DAY, None, None, None)?;
            }
            Field::Hour => {
                check_civil_range(field, value)?;
                self.set_time(hour - hour % HOURS_PER_HALF_DAY + value, None, None, None)?;
            }
            Field::HourOfDay => self.set_time(value, None, None, None)?,
            Field::Minute => self.set_time(hour, Some(value), None, None)?,
            Field::Second => self.set_time(hour, None, Some(value), None)?,
            Field::Millisecond => self.set_time(hour, None, None, Some(value))?,
            Field::WeekOfYear | Field::WeekOfMonth | Field::DayOfWeekInMonth => {
                return Err(Error::NotImplemented {
                    field,
                    system: "canonical clock",
                });
            }
        }
        Ok(())
    }

    /// Adds to a field, cascading into higher fields the way civil
    /// arithmetic does.
    ///
    /// # Errors
    /// Returns `Error::NotImplemented` for `Era`, or a civil error if the
    /// result leaves the supported range.
    pub fn add_raw(&mut self, field: Field, amount: i32) -> Result<(), Error> {
        let span = match field {
            Field::Year => Span::new().try_years(amount)?,
            Field::Month => Span::new().try_months(amount)?,
            Field::WeekOfYear | Field::WeekOfMonth | Field::DayOfWeekInMonth => {
                Span::new().try_weeks(amount)?
            }
            Field::DayOfMonth | Field::DayOfYear | Field::DayOfWeek => Span::new().try_days(amount)?,
            Field::AmPm => {
                Span::new().try_hours(i64::from(amount) * i64::from(HOURS_PER_HALF_DAY))?
            }
            Field::Hour | Field::HourOfDay => Span::new().try_hours(amount)?,
            Field::Minute => Span::new().try_minutes(amount)?,
            Field::Second => Span::new().try_seconds(amount)?,
            Field::Millisecond => Span::new().try_milliseconds(amount)?,
            Field::Era => {
                return Err(Error::NotImplemented {
                    field,
                    system: "canonical clock",
                });
            }
        };
        self.datetime = self.datetime.checked_add(span)?;
        Ok(())
    }

    /// Rolls a time-of-day field within its own range, leaving the date
    /// untouched.
    ///
    /// # Errors
    /// Returns `Error::NotImplemented` for date fields.
    pub fn roll_raw(&mut self, field: Field, amount: i32) -> Result<(), Error> {
        if !field.is_time_of_day() {
            return Err(Error::NotImplemented {
                field,
                system: "canonical clock",
            });
        }
        let bounds = civil_time_default(field);
        let span = bounds.maximum - bounds.minimum + 1;
        let current = self.get_raw(field)?;
        let rolled = bounds.minimum + (current - bounds.minimum + amount.rem_euclid(span)) % span;
        self.set_raw(field, rolled)
    }

    fn set_time(
        &mut self,
        hour: i32,
        minute: Option<i32>,
        second: Option<i32>,
        millisecond: Option<i32>,
    ) -> Result<(), Error> {
        let time = self.datetime.time();
        let minute = minute.unwrap_or_else(|| i32::from(time.minute()));
        let second = second.unwrap_or_else(|| i32::from(time.second()));
        let nanosecond = match millisecond {
            Some(ms) => {
                check_civil_range(Field::Millisecond, ms)?;
                ms * NANOS_PER_MILLI
            }
            None => time.subsec_nanosecond(),
        };
        let time = Time::new(
            narrow(Field::HourOfDay, hour)?,
            narrow(Field::Minute, minute)?,
            narrow(Field::Second, second)?,
            nanosecond,
        )?;
        self.datetime = DateTime::from_parts(self.datetime.date(), time);
        Ok(())
    }
}

fn check_civil_range(field: Field, value: i32) -> Result<(), Error> {
    let bounds = civil_time_default(field);
    if (bounds.minimum..=bounds.maximum).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidArgument {
            field,
            value,
            min: bounds.minimum,
            max: bounds.maximum,
        })
    }
}

/// Range checks a time-of-day component and narrows it for jiff.
fn narrow(field: Field, value: i32) -> Result<i8, Error> {
    check_civil_range(field, value)?;
    let bounds = civil_time_default(field);
    i8::try_from(value).map_err(|_| Error::InvalidArgument {
        field,
        value,
        min: bounds.minimum,
        max: bounds.maximum,
    })
}

fn to_jiff_date(date: YearMonthDay) -> Result<Date, Error> {
    let invalid = || Error::ConversionFailure {
        system: CalendarKind::Civil.name(),
        date,
    };
    let year = i16::try_from(date.year).map_err(|_| invalid())?;
    let month = i8::try_from(date.month.saturating_add(1)).map_err(|_| invalid())?;
    let day = i8::try_from(date.day).map_err(|_| invalid())?;
    Ok(Date::new(year, month, day)?)
}
