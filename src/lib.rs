#[macro_use]
mod logging;

mod civil;
mod clock;
mod consts;
mod derived;
mod engine;
mod error;
mod hijri;
mod persian;
mod prelude;
mod range;
mod system;
mod types;

pub use civil::Civil;
pub use clock::CanonicalClock;
pub use consts::*;
pub use error::Error;
pub use hijri::Hijri;
pub use persian::Persian;
pub use range::RangeTable;
pub use system::CalendarSystem;
pub use types::{CalendarKind, Field, Weekday, YearMonthDay};

use engine::rule_for;
use jiff::civil::{DateTime, Time};
use serde::{Deserialize, Serialize};

/// Construction options for a [`Calendar`].
///
/// Deserializable so it can sit inside an application's configuration
/// file; every key is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct CalendarOptions {
    /// Calendar system the date fields are expressed in
    pub system: CalendarKind,
    /// Week start; `None` uses the system's customary first day
    pub first_day_of_week: Option<Weekday>,
}

impl CalendarOptions {
    pub const fn new(system: CalendarKind) -> Self {
        Self {
            system,
            first_day_of_week: None,
        }
    }

    fn resolved_first_day_of_week(&self) -> Weekday {
        self.first_day_of_week
            .unwrap_or_else(|| self.system.default_first_day_of_week())
    }
}

/// Whether the cached triple still denotes the clock's instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SyncState {
    Synchronized,
    /// The clock was written directly; the cache must be pulled again.
    Dirty,
}

/// A date in one calendar system, backed by a canonical Gregorian clock.
///
/// Fields are read and written through [`Calendar::get`], [`Calendar::set`],
/// [`Calendar::add`] and [`Calendar::roll`]. `add` carries overflow into
/// higher fields; `roll` wraps inside the field's own range.
///
/// Month values are zero-based, days one-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calendar {
    kind: CalendarKind,
    clock: CanonicalClock,
    cached: YearMonthDay,
    state: SyncState,
}

impl Calendar {
    /// The current date and time in the system time zone
    pub fn now(kind: CalendarKind) -> Self {
        Self::with_options(CalendarOptions::new(kind))
    }

    pub fn with_options(options: CalendarOptions) -> Self {
        let clock = CanonicalClock::now(options.resolved_first_day_of_week());
        Self::from_clock(options.system, clock)
    }

    /// Wraps an existing civil date and time
    pub fn from_datetime(options: CalendarOptions, datetime: DateTime) -> Self {
        let clock = CanonicalClock::new(datetime, options.resolved_first_day_of_week());
        Self::from_clock(options.system, clock)
    }

    /// Midnight at the given date of the `kind` calendar system.
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` if the date does not exist in that
    /// system.
    pub fn new(kind: CalendarKind, year: i32, month: i32, day: i32) -> Result<Self, Error> {
        let midnight = DateTime::from_parts(jiff::civil::date(1970, 1, 1), Time::midnight());
        let mut calendar = Self::from_datetime(CalendarOptions::new(kind), midnight);
        calendar.set_date(year, month, day)?;
        Ok(calendar)
    }

    fn from_clock(kind: CalendarKind, clock: CanonicalClock) -> Self {
        let mut calendar = Self {
            kind,
            clock,
            cached: clock.date(),
            state: SyncState::Dirty,
        };
        calendar.invalidate();
        calendar
    }

    /// The same instant seen through another calendar system, using that
    /// system's customary week start.
    pub fn to_system(&self, kind: CalendarKind) -> Self {
        let mut clock = self.clock;
        clock.set_first_day_of_week(kind.default_first_day_of_week());
        Self::from_clock(kind, clock)
    }

    pub const fn kind(&self) -> CalendarKind {
        self.kind
    }

    pub fn system(&self) -> &'static dyn CalendarSystem {
        self.kind.system()
    }

    /// Read-only view of the canonical Gregorian clock
    pub const fn canonical(&self) -> &CanonicalClock {
        &self.clock
    }

    pub const fn first_day_of_week(&self) -> Weekday {
        self.clock.first_day_of_week()
    }

    pub const fn set_first_day_of_week(&mut self, first_day_of_week: Weekday) {
        self.clock.set_first_day_of_week(first_day_of_week);
    }

    pub const fn date(&self) -> YearMonthDay {
        self.cached
    }

    pub const fn year(&self) -> i32 {
        self.cached.year
    }

    pub const fn month(&self) -> i32 {
        self.cached.month
    }

    pub const fn day_of_month(&self) -> i32 {
        self.cached.day
    }

    /// # Errors
    /// See [`Calendar::set_date`].
    pub fn set_year(&mut self, year: i32) -> Result<(), Error> {
        self.set_date(year, self.cached.month, self.cached.day)
    }

    /// # Errors
    /// See [`Calendar::set_date`].
    pub fn set_month(&mut self, month: i32) -> Result<(), Error> {
        self.set_date(self.cached.year, month, self.cached.day)
    }

    /// # Errors
    /// See [`Calendar::set_date`].
    pub fn set_day_of_month(&mut self, day: i32) -> Result<(), Error> {
        self.set_date(self.cached.year, self.cached.month, day)
    }

    pub fn month_length(&self) -> i32 {
        self.system().month_length(self.cached.year, self.cached.month)
    }

    pub fn year_length(&self) -> i32 {
        self.system().year_length(self.cached.year)
    }

    pub fn is_leap_year(&self) -> bool {
        self.system().is_leap_year(self.cached.year)
    }

    /// Reads a field.
    ///
    /// # Errors
    /// Returns `Error::NotImplemented` if the field has no meaning in this
    /// calendar system.
    pub fn get(&self, field: Field) -> Result<i32, Error> {
        self.ensure_supported(field)?;
        rule_for(field).get(self, field)
    }

    /// Writes a field.
    ///
    /// `MONTH`, `DAY_OF_MONTH` and `DAY_OF_YEAR` accept values beyond their
    /// range and carry the excess into the neighboring fields. Every other
    /// field rejects out-of-range values.
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` for an out-of-range value and
    /// `Error::NotImplemented` for a field this system lacks. The calendar is
    /// unchanged on error.
    pub fn set(&mut self, field: Field, value: i32) -> Result<(), Error> {
        self.ensure_supported(field)?;
        self.transact(|cal| rule_for(field).set(cal, field, value))
    }

    /// Adds `amount` to a field, cascading into higher fields.
    ///
    /// # Errors
    /// Returns an error if the result leaves the supported range. The
    /// calendar is unchanged on error.
    pub fn add(&mut self, field: Field, amount: i32) -> Result<(), Error> {
        if amount == 0 {
            return Ok(());
        }
        self.ensure_supported(field)?;
        self.transact(|cal| cal.add_unchecked(field, amount))
    }

    /// Rolls a field by `amount` within its own range, leaving higher
    /// fields alone.
    ///
    /// # Errors
    /// Returns `Error::NotImplemented` for a field this system lacks. The
    /// calendar is unchanged on error.
    pub fn roll(&mut self, field: Field, amount: i32) -> Result<(), Error> {
        if amount == 0 {
            return Ok(());
        }
        self.ensure_supported(field)?;
        self.transact(|cal| rule_for(field).roll(cal, field, amount))
    }

    /// Sets the date of this calendar system, keeping the time of day.
    ///
    /// Out-of-range months and days are rejected rather than normalized.
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` for a year, month or day outside its
    /// range. The calendar is unchanged on error.
    pub fn set_date(&mut self, year: i32, month: i32, day: i32) -> Result<(), Error> {
        self.transact(|cal| {
            cal.check_bounds(Field::Year, year, cal.minimum(Field::Year), cal.maximum(Field::Year))?;
            cal.check_bounds(Field::Month, month, cal.minimum(Field::Month), cal.maximum(Field::Month))?;
            let length = cal.system().month_length(year, month);
            cal.check_bounds(Field::DayOfMonth, day, cal.minimum(Field::DayOfMonth), length)?;
            cal.adopt(YearMonthDay::new(year, month, day))
        })
    }

    /// Sets the date and the hour and minute.
    ///
    /// # Errors
    /// See [`Calendar::set_date`].
    pub fn set_date_time(
        &mut self,
        year: i32,
        month: i32,
        day: i32,
        hour_of_day: i32,
        minute: i32,
    ) -> Result<(), Error> {
        self.set_date_with_time(year, month, day, &[(Field::HourOfDay, hour_of_day), (Field::Minute, minute)])
    }

    /// Sets the date and the hour, minute and second.
    ///
    /// # Errors
    /// See [`Calendar::set_date`].
    pub fn set_date_time_seconds(
        &mut self,
        year: i32,
        month: i32,
        day: i32,
        hour_of_day: i32,
        minute: i32,
        second: i32,
    ) -> Result<(), Error> {
        self.set_date_with_time(
            year,
            month,
            day,
            &[(Field::HourOfDay, hour_of_day), (Field::Minute, minute), (Field::Second, second)],
        )
    }

    /// Writes a field of the canonical clock with its Gregorian meaning, then
    /// resynchronizes.
    ///
    /// # Errors
    /// Returns an error if the clock rejects the value. The calendar is
    /// unchanged on error.
    pub fn set_canonical(&mut self, field: Field, value: i32) -> Result<(), Error> {
        self.transact(|cal| {
            cal.raw_mut().set_raw(field, value)?;
            cal.invalidate();
            Ok(())
        })
    }

    pub fn minimum(&self, field: Field) -> i32 {
        self.system().ranges().minimum(field)
    }

    pub fn maximum(&self, field: Field) -> i32 {
        self.system().ranges().maximum(field)
    }

    pub fn greatest_minimum(&self, field: Field) -> i32 {
        self.minimum(field)
    }

    pub fn least_maximum(&self, field: Field) -> i32 {
        self.system().ranges().least_maximum(field)
    }

    /// No calendar system has a year dependent minimum.
    pub fn actual_minimum(&self, field: Field) -> i32 {
        self.minimum(field)
    }

    /// Largest value `field` can take given the current year and month.
    ///
    /// # Errors
    /// Returns an error only if the week probes fail to convert, which the
    /// synchronization invariant rules out.
    pub fn actual_maximum(&self, field: Field) -> Result<i32, Error> {
        rule_for(field).actual_maximum(self, field)
    }

    fn set_date_with_time(
        &mut self,
        year: i32,
        month: i32,
        day: i32,
        time: &[(Field, i32)],
    ) -> Result<(), Error> {
        self.transact(|cal| {
            for &(field, value) in time {
                cal.check_range(field, value)?;
            }
            cal.set_date(year, month, day)?;
            for &(field, value) in time {
                cal.raw_mut().set_raw(field, value)?;
            }
            cal.invalidate();
            Ok(())
        })
    }

    /// Runs `op` on a copy and commits it only if it succeeds.
    fn transact(&mut self, op: impl FnOnce(&mut Self) -> Result<(), Error>) -> Result<(), Error> {
        let mut next = self.clone();
        op(&mut next)?;
        debug_assert_eq!(next.state, SyncState::Synchronized);
        *self = next;
        Ok(())
    }

    fn ensure_supported(&self, field: Field) -> Result<(), Error> {
        if self.system().unsupported_fields().contains(&field) {
            return Err(Error::NotImplemented {
                field,
                system: self.kind.name(),
            });
        }
        Ok(())
    }

    pub(crate) fn add_unchecked(&mut self, field: Field, amount: i32) -> Result<(), Error> {
        if amount == 0 {
            return Ok(());
        }
        rule_for(field).add(self, field, amount)
    }

    pub(crate) fn check_range(&self, field: Field, value: i32) -> Result<(), Error> {
        let max = self.actual_maximum(field)?;
        self.check_bounds(field, value, self.actual_minimum(field), max)
    }

    fn check_bounds(&self, field: Field, value: i32, min: i32, max: i32) -> Result<(), Error> {
        if (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(Error::InvalidArgument {
                field,
                value,
                min,
                max,
            })
        }
    }

    /// Mutable access to the clock; the cache is stale until `invalidate`.
    pub(crate) fn raw_mut(&mut self) -> &mut CanonicalClock {
        self.state = SyncState::Dirty;
        &mut self.clock
    }

    /// Replaces the cached triple and pushes it to the clock.
    pub(crate) fn adopt(&mut self, date: YearMonthDay) -> Result<(), Error> {
        self.cached = date;
        self.apply()
    }

    /// Pushes the cached triple to the canonical clock.
    fn apply(&mut self) -> Result<(), Error> {
        let canonical = self.system().to_canonical(self.cached)?;
        trace!("apply {} {} -> civil {canonical}", self.kind, self.cached);
        self.clock.set_date(canonical)?;
        self.state = SyncState::Synchronized;
        Ok(())
    }

    /// Pulls the canonical clock into the cached triple.
    pub(crate) fn invalidate(&mut self) {
        let canonical = self.clock.date();
        let epoch_day = civil::days_from_civil(canonical.year, canonical.month, canonical.day);
        self.cached = self.system().from_epoch_day(epoch_day);
        trace!("invalidate civil {canonical} -> {} {}", self.kind, self.cached);
        self.state = SyncState::Synchronized;
    }

    pub(crate) fn weekday_offset(&self, date: YearMonthDay) -> Result<i32, Error> {
        derived::weekday_offset(self.system(), date, self.first_day_of_week())
    }

    pub(crate) fn week_of_year(&self, date: YearMonthDay) -> Result<i32, Error> {
        derived::week_of_year(self.system(), date, self.first_day_of_week())
    }

    pub(crate) fn week_of_month(&self, date: YearMonthDay) -> Result<i32, Error> {
        derived::week_of_month(self.system(), date, self.first_day_of_week())
    }
}
