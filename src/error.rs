use crate::types::{Field, YearMonthDay};

/// Error type for every calendar operation.
///
/// All errors are raised before the calendar is mutated, so a failed call
/// leaves the calendar exactly as it was.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// A raw field code outside `ERA..=MILLISECOND`.
    #[error("Invalid field code: {0} (must be 0-14)")]
    InvalidField(i32),

    /// A value outside the feasible range of a field.
    #[error("{field}={value} is out of feasible range [min: {min}, max: {max}]")]
    InvalidArgument {
        field: Field,
        value: i32,
        min: i32,
        max: i32,
    },

    /// The field has no meaning in the given calendar system.
    #[error("{field} is not implemented for the {system} calendar")]
    NotImplemented { field: Field, system: &'static str },

    /// A structurally invalid triple reached a calendar system conversion.
    #[error("Invalid {system} date: {date}")]
    ConversionFailure {
        system: &'static str,
        date: YearMonthDay,
    },

    /// Day of year outside the length of its year.
    #[error("Day of year {day_of_year} is out of range for year {year} (1-{length})")]
    OutOfRange {
        year: i32,
        day_of_year: i32,
        length: i32,
    },

    /// The civil-time layer rejected a value or overflowed its range.
    #[error(transparent)]
    Civil(#[from] jiff::Error),
}
