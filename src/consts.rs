/// Number of months in every supported calendar system
pub const MONTHS_IN_YEAR: i32 = 12;

/// Number of days in a week
pub const DAYS_IN_WEEK: i32 = 7;

/// Zero-based index of the first month of a year
pub const FIRST_MONTH: i32 = 0;
/// Zero-based index of the last month of a year
pub const LAST_MONTH: i32 = MONTHS_IN_YEAR - 1;

/// First day of month, used for lower bounds
pub const MIN_DAY: i32 = 1;

/// Zero-based index of February in the civil calendar
pub const FEBRUARY: i32 = 1;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: i32 = 29;

/// Days in each civil month (months are 0-indexed).
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [i32; 12] = [
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Julian day number of 1970-01-01, the zero of every epoch day count
pub(crate) const UNIX_EPOCH_JULIAN_DAY: i32 = 2_440_588;

/// Julian day number of 1 Farvardin 1 (solar hijri)
pub(crate) const PERSIAN_EPOCH_JULIAN_DAY: i32 = 1_948_320;
/// Length of the Persian arithmetic leap cycle, in years
pub(crate) const PERSIAN_CYCLE_YEARS: i32 = 33;
/// Leap years per Persian cycle
pub(crate) const PERSIAN_CYCLE_LEAPS: i32 = 8;

/// Julian day number of 1 Muharram 1 (lunar hijri, civil epoch)
pub(crate) const HIJRI_EPOCH_JULIAN_DAY: i32 = 1_948_440;
/// Length of the tabular Hijri leap cycle, in years
pub(crate) const HIJRI_CYCLE_YEARS: i32 = 30;
/// Leap years per tabular Hijri cycle
pub(crate) const HIJRI_CYCLE_LEAPS: i32 = 11;
/// Days in a common lunar year
pub(crate) const HIJRI_COMMON_YEAR_DAYS: i32 = 354;

/// Years further than this from year zero are rejected before conversion
pub(crate) const MAX_ABS_YEAR: i32 = 1_000_000;
/// Epoch days further than this from 1970-01-01 are rejected before conversion
pub(crate) const MAX_ABS_EPOCH_DAY: i32 = 360_000_000;
