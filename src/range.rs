use crate::types::Field;

/// Per calendar system value ranges of the date fields.
///
/// Each table maps a field to a bound. Fields absent from a table fall back
/// to the civil-time defaults, which cover every field.
#[derive(Debug)]
pub struct RangeTable {
    pub(crate) minimum: &'static [(Field, i32)],
    pub(crate) maximum: &'static [(Field, i32)],
    pub(crate) least_maximum: &'static [(Field, i32)],
}

impl RangeTable {
    /// Smallest value the field can ever take
    pub fn minimum(&self, field: Field) -> i32 {
        lookup(self.minimum, field).unwrap_or_else(|| civil_time_default(field).minimum)
    }

    /// Largest value the field can ever take
    pub fn maximum(&self, field: Field) -> i32 {
        lookup(self.maximum, field).unwrap_or_else(|| civil_time_default(field).maximum)
    }

    /// Smallest value the field's maximum takes over all years and months
    pub fn least_maximum(&self, field: Field) -> i32 {
        lookup(self.least_maximum, field)
            .unwrap_or_else(|| civil_time_default(field).least_maximum)
    }
}

fn lookup(table: &[(Field, i32)], field: Field) -> Option<i32> {
    table
        .iter()
        .find_map(|&(entry, bound)| (entry == field).then_some(bound))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Bounds {
    pub(crate) minimum: i32,
    pub(crate) least_maximum: i32,
    pub(crate) maximum: i32,
}

const fn bounds(minimum: i32, least_maximum: i32, maximum: i32) -> Bounds {
    Bounds {
        minimum,
        least_maximum,
        maximum,
    }
}

/// Generic civil-time ranges, shared by every calendar system.
///
/// Date fields carry proleptic Gregorian values for years `1..=9999`.
pub(crate) const fn civil_time_default(field: Field) -> Bounds {
    match field {
        Field::Era => bounds(0, 1, 1),
        Field::Year => bounds(1, 9999, 9999),
        Field::Month => bounds(0, 11, 11),
        Field::WeekOfYear => bounds(1, 53, 54),
        Field::WeekOfMonth => bounds(1, 4, 6),
        Field::DayOfMonth => bounds(1, 28, 31),
        Field::DayOfYear => bounds(1, 365, 366),
        Field::DayOfWeek => bounds(1, 7, 7),
        Field::DayOfWeekInMonth => bounds(1, 4, 5),
        Field::AmPm => bounds(0, 1, 1),
        Field::Hour => bounds(0, 11, 11),
        Field::HourOfDay => bounds(0, 23, 23),
        Field::Minute | Field::Second => bounds(0, 59, 59),
        Field::Millisecond => bounds(0, 999, 999),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static TABLE: RangeTable = RangeTable {
        minimum: &[(Field::Year, 1)],
        maximum: &[(Field::Year, 100), (Field::DayOfMonth, 30)],
        least_maximum: &[(Field::DayOfMonth, 29)],
    };

    #[test]
    fn test_table_entries_win() {
        assert_eq!(TABLE.minimum(Field::Year), 1);
        assert_eq!(TABLE.maximum(Field::Year), 100);
        assert_eq!(TABLE.maximum(Field::DayOfMonth), 30);
        assert_eq!(TABLE.least_maximum(Field::DayOfMonth), 29);
    }

    #[test]
    fn test_absent_entries_fall_back() {
        assert_eq!(TABLE.minimum(Field::Millisecond), 0);
        assert_eq!(TABLE.maximum(Field::Millisecond), 999);
        assert_eq!(TABLE.least_maximum(Field::Year), 9999);
        assert_eq!(TABLE.maximum(Field::HourOfDay), 23);
        assert_eq!(TABLE.least_maximum(Field::Hour), 11);
    }

    #[test]
    fn test_defaults_are_ordered() {
        for field in Field::ALL {
            let b = civil_time_default(field);
            assert!(
                b.minimum <= b.least_maximum && b.least_maximum <= b.maximum,
                "{field}: {b:?}"
            );
        }
    }
}
