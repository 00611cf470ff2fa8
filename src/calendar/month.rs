use super::util::WeekdayExt;
use super::view::GRID_WEEKS;
use std::fmt;
use thiserror::Error;
use time::{
    Date, Duration,
    Month::{self, December, January},
};

/// A calendar month, identified by its first day.
///
/// Only months whose entire six-week grid (including the trailing days of the
/// previous month and the leading days of the next one) lies within the
/// range of representable dates can be constructed.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct YearMonth {
    first: Date,
}

impl YearMonth {
    pub(crate) fn new(year: i32, month: Month) -> Option<YearMonth> {
        let first = Date::from_calendar_date(year, month, 1).ok()?;
        let ym = YearMonth { first };
        first
            .checked_sub(Duration::days(i64::from(ym.leading_days())))?
            .checked_add(Duration::weeks(i64::from(GRID_WEEKS)) - Duration::DAY)?;
        Some(ym)
    }

    pub(crate) fn containing(date: Date) -> Option<YearMonth> {
        YearMonth::new(date.year(), date.month())
    }

    pub(crate) fn year(self) -> i32 {
        self.first.year()
    }

    pub(crate) fn month(self) -> Month {
        self.first.month()
    }

    pub(crate) fn first_day(self) -> Date {
        self.first
    }

    /// Number of days from the previous month shown before the 1st, equal to
    /// the weekday of the 1st counted from Sunday
    pub(crate) fn leading_days(self) -> u16 {
        self.first.weekday().index0()
    }

    /// The Sunday on which the month's grid starts.  Construction guarantees
    /// this date exists; should it not, the 1st itself is returned.
    pub(crate) fn grid_start(self) -> Date {
        self.first
            .checked_sub(Duration::days(i64::from(self.leading_days())))
            .unwrap_or(self.first)
    }

    pub(crate) fn contains(self, date: Date) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    pub(crate) fn previous(self) -> Result<YearMonth, OutOfTimeError> {
        let (year, month) = match self.month() {
            January => (self.year().checked_sub(1).ok_or(OutOfTimeError)?, December),
            m => (self.year(), m.previous()),
        };
        YearMonth::new(year, month).ok_or(OutOfTimeError)
    }

    pub(crate) fn next(self) -> Result<YearMonth, OutOfTimeError> {
        let (year, month) = match self.month() {
            December => (self.year().checked_add(1).ok_or(OutOfTimeError)?, January),
            m => (self.year(), m.next()),
        };
        YearMonth::new(year, month).ok_or(OutOfTimeError)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month(), self.year())
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub(crate) struct OutOfTimeError;

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::Month::*;

    #[test]
    fn test_leading_days() {
        // March 1st, 2025 is a Saturday
        let ym = YearMonth::new(2025, March).unwrap();
        assert_eq!(ym.leading_days(), 6);
        assert_eq!(ym.grid_start(), date!(2025 - 02 - 23));
        // June 1st, 2025 is a Sunday
        let ym = YearMonth::new(2025, June).unwrap();
        assert_eq!(ym.leading_days(), 0);
        assert_eq!(ym.grid_start(), date!(2025 - 06 - 01));
    }

    #[test]
    fn test_next_rolls_over_year() {
        let dec = YearMonth::new(2025, December).unwrap();
        let jan = dec.next().unwrap();
        assert_eq!((jan.year(), jan.month()), (2026, January));
        assert_eq!(jan.previous(), Ok(dec));
    }

    #[test]
    fn test_previous_within_year() {
        let mar = YearMonth::new(2024, March).unwrap();
        let feb = mar.previous().unwrap();
        assert_eq!((feb.year(), feb.month()), (2024, February));
        assert_eq!(feb.next(), Ok(mar));
    }

    #[test]
    fn test_end_of_time() {
        // The grids for the extreme months would need dates outside the
        // supported range.
        assert_eq!(YearMonth::new(9999, December), None);
        assert_eq!(YearMonth::new(-9999, January), None);
        let last = YearMonth::new(9999, November).unwrap();
        assert_eq!(last.next(), Err(OutOfTimeError));
    }

    #[test]
    fn test_contains() {
        let ym = YearMonth::containing(date!(2025 - 03 - 15)).unwrap();
        assert_eq!(ym.first_day(), date!(2025 - 03 - 01));
        assert!(ym.contains(date!(2025 - 03 - 31)));
        assert!(!ym.contains(date!(2025 - 04 - 01)));
        assert!(!ym.contains(date!(2024 - 03 - 01)));
    }

    #[test]
    fn test_display() {
        let ym = YearMonth::new(2026, January).unwrap();
        assert_eq!(ym.to_string(), "January 2026");
    }
}
