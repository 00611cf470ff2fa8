use std::iter::successors;
use time::{format_description::FormatItem, macros::format_description, Date, Weekday};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

pub(crate) const DAYS_IN_WEEK: usize = 7;

pub(super) trait WeekdayExt {
    fn index0(&self) -> u16;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u16 {
        self.number_days_from_sunday().into()
    }
}

/// Render `date` as its `YYYY-MM-DD` key, the form in which bookings name
/// their event dates
pub(crate) fn date_key(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

pub(crate) fn parse_date_key(s: &str) -> Result<Date, time::error::Parse> {
    Date::parse(s, &YMD_FMT)
}

pub(super) fn iter_days_from(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.next_day())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_date_key_pads() {
        assert_eq!(date_key(date!(2025 - 03 - 05)), "2025-03-05");
        assert_eq!(date_key(date!(2024 - 12 - 31)), "2024-12-31");
    }

    #[test]
    fn test_parse_date_key() {
        assert_eq!(parse_date_key("2025-03-20").ok(), Some(date!(2025 - 03 - 20)));
        assert!(parse_date_key("2025-02-30").is_err());
        assert!(parse_date_key("20 March").is_err());
        assert!(parse_date_key("").is_err());
    }

    #[test]
    fn test_iter_days_from() {
        let mut iter = iter_days_from(date!(2024 - 02 - 28));
        assert_eq!(iter.next(), Some(date!(2024 - 02 - 28)));
        assert_eq!(iter.next(), Some(date!(2024 - 02 - 29)));
        assert_eq!(iter.next(), Some(date!(2024 - 03 - 01)));
    }

    #[test]
    fn test_index0() {
        assert_eq!(Weekday::Sunday.index0(), 0);
        assert_eq!(Weekday::Saturday.index0(), 6);
    }
}
