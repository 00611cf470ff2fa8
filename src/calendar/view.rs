use super::month::YearMonth;
use super::util::{date_key, iter_days_from, DAYS_IN_WEEK};
use super::DayStatus;
use crate::booking::{BookingIndex, BookingState};
use std::slice::Chunks;
use time::Date;

/// Number of week rows in every month grid
pub(crate) const GRID_WEEKS: u8 = 6;

/// Number of cells in every month grid
pub(crate) const GRID_CELLS: usize = GRID_WEEKS as usize * DAYS_IN_WEEK;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct CalendarDay {
    pub(crate) date: Date,
    /// The date in `YYYY-MM-DD` form, used to match bookings
    pub(crate) key: String,
    pub(crate) in_month: bool,
    pub(crate) status: DayStatus,
}

impl CalendarDay {
    pub(crate) fn is_selectable(&self) -> bool {
        self.in_month && self.status == DayStatus::Available
    }
}

/// The six-week, Sunday-first grid of days shown for one month, with each
/// day's availability derived from the bookings
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthView {
    month: YearMonth,
    today: Date,
    days: Vec<CalendarDay>,
}

impl MonthView {
    pub(crate) fn build(month: YearMonth, today: Date, bookings: &BookingIndex) -> MonthView {
        let days = iter_days_from(month.grid_start())
            .take(GRID_CELLS)
            .map(|date| {
                let key = date_key(date);
                let in_month = month.contains(date);
                let status = if in_month {
                    day_status(date, &key, today, bookings)
                } else if date < month.first_day() {
                    // Filler from the previous month is never bookable.
                    DayStatus::Past
                } else {
                    DayStatus::Available
                };
                CalendarDay {
                    date,
                    key,
                    in_month,
                    status,
                }
            })
            .collect::<Vec<_>>();
        tracing::trace!(%month, %today, cells = days.len(), "built month view");
        MonthView { month, today, days }
    }

    pub(crate) fn month(&self) -> YearMonth {
        self.month
    }

    pub(crate) fn today(&self) -> Date {
        self.today
    }

    pub(crate) fn days(&self) -> &[CalendarDay] {
        &self.days
    }

    pub(crate) fn get(&self, index: usize) -> Option<&CalendarDay> {
        self.days.get(index)
    }

    pub(crate) fn weeks(&self) -> Chunks<'_, CalendarDay> {
        self.days().chunks(DAYS_IN_WEEK)
    }

    pub(crate) fn index_of(&self, date_key: &str) -> Option<usize> {
        self.days.iter().position(|d| d.key == date_key)
    }

    /// Grid index of the 1st of the month
    pub(crate) fn first_of_month_index(&self) -> usize {
        usize::from(self.month.leading_days())
    }
}

fn day_status(date: Date, key: &str, today: Date, bookings: &BookingIndex) -> DayStatus {
    if date < today {
        return DayStatus::Past;
    }
    match bookings.lookup(key) {
        Some(BookingState::Confirmed) => DayStatus::Booked,
        Some(BookingState::Tentative) => DayStatus::Reserved,
        None => DayStatus::Available,
    }
}
