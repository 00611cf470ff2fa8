use super::month::{OutOfTimeError, YearMonth};
use super::util::{date_key, parse_date_key, DAYS_IN_WEEK};
use super::view::{CalendarDay, MonthView, GRID_CELLS};
use crate::booking::{Booking, BookingIndex};
use crate::clock::Clock;

/// A navigable month of day availability for one venue.
///
/// The only state of its own is the month on display, along with a cursor
/// marking the grid cell that the user would pick.  The grid itself is
/// rebuilt from the bookings and the clock whenever the month, the bookings,
/// or the current date changes.
#[derive(Debug)]
pub(crate) struct AvailabilityCalendar<C> {
    clock: C,
    bookings: BookingIndex,
    view: MonthView,
    cursor: usize,
}

impl<C: Clock> AvailabilityCalendar<C> {
    /// Create a calendar showing the month containing `selected`, or the
    /// current month if `selected` is absent or not a valid `YYYY-MM-DD`
    /// date.
    ///
    /// `selected` is only consulted here; later changes to the selection do
    /// not move the calendar away from whatever month the user navigated to.
    pub(crate) fn new(
        clock: C,
        selected: Option<&str>,
        bookings: &[Booking],
    ) -> Result<Self, OutOfTimeError> {
        let today = clock.today();
        let month = selected
            .and_then(|s| parse_date_key(s).ok())
            .and_then(YearMonth::containing)
            .or_else(|| YearMonth::containing(today))
            .ok_or(OutOfTimeError)?;
        let bookings = BookingIndex::new(bookings);
        let view = MonthView::build(month, today, &bookings);
        let cursor = selected
            .and_then(|s| view.index_of(s))
            .unwrap_or_else(|| home_cursor(&view));
        Ok(AvailabilityCalendar {
            clock,
            bookings,
            view,
            cursor,
        })
    }

    pub(crate) fn set_bookings(&mut self, bookings: &[Booking]) {
        self.bookings = BookingIndex::new(bookings);
        tracing::debug!(
            dates = self.bookings.len(),
            "bookings updated; rebuilding calendar"
        );
        self.rebuild();
    }

    /// Rebuild the grid if the date has changed since it was last built.
    /// Returns `true` if a rebuild happened.
    pub(crate) fn refresh_today(&mut self) -> bool {
        if self.clock.today() == self.view.today() {
            false
        } else {
            self.rebuild();
            true
        }
    }

    pub(crate) fn previous_month(&mut self) -> Result<(), OutOfTimeError> {
        let month = self.view.month().previous()?;
        self.show_month(month);
        Ok(())
    }

    pub(crate) fn next_month(&mut self) -> Result<(), OutOfTimeError> {
        let month = self.view.month().next()?;
        self.show_month(month);
        Ok(())
    }

    pub(crate) fn jump_to_today(&mut self) -> Result<(), OutOfTimeError> {
        let month = YearMonth::containing(self.clock.today()).ok_or(OutOfTimeError)?;
        self.show_month(month);
        self.cursor = home_cursor(&self.view);
        Ok(())
    }

    fn show_month(&mut self, month: YearMonth) {
        self.view = MonthView::build(month, self.clock.today(), &self.bookings);
        self.cursor = self.view.first_of_month_index();
    }

    fn rebuild(&mut self) {
        self.view = MonthView::build(self.view.month(), self.clock.today(), &self.bookings);
    }

    pub(crate) fn move_cursor_left(&mut self) -> bool {
        self.set_cursor(self.cursor.checked_sub(1))
    }

    pub(crate) fn move_cursor_right(&mut self) -> bool {
        self.set_cursor(self.cursor.checked_add(1))
    }

    pub(crate) fn move_cursor_up(&mut self) -> bool {
        self.set_cursor(self.cursor.checked_sub(DAYS_IN_WEEK))
    }

    pub(crate) fn move_cursor_down(&mut self) -> bool {
        self.set_cursor(self.cursor.checked_add(DAYS_IN_WEEK))
    }

    fn set_cursor(&mut self, index: Option<usize>) -> bool {
        match index {
            Some(i) if i < GRID_CELLS => {
                self.cursor = i;
                true
            }
            _ => false,
        }
    }
}

impl<C> AvailabilityCalendar<C> {
    pub(crate) fn displayed_month(&self) -> YearMonth {
        self.view.month()
    }

    pub(crate) fn view(&self) -> &MonthView {
        &self.view
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn cursor_day(&self) -> Option<&CalendarDay> {
        self.view.get(self.cursor)
    }

    /// Report the day at grid position `index` to `on_date_select` if the day
    /// can be booked, i.e., it lies in the displayed month and is available.
    /// Returns whether `on_date_select` was called.
    ///
    /// Picking any other cell, including a nonexistent one, does nothing.
    pub(crate) fn activate<F: FnOnce(&str)>(&self, index: usize, on_date_select: F) -> bool {
        match self.view.get(index) {
            Some(day) if day.is_selectable() => {
                on_date_select(&day.key);
                true
            }
            _ => false,
        }
    }

    pub(crate) fn activate_cursor<F: FnOnce(&str)>(&self, on_date_select: F) -> bool {
        self.activate(self.cursor, on_date_select)
    }
}

/// Cursor position for when a month is first shown: today if it is in the
/// month, the 1st otherwise
fn home_cursor(view: &MonthView) -> usize {
    let today = view.today();
    if view.month().contains(today) {
        view.index_of(&date_key(today))
            .unwrap_or_else(|| view.first_of_month_index())
    } else {
        view.first_of_month_index()
    }
}
