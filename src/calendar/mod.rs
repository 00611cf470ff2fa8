mod month;
mod state;
mod util;
mod view;
mod widget;
pub(crate) use self::state::AvailabilityCalendar;
pub(crate) use self::util::{date_key, parse_date_key};
pub(crate) use self::widget::{Calendar, CALENDAR_LINES};

/// Availability of a single day, as shown on the calendar
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum DayStatus {
    /// Free to book
    Available,
    /// Taken by a confirmed booking
    Booked,
    /// Held by a booking that has not been confirmed
    Reserved,
    /// Before today, or filler from the previous month
    Past,
}

impl DayStatus {
    /// All statuses in the order in which the legend lists them
    pub(crate) const LEGEND: [DayStatus; 4] = [
        DayStatus::Available,
        DayStatus::Reserved,
        DayStatus::Booked,
        DayStatus::Past,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            DayStatus::Available => "Available",
            DayStatus::Booked => "Booked",
            DayStatus::Reserved => "Reserved",
            DayStatus::Past => "Past",
        }
    }
}
