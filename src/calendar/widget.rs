use super::state::AvailabilityCalendar;
use super::util::{WeekdayExt, DAYS_IN_WEEK};
use super::view::{CalendarDay, GRID_WEEKS};
use super::DayStatus;
use crate::theme::{
    status_style, BASE_STYLE, CURSOR_MODIFIER, OUTSIDE_MONTH_STYLE, SELECTED_MODIFIER,
    TITLE_STYLE, TODAY_MODIFIER, WEEKDAY_STYLE,
};
use ratatui::{prelude::*, widgets::*};
use std::marker::PhantomData;
use time::{Date, Weekday};

static HEADER: &str = " Su   Mo   Tu   We   Th   Fr   Sa ";

/// Width of the calendar grid in columns, not counting the legend
const MAIN_WIDTH: u16 = 34;

/// Number of columns per day of week, including the gap before the next day
const DAY_WIDTH: u16 = 5;

/// Columns between the right edge of the grid and the legend
const LEGEND_GUTTER: u16 = 2;

const LONGEST_LEGEND_LABEL_LEN: u16 = 9; // Available

/// Width of the legend: a swatch, a space, and a label
const LEGEND_WIDTH: u16 = 2 + LONGEST_LEGEND_LABEL_LEN;

const TOTAL_WIDTH: u16 = MAIN_WIDTH + LEGEND_GUTTER + LEGEND_WIDTH;

const TITLE_LINE: u16 = 0;

const HEADER_LINE: u16 = 1;

const RULE_LINE: u16 = 2;

const FIRST_WEEK_LINE: u16 = 3;

/// Number of lines taken up by the whole calendar
pub(crate) const CALENDAR_LINES: u16 = FIRST_WEEK_LINE + GRID_WEEKS as u16;

const ACS_HLINE: char = '─';
const LEGEND_SWATCH: char = '■';
const PREV_MARKER: char = '<';
const NEXT_MARKER: char = '>';

/// Renders an [`AvailabilityCalendar`] as a month grid with a legend of day
/// statuses to its right.  The day matching `selected` is drawn in brackets.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Calendar<'a, C> {
    selected: Option<&'a str>,
    _data: PhantomData<C>,
}

impl<'a, C> Calendar<'a, C> {
    pub(crate) fn new(selected: Option<&'a str>) -> Calendar<'a, C> {
        Calendar {
            selected,
            _data: PhantomData,
        }
    }

    fn show(&self, day: &CalendarDay) -> String {
        if self.selected == Some(day.key.as_str()) {
            format!("[{:2}]", day.date.day())
        } else {
            format!(" {:2} ", day.date.day())
        }
    }

    fn day_style(&self, day: &CalendarDay, today: Date, is_cursor: bool) -> Style {
        let mut style = if day.in_month {
            status_style(day.status)
        } else {
            OUTSIDE_MONTH_STYLE
        };
        if self.selected == Some(day.key.as_str()) {
            style = style.add_modifier(SELECTED_MODIFIER);
        }
        if day.date == today {
            style = style.add_modifier(TODAY_MODIFIER);
        }
        if is_cursor {
            style = style.add_modifier(CURSOR_MODIFIER);
        }
        style
    }
}

impl<C> StatefulWidget for Calendar<'_, C> {
    type State = AvailabilityCalendar<C>;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let left = area.width.saturating_sub(TOTAL_WIDTH) / 2;
        let [_, area, _] = Layout::horizontal([
            Constraint::Length(left),
            Constraint::Length(TOTAL_WIDTH.min(area.width)),
            Constraint::Min(0),
        ])
        .areas(area);
        let view = state.view();
        let cursor = state.cursor();
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.draw_title(&state.displayed_month().to_string());
        canvas.draw_header();
        for (week_no, week) in std::iter::zip(0u16.., view.weeks()) {
            for (i, day) in week.iter().enumerate() {
                let is_cursor = usize::from(week_no) * DAYS_IN_WEEK + i == cursor;
                canvas.draw_day(
                    week_no,
                    day.date.weekday(),
                    self.show(day),
                    self.day_style(day, view.today(), is_cursor),
                );
            }
        }
        canvas.draw_legend();
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_title(&mut self, title: &str) {
        self.mvprint(TITLE_LINE, 0, PREV_MARKER.to_string(), TITLE_STYLE);
        let width = u16::try_from(title.chars().count()).unwrap_or(u16::MAX);
        self.mvprint(
            TITLE_LINE,
            MAIN_WIDTH.saturating_sub(width) / 2,
            title,
            TITLE_STYLE,
        );
        self.mvprint(TITLE_LINE, MAIN_WIDTH - 1, NEXT_MARKER.to_string(), TITLE_STYLE);
    }

    fn draw_header(&mut self) {
        self.mvprint(HEADER_LINE, 0, HEADER, WEEKDAY_STYLE);
        self.hline(RULE_LINE, 0, ACS_HLINE, MAIN_WIDTH);
    }

    fn draw_day(&mut self, week_no: u16, wd: Weekday, s: String, style: Style) {
        self.mvprint(FIRST_WEEK_LINE + week_no, DAY_WIDTH * wd.index0(), s, style);
    }

    fn draw_legend(&mut self) {
        let x = MAIN_WIDTH + LEGEND_GUTTER;
        for (i, status) in std::iter::zip(0u16.., DayStatus::LEGEND) {
            let y = FIRST_WEEK_LINE + i;
            self.mvprint(y, x, LEGEND_SWATCH.to_string(), status_style(status));
            self.mvprint(y, x + 2, status.label(), BASE_STYLE);
        }
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Style) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style);
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // A Paragraph truncates text extending past the calendar's area,
            // but the Rect it is given must lie within the frame.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), BASE_STYLE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::Booking;
    use crate::clock::FixedClock;
    use time::macros::date;

    fn march_calendar() -> AvailabilityCalendar<FixedClock> {
        AvailabilityCalendar::new(
            FixedClock(date!(2025 - 03 - 15)),
            None,
            &[
                Booking::new("2025-03-20", "Confirmed"),
                Booking::new("2025-03-22", "Pending"),
            ],
        )
        .unwrap()
    }

    fn buffer_lines(buffer: &Buffer) -> Vec<String> {
        let area = buffer.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn test_render_march() {
        let mut cal = march_calendar();
        let area = Rect::new(0, 0, TOTAL_WIDTH, CALENDAR_LINES);
        let mut buffer = Buffer::empty(area);
        Calendar::new(Some("2025-03-21")).render(area, &mut buffer, &mut cal);
        assert_eq!(
            buffer_lines(&buffer),
            [
                "<           March 2025           >             ",
                " Su   Mo   Tu   We   Th   Fr   Sa              ",
                "──────────────────────────────────             ",
                " 23   24   25   26   27   28    1   ■ Available",
                "  2    3    4    5    6    7    8   ■ Reserved ",
                "  9   10   11   12   13   14   15   ■ Booked   ",
                " 16   17   18   19   20  [21]  22   ■ Past     ",
                " 23   24   25   26   27   28   29              ",
                " 30   31    1    2    3    4    5              ",
            ]
        );
        // Booked
        assert_eq!(buffer[(21, 6)].fg, Color::LightRed);
        // Reserved
        assert_eq!(buffer[(31, 6)].fg, Color::LightYellow);
        // Past
        assert_eq!(buffer[(21, 5)].fg, Color::Gray);
        // Available and selected
        assert_eq!(buffer[(26, 6)].fg, Color::LightGreen);
        assert!(buffer[(26, 6)].modifier.contains(SELECTED_MODIFIER));
        // Today, under the cursor
        assert_eq!(buffer[(31, 5)].fg, Color::LightGreen);
        assert!(buffer[(31, 5)].modifier.contains(TODAY_MODIFIER));
        assert!(buffer[(31, 5)].modifier.contains(CURSOR_MODIFIER));
        // Outside the month
        assert_eq!(buffer[(26, 3)].fg, Color::DarkGray);
        assert_eq!(buffer[(11, 8)].fg, Color::DarkGray);
        // Legend swatches
        assert_eq!(buffer[(36, 3)].fg, Color::LightGreen);
        assert_eq!(buffer[(36, 4)].fg, Color::LightYellow);
        assert_eq!(buffer[(36, 5)].fg, Color::LightRed);
        assert_eq!(buffer[(36, 6)].fg, Color::Gray);
    }

    #[test]
    fn test_selected_unavailable_day_still_marked() {
        let mut cal = march_calendar();
        let area = Rect::new(0, 0, TOTAL_WIDTH, CALENDAR_LINES);
        let mut buffer = Buffer::empty(area);
        Calendar::new(Some("2025-03-20")).render(area, &mut buffer, &mut cal);
        let lines = buffer_lines(&buffer);
        assert_eq!(lines[6], " 16   17   18   19  [20]  21   22   ■ Past     ");
        assert_eq!(buffer[(21, 6)].fg, Color::LightRed);
        assert!(buffer[(21, 6)].modifier.contains(SELECTED_MODIFIER));
    }

    #[test]
    fn test_render_centered_and_truncated() {
        let mut cal = march_calendar();
        let area = Rect::new(0, 0, TOTAL_WIDTH + 4, 4);
        let mut buffer = Buffer::empty(area);
        Calendar::new(None).render(area, &mut buffer, &mut cal);
        assert_eq!(
            buffer_lines(&buffer),
            [
                "  <           March 2025           >               ",
                "   Su   Mo   Tu   We   Th   Fr   Sa                ",
                "  ──────────────────────────────────               ",
                "   23   24   25   26   27   28    1   ■ Available  ",
            ]
        );
    }

    #[test]
    fn test_render_narrow() {
        let mut cal = march_calendar();
        let area = Rect::new(0, 0, 20, CALENDAR_LINES);
        let mut buffer = Buffer::empty(area);
        Calendar::new(None).render(area, &mut buffer, &mut cal);
        let lines = buffer_lines(&buffer);
        assert_eq!(lines[0], "<           March 20");
        assert_eq!(lines[1], " Su   Mo   Tu   We  ");
        assert_eq!(lines[3], " 23   24   25   26  ");
    }

    #[test]
    fn test_later_selection_does_not_move_month() {
        let mut cal = AvailabilityCalendar::new(
            FixedClock(date!(2025 - 03 - 15)),
            Some("2025-03-21"),
            &[
                Booking::new("2025-03-20", "Confirmed"),
                Booking::new("2025-03-22", "Pending"),
            ],
        )
        .unwrap();
        let area = Rect::new(0, 0, TOTAL_WIDTH, CALENDAR_LINES);
        let mut buffer = Buffer::empty(area);
        Calendar::new(Some("2025-03-21")).render(area, &mut buffer, &mut cal);
        let view = cal.view().clone();
        assert_eq!(buffer_lines(&buffer)[6], " 16   17   18   19   20  [21]  22   ■ Past     ");

        let mut buffer = Buffer::empty(area);
        Calendar::new(Some("2025-06-10")).render(area, &mut buffer, &mut cal);
        assert_eq!(cal.displayed_month().to_string(), "March 2025");
        assert_eq!(cal.view(), &view);
        let lines = buffer_lines(&buffer);
        assert_eq!(lines[0], "<           March 2025           >             ");
        assert_eq!(lines[6], " 16   17   18   19   20   21   22   ■ Past     ");
        assert!(lines.iter().all(|ln| !ln.contains('[')));
    }
}
