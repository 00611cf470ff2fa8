use crate::calendar::{AvailabilityCalendar, Calendar, CALENDAR_LINES};
use crate::clock::Clock;
use crate::help::Help;
use crate::source::BookingSource;
use crate::theme::BASE_STYLE;
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Paragraph, StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};

/// The interactive calendar for one venue.  Dates picked by the user become
/// the selected date, which [`App::run`] returns on exit.
#[derive(Debug)]
pub(crate) struct App<C, S> {
    calendar: AvailabilityCalendar<C>,
    source: S,
    venue: String,
    selected: Option<String>,
    load_failed: bool,
    state: AppState,
}

impl<C: Clock, S: BookingSource> App<C, S> {
    pub(crate) fn new(
        calendar: AvailabilityCalendar<C>,
        source: S,
        venue: String,
        selected: Option<String>,
    ) -> App<C, S> {
        App {
            calendar,
            source,
            venue,
            selected,
            load_failed: false,
            state: AppState::Calendar,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<Option<String>> {
        self.reload();
        while !self.quitting() {
            if self.calendar.refresh_today() {
                tracing::info!(today = %self.calendar.view().today(), "date changed");
            }
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(self.selected)
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key or asked for
    // something that can't be done
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left => self.calendar.move_cursor_left(),
                KeyCode::Char('l') | KeyCode::Right => self.calendar.move_cursor_right(),
                KeyCode::Char('k') | KeyCode::Up => self.calendar.move_cursor_up(),
                KeyCode::Char('j') | KeyCode::Down => self.calendar.move_cursor_down(),
                KeyCode::Char('p') | KeyCode::PageUp => self.calendar.previous_month().is_ok(),
                KeyCode::Char('n') | KeyCode::PageDown => self.calendar.next_month().is_ok(),
                KeyCode::Char('0') | KeyCode::Home => self.calendar.jump_to_today().is_ok(),
                KeyCode::Char(' ') | KeyCode::Enter => self.select(),
                KeyCode::Char('r') => self.reload(),
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Quitting => false,
        }
    }

    fn select(&mut self) -> bool {
        let picked = self.calendar.activate_cursor(|date| {
            tracing::info!(venue = %self.venue, date, "date selected");
            self.selected = Some(date.to_owned());
        });
        if !picked {
            if let Some(day) = self.calendar.cursor_day() {
                tracing::debug!(
                    date = %day.key,
                    status = ?day.status,
                    in_month = day.in_month,
                    "date not selectable"
                );
            }
        }
        picked
    }

    fn reload(&mut self) -> bool {
        match self.source.fetch(&self.venue) {
            Ok(bookings) => {
                self.calendar.set_bookings(&bookings);
                self.load_failed = false;
                true
            }
            Err(e) => {
                tracing::error!(
                    venue = %self.venue,
                    "failed to load bookings: {:#}",
                    anyhow::Error::new(e)
                );
                self.load_failed = true;
                false
            }
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn status_line(&self) -> String {
        if self.load_failed {
            return String::from("Could not load bookings  (r to retry)");
        }
        match &self.selected {
            Some(date) => format!("Selected: {date}  (? for help)"),
            None => String::from("No date selected  (? for help)"),
        }
    }
}

impl<C: Clock, S: BookingSource> Widget for &mut App<C, S> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let [cal_area, _, status_area] = Layout::vertical([
            Constraint::Length(CALENDAR_LINES),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);
        Calendar::new(self.selected.as_deref()).render(cal_area, buf, &mut self.calendar);
        Paragraph::new(Line::from(self.status_line()).centered()).render(status_area, buf);
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Quitting,
}
