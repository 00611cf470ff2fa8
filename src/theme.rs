use crate::calendar::DayStatus;
use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const AVAILABLE_STYLE: Style = Style::new().fg(Color::LightGreen).bg(Color::Black);

pub(crate) const RESERVED_STYLE: Style = Style::new()
    .fg(Color::LightYellow)
    .bg(Color::Black)
    .add_modifier(Modifier::BOLD);

pub(crate) const BOOKED_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .bg(Color::Black)
    .add_modifier(Modifier::BOLD);

pub(crate) const PAST_STYLE: Style = Style::new().fg(Color::Gray).bg(Color::Black);

/// Days shown only to fill out the grid
pub(crate) const OUTSIDE_MONTH_STYLE: Style = Style::new().fg(Color::DarkGray).bg(Color::Black);

pub(crate) const SELECTED_MODIFIER: Modifier = Modifier::BOLD;

pub(crate) const CURSOR_MODIFIER: Modifier = Modifier::REVERSED;

pub(crate) const TODAY_MODIFIER: Modifier = Modifier::UNDERLINED;

pub(crate) fn status_style(status: DayStatus) -> Style {
    match status {
        DayStatus::Available => AVAILABLE_STYLE,
        DayStatus::Booked => BOOKED_STYLE,
        DayStatus::Reserved => RESERVED_STYLE,
        DayStatus::Past => PAST_STYLE,
    }
}
