use crate::calendar::DayStatus;
use crate::theme::status_style;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

/// Key bindings in the calendar view, as (keys, action) pairs
static BINDINGS: &[(&str, &str)] = &[
    ("h, LEFT", "Previous day"),
    ("l, RIGHT", "Next day"),
    ("k, UP", "Previous week"),
    ("j, DOWN", "Next week"),
    ("p, PAGE UP", "Previous month"),
    ("n, PAGE DOWN", "Next month"),
    ("0, HOME", "Jump to today"),
    ("ENTER, SPACE", "Select the date"),
    ("r", "Reload bookings"),
    ("?", "Show this help"),
    ("q, ESC", "Quit"),
];

const KEY_COLUMN: usize = 16;

/// Popup listing the key bindings and what each day status means
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help(pub(crate) Style);

impl Help {
    fn text(self) -> Text<'static> {
        let mut lines = BINDINGS
            .iter()
            .map(|&(keys, action)| {
                Line::from(vec![
                    Span::styled(format!("{keys:width$}", width = KEY_COLUMN), Modifier::BOLD),
                    Span::raw(action),
                ])
            })
            .collect::<Vec<_>>();
        lines.push(Line::default());
        for status in DayStatus::LEGEND {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:width$}", status.label(), width = KEY_COLUMN),
                    status_style(status),
                ),
                Span::raw(describe(status)),
            ]));
        }
        lines.push(Line::default());
        lines.push(Line::raw("Press any key to dismiss."));
        Text::from(lines)
    }
}

fn describe(status: DayStatus) -> &'static str {
    match status {
        DayStatus::Available => "Free; can be selected",
        DayStatus::Reserved => "Held by an unconfirmed booking",
        DayStatus::Booked => "Taken by a confirmed booking",
        DayStatus::Past => "Already gone",
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = self.text();
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.width);
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.height);
        let [column] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [popup] = Layout::vertical([height]).flex(Flex::Center).areas(column);
        Clear.render(popup, buf);
        Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Help ")
                    .title_alignment(Alignment::Center),
            )
            .style(self.0)
            .render(popup, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_lists_bindings_and_statuses() {
        let text = Help(Style::new()).text();
        let rendered = text
            .lines
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        assert_eq!(rendered.len(), BINDINGS.len() + DayStatus::LEGEND.len() + 3);
        assert_eq!(rendered[0], "h, LEFT         Previous day");
        assert_eq!(
            rendered[BINDINGS.len() + 1],
            "Available       Free; can be selected"
        );
        assert_eq!(rendered.last().unwrap(), "Press any key to dismiss.");
    }

    #[test]
    fn test_render_fits_small_area() {
        let area = Rect::new(0, 0, 20, 5);
        let mut buffer = Buffer::empty(area);
        Help(Style::new()).render(area, &mut buffer);
        assert_eq!(buffer.area, area);
        assert_eq!(buffer[(0, 0)].symbol(), "┌");
    }
}
