use ratatui::layout::Rect;
use ratatui::style::{Style, Stylize};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::core::types::{Direction, Message};
use crate::tui::theme;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;
/// Bubbles never grow wider than this share of the list width.
const MAX_WIDTH_PERCENT: u32 = 65;

/// A single chat bubble.
///
/// `Bubble` is a **transient component**: the message list builds one per
/// visible message each frame. Outgoing bubbles hug the right edge in the
/// accent color, incoming ones the left edge. The timestamp sits in the
/// bottom border so it costs no extra rows.
///
/// # Height Calculation
///
/// [`calculate_height`](Self::calculate_height) predicts the rendered height
/// with `textwrap` options matching `Paragraph` wrapping, so the list can lay
/// out its scroll canvas without rendering first.
#[derive(Clone, Copy)]
pub struct Bubble<'a> {
    pub message: &'a Message,
}

impl<'a> Bubble<'a> {
    pub fn new(message: &'a Message) -> Self {
        Self { message }
    }

    /// Width of the bubble inside a list of `list_width` columns.
    pub fn bubble_width(message: &Message, list_width: u16) -> u16 {
        let max_width = (u32::from(list_width) * MAX_WIDTH_PERCENT / 100) as u16;
        let max_width = max_width.max(HORIZONTAL_OVERHEAD + 1);
        let longest_line = message
            .body
            .lines()
            .map(UnicodeWidthStr::width)
            .max()
            .unwrap_or(0)
            .max(message.time.width());
        let longest_line = u16::try_from(longest_line).unwrap_or(u16::MAX);
        longest_line
            .saturating_add(HORIZONTAL_OVERHEAD)
            .min(max_width)
            .min(list_width)
    }

    /// Rows needed for `message` in a list of `list_width` columns.
    pub fn calculate_height(message: &Message, list_width: u16) -> u16 {
        let content_width = Self::bubble_width(message, list_width).saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return 1;
        }

        let body = message.body.trim();
        if body.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(body, options);
        u16::try_from(lines.len())
            .unwrap_or(u16::MAX)
            .max(1)
            .saturating_add(VERTICAL_OVERHEAD)
    }

    /// The rectangle the bubble occupies within a row spanning `row`.
    pub fn placement(message: &Message, row: Rect) -> Rect {
        let width = Self::bubble_width(message, row.width);
        let x = match message.direction {
            Direction::Outgoing => row.x + row.width.saturating_sub(width),
            Direction::Incoming => row.x,
        };
        Rect::new(x, row.y, width, row.height)
    }
}

fn bubble_style(direction: Direction) -> Style {
    match direction {
        Direction::Outgoing => Style::default().fg(theme::ACCENT),
        Direction::Incoming => Style::default().fg(theme::INCOMING),
    }
}

impl<'a> Widget for Bubble<'a> {
    /// Renders into the full row `area`; the bubble itself is placed inside it.
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let bubble_area = Self::placement(self.message, area);
        let style = bubble_style(self.message.direction);

        let time = Line::from(self.message.time.as_str()).fg(theme::MUTED).right_aligned();
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(style)
            .title_bottom(time)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(bubble_area);
        block.render(bubble_area, buf);

        Paragraph::new(self.message.body.trim())
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::MessageId;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::style::Color;

    fn make_message(direction: Direction, body: &str) -> Message {
        Message {
            id: MessageId(1),
            body: body.to_string(),
            direction,
            time: "12:30".to_string(),
        }
    }

    #[test]
    fn calculate_height_empty_body_returns_border_height() {
        let message = make_message(Direction::Outgoing, "");
        assert_eq!(Bubble::calculate_height(&message, 80), VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_zero_width_returns_minimum() {
        let message = make_message(Direction::Outgoing, "Привет");
        assert_eq!(Bubble::calculate_height(&message, 0), 1);
    }

    #[test]
    fn calculate_height_short_message_is_one_line() {
        let message = make_message(Direction::Incoming, "Привет");
        assert_eq!(Bubble::calculate_height(&message, 80), 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_wraps_at_max_width() {
        // list 20 → max bubble 13 → 9 content cells
        let message = make_message(Direction::Outgoing, "alpha beta gamma");
        assert_eq!(Bubble::bubble_width(&message, 20), 13);
        assert_eq!(Bubble::calculate_height(&message, 20), 3 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn bubble_width_fits_timestamp() {
        let message = make_message(Direction::Outgoing, "ok");
        assert_eq!(Bubble::bubble_width(&message, 80), 5 + HORIZONTAL_OVERHEAD);
    }

    #[test]
    fn bubble_width_clamps_very_long_line() {
        let message = make_message(Direction::Incoming, &"a".repeat(65533));
        assert_eq!(Bubble::bubble_width(&message, 80), 52);
        // 48 content cells: 1365 full rows plus a 13-char tail
        assert_eq!(Bubble::calculate_height(&message, 80), 1366 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_saturates_for_tall_body() {
        let message = make_message(Direction::Outgoing, &"a\n".repeat(70_000));
        assert_eq!(Bubble::calculate_height(&message, 80), u16::MAX);
    }

    #[test]
    fn placement_aligns_by_direction() {
        let row = Rect::new(0, 0, 40, 3);
        let out = Bubble::placement(&make_message(Direction::Outgoing, "hi"), row);
        let inc = Bubble::placement(&make_message(Direction::Incoming, "hi"), row);
        assert_eq!(out.x + out.width, 40);
        assert_eq!(inc.x, 0);
    }

    #[test]
    fn render_shows_body_and_time() {
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let message = make_message(Direction::Outgoing, "Привет");
        terminal
            .draw(|f| f.render_widget(Bubble::new(&message), f.area()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Привет"));
        assert!(text.contains("12:30"));
        // Outgoing border sits on the right edge in the accent color
        assert_eq!(buffer[(39u16, 1u16)].fg, theme::ACCENT);
        assert_eq!(buffer[(0u16, 1u16)].fg, Color::Reset);
    }
}
