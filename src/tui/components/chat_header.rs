//! Header above the open conversation: avatar, name, presence.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::core::types::Contact;
use crate::tui::component::Component;
use crate::tui::theme;

pub const HEADER_HEIGHT: u16 = 3;

pub struct ChatHeader<'a> {
    pub contact: &'a Contact,
}

impl<'a> Component for ChatHeader<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let presence_style = if self.contact.is_online() {
            Style::default().fg(theme::ONLINE)
        } else {
            Style::default().fg(theme::MUTED)
        };

        let lines = vec![
            Line::from(vec![
                Span::styled(
                    format!(" {} ", self.contact.avatar),
                    Style::default().fg(Color::White).bg(theme::ACCENT).bold(),
                ),
                Span::raw(" "),
                Span::styled(self.contact.name.as_str(), Style::default().add_modifier(Modifier::BOLD)),
            ]),
            Line::from(vec![
                Span::raw("    "),
                Span::styled(self.contact.presence_label(), presence_style),
            ]),
        ];

        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
