//! # TitleBar Component
//!
//! Top status bar: app name, the latest status message, and a typing
//! indicator while auto-replies are in flight.
//!
//! Purely presentational. Props come from two places: `status_message` from
//! core `App`, `pending_replies` from the TUI's count of scheduled replies.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style, Stylize};
use ratatui::text::{Line, Span};

pub const APP_NAME: &str = "NikMessenger";
pub const TYPING_INDICATOR: &str = "печатает…";

pub struct TitleBar {
    pub status_message: String,
    /// Replies scheduled but not yet delivered
    pub pending_replies: usize,
}

impl TitleBar {
    pub fn new(status_message: String, pending_replies: usize) -> Self {
        Self {
            status_message,
            pending_replies,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            APP_NAME,
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(" | "));
            spans.push(Span::raw(self.status_message.as_str()));
        }
        if self.pending_replies > 0 {
            spans.push(Span::raw(" | "));
            spans.push(Span::raw(TYPING_INDICATOR).italic());
        }

        frame.render_widget(Line::from(spans), area);
    }
}
