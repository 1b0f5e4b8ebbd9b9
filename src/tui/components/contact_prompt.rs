//! New-contact modal: a single name field with explicit submit and cancel.
//!
//! The event loop keeps running while it is open; the prompt just owns the
//! keyboard until it reports `Submit` or `Cancel`.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::tui::component::{Component, EventHandler};
use crate::tui::components::overlay::{centered_rect, render_dialog};
use crate::tui::components::text_field::{FIELD_HEIGHT, FieldEvent, TextField};
use crate::tui::event::TuiEvent;
use crate::tui::theme;

pub const PROMPT_TITLE: &str = "Новый чат";
pub const PROMPT_LABEL: &str = "Введите имя контакта:";
const PROMPT_WIDTH: u16 = 44;
const PROMPT_HEIGHT: u16 = 8;
const KEY_HINT: &str = "Enter: создать  Esc: отмена";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptEvent {
    /// The raw field text; blank names are rejected downstream
    Submit(String),
    Cancel,
}

pub struct ContactPrompt {
    field: TextField,
}

impl Default for ContactPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactPrompt {
    pub fn new() -> Self {
        let mut field = TextField::new("", "Имя");
        field.focused = true;
        Self { field }
    }
}

impl Component for ContactPrompt {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let dialog = centered_rect(PROMPT_WIDTH, PROMPT_HEIGHT, area);
        let inner = render_dialog(frame, dialog, PROMPT_TITLE);

        let [label_area, field_area, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(1),
        ])
        .areas(inner);

        frame.render_widget(Paragraph::new(PROMPT_LABEL), label_area);
        self.field.render(frame, field_area);
        frame.render_widget(
            Paragraph::new(Line::from(KEY_HINT).fg(theme::MUTED)).centered(),
            hint_area,
        );
    }
}

impl EventHandler for ContactPrompt {
    type Event = PromptEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Escape => Some(PromptEvent::Cancel),
            other => match self.field.handle_event(other) {
                Some(FieldEvent::Submit) => Some(PromptEvent::Submit(self.field.text().to_string())),
                _ => None,
            },
        }
    }
}
