//! # LoginGate Component
//!
//! Modal shown until the session gate closes. A tab strip picks the method
//! (Телефон, Email, Google); phone and email each keep their own text field,
//! so switching back and forth preserves what was typed.
//!
//! The component only translates input into [`GateEvent`]s. Whether a login
//! succeeds is decided by the core gate, and its error comes back as a prop.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style, Stylize};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Tabs};

use crate::core::gate::{AuthMethod, LoginError};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::overlay::{centered_rect, render_dialog};
use crate::tui::components::text_field::{FIELD_HEIGHT, TextField};
use crate::tui::event::TuiEvent;
use crate::tui::theme;

pub const GATE_TITLE: &str = "Войти в NikMessenger";
const GATE_WIDTH: u16 = 52;
const GATE_HEIGHT: u16 = 11;
const GOOGLE_HINT: &str = "Нажмите Enter, чтобы войти через Google";
const KEY_HINT: &str = "Tab: способ входа  Enter: войти";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateEvent {
    SelectMethod(AuthMethod),
    /// Login with the active field's text (empty for Google)
    Login(String),
}

pub struct LoginGateState {
    pub phone: TextField,
    pub email: TextField,
    /// Mirror of the core gate's method, set by the owner before routing input
    method: AuthMethod,
}

impl Default for LoginGateState {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginGateState {
    pub fn new() -> Self {
        let mut phone = TextField::new("Номер телефона", "+7 900 000-00-00");
        phone.focused = true;
        let mut email = TextField::new("Email", "name@example.com");
        email.focused = true;
        Self {
            phone,
            email,
            method: AuthMethod::default(),
        }
    }

    pub fn sync(&mut self, method: AuthMethod) {
        self.method = method;
    }

    fn active_field(&mut self) -> Option<&mut TextField> {
        match self.method {
            AuthMethod::Phone => Some(&mut self.phone),
            AuthMethod::Email => Some(&mut self.email),
            AuthMethod::Google => None,
        }
    }

    fn credential(&self) -> String {
        match self.method {
            AuthMethod::Phone => self.phone.text().to_string(),
            AuthMethod::Email => self.email.text().to_string(),
            AuthMethod::Google => String::new(),
        }
    }
}

impl EventHandler for LoginGateState {
    type Event = GateEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Tab => Some(GateEvent::SelectMethod(self.method.next())),
            TuiEvent::BackTab => Some(GateEvent::SelectMethod(self.method.prev())),
            TuiEvent::CursorRight if !self.method.has_field() => {
                Some(GateEvent::SelectMethod(self.method.next()))
            }
            TuiEvent::CursorLeft if !self.method.has_field() => {
                Some(GateEvent::SelectMethod(self.method.prev()))
            }
            TuiEvent::Submit => Some(GateEvent::Login(self.credential())),
            other => {
                // Typing goes to the field; it never produces a gate event
                if let Some(field) = self.active_field() {
                    field.handle_event(other);
                }
                None
            }
        }
    }
}

pub struct LoginGate<'a> {
    pub state: &'a mut LoginGateState,
    pub method: AuthMethod,
    pub error: Option<&'a LoginError>,
}

impl<'a> Component for LoginGate<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.sync(self.method);
        let dialog = centered_rect(GATE_WIDTH, GATE_HEIGHT, area);
        let inner = render_dialog(frame, dialog, GATE_TITLE);

        let [tabs_area, _, field_area, error_area, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let tabs = Tabs::new(AuthMethod::ALL.iter().map(|m| m.label()))
            .select(self.method.index())
            .highlight_style(
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )
            .divider(" ");
        frame.render_widget(tabs, tabs_area);

        match self.state.active_field() {
            Some(field) => field.render(frame, field_area),
            None => {
                let hint = Paragraph::new(Line::from(GOOGLE_HINT)).centered();
                frame.render_widget(hint, Rect { y: field_area.y + 1, height: 1, ..field_area });
            }
        }

        if let Some(error) = self.error {
            let line = Line::from(error.to_string()).fg(theme::ERROR);
            frame.render_widget(Paragraph::new(line), error_area);
        }

        let hint = Paragraph::new(Line::from(KEY_HINT).fg(theme::MUTED)).centered();
        frame.render_widget(hint, hint_area);
    }
}
