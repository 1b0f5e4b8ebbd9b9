//! # Actions
//!
//! Everything that can happen in NikMessenger becomes an `Action`.
//! User presses Enter in the composer? That's `Action::Submit(text)`.
//! The reply timer fires? That's `Action::ReplyDue { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state, and returns an `Effect` describing any I/O the adapter must perform.
//! No side effects here. Timers and terminal I/O happen elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use std::time::Duration;

use log::{debug, info, warn};

use crate::core::gate::AuthMethod;
use crate::core::state::App;
use crate::core::types::{ContactId, Direction};

/// Body prefix of a synthesized reply.
pub const REPLY_PREFIX: &str = "Получено: ";

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    /// Switch the gate's login method
    SetAuthMethod(AuthMethod),
    /// Submit the gate with the active field's text
    Login(String),
    SetSearchQuery(String),
    SelectContact(ContactId),
    /// Name entered in the new-contact prompt
    CreateContact(String),
    /// Composer submit for the selected contact
    Submit(String),
    /// The reply timer for a message sent to `contact` elapsed
    ReplyDue { contact: ContactId, text: String },
}

/// A synthetic reply waiting for its delay to elapse.
///
/// `text` is the sent body, captured by value at send time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    pub contact: ContactId,
    pub text: String,
    pub delay: Duration,
}

impl PendingReply {
    pub fn into_action(self) -> Action {
        Action::ReplyDue {
            contact: self.contact,
            text: self.text,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    ScheduleReply(PendingReply),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Quit => Effect::Quit,
        Action::SetAuthMethod(method) => {
            if app.gate.is_open() {
                app.gate.select_method(method);
            }
            Effect::None
        }
        Action::Login(credential) => {
            match app.gate.login(&credential) {
                Ok(true) => {
                    info!("Login via {}", app.gate.method().label());
                    app.status_message = String::from("Вы вошли");
                }
                Ok(false) => debug!("Login ignored: gate already closed"),
                Err(e) => {
                    debug!("Login rejected: {}", e);
                    app.status_message = e.to_string();
                }
            }
            Effect::None
        }
        // The gate blocks everything below until login succeeds
        other if app.gate.is_open() => {
            debug!("Ignoring {:?} while gate is open", other);
            Effect::None
        }
        Action::SetSearchQuery(query) => {
            app.search_query = query;
            Effect::None
        }
        Action::SelectContact(id) => {
            if app.directory.contains(id) {
                app.selected = Some(id);
                if let Some(contact) = app.directory.get(id) {
                    app.status_message = format!("Чат: {}", contact.name);
                }
            } else {
                warn!("Select for unknown contact {}", id);
            }
            Effect::None
        }
        Action::CreateContact(name) => {
            if name.trim().is_empty() {
                debug!("Contact name is blank, nothing created");
                return Effect::None;
            }
            let online = app.presence.next_online();
            let time = app.clock.stamp();
            if let Some(id) = app.directory.create(&name, time, online) {
                info!("Created contact {}", id);
                app.status_message = format!("Создан чат: {}", name.trim());
            }
            Effect::None
        }
        Action::Submit(text) => {
            if text.trim().is_empty() {
                debug!("Blank composer submit ignored");
                return Effect::None;
            }
            let Some(id) = app.selected else {
                debug!("Composer submit with no selected contact ignored");
                return Effect::None;
            };
            let time = app.clock.stamp();
            app.timeline_mut(id)
                .push(text.clone(), Direction::Outgoing, time.clone());
            app.directory.record_activity(id, &text, &time);
            debug!("Appended outgoing message to {} (len={})", id, text.len());

            match app.auto_reply {
                Some(delay) => Effect::ScheduleReply(PendingReply {
                    contact: id,
                    text,
                    delay,
                }),
                None => Effect::None,
            }
        }
        Action::ReplyDue { contact, text } => {
            if !app.directory.contains(contact) {
                warn!("Reply for unknown contact {} dropped", contact);
                return Effect::None;
            }
            let body = format!("{REPLY_PREFIX}{text}");
            let time = app.clock.stamp();
            app.directory.record_activity(contact, &body, &time);
            app.timeline_mut(contact)
                .push(body, Direction::Incoming, time);
            debug!("Appended auto-reply to {}", contact);
            Effect::None
        }
    }
}
