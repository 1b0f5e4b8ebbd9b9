use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::chat_header::HEADER_HEIGHT;
use crate::tui::components::empty_state::NO_CHAT_SELECTED;
use crate::tui::components::text_field::FIELD_HEIGHT;
use crate::tui::components::{
    ChatHeader, ContactList, EmptyState, LoginGate, MessageList, TitleBar,
};
use crate::tui::{Focus, TuiState};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

/// Directory column width, search box included
const SIDEBAR_WIDTH: u16 = 36;
const NO_CHAT_HINT: &str = "Enter: открыть чат  n: новый чат";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let [title_area, main_area] = Layout::vertical([Length(1), Min(0)]).areas(frame.area());
    let [sidebar_area, chat_area] =
        Layout::horizontal([Length(SIDEBAR_WIDTH), Min(0)]).areas(main_area);

    TitleBar::new(app.status_message.clone(), tui.pending_replies).render(frame, title_area);
    draw_sidebar(frame, sidebar_area, app, tui);
    draw_chat(frame, chat_area, app, tui);

    // Modals last so they cover everything
    if app.gate.is_open() {
        LoginGate {
            state: &mut tui.gate,
            method: app.gate.method(),
            error: app.gate.error(),
        }
        .render(frame, frame.area());
    } else if let Some(prompt) = tui.prompt.as_mut() {
        prompt.render(frame, frame.area());
    }
}

fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let [search_area, list_area] = Layout::vertical([Length(FIELD_HEIGHT), Min(0)]).areas(area);

    tui.search.render(frame, search_area);

    let visible = app.visible_contacts();
    ContactList {
        state: &mut tui.contacts,
        contacts: &visible,
        selected: app.selected,
        focused: tui.focus == Focus::Directory,
        directory_empty: app.directory.is_empty(),
    }
    .render(frame, list_area);
}

fn draw_chat(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let [body_area, composer_area] = Layout::vertical([Min(0), Length(FIELD_HEIGHT)]).areas(area);

    match app.selected_contact() {
        Some(contact) => {
            let [header_area, messages_area] =
                Layout::vertical([Length(HEADER_HEIGHT), Min(0)]).areas(body_area);
            ChatHeader { contact }.render(frame, header_area);
            MessageList::new(&mut tui.message_list, contact.id, app.timeline(contact.id))
                .render(frame, messages_area);
        }
        None => EmptyState {
            title: NO_CHAT_SELECTED,
            hint: Some(NO_CHAT_HINT),
        }
        .render(frame, body_area),
    }

    tui.composer.render(frame, composer_area);
}
