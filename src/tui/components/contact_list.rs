//! # ContactList Component
//!
//! Sidebar list of conversations, already filtered by the search query.
//!
//! Each contact takes two rows: avatar, name and last-activity time on the
//! first; presence dot and last-message preview on the second. The list keeps
//! a keyboard highlight separate from the core's selected contact; opening the
//! highlighted row is what turns it into a selection.
//!
//! `ContactList` is transient (built each frame from `&mut ContactListState`
//! and the visible contacts); `ContactListState` persists in `TuiState`.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, List, ListItem, ListState, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::types::{Contact, ContactId};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::theme;

pub const NO_CONTACTS: &str = "У вас пока нет чатов";
pub const NO_CONTACTS_HINT: &str = "Нажмите n, чтобы создать чат";
pub const NOTHING_FOUND: &str = "Ничего не найдено";

/// Rows per contact
const ITEM_HEIGHT: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactListEvent {
    /// Open the visible row at this index
    Open(usize),
}

#[derive(Default)]
pub struct ContactListState {
    list_state: ListState,
    /// Number of rows shown last frame (or announced by `sync`)
    item_count: usize,
    /// Inner list area from the last render, for mouse hit testing
    last_inner: Rect,
}

impl ContactListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.list_state.selected()
    }

    /// Tell the state how many rows are visible, keeping the highlight in range.
    pub fn sync(&mut self, item_count: usize) {
        self.item_count = item_count;
        match (item_count, self.list_state.selected()) {
            (0, _) => self.list_state.select(None),
            (_, None) => self.list_state.select(Some(0)),
            (n, Some(i)) if i >= n => self.list_state.select(Some(n - 1)),
            _ => {}
        }
    }

    /// Move the highlight to `index`; the next `sync` clamps it.
    pub fn highlight(&mut self, index: usize) {
        self.list_state.select(Some(index));
    }

    fn move_up(&mut self) {
        if let Some(i) = self.list_state.selected() {
            self.list_state.select(Some(i.saturating_sub(1)));
        }
    }

    fn move_down(&mut self) {
        if let Some(i) = self.list_state.selected()
            && i + 1 < self.item_count
        {
            self.list_state.select(Some(i + 1));
        }
    }

    /// Row index under a terminal position, if any.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<usize> {
        if !self.last_inner.contains(Position::new(column, row)) {
            return None;
        }
        let index = ((row - self.last_inner.y) / ITEM_HEIGHT) as usize + self.list_state.offset();
        (index < self.item_count).then_some(index)
    }
}

impl EventHandler for ContactListState {
    type Event = ContactListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::CursorUp => {
                self.move_up();
                None
            }
            TuiEvent::CursorDown => {
                self.move_down();
                None
            }
            TuiEvent::Submit => self.highlighted().map(ContactListEvent::Open),
            TuiEvent::MouseClick(column, row) => {
                let index = self.hit_test(*column, *row)?;
                self.list_state.select(Some(index));
                Some(ContactListEvent::Open(index))
            }
            _ => None,
        }
    }
}

pub struct ContactList<'a> {
    pub state: &'a mut ContactListState,
    /// Contacts matching the current query, in directory order
    pub contacts: &'a [&'a Contact],
    pub selected: Option<ContactId>,
    pub focused: bool,
    /// Whether the unfiltered directory has any contacts at all
    pub directory_empty: bool,
}

impl<'a> Component for ContactList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(theme::ACCENT)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title("Чаты");
        let inner = block.inner(area);
        self.state.last_inner = inner;
        self.state.sync(self.contacts.len());

        if self.contacts.is_empty() {
            let lines = if self.directory_empty {
                vec![
                    Line::from(NO_CONTACTS),
                    Line::from(NO_CONTACTS_HINT).fg(theme::MUTED),
                ]
            } else {
                vec![Line::from(NOTHING_FOUND).fg(theme::MUTED)]
            };
            frame.render_widget(Paragraph::new(lines).centered().block(block), area);
            return;
        }

        let width = inner.width;
        let items: Vec<ListItem> = self
            .contacts
            .iter()
            .map(|c| contact_item(c, width, self.selected == Some(c.id)))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(theme::HIGHLIGHT_BG));

        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

fn contact_item(contact: &Contact, width: u16, is_active: bool) -> ListItem<'static> {
    let width = width as usize;
    let avatar = format!(" {} ", contact.avatar);
    let avatar_width = avatar.width();
    let time_width = contact.time.width();

    let name_room = width.saturating_sub(avatar_width + time_width + 2);
    let name = truncate_to_width(&contact.name, name_room);
    let gap = width.saturating_sub(avatar_width + 1 + name.width() + time_width);

    let name_style = if is_active {
        Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let first = Line::from(vec![
        Span::styled(avatar, Style::default().fg(Color::White).bg(theme::ACCENT).bold()),
        Span::raw(" "),
        Span::styled(name, name_style),
        Span::raw(" ".repeat(gap)),
        Span::styled(contact.time.clone(), Style::default().fg(theme::MUTED)),
    ]);

    let (dot, dot_color) = if contact.is_online() {
        ("●", theme::ONLINE)
    } else {
        ("○", theme::MUTED)
    };
    let preview_room = width.saturating_sub(avatar_width + 1);
    let second = Line::from(vec![
        Span::raw(" ".repeat(avatar_width.saturating_sub(2))),
        Span::styled(dot, Style::default().fg(dot_color)),
        Span::raw("  "),
        Span::styled(
            truncate_to_width(&contact.preview, preview_room),
            Style::default().fg(theme::MUTED),
        ),
    ]);

    ListItem::new(vec![first, second])
}

/// Cut `text` to at most `max` display columns, marking the cut with `…`.
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn contact(id: u64, name: &str, online: bool) -> Contact {
        Contact {
            id: ContactId(id),
            name: name.to_string(),
            preview: "Начните диалог".to_string(),
            avatar: crate::core::types::avatar_glyph(name),
            time: "12:30".to_string(),
            online: Some(online),
        }
    }

    fn draw(state: &mut ContactListState, contacts: &[&Contact], directory_empty: bool) -> String {
        let backend = TestBackend::new(30, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                ContactList {
                    state,
                    contacts,
                    selected: None,
                    focused: true,
                    directory_empty,
                }
                .render(f, f.area())
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_renders_rows() {
        let anna = contact(1, "Анна", true);
        let igor = contact(2, "Игорь", false);
        let mut state = ContactListState::new();
        let text = draw(&mut state, &[&anna, &igor], false);
        assert!(text.contains("Анна"));
        assert!(text.contains("Игорь"));
        assert!(text.contains("12:30"));
        assert!(text.contains('●'));
        assert!(text.contains('○'));
        assert_eq!(state.highlighted(), Some(0));
    }

    #[test]
    fn test_empty_directory_state() {
        let mut state = ContactListState::new();
        let text = draw(&mut state, &[], true);
        assert!(text.contains(NO_CONTACTS));
        assert_eq!(state.highlighted(), None);
    }

    #[test]
    fn test_nothing_found_state() {
        let mut state = ContactListState::new();
        let text = draw(&mut state, &[], false);
        assert!(text.contains(NOTHING_FOUND));
        assert!(!text.contains(NO_CONTACTS));
    }

    #[test]
    fn test_navigation_is_bounded() {
        let mut state = ContactListState::new();
        state.sync(2);
        state.handle_event(&TuiEvent::CursorUp);
        assert_eq!(state.highlighted(), Some(0));
        state.handle_event(&TuiEvent::CursorDown);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.highlighted(), Some(1));
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(ContactListEvent::Open(1))
        );
    }

    #[test]
    fn test_sync_clamps_highlight_when_filter_shrinks() {
        let mut state = ContactListState::new();
        state.sync(5);
        state.highlight(4);
        state.sync(2);
        assert_eq!(state.highlighted(), Some(1));
        state.sync(0);
        assert_eq!(state.highlighted(), None);
        assert_eq!(state.handle_event(&TuiEvent::Submit), None);
    }

    #[test]
    fn test_click_opens_row() {
        let a = contact(1, "A", true);
        let b = contact(2, "B", true);
        let mut state = ContactListState::new();
        draw(&mut state, &[&a, &b], false);

        // Border at row 0, first item rows 1-2, second item rows 3-4
        assert_eq!(
            state.handle_event(&TuiEvent::MouseClick(5, 3)),
            Some(ContactListEvent::Open(1))
        );
        assert_eq!(state.highlighted(), Some(1));
        // Below the last item
        assert_eq!(state.handle_event(&TuiEvent::MouseClick(5, 7)), None);
        // On the border
        assert_eq!(state.handle_event(&TuiEvent::MouseClick(0, 1)), None);
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Команда", 10), "Команда");
        assert_eq!(truncate_to_width("Команда проекта", 8), "Команда…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }
}
