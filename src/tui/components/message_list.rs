//! # MessageList Component
//!
//! Scrollable view of the selected contact's timeline.
//!
//! ## Responsibilities
//!
//! - Display the timeline as chat bubbles, oldest first
//! - Manage scrolling and stick-to-bottom
//! - Cache bubble heights per contact so only new messages are measured
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the timeline (props).
//! Rendering mutates only the TUI-side state, never the core timeline.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::timeline::Timeline;
use crate::core::types::ContactId;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::Bubble;
use crate::tui::event::TuiEvent;
use crate::tui::theme;

pub const EMPTY_TIMELINE: &str = "Начните переписку";

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    /// Scroll offset and view state
    pub scroll_state: ScrollViewState,
    /// Cached layout measurements
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true,
            viewport_height: 0,
        }
    }

    /// Reset scrolling for a newly opened conversation.
    pub fn reset(&mut self) {
        self.scroll_state = ScrollViewState::default();
        self.stick_to_bottom = true;
    }

    fn max_offset(&self) -> u16 {
        self.layout.total_height().saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }

    /// Re-engage auto-scroll once the user scrolls back down to the end.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }
}

/// Scrollable conversation view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub contact: ContactId,
    pub timeline: Option<&'a Timeline>,
}

impl<'a> MessageList<'a> {
    pub fn new(state: &'a mut MessageListState, contact: ContactId, timeline: Option<&'a Timeline>) -> Self {
        Self { state, contact, timeline }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let messages = self.timeline.map(Timeline::messages).unwrap_or_default();
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar safe area

        self.state.viewport_height = area.height;

        if messages.is_empty() {
            self.state.layout.invalidate();
            let placeholder = Paragraph::new(Line::from(EMPTY_TIMELINE).fg(theme::MUTED))
                .centered();
            let y = area.y + area.height / 2;
            frame.render_widget(placeholder, Rect::new(area.x, y, area.width, 1.min(area.height)));
            return;
        }

        // 1. Update layout cache
        let layout = &mut self.state.layout;
        let reusable = layout.reusable_count(self.contact, messages.len(), content_width);
        layout.heights.truncate(reusable);
        for message in messages.iter().skip(layout.heights.len()) {
            layout.heights.push(Bubble::calculate_height(message, content_width));
        }
        layout.rebuild_prefix_heights();
        layout.update_metadata(self.contact, messages.len(), content_width);

        let total_height = self.state.layout.total_height();

        // 2. Pin to the last message or clamp the manual offset
        if self.state.stick_to_bottom {
            let bottom = self.state.max_offset();
            self.state.scroll_state.set_offset(Position { x: 0, y: bottom });
        } else {
            self.state.clamp_scroll();
        }

        let scroll_offset = self.state.scroll_state.offset().y;
        let visible_range = self.state.layout.visible_range(scroll_offset, area.height);

        // 3. Render visible bubbles into a ScrollView
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        for (i, y, height) in self.state.layout.rows(visible_range) {
            let row = Rect::new(0, y, content_width, height);
            scroll_view.render_widget(Bubble::new(&messages[i]), row);
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// Implemented on the state because the list itself is rebuilt every frame.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp | TuiEvent::CursorUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown | TuiEvent::CursorDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            _ => {}
        }
        None
    }
}

/// Cached bubble heights for one contact's timeline at one width.
///
/// Timelines only grow, so a cache for the same contact and width stays
/// valid for every message it already measured.
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    contact: Option<ContactId>,
    message_count: usize,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            contact: None,
            message_count: 0,
            content_width: 0,
        }
    }

    pub fn invalidate(&mut self) {
        *self = Self::new();
    }

    pub fn reusable_count(&self, contact: ContactId, message_count: usize, content_width: u16) -> usize {
        if self.contact != Some(contact) || self.content_width != content_width {
            return 0;
        }
        if message_count < self.message_count {
            return 0;
        }
        self.heights.len().min(message_count)
    }

    pub fn update_metadata(&mut self, contact: ContactId, message_count: usize, content_width: u16) {
        self.contact = Some(contact);
        self.message_count = message_count;
        self.content_width = content_width;
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    pub fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Canvas y of the item at `index`.
    pub fn top_of(&self, index: usize) -> u16 {
        match index {
            0 => 0,
            i => self.prefix_heights.get(i - 1).copied().unwrap_or(0),
        }
    }

    /// `(index, y, height)` for each item in `range`.
    ///
    /// The canvas is `u16` tall; items past its end are dropped and the last
    /// one that fits is cut to the remaining rows.
    pub fn rows(&self, range: std::ops::Range<usize>) -> Vec<(usize, u16, u16)> {
        let mut y = self.top_of(range.start);
        let mut rows = Vec::with_capacity(range.len());
        for i in range {
            let Some(&height) = self.heights.get(i) else {
                break;
            };
            if y == u16::MAX {
                break;
            }
            let height = height.min(u16::MAX - y);
            rows.push((i, y, height));
            y = y.saturating_add(height);
        }
        rows
    }

    /// Indices worth rendering around the viewport, with half a screen of slack.
    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self.prefix_heights.partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Direction;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn timeline_of(bodies: &[&str]) -> Timeline {
        let mut timeline = Timeline::default();
        for (i, body) in bodies.iter().enumerate() {
            let direction = if i % 2 == 0 { Direction::Outgoing } else { Direction::Incoming };
            timeline.push(body.to_string(), direction, "12:30".to_string());
        }
        timeline
    }

    fn render_text(state: &mut MessageListState, timeline: Option<&Timeline>, w: u16, h: u16) -> String {
        let backend = TestBackend::new(w, h);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| MessageList::new(state, ContactId(1), timeline).render(f, f.area()))
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
    fn test_layout_cache_reusable() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![3; 5];
        cache.update_metadata(ContactId(1), 5, 80);

        // Same contact and width -> all reusable
        assert_eq!(cache.reusable_count(ContactId(1), 5, 80), 5);
        // New message appended -> cached ones still valid
        assert_eq!(cache.reusable_count(ContactId(1), 6, 80), 5);
        // Width changed -> nothing reusable
        assert_eq!(cache.reusable_count(ContactId(1), 5, 40), 0);
        // Different contact -> nothing reusable
        assert_eq!(cache.reusable_count(ContactId(2), 5, 80), 0);
    }

    #[test]
    fn test_visible_range_and_offsets() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![3; 10];
        cache.rebuild_prefix_heights();
        assert_eq!(cache.total_height(), 30);
        assert_eq!(cache.top_of(0), 0);
        assert_eq!(cache.top_of(4), 12);

        // viewport 6 at offset 12 → slack of 3 either side: rows 9..21
        assert_eq!(cache.visible_range(12, 6), 3..7);
    }

    #[test]
    fn test_rows_stop_at_canvas_limit() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![30_000; 4];
        cache.rebuild_prefix_heights();
        assert_eq!(cache.total_height(), u16::MAX);

        let rows = cache.rows(0..4);
        assert_eq!(rows, vec![(0, 0, 30_000), (1, 30_000, 30_000), (2, 60_000, 5_535)]);
        // Starting past the limit yields nothing
        assert!(cache.rows(3..4).is_empty());
    }

    #[test]
    fn test_rows_follow_prefix_heights() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![3, 5, 4];
        cache.rebuild_prefix_heights();
        assert_eq!(cache.rows(1..3), vec![(1, 3, 5), (2, 8, 4)]);
    }

    #[test]
    fn test_empty_timeline_placeholder() {
        let mut state = MessageListState::new();
        let text = render_text(&mut state, None, 40, 5);
        assert!(text.contains(EMPTY_TIMELINE));
    }

    #[test]
    fn test_renders_messages_in_order() {
        let mut state = MessageListState::new();
        let timeline = timeline_of(&["первое", "второе"]);
        let text = render_text(&mut state, Some(&timeline), 40, 10);
        let first = text.find("первое").unwrap();
        let second = text.find("второе").unwrap();
        assert!(first < second);
        assert_eq!(state.layout.heights.len(), 2);
    }

    #[test]
    fn test_sticks_to_bottom_with_overflow() {
        let mut state = MessageListState::new();
        let bodies: Vec<String> = (0..10).map(|i| format!("msg{i}")).collect();
        let refs: Vec<&str> = bodies.iter().map(String::as_str).collect();
        let timeline = timeline_of(&refs);
        let text = render_text(&mut state, Some(&timeline), 40, 6);
        assert!(text.contains("msg9"));
        assert!(!text.contains("msg0"));
    }

    #[test]
    fn test_scroll_up_unpins_and_down_repins() {
        let mut state = MessageListState::new();
        state.layout.heights = vec![3; 10];
        state.layout.rebuild_prefix_heights();
        state.viewport_height = 6;
        state.scroll_state.set_offset(Position { x: 0, y: 24 });

        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);

        state.scroll_state.set_offset(Position { x: 0, y: 30 });
        state.handle_event(&TuiEvent::ScrollDown);
        assert!(state.stick_to_bottom);
        assert_eq!(state.scroll_state.offset().y, 24);
    }

    #[test]
    fn test_reset_repins() {
        let mut state = MessageListState::new();
        state.stick_to_bottom = false;
        state.reset();
        assert!(state.stick_to_bottom);
        assert_eq!(state.scroll_state.offset().y, 0);
    }
}
