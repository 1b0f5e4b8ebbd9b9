//! Centered placeholder for a pane with nothing to show.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;
use crate::tui::theme;

pub const NO_CHAT_SELECTED: &str = "Выберите чат, чтобы начать общение";

pub struct EmptyState<'a> {
    pub title: &'a str,
    pub hint: Option<&'a str>,
}

impl<'a> Component for EmptyState<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![Line::from(self.title).bold()];
        if let Some(hint) = self.hint {
            lines.push(Line::from(hint).fg(theme::MUTED));
        }
        let height = lines.len() as u16;
        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .areas(area);
        frame.render_widget(Paragraph::new(lines).centered(), middle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_renders_title_and_hint() {
        let backend = TestBackend::new(50, 7);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                EmptyState {
                    title: NO_CHAT_SELECTED,
                    hint: Some("Ctrl+N: новый чат"),
                }
                .render(f, f.area())
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        let rows: Vec<String> = (0..7u16)
            .map(|y| (0..50u16).map(|x| buffer[(x, y)].symbol()).collect())
            .collect();
        let title_row = rows.iter().position(|r| r.contains(NO_CHAT_SELECTED)).unwrap();
        assert!((2..=3).contains(&title_row));
        assert!(rows[title_row + 1].contains("новый чат"));
    }
}
