//! Shared frame for modal dialogs drawn over the main layout.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Clear, Padding};

use crate::tui::theme;

/// A `width` x `height` rectangle centered in `area`, shrunk to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Clear `area`, draw the dialog border with `title`, and return the inner rect.
pub fn render_dialog(frame: &mut Frame, area: Rect, title: &str) -> Rect {
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::ACCENT))
        .title(title)
        .title_style(Style::default().add_modifier(Modifier::BOLD))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);
    inner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect(50, 10, area), Rect::new(25, 15, 50, 10));
    }

    #[test]
    fn test_centered_rect_shrinks_to_fit() {
        let area = Rect::new(2, 1, 30, 8);
        assert_eq!(centered_rect(50, 10, area), Rect::new(2, 1, 30, 8));
    }
}
