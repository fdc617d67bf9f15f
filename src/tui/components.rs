// Shared render components - buttons, overlays, centering helpers
//
// Stages record the rectangles they drew interactive things into, so mouse
// events arriving later can be hit-tested against the last frame's layout.

use crate::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// A clickable region remembered from the last frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct HitRegion {
    pub rect: Rect,
}

impl HitRegion {
    pub fn set(&mut self, rect: Rect) {
        self.rect = rect;
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.rect.x
            && column < self.rect.x + self.rect.width
            && row >= self.rect.y
            && row < self.rect.y + self.rect.height
    }
}

/// A rect of the given size centered inside `area`, clamped to fit.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Width of a label in terminal cells, plus button padding.
pub fn button_width(label: &str) -> u16 {
    label.width() as u16 + 6
}

/// Draw a bordered, rounded button and return the rect it occupied.
pub fn draw_button(
    f: &mut Frame,
    rect: Rect,
    label: &str,
    theme: &Theme,
    emphasized: bool,
) -> Rect {
    let (fg, border) = if emphasized {
        (theme.rose_deep, theme.rose)
    } else {
        (theme.text_dim, theme.border)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border));
    let text = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(Style::default().fg(fg).add_modifier(if emphasized {
            Modifier::BOLD
        } else {
            Modifier::empty()
        }))
        .block(block);
    f.render_widget(text, rect);
    rect
}

/// Draw a centered overlay panel on top of existing content and return the
/// inner area for the caller to fill.
pub fn draw_overlay(f: &mut Frame, area: Rect, width: u16, height: u16, theme: &Theme) -> Rect {
    let panel = centered_rect(area, width, height);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.rose))
        .style(Style::default().bg(theme.surface));
    let inner = block.inner(panel);
    f.render_widget(Clear, panel);
    f.render_widget(block, panel);
    inner
}

/// Centered italic-style prose line.
pub fn draw_centered_line(f: &mut Frame, rect: Rect, text: &str, style: Style) {
    let paragraph = Paragraph::new(Line::from(text))
        .alignment(Alignment::Center)
        .style(style)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, rect);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_region_bounds() {
        let mut region = HitRegion::default();
        region.set(Rect::new(10, 5, 8, 3));
        assert!(region.contains(10, 5));
        assert!(region.contains(17, 7));
        assert!(!region.contains(18, 7));
        assert!(!region.contains(17, 8));
        assert!(!region.contains(9, 5));
    }

    #[test]
    fn test_centered_rect_is_centered_and_clamped() {
        let area = Rect::new(0, 0, 80, 24);
        let rect = centered_rect(area, 20, 4);
        assert_eq!(rect, Rect::new(30, 10, 20, 4));

        let oversized = centered_rect(area, 200, 90);
        assert_eq!(oversized, area);
    }

    #[test]
    fn test_button_width_counts_display_cells() {
        assert_eq!(button_width("yes"), 9);
        // Wide glyphs take two cells each.
        assert!(button_width("愛してる") > button_width("love"));
    }
}
