// Gallery stage - captioned photo placeholders
//
// Image sources are opaque references; the terminal shows each one as a
// framed placeholder with its caption. Navigation wraps both ways and the
// continue control works from any photo.

use super::StageSignal;
use crate::content::Memory;
use crate::theme::Theme;
use crate::tui::components::{self, HitRegion};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

pub struct GalleryStage {
    memories: Vec<Memory>,
    continue_label: String,
    index: usize,
    prev_button: HitRegion,
    next_button: HitRegion,
    continue_button: HitRegion,
}

impl GalleryStage {
    pub fn new(memories: Vec<Memory>, continue_label: String) -> Self {
        assert!(!memories.is_empty(), "gallery needs at least one memory");
        Self {
            memories,
            continue_label,
            index: 0,
            prev_button: HitRegion::default(),
            next_button: HitRegion::default(),
            continue_button: HitRegion::default(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn next_photo(&mut self) {
        self.index = (self.index + 1) % self.memories.len();
    }

    pub fn prev_photo(&mut self) {
        self.index = (self.index + self.memories.len() - 1) % self.memories.len();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> StageSignal {
        match key.code {
            KeyCode::Right | KeyCode::Char('l') => self.next_photo(),
            KeyCode::Left | KeyCode::Char('h') => self.prev_photo(),
            KeyCode::Enter => return StageSignal::Advance,
            _ => {}
        }
        StageSignal::Stay
    }

    pub fn handle_click(&mut self, column: u16, row: u16) -> StageSignal {
        if self.continue_button.contains(column, row) {
            return StageSignal::Advance;
        }
        if self.next_button.contains(column, row) {
            self.next_photo();
        } else if self.prev_button.contains(column, row) {
            self.prev_photo();
        }
        StageSignal::Stay
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let frame_width = area.width.saturating_sub(16).clamp(24, 72);
        let frame_height = area.height.saturating_sub(10).clamp(8, 18);
        let frame = components::centered_rect(
            Rect::new(area.x, area.y, area.width, area.height.saturating_sub(6)),
            frame_width,
            frame_height,
        );

        let memory = &self.memories[self.index];

        // The "photo": a frame around the opaque source reference.
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(theme.gold));
        let inner = block.inner(frame);
        f.render_widget(block, frame);

        let placeholder = Paragraph::new(vec![
            Line::from(""),
            Line::from("· · ♥ · ·"),
            Line::from(""),
            Line::from(memory.source.as_str()),
        ])
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.text_dim));
        f.render_widget(placeholder, inner);

        // Caption inside the bottom of the frame
        if inner.height > 1 {
            components::draw_centered_line(
                f,
                Rect::new(inner.x, inner.bottom() - 1, inner.width, 1),
                &format!("\"{}\"", memory.caption),
                Style::default()
                    .fg(theme.text)
                    .add_modifier(Modifier::ITALIC),
            );
        }

        // Navigation row: ‹ dots ›
        let nav_y = frame.bottom() + 1;
        if nav_y < area.bottom() {
            let prev = Rect::new(frame.x, nav_y, 3, 1);
            let next = Rect::new(frame.right().saturating_sub(3), nav_y, 3, 1);
            f.render_widget(
                Paragraph::new("‹").style(Style::default().fg(theme.text)),
                prev,
            );
            f.render_widget(
                Paragraph::new("›")
                    .alignment(Alignment::Right)
                    .style(Style::default().fg(theme.text)),
                next,
            );
            self.prev_button.set(prev);
            self.next_button.set(next);

            let dots: String = (0..self.memories.len())
                .map(|i| if i == self.index { "●" } else { "○" })
                .collect::<Vec<_>>()
                .join(" ");
            components::draw_centered_line(
                f,
                Rect::new(frame.x, nav_y, frame.width, 1),
                &dots,
                Style::default().fg(theme.rose),
            );
        }

        // Continue
        let label = self.continue_label.clone();
        let width = components::button_width(&label).min(area.width);
        let button_y = nav_y + 2;
        if button_y + 3 <= area.bottom() {
            let button = Rect::new(area.x + area.width.saturating_sub(width) / 2, button_y, width, 3);
            self.continue_button
                .set(components::draw_button(f, button, &label, theme, true));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Content;

    fn stage() -> GalleryStage {
        let content = Content::default();
        GalleryStage::new(content.gallery, content.gallery_continue_label)
    }

    #[test]
    fn test_navigation_wraps_both_ways() {
        let mut gallery = stage();
        assert_eq!(gallery.index(), 0);

        gallery.prev_photo();
        assert_eq!(gallery.index(), 3);

        gallery.next_photo();
        assert_eq!(gallery.index(), 0);

        for _ in 0..5 {
            gallery.next_photo();
        }
        assert_eq!(gallery.index(), 1);
    }

    #[test]
    fn test_continue_works_from_any_photo() {
        let mut gallery = stage();
        gallery.next_photo();
        gallery.next_photo();
        assert_eq!(
            gallery.handle_key(KeyEvent::from(KeyCode::Enter)),
            StageSignal::Advance
        );
    }

    #[test]
    fn test_arrow_keys_navigate() {
        let mut gallery = stage();
        assert_eq!(
            gallery.handle_key(KeyEvent::from(KeyCode::Right)),
            StageSignal::Stay
        );
        assert_eq!(gallery.index(), 1);
        gallery.handle_key(KeyEvent::from(KeyCode::Left));
        assert_eq!(gallery.index(), 0);
    }
}
