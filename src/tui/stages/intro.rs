// Intro stage - a breath before the journey starts
//
// Two lines of prose and a single continue control; nothing timed here
// beyond the render layer's own fades.

use super::StageSignal;
use crate::content::IntroContent;
use crate::theme::Theme;
use crate::tui::components::{self, HitRegion};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    Frame,
};

pub struct IntroStage {
    content: IntroContent,
    continue_button: HitRegion,
}

impl IntroStage {
    pub fn new(content: IntroContent) -> Self {
        Self {
            content,
            continue_button: HitRegion::default(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> StageSignal {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => StageSignal::Advance,
            _ => StageSignal::Stay,
        }
    }

    pub fn handle_click(&mut self, column: u16, row: u16) -> StageSignal {
        if self.continue_button.contains(column, row) {
            StageSignal::Advance
        } else {
            StageSignal::Stay
        }
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let center = components::centered_rect(area, area.width.min(56), 8);

        components::draw_centered_line(
            f,
            Rect::new(center.x, center.y, center.width, 1),
            &self.content.line_one,
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::ITALIC),
        );
        components::draw_centered_line(
            f,
            Rect::new(center.x, center.y + 1, center.width, 1),
            &self.content.line_two,
            Style::default()
                .fg(theme.text_dim)
                .add_modifier(Modifier::ITALIC),
        );

        let label = &self.content.continue_label;
        let width = components::button_width(label).min(center.width);
        let button = Rect::new(
            center.x + center.width.saturating_sub(width) / 2,
            center.y + 5,
            width,
            3,
        );
        self.continue_button
            .set(components::draw_button(f, button, label, theme, true));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_advances() {
        let mut intro = IntroStage::new(IntroContent::default());
        assert_eq!(
            intro.handle_key(KeyEvent::from(KeyCode::Enter)),
            StageSignal::Advance
        );
    }

    #[test]
    fn test_other_keys_do_nothing() {
        let mut intro = IntroStage::new(IntroContent::default());
        assert_eq!(
            intro.handle_key(KeyEvent::from(KeyCode::Char('x'))),
            StageSignal::Stay
        );
        assert_eq!(
            intro.handle_key(KeyEvent::from(KeyCode::Esc)),
            StageSignal::Stay
        );
    }

    #[test]
    fn test_click_outside_button_stays() {
        let mut intro = IntroStage::new(IntroContent::default());
        assert_eq!(intro.handle_click(0, 0), StageSignal::Stay);
    }
}
