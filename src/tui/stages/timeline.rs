// Timeline stage - the story so far, revealed by scrolling
//
// Entries become "revealed" the first time they scroll into the viewport,
// and stay revealed. The continue control arms only once every entry has
// been seen.

use super::StageSignal;
use crate::content::TimelineContent;
use crate::theme::Theme;
use crate::tui::components::{self, HitRegion};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

/// Rows of virtual canvas per entry card.
const ENTRY_HEIGHT: u16 = 4;

/// Virtual rows above the first entry (heading and spacing).
const HEADER_HEIGHT: u16 = 3;

pub struct TimelineStage {
    content: TimelineContent,
    scroll: u16,
    revealed: Vec<bool>,
    continue_button: HitRegion,
}

impl TimelineStage {
    pub fn new(content: TimelineContent) -> Self {
        let count = content.entries.len();
        assert!(count > 0, "timeline needs at least one entry");
        Self {
            content,
            scroll: 0,
            revealed: vec![false; count],
            continue_button: HitRegion::default(),
        }
    }

    fn canvas_height(&self) -> u16 {
        HEADER_HEIGHT + self.content.entries.len() as u16 * ENTRY_HEIGHT + 5
    }

    fn max_scroll(&self, viewport_height: u16) -> u16 {
        self.canvas_height().saturating_sub(viewport_height)
    }

    pub fn scroll_by(&mut self, delta: i16, viewport_height: u16) {
        let max = self.max_scroll(viewport_height);
        self.scroll = self.scroll.saturating_add_signed(delta).min(max);
    }

    /// Mark every entry intersecting the viewport as revealed. Called from
    /// render with the real viewport; tests call it directly.
    pub fn reveal_visible(&mut self, viewport_height: u16) {
        let top = self.scroll;
        let bottom = self.scroll + viewport_height;
        for (i, revealed) in self.revealed.iter_mut().enumerate() {
            let entry_top = HEADER_HEIGHT + i as u16 * ENTRY_HEIGHT;
            let entry_bottom = entry_top + ENTRY_HEIGHT;
            if entry_top < bottom && entry_bottom > top {
                *revealed = true;
            }
        }
    }

    pub fn all_revealed(&self) -> bool {
        self.revealed.iter().all(|&r| r)
    }

    pub fn handle_key(&mut self, key: KeyEvent, viewport_height: u16) -> StageSignal {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.scroll_by(2, viewport_height),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_by(-2, viewport_height),
            KeyCode::PageDown => self.scroll_by(viewport_height as i16, viewport_height),
            KeyCode::PageUp => self.scroll_by(-(viewport_height as i16), viewport_height),
            KeyCode::Enter => {
                if self.all_revealed() {
                    return StageSignal::Advance;
                }
            }
            _ => {}
        }
        StageSignal::Stay
    }

    pub fn handle_click(&mut self, column: u16, row: u16) -> StageSignal {
        if self.all_revealed() && self.continue_button.contains(column, row) {
            StageSignal::Advance
        } else {
            StageSignal::Stay
        }
    }

    pub fn handle_scroll(&mut self, delta: i16, viewport_height: u16) {
        self.scroll_by(delta, viewport_height);
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        self.reveal_visible(area.height);

        let column = components::centered_rect(
            Rect::new(area.x, area.y, area.width, area.height),
            area.width.min(64),
            area.height,
        );

        // Map virtual canvas rows onto the viewport.
        let scroll = self.scroll;
        let row_on_screen = move |virtual_row: u16| -> Option<u16> {
            virtual_row
                .checked_sub(scroll)
                .filter(|&y| y < area.height)
                .map(|y| area.y + y)
        };

        if let Some(y) = row_on_screen(0) {
            components::draw_centered_line(
                f,
                Rect::new(column.x, y, column.width, 1),
                &self.content.heading,
                Style::default()
                    .fg(theme.text)
                    .add_modifier(Modifier::ITALIC | Modifier::BOLD),
            );
        }

        for (i, entry) in self.content.entries.iter().enumerate() {
            let entry_top = HEADER_HEIGHT + i as u16 * ENTRY_HEIGHT;
            if !self.revealed[i] {
                continue;
            }
            // Cards alternate sides around a center spine.
            let half = column.width / 2;
            let card_x = if i % 2 == 0 {
                column.x
            } else {
                column.x + column.width - half
            };

            if let Some(y) = row_on_screen(entry_top) {
                let title = Paragraph::new(Line::from(entry.title.as_str()))
                    .alignment(if i % 2 == 0 {
                        Alignment::Right
                    } else {
                        Alignment::Left
                    })
                    .style(Style::default().fg(theme.rose).add_modifier(Modifier::BOLD));
                f.render_widget(title, Rect::new(card_x, y, half, 1));

                // Spine dot
                components::draw_centered_line(
                    f,
                    Rect::new(column.x, y, column.width, 1),
                    "•",
                    Style::default().fg(theme.rose_deep),
                );
            }
            if let Some(y) = row_on_screen(entry_top + 1) {
                let description = Paragraph::new(Line::from(entry.description.as_str()))
                    .alignment(if i % 2 == 0 {
                        Alignment::Right
                    } else {
                        Alignment::Left
                    })
                    .style(Style::default().fg(theme.text_dim));
                f.render_widget(description, Rect::new(card_x, y, half, 1));
            }
        }

        // Continue control at the bottom of the canvas.
        let label = self.content.continue_label.clone();
        let width = components::button_width(&label).min(column.width);
        let button_top = HEADER_HEIGHT + self.content.entries.len() as u16 * ENTRY_HEIGHT + 1;
        if let Some(y) = row_on_screen(button_top) {
            if y + 3 <= area.bottom() {
                let button = Rect::new(
                    column.x + (column.width - width) / 2,
                    y,
                    width,
                    3,
                );
                self.continue_button.set(components::draw_button(
                    f,
                    button,
                    &label,
                    theme,
                    self.all_revealed(),
                ));
            }
        }

        // Scroll hint while entries remain hidden below.
        if !self.all_revealed() {
            components::draw_centered_line(
                f,
                Rect::new(area.x, area.bottom().saturating_sub(1), area.width, 1),
                "↓ scroll",
                Style::default().fg(theme.text_dim),
            );
        }
    }
}
