// Confession stage - the question
//
// Two chained typewriter lines, then the question with two controls: an
// affirmative one that always works and grows with persistence, and an
// evasive one that relocates away from the pointer and never activates.

use super::StageSignal;
use crate::content::ConfessionContent;
use crate::engine::evasive::EvasiveTarget;
use crate::engine::typewriter::{Typewriter, TypewriterChain};
use crate::theme::Theme;
use crate::tui::components::{self, HitRegion};
use crossterm::event::{KeyCode, KeyEvent};
use rand::Rng;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    Frame,
};
use std::time::{Duration, Instant};

/// Lead-in before the first line starts typing.
const FIRST_LINE_DELAY: Duration = Duration::from_millis(500);

/// Gap between the first line finishing and the second starting.
const SECOND_LINE_DELAY: Duration = Duration::from_millis(1500);

/// Pause between the second line finishing and the question appearing.
const QUESTION_DELAY: Duration = Duration::from_secs(2);

/// Proximity events closer together than this are the same approach, not a
/// new one; the region only relocates once per settled frame.
const EVADE_DEBOUNCE: Duration = Duration::from_millis(150);

/// Escape hop sizing in cells.
const ESCAPE_BASE: f32 = 12.0;
const ESCAPE_GROWTH: f32 = 4.0;

pub struct ConfessionStage {
    content: ConfessionContent,
    entered_at: Instant,
    chain: TypewriterChain,
    lines_done_at: Option<Instant>,
    evasive: EvasiveTarget,
    last_evade: Option<Instant>,
    yes_button: HitRegion,
    no_button: HitRegion,
}

impl ConfessionStage {
    pub fn new(content: ConfessionContent, tick: Duration, now: Instant) -> Self {
        let first = Typewriter::new(content.line_one.clone(), tick, FIRST_LINE_DELAY);
        let second = Typewriter::new(content.line_two.clone(), tick, SECOND_LINE_DELAY);
        let mut chain = TypewriterChain::new(vec![first, second]);
        chain.start(now);
        Self {
            content,
            entered_at: now,
            chain,
            lines_done_at: None,
            evasive: EvasiveTarget::new(ESCAPE_BASE, ESCAPE_GROWTH),
            last_evade: None,
            yes_button: HitRegion::default(),
            no_button: HitRegion::default(),
        }
    }

    pub fn question_shown(&self, now: Instant) -> bool {
        self.lines_done_at
            .is_some_and(|done| now.saturating_duration_since(done) >= QUESTION_DELAY)
    }

    pub fn evasive(&self) -> &EvasiveTarget {
        &self.evasive
    }

    /// A proximity event on the negative control: dodge, debounced so one
    /// physical approach does not count several times before the next frame
    /// repositions the region.
    fn dodge(&mut self, now: Instant, rng: &mut impl Rng) {
        if self
            .last_evade
            .is_some_and(|last| now.saturating_duration_since(last) < EVADE_DEBOUNCE)
        {
            return;
        }
        self.last_evade = Some(now);
        self.evasive.evade(rng);
        tracing::debug!(attempts = self.evasive.attempts(), "evasive dodge");
    }

    pub fn tick(&mut self, now: Instant) -> StageSignal {
        self.chain.tick(now);
        if self.lines_done_at.is_none() && self.chain.is_complete(now) {
            self.lines_done_at = Some(now);
        }
        StageSignal::Stay
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant, rng: &mut impl Rng) -> StageSignal {
        if !self.question_shown(now) {
            return StageSignal::Stay;
        }
        match key.code {
            KeyCode::Enter | KeyCode::Char('y') => StageSignal::Advance,
            // Trying to refuse by keyboard counts as an approach too.
            KeyCode::Char('n') => {
                self.dodge(now, rng);
                StageSignal::Stay
            }
            _ => StageSignal::Stay,
        }
    }

    pub fn handle_move(&mut self, column: u16, row: u16, now: Instant, rng: &mut impl Rng) {
        if self.question_shown(now) && self.no_button.contains(column, row) {
            self.dodge(now, rng);
        }
    }

    pub fn handle_click(
        &mut self,
        column: u16,
        row: u16,
        now: Instant,
        rng: &mut impl Rng,
    ) -> StageSignal {
        if !self.question_shown(now) {
            return StageSignal::Stay;
        }
        if self.yes_button.contains(column, row) {
            return StageSignal::Advance;
        }
        if self.no_button.contains(column, row) {
            // A click that lands is still only a proximity event.
            self.dodge(now, rng);
        }
        StageSignal::Stay
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, theme: &Theme, now: Instant) {
        let center = components::centered_rect(area, area.width.min(64), 14);
        let caret_on =
            now.saturating_duration_since(self.entered_at).subsec_millis() < 500;

        let line_style = Style::default()
            .fg(theme.text)
            .add_modifier(Modifier::ITALIC);

        let first = self.chain.line(0);
        let mut text = first.revealed(now).to_string();
        if first.is_armed() && !first.is_complete(now) && caret_on {
            text.push('▏');
        }
        components::draw_centered_line(f, Rect::new(center.x, center.y, center.width, 1), &text, line_style);

        let second = self.chain.line(1);
        if second.is_armed() {
            let mut text = second.revealed(now).to_string();
            if !second.is_complete(now) && caret_on {
                text.push('▏');
            }
            components::draw_centered_line(
                f,
                Rect::new(center.x, center.y + 2, center.width, 1),
                &text,
                line_style,
            );
        }

        if !self.question_shown(now) {
            return;
        }

        components::draw_centered_line(
            f,
            Rect::new(center.x, center.y + 5, center.width, 1),
            &self.content.question,
            Style::default()
                .fg(theme.rose_deep)
                .add_modifier(Modifier::BOLD),
        );

        // Affirmative control, widened by its persistence scale.
        let scale = self.evasive.companion_scale();
        let yes_label = self.content.yes_label.clone();
        let yes_width =
            ((components::button_width(&yes_label) as f32 * scale) as u16).min(center.width / 2);
        let buttons_y = center.y + 8;
        let yes_x = (center.x + center.width / 4).saturating_sub(yes_width / 2);
        let yes_rect = Rect::new(yes_x, buttons_y, yes_width, 3);
        self.yes_button
            .set(components::draw_button(f, yes_rect, &yes_label, theme, true));

        // Evasive control at its resting slot plus the current offset,
        // clamped so it stays reachable-looking on screen. Terminal cells
        // are tall; vertical offsets are halved.
        let no_label = self.evasive.label().to_string();
        let no_width = components::button_width(&no_label).min(area.width);
        let (dx, dy) = self.evasive.offset();
        let rest_x = (center.x + 3 * center.width / 4) as i32 - no_width as i32 / 2;
        let rest_y = buttons_y as i32;
        // The rotation target can only be expressed here as a wobble.
        let wobble = (self.evasive.rotation() / 5.0) as i32 % 2;
        let max_x = area.right().saturating_sub(no_width).max(area.x) as i32;
        let max_y = area.bottom().saturating_sub(3).max(area.y) as i32;
        let x = (rest_x + dx as i32).clamp(area.x as i32, max_x) as u16;
        let y = (rest_y + (dy / 2.0) as i32 + wobble).clamp(area.y as i32, max_y) as u16;
        let no_rect = Rect::new(x, y, no_width, 3u16.min(area.height));
        self.no_button
            .set(components::draw_button(f, no_rect, &no_label, theme, false));
    }
}
