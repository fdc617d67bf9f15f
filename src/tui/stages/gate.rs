// Gate stage - the passphrase entrance
//
// Free-text input unlocked by the secret date. Matching works on the
// digit-only projection of whatever was typed, against several spellings
// of the date, by substring containment — deliberately forgiving about
// separators, ordering and stray characters around an accepted code.

use super::StageSignal;
use crate::content::GateContent;
use crate::theme::Theme;
use crate::tui::components::{self, HitRegion};
use chrono::{Datelike, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::Paragraph,
    Frame,
};
use std::time::{Duration, Instant};

/// How long the mismatch shake stays visible.
const SHAKE_DURATION: Duration = Duration::from_millis(500);

/// Cinematic pause between a correct code and the actual transition.
const UNLOCK_SWEEP: Duration = Duration::from_secs(2);

pub struct GateStage {
    content: GateContent,
    codes: Vec<String>,
    input: String,
    shake_until: Option<Instant>,
    unlocking_since: Option<Instant>,
    submit_button: HitRegion,
}

/// Digit spellings of `date` the gate accepts: day-month and month-day
/// orderings at 8, 6 and 4 digits, deduplicated (a date like 11/11 spells
/// the same both ways).
pub fn accepted_codes(date: NaiveDate) -> Vec<String> {
    let (d, m) = (date.day(), date.month());
    let yyyy = date.year();
    let yy = yyyy.rem_euclid(100);
    let spellings = [
        format!("{d:02}{m:02}{yyyy:04}"),
        format!("{m:02}{d:02}{yyyy:04}"),
        format!("{d:02}{m:02}{yy:02}"),
        format!("{m:02}{d:02}{yy:02}"),
        format!("{d:02}{m:02}"),
        format!("{m:02}{d:02}"),
    ];
    let mut codes = Vec::new();
    for s in spellings {
        if !codes.contains(&s) {
            codes.push(s);
        }
    }
    codes
}

/// True iff the digit-only projection of `input` contains any accepted code.
pub fn unlocks(input: &str, codes: &[String]) -> bool {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    codes.iter().any(|code| digits.contains(code.as_str()))
}

impl GateStage {
    pub fn new(content: GateContent, met_on: NaiveDate) -> Self {
        Self {
            content,
            codes: accepted_codes(met_on),
            input: String::new(),
            shake_until: None,
            unlocking_since: None,
            submit_button: HitRegion::default(),
        }
    }

    pub fn is_shaking(&self, now: Instant) -> bool {
        self.shake_until.is_some_and(|until| now < until)
    }

    pub fn is_unlocking(&self) -> bool {
        self.unlocking_since.is_some()
    }

    /// Check the typed input against the accepted codes.
    pub fn submit(&mut self, now: Instant) {
        if self.unlocking_since.is_some() {
            return;
        }
        if unlocks(&self.input, &self.codes) {
            tracing::info!("gate unlocked");
            self.unlocking_since = Some(now);
        } else {
            tracing::debug!(len = self.input.len(), "gate mismatch");
            self.shake_until = Some(now + SHAKE_DURATION);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> StageSignal {
        if self.unlocking_since.is_some() {
            return StageSignal::Stay;
        }
        match key.code {
            KeyCode::Char(c) => self.input.push(c),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Enter => self.submit(now),
            _ => {}
        }
        StageSignal::Stay
    }

    pub fn handle_click(&mut self, column: u16, row: u16, now: Instant) -> StageSignal {
        if self.submit_button.contains(column, row) {
            self.submit(now);
        }
        StageSignal::Stay
    }

    pub fn tick(&mut self, now: Instant) -> StageSignal {
        match self.unlocking_since {
            Some(since) if now.saturating_duration_since(since) >= UNLOCK_SWEEP => {
                StageSignal::Advance
            }
            _ => StageSignal::Stay,
        }
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, theme: &Theme, now: Instant) {
        if let Some(since) = self.unlocking_since {
            self.render_sweep(f, area, theme, now, since);
            return;
        }

        let center = components::centered_rect(area, area.width.min(64), 9);

        // Greeting
        components::draw_centered_line(
            f,
            Rect::new(center.x, center.y, center.width, 1),
            &self.content.greeting,
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::ITALIC),
        );

        // Input line, nudged sideways while shaking
        let shake_offset = match self.shake_until {
            // Alternate one cell left/right a few times a second.
            Some(until) if now < until => {
                let remaining = until.saturating_duration_since(now);
                (remaining.subsec_millis() / 60 % 2) as u16
            }
            _ => 0,
        };
        let input_rect = Rect::new(
            center.x + shake_offset,
            center.y + 3,
            center.width.saturating_sub(shake_offset),
            1,
        );
        let shown = if self.input.is_empty() {
            Paragraph::new(self.content.placeholder.as_str())
                .style(Style::default().fg(theme.text_dim).add_modifier(Modifier::ITALIC))
        } else {
            Paragraph::new(format!("{}▏", self.input)).style(Style::default().fg(theme.text))
        };
        f.render_widget(shown.alignment(Alignment::Center), input_rect);

        // Underline
        let rule = "─".repeat(center.width as usize);
        let rule_color = if self.is_shaking(now) {
            theme.rose_deep
        } else {
            theme.border
        };
        components::draw_centered_line(
            f,
            Rect::new(center.x + shake_offset, center.y + 4, input_rect.width, 1),
            &rule,
            Style::default().fg(rule_color),
        );

        // Submit
        let label = &self.content.submit_label;
        let width = components::button_width(label).min(center.width);
        let button = Rect::new(
            center.x + center.width.saturating_sub(width) / 2,
            center.y + 6,
            width,
            3,
        );
        self.submit_button
            .set(components::draw_button(f, button, label, theme, false));
    }

    /// The unlock glow: a band of light crossing the screen over the sweep
    /// duration.
    fn render_sweep(&self, f: &mut Frame, area: Rect, theme: &Theme, now: Instant, since: Instant) {
        let progress = (now.saturating_duration_since(since).as_secs_f32()
            / UNLOCK_SWEEP.as_secs_f32())
        .clamp(0.0, 1.0);
        let band_width = (area.width / 3).max(1);
        let sweep_span = area.width + band_width;
        let band_x = (progress * sweep_span as f32) as i32 - band_width as i32;

        let buf = f.buffer_mut();
        for dx in 0..band_width as i32 {
            let x = band_x + dx;
            if x < area.left() as i32 || x >= area.right() as i32 {
                continue;
            }
            for y in area.top()..area.bottom() {
                if let Some(cell) = buf.cell_mut((x as u16, y)) {
                    cell.set_char('░');
                    cell.set_style(Style::default().fg(theme.rose));
                }
            }
        }
    }
}
