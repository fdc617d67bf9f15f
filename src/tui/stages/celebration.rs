// Celebration stage - the grand finale, and the end of the line
//
// A heart burst on entry, floating hearts and sparkles behind the main
// content, a live countdown to the next reunion date, and a set of
// overlays: the letter, two video placeholders, and a quiet note tucked
// into the corner. This stage never advances.

use super::StageSignal;
use crate::content::{CelebrationContent, VideoRef};
use crate::engine::countdown::{self, CountdownSnapshot};
use crate::engine::particles::{Easing, HeartBurst, ParticleField, ParticleParams};
use crate::theme::Theme;
use crate::tui::components::{self, HitRegion};
use crate::tui::effects;
use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};
use rand::Rng;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Paragraph, Wrap},
    Frame,
};
use std::time::{Duration, Instant};

/// Main content fades in once the opening burst has had its moment.
const MAIN_CONTENT_DELAY: Duration = Duration::from_secs(2);

/// The "our video" overlay presents itself once, uninvited.
const VIDEO_AUTO_DELAY: Duration = Duration::from_millis(4500);

/// Floating hearts respawn in waves.
const HEART_WAVE_EVERY: Duration = Duration::from_secs(4);
const HEART_WAVE_SIZE: usize = 20;
const HEART_CAP: usize = 40;

/// Sparkles drip in for a few seconds after the main content shows.
const SPARKLE_EVERY: Duration = Duration::from_millis(300);
const SPARKLE_RUN: Duration = Duration::from_secs(5);
const SPARKLE_CAP: usize = 16;

/// The corner note waits politely before appearing.
const MISS_ME_DELAY: Duration = Duration::from_secs(5);

/// Countdown display refresh.
const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Overlay {
    Letter,
    Video,
    Gift,
    MissMe,
}

pub struct CelebrationStage {
    content: CelebrationContent,
    countdown_month: u32,
    countdown_day: u32,
    entered_at: Instant,

    burst: HeartBurst,
    burst_duration: Duration,
    burst_fired: bool,

    hearts: ParticleField,
    next_heart_wave: Option<Instant>,

    sparkles: ParticleField,
    next_sparkle: Option<Instant>,

    countdown: CountdownSnapshot,
    countdown_refreshed: Option<Instant>,

    overlay: Option<Overlay>,
    video_auto_opened: bool,
    letter_scroll: u16,

    letter_button: HitRegion,
    video_button: HitRegion,
    gift_button: HitRegion,
    miss_me_button: HitRegion,
}

impl CelebrationStage {
    pub fn new(
        content: CelebrationContent,
        countdown_month: u32,
        countdown_day: u32,
        burst_duration: Duration,
        now: Instant,
    ) -> Self {
        assert!(!burst_duration.is_zero(), "burst duration must be nonzero");
        Self {
            content,
            countdown_month,
            countdown_day,
            entered_at: now,
            burst: HeartBurst::new(),
            burst_duration,
            burst_fired: false,
            hearts: ParticleField::new(HEART_CAP, Easing::Linear),
            next_heart_wave: None,
            sparkles: ParticleField::new(SPARKLE_CAP, Easing::Linear),
            next_sparkle: None,
            countdown: CountdownSnapshot::ZERO,
            countdown_refreshed: None,
            overlay: None,
            video_auto_opened: false,
            letter_scroll: 0,
            letter_button: HitRegion::default(),
            video_button: HitRegion::default(),
            gift_button: HitRegion::default(),
            miss_me_button: HitRegion::default(),
        }
    }

    fn main_shown(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.entered_at) >= MAIN_CONTENT_DELAY
    }

    pub fn burst(&self) -> &HeartBurst {
        &self.burst
    }

    pub fn countdown(&self) -> CountdownSnapshot {
        self.countdown
    }

    pub fn tick(
        &mut self,
        now: Instant,
        wall: DateTime<Local>,
        bounds: (f32, f32),
        rng: &mut impl Rng,
    ) -> StageSignal {
        if !self.burst_fired {
            self.burst_fired = true;
            self.burst.trigger(now, self.burst_duration);
            tracing::info!(duration_ms = self.burst_duration.as_millis() as u64, "celebration burst");
        }
        self.burst
            .tick(now, (bounds.0 / 2.0, bounds.1 / 2.0), rng);

        if self.main_shown(now) {
            self.tick_hearts(now, bounds, rng);
            self.tick_sparkles(now, bounds, rng);

            // The video overlay invites itself exactly once.
            if !self.video_auto_opened
                && self.overlay.is_none()
                && now.saturating_duration_since(self.entered_at) >= VIDEO_AUTO_DELAY
            {
                self.video_auto_opened = true;
                self.overlay = Some(Overlay::Video);
            }
        }

        let refresh_due = self
            .countdown_refreshed
            .is_none_or(|last| now.saturating_duration_since(last) >= COUNTDOWN_TICK);
        if refresh_due {
            self.countdown = countdown::compute_remaining(&wall, self.countdown_month, self.countdown_day);
            self.countdown_refreshed = Some(now);
        }

        StageSignal::Stay
    }

    fn tick_hearts(&mut self, now: Instant, (width, height): (f32, f32), rng: &mut impl Rng) {
        self.hearts.retire_expired(now);
        let due = match self.next_heart_wave {
            Some(at) => now >= at,
            None => true,
        };
        if due {
            for _ in 0..HEART_WAVE_SIZE {
                let x = rng.random_range(0.0..width.max(1.0));
                // Staggered entry depths so a wave doesn't rise as one row.
                let depth = rng.random_range(2.0..10.0);
                self.hearts.spawn(
                    ParticleParams {
                        origin: (x, height + depth),
                        drift: (0.0, -(height + depth + 2.0)),
                        size: 1.0,
                        rotation: 0.0,
                        spin: 0.0,
                        glyph: '♡',
                        lifetime: Duration::from_secs_f32(rng.random_range(4.0..6.0)),
                    },
                    now,
                );
            }
            self.next_heart_wave = Some(now + HEART_WAVE_EVERY);
        }
    }

    fn tick_sparkles(&mut self, now: Instant, (width, height): (f32, f32), rng: &mut impl Rng) {
        self.sparkles.retire_expired(now);
        let shown_for = now.saturating_duration_since(self.entered_at + MAIN_CONTENT_DELAY);
        if shown_for > SPARKLE_RUN {
            return;
        }
        let due = match self.next_sparkle {
            Some(at) => now >= at,
            None => true,
        };
        if due {
            self.sparkles.spawn(
                ParticleParams {
                    origin: (
                        rng.random_range(0.0..width.max(1.0)),
                        rng.random_range(0.0..height.max(1.0)),
                    ),
                    drift: (0.0, 0.0),
                    size: 1.0,
                    rotation: 0.0,
                    spin: 0.0,
                    glyph: '✦',
                    lifetime: Duration::from_secs(1),
                },
                now,
            );
            self.next_sparkle = Some(now + SPARKLE_EVERY);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> StageSignal {
        if self.overlay.is_some() {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => self.overlay = None,
                KeyCode::Down | KeyCode::Char('j') => {
                    if self.overlay == Some(Overlay::Letter) {
                        self.letter_scroll = self.letter_scroll.saturating_add(1);
                    }
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    if self.overlay == Some(Overlay::Letter) {
                        self.letter_scroll = self.letter_scroll.saturating_sub(1);
                    }
                }
                _ => {}
            }
            return StageSignal::Stay;
        }
        if !self.main_shown(now) {
            return StageSignal::Stay;
        }
        match key.code {
            KeyCode::Char('l') => self.open(Overlay::Letter),
            KeyCode::Char('v') => self.open(Overlay::Video),
            KeyCode::Char('g') => self.open(Overlay::Gift),
            KeyCode::Char('m') => self.open(Overlay::MissMe),
            _ => {}
        }
        StageSignal::Stay
    }

    pub fn handle_click(&mut self, column: u16, row: u16, now: Instant) -> StageSignal {
        if self.overlay.is_some() {
            self.overlay = None;
            return StageSignal::Stay;
        }
        if !self.main_shown(now) {
            return StageSignal::Stay;
        }
        if self.letter_button.contains(column, row) {
            self.open(Overlay::Letter);
        } else if self.video_button.contains(column, row) {
            self.open(Overlay::Video);
        } else if self.gift_button.contains(column, row) {
            self.open(Overlay::Gift);
        } else if self.miss_me_button.contains(column, row) {
            self.open(Overlay::MissMe);
        }
        StageSignal::Stay
    }

    pub fn handle_scroll(&mut self, delta: i16) {
        if self.overlay == Some(Overlay::Letter) {
            self.letter_scroll = self.letter_scroll.saturating_add_signed(delta);
        }
    }

    fn open(&mut self, overlay: Overlay) {
        self.letter_scroll = 0;
        self.overlay = Some(overlay);
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, theme: &Theme, now: Instant) {
        // Background effects, oldest layer first.
        effects::render_field(f, area, self.hearts_field(), now, theme.heart);
        effects::render_field(f, area, self.sparkles_field(), now, theme.sparkle);
        effects::render_field(f, area, self.burst.field(), now, theme.rose);

        if self.main_shown(now) {
            self.render_main(f, area, theme, now);
        }

        match self.overlay {
            Some(Overlay::Letter) => self.render_letter(f, area, theme),
            Some(Overlay::Video) => {
                let video = self.content.video.clone();
                self.render_video(f, area, theme, &video);
            }
            Some(Overlay::Gift) => {
                let gift = self.content.gift_video.clone();
                self.render_video(f, area, theme, &gift);
            }
            Some(Overlay::MissMe) => self.render_miss_me(f, area, theme),
            None => {}
        }
    }

    fn hearts_field(&self) -> &ParticleField {
        &self.hearts
    }

    fn sparkles_field(&self) -> &ParticleField {
        &self.sparkles
    }

    fn render_main(&mut self, f: &mut Frame, area: Rect, theme: &Theme, now: Instant) {
        let center = components::centered_rect(area, area.width.min(68), 16);

        components::draw_centered_line(
            f,
            Rect::new(center.x, center.y, center.width, 1),
            &self.content.headline,
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        );

        components::draw_centered_line(
            f,
            Rect::new(center.x, center.y + 3, center.width, 1),
            &self.content.countdown_caption,
            Style::default()
                .fg(theme.text_dim)
                .add_modifier(Modifier::ITALIC),
        );

        // Countdown cells: dd : hh : mm : ss with labels beneath.
        let snapshot = self.countdown;
        let cells = [
            (snapshot.days, "days"),
            (snapshot.hours, "hours"),
            (snapshot.minutes, "mins"),
            (snapshot.seconds, "secs"),
        ];
        let cell_width = 9u16;
        let total = cell_width * 4 + 3 * 2;
        let mut x = center.x + (center.width.saturating_sub(total)) / 2;
        for (value, label) in cells {
            let rect = Rect::new(x, center.y + 5, cell_width, 2);
            if rect.right() > area.right() {
                break;
            }
            let digits = Paragraph::new(vec![
                Line::from(format!("{value:02}")),
                Line::from(label),
            ])
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.gold));
            f.render_widget(digits, rect);
            x += cell_width + 2;
        }

        // Button row.
        let labels = [
            self.content.letter_label.clone(),
            self.content.video_label.clone(),
            self.content.gift_label.clone(),
        ];
        let widths: Vec<u16> = labels.iter().map(|l| components::button_width(l)).collect();
        let row_width: u16 = widths.iter().sum::<u16>() + 4;
        let mut x = center.x + (center.width.saturating_sub(row_width)) / 2;
        let y = center.y + 9;
        let regions = [
            &mut self.letter_button,
            &mut self.video_button,
            &mut self.gift_button,
        ];
        for ((label, width), region) in labels.iter().zip(widths).zip(regions) {
            let rect = Rect::new(x, y, width, 3);
            if rect.right() > area.right() {
                break;
            }
            region.set(components::draw_button(f, rect, label, theme, true));
            x += width + 2;
        }

        // The quiet corner note.
        if now.saturating_duration_since(self.entered_at) >= MISS_ME_DELAY {
            let label = &self.content.miss_me_label;
            let width = (label.chars().count() as u16).min(area.width);
            let rect = Rect::new(
                area.right().saturating_sub(width + 2),
                area.bottom().saturating_sub(2),
                width,
                1,
            );
            f.render_widget(
                Paragraph::new(label.as_str())
                    .style(Style::default().fg(theme.text_dim).add_modifier(Modifier::DIM)),
                rect,
            );
            self.miss_me_button.set(rect);
        }
    }

    fn render_letter(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let inner = components::draw_overlay(
            f,
            area,
            area.width.saturating_sub(8).min(66),
            area.height.saturating_sub(4),
            theme,
        );
        let letter = Paragraph::new(self.content.letter.as_str())
            .style(Style::default().fg(theme.text))
            .wrap(Wrap { trim: false })
            .scroll((self.letter_scroll, 0));
        f.render_widget(letter, inner);

        components::draw_centered_line(
            f,
            Rect::new(inner.x, inner.bottom().saturating_sub(1), inner.width, 1),
            "↑/↓ scroll · esc close",
            Style::default().fg(theme.text_dim).add_modifier(Modifier::DIM),
        );
    }

    /// Video playback does not exist in a cell grid; the reference is shown
    /// as the placeholder presentation instead of failing anything.
    fn render_video(&mut self, f: &mut Frame, area: Rect, theme: &Theme, video: &VideoRef) {
        let inner = components::draw_overlay(f, area, area.width.saturating_sub(12).min(56), 9, theme);
        let body = Paragraph::new(vec![
            Line::from(""),
            Line::from(video.title.as_str()).style(
                Style::default().fg(theme.rose_deep).add_modifier(Modifier::BOLD),
            ),
            Line::from(""),
            Line::from(video.description.as_str()).style(Style::default().fg(theme.text_dim)),
            Line::from(""),
            Line::from(video.source.as_str()).style(
                Style::default().fg(theme.text_dim).add_modifier(Modifier::DIM),
            ),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        f.render_widget(body, inner);
    }

    fn render_miss_me(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let inner = components::draw_overlay(f, area, area.width.saturating_sub(12).min(52), 12, theme);
        let note = Paragraph::new(self.content.miss_me_note.as_str())
            .style(Style::default().fg(theme.text).add_modifier(Modifier::ITALIC))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(note, inner);
    }
}
