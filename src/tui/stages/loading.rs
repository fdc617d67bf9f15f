// Loading stage - a manufactured pause before the gallery
//
// The progress value is pure theater: one point per fixed step, no real
// work behind it. Completion hands over automatically after a short hold
// at 100%.

use super::StageSignal;
use crate::theme::Theme;
use crate::tui::components;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::Gauge,
    Frame,
};
use std::time::{Duration, Instant};

/// How long the full bar lingers before moving on.
const COMPLETE_HOLD: Duration = Duration::from_millis(500);

/// Status line rotation cadence.
const MESSAGE_CYCLE: Duration = Duration::from_secs(1);

pub struct LoadingStage {
    messages: Vec<String>,
    step: Duration,
    started_at: Instant,
}

impl LoadingStage {
    pub fn new(messages: Vec<String>, step: Duration, now: Instant) -> Self {
        assert!(!step.is_zero(), "loader step must be nonzero");
        assert!(!messages.is_empty(), "loader needs at least one message");
        Self {
            messages,
            step,
            started_at: now,
        }
    }

    /// Progress in [0, 100], one point per elapsed step.
    pub fn progress(&self, now: Instant) -> u16 {
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_micros() / self.step.as_micros()).min(100) as u16
    }

    /// Which status message is showing at `now`.
    pub fn message(&self, now: Instant) -> &str {
        let elapsed = now.saturating_duration_since(self.started_at);
        let index = (elapsed.as_millis() / MESSAGE_CYCLE.as_millis()) as usize;
        &self.messages[index % self.messages.len()]
    }

    pub fn tick(&mut self, now: Instant) -> StageSignal {
        let full_at = self.started_at + self.step * 100;
        if self.progress(now) == 100 && now.saturating_duration_since(full_at) >= COMPLETE_HOLD {
            StageSignal::Advance
        } else {
            StageSignal::Stay
        }
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, theme: &Theme, now: Instant) {
        let center = components::centered_rect(area, area.width.min(48), 6);

        components::draw_centered_line(
            f,
            Rect::new(center.x, center.y, center.width, 1),
            self.message(now),
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::ITALIC),
        );

        let progress = self.progress(now);
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(theme.rose).bg(theme.surface))
            .ratio(progress as f64 / 100.0)
            .label(format!("{progress}%"));
        f.render_widget(gauge, Rect::new(center.x, center.y + 3, center.width, 1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(now: Instant) -> LoadingStage {
        LoadingStage::new(
            vec!["one…".into(), "two…".into(), "three…".into()],
            Duration::from_millis(50),
            now,
        )
    }

    #[test]
    fn test_progress_counts_steps() {
        let t0 = Instant::now();
        let loader = stage(t0);
        assert_eq!(loader.progress(t0), 0);
        assert_eq!(loader.progress(t0 + Duration::from_millis(49)), 0);
        assert_eq!(loader.progress(t0 + Duration::from_millis(50)), 1);
        assert_eq!(loader.progress(t0 + Duration::from_millis(2500)), 50);
    }

    #[test]
    fn test_progress_reaches_100_in_exactly_100_steps_and_caps() {
        let t0 = Instant::now();
        let loader = stage(t0);
        assert_eq!(loader.progress(t0 + Duration::from_millis(4999)), 99);
        assert_eq!(loader.progress(t0 + Duration::from_millis(5000)), 100);
        assert_eq!(loader.progress(t0 + Duration::from_secs(60)), 100);
    }

    #[test]
    fn test_advances_only_after_hold() {
        let t0 = Instant::now();
        let mut loader = stage(t0);
        assert_eq!(loader.tick(t0 + Duration::from_millis(5000)), StageSignal::Stay);
        assert_eq!(loader.tick(t0 + Duration::from_millis(5499)), StageSignal::Stay);
        assert_eq!(
            loader.tick(t0 + Duration::from_millis(5500)),
            StageSignal::Advance
        );
    }

    #[test]
    fn test_messages_cycle_every_second() {
        let t0 = Instant::now();
        let loader = stage(t0);
        assert_eq!(loader.message(t0), "one…");
        assert_eq!(loader.message(t0 + Duration::from_millis(1000)), "two…");
        assert_eq!(loader.message(t0 + Duration::from_millis(2500)), "three…");
        assert_eq!(loader.message(t0 + Duration::from_millis(3100)), "one…");
    }

    #[test]
    #[should_panic(expected = "nonzero")]
    fn test_zero_step_is_a_construction_error() {
        let _ = LoadingStage::new(vec!["x".into()], Duration::ZERO, Instant::now());
    }
}
