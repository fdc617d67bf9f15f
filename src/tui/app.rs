// Application state
//
// One `App` per session. It owns the sequencer, the active stage's state,
// and the ambient effects that outlive individual stages (petals, pointer
// trail). All mutation happens on the event loop thread.

use super::stages::{StageSignal, StageView};
use crate::config::Config;
use crate::content::Content;
use crate::engine::particles::{PetalDrift, PointerTrail};
use crate::sequencer::{Sequencer, Stage};
use crate::theme::Theme;
use chrono::Local;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

pub struct App {
    config: Config,
    content: Content,
    pub theme: Theme,
    sequencer: Sequencer,
    pub stage: StageView,
    pub petals: PetalDrift,
    pub trail: PointerTrail,
    pub pointer: Option<(u16, u16)>,
    pub should_quit: bool,
    rng: StdRng,
    /// Last known viewport size in cells, fed to the particle policies.
    bounds: (f32, f32),
}

impl App {
    pub fn new(config: Config, content: Content, now: Instant) -> Self {
        let theme = Theme::by_name(&config.theme);
        tracing::debug!(palette = %theme.name, "theme resolved");
        let stage = StageView::build(Stage::Gate, &config, &content, now);
        Self {
            config,
            content,
            theme,
            sequencer: Sequencer::new(),
            stage,
            petals: PetalDrift::new(),
            trail: PointerTrail::new(),
            pointer: None,
            should_quit: false,
            rng: StdRng::from_os_rng(),
            bounds: (80.0, 24.0),
        }
    }

    pub fn current_stage(&self) -> Stage {
        self.sequencer.current()
    }

    pub fn set_bounds(&mut self, width: u16, height: u16) {
        self.bounds = (width as f32, height as f32);
    }

    fn viewport_height(&self) -> u16 {
        self.bounds.1 as u16
    }

    /// One frame of time for everything that is alive.
    pub fn tick(&mut self, now: Instant) {
        // Petals run on every stage after the gate.
        if self.sequencer.current() != Stage::Gate && !self.petals.is_active() {
            self.petals.activate(now);
        }
        self.petals.tick(now, self.bounds, &mut self.rng);
        self.trail.tick(now);

        let signal = match &mut self.stage {
            StageView::Gate(gate) => gate.tick(now),
            StageView::Loading(loading) => loading.tick(now),
            StageView::Confession(confession) => confession.tick(now),
            StageView::Celebration(celebration) => {
                celebration.tick(now, Local::now(), self.bounds, &mut self.rng)
            }
            _ => StageSignal::Stay,
        };
        self.apply(signal, now);
    }

    fn apply(&mut self, signal: StageSignal, now: Instant) {
        if signal == StageSignal::Advance {
            self.advance(now);
        }
    }

    /// The one forward transition. Dropping the previous stage state is the
    /// teardown that retires all of its clocks with it.
    fn advance(&mut self, now: Instant) {
        self.sequencer.advance();
        self.stage = StageView::build(self.sequencer.current(), &self.config, &self.content, now);
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        // Global quit. 'q' stays free on the gate, which is a text field.
        let ctrl_c =
            key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
        let plain_q =
            key.code == KeyCode::Char('q') && !matches!(self.stage, StageView::Gate(_));
        if ctrl_c || plain_q {
            self.should_quit = true;
            return;
        }

        let viewport = self.viewport_height();
        let signal = match &mut self.stage {
            StageView::Gate(gate) => gate.handle_key(key, now),
            StageView::Intro(intro) => intro.handle_key(key),
            StageView::Loading(_) => StageSignal::Stay,
            StageView::Gallery(gallery) => gallery.handle_key(key),
            StageView::Timeline(timeline) => timeline.handle_key(key, viewport),
            StageView::Confession(confession) => confession.handle_key(key, now, &mut self.rng),
            StageView::Celebration(celebration) => celebration.handle_key(key, now),
        };
        self.apply(signal, now);
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        let (column, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.pointer = Some((column, row));
                self.trail.record(now, column as f32, row as f32);
                if let StageView::Confession(confession) = &mut self.stage {
                    confession.handle_move(column, row, now, &mut self.rng);
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let signal = match &mut self.stage {
                    StageView::Gate(gate) => gate.handle_click(column, row, now),
                    StageView::Intro(intro) => intro.handle_click(column, row),
                    StageView::Loading(_) => StageSignal::Stay,
                    StageView::Gallery(gallery) => gallery.handle_click(column, row),
                    StageView::Timeline(timeline) => timeline.handle_click(column, row),
                    StageView::Confession(confession) => {
                        confession.handle_click(column, row, now, &mut self.rng)
                    }
                    StageView::Celebration(celebration) => {
                        celebration.handle_click(column, row, now)
                    }
                };
                self.apply(signal, now);
            }
            MouseEventKind::ScrollDown => self.handle_scroll(2),
            MouseEventKind::ScrollUp => self.handle_scroll(-2),
            _ => {}
        }
    }

    fn handle_scroll(&mut self, delta: i16) {
        let viewport = self.viewport_height();
        match &mut self.stage {
            StageView::Timeline(timeline) => timeline.handle_scroll(delta, viewport),
            StageView::Celebration(celebration) => celebration.handle_scroll(delta),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn app() -> App {
        App::new(Config::default(), Content::default(), Instant::now())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn test_starts_on_the_gate_with_petals_off() {
        let mut app = app();
        app.tick(Instant::now());
        assert_eq!(app.current_stage(), Stage::Gate);
        assert!(!app.petals.is_active());
    }

    #[test]
    fn test_gate_unlock_advances_to_intro_and_starts_petals() {
        let mut app = app();
        let t0 = Instant::now();
        for c in "13112023".chars() {
            app.handle_key(key(KeyCode::Char(c)), t0);
        }
        app.handle_key(key(KeyCode::Enter), t0);
        assert_eq!(app.current_stage(), Stage::Gate);

        // The unlock sweep runs before the transition.
        app.tick(t0 + Duration::from_millis(2100));
        assert_eq!(app.current_stage(), Stage::Intro);

        app.tick(t0 + Duration::from_millis(2200));
        assert!(app.petals.is_active());
    }

    #[test]
    fn test_full_walkthrough_reaches_celebration() {
        let mut app = app();
        let t0 = Instant::now();

        // Gate
        for c in "1311".chars() {
            app.handle_key(key(KeyCode::Char(c)), t0);
        }
        app.handle_key(key(KeyCode::Enter), t0);
        let mut now = t0 + Duration::from_millis(2100);
        app.tick(now);
        assert_eq!(app.current_stage(), Stage::Intro);

        // Intro
        app.handle_key(key(KeyCode::Enter), now);
        assert_eq!(app.current_stage(), Stage::Loading);

        // Loading: 100 steps of 50 ms plus the hold.
        now += Duration::from_millis(5600);
        app.tick(now);
        assert_eq!(app.current_stage(), Stage::Gallery);

        // Gallery
        app.handle_key(key(KeyCode::Right), now);
        app.handle_key(key(KeyCode::Enter), now);
        assert_eq!(app.current_stage(), Stage::Timeline);

        // Timeline: reveal everything, then continue.
        if let StageView::Timeline(timeline) = &mut app.stage {
            timeline.reveal_visible(200);
        } else {
            panic!("expected timeline stage");
        }
        app.handle_key(key(KeyCode::Enter), now);
        assert_eq!(app.current_stage(), Stage::Confession);

        // Confession: let the lines finish, then say yes.
        for _ in 0..400 {
            now += Duration::from_millis(33);
            app.tick(now);
        }
        app.handle_key(key(KeyCode::Char('y')), now);
        assert_eq!(app.current_stage(), Stage::Celebration);

        // Terminal: nothing moves past celebration.
        app.handle_key(key(KeyCode::Enter), now);
        app.tick(now + Duration::from_secs(60));
        assert_eq!(app.current_stage(), Stage::Celebration);
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let mut app = app();
        let ev = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        app.handle_key(ev, Instant::now());
        assert!(app.should_quit);
    }

    #[test]
    fn test_plain_q_does_not_quit_on_the_gate() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('q')), Instant::now());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_pointer_moves_feed_the_trail() {
        let mut app = app();
        let t0 = Instant::now();
        let mouse = MouseEvent {
            kind: MouseEventKind::Moved,
            column: 12,
            row: 6,
            modifiers: KeyModifiers::NONE,
        };
        app.handle_mouse(mouse, t0);
        assert_eq!(app.pointer, Some((12, 6)));
        assert_eq!(app.trail.field().len(), 1);
    }
}
