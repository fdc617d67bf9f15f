// TUI module - terminal lifecycle, event loop and frame composition
//
// This module manages the terminal using ratatui. It handles:
// - Terminal initialization and cleanup (raw mode, alternate screen, mouse)
// - The event loop (input events, frame ticks)
// - Composing each frame: active stage, then ambient effect layers

pub mod app;
pub mod components;
pub mod effects;
pub mod stages;

use crate::config::Config;
use crate::content::Content;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, style::Style, widgets::Block, Frame, Terminal};
use stages::StageView;
use std::io;
use std::time::{Duration, Instant};

/// Frame cadence: ~30 FPS keeps the particle motion smooth without
/// noticeable CPU cost.
const FRAME_TICK: Duration = Duration::from_millis(33);

/// Run the experience until the viewer quits (or forever, on the last
/// stage). Sets up the terminal, runs the event loop, and restores the
/// terminal whatever happens inside.
pub async fn run_tui(config: Config, content: Content) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(config, content, Instant::now());

    let result = run_event_loop(&mut terminal, &mut app).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Two things can wake it: terminal input (keys, mouse, resize) and the
/// frame tick. Every pass advances the app clock once and redraws.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let mut frame_tick = tokio::time::interval(FRAME_TICK);

    loop {
        terminal
            .draw(|f| draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard or mouse input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    let now = Instant::now();
                    match event::read() {
                        Ok(Event::Key(key_event)) => app.handle_key(key_event, now),
                        Ok(Event::Mouse(mouse_event)) => app.handle_mouse(mouse_event, now),
                        _ => {}
                    }
                }
            } => {}

            // Frame tick: advance stage clocks and particle fields
            _ = frame_tick.tick() => {
                app.tick(Instant::now());
            }
        }

        if app.should_quit {
            tracing::info!("session ended by viewer");
            break;
        }
    }

    Ok(())
}

/// Compose one frame: background, the active stage, then the ambient
/// layers (petals, pointer trail, cursor) above it.
fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();
    app.set_bounds(area.width, area.height);
    let now = Instant::now();
    let theme = app.theme.clone();

    let background = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(background, area);

    match &mut app.stage {
        StageView::Gate(gate) => gate.render(f, area, &theme, now),
        StageView::Intro(intro) => intro.render(f, area, &theme),
        StageView::Loading(loading) => loading.render(f, area, &theme, now),
        StageView::Gallery(gallery) => gallery.render(f, area, &theme),
        StageView::Timeline(timeline) => timeline.render(f, area, &theme),
        StageView::Confession(confession) => confession.render(f, area, &theme, now),
        StageView::Celebration(celebration) => celebration.render(f, area, &theme, now),
    }

    effects::render_field(f, area, app.petals.field(), now, theme.petal);
    effects::render_field(f, area, app.trail.field(), now, theme.trail);
    effects::render_pointer(f, area, app.pointer, &theme);
}
