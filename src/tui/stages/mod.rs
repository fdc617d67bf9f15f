// Stage components - one full-screen phase each
//
// Every stage owns its clocks as plain epochs inside its state value.
// Advancing the sequencer swaps in the next stage's state and drops this
// one, which is the teardown: no timer handle can survive its stage.
//
// A stage signals the app with `StageSignal::Advance` exactly when its own
// exit condition is met; it has no idea what comes next.

mod celebration;
mod confession;
mod gallery;
mod gate;
mod intro;
mod loading;
mod timeline;

pub use celebration::CelebrationStage;
pub use confession::ConfessionStage;
pub use gallery::GalleryStage;
pub use gate::GateStage;
pub use intro::IntroStage;
pub use loading::LoadingStage;
pub use timeline::TimelineStage;

use crate::config::Config;
use crate::content::Content;
use crate::sequencer::Stage;
use std::time::Instant;

/// What a stage wants the app to do after handling an event or a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageSignal {
    Stay,
    Advance,
}

/// The active stage's state. Exactly one variant is alive at a time.
pub enum StageView {
    Gate(GateStage),
    Intro(IntroStage),
    Loading(LoadingStage),
    Gallery(GalleryStage),
    Timeline(TimelineStage),
    Confession(ConfessionStage),
    Celebration(CelebrationStage),
}

impl StageView {
    /// Instantiate the state for `stage`, stamping `now` as its epoch.
    pub fn build(stage: Stage, config: &Config, content: &Content, now: Instant) -> Self {
        match stage {
            Stage::Gate => Self::Gate(GateStage::new(content.gate.clone(), config.met_on)),
            Stage::Intro => Self::Intro(IntroStage::new(content.intro.clone())),
            Stage::Loading => Self::Loading(LoadingStage::new(
                content.loading_messages.clone(),
                config.loader_step,
                now,
            )),
            Stage::Gallery => Self::Gallery(GalleryStage::new(
                content.gallery.clone(),
                content.gallery_continue_label.clone(),
            )),
            Stage::Timeline => Self::Timeline(TimelineStage::new(content.timeline.clone())),
            Stage::Confession => Self::Confession(ConfessionStage::new(
                content.confession.clone(),
                config.typewriter_tick,
                now,
            )),
            Stage::Celebration => Self::Celebration(CelebrationStage::new(
                content.celebration.clone(),
                config.countdown_month,
                config.countdown_day,
                config.burst_duration,
                now,
            )),
        }
    }
}
