// Content pack - every string the experience shows
//
// Prose, captions and media references are data, not behavior: the stages
// treat them as opaque. Defaults are embedded so the binary runs with no
// files present; a TOML file can replace any section for personalization.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

/// A referenced photo: a caption and an opaque source path. The source is
/// never decoded; it is shown as a captioned placeholder frame.
#[derive(Debug, Clone, Deserialize)]
pub struct Memory {
    pub caption: String,
    pub source: String,
}

/// One relationship-timeline entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TimelineEntry {
    pub title: String,
    pub description: String,
}

/// A referenced video clip, presented as a placeholder panel.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoRef {
    pub title: String,
    pub description: String,
    pub source: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GateContent {
    pub greeting: String,
    pub placeholder: String,
    pub submit_label: String,
}

impl Default for GateContent {
    fn default() -> Self {
        Self {
            greeting: "everything in this whole wide world is for my pwincess.".into(),
            placeholder: "enter the date we met".into(),
            submit_label: "unlock".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IntroContent {
    pub line_one: String,
    pub line_two: String,
    pub continue_label: String,
}

impl Default for IntroContent {
    fn default() -> Self {
        Self {
            line_one: "before you enter…".into(),
            line_two: "answer honestly.".into(),
            continue_label: "continue".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimelineContent {
    pub heading: String,
    pub continue_label: String,
    pub entries: Vec<TimelineEntry>,
}

impl Default for TimelineContent {
    fn default() -> Self {
        Self {
            heading: "every moment that made us, us".into(),
            continue_label: "there's something i need to ask you".into(),
            entries: vec![
                TimelineEntry {
                    title: "the day we met".into(),
                    description: "everything changed without me knowing".into(),
                },
                TimelineEntry {
                    title: "our first laugh".into(),
                    description: "sitting opposite on the bench, and suddenly i couldn't stop blushing".into(),
                },
                TimelineEntry {
                    title: "when i caught feelings".into(),
                    description: "eyes brighter than the sun and that cascade of hair. i fell hard".into(),
                },
                TimelineEntry {
                    title: "the late night talks".into(),
                    description: "when we forgot it was 1 o'clock, then 2 o'clock".into(),
                },
                TimelineEntry {
                    title: "we had our fights too".into(),
                    description: "but we always made up and it made us stronger".into(),
                },
                TimelineEntry {
                    title: "every moment with you".into(),
                    description: "like having everything in life perfect at its peak".into(),
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConfessionContent {
    pub line_one: String,
    pub line_two: String,
    pub question: String,
    pub yes_label: String,
}

impl Default for ConfessionContent {
    fn default() -> Self {
        Self {
            line_one: "i don't know what the future looks like…".into(),
            line_two: "but i know one thing for certain…".into(),
            question: "will u be my valentine?".into(),
            yes_label: "yes ♥".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CelebrationContent {
    pub headline: String,
    pub countdown_caption: String,
    pub letter_label: String,
    pub video_label: String,
    pub gift_label: String,
    pub miss_me_label: String,
    pub letter: String,
    pub miss_me_note: String,
    pub video: VideoRef,
    pub gift_video: VideoRef,
}

impl Default for CelebrationContent {
    fn default() -> Self {
        Self {
            headline: "good. you're stuck with me now.".into(),
            countdown_caption: "counting the seconds until i see you again".into(),
            letter_label: "read my letter to you".into(),
            video_label: "watch our video".into(),
            gift_label: "your gift".into(),
            miss_me_label: "read this if you miss me.".into(),
            letter: DEFAULT_LETTER.trim_start().into(),
            miss_me_note: DEFAULT_MISS_ME.trim().into(),
            video: VideoRef {
                title: "add our video together".into(),
                description: "point [celebration.video] at a clip in content.toml".into(),
                source: "assets/video/our-video.mp4".into(),
            },
            gift_video: VideoRef {
                title: "add your gift video".into(),
                description: "point [celebration.gift_video] at a clip in content.toml".into(),
                source: "assets/video/gift.mp4".into(),
            },
        }
    }
}

/// The full content pack, one section per stage.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Content {
    pub gate: GateContent,
    pub intro: IntroContent,
    pub loading_messages: Vec<String>,
    pub gallery: Vec<Memory>,
    pub gallery_continue_label: String,
    pub timeline: TimelineContent,
    pub confession: ConfessionContent,
    pub celebration: CelebrationContent,
}

impl Default for Content {
    fn default() -> Self {
        Self {
            gate: GateContent::default(),
            intro: IntroContent::default(),
            loading_messages: vec![
                "loading our memories…".into(),
                "collecting stolen moments…".into(),
                "rewinding time…".into(),
                "finding the good parts…".into(),
                "almost there…".into(),
            ],
            gallery: vec![
                Memory {
                    caption: "our very first day together".into(),
                    source: "assets/images/first.png".into(),
                },
                Memory {
                    caption: "still my favorite smile".into(),
                    source: "assets/images/second.png".into(),
                },
                Memory {
                    caption: "us being lovey dovey".into(),
                    source: "assets/images/third.png".into(),
                },
                Memory {
                    caption: "OUR BEST DATE YET".into(),
                    source: "assets/images/fourth.png".into(),
                },
            ],
            gallery_continue_label: "one more thing →".into(),
            timeline: TimelineContent::default(),
            confession: ConfessionContent::default(),
            celebration: CelebrationContent::default(),
        }
    }
}

impl Content {
    /// Load a content pack from a TOML file. Sections that are absent keep
    /// their embedded defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading content file {}", path.display()))?;
        let content: Self = toml::from_str(&raw)
            .with_context(|| format!("parsing content file {}", path.display()))?;
        content.validate()?;
        Ok(content)
    }

    /// The stages assume their collections are populated; an empty one is a
    /// broken pack, caught here before any stage is built.
    pub fn validate(&self) -> Result<()> {
        if self.loading_messages.is_empty() {
            bail!("content pack has no loading messages");
        }
        if self.gallery.is_empty() {
            bail!("content pack has no gallery memories");
        }
        if self.timeline.entries.is_empty() {
            bail!("content pack has no timeline entries");
        }
        Ok(())
    }
}

const DEFAULT_LETTER: &str = "
My pwincess,

Before you, days were just days.
Nothing felt special, nothing stayed.

Then you walked in… and suddenly everything had color.

Somewhere between the random conversations, the stupid jokes,
the late replies and the quiet moments where we said nothing at all…

you became my favorite place.

Not a person. A place.
The one i run to in my head when the world feels loud.

Loving you was never a decision.
It happened slowly… then all at once.

I know i don't always say things perfectly.
But one thing has never been confusing for me —

it's you. It has always been you.

In every lifetime, in every universe, in every possible story…
i would still find my way back to you.

So this Valentine's Day, i don't want promises.
I just want more us.

More laughs. More memories. More late night talks.
More of your presence in my ordinary days.

And if someday you ever forget how much you mean to me…
come back and read this again.

Forever yours,

ur prince
";

const DEFAULT_MISS_ME: &str = "
\"In every quiet moment, in every crowded room, in every song and every
silence — you're there. Not because i try to think of you, but because
you've become a part of how i experience everything.

Missing you isn't something i do. It's something i am whenever you're
not here.\"
";
