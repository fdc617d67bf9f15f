// Stage sequencer - the linear progression through the experience
//
// Exactly one stage is current at any time. Movement is strictly forward
// along the fixed order; the active stage decides *when* to move by
// returning an advance signal, never *where* to.

/// The seven full-screen phases, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Gate,
    Intro,
    Loading,
    Gallery,
    Timeline,
    Confession,
    Celebration,
}

impl Stage {
    /// The following stage, or `None` at the end of the line.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Gate => Some(Stage::Intro),
            Stage::Intro => Some(Stage::Loading),
            Stage::Loading => Some(Stage::Gallery),
            Stage::Gallery => Some(Stage::Timeline),
            Stage::Timeline => Some(Stage::Confession),
            Stage::Confession => Some(Stage::Celebration),
            Stage::Celebration => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// Name used in logs.
    pub fn name(self) -> &'static str {
        match self {
            Stage::Gate => "gate",
            Stage::Intro => "intro",
            Stage::Loading => "loading",
            Stage::Gallery => "gallery",
            Stage::Timeline => "timeline",
            Stage::Confession => "confession",
            Stage::Celebration => "celebration",
        }
    }
}

/// Holds the current stage and the single forward transition.
#[derive(Debug, Default)]
pub struct Sequencer {
    current: Stage,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Stage {
        self.current
    }

    /// Move to the next stage. Silently does nothing at the terminal stage.
    pub fn advance(&mut self) {
        match self.current.next() {
            Some(next) => {
                tracing::info!(from = self.current.name(), to = next.name(), "stage transition");
                self.current = next;
            }
            None => {
                tracing::debug!(stage = self.current.name(), "advance past terminal stage ignored");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_gate() {
        assert_eq!(Sequencer::new().current(), Stage::Gate);
    }

    #[test]
    fn test_advances_through_the_full_chain_in_order() {
        let mut seq = Sequencer::new();
        let expected = [
            Stage::Gate,
            Stage::Intro,
            Stage::Loading,
            Stage::Gallery,
            Stage::Timeline,
            Stage::Confession,
            Stage::Celebration,
        ];
        for (i, stage) in expected.iter().enumerate() {
            assert_eq!(seq.current(), *stage);
            if i < expected.len() - 1 {
                seq.advance();
            }
        }
    }

    #[test]
    fn test_advance_at_terminal_stage_is_a_noop() {
        let mut seq = Sequencer::new();
        for _ in 0..6 {
            seq.advance();
        }
        assert_eq!(seq.current(), Stage::Celebration);
        assert!(seq.current().is_terminal());

        seq.advance();
        seq.advance();
        assert_eq!(seq.current(), Stage::Celebration);
    }
}
