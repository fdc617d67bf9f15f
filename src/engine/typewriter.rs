// Typewriter - character-by-character timed text reveal
//
// A `Typewriter` does not own a timer. It owns an epoch (`arm`) and derives
// the revealed prefix from the caller's clock on every poll. That makes the
// reveal a pure function of (epoch, now): reconfiguring or dropping the
// value can never leave a stale tick mutating old state, because there is
// no tick to cancel.

use std::time::{Duration, Instant};

/// Reveals a string one character at a time on a fixed cadence.
///
/// After `arm()` is called, nothing is shown for `start_delay`; then one
/// additional character appears every `tick_interval` until the full text
/// is revealed. Before `arm()` the clock is simply not running.
#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    /// Byte offset of each character boundary, plus the trailing length.
    /// Precomputed so `revealed()` can slice without rescanning.
    boundaries: Vec<usize>,
    tick_interval: Duration,
    start_delay: Duration,
    armed_at: Option<Instant>,
}

impl Typewriter {
    /// A zero tick interval would reveal everything at once and is a
    /// configuration bug, not a runtime condition.
    pub fn new(text: impl Into<String>, tick_interval: Duration, start_delay: Duration) -> Self {
        assert!(
            !tick_interval.is_zero(),
            "typewriter tick interval must be nonzero"
        );
        let text = text.into();
        Self {
            boundaries: char_boundaries(&text),
            text,
            tick_interval,
            start_delay,
            armed_at: None,
        }
    }

    /// Start the reveal clock. Idempotent: re-arming keeps the first epoch.
    pub fn arm(&mut self, now: Instant) {
        self.armed_at.get_or_insert(now);
    }

    pub fn is_armed(&self) -> bool {
        self.armed_at.is_some()
    }

    /// Swap in new text and reset the reveal to nothing, disarmed.
    pub fn restart(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.boundaries = char_boundaries(&text);
        self.text = text;
        self.armed_at = None;
    }

    fn char_count(&self) -> usize {
        self.boundaries.len() - 1
    }

    /// Number of characters revealed at `now`. Monotone in `now`, clamped
    /// to the text length.
    fn revealed_count(&self, now: Instant) -> usize {
        let Some(epoch) = self.armed_at else {
            return 0;
        };
        let elapsed = now.saturating_duration_since(epoch);
        let Some(past_delay) = elapsed.checked_sub(self.start_delay) else {
            return 0;
        };
        let ticks = (past_delay.as_micros() / self.tick_interval.as_micros()) as usize;
        ticks.min(self.char_count())
    }

    /// The revealed prefix of the text at `now`.
    pub fn revealed(&self, now: Instant) -> &str {
        &self.text[..self.boundaries[self.revealed_count(now)]]
    }

    pub fn is_complete(&self, now: Instant) -> bool {
        self.armed_at.is_some() && self.revealed_count(now) == self.char_count()
    }
}

/// A sequence of typewriter lines where line N+1 may only start once line N
/// has finished.
///
/// The gate is edge-triggered: on the poll that first observes a line
/// complete, its successor is armed with that poll's timestamp. Until then
/// the successor has no epoch, so its delay clock is not running at all.
#[derive(Debug, Clone)]
pub struct TypewriterChain {
    lines: Vec<Typewriter>,
}

impl TypewriterChain {
    pub fn new(lines: Vec<Typewriter>) -> Self {
        Self { lines }
    }

    /// Arm the first line. Later lines arm themselves via `tick`.
    pub fn start(&mut self, now: Instant) {
        if let Some(first) = self.lines.first_mut() {
            first.arm(now);
        }
    }

    /// Propagate completion edges. Call once per frame.
    pub fn tick(&mut self, now: Instant) {
        for i in 1..self.lines.len() {
            if !self.lines[i].is_armed() && self.lines[i - 1].is_complete(now) {
                self.lines[i].arm(now);
            }
        }
    }

    pub fn line(&self, index: usize) -> &Typewriter {
        &self.lines[index]
    }

    /// True once every line has fully revealed.
    pub fn is_complete(&self, now: Instant) -> bool {
        self.lines.iter().all(|l| l.is_complete(now))
    }
}

fn char_boundaries(text: &str) -> Vec<usize> {
    let mut boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    boundaries.push(text.len());
    boundaries
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(70);
    const DELAY: Duration = Duration::from_millis(500);

    #[test]
    fn test_nothing_revealed_before_arming() {
        let tw = Typewriter::new("hello", TICK, Duration::ZERO);
        let now = Instant::now();
        assert_eq!(tw.revealed(now + Duration::from_secs(60)), "");
        assert!(!tw.is_complete(now + Duration::from_secs(60)));
    }

    #[test]
    fn test_nothing_revealed_during_delay() {
        let mut tw = Typewriter::new("hello", TICK, DELAY);
        let t0 = Instant::now();
        tw.arm(t0);
        assert_eq!(tw.revealed(t0), "");
        assert_eq!(tw.revealed(t0 + Duration::from_millis(499)), "");
        assert_eq!(tw.revealed(t0 + DELAY), "");
    }

    #[test]
    fn test_one_character_per_tick() {
        let mut tw = Typewriter::new("hello", TICK, DELAY);
        let t0 = Instant::now();
        tw.arm(t0);
        for n in 1..=5 {
            let at = t0 + DELAY + TICK * n;
            assert_eq!(tw.revealed(at), &"hello"[..n as usize]);
        }
    }

    #[test]
    fn test_completes_after_exactly_len_ticks() {
        let text = "for certain";
        let len = text.chars().count() as u32;
        let mut tw = Typewriter::new(text, TICK, DELAY);
        let t0 = Instant::now();
        tw.arm(t0);

        let one_short = t0 + DELAY + TICK * (len - 1);
        assert!(!tw.is_complete(one_short));

        let done = t0 + DELAY + TICK * len;
        assert!(tw.is_complete(done));
        assert_eq!(tw.revealed(done), text);

        // Frozen afterwards
        let later = done + Duration::from_secs(30);
        assert_eq!(tw.revealed(later), text);
        assert!(tw.is_complete(later));
    }

    #[test]
    fn test_revealed_is_nondecreasing_prefix() {
        let text = "i know one thing";
        let mut tw = Typewriter::new(text, TICK, DELAY);
        let t0 = Instant::now();
        tw.arm(t0);

        let mut prev_len = 0;
        for ms in (0..3000).step_by(13) {
            let revealed = tw.revealed(t0 + Duration::from_millis(ms));
            assert!(text.starts_with(revealed));
            assert!(revealed.len() >= prev_len);
            prev_len = revealed.len();
        }
    }

    #[test]
    fn test_multibyte_text_reveals_whole_characters() {
        let mut tw = Typewriter::new("héllo…", Duration::from_millis(10), Duration::ZERO);
        let t0 = Instant::now();
        tw.arm(t0);
        assert_eq!(tw.revealed(t0 + Duration::from_millis(20)), "hé");
        assert_eq!(tw.revealed(t0 + Duration::from_millis(60)), "héllo…");
    }

    #[test]
    fn test_restart_resets_and_disarms() {
        let mut tw = Typewriter::new("first", TICK, Duration::ZERO);
        let t0 = Instant::now();
        tw.arm(t0);
        assert!(tw.is_complete(t0 + TICK * 5));

        tw.restart("second line");
        assert!(!tw.is_armed());
        assert_eq!(tw.revealed(t0 + Duration::from_secs(60)), "");

        tw.arm(t0 + Duration::from_secs(1));
        assert_eq!(
            tw.revealed(t0 + Duration::from_secs(1) + TICK * 3),
            "sec"
        );
    }

    #[test]
    #[should_panic(expected = "nonzero")]
    fn test_zero_tick_interval_panics() {
        let _ = Typewriter::new("x", Duration::ZERO, Duration::ZERO);
    }

    #[test]
    fn test_chain_second_line_waits_for_first() {
        let first = Typewriter::new("abcde", TICK, DELAY);
        let second = Typewriter::new("fgh", TICK, Duration::from_millis(1500));
        let mut chain = TypewriterChain::new(vec![first, second]);

        let t0 = Instant::now();
        chain.start(t0);

        // Well past the second line's own delay, but the first line is
        // still revealing: the second must show nothing.
        let mid = t0 + DELAY + TICK * 3;
        chain.tick(mid);
        assert!(!chain.line(0).is_complete(mid));
        assert_eq!(chain.line(1).revealed(mid), "");
        assert!(!chain.line(1).is_armed());

        // First completes; the edge arms the second.
        let first_done = t0 + DELAY + TICK * 5;
        chain.tick(first_done);
        assert!(chain.line(0).is_complete(first_done));
        assert!(chain.line(1).is_armed());

        // Second's delay runs from the observation edge.
        let second_started = first_done + Duration::from_millis(1500) + TICK;
        chain.tick(second_started);
        assert_eq!(chain.line(1).revealed(second_started), "f");

        let all_done = first_done + Duration::from_millis(1500) + TICK * 3;
        chain.tick(all_done);
        assert!(chain.is_complete(all_done));
    }

    #[test]
    fn test_chain_gating_holds_for_any_configuration() {
        for (tick_ms, delay_ms) in [(10u64, 0u64), (80, 2000), (200, 1)] {
            let first = Typewriter::new("slow line here", Duration::from_millis(tick_ms), DELAY);
            let second = Typewriter::new("after", TICK, Duration::from_millis(delay_ms));
            let mut chain = TypewriterChain::new(vec![first, second]);
            let t0 = Instant::now();
            chain.start(t0);

            for ms in (0..5000).step_by(7) {
                let at = t0 + Duration::from_millis(ms);
                chain.tick(at);
                if !chain.line(0).is_complete(at) {
                    assert_eq!(chain.line(1).revealed(at), "");
                }
            }
        }
    }
}
