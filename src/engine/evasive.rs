// Evasive target - a control that relocates away from the pointer
//
// The widget owns target values only (offset, rotation); the render layer
// places the hit-region wherever the current offset says and may animate
// toward it however it likes. A new proximity event overwrites the pending
// target, it never queues behind one.

use rand::Rng;
use std::f32::consts::TAU;

/// Escalating refusal phrases, switched on attempt-count thresholds.
const LABELS: [&str; 4] = [
    "no",
    "try again :)",
    "really? you sure?",
    "damn… at least lie to me once.",
];

/// How much the companion affirmative control grows per dodge, and where
/// that growth stops. Cosmetic only.
const COMPANION_GROWTH: f32 = 0.05;
const COMPANION_SCALE_MAX: f32 = 1.5;

const ROTATION_PER_ATTEMPT: f32 = 5.0;

#[derive(Debug, Clone)]
pub struct EvasiveTarget {
    attempts: u32,
    offset: (f32, f32),
    rotation: f32,
    base_distance: f32,
    per_attempt_growth: f32,
}

impl EvasiveTarget {
    pub fn new(base_distance: f32, per_attempt_growth: f32) -> Self {
        Self {
            attempts: 0,
            offset: (0.0, 0.0),
            rotation: 0.0,
            base_distance,
            per_attempt_growth,
        }
    }

    /// React to the pointer closing in: bump the attempt count and jump to
    /// a fresh offset at a random angle, further out than last time.
    pub fn evade(&mut self, rng: &mut impl Rng) {
        self.attempts += 1;
        let distance = self.escape_distance();
        let angle = rng.random_range(0.0..TAU);
        self.offset = (angle.cos() * distance, angle.sin() * distance);
        self.rotation = self.attempts as f32 * ROTATION_PER_ATTEMPT;
    }

    /// Distance of the current (or next) escape hop. Grows without bound.
    pub fn escape_distance(&self) -> f32 {
        self.base_distance + self.attempts as f32 * self.per_attempt_growth
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Displacement from the control's resting position.
    pub fn offset(&self) -> (f32, f32) {
        self.offset
    }

    /// Target orientation in degrees; proportional to the attempt count.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// The label escalates as the viewer keeps trying.
    pub fn label(&self) -> &'static str {
        match self.attempts {
            0..=2 => LABELS[0],
            3..=4 => LABELS[1],
            5..=7 => LABELS[2],
            _ => LABELS[3],
        }
    }

    /// Scale factor for the companion affirmative control: it grows a step
    /// per dodge and caps out, rewarding persistence visually without ever
    /// gating activation.
    pub fn companion_scale(&self) -> f32 {
        (1.0 + self.attempts as f32 * COMPANION_GROWTH).min(COMPANION_SCALE_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn target() -> EvasiveTarget {
        EvasiveTarget::new(12.0, 4.0)
    }

    #[test]
    fn test_attempts_increment_per_trigger() {
        let mut t = target();
        let mut rng = StdRng::seed_from_u64(1);
        for expected in 1..=20 {
            t.evade(&mut rng);
            assert_eq!(t.attempts(), expected);
        }
    }

    #[test]
    fn test_escape_distance_is_monotone_and_unbounded() {
        let mut t = target();
        let mut rng = StdRng::seed_from_u64(2);
        let mut prev = t.escape_distance();
        for _ in 0..100 {
            t.evade(&mut rng);
            let d = t.escape_distance();
            assert!(d > prev);
            prev = d;
        }
        assert!(prev > 400.0);
    }

    #[test]
    fn test_offset_magnitude_matches_distance() {
        let mut t = target();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..10 {
            t.evade(&mut rng);
            let (dx, dy) = t.offset();
            let magnitude = (dx * dx + dy * dy).sqrt();
            assert!((magnitude - t.escape_distance()).abs() < 0.001);
        }
    }

    #[test]
    fn test_label_thresholds() {
        let mut t = target();
        let mut rng = StdRng::seed_from_u64(4);

        assert_eq!(t.label(), "no");
        for _ in 0..2 {
            t.evade(&mut rng);
        }
        // attempts = 2: still baseline
        assert_eq!(t.label(), "no");

        t.evade(&mut rng); // 3
        assert_eq!(t.label(), "try again :)");
        t.evade(&mut rng); // 4
        assert_eq!(t.label(), "try again :)");

        t.evade(&mut rng); // 5
        assert_eq!(t.label(), "really? you sure?");
        t.evade(&mut rng); // 6
        t.evade(&mut rng); // 7
        assert_eq!(t.label(), "really? you sure?");

        t.evade(&mut rng); // 8
        assert_eq!(t.label(), "damn… at least lie to me once.");
    }

    #[test]
    fn test_ninth_hover_reaches_final_tier() {
        let mut t = target();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..9 {
            t.evade(&mut rng);
        }
        assert_eq!(t.label(), "damn… at least lie to me once.");
    }

    #[test]
    fn test_rotation_tracks_attempts() {
        let mut t = target();
        let mut rng = StdRng::seed_from_u64(6);
        t.evade(&mut rng);
        t.evade(&mut rng);
        t.evade(&mut rng);
        assert_eq!(t.rotation(), 15.0);
    }

    #[test]
    fn test_companion_scale_grows_and_caps() {
        let mut t = target();
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(t.companion_scale(), 1.0);
        t.evade(&mut rng);
        assert!((t.companion_scale() - 1.05).abs() < 1e-6);

        for _ in 0..30 {
            t.evade(&mut rng);
        }
        assert_eq!(t.companion_scale(), 1.5);
    }
}
