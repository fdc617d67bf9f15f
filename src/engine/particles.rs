// Particle simulation - short-lived, randomly parameterized visual entities
//
// Particles are not integrated physically. Each one is spawned with an
// origin, a total drift and a lifetime; its position at any instant is a
// deterministic interpolation between origin and origin+drift. The field
// enforces two independent bounds: per-particle lifetime expiry and a hard
// population cap that evicts the oldest entry on spawn.
//
// Coordinates are fractional terminal cells, x to the right and y downward.

use rand::Rng;
use std::collections::VecDeque;
use std::f32::consts::TAU;
use std::time::{Duration, Instant};

/// Interpolation curve applied to a particle's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Cubic ease-out: fast launch, gentle settle.
    EaseOut,
}

impl Easing {
    pub fn apply(self, p: f32) -> f32 {
        match self {
            Easing::Linear => p,
            Easing::EaseOut => 1.0 - (1.0 - p).powi(3),
        }
    }
}

/// One visual entity owned by a [`ParticleField`].
#[derive(Debug, Clone)]
pub struct Particle {
    pub id: u64,
    pub origin: (f32, f32),
    /// Total displacement reached at the end of `lifetime`.
    pub drift: (f32, f32),
    pub size: f32,
    /// Spawn orientation in degrees.
    pub rotation: f32,
    /// Additional degrees turned over the whole lifetime.
    pub spin: f32,
    pub glyph: char,
    spawned_at: Instant,
    lifetime: Duration,
}

/// Everything randomized at spawn time; the field assigns the id and clock.
#[derive(Debug, Clone)]
pub struct ParticleParams {
    pub origin: (f32, f32),
    pub drift: (f32, f32),
    pub size: f32,
    pub rotation: f32,
    pub spin: f32,
    pub glyph: char,
    pub lifetime: Duration,
}

impl Particle {
    /// Fraction of the lifetime elapsed at `now`, clamped to [0, 1].
    pub fn progress(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.spawned_at);
        (elapsed.as_secs_f32() / self.lifetime.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.spawned_at) >= self.lifetime
    }

    /// Current orientation in degrees.
    pub fn angle(&self, now: Instant) -> f32 {
        self.rotation + self.spin * self.progress(now)
    }
}

/// A bounded collection of particles with a shared easing curve.
#[derive(Debug)]
pub struct ParticleField {
    particles: VecDeque<Particle>,
    cap: usize,
    easing: Easing,
    next_id: u64,
}

impl ParticleField {
    pub fn new(cap: usize, easing: Easing) -> Self {
        assert!(cap > 0, "particle field cap must be nonzero");
        Self {
            particles: VecDeque::with_capacity(cap),
            cap,
            easing,
            next_id: 0,
        }
    }

    /// Add a particle, evicting the oldest one if the field is full.
    pub fn spawn(&mut self, params: ParticleParams, now: Instant) -> u64 {
        if self.particles.len() >= self.cap {
            self.particles.pop_front();
        }
        let id = self.next_id;
        self.next_id += 1;
        self.particles.push_back(Particle {
            id,
            origin: params.origin,
            drift: params.drift,
            size: params.size,
            rotation: params.rotation,
            spin: params.spin,
            glyph: params.glyph,
            spawned_at: now,
            lifetime: params.lifetime,
        });
        id
    }

    /// Remove every particle whose lifetime has elapsed.
    pub fn retire_expired(&mut self, now: Instant) {
        self.particles.retain(|p| !p.is_expired(now));
    }

    /// Drop the single oldest particle, if any.
    pub fn drop_oldest(&mut self) {
        self.particles.pop_front();
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Interpolated position of `particle` at `now` under this field's curve.
    pub fn position(&self, particle: &Particle, now: Instant) -> (f32, f32) {
        let t = self.easing.apply(particle.progress(now));
        (
            particle.origin.0 + particle.drift.0 * t,
            particle.origin.1 + particle.drift.1 * t,
        )
    }

    /// Remaining visibility of `particle`: 1.0 fresh, 0.0 at expiry.
    pub fn fade(&self, particle: &Particle, now: Instant) -> f32 {
        1.0 - particle.progress(now)
    }
}

// ---------------------------------------------------------------------------
// Ambient fall
// ---------------------------------------------------------------------------

const PETAL_CAP: usize = 12;
const PETAL_SPAWN_EVERY: Duration = Duration::from_secs(3);
const PETAL_SEED_COUNT: u32 = 5;
const PETAL_SEED_GAP: Duration = Duration::from_millis(800);
const PETAL_GLYPHS: &[char] = &['❀', '✿', '❁', '✾'];

/// Sparse petals drifting from above the viewport to below it.
#[derive(Debug)]
pub struct PetalDrift {
    field: ParticleField,
    /// Pending spawn instants: a short staggered seed burst, then refilled
    /// one interval at a time.
    pending: VecDeque<Instant>,
    active: bool,
}

impl PetalDrift {
    pub fn new() -> Self {
        Self {
            field: ParticleField::new(PETAL_CAP, Easing::Linear),
            pending: VecDeque::new(),
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Begin drifting: schedules the initial staggered petals.
    pub fn activate(&mut self, now: Instant) {
        if self.active {
            return;
        }
        self.active = true;
        self.pending = (0..PETAL_SEED_COUNT).map(|i| now + PETAL_SEED_GAP * i).collect();
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.pending.clear();
        self.field.clear();
    }

    /// Advance the field: retire finished petals and spawn any that are due.
    /// `bounds` is the viewport size in cells.
    pub fn tick(&mut self, now: Instant, bounds: (f32, f32), rng: &mut impl Rng) {
        self.field.retire_expired(now);
        if !self.active {
            return;
        }
        while let Some(&due) = self.pending.front() {
            if due > now {
                break;
            }
            self.pending.pop_front();
            self.spawn_petal(due, bounds, rng);
            if self.pending.is_empty() {
                self.pending.push_back(due + PETAL_SPAWN_EVERY);
            }
        }
    }

    fn spawn_petal(&mut self, now: Instant, (width, height): (f32, f32), rng: &mut impl Rng) {
        let x = rng.random_range(0.0..width.max(1.0));
        let wander = (rng.random_range(0.0..1.0) - 0.5) * 0.2 * width;
        self.field.spawn(
            ParticleParams {
                origin: (x, -2.0),
                drift: (wander, height + 4.0),
                size: rng.random_range(1.0..2.0),
                rotation: rng.random_range(0.0..360.0),
                spin: 720.0,
                glyph: PETAL_GLYPHS[rng.random_range(0..PETAL_GLYPHS.len())],
                lifetime: Duration::from_secs_f32(rng.random_range(10.0..20.0)),
            },
            now,
        );
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }
}

impl Default for PetalDrift {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Pointer trail
// ---------------------------------------------------------------------------

const TRAIL_CAP: usize = 8;
const TRAIL_LIFETIME: Duration = Duration::from_millis(500);
const TRAIL_DECAY_EVERY: Duration = Duration::from_millis(100);

/// Short-lived dots left behind the pointer. Spawned per move event, so the
/// move-event frequency is the implicit rate limit; the cap bounds memory
/// regardless.
#[derive(Debug)]
pub struct PointerTrail {
    field: ParticleField,
    last_decay: Option<Instant>,
}

impl PointerTrail {
    pub fn new() -> Self {
        Self {
            field: ParticleField::new(TRAIL_CAP, Easing::Linear),
            last_decay: None,
        }
    }

    /// Record a pointer position. Evicts the oldest dot once the cap is hit.
    pub fn record(&mut self, now: Instant, x: f32, y: f32) {
        self.field.spawn(
            ParticleParams {
                origin: (x, y),
                drift: (0.0, 0.0),
                size: 1.0,
                rotation: 0.0,
                spin: 0.0,
                glyph: '·',
                lifetime: TRAIL_LIFETIME,
            },
            now,
        );
    }

    /// Retire expired dots and peel the oldest one off every decay interval
    /// so the tail dissolves while the pointer rests.
    pub fn tick(&mut self, now: Instant) {
        self.field.retire_expired(now);
        match self.last_decay {
            Some(last) if now.saturating_duration_since(last) >= TRAIL_DECAY_EVERY => {
                self.field.drop_oldest();
                self.last_decay = Some(now);
            }
            None => self.last_decay = Some(now),
            _ => {}
        }
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }
}

impl Default for PointerTrail {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Celebratory burst
// ---------------------------------------------------------------------------

pub const BURST_WAVES: usize = 3;
pub const BURST_WAVE_GAP: Duration = Duration::from_millis(300);
pub const BURST_WAVE_SIZE: usize = 80;
const BURST_GLYPHS: &[char] = &['♥', '❤', '♡', '❥', '❣', '♥'];

/// A one-shot heart explosion released in timed waves from the viewport
/// center and wiped all at once when the clip duration elapses.
#[derive(Debug)]
pub struct HeartBurst {
    field: ParticleField,
    pending_waves: VecDeque<Instant>,
    clear_at: Option<Instant>,
}

impl HeartBurst {
    pub fn new() -> Self {
        Self {
            field: ParticleField::new(BURST_WAVES * BURST_WAVE_SIZE, Easing::EaseOut),
            pending_waves: VecDeque::new(),
            clear_at: None,
        }
    }

    /// Fire the burst: waves at +0, +300 and +600 ms, everything cleared at
    /// `now + duration` regardless of per-particle lifetimes.
    pub fn trigger(&mut self, now: Instant, duration: Duration) {
        self.pending_waves = (0..BURST_WAVES as u32)
            .map(|i| now + BURST_WAVE_GAP * i)
            .collect();
        self.clear_at = Some(now + duration);
    }

    pub fn is_active(&self) -> bool {
        self.clear_at.is_some()
    }

    pub fn tick(&mut self, now: Instant, center: (f32, f32), rng: &mut impl Rng) {
        if let Some(clear_at) = self.clear_at {
            if now >= clear_at {
                self.field.clear();
                self.pending_waves.clear();
                self.clear_at = None;
                return;
            }
        }
        while let Some(&at) = self.pending_waves.front() {
            if at > now {
                break;
            }
            self.pending_waves.pop_front();
            self.spawn_wave(at, center, rng);
        }
        self.field.retire_expired(now);
    }

    fn spawn_wave(&mut self, now: Instant, center: (f32, f32), rng: &mut impl Rng) {
        for i in 0..BURST_WAVE_SIZE {
            let angle = TAU * i as f32 / BURST_WAVE_SIZE as f32 + rng.random_range(0.0..0.5);
            let speed = rng.random_range(8.0..23.0);
            // Upward launch bias, constant downward pull baked into the
            // end point; terminal cells are roughly twice as tall as wide,
            // hence the vertical compression.
            let drift = (
                angle.cos() * speed * 2.5,
                (angle.sin() * speed - 5.0) * 1.25 + 6.0,
            );
            self.field.spawn(
                ParticleParams {
                    origin: center,
                    drift,
                    size: rng.random_range(1.0..2.5),
                    rotation: rng.random_range(0.0..360.0),
                    spin: rng.random_range(0.0..360.0),
                    glyph: BURST_GLYPHS[rng.random_range(0..BURST_GLYPHS.len())],
                    lifetime: Duration::from_secs_f32(rng.random_range(2.5..3.5)),
                },
                now,
            );
        }
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }
}

impl Default for HeartBurst {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn params(lifetime_ms: u64) -> ParticleParams {
        ParticleParams {
            origin: (10.0, 10.0),
            drift: (4.0, 8.0),
            size: 1.0,
            rotation: 0.0,
            spin: 360.0,
            glyph: '♥',
            lifetime: Duration::from_millis(lifetime_ms),
        }
    }

    #[test]
    fn test_position_interpolates_toward_drift() {
        let mut field = ParticleField::new(4, Easing::Linear);
        let t0 = Instant::now();
        field.spawn(params(1000), t0);
        let p = field.iter().next().unwrap().clone();

        assert_eq!(field.position(&p, t0), (10.0, 10.0));
        let (x, y) = field.position(&p, t0 + Duration::from_millis(500));
        assert!((x - 12.0).abs() < 0.1);
        assert!((y - 14.0).abs() < 0.1);
        assert_eq!(field.position(&p, t0 + Duration::from_secs(5)), (14.0, 18.0));
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let mut field = ParticleField::new(3, Easing::Linear);
        let t0 = Instant::now();
        let first = field.spawn(params(60_000), t0);
        field.spawn(params(60_000), t0);
        field.spawn(params(60_000), t0);
        assert_eq!(field.len(), 3);

        field.spawn(params(60_000), t0);
        assert_eq!(field.len(), 3);
        assert!(field.iter().all(|p| p.id != first));
    }

    #[test]
    fn test_ids_are_unique_within_field() {
        let mut field = ParticleField::new(2, Easing::Linear);
        let t0 = Instant::now();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..10 {
            assert!(seen.insert(field.spawn(params(1), t0)));
        }
    }

    #[test]
    fn test_retire_expired_removes_only_finished() {
        let mut field = ParticleField::new(8, Easing::Linear);
        let t0 = Instant::now();
        field.spawn(params(100), t0);
        field.spawn(params(10_000), t0);

        field.retire_expired(t0 + Duration::from_millis(200));
        assert_eq!(field.len(), 1);
    }

    #[test]
    fn test_trail_count_never_exceeds_cap() {
        let mut trail = PointerTrail::new();
        let t0 = Instant::now();
        // Spawn far faster than any real pointer could move.
        for i in 0..500 {
            trail.record(t0 + Duration::from_micros(i), i as f32, i as f32);
            assert!(trail.field().len() <= TRAIL_CAP);
        }
    }

    #[test]
    fn test_trail_dissolves_while_pointer_rests() {
        let mut trail = PointerTrail::new();
        let t0 = Instant::now();
        for i in 0..TRAIL_CAP {
            trail.record(t0, i as f32, 0.0);
        }
        // A second of decay ticks with no new motion empties the tail well
        // before the 500 ms lifetimes would.
        for ms in (0..1000).step_by(100) {
            trail.tick(t0 + Duration::from_millis(ms));
        }
        assert!(trail.field().is_empty());
    }

    #[test]
    fn test_burst_spawns_three_waves() {
        let mut burst = HeartBurst::new();
        let mut rng = StdRng::seed_from_u64(7);
        let t0 = Instant::now();
        burst.trigger(t0, Duration::from_millis(4000));

        burst.tick(t0, (40.0, 12.0), &mut rng);
        assert_eq!(burst.field().len(), BURST_WAVE_SIZE);

        burst.tick(t0 + Duration::from_millis(350), (40.0, 12.0), &mut rng);
        assert_eq!(burst.field().len(), 2 * BURST_WAVE_SIZE);

        burst.tick(t0 + Duration::from_millis(700), (40.0, 12.0), &mut rng);
        assert_eq!(burst.field().len(), 3 * BURST_WAVE_SIZE);
    }

    #[test]
    fn test_burst_clears_everything_at_duration() {
        let mut burst = HeartBurst::new();
        let mut rng = StdRng::seed_from_u64(7);
        let t0 = Instant::now();
        burst.trigger(t0, Duration::from_millis(4000));

        for ms in (0..=3900).step_by(100) {
            burst.tick(t0 + Duration::from_millis(ms), (40.0, 12.0), &mut rng);
        }
        // Individual lifetimes range up to 3.5 s, but the clip wipe wins.
        burst.tick(t0 + Duration::from_millis(4001), (40.0, 12.0), &mut rng);
        assert_eq!(burst.field().len(), 0);
        assert!(!burst.is_active());
    }

    #[test]
    fn test_petals_respect_cap_over_long_runs() {
        let mut petals = PetalDrift::new();
        let mut rng = StdRng::seed_from_u64(11);
        let t0 = Instant::now();
        petals.activate(t0);
        for s in 0..120 {
            petals.tick(t0 + Duration::from_secs(s), (80.0, 24.0), &mut rng);
            assert!(petals.field().len() <= PETAL_CAP);
        }
        assert!(!petals.field().is_empty());
    }

    #[test]
    fn test_petals_deactivate_clears_field() {
        let mut petals = PetalDrift::new();
        let mut rng = StdRng::seed_from_u64(11);
        let t0 = Instant::now();
        petals.activate(t0);
        petals.tick(t0 + Duration::from_secs(5), (80.0, 24.0), &mut rng);
        assert!(!petals.field().is_empty());

        petals.deactivate();
        assert!(petals.field().is_empty());
        assert!(!petals.is_active());
    }

    #[test]
    fn test_ease_out_front_loads_motion() {
        let half = Easing::EaseOut.apply(0.5);
        assert!(half > 0.5);
        assert_eq!(Easing::EaseOut.apply(1.0), 1.0);
        assert_eq!(Easing::EaseOut.apply(0.0), 0.0);
    }
}
