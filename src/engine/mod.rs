// Engine module - the timed interaction primitives
//
// Everything here is deliberately free of terminal concerns: each primitive
// is driven by an explicit clock value (`Instant` or a chrono `DateTime`)
// passed in by the caller, and randomness comes in through a caller-supplied
// `Rng`. The render loop feeds these with the real clock; tests feed them
// with fixed instants and seeded generators.

pub mod countdown;
pub mod evasive;
pub mod particles;
pub mod typewriter;
