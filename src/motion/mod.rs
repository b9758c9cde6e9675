//! Motion planning and rate generation.

pub mod compensator;
pub mod profile;
pub mod rate;

pub use compensator::BusCompensation;
pub use profile::{Direction, MotionPhase, RampProfile};
pub use rate::RateAccumulator;
