//! Waveform generation: sine lookup table and phase sequencing.

pub mod sequencer;
pub mod table;

pub use sequencer::{PhaseSequencer, SteppingMode};
pub use table::SINE_QUARTER;
