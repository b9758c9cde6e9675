//! # stepper-wave
//!
//! Sine-weighted PWM stepper drive with trapezoidal ramping and bus-voltage
//! compensation, for four-channel half-bridge power stages.
//!
//! The crate turns a signed displacement into a sequence of four-channel
//! Q1.15 duty fractions. A 16-bit phase accumulator paces step events from
//! a fixed control tick, a trapezoidal planner shapes the speed over the
//! move, and the drive amplitude is compensated for the measured bus
//! voltage plus the speed-proportional back-EMF. Full-step, half-step and
//! 32x sine microstepping share one control loop.
//!
//! Moves are blocking: they run on the caller's thread, paced by a
//! [`TickSource`](motor::TickSource) that firmware typically backs with a
//! periodic timer interrupt through [`TickFlag`](motor::TickFlag).
//!
//! ## Example
//!
//! ```no_run
//! use stepper_wave::config::units::{Degrees, DegreesPerSec, DegreesPerSecSquared};
//! use stepper_wave::motor::StepperDriverBuilder;
//! use stepper_wave::wave::SteppingMode;
//! # use stepper_wave::config::units::DriveVector;
//! # use stepper_wave::motor::{BusVoltageSense, TickSource, WaveOutput};
//! # struct Pwm; impl WaveOutput for Pwm { type Error = core::convert::Infallible;
//! #   fn apply(&mut self, _: DriveVector) -> Result<(), Self::Error> { Ok(()) } }
//! # struct Tick; impl TickSource for Tick { fn wait_for_tick(&mut self) {} }
//! # struct Adc; impl BusVoltageSense for Adc { fn read_bus_voltage_mv(&mut self) -> u16 { 12000 } }
//! # fn main() -> Result<(), stepper_wave::error::Error> {
//! let mut motor = StepperDriverBuilder::new(Pwm, Tick, Adc)
//!     .stepping_mode(SteppingMode::MicroStep)
//!     .build()?;
//!
//! motor.move_degrees(
//!     Degrees(90.0),
//!     DegreesPerSecSquared(5000.0),
//!     DegreesPerSecSquared(5000.0),
//!     DegreesPerSec(360.0),
//! )?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - `std` (default): TOML configuration loading and `std::error::Error`
//!   impls
//! - `alloc`: serde alloc support without full std
//! - `defmt`: deferred-format logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod error;
pub mod motion;
pub mod motor;
pub mod wave;

pub use config::units::{Amplitude, Degrees, DegreesPerSec, DegreesPerSecSquared, DriveVector};
pub use config::{DriveParameters, MotorConfig, SystemConfig};
pub use error::{Error, Result};
pub use motion::{BusCompensation, Direction, MotionPhase, RampProfile, RateAccumulator};
pub use motor::{StepperDriver, StepperDriverBuilder};
pub use wave::{PhaseSequencer, SteppingMode};
