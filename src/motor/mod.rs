//! Motor driver, builder and hardware seams.

pub mod builder;
pub mod driver;
pub mod hal;
pub mod position;

pub use builder::StepperDriverBuilder;
pub use driver::StepperDriver;
pub use hal::{BusVoltageSense, PwmQuad, TickFlag, TickSource, TickWaiter, WaveOutput};
pub use position::Position;
