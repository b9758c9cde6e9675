//! Configuration types and loading.

pub mod drive;
pub mod motor;
pub mod system;
pub mod units;
pub mod validation;

#[cfg(feature = "std")]
pub mod loader;

pub use drive::{DriveParameters, MAX_SPEED};
pub use motor::MotorConfig;
pub use system::SystemConfig;
pub use units::{Amplitude, Degrees, DegreesPerSec, DegreesPerSecSquared, DriveVector};
pub use validation::{validate_config, validate_motor};

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};
