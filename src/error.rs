//! Error types for the stepper-wave library.
//!
//! Provides unified error handling across configuration, drive output and
//! motion planning. Run-time control faults (bus voltage reading zero,
//! numeric saturation) are handled by defined degenerate/clamping policies
//! in the control path and never surface here.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all stepper-wave operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// PWM/compare output error
    Drive(DriveError),
    /// Motion request validation error
    Motion(MotionError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Motor name not found in configuration
    MotorNotFound(heapless::String<32>),
    /// Invalid step angle (must be > 0)
    InvalidStepAngle(f32),
    /// Invalid winding resistance (must be > 0)
    InvalidWindingResistance(f32),
    /// Invalid current limit (must be > 0)
    InvalidCurrentLimit(f32),
    /// Invalid back-EMF constant (must be > 0)
    InvalidBackEmfConstant(f32),
    /// Invalid tick interval (must be > 0)
    InvalidTickInterval(f32),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Drive output errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriveError {
    /// Writing the four-channel compare group failed
    OutputFault,
}

/// Motion request errors.
///
/// These are configuration defects caught before a move starts; once a move
/// is running there is no recoverable-error channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MotionError {
    /// Acceleration of zero would never leave standstill
    ZeroAcceleration,
    /// Deceleration of zero cannot terminate the ramp
    ZeroDeceleration,
    /// Speed limit of zero would stall the rate generator
    ZeroSpeedLimit,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Drive(e) => write!(f, "Drive error: {}", e),
            Error::Motion(e) => write!(f, "Motion error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::MotorNotFound(name) => write!(f, "Motor '{}' not found", name),
            ConfigError::InvalidStepAngle(v) => {
                write!(f, "Invalid step angle: {}. Must be > 0", v)
            }
            ConfigError::InvalidWindingResistance(v) => {
                write!(f, "Invalid winding resistance: {}. Must be > 0", v)
            }
            ConfigError::InvalidCurrentLimit(v) => {
                write!(f, "Invalid current limit: {}. Must be > 0", v)
            }
            ConfigError::InvalidBackEmfConstant(v) => {
                write!(f, "Invalid back-EMF constant: {}. Must be > 0", v)
            }
            ConfigError::InvalidTickInterval(v) => {
                write!(f, "Invalid tick interval: {}. Must be > 0", v)
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for DriveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriveError::OutputFault => write!(f, "PWM compare output operation failed"),
        }
    }
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::ZeroAcceleration => write!(f, "Acceleration must be non-zero"),
            MotionError::ZeroDeceleration => write!(f, "Deceleration must be non-zero"),
            MotionError::ZeroSpeedLimit => write!(f, "Speed limit must be non-zero"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<DriveError> for Error {
    fn from(e: DriveError) -> Self {
        Error::Drive(e)
    }
}

impl From<MotionError> for Error {
    fn from(e: MotionError) -> Self {
        Error::Motion(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for DriveError {}

#[cfg(feature = "std")]
impl std::error::Error for MotionError {}
