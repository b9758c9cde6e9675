//! Unit types for physical and fixed-point quantities.
//!
//! Provides type-safe representations of angles, angular rates and the
//! Q1.15 duty-cycle magnitudes written to the PWM compare hardware, to
//! prevent unit confusion at compile time.

use core::ops::{Add, Mul, Sub};

use serde::Deserialize;

/// Angular position in degrees.
///
/// Used for configuration and user-facing API. Internally converted to
/// sub-steps through [`crate::config::DriveParameters`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f32);

impl Degrees {
    /// Create a new Degrees value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}

impl Add for Degrees {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Degrees {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

/// Angular velocity in degrees per second.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct DegreesPerSec(pub f32);

impl DegreesPerSec {
    /// Create a new DegreesPerSec value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}

impl Mul<f32> for DegreesPerSec {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self(self.0 * rhs)
    }
}

/// Angular acceleration in degrees per second squared.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct DegreesPerSecSquared(pub f32);

impl DegreesPerSecSquared {
    /// Create a new DegreesPerSecSquared value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}

/// Drive-amplitude fraction in U.Q1.15 format.
///
/// `0` is 0% duty, [`Amplitude::MAX_RAW`] (32768) is 100% duty. Values are
/// clamped to 32768 on every construction path, so an `Amplitude` can be
/// handed to compare hardware without further range checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Amplitude(u16);

impl Amplitude {
    /// Raw value representing a 1.0 (100% duty) fraction.
    pub const MAX_RAW: u16 = 32768;

    /// Zero drive.
    pub const ZERO: Self = Self(0);

    /// Full drive (1.0).
    pub const FULL: Self = Self(Self::MAX_RAW);

    /// cos 45° drive used by the two-coil half-step states (0.707).
    pub const HALF_STEP_DIAGONAL: Self = Self(23167);

    /// Create an amplitude from a raw Q1.15 value, clamping to 32768.
    #[inline]
    pub const fn from_raw(raw: u16) -> Self {
        if raw > Self::MAX_RAW {
            Self(Self::MAX_RAW)
        } else {
            Self(raw)
        }
    }

    /// Create an amplitude from a [0.0, 1.0] fraction.
    ///
    /// Rounding is half-up (`32768*x + 0.5`, truncated), matching the fixed
    /// point encoding of the compare hardware; out-of-range fractions clamp.
    #[inline]
    pub fn from_fraction(fraction: f32) -> Self {
        if fraction <= 0.0 {
            return Self::ZERO;
        }
        Self::from_raw((32768.0 * fraction + 0.5) as u16)
    }

    /// Get the raw Q1.15 value.
    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Get the duty fraction as a float (diagnostics only).
    #[inline]
    pub fn fraction(self) -> f32 {
        self.0 as f32 / 32768.0
    }
}

/// Per-channel drive magnitudes for the four coil half-bridges.
///
/// Each channel is a Q1.15 duty fraction, computed by the phase sequencer
/// and scaled by the bus-voltage amplitude before being written to the
/// buffered compare registers as one atomic group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriveVector {
    /// Channel A magnitude.
    pub a: u16,
    /// Channel B magnitude.
    pub b: u16,
    /// Channel C magnitude.
    pub c: u16,
    /// Channel D magnitude.
    pub d: u16,
}

impl DriveVector {
    /// All channels de-energized.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Create a drive vector from four raw Q1.15 magnitudes.
    #[inline]
    pub const fn new(a: u16, b: u16, c: u16, d: u16) -> Self {
        Self { a, b, c, d }
    }

    /// Scale all four channels by an amplitude fraction (Q1.15 multiply).
    #[inline]
    pub fn scale(self, amplitude: Amplitude) -> Self {
        let amp = amplitude.raw() as u32;
        let mul = |v: u16| ((v as u32 * amp) >> 15) as u16;
        Self {
            a: mul(self.a),
            b: mul(self.b),
            c: mul(self.c),
            d: mul(self.d),
        }
    }

    /// True if every channel is de-energized.
    #[inline]
    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amplitude_rounding_half_up() {
        // 0.707 * 32768 = 23166.97..., +0.5 rounds up to 23167
        assert_eq!(Amplitude::from_fraction(0.707).raw(), 23167);
        assert_eq!(Amplitude::from_fraction(1.0).raw(), 32768);
        assert_eq!(Amplitude::from_fraction(0.0).raw(), 0);
    }

    #[test]
    fn test_amplitude_clamps() {
        assert_eq!(Amplitude::from_fraction(1.5).raw(), 32768);
        assert_eq!(Amplitude::from_fraction(-0.5).raw(), 0);
        assert_eq!(Amplitude::from_raw(u16::MAX).raw(), 32768);
    }

    #[test]
    fn test_drive_vector_scale_identity() {
        let v = DriveVector::new(804, 23167, 0, 32768);
        assert_eq!(v.scale(Amplitude::FULL), v);
        assert_eq!(v.scale(Amplitude::ZERO), DriveVector::ZERO);
    }

    #[test]
    fn test_drive_vector_scale_half() {
        let v = DriveVector::new(32768, 16384, 2, 0);
        let half = v.scale(Amplitude::from_raw(16384));
        assert_eq!(half.a, 16384);
        assert_eq!(half.b, 8192);
        assert_eq!(half.c, 1);
        assert_eq!(half.d, 0);
    }
}
