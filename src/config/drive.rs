//! Derived drive parameters and unit conversions.
//!
//! Bridges the physical configuration (degrees, ohms, milliamps) and the
//! fixed-point control domain (sub-steps, per-tick speed words, Q1.15
//! amplitudes). All conversions happen here, once per move at most; the
//! control loop itself is integer-only.

use crate::config::motor::MotorConfig;
use crate::config::units::{Degrees, DegreesPerSec, DegreesPerSecSquared};
use crate::wave::SteppingMode;

/// Highest speed word the rate generator accepts (one step per two ticks).
pub const MAX_SPEED: u16 = 32768;

/// Precomputed drive constants for one motor.
#[derive(Debug, Clone, PartialEq)]
pub struct DriveParameters {
    stepping_mode: SteppingMode,
    substeps_per_step: u16,
    step_angle: Degrees,
    tick_interval_us: f32,
    v_out_mv: f32,
    speed_comp: f32,
    release_idle_current: bool,
}

impl DriveParameters {
    /// Derive drive parameters from a validated motor configuration.
    pub fn from_config(config: &MotorConfig) -> Self {
        let substeps = config.stepping_mode.substeps_per_step();
        Self {
            stepping_mode: config.stepping_mode,
            substeps_per_step: substeps,
            step_angle: config.step_angle_degrees,
            tick_interval_us: config.tick_interval_us,
            // Winding voltage drop at the target current, in millivolts
            v_out_mv: config.winding_resistance_ohm * config.current_limit_ma,
            // Back-EMF gain numerator; dividing by the bus voltage in mV
            // yields the per-speed-unit amplitude boost in Q16.16
            speed_comp: 1_000_000_000.0 * config.back_emf_constant / substeps as f32,
            release_idle_current: config.release_idle_current,
        }
    }

    /// Stepping mode this motor runs in.
    #[inline]
    pub const fn stepping_mode(&self) -> SteppingMode {
        self.stepping_mode
    }

    /// Sub-steps per full mechanical step.
    #[inline]
    pub const fn substeps_per_step(&self) -> u16 {
        self.substeps_per_step
    }

    /// Control tick period in microseconds.
    #[inline]
    pub const fn tick_interval_us(&self) -> f32 {
        self.tick_interval_us
    }

    /// Winding voltage drop at the configured current limit, in millivolts.
    #[inline]
    pub const fn winding_voltage_mv(&self) -> f32 {
        self.v_out_mv
    }

    /// Back-EMF compensation numerator.
    #[inline]
    pub const fn speed_compensation(&self) -> f32 {
        self.speed_comp
    }

    /// Whether the coils are de-energized when a move completes.
    #[inline]
    pub const fn release_idle_current(&self) -> bool {
        self.release_idle_current
    }

    /// Sub-steps per degree of rotation.
    fn substeps_per_degree(&self) -> f32 {
        self.substeps_per_step as f32 / self.step_angle.value()
    }

    /// Convert an angular velocity to a per-tick speed word.
    ///
    /// The encoding makes one accumulator overflow equal one sub-step:
    /// `speed = dps * 65536 * tick_us * K / (step_angle * 1e6)`, rounded
    /// half-up. Negative rates encode as zero.
    pub fn speed_from_rate(&self, rate: DegreesPerSec) -> u16 {
        let dps = rate.value();
        if dps <= 0.0 {
            return 0;
        }
        let speed = dps * 65536.0 * self.tick_interval_us * self.substeps_per_degree() / 1e6 + 0.5;
        if speed >= MAX_SPEED as f32 {
            MAX_SPEED
        } else {
            speed as u16
        }
    }

    /// Convert a speed word back to an angular velocity (diagnostics).
    pub fn rate_from_speed(&self, speed: u16) -> DegreesPerSec {
        let dps = speed as f32 * 1e6 / (65536.0 * self.tick_interval_us * self.substeps_per_degree());
        DegreesPerSec(dps)
    }

    /// Convert an angular acceleration to a per-tick speed delta.
    ///
    /// Same encoding as [`speed_from_rate`](Self::speed_from_rate) applied
    /// to the speed gained over one tick.
    pub fn speed_delta_from_accel(&self, accel: DegreesPerSecSquared) -> u16 {
        let rate_per_tick = accel.value() * self.tick_interval_us / 1e6;
        self.speed_from_rate(DegreesPerSec(rate_per_tick))
    }

    /// Clamp a speed-limit word to the rate generator's ceiling.
    #[inline]
    pub const fn clamp_speed_limit(&self, speed_limit: u16) -> u16 {
        if speed_limit > MAX_SPEED {
            MAX_SPEED
        } else {
            speed_limit
        }
    }

    /// Convert a signed angle to a signed sub-step displacement.
    pub fn substeps_from_degrees(&self, angle: Degrees) -> i32 {
        let raw = angle.value() * self.substeps_per_degree();
        if raw >= 0.0 {
            (raw + 0.5) as i32
        } else {
            (raw - 0.5) as i32
        }
    }

    /// Convert full mechanical steps to sub-steps.
    #[inline]
    pub const fn substeps_from_steps(&self, steps: i32) -> i32 {
        steps * self.substeps_per_step as i32
    }

    /// Convert a sub-step count back to an angle.
    pub fn degrees_from_substeps(&self, substeps: i32) -> Degrees {
        Degrees(substeps as f32 / self.substeps_per_degree())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(mode: SteppingMode) -> DriveParameters {
        let config = MotorConfig {
            name: heapless::String::try_from("test").unwrap(),
            step_angle_degrees: Degrees(1.8),
            winding_resistance_ohm: 2.6,
            current_limit_ma: 500.0,
            back_emf_constant: 5.6,
            stepping_mode: mode,
            release_idle_current: true,
            tick_interval_us: 50.0,
        };
        DriveParameters::from_config(&config)
    }

    #[test]
    fn test_speed_encoding_half_step() {
        let p = params(SteppingMode::HalfStep);
        assert_eq!(p.speed_from_rate(DegreesPerSec(360.0)), 1311);
        assert_eq!(p.speed_from_rate(DegreesPerSec(180.0)), 655);
    }

    #[test]
    fn test_speed_encoding_micro_step() {
        let p = params(SteppingMode::MicroStep);
        assert_eq!(p.speed_from_rate(DegreesPerSec(360.0)), 20972);
        // Very slow rates still resolve through the fractional accumulator
        assert_eq!(p.speed_from_rate(DegreesPerSec(0.3)), 17);
    }

    #[test]
    fn test_speed_encoding_full_step() {
        let p = params(SteppingMode::FullStep);
        assert_eq!(p.speed_from_rate(DegreesPerSec(360.0)), 655);
    }

    #[test]
    fn test_speed_clamps_at_ceiling() {
        let p = params(SteppingMode::MicroStep);
        assert_eq!(p.speed_from_rate(DegreesPerSec(1e6)), MAX_SPEED);
        assert_eq!(p.speed_from_rate(DegreesPerSec(-10.0)), 0);
        assert_eq!(p.clamp_speed_limit(40000), MAX_SPEED);
        assert_eq!(p.clamp_speed_limit(20972), 20972);
    }

    #[test]
    fn test_rate_round_trip() {
        let p = params(SteppingMode::MicroStep);
        let rate = p.rate_from_speed(20972);
        assert!((rate.value() - 360.0).abs() < 0.05);
    }

    #[test]
    fn test_winding_voltage_and_compensation() {
        let p = params(SteppingMode::MicroStep);
        assert_eq!(p.winding_voltage_mv(), 1300.0);
        assert_eq!(p.speed_compensation(), 175_000_000.0);
    }

    #[test]
    fn test_substep_conversions() {
        let p = params(SteppingMode::MicroStep);
        assert_eq!(p.substeps_from_degrees(Degrees(360.0)), 6400);
        assert_eq!(p.substeps_from_degrees(Degrees(-1.8)), -32);
        assert_eq!(p.substeps_from_steps(200), 6400);
        assert!((p.degrees_from_substeps(6400).value() - 360.0).abs() < 1e-3);
    }

    #[test]
    fn test_accel_encoding() {
        let p = params(SteppingMode::MicroStep);
        // 5836 deg/s² over a 50 µs tick gains 0.2918 deg/s, encoding to 17
        assert_eq!(p.speed_delta_from_accel(DegreesPerSecSquared(5836.0)), 17);
    }
}
