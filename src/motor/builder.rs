//! Builder for [`StepperDriver`].

use crate::config::units::Degrees;
use crate::config::{validate_motor, DriveParameters, MotorConfig, SystemConfig};
use crate::error::{ConfigError, Result};
use crate::motor::driver::StepperDriver;
use crate::motor::hal::{BusVoltageSense, TickSource, WaveOutput};
use crate::wave::SteppingMode;

fn bounded_name(name: &str) -> heapless::String<32> {
    let mut out = heapless::String::new();
    for c in name.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

fn default_config() -> MotorConfig {
    MotorConfig {
        name: bounded_name("motor"),
        step_angle_degrees: Degrees(1.8),
        winding_resistance_ohm: 2.6,
        current_limit_ma: 500.0,
        back_emf_constant: 5.6,
        stepping_mode: SteppingMode::default(),
        release_idle_current: true,
        tick_interval_us: 50.0,
    }
}

/// Fluent construction of a [`StepperDriver`].
///
/// Starts from a 1.8-degree NEMA-class default and lets individual
/// parameters be overridden, or the whole set be taken from a parsed
/// configuration. `build` validates the parameters and initializes the
/// output to a de-energized state.
pub struct StepperDriverBuilder<W, T, V> {
    wave: W,
    ticks: T,
    bus_sense: V,
    config: MotorConfig,
}

impl<W, T, V> StepperDriverBuilder<W, T, V>
where
    W: WaveOutput,
    T: TickSource,
    V: BusVoltageSense,
{
    /// Start a builder from the three hardware resources.
    pub fn new(wave: W, ticks: T, bus_sense: V) -> Self {
        Self {
            wave,
            ticks,
            bus_sense,
            config: default_config(),
        }
    }

    /// Take all motor parameters from a configuration entry.
    pub fn motor_config(mut self, config: &MotorConfig) -> Self {
        self.config = config.clone();
        self
    }

    /// Take all motor parameters from a named entry of a system
    /// configuration.
    pub fn motor_from(self, system: &SystemConfig, name: &str) -> Result<Self> {
        let config = system
            .motor(name)
            .ok_or(ConfigError::MotorNotFound(bounded_name(name)))?;
        Ok(self.motor_config(config))
    }

    /// Set the motor name (truncated to 32 characters).
    pub fn name(mut self, name: &str) -> Self {
        self.config.name = bounded_name(name);
        self
    }

    /// Set the full-step angle.
    pub fn step_angle(mut self, angle: Degrees) -> Self {
        self.config.step_angle_degrees = angle;
        self
    }

    /// Set the winding resistance in ohms.
    pub fn winding_resistance_ohm(mut self, ohms: f32) -> Self {
        self.config.winding_resistance_ohm = ohms;
        self
    }

    /// Set the target coil current in milliamps.
    pub fn current_limit_ma(mut self, ma: f32) -> Self {
        self.config.current_limit_ma = ma;
        self
    }

    /// Set the back-EMF proportionality constant.
    pub fn back_emf_constant(mut self, kv: f32) -> Self {
        self.config.back_emf_constant = kv;
        self
    }

    /// Set the stepping resolution.
    pub fn stepping_mode(mut self, mode: SteppingMode) -> Self {
        self.config.stepping_mode = mode;
        self
    }

    /// De-energize the coils when a move completes.
    pub fn release_idle_current(mut self, release: bool) -> Self {
        self.config.release_idle_current = release;
        self
    }

    /// Set the control tick period in microseconds.
    pub fn tick_interval_us(mut self, us: f32) -> Self {
        self.config.tick_interval_us = us;
        self
    }

    /// Validate the parameters and build an initialized driver.
    pub fn build(self) -> Result<StepperDriver<W, T, V>> {
        validate_motor(&self.config)?;
        let params = DriveParameters::from_config(&self.config);
        let mut driver =
            StepperDriver::new(self.wave, self.ticks, self.bus_sense, params, self.config.name);
        driver.initialize()?;
        Ok(driver)
    }
}
