//! Motor configuration structure.

use serde::Deserialize;

use crate::config::units::Degrees;
use crate::wave::SteppingMode;

fn default_release_idle() -> bool {
    true
}

fn default_tick_interval() -> f32 {
    50.0
}

/// Electrical and mechanical parameters of one stepper motor.
///
/// Deserialized from the `[motors.<name>]` tables of the TOML configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MotorConfig {
    /// Human-readable motor name.
    pub name: heapless::String<32>,
    /// Full-step angle in degrees (1.8 for a 200-step motor).
    pub step_angle_degrees: Degrees,
    /// Winding resistance in ohms.
    pub winding_resistance_ohm: f32,
    /// Target coil current in milliamps.
    pub current_limit_ma: f32,
    /// Back-EMF proportionality constant (typically 1.0 to 10.0).
    pub back_emf_constant: f32,
    /// Stepping resolution for this motor.
    #[serde(default)]
    pub stepping_mode: SteppingMode,
    /// De-energize the coils when a move completes.
    #[serde(default = "default_release_idle")]
    pub release_idle_current: bool,
    /// Control tick period in microseconds.
    #[serde(default = "default_tick_interval")]
    pub tick_interval_us: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_defaults() {
        let toml = r#"
            name = "nema17"
            step_angle_degrees = 1.8
            winding_resistance_ohm = 2.6
            current_limit_ma = 500.0
            back_emf_constant = 5.6
        "#;
        let config: MotorConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.name.as_str(), "nema17");
        assert_eq!(config.stepping_mode, SteppingMode::FullStep);
        assert!(config.release_idle_current);
        assert_eq!(config.tick_interval_us, 50.0);
    }

    #[test]
    fn test_deserialize_explicit_mode() {
        let toml = r#"
            name = "nema17"
            step_angle_degrees = 1.8
            winding_resistance_ohm = 2.6
            current_limit_ma = 500.0
            back_emf_constant = 5.6
            stepping_mode = "micro_step"
            release_idle_current = false
            tick_interval_us = 25.0
        "#;
        let config: MotorConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.stepping_mode, SteppingMode::MicroStep);
        assert!(!config.release_idle_current);
        assert_eq!(config.tick_interval_us, 25.0);
    }
}
