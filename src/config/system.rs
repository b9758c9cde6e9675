//! Top-level system configuration.

use heapless::FnvIndexMap;
use serde::Deserialize;

use super::motor::MotorConfig;

/// Maximum number of motors in one configuration.
pub const MAX_MOTORS: usize = 8;

/// Complete system configuration holding all motor definitions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemConfig {
    /// Motors keyed by name.
    #[serde(default)]
    pub motors: FnvIndexMap<heapless::String<32>, MotorConfig, MAX_MOTORS>,
}

// Manual impl: `FnvIndexMap`'s derived `PartialEq` requires `V: Eq`, which
// `MotorConfig` cannot satisfy (it holds `f32` fields).
impl PartialEq for SystemConfig {
    fn eq(&self, other: &Self) -> bool {
        self.motors.len() == other.motors.len()
            && self
                .motors
                .iter()
                .all(|(k, v)| other.motors.get(k) == Some(v))
    }
}

impl SystemConfig {
    /// Look up a motor configuration by name.
    pub fn motor(&self, name: &str) -> Option<&MotorConfig> {
        self.motors.iter().find(|(k, _)| k.as_str() == name).map(|(_, v)| v)
    }

    /// Iterate over the configured motor names.
    pub fn motor_names(&self) -> impl Iterator<Item = &str> {
        self.motors.keys().map(|k| k.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name() {
        let toml = r#"
            [motors.axis_x]
            name = "axis_x"
            step_angle_degrees = 1.8
            winding_resistance_ohm = 2.6
            current_limit_ma = 500.0
            back_emf_constant = 5.6
            stepping_mode = "half_step"
        "#;
        let config: SystemConfig = toml::from_str(toml).unwrap();
        assert!(config.motor("axis_x").is_some());
        assert!(config.motor("axis_y").is_none());
        assert_eq!(config.motor_names().count(), 1);
    }
}
