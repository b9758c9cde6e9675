//! TOML configuration loading (std only).

use crate::error::ConfigError;

use super::system::SystemConfig;
use super::validation::validate_config;

fn truncated<const N: usize>(msg: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in msg.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// Parse and validate a system configuration from a TOML string.
pub fn parse_config(toml_str: &str) -> Result<SystemConfig, ConfigError> {
    let config: SystemConfig =
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(truncated(&e.to_string())))?;
    validate_config(&config)?;
    Ok(config)
}

/// Load and validate a system configuration from a TOML file.
pub fn load_config(path: &str) -> Result<SystemConfig, ConfigError> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(truncated(&e.to_string())))?;
    parse_config(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wave::SteppingMode;

    const SAMPLE: &str = r#"
        [motors.axis_x]
        name = "axis_x"
        step_angle_degrees = 1.8
        winding_resistance_ohm = 2.6
        current_limit_ma = 500.0
        back_emf_constant = 5.6
        stepping_mode = "micro_step"

        [motors.axis_y]
        name = "axis_y"
        step_angle_degrees = 0.9
        winding_resistance_ohm = 3.2
        current_limit_ma = 800.0
        back_emf_constant = 4.0
        stepping_mode = "half_step"
        release_idle_current = false
    "#;

    #[test]
    fn test_parse_sample_config() {
        let config = parse_config(SAMPLE).unwrap();
        assert_eq!(config.motor_names().count(), 2);
        let x = config.motor("axis_x").unwrap();
        assert_eq!(x.stepping_mode, SteppingMode::MicroStep);
        assert!(x.release_idle_current);
        let y = config.motor("axis_y").unwrap();
        assert!(!y.release_idle_current);
    }

    #[test]
    fn test_parse_rejects_invalid_values() {
        let bad = r#"
            [motors.bad]
            name = "bad"
            step_angle_degrees = -1.8
            winding_resistance_ohm = 2.6
            current_limit_ma = 500.0
            back_emf_constant = 5.6
        "#;
        assert!(matches!(
            parse_config(bad),
            Err(ConfigError::InvalidStepAngle(_))
        ));
    }

    #[test]
    fn test_parse_rejects_malformed_toml() {
        assert!(matches!(
            parse_config("not valid = ["),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            load_config("/nonexistent/motors.toml"),
            Err(ConfigError::IoError(_))
        ));
    }
}
