//! Configuration validation.

use crate::error::ConfigError;

use super::motor::MotorConfig;
use super::system::SystemConfig;

/// Validate every motor in a system configuration.
pub fn validate_config(config: &SystemConfig) -> Result<(), ConfigError> {
    for (_, motor) in config.motors.iter() {
        validate_motor(motor)?;
    }
    Ok(())
}

/// Validate one motor's physical parameters.
///
/// All electrical parameters enter divisions or reciprocals downstream, so
/// zero or negative values are rejected here rather than producing NaN
/// drive constants.
pub fn validate_motor(motor: &MotorConfig) -> Result<(), ConfigError> {
    if !(motor.step_angle_degrees.value() > 0.0) {
        return Err(ConfigError::InvalidStepAngle(motor.step_angle_degrees.value()));
    }
    if !(motor.winding_resistance_ohm > 0.0) {
        return Err(ConfigError::InvalidWindingResistance(motor.winding_resistance_ohm));
    }
    if !(motor.current_limit_ma > 0.0) {
        return Err(ConfigError::InvalidCurrentLimit(motor.current_limit_ma));
    }
    if !(motor.back_emf_constant > 0.0) {
        return Err(ConfigError::InvalidBackEmfConstant(motor.back_emf_constant));
    }
    if !(motor.tick_interval_us > 0.0) {
        return Err(ConfigError::InvalidTickInterval(motor.tick_interval_us));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::Degrees;
    use crate::wave::SteppingMode;

    fn valid_motor() -> MotorConfig {
        MotorConfig {
            name: heapless::String::try_from("test").unwrap(),
            step_angle_degrees: Degrees(1.8),
            winding_resistance_ohm: 2.6,
            current_limit_ma: 500.0,
            back_emf_constant: 5.6,
            stepping_mode: SteppingMode::MicroStep,
            release_idle_current: true,
            tick_interval_us: 50.0,
        }
    }

    #[test]
    fn test_valid_motor_passes() {
        assert!(validate_motor(&valid_motor()).is_ok());
    }

    #[test]
    fn test_zero_step_angle_rejected() {
        let mut motor = valid_motor();
        motor.step_angle_degrees = Degrees(0.0);
        assert_eq!(
            validate_motor(&motor),
            Err(ConfigError::InvalidStepAngle(0.0))
        );
    }

    #[test]
    fn test_negative_resistance_rejected() {
        let mut motor = valid_motor();
        motor.winding_resistance_ohm = -2.6;
        assert!(matches!(
            validate_motor(&motor),
            Err(ConfigError::InvalidWindingResistance(_))
        ));
    }

    #[test]
    fn test_nan_current_rejected() {
        let mut motor = valid_motor();
        motor.current_limit_ma = f32::NAN;
        assert!(matches!(
            validate_motor(&motor),
            Err(ConfigError::InvalidCurrentLimit(_))
        ));
    }

    #[test]
    fn test_zero_tick_interval_rejected() {
        let mut motor = valid_motor();
        motor.tick_interval_us = 0.0;
        assert!(matches!(
            validate_motor(&motor),
            Err(ConfigError::InvalidTickInterval(_))
        ));
    }
}
