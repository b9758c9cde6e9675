//! Host-side demonstration of the ramped move API.
//!
//! Runs the driver against simulated hardware: the PWM sink prints a
//! summary of what it was asked to do, the tick source returns immediately
//! so the move runs at simulation speed, and the bus sense reports a fixed
//! 12.8 V supply.
//!
//! Run with `cargo run --example basic_move`.

use core::convert::Infallible;

use stepper_wave::config::units::{Degrees, DegreesPerSec, DegreesPerSecSquared, DriveVector};
use stepper_wave::motor::{BusVoltageSense, StepperDriverBuilder, TickSource, WaveOutput};
use stepper_wave::wave::SteppingMode;

struct SimPwm {
    writes: u64,
}

impl WaveOutput for SimPwm {
    type Error = Infallible;

    fn apply(&mut self, _drive: DriveVector) -> Result<(), Infallible> {
        self.writes += 1;
        Ok(())
    }
}

struct SimTicks;

impl TickSource for SimTicks {
    fn wait_for_tick(&mut self) {}
}

struct SimAdc;

impl BusVoltageSense for SimAdc {
    fn read_bus_voltage_mv(&mut self) -> u16 {
        12800
    }
}

fn main() -> Result<(), stepper_wave::Error> {
    let mut motor = StepperDriverBuilder::new(SimPwm { writes: 0 }, SimTicks, SimAdc)
        .name("demo")
        .stepping_mode(SteppingMode::MicroStep)
        .build()?;

    println!("Supply voltage: 12.80 V");
    println!("Motor: {} ({} sub-steps per step)", motor.name(), motor.params().substeps_per_step());

    for _ in 0..3 {
        let accel = DegreesPerSecSquared(5836.0);
        let decel = DegreesPerSecSquared(5836.0);
        let rate = DegreesPerSec(360.0);

        let pos = motor.move_degrees(Degrees(56.25), accel, decel, rate)?;
        println!("Moved forward,  position: {:8.2} deg", pos.value());

        let pos = motor.move_degrees(Degrees(-112.5), accel, decel, rate)?;
        println!("Moved backward, position: {:8.2} deg", pos.value());
    }

    let (pwm, _, _) = motor.free();
    println!("Total compare-group writes: {}", pwm.writes);
    Ok(())
}
